//! `shelter`: command shell for the shelter contact store.
//!
//! # Usage
//!
//! ```text
//! shelter --config shelter.toml
//! SHELTER_DATA_PATH=~/shelter.json shelter
//! ```
//!
//! Reads one command per line from stdin; `help` lists them.

mod app;
mod command;
mod render;
mod settings;

use std::{
  io::{self, BufRead, Write},
  path::PathBuf,
};

use anyhow::{Context, Result};
use app::{App, Outcome};
use clap::Parser;
use settings::Settings;
use shelter_store_json::JsonStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "shelter", version, about = "Command shell for the shelter contact store")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "shelter.toml")]
  config: PathBuf,

  /// Data file to open; overrides `data_path` from the config.
  #[arg(long, value_name = "FILE")]
  data: Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  // Logs go to stderr so they never interleave with command output.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(io::stderr)
    .init();

  let args = Args::parse();
  let settings = Settings::load(&args.config)?;
  let data_path = settings::expand_tilde(&args.data.unwrap_or(settings.data_path));

  let store = JsonStore::new(&data_path);
  let book = store
    .load()
    .with_context(|| format!("loading {}", data_path.display()))?
    .unwrap_or_default();
  tracing::info!(path = %data_path.display(), "opened data file");

  let mut app = App::new(store, &book);
  run_repl(&mut app, io::stdin().lock(), io::stdout().lock())
}

// ─── REPL ─────────────────────────────────────────────────────────────────────

fn run_repl(app: &mut App, input: impl BufRead, mut output: impl Write) -> Result<()> {
  write!(output, "> ")?;
  output.flush()?;

  for line in input.lines() {
    let line = line.context("reading command")?;
    match app.execute(&line) {
      Outcome::Exit => break,
      Outcome::Reply(text) if text.is_empty() => {}
      Outcome::Reply(text) => writeln!(output, "{text}")?,
    }
    write!(output, "> ")?;
    output.flush()?;
  }

  Ok(())
}
