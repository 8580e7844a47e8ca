//! Layered settings: defaults, then an optional TOML file, then
//! `SHELTER_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  /// Where the address book is loaded from and saved to.
  pub data_path: PathBuf,
}

impl Settings {
  pub const DEFAULT_DATA_PATH: &'static str = "data/shelter.json";

  pub fn load(config_file: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .set_default("data_path", Self::DEFAULT_DATA_PATH)
      .context("setting defaults")?
      .add_source(config::File::from(config_file).required(false))
      .add_source(config::Environment::with_prefix("SHELTER"))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise settings")
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_apply_without_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(settings.data_path, PathBuf::from(Settings::DEFAULT_DATA_PATH));
  }

  #[test]
  fn file_overrides_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("shelter.toml");
    std::fs::write(&file, "data_path = \"/srv/shelter.json\"\n").unwrap();

    let settings = Settings::load(&file).unwrap();
    assert_eq!(settings.data_path, PathBuf::from("/srv/shelter.json"));
  }

  #[test]
  fn tilde_is_left_alone_elsewhere() {
    assert_eq!(expand_tilde(Path::new("data/~x.json")), PathBuf::from("data/~x.json"));
  }
}
