//! Command grammar for the shell.
//!
//! Each input line is split with shell quoting rules and parsed by clap in
//! multicall mode, so the first word selects the command. Field values are
//! parsed straight into the validated core types.

use std::num::NonZeroUsize;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use shelter_core::{AnimalName, Description, Email, Location, PersonName, Phone, Tag};

#[derive(Debug, Parser)]
#[command(multicall = true)]
pub struct Line {
  #[command(subcommand)]
  pub command: Command,
}

/// Indices are 1-based positions in the most recent listing.
#[derive(Debug, Subcommand)]
pub enum Command {
  /// Add a person.
  AddPerson {
    #[arg(short, long)]
    name:  PersonName,
    #[arg(short, long)]
    phone: Phone,
    #[arg(short, long)]
    email: Email,
    /// May be repeated.
    #[arg(short, long = "tag")]
    tags:  Vec<Tag>,
  },

  /// Add an animal.
  AddAnimal {
    #[arg(short, long)]
    name:        AnimalName,
    #[arg(short, long)]
    description: Description,
    #[arg(short, long)]
    location:    Location,
    #[arg(short, long = "tag")]
    tags:        Vec<Tag>,
  },

  /// Change some fields of a listed person. Tags, if given, replace all
  /// existing tags; `--clear-tags` removes them.
  EditPerson {
    index:      NonZeroUsize,
    #[arg(short, long)]
    name:       Option<PersonName>,
    #[arg(short, long)]
    phone:      Option<Phone>,
    #[arg(short, long)]
    email:      Option<Email>,
    #[arg(short, long = "tag")]
    tags:       Vec<Tag>,
    #[arg(long, conflicts_with = "tags")]
    clear_tags: bool,
  },

  /// Change some fields of a listed animal. Tags work as for `edit-person`.
  EditAnimal {
    index:       NonZeroUsize,
    #[arg(short, long)]
    name:        Option<AnimalName>,
    #[arg(short, long)]
    description: Option<Description>,
    #[arg(short, long)]
    location:    Option<Location>,
    #[arg(short, long = "tag")]
    tags:        Vec<Tag>,
    #[arg(long, conflicts_with = "tags")]
    clear_tags:  bool,
  },

  /// Delete a listed person and every feeding session they ran.
  DeletePerson { index: NonZeroUsize },

  /// Delete a listed animal and every feeding session it had.
  DeleteAnimal { index: NonZeroUsize },

  /// Record that a person fed an animal.
  Feed {
    /// Index of the animal in the animal listing.
    #[arg(short, long)]
    animal: NonZeroUsize,
    /// Index of the person in the person listing.
    #[arg(short, long)]
    person: NonZeroUsize,
    /// When, as YYYY-MM-DDTHH:MM.
    #[arg(long, value_parser = parse_date_time)]
    at:     NaiveDateTime,
    #[arg(long, default_value = "")]
    notes:  String,
  },

  /// Delete a feeding session and unlink it from both sides.
  DeleteFeeding { index: NonZeroUsize },

  /// Show records, clearing any filter.
  List {
    #[arg(value_enum, default_value_t = Section::All)]
    section: Section,
  },

  /// Show persons whose name contains any keyword.
  FindPerson {
    #[arg(required_unless_present = "tag")]
    keywords: Vec<String>,
    /// Filter on a tag instead.
    #[arg(long, conflicts_with = "keywords")]
    tag:      Option<String>,
  },

  /// Show animals whose name contains any keyword.
  FindAnimal {
    #[arg(required_unless_present = "tag")]
    keywords: Vec<String>,
    #[arg(long, conflicts_with = "keywords")]
    tag:      Option<String>,
  },

  /// Revert the last change.
  Undo,

  /// Re-apply the last reverted change.
  Redo,

  /// Delete everything. Undoable.
  Clear,

  /// Leave the shell.
  #[command(alias = "quit")]
  Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
  All,
  Persons,
  Animals,
  Sessions,
}

fn parse_date_time(s: &str) -> Result<NaiveDateTime, chrono::ParseError> {
  NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
    .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
}

/// Split `line` into words and parse it.
pub fn parse(line: &str) -> Result<Command, ParseFailure> {
  let words = shell_words::split(line).map_err(|e| ParseFailure::Quoting(e.to_string()))?;
  if words.is_empty() {
    return Err(ParseFailure::Empty);
  }
  Line::try_parse_from(words)
    .map(|l| l.command)
    .map_err(ParseFailure::Clap)
}

#[derive(Debug)]
pub enum ParseFailure {
  Empty,
  Quoting(String),
  /// Also carries help and version output.
  Clap(clap::Error),
}
