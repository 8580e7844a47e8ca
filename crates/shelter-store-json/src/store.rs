//! [`JsonStore`]: load and save an [`AddressBook`] as a JSON file.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use shelter_core::AddressBook;
use tracing::{debug, warn};

use crate::{
  Error, Result,
  encode::{RawAddressBook, RawAnimal, RawFeedingSession, RawPerson},
};

// ─── Reference mode ──────────────────────────────────────────────────────────

/// How session ids recorded on persons and animals are treated on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceMode {
  /// Every id must name a feeding session in the same document.
  Strict,
  /// Documents written before feeding sessions existed: ids on persons and
  /// animals are dropped without checking.
  LegacyDiscard,
}

impl ReferenceMode {
  /// [`ReferenceMode::LegacyDiscard`] for a document with no feeding
  /// sessions at all, [`ReferenceMode::Strict`] otherwise.
  fn detect(raw: &RawAddressBook) -> Self {
    if raw.feeding_sessions.is_empty() { Self::LegacyDiscard } else { Self::Strict }
  }
}

// ─── Codec ───────────────────────────────────────────────────────────────────

/// Serialise `book` as a pretty-printed JSON document.
pub fn encode(book: &AddressBook) -> Result<String> {
  let raw = RawAddressBook {
    persons:          book.persons().iter().map(RawPerson::from).collect(),
    animals:          book.animals().iter().map(RawAnimal::from).collect(),
    feeding_sessions: book.feeding_sessions().iter().map(RawFeedingSession::from).collect(),
  };
  Ok(serde_json::to_string_pretty(&raw)?)
}

/// Parse and validate a JSON document.
///
/// With `mode` unset the mode is chosen by [`ReferenceMode`]'s detection
/// rule. The book is assembled privately and returned only once every
/// record has validated, so an error never leaves a half-built book behind.
pub fn decode(json: &str, mode: Option<ReferenceMode>) -> Result<AddressBook> {
  let raw: RawAddressBook = serde_json::from_str(json)?;
  let mode = mode.unwrap_or_else(|| ReferenceMode::detect(&raw));
  let keep_sessions = mode == ReferenceMode::Strict;

  if !keep_sessions {
    let dropped = raw.persons.iter().map(|p| p.feeding_session_ids.len()).sum::<usize>()
      + raw.animals.iter().map(|a| a.feeding_session_ids.len()).sum::<usize>();
    if dropped > 0 {
      warn!(dropped, "discarding feeding-session references from legacy data");
    }
  }

  let sessions = raw
    .feeding_sessions
    .into_iter()
    .map(RawFeedingSession::into_feeding_session)
    .collect::<Result<Vec<_>>>()?;
  let persons = raw
    .persons
    .into_iter()
    .map(|p| p.into_person(keep_sessions))
    .collect::<Result<Vec<_>>>()?;
  let animals = raw
    .animals
    .into_iter()
    .map(|a| a.into_animal(keep_sessions))
    .collect::<Result<Vec<_>>>()?;

  let mut book = AddressBook::new();
  book.set_feeding_sessions(sessions)?;
  book.set_persons(persons)?;
  book.set_animals(animals)?;

  if let Some(orphan) = book.orphaned_references().into_iter().next() {
    return Err(Error::OrphanedReference {
      owner_kind: orphan.owner_kind,
      owner:      orphan.owner,
      session:    orphan.session,
    });
  }

  Ok(book)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A shelter address book kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonStore {
  path: PathBuf,
}

impl JsonStore {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Load the book, choosing the reference mode from the document.
  ///
  /// Returns `Ok(None)` if the file does not exist yet.
  pub fn load(&self) -> Result<Option<AddressBook>> { self.read(None) }

  /// Load the book with an explicit reference mode.
  pub fn load_with(&self, mode: ReferenceMode) -> Result<Option<AddressBook>> {
    self.read(Some(mode))
  }

  fn read(&self, mode: Option<ReferenceMode>) -> Result<Option<AddressBook>> {
    let json = match fs::read_to_string(&self.path) {
      Ok(json) => json,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        debug!(path = %self.path.display(), "no data file yet");
        return Ok(None);
      }
      Err(e) => return Err(Error::io(&self.path, e)),
    };

    let book = decode(&json, mode)?;
    debug!(
      path = %self.path.display(),
      persons = book.persons().len(),
      animals = book.animals().len(),
      feeding_sessions = book.feeding_sessions().len(),
      "loaded address book"
    );
    Ok(Some(book))
  }

  /// Write `book`, replacing the file in a single rename.
  pub fn save(&self, book: &AddressBook) -> Result<()> {
    let json = encode(book)?;

    if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    }

    let staging = self.staging_path();
    fs::write(&staging, json).map_err(|e| Error::io(&staging, e))?;
    fs::rename(&staging, &self.path).map_err(|e| Error::io(&self.path, e))?;

    debug!(path = %self.path.display(), "saved address book");
    Ok(())
  }

  fn staging_path(&self) -> PathBuf {
    let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    self.path.with_file_name(name)
  }
}
