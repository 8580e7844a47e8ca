//! Error types for `shelter-core`.

use strum::Display;
use thiserror::Error;

/// The three record types held by an [`AddressBook`](crate::AddressBook).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
  Person,
  Animal,
  #[strum(serialize = "feeding session")]
  FeedingSession,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// An insert or replace would leave two identity-equal entries.
  #[error("{0} already exists")]
  DuplicateEntity(EntityKind),

  /// A replace/remove target, or an id-addressed record, is absent.
  #[error("no such {0}")]
  EntityNotFound(EntityKind),

  #[error("nothing to undo")]
  NoUndoableState,

  #[error("nothing to redo")]
  NoRedoableState,

  /// A value-type constructor rejected its input.
  #[error("invalid {field}: {message}")]
  InvalidField {
    field:   &'static str,
    message: String,
  },
}

impl Error {
  pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
    Self::InvalidField { field, message: message.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
