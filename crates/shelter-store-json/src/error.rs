//! Error type for `shelter-store-json`.

use std::path::PathBuf;

use shelter_core::{EntityKind, Id};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] shelter_core::Error),

  #[error("i/o error on {}: {source}", path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored record lacks a required field.
  #[error("{kind} record is missing its {field} field")]
  MissingField {
    kind:  EntityKind,
    field: &'static str,
  },

  /// A person or animal refers to a feeding session the document does not
  /// contain.
  #[error("{owner_kind} {owner} references unknown feeding session {session}")]
  OrphanedReference {
    owner_kind: EntityKind,
    owner:      Id,
    session:    Id,
  },
}

impl Error {
  pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
    Self::Io { path: path.into(), source }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
