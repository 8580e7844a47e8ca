//! Display names for persons and animals.
//!
//! Names compare and hash case-insensitively, so "Max", "max" and "MAX" are
//! the same identity as far as the unique collections are concerned.

use std::{
  fmt,
  hash::{Hash, Hasher},
  ops::Deref,
  str::FromStr,
};

use serde::Serialize;

use crate::{Error, Result};

/// The longest name accepted, in characters.
pub const MAX_NAME_LEN: usize = 30;

/// A trimmed, non-empty name made of ASCII letters, digits and spaces.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Name(String);

impl Name {
  pub fn new(raw: &str) -> Result<Self> { Self::parse("name", raw) }

  fn parse(field: &'static str, raw: &str) -> Result<Self> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(Error::invalid(field, "must not be blank"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ') {
      return Err(Error::invalid(
        field,
        format!("{trimmed:?} may only contain letters, digits and spaces"),
      ));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
      return Err(Error::invalid(
        field,
        format!("must be at most {MAX_NAME_LEN} characters"),
      ));
    }
    Ok(Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }

  /// True if `word` equals one of the whitespace-separated words of this
  /// name, ignoring case.
  pub fn contains_word(&self, word: &str) -> bool {
    self.0.split_whitespace().any(|w| w.eq_ignore_ascii_case(word))
  }
}

impl PartialEq for Name {
  fn eq(&self, other: &Self) -> bool { self.0.eq_ignore_ascii_case(&other.0) }
}

impl Eq for Name {}

impl Hash for Name {
  fn hash<H: Hasher>(&self, state: &mut H) {
    for b in self.0.bytes() {
      state.write_u8(b.to_ascii_lowercase());
    }
  }
}

impl FromStr for Name {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::new(s) }
}

impl fmt::Display for Name {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

// ─── Specialisations ─────────────────────────────────────────────────────────

/// The name of a [`Person`](crate::Person).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct PersonName(Name);

impl PersonName {
  pub fn new(raw: &str) -> Result<Self> { Name::parse("person name", raw).map(Self) }
}

impl Deref for PersonName {
  type Target = Name;

  fn deref(&self) -> &Name { &self.0 }
}

impl FromStr for PersonName {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::new(s) }
}

impl fmt::Display for PersonName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// The name of an [`Animal`](crate::Animal).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct AnimalName(Name);

impl AnimalName {
  pub fn new(raw: &str) -> Result<Self> { Name::parse("animal name", raw).map(Self) }
}

impl Deref for AnimalName {
  type Target = Name;

  fn deref(&self) -> &Name { &self.0 }
}

impl FromStr for AnimalName {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> { Self::new(s) }
}

impl fmt::Display for AnimalName {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}
