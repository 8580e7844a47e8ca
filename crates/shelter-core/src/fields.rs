//! Validated field values carried by persons and animals.
//!
//! The command and persistence layers build these before handing records to
//! the store; the store itself never re-validates them.

use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::{Error, Result};

// ─── Phone ───────────────────────────────────────────────────────────────────

/// A phone number: at least three ASCII digits, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
  pub const MIN_DIGITS: usize = 3;

  pub fn new(raw: &str) -> Result<Self> {
    let trimmed = raw.trim();
    if trimmed.len() < Self::MIN_DIGITS || !trimmed.chars().all(|c| c.is_ascii_digit())
    {
      return Err(Error::invalid(
        "phone",
        format!("{trimmed:?} must be at least {} digits", Self::MIN_DIGITS),
      ));
    }
    Ok(Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

// ─── Email ───────────────────────────────────────────────────────────────────

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[A-Za-z0-9]+([+_.\-][A-Za-z0-9]+)*@([A-Za-z0-9]+(-[A-Za-z0-9]+)*\.)*[A-Za-z0-9][A-Za-z0-9\-]*[A-Za-z0-9]$",
  )
  .expect("email pattern is a valid regex")
});

/// An email address of the form `local-part@domain`.
///
/// The local part is alphanumeric segments joined by one of `+_.-`; the
/// domain is dot-separated labels, the last of which is at least two
/// characters long.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
  /// RFC 5322 line-length limit.
  pub const MAX_LEN: usize = 998;

  pub fn new(raw: &str) -> Result<Self> {
    let trimmed = raw.trim();
    if trimmed.len() > Self::MAX_LEN {
      return Err(Error::invalid(
        "email",
        format!("must be at most {} characters", Self::MAX_LEN),
      ));
    }
    if !EMAIL_PATTERN.is_match(trimmed) {
      return Err(Error::invalid(
        "email",
        format!("{trimmed:?} is not of the form local-part@domain"),
      ));
    }
    Ok(Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

// ─── Free text ───────────────────────────────────────────────────────────────

fn non_blank(field: &'static str, raw: &str) -> Result<String> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(Error::invalid(field, "must not be blank"));
  }
  Ok(trimmed.to_owned())
}

/// What an animal looks like or how it behaves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Description(String);

impl Description {
  pub fn new(raw: &str) -> Result<Self> { non_blank("description", raw).map(Self) }

  pub fn as_str(&self) -> &str { &self.0 }
}

/// Where an animal is usually found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Location(String);

impl Location {
  pub fn new(raw: &str) -> Result<Self> { non_blank("location", raw).map(Self) }

  pub fn as_str(&self) -> &str { &self.0 }
}

/// A free-text label attached to a person or animal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
  pub fn new(raw: &str) -> Result<Self> { non_blank("tag", raw).map(Self) }

  pub fn as_str(&self) -> &str { &self.0 }
}

macro_rules! impl_text_traits {
  ($($ty:ty),* $(,)?) => {$(
    impl FromStr for $ty {
      type Err = Error;

      fn from_str(s: &str) -> Result<Self> { Self::new(s) }
    }

    impl fmt::Display for $ty {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
    }
  )*};
}

impl_text_traits!(Phone, Email, Description, Location, Tag);
