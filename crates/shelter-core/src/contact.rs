//! The shape shared by persons and animals, and predicates over it.
//!
//! Predicates are plain closures so the command layer can compose its own;
//! the constructors here cover the common filters.

use std::collections::BTreeSet;

use crate::{fields::Tag, id::Id, name::Name};

/// Accessors common to [`Person`](crate::Person) and
/// [`Animal`](crate::Animal).
pub trait Contact {
  fn id(&self) -> Id;

  fn name(&self) -> &Name;

  fn tags(&self) -> &BTreeSet<Tag>;

  /// Ids of the feeding sessions this record takes part in.
  fn feeding_session_ids(&self) -> &BTreeSet<Id>;
}

/// A boxed filter over one record type.
pub type Predicate<T> = Box<dyn Fn(&T) -> bool>;

/// Accepts everything.
pub fn show_all<T: 'static>() -> Predicate<T> { Box::new(|_| true) }

/// Accepts records whose name contains any of `keywords` as a whole word,
/// ignoring case. An empty keyword list accepts nothing.
pub fn name_contains_keywords<T, I, S>(keywords: I) -> Predicate<T>
where
  T: Contact + 'static,
  I: IntoIterator<Item = S>,
  S: Into<String>,
{
  let keywords: Vec<String> = keywords.into_iter().map(Into::into).collect();
  Box::new(move |c: &T| keywords.iter().any(|k| c.name().contains_word(k)))
}

/// Accepts records carrying `tag`, ignoring case.
pub fn has_tag<T: Contact + 'static>(tag: impl Into<String>) -> Predicate<T> {
  let tag = tag.into();
  Box::new(move |c: &T| c.tags().iter().any(|t| t.as_str().eq_ignore_ascii_case(&tag)))
}
