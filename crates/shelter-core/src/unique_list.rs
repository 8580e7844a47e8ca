//! An insertion-ordered collection that refuses identity-equal duplicates.

use std::slice;

use crate::{Error, Result, error::EntityKind};

/// The notion of "same entity" used by [`UniqueList`].
///
/// This is deliberately weaker than `PartialEq`: two persons with the same
/// name but different phone numbers are the same identity, yet not equal.
pub trait Identity {
  const KIND: EntityKind;

  fn is_same(&self, other: &Self) -> bool;
}

/// A list of `T` in which no two entries share an identity.
///
/// Cloning produces an independent deep copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniqueList<T> {
  items: Vec<T>,
}

impl<T> Default for UniqueList<T> {
  fn default() -> Self { Self { items: Vec::new() } }
}

impl<T> UniqueList<T>
where
  T: Identity + PartialEq + Clone,
{
  pub fn new() -> Self { Self::default() }

  /// True if an entry with the same identity as `item` is present.
  pub fn contains(&self, item: &T) -> bool { self.items.iter().any(|i| i.is_same(item)) }

  /// Append `item`.
  pub fn add(&mut self, item: T) -> Result<()> {
    if self.contains(&item) {
      return Err(Error::DuplicateEntity(T::KIND));
    }
    self.items.push(item);
    Ok(())
  }

  /// Replace `target` with `replacement` at the same position.
  ///
  /// `target` is located by full equality. `replacement` may keep the
  /// identity of `target`, but must not take that of any other entry.
  pub fn set_one(&mut self, target: &T, replacement: T) -> Result<()> {
    let index = self
      .items
      .iter()
      .position(|i| i == target)
      .ok_or(Error::EntityNotFound(T::KIND))?;

    if !target.is_same(&replacement) && self.contains(&replacement) {
      return Err(Error::DuplicateEntity(T::KIND));
    }

    self.items[index] = replacement;
    Ok(())
  }

  /// Remove the entry equal to `item` in every field.
  pub fn remove(&mut self, item: &T) -> Result<()> {
    let index = self
      .items
      .iter()
      .position(|i| i == item)
      .ok_or(Error::EntityNotFound(T::KIND))?;
    self.items.remove(index);
    Ok(())
  }

  /// Remove every entry matching `pred`, returning how many went.
  pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) -> usize {
    let before = self.items.len();
    self.items.retain(|i| !pred(i));
    before - self.items.len()
  }

  /// Replace the whole contents with `items`, which must be free of
  /// identity-equal pairs.
  pub fn replace_all(&mut self, items: Vec<T>) -> Result<()> {
    if !all_unique(&items) {
      return Err(Error::DuplicateEntity(T::KIND));
    }
    self.items = items;
    Ok(())
  }

  pub fn find(&self, pred: impl Fn(&T) -> bool) -> Option<&T> {
    self.items.iter().find(|&i| pred(i))
  }
}

impl<T> UniqueList<T> {
  /// A read-only view in insertion order.
  pub fn as_slice(&self) -> &[T] { &self.items }

  pub fn iter(&self) -> slice::Iter<'_, T> { self.items.iter() }

  pub fn len(&self) -> usize { self.items.len() }

  pub fn is_empty(&self) -> bool { self.items.is_empty() }
}

impl<'a, T> IntoIterator for &'a UniqueList<T> {
  type IntoIter = slice::Iter<'a, T>;
  type Item = &'a T;

  fn into_iter(self) -> Self::IntoIter { self.items.iter() }
}

fn all_unique<T: Identity>(items: &[T]) -> bool {
  items
    .iter()
    .enumerate()
    .all(|(i, a)| items[i + 1..].iter().all(|b| !a.is_same(b)))
}
