//! Immutable snapshots of an [`AddressBook`], kept by the undo history.

use crate::address_book::AddressBook;

/// The full contents of an address book at one instant.
///
/// A snapshot owns its own copy, so later changes to the live book cannot
/// reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State(AddressBook);

impl State {
  /// Deep-copy `book`.
  pub fn capture(book: &AddressBook) -> Self { Self(book.clone()) }

  pub fn address_book(&self) -> &AddressBook { &self.0 }

  pub fn into_address_book(self) -> AddressBook { self.0 }
}

impl From<AddressBook> for State {
  fn from(book: AddressBook) -> Self { Self(book) }
}
