//! [`ModelManager`]: the mutation façade with undo/redo history.
//!
//! Collaborators never touch an [`AddressBook`] directly. Every mutation
//! goes through the manager, which applies it to a draft copy and, only if
//! it succeeds, installs the draft and pushes the previous contents onto the
//! undo stack. A failed mutation leaves both the data and the history as
//! they were.

use std::{fmt, mem};

use chrono::NaiveDateTime;

use crate::{
  Error, Result,
  address_book::AddressBook,
  animal::Animal,
  contact::{Predicate, show_all},
  feeding_session::FeedingSession,
  id::Id,
  person::Person,
  state::State,
};

pub struct ModelManager {
  address_book:  AddressBook,
  undo_stack:    Vec<State>,
  redo_stack:    Vec<State>,
  person_filter: Predicate<Person>,
  animal_filter: Predicate<Animal>,
}

impl Default for ModelManager {
  fn default() -> Self { Self::new(AddressBook::default()) }
}

impl fmt::Debug for ModelManager {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ModelManager")
      .field("address_book", &self.address_book)
      .field("undo_depth", &self.undo_stack.len())
      .field("redo_depth", &self.redo_stack.len())
      .finish_non_exhaustive()
  }
}

impl ModelManager {
  /// Manage `address_book`, starting with empty history and unfiltered
  /// views.
  pub fn new(address_book: AddressBook) -> Self {
    Self {
      address_book,
      undo_stack: Vec::new(),
      redo_stack: Vec::new(),
      person_filter: show_all(),
      animal_filter: show_all(),
    }
  }

  /// Replace the data wholesale, e.g. after loading from disk. This is not
  /// an undoable step; history is discarded.
  pub fn reset_data(&mut self, source: &AddressBook) {
    self.address_book.reset_data(source);
    self.undo_stack.clear();
    self.redo_stack.clear();
  }

  /// The full, unfiltered dataset, for saving.
  pub fn address_book(&self) -> &AddressBook { &self.address_book }

  /// Run `mutation` against a copy of the data and commit it on success.
  fn commit<T>(
    &mut self,
    mutation: impl FnOnce(&mut AddressBook) -> Result<T>,
  ) -> Result<T> {
    let mut draft = self.address_book.clone();
    let out = mutation(&mut draft)?;
    let previous = mem::replace(&mut self.address_book, draft);
    self.undo_stack.push(State::from(previous));
    self.redo_stack.clear();
    Ok(out)
  }

  // ── Persons ─────────────────────────────────────────────────────────────

  pub fn has_person(&self, person: &Person) -> bool { self.address_book.has_person(person) }

  pub fn add_person(&mut self, person: Person) -> Result<()> {
    self.commit(|book| book.add_person(person))
  }

  /// Replace `target` with `edited`. The edit must keep the id and the
  /// session links, as [`Person::edited`] does.
  pub fn set_person(&mut self, target: &Person, edited: Person) -> Result<()> {
    self.commit(|book| book.set_person(target, edited))
  }

  /// Delete `target` and cascade to its feeding sessions.
  pub fn delete_person(&mut self, target: &Person) -> Result<()> {
    self.commit(|book| book.delete_person(target))
  }

  pub fn person_by_id(&self, id: Id) -> Option<&Person> { self.address_book.person_by_id(id) }

  // ── Animals ─────────────────────────────────────────────────────────────

  pub fn has_animal(&self, animal: &Animal) -> bool { self.address_book.has_animal(animal) }

  pub fn add_animal(&mut self, animal: Animal) -> Result<()> {
    self.commit(|book| book.add_animal(animal))
  }

  pub fn set_animal(&mut self, target: &Animal, edited: Animal) -> Result<()> {
    self.commit(|book| book.set_animal(target, edited))
  }

  /// Delete `target` and cascade to its feeding sessions.
  pub fn delete_animal(&mut self, target: &Animal) -> Result<()> {
    self.commit(|book| book.delete_animal(target))
  }

  pub fn animal_by_id(&self, id: Id) -> Option<&Animal> { self.address_book.animal_by_id(id) }

  // ── Feeding sessions ────────────────────────────────────────────────────

  pub fn has_feeding_session(&self, session: &FeedingSession) -> bool {
    self.address_book.has_feeding_session(session)
  }

  pub fn has_feeding_session_at(
    &self,
    animal_id: Id,
    person_id: Id,
    date_time: NaiveDateTime,
  ) -> bool {
    self.address_book.has_feeding_session_at(animal_id, person_id, date_time)
  }

  /// Store `session` and link it from its person and animal.
  pub fn add_feeding_session(&mut self, session: FeedingSession) -> Result<()> {
    self.commit(|book| book.link_feeding_session(session))
  }

  /// Remove `session` and unlink it from its person and animal.
  pub fn delete_feeding_session(&mut self, session: &FeedingSession) -> Result<()> {
    self.commit(|book| book.unlink_feeding_session(session))
  }

  pub fn feeding_session_by_id(&self, id: Id) -> Option<&FeedingSession> {
    self.address_book.feeding_session_by_id(id)
  }

  pub fn feeding_sessions(&self) -> &[FeedingSession] { self.address_book.feeding_sessions() }

  /// Empty the whole book. Undoable.
  pub fn clear(&mut self) -> Result<()> {
    self.commit(|book| {
      *book = AddressBook::default();
      Ok(())
    })
  }

  // ── Filtered views ──────────────────────────────────────────────────────

  /// Persons accepted by the current filter, in insertion order.
  pub fn filtered_persons(&self) -> impl Iterator<Item = &Person> {
    self.address_book.persons().iter().filter(|&p| (self.person_filter)(p))
  }

  /// Animals accepted by the current filter, in insertion order.
  pub fn filtered_animals(&self) -> impl Iterator<Item = &Animal> {
    self.address_book.animals().iter().filter(|&a| (self.animal_filter)(a))
  }

  pub fn update_filtered_person_list(&mut self, predicate: Predicate<Person>) {
    self.person_filter = predicate;
  }

  pub fn update_filtered_animal_list(&mut self, predicate: Predicate<Animal>) {
    self.animal_filter = predicate;
  }

  // ── History ─────────────────────────────────────────────────────────────

  pub fn can_undo(&self) -> bool { !self.undo_stack.is_empty() }

  pub fn can_redo(&self) -> bool { !self.redo_stack.is_empty() }

  /// Restore the contents as they were before the last mutation.
  pub fn undo(&mut self) -> Result<()> {
    let previous = self.undo_stack.pop().ok_or(Error::NoUndoableState)?;
    let current = mem::replace(&mut self.address_book, previous.into_address_book());
    self.redo_stack.push(State::from(current));
    Ok(())
  }

  /// Re-apply the last undone mutation.
  pub fn redo(&mut self) -> Result<()> {
    let next = self.redo_stack.pop().ok_or(Error::NoRedoableState)?;
    let current = mem::replace(&mut self.address_book, next.into_address_book());
    self.undo_stack.push(State::from(current));
    Ok(())
  }
}
