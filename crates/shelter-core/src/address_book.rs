//! [`AddressBook`]: the aggregate of persons, animals and feeding sessions.
//!
//! The aggregate owns the cross-reference rules between the three
//! collections. Bare `add_*`/`set_*`/`remove_*` methods touch one collection
//! only; the composite operations ([`AddressBook::link_feeding_session`],
//! [`AddressBook::unlink_feeding_session`], [`AddressBook::delete_person`],
//! [`AddressBook::delete_animal`]) keep session references on both ends in
//! step with the session collection.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::{
  Error, Result,
  animal::Animal,
  contact::Contact,
  error::EntityKind,
  feeding_session::FeedingSession,
  id::Id,
  person::Person,
  unique_list::UniqueList,
};

/// A session id recorded on a person or animal that matches no stored
/// feeding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrphanedReference {
  pub owner_kind: EntityKind,
  pub owner:      Id,
  pub session:    Id,
}

/// The whole dataset. Cloning yields an independent deep copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
  persons:          UniqueList<Person>,
  animals:          UniqueList<Animal>,
  feeding_sessions: UniqueList<FeedingSession>,
}

impl AddressBook {
  pub fn new() -> Self { Self::default() }

  /// Replace every collection with a copy of `source`'s.
  ///
  /// Sessions go first so that persons and animals arriving afterwards can
  /// be checked against them.
  pub fn reset_data(&mut self, source: &AddressBook) {
    self.feeding_sessions = source.feeding_sessions.clone();
    self.persons = source.persons.clone();
    self.animals = source.animals.clone();
  }

  pub fn set_persons(&mut self, persons: Vec<Person>) -> Result<()> {
    self.persons.replace_all(persons)
  }

  pub fn set_animals(&mut self, animals: Vec<Animal>) -> Result<()> {
    self.animals.replace_all(animals)
  }

  /// Fails if two sessions share an id or an `(animal, person, date_time)`
  /// triple.
  pub fn set_feeding_sessions(&mut self, sessions: Vec<FeedingSession>) -> Result<()> {
    let mut triples = HashSet::new();
    if !sessions
      .iter()
      .all(|s| triples.insert((s.animal_id(), s.person_id(), s.date_time())))
    {
      return Err(Error::DuplicateEntity(EntityKind::FeedingSession));
    }
    self.feeding_sessions.replace_all(sessions)
  }

  // ── Read-only views ─────────────────────────────────────────────────────

  pub fn persons(&self) -> &[Person] { self.persons.as_slice() }

  pub fn animals(&self) -> &[Animal] { self.animals.as_slice() }

  pub fn feeding_sessions(&self) -> &[FeedingSession] { self.feeding_sessions.as_slice() }

  pub fn is_empty(&self) -> bool {
    self.persons.is_empty() && self.animals.is_empty() && self.feeding_sessions.is_empty()
  }

  // ── Lookup ──────────────────────────────────────────────────────────────

  pub fn person_by_id(&self, id: Id) -> Option<&Person> {
    self.persons.find(|p| p.id() == id)
  }

  pub fn animal_by_id(&self, id: Id) -> Option<&Animal> {
    self.animals.find(|a| a.id() == id)
  }

  pub fn feeding_session_by_id(&self, id: Id) -> Option<&FeedingSession> {
    self.feeding_sessions.find(|s| s.id() == id)
  }

  // ── Persons ─────────────────────────────────────────────────────────────

  pub fn has_person(&self, person: &Person) -> bool { self.persons.contains(person) }

  pub fn add_person(&mut self, person: Person) -> Result<()> { self.persons.add(person) }

  /// Replace `target` with `edited`, which must keep the same id and
  /// feeding-session links.
  pub fn set_person(&mut self, target: &Person, edited: Person) -> Result<()> {
    ensure_links_kept(target, &edited)?;
    self.persons.set_one(target, edited)
  }

  /// Remove `person` without touching any session or animal.
  pub fn remove_person(&mut self, person: &Person) -> Result<()> { self.persons.remove(person) }

  // ── Animals ─────────────────────────────────────────────────────────────

  pub fn has_animal(&self, animal: &Animal) -> bool { self.animals.contains(animal) }

  pub fn add_animal(&mut self, animal: Animal) -> Result<()> { self.animals.add(animal) }

  /// Replace `target` with `edited`, which must keep the same id and
  /// feeding-session links.
  pub fn set_animal(&mut self, target: &Animal, edited: Animal) -> Result<()> {
    ensure_links_kept(target, &edited)?;
    self.animals.set_one(target, edited)
  }

  /// Remove `animal` without touching any session or person.
  pub fn remove_animal(&mut self, animal: &Animal) -> Result<()> { self.animals.remove(animal) }

  // ── Feeding sessions ────────────────────────────────────────────────────

  pub fn has_feeding_session(&self, session: &FeedingSession) -> bool {
    self.feeding_sessions.contains(session)
  }

  /// True if a session with this `(animal, person, date_time)` triple exists.
  pub fn has_feeding_session_at(
    &self,
    animal_id: Id,
    person_id: Id,
    date_time: NaiveDateTime,
  ) -> bool {
    self
      .feeding_sessions
      .iter()
      .any(|s| s.is_at(animal_id, person_id, date_time))
  }

  /// Insert `session` into the session collection only.
  ///
  /// Fails if a session with the same id or the same triple exists.
  pub fn add_feeding_session(&mut self, session: FeedingSession) -> Result<()> {
    if self.has_feeding_session_at(session.animal_id(), session.person_id(), session.date_time())
    {
      return Err(Error::DuplicateEntity(EntityKind::FeedingSession));
    }
    self.feeding_sessions.add(session)
  }

  /// Remove `session` from the session collection only; the person and
  /// animal keep their references.
  pub fn remove_feeding_session(&mut self, session: &FeedingSession) -> Result<()> {
    self.feeding_sessions.remove(session)
  }

  /// Remove every session fed to `animal_id`, returning them.
  pub fn remove_feeding_sessions_for_animal(&mut self, animal_id: Id) -> Vec<FeedingSession> {
    self.take_sessions(|s| s.animal_id() == animal_id)
  }

  /// Remove every session run by `person_id`, returning them.
  pub fn remove_feeding_sessions_for_person(&mut self, person_id: Id) -> Vec<FeedingSession> {
    self.take_sessions(|s| s.person_id() == person_id)
  }

  fn take_sessions(&mut self, pred: impl Fn(&FeedingSession) -> bool) -> Vec<FeedingSession> {
    let taken: Vec<_> = self.feeding_sessions.iter().filter(|&s| pred(s)).cloned().collect();
    self.feeding_sessions.remove_where(pred);
    taken
  }

  // ── Composite operations ────────────────────────────────────────────────

  /// Store `session` and record its id on both its person and its animal.
  ///
  /// Both endpoints must already exist. Nothing changes if any check fails.
  pub fn link_feeding_session(&mut self, session: FeedingSession) -> Result<()> {
    let person = self
      .person_by_id(session.person_id())
      .cloned()
      .ok_or(Error::EntityNotFound(EntityKind::Person))?;
    let animal = self
      .animal_by_id(session.animal_id())
      .cloned()
      .ok_or(Error::EntityNotFound(EntityKind::Animal))?;

    let session_id = session.id();
    self.add_feeding_session(session)?;
    self.persons.set_one(&person, person.with_feeding_session(session_id))?;
    self.animals.set_one(&animal, animal.with_feeding_session(session_id))?;
    Ok(())
  }

  /// Remove `session` and strip its id from both its person and its animal.
  pub fn unlink_feeding_session(&mut self, session: &FeedingSession) -> Result<()> {
    self.feeding_sessions.remove(session)?;
    self.unlink_person(session.person_id(), session.id())?;
    self.unlink_animal(session.animal_id(), session.id())?;
    Ok(())
  }

  /// Remove `target` along with every session it took part in, and strip
  /// those sessions from the animals on the other end.
  pub fn delete_person(&mut self, target: &Person) -> Result<()> {
    if !self.persons.iter().any(|p| p == target) {
      return Err(Error::EntityNotFound(EntityKind::Person));
    }

    for &session_id in target.feeding_session_ids() {
      match self.feeding_session_by_id(session_id).map(FeedingSession::animal_id) {
        Some(animal_id) => self.unlink_animal(animal_id, session_id)?,
        None => self.scrub_animals(session_id)?,
      }
    }

    for session in self.remove_feeding_sessions_for_person(target.id()) {
      self.unlink_animal(session.animal_id(), session.id())?;
    }

    self.persons.remove(target)
  }

  /// Remove `target` along with every session it took part in, and strip
  /// those sessions from the persons on the other end.
  pub fn delete_animal(&mut self, target: &Animal) -> Result<()> {
    if !self.animals.iter().any(|a| a == target) {
      return Err(Error::EntityNotFound(EntityKind::Animal));
    }

    for &session_id in target.feeding_session_ids() {
      match self.feeding_session_by_id(session_id).map(FeedingSession::person_id) {
        Some(person_id) => self.unlink_person(person_id, session_id)?,
        None => self.scrub_persons(session_id)?,
      }
    }

    for session in self.remove_feeding_sessions_for_animal(target.id()) {
      self.unlink_person(session.person_id(), session.id())?;
    }

    self.animals.remove(target)
  }

  fn unlink_person(&mut self, person_id: Id, session_id: Id) -> Result<()> {
    let Some(person) = self
      .person_by_id(person_id)
      .filter(|p| p.feeding_session_ids().contains(&session_id))
      .cloned()
    else {
      return Ok(());
    };
    self.persons.set_one(&person, person.without_feeding_session(session_id))
  }

  fn unlink_animal(&mut self, animal_id: Id, session_id: Id) -> Result<()> {
    let Some(animal) = self
      .animal_by_id(animal_id)
      .filter(|a| a.feeding_session_ids().contains(&session_id))
      .cloned()
    else {
      return Ok(());
    };
    self.animals.set_one(&animal, animal.without_feeding_session(session_id))
  }

  // Self-healing passes for a session id whose record is already gone: any
  // holder of the id is found by scanning rather than via the session.

  fn scrub_persons(&mut self, session_id: Id) -> Result<()> {
    let holders: Vec<Id> = self
      .persons
      .iter()
      .filter(|p| p.feeding_session_ids().contains(&session_id))
      .map(Person::id)
      .collect();
    holders
      .into_iter()
      .try_for_each(|id| self.unlink_person(id, session_id))
  }

  fn scrub_animals(&mut self, session_id: Id) -> Result<()> {
    let holders: Vec<Id> = self
      .animals
      .iter()
      .filter(|a| a.feeding_session_ids().contains(&session_id))
      .map(Animal::id)
      .collect();
    holders
      .into_iter()
      .try_for_each(|id| self.unlink_animal(id, session_id))
  }

  // ── Integrity ───────────────────────────────────────────────────────────

  /// Every session id held by a person or animal with no matching session.
  pub fn orphaned_references(&self) -> Vec<OrphanedReference> {
    let persons = self.persons.iter().flat_map(|p| {
      p.feeding_session_ids().iter().map(move |&s| OrphanedReference {
        owner_kind: EntityKind::Person,
        owner:      p.id(),
        session:    s,
      })
    });
    let animals = self.animals.iter().flat_map(|a| {
      a.feeding_session_ids().iter().map(move |&s| OrphanedReference {
        owner_kind: EntityKind::Animal,
        owner:      a.id(),
        session:    s,
      })
    });
    persons
      .chain(animals)
      .filter(|r| self.feeding_session_by_id(r.session).is_none())
      .collect()
  }
}

/// An edit may change any field except the id and the session links.
fn ensure_links_kept<T: Contact>(target: &T, edited: &T) -> Result<()> {
  if edited.id() != target.id() {
    return Err(Error::invalid("id", "an edit must keep the record's id"));
  }
  if edited.feeding_session_ids() != target.feeding_session_ids() {
    return Err(Error::invalid(
      "feeding session ids",
      "an edit must keep the record's feeding sessions",
    ));
  }
  Ok(())
}
