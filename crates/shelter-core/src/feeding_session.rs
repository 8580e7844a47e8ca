//! Feeding sessions: the link records between a person and an animal.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{error::EntityKind, id::Id, unique_list::Identity};

/// One occasion on which a person fed an animal.
///
/// Two sessions are the same entity iff their ids match. The
/// `(animal, person, date_time)` triple is additionally kept unique by
/// [`AddressBook::add_feeding_session`](crate::AddressBook::add_feeding_session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingSession {
  id:        Id,
  animal_id: Id,
  person_id: Id,
  date_time: NaiveDateTime,
  notes:     String,
}

impl FeedingSession {
  pub fn new(
    animal_id: Id,
    person_id: Id,
    date_time: NaiveDateTime,
    notes: impl Into<String>,
  ) -> Self {
    Self::with_id(Id::generate(), animal_id, person_id, date_time, notes)
  }

  pub fn with_id(
    id: Id,
    animal_id: Id,
    person_id: Id,
    date_time: NaiveDateTime,
    notes: impl Into<String>,
  ) -> Self {
    Self { id, animal_id, person_id, date_time, notes: notes.into() }
  }

  pub fn id(&self) -> Id { self.id }

  pub fn animal_id(&self) -> Id { self.animal_id }

  pub fn person_id(&self) -> Id { self.person_id }

  pub fn date_time(&self) -> NaiveDateTime { self.date_time }

  pub fn notes(&self) -> &str { &self.notes }

  /// True if this session records the same feeding as the given triple.
  pub fn is_at(&self, animal_id: Id, person_id: Id, date_time: NaiveDateTime) -> bool {
    self.animal_id == animal_id && self.person_id == person_id && self.date_time == date_time
  }
}

impl Identity for FeedingSession {
  const KIND: EntityKind = EntityKind::FeedingSession;

  fn is_same(&self, other: &Self) -> bool { self.id == other.id }
}
