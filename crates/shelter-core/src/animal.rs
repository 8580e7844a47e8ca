//! Animal records.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
  contact::Contact,
  error::EntityKind,
  fields::{Description, Location, Tag},
  id::Id,
  name::{AnimalName, Name},
  unique_list::Identity,
};

/// An animal in the shelter's care.
///
/// Like [`Person`](crate::Person), an animal is immutable and is replaced
/// wholesale whenever its fields or its session links change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
  id:                  Id,
  name:                AnimalName,
  description:         Description,
  location:            Location,
  tags:                BTreeSet<Tag>,
  feeding_session_ids: BTreeSet<Id>,
}

impl Animal {
  /// A brand-new animal with a freshly generated id and no sessions.
  pub fn new(
    name: AnimalName,
    description: Description,
    location: Location,
    tags: impl IntoIterator<Item = Tag>,
  ) -> Self {
    Self::with_id(Id::generate(), name, description, location, tags, [])
  }

  pub fn with_id(
    id: Id,
    name: AnimalName,
    description: Description,
    location: Location,
    tags: impl IntoIterator<Item = Tag>,
    feeding_session_ids: impl IntoIterator<Item = Id>,
  ) -> Self {
    Self {
      id,
      name,
      description,
      location,
      tags: tags.into_iter().collect(),
      feeding_session_ids: feeding_session_ids.into_iter().collect(),
    }
  }

  pub fn id(&self) -> Id { self.id }

  pub fn animal_name(&self) -> &AnimalName { &self.name }

  pub fn description(&self) -> &Description { &self.description }

  pub fn location(&self) -> &Location { &self.location }

  pub fn with_feeding_session(&self, session_id: Id) -> Self {
    let mut next = self.clone();
    next.feeding_session_ids.insert(session_id);
    next
  }

  pub fn without_feeding_session(&self, session_id: Id) -> Self {
    let mut next = self.clone();
    next.feeding_session_ids.remove(&session_id);
    next
  }

  pub fn edited(&self, patch: AnimalPatch) -> Self {
    Self {
      id:                  self.id,
      name:                patch.name.unwrap_or_else(|| self.name.clone()),
      description:         patch.description.unwrap_or_else(|| self.description.clone()),
      location:            patch.location.unwrap_or_else(|| self.location.clone()),
      tags:                patch.tags.unwrap_or_else(|| self.tags.clone()),
      feeding_session_ids: self.feeding_session_ids.clone(),
    }
  }
}

impl Contact for Animal {
  fn id(&self) -> Id { self.id }

  fn name(&self) -> &Name { &self.name }

  fn tags(&self) -> &BTreeSet<Tag> { &self.tags }

  fn feeding_session_ids(&self) -> &BTreeSet<Id> { &self.feeding_session_ids }
}

impl Identity for Animal {
  const KIND: EntityKind = EntityKind::Animal;

  fn is_same(&self, other: &Self) -> bool { self.name == other.name }
}

/// Field replacements for [`Animal::edited`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct AnimalPatch {
  pub name:        Option<AnimalName>,
  pub description: Option<Description>,
  pub location:    Option<Location>,
  pub tags:        Option<BTreeSet<Tag>>,
}

impl AnimalPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.description.is_none()
      && self.location.is_none()
      && self.tags.is_none()
  }
}
