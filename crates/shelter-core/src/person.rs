//! Person records.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::{
  contact::Contact,
  error::EntityKind,
  fields::{Email, Phone, Tag},
  id::Id,
  name::{Name, PersonName},
  unique_list::Identity,
};

/// A volunteer or caretaker who runs feeding sessions.
///
/// Records are immutable. Editing a person, or linking and unlinking feeding
/// sessions, produces a new record with the same [`Id`] that replaces the
/// old one in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  id:                  Id,
  name:                PersonName,
  phone:               Phone,
  email:               Email,
  tags:                BTreeSet<Tag>,
  feeding_session_ids: BTreeSet<Id>,
}

impl Person {
  /// A brand-new person with a freshly generated id and no sessions.
  pub fn new(
    name: PersonName,
    phone: Phone,
    email: Email,
    tags: impl IntoIterator<Item = Tag>,
  ) -> Self {
    Self::with_id(Id::generate(), name, phone, email, tags, [])
  }

  /// Rebuild a person whose id and session links are already known, e.g.
  /// when reading from storage.
  pub fn with_id(
    id: Id,
    name: PersonName,
    phone: Phone,
    email: Email,
    tags: impl IntoIterator<Item = Tag>,
    feeding_session_ids: impl IntoIterator<Item = Id>,
  ) -> Self {
    Self {
      id,
      name,
      phone,
      email,
      tags: tags.into_iter().collect(),
      feeding_session_ids: feeding_session_ids.into_iter().collect(),
    }
  }

  pub fn id(&self) -> Id { self.id }

  pub fn person_name(&self) -> &PersonName { &self.name }

  pub fn phone(&self) -> &Phone { &self.phone }

  pub fn email(&self) -> &Email { &self.email }

  /// A copy of this person that also references `session_id`.
  pub fn with_feeding_session(&self, session_id: Id) -> Self {
    let mut next = self.clone();
    next.feeding_session_ids.insert(session_id);
    next
  }

  /// A copy of this person that no longer references `session_id`.
  pub fn without_feeding_session(&self, session_id: Id) -> Self {
    let mut next = self.clone();
    next.feeding_session_ids.remove(&session_id);
    next
  }

  /// Apply `patch`, keeping the id and session links.
  pub fn edited(&self, patch: PersonPatch) -> Self {
    Self {
      id:                  self.id,
      name:                patch.name.unwrap_or_else(|| self.name.clone()),
      phone:               patch.phone.unwrap_or_else(|| self.phone.clone()),
      email:               patch.email.unwrap_or_else(|| self.email.clone()),
      tags:                patch.tags.unwrap_or_else(|| self.tags.clone()),
      feeding_session_ids: self.feeding_session_ids.clone(),
    }
  }
}

impl Contact for Person {
  fn id(&self) -> Id { self.id }

  fn name(&self) -> &Name { &self.name }

  fn tags(&self) -> &BTreeSet<Tag> { &self.tags }

  fn feeding_session_ids(&self) -> &BTreeSet<Id> { &self.feeding_session_ids }
}

impl Identity for Person {
  const KIND: EntityKind = EntityKind::Person;

  fn is_same(&self, other: &Self) -> bool { self.name == other.name }
}

/// Field replacements for [`Person::edited`]; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct PersonPatch {
  pub name:  Option<PersonName>,
  pub phone: Option<Phone>,
  pub email: Option<Email>,
  pub tags:  Option<BTreeSet<Tag>>,
}

impl PersonPatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none() && self.phone.is_none() && self.email.is_none() && self.tags.is_none()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn alice() -> Person {
    Person::new(
      PersonName::new("Alice").unwrap(),
      Phone::new("91234567").unwrap(),
      Email::new("a@example.com").unwrap(),
      [Tag::new("volunteer").unwrap()],
    )
  }

  #[test]
  fn identity_is_the_name_only() {
    let a = alice();
    let b = Person::new(
      PersonName::new("ALICE").unwrap(),
      Phone::new("999").unwrap(),
      Email::new("other@example.com").unwrap(),
      [],
    );
    assert!(a.is_same(&b));
    assert_ne!(a, b);
  }

  #[test]
  fn linking_keeps_identity() {
    let a = alice();
    let session = Id::generate();
    let linked = a.with_feeding_session(session);

    assert_eq!(linked.id(), a.id());
    assert!(linked.is_same(&a));
    assert!(linked.feeding_session_ids().contains(&session));
    assert!(a.feeding_session_ids().is_empty());

    let unlinked = linked.without_feeding_session(session);
    assert_eq!(unlinked, a);
  }

  #[test]
  fn edit_preserves_id_and_links() {
    let session = Id::generate();
    let a = alice().with_feeding_session(session);
    let edited = a.edited(PersonPatch {
      phone: Some(Phone::new("6000").unwrap()),
      ..PersonPatch::default()
    });

    assert_eq!(edited.id(), a.id());
    assert_eq!(edited.phone().as_str(), "6000");
    assert_eq!(edited.email(), a.email());
    assert!(edited.feeding_session_ids().contains(&session));
  }
}
