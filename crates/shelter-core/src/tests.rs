//! Scenario tests for the address book and the model manager.

use chrono::{NaiveDate, NaiveDateTime};

use crate::{
  AddressBook, Animal, AnimalName, Contact, Description, Email, EntityKind, Error,
  FeedingSession, Id, Location, ModelManager, Person, PersonName, PersonPatch, Phone, State,
  Tag, contact,
};

fn person(name: &str) -> Person {
  Person::new(
    PersonName::new(name).unwrap(),
    Phone::new("91234567").unwrap(),
    Email::new("a@example.com").unwrap(),
    [],
  )
}

fn animal(name: &str) -> Animal {
  Animal::new(
    AnimalName::new(name).unwrap(),
    Description::new("Ginger tabby").unwrap(),
    Location::new("Block 12").unwrap(),
    [Tag::new("cat").unwrap()],
  )
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2025, 12, day)
    .unwrap()
    .and_hms_opt(hour, 0, 0)
    .unwrap()
}

/// A model with Max, Bob and one session between them.
fn fed_model() -> (ModelManager, Animal, Person, FeedingSession) {
  let mut m = ModelManager::default();
  let max = animal("Max");
  let bob = person("Bob");
  m.add_animal(max.clone()).unwrap();
  m.add_person(bob.clone()).unwrap();
  let session = FeedingSession::new(max.id(), bob.id(), at(25, 9), "half a can");
  m.add_feeding_session(session.clone()).unwrap();
  (m, max, bob, session)
}

fn assert_no_orphans(book: &AddressBook) {
  assert_eq!(book.orphaned_references(), vec![]);
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[test]
fn duplicate_person_name_is_rejected_case_insensitively() {
  let mut m = ModelManager::default();
  let alice = Person::new(
    PersonName::new("Alice").unwrap(),
    Phone::new("91234567").unwrap(),
    Email::new("a@example.com").unwrap(),
    [],
  );
  m.add_person(alice).unwrap();

  let persons = m.address_book().persons();
  assert_eq!(persons.len(), 1);
  assert_eq!(*persons[0].person_name(), PersonName::new("alice").unwrap());

  let err = m.add_person(person("ALICE")).unwrap_err();
  assert_eq!(err, Error::DuplicateEntity(EntityKind::Person));
  assert_eq!(m.address_book().persons().len(), 1);
}

#[test]
fn renaming_onto_an_existing_name_is_rejected() {
  let mut m = ModelManager::default();
  let alice = person("Alice");
  m.add_person(alice.clone()).unwrap();
  m.add_person(person("Bob")).unwrap();

  let renamed = alice.edited(PersonPatch {
    name: Some(PersonName::new(" bob ").unwrap()),
    ..PersonPatch::default()
  });
  let err = m.set_person(&alice, renamed).unwrap_err();
  assert_eq!(err, Error::DuplicateEntity(EntityKind::Person));
}

#[test]
fn editing_keeps_position_and_links() {
  let (mut m, _, bob, session) = fed_model();
  m.add_person(person("Carol")).unwrap();

  let current = m.person_by_id(bob.id()).unwrap().clone();
  let edited = current.edited(PersonPatch {
    phone: Some(Phone::new("800").unwrap()),
    ..PersonPatch::default()
  });
  m.set_person(&current, edited).unwrap();

  let persons = m.address_book().persons();
  assert_eq!(persons[0].phone().as_str(), "800");
  assert!(persons[0].feeding_session_ids().contains(&session.id()));
}

#[test]
fn edit_that_rewrites_session_links_is_rejected() {
  let (mut m, _, bob, _) = fed_model();
  let current = m.person_by_id(bob.id()).unwrap().clone();
  let relinked = Person::with_id(
    current.id(),
    current.person_name().clone(),
    current.phone().clone(),
    current.email().clone(),
    [],
    [Id::generate()],
  );

  let err = m.set_person(&current, relinked).unwrap_err();
  assert!(matches!(err, Error::InvalidField { field: "feeding session ids", .. }));
  assert_eq!(m.person_by_id(bob.id()), Some(&current));
  assert_no_orphans(m.address_book());
}

#[test]
fn edit_that_swaps_the_id_is_rejected() {
  let (mut m, max, _, session) = fed_model();
  let current = m.animal_by_id(max.id()).unwrap().clone();
  let replacement = Animal::with_id(
    Id::generate(),
    current.animal_name().clone(),
    current.description().clone(),
    current.location().clone(),
    [],
    current.feeding_session_ids().iter().copied(),
  );

  let err = m.set_animal(&current, replacement).unwrap_err();
  assert!(matches!(err, Error::InvalidField { field: "id", .. }));

  m.delete_animal(&current).unwrap();
  assert!(!m.has_feeding_session(&session));
  assert_no_orphans(m.address_book());
}

// ─── Feeding-session links ───────────────────────────────────────────────────

#[test]
fn adding_a_session_links_both_ends() {
  let (m, max, bob, session) = fed_model();

  let max = m.animal_by_id(max.id()).unwrap();
  let bob = m.person_by_id(bob.id()).unwrap();
  assert_eq!(max.feeding_session_ids().iter().collect::<Vec<_>>(), [&session.id()]);
  assert_eq!(bob.feeding_session_ids().iter().collect::<Vec<_>>(), [&session.id()]);
  assert_no_orphans(m.address_book());
}

#[test]
fn session_needs_live_endpoints() {
  let mut m = ModelManager::default();
  let max = animal("Max");
  m.add_animal(max.clone()).unwrap();

  let ghost = person("Ghost");
  let err = m
    .add_feeding_session(FeedingSession::new(max.id(), ghost.id(), at(1, 8), ""))
    .unwrap_err();
  assert_eq!(err, Error::EntityNotFound(EntityKind::Person));
  assert!(m.feeding_sessions().is_empty());
  assert!(m.animal_by_id(max.id()).unwrap().feeding_session_ids().is_empty());
}

#[test]
fn same_triple_twice_is_a_duplicate() {
  let (mut m, max, bob, _) = fed_model();
  let err = m
    .add_feeding_session(FeedingSession::new(max.id(), bob.id(), at(25, 9), "again"))
    .unwrap_err();
  assert_eq!(err, Error::DuplicateEntity(EntityKind::FeedingSession));
  assert!(m.has_feeding_session_at(max.id(), bob.id(), at(25, 9)));

  m.add_feeding_session(FeedingSession::new(max.id(), bob.id(), at(25, 18), ""))
    .unwrap();
  assert_eq!(m.feeding_sessions().len(), 2);
}

#[test]
fn same_session_id_twice_is_a_duplicate() {
  let (mut m, max, bob, session) = fed_model();
  let copy = FeedingSession::with_id(session.id(), max.id(), bob.id(), at(26, 9), "");
  assert!(m.has_feeding_session(&copy));
  let err = m.add_feeding_session(copy).unwrap_err();
  assert_eq!(err, Error::DuplicateEntity(EntityKind::FeedingSession));
}

#[test]
fn bulk_sessions_reject_a_repeated_triple() {
  let (max, bob) = (animal("Max"), person("Bob"));
  let mut book = AddressBook::new();
  let err = book
    .set_feeding_sessions(vec![
      FeedingSession::new(max.id(), bob.id(), at(25, 9), ""),
      FeedingSession::new(max.id(), bob.id(), at(25, 9), "again"),
    ])
    .unwrap_err();
  assert_eq!(err, Error::DuplicateEntity(EntityKind::FeedingSession));
  assert!(book.feeding_sessions().is_empty());
}

#[test]
fn deleting_a_session_unlinks_both_ends() {
  let (mut m, max, bob, session) = fed_model();
  m.delete_feeding_session(&session).unwrap();

  assert!(m.feeding_sessions().is_empty());
  assert!(m.animal_by_id(max.id()).unwrap().feeding_session_ids().is_empty());
  assert!(m.person_by_id(bob.id()).unwrap().feeding_session_ids().is_empty());
}

#[test]
fn bare_session_removal_leaves_links_behind() {
  let (m, _, bob, session) = fed_model();
  let mut book = m.address_book().clone();
  book.remove_feeding_session(&session).unwrap();

  assert!(book.person_by_id(bob.id()).unwrap().feeding_session_ids().contains(&session.id()));
  assert_eq!(book.orphaned_references().len(), 2);
}

// ─── Cascades ────────────────────────────────────────────────────────────────

#[test]
fn deleting_a_person_cascades_to_sessions_and_animals() {
  let (mut m, max, bob, _) = fed_model();
  let bob = m.person_by_id(bob.id()).unwrap().clone();
  m.delete_person(&bob).unwrap();

  assert!(m.feeding_sessions().is_empty());
  assert!(m.animal_by_id(max.id()).unwrap().feeding_session_ids().is_empty());
  assert!(m.person_by_id(bob.id()).is_none());
}

#[test]
fn deleting_an_animal_cascades_to_sessions_and_persons() {
  let (mut m, max, bob, _) = fed_model();
  let milo = animal("Milo");
  m.add_animal(milo.clone()).unwrap();
  let kept = FeedingSession::new(milo.id(), bob.id(), at(27, 7), "");
  m.add_feeding_session(kept.clone()).unwrap();

  let max = m.animal_by_id(max.id()).unwrap().clone();
  m.delete_animal(&max).unwrap();

  assert_eq!(m.feeding_sessions(), &[kept.clone()]);
  let bob = m.person_by_id(bob.id()).unwrap();
  assert_eq!(bob.feeding_session_ids().iter().collect::<Vec<_>>(), [&kept.id()]);
  assert_no_orphans(m.address_book());
}

#[test]
fn cascade_covers_every_session_of_the_person() {
  let mut m = ModelManager::default();
  let bob = person("Bob");
  m.add_person(bob.clone()).unwrap();
  let animals: Vec<_> = ["Max", "Milo", "Luna"].into_iter().map(animal).collect();
  let mut session_ids = Vec::new();
  for (i, a) in animals.iter().enumerate() {
    m.add_animal(a.clone()).unwrap();
    let s = FeedingSession::new(a.id(), bob.id(), at(1, i as u32), "");
    session_ids.push(s.id());
    m.add_feeding_session(s).unwrap();
  }

  let bob = m.person_by_id(bob.id()).unwrap().clone();
  m.delete_person(&bob).unwrap();

  for a in m.address_book().animals() {
    assert!(session_ids.iter().all(|s| !a.feeding_session_ids().contains(s)));
  }
  assert!(m.feeding_sessions().is_empty());
}

#[test]
fn cascade_scrubs_references_whose_session_is_gone() {
  let (m, max, bob, session) = fed_model();
  let mut book = m.address_book().clone();
  book.remove_feeding_session(&session).unwrap();

  let bob = book.person_by_id(bob.id()).unwrap().clone();
  book.delete_person(&bob).unwrap();

  assert!(book.animal_by_id(max.id()).unwrap().feeding_session_ids().is_empty());
  assert_no_orphans(&book);
}

#[test]
fn cascade_catches_sessions_missing_from_the_person() {
  let (m, max, bob, session) = fed_model();
  let mut book = m.address_book().clone();
  let stored = book.person_by_id(bob.id()).unwrap().clone();
  book.set_person(&stored, stored.without_feeding_session(session.id())).unwrap();

  let bob = book.person_by_id(bob.id()).unwrap().clone();
  book.delete_person(&bob).unwrap();

  assert!(book.feeding_sessions().is_empty());
  assert!(book.animal_by_id(max.id()).unwrap().feeding_session_ids().is_empty());
}

#[test]
fn deleting_a_stale_record_fails_without_change() {
  let (mut m, _, bob, _) = fed_model();
  let before = m.address_book().clone();

  // `bob` was captured before the session was linked, so it is stale.
  let err = m.delete_person(&bob).unwrap_err();
  assert_eq!(err, Error::EntityNotFound(EntityKind::Person));
  assert_eq!(*m.address_book(), before);
}

#[test]
fn helper_removals_ignore_the_reference_sets() {
  let (m, max, _, session) = fed_model();
  let mut book = m.address_book().clone();
  let removed = book.remove_feeding_sessions_for_animal(max.id());
  assert_eq!(removed, vec![session]);
  assert!(book.feeding_sessions().is_empty());
  assert!(book.remove_feeding_sessions_for_person(max.id()).is_empty());
}

// ─── Undo / redo ─────────────────────────────────────────────────────────────

#[test]
fn undo_brings_back_a_deleted_person_and_redo_removes_it_again() {
  let mut m = ModelManager::default();
  let carol = person("Carol");
  m.add_person(carol.clone()).unwrap();
  m.delete_person(&carol).unwrap();

  m.undo().unwrap();
  assert_eq!(m.address_book().persons(), &[carol.clone()]);

  m.redo().unwrap();
  assert!(m.address_book().persons().is_empty());
}

#[test]
fn undo_and_redo_round_trip_a_mutation_sequence() {
  let mut m = ModelManager::default();
  let initial = m.address_book().clone();

  let max = animal("Max");
  let bob = person("Bob");
  m.add_animal(max.clone()).unwrap();
  m.add_person(bob.clone()).unwrap();
  m.add_feeding_session(FeedingSession::new(max.id(), bob.id(), at(25, 9), ""))
    .unwrap();
  let bob = m.person_by_id(bob.id()).unwrap().clone();
  m.delete_person(&bob).unwrap();
  let last = m.address_book().clone();

  for _ in 0..4 {
    m.undo().unwrap();
  }
  assert_eq!(*m.address_book(), initial);
  assert!(!m.can_undo());

  for _ in 0..4 {
    m.redo().unwrap();
  }
  assert_eq!(*m.address_book(), last);
  assert!(!m.can_redo());
}

#[test]
fn empty_history_errors() {
  let mut m = ModelManager::default();
  assert_eq!(m.undo().unwrap_err(), Error::NoUndoableState);
  assert_eq!(m.redo().unwrap_err(), Error::NoRedoableState);
}

#[test]
fn new_mutation_clears_redo() {
  let mut m = ModelManager::default();
  m.add_person(person("Alice")).unwrap();
  m.undo().unwrap();
  assert!(m.can_redo());

  m.add_person(person("Bob")).unwrap();
  assert!(!m.can_redo());
}

#[test]
fn failed_mutation_leaves_history_untouched() {
  let mut m = ModelManager::default();
  m.add_person(person("Alice")).unwrap();
  m.undo().unwrap();
  m.redo().unwrap();
  assert!(m.can_undo());
  m.undo().unwrap();
  assert!(m.can_redo());

  let err = m.delete_person(&person("Nobody")).unwrap_err();
  assert_eq!(err, Error::EntityNotFound(EntityKind::Person));
  assert!(m.can_redo());
  assert!(!m.can_undo());
}

#[test]
fn clear_is_undoable() {
  let (mut m, _, _, _) = fed_model();
  let before = m.address_book().clone();
  m.clear().unwrap();
  assert!(m.address_book().is_empty());
  m.undo().unwrap();
  assert_eq!(*m.address_book(), before);
}

#[test]
fn reset_data_discards_history() {
  let (mut m, _, _, _) = fed_model();
  let other = ModelManager::default();
  m.reset_data(other.address_book());
  assert!(m.address_book().is_empty());
  assert!(!m.can_undo());
}

#[test]
fn snapshots_are_isolated_from_the_live_book() {
  let (m, _, _, _) = fed_model();
  let mut book = m.address_book().clone();
  let snapshot = State::capture(&book);

  book.add_person(person("Dora")).unwrap();
  assert_eq!(snapshot.address_book().persons().len(), 1);
  assert_eq!(snapshot.into_address_book(), *m.address_book());
}

// ─── Filtered views ──────────────────────────────────────────────────────────

#[test]
fn accept_all_filter_matches_the_full_view() {
  let mut m = ModelManager::default();
  for name in ["Carol", "Alice", "Bob"] {
    m.add_person(person(name)).unwrap();
  }
  m.update_filtered_person_list(contact::show_all());

  let filtered: Vec<_> = m.filtered_persons().collect();
  let all: Vec<_> = m.address_book().persons().iter().collect();
  assert_eq!(filtered, all);
}

#[test]
fn filters_apply_to_later_additions() {
  let mut m = ModelManager::default();
  m.update_filtered_animal_list(contact::name_contains_keywords(["max"]));
  m.add_animal(animal("Luna")).unwrap();
  m.add_animal(animal("Max")).unwrap();

  let names: Vec<_> = m.filtered_animals().map(|a| a.name().to_string()).collect();
  assert_eq!(names, ["Max"]);
  assert_eq!(m.address_book().animals().len(), 2);
}

#[test]
fn filtering_does_not_touch_history() {
  let mut m = ModelManager::default();
  m.update_filtered_person_list(contact::has_tag("lead"));
  assert!(!m.can_undo());
}

// ─── Serialisation shape ─────────────────────────────────────────────────────

#[test]
fn records_serialise_with_camel_case_fields() {
  let (m, _, bob, session) = fed_model();
  let bob = m.person_by_id(bob.id()).unwrap();
  let json = serde_json::to_value(bob).unwrap();

  assert_eq!(json["name"], "Bob");
  assert_eq!(json["feedingSessionIds"][0], session.id().to_string());
}
