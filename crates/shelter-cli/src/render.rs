//! Plain-text rendering of records for the shell.

use std::fmt::Write as _;

use shelter_core::{Animal, Contact, FeedingSession, ModelManager, Person};

fn tag_suffix(c: &impl Contact) -> String {
  if c.tags().is_empty() {
    return String::new();
  }
  let tags: Vec<_> = c.tags().iter().map(|t| t.as_str()).collect();
  format!(" [{}]", tags.join(", "))
}

pub fn person(p: &Person) -> String {
  format!(
    "{}  phone {}  email {}{}  ({} feeding sessions)",
    p.name(),
    p.phone(),
    p.email(),
    tag_suffix(p),
    p.feeding_session_ids().len(),
  )
}

pub fn animal(a: &Animal) -> String {
  format!(
    "{}  {}  at {}{}  ({} feeding sessions)",
    a.name(),
    a.description(),
    a.location(),
    tag_suffix(a),
    a.feeding_session_ids().len(),
  )
}

/// One line per session, naming both ends where they still exist.
pub fn feeding_session(s: &FeedingSession, model: &ModelManager) -> String {
  let animal = model
    .animal_by_id(s.animal_id())
    .map_or_else(|| "(removed animal)".to_owned(), |a| a.name().to_string());
  let person = model
    .person_by_id(s.person_id())
    .map_or_else(|| "(removed person)".to_owned(), |p| p.name().to_string());

  let mut line = format!("{} fed {} on {}", person, animal, s.date_time().format("%Y-%m-%d %H:%M"));
  if !s.notes().is_empty() {
    let _ = write!(line, ": {}", s.notes());
  }
  line
}

/// A numbered block under `heading`, or a note that it is empty.
pub fn numbered<I>(heading: &str, lines: I) -> String
where
  I: IntoIterator<Item = String>,
{
  let mut out = format!("{heading}:");
  let mut any = false;
  for (i, line) in lines.into_iter().enumerate() {
    any = true;
    let _ = write!(out, "\n  {}. {line}", i + 1);
  }
  if !any {
    out.push_str(" none");
  }
  out
}
