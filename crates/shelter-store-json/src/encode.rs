//! Encoding and decoding between domain records and their stored JSON
//! shape.
//!
//! Raw records hold plain strings with every required field optional, so a
//! missing field surfaces as [`Error::MissingField`] rather than a serde
//! message. Ids are hyphenated lowercase UUIDs; date-times are
//! `YYYY-MM-DDTHH:MM:SS` with the seconds optional on input.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use shelter_core::{
  Animal, AnimalName, Contact, Description, Email, EntityKind, FeedingSession, Id,
  Location, Person, PersonName, Phone, Tag,
};

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_TIME_FORMAT_SHORT: &str = "%Y-%m-%dT%H:%M";

pub fn encode_id(id: Id) -> String { id.to_string() }

pub fn decode_id(s: &str) -> Result<Id> { Ok(s.parse()?) }

pub fn encode_dt(dt: NaiveDateTime) -> String { dt.format(DATE_TIME_FORMAT).to_string() }

pub fn decode_dt(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
    .or_else(|_| NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT_SHORT))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

fn encode_tags(tags: &BTreeSet<Tag>) -> Vec<String> {
  tags.iter().map(ToString::to_string).collect()
}

fn decode_tags(raw: &[String]) -> Result<Vec<Tag>> {
  raw.iter().map(|t| Tag::new(t).map_err(Error::from)).collect()
}

fn decode_ids(raw: &[String]) -> Result<Vec<Id>> {
  raw.iter().map(|s| decode_id(s)).collect()
}

fn required<'a>(
  kind: EntityKind,
  field: &'static str,
  value: &'a Option<String>,
) -> Result<&'a str> {
  value.as_deref().ok_or(Error::MissingField { kind, field })
}

// ─── Document ────────────────────────────────────────────────────────────────

/// The whole stored document.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddressBook {
  #[serde(default)]
  pub persons:          Vec<RawPerson>,
  #[serde(default)]
  pub animals:          Vec<RawAnimal>,
  #[serde(default)]
  pub feeding_sessions: Vec<RawFeedingSession>,
}

// ─── Person ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPerson {
  pub id:                  Option<String>,
  pub name:                Option<String>,
  pub phone:               Option<String>,
  pub email:               Option<String>,
  #[serde(default)]
  pub tags:                Vec<String>,
  #[serde(default)]
  pub feeding_session_ids: Vec<String>,
}

impl From<&Person> for RawPerson {
  fn from(p: &Person) -> Self {
    Self {
      id:                  Some(encode_id(p.id())),
      name:                Some(p.name().to_string()),
      phone:               Some(p.phone().to_string()),
      email:               Some(p.email().to_string()),
      tags:                encode_tags(p.tags()),
      feeding_session_ids: p.feeding_session_ids().iter().copied().map(encode_id).collect(),
    }
  }
}

impl RawPerson {
  /// Validate every field. Session ids are kept only if `keep_sessions`.
  pub fn into_person(self, keep_sessions: bool) -> Result<Person> {
    const KIND: EntityKind = EntityKind::Person;
    let id = decode_id(required(KIND, "id", &self.id)?)?;
    let name = PersonName::new(required(KIND, "name", &self.name)?)?;
    let phone = Phone::new(required(KIND, "phone", &self.phone)?)?;
    let email = Email::new(required(KIND, "email", &self.email)?)?;
    let tags = decode_tags(&self.tags)?;
    let sessions = if keep_sessions { decode_ids(&self.feeding_session_ids)? } else { Vec::new() };
    Ok(Person::with_id(id, name, phone, email, tags, sessions))
  }
}

// ─── Animal ──────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAnimal {
  pub id:                  Option<String>,
  pub name:                Option<String>,
  pub description:         Option<String>,
  pub location:            Option<String>,
  #[serde(default)]
  pub tags:                Vec<String>,
  #[serde(default)]
  pub feeding_session_ids: Vec<String>,
}

impl From<&Animal> for RawAnimal {
  fn from(a: &Animal) -> Self {
    Self {
      id:                  Some(encode_id(a.id())),
      name:                Some(a.name().to_string()),
      description:         Some(a.description().to_string()),
      location:            Some(a.location().to_string()),
      tags:                encode_tags(a.tags()),
      feeding_session_ids: a.feeding_session_ids().iter().copied().map(encode_id).collect(),
    }
  }
}

impl RawAnimal {
  pub fn into_animal(self, keep_sessions: bool) -> Result<Animal> {
    const KIND: EntityKind = EntityKind::Animal;
    let id = decode_id(required(KIND, "id", &self.id)?)?;
    let name = AnimalName::new(required(KIND, "name", &self.name)?)?;
    let description = Description::new(required(KIND, "description", &self.description)?)?;
    let location = Location::new(required(KIND, "location", &self.location)?)?;
    let tags = decode_tags(&self.tags)?;
    let sessions = if keep_sessions { decode_ids(&self.feeding_session_ids)? } else { Vec::new() };
    Ok(Animal::with_id(id, name, description, location, tags, sessions))
  }
}

// ─── FeedingSession ──────────────────────────────────────────────────────────

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFeedingSession {
  pub id:        Option<String>,
  pub animal_id: Option<String>,
  pub person_id: Option<String>,
  pub date_time: Option<String>,
  #[serde(default)]
  pub notes:     String,
}

impl From<&FeedingSession> for RawFeedingSession {
  fn from(s: &FeedingSession) -> Self {
    Self {
      id:        Some(encode_id(s.id())),
      animal_id: Some(encode_id(s.animal_id())),
      person_id: Some(encode_id(s.person_id())),
      date_time: Some(encode_dt(s.date_time())),
      notes:     s.notes().to_owned(),
    }
  }
}

impl RawFeedingSession {
  pub fn into_feeding_session(self) -> Result<FeedingSession> {
    const KIND: EntityKind = EntityKind::FeedingSession;
    let id = decode_id(required(KIND, "id", &self.id)?)?;
    let animal_id = decode_id(required(KIND, "animalId", &self.animal_id)?)?;
    let person_id = decode_id(required(KIND, "personId", &self.person_id)?)?;
    let date_time = decode_dt(required(KIND, "dateTime", &self.date_time)?)?;
    Ok(FeedingSession::with_id(id, animal_id, person_id, date_time, self.notes))
  }
}
