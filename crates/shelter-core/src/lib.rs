//! Core types for the shelter contact store.
//!
//! Holds persons, animals and the feeding sessions linking them in memory,
//! keeps the references between them consistent, and records undo/redo
//! history. This crate does no I/O; loading and saving live in
//! `shelter-store-json`, command handling in `shelter-cli`.

pub mod address_book;
pub mod animal;
pub mod contact;
pub mod error;
pub mod feeding_session;
pub mod fields;
pub mod id;
pub mod model;
pub mod name;
pub mod person;
pub mod state;
pub mod unique_list;

pub use address_book::{AddressBook, OrphanedReference};
pub use animal::{Animal, AnimalPatch};
pub use contact::{Contact, Predicate};
pub use error::{EntityKind, Error, Result};
pub use feeding_session::FeedingSession;
pub use fields::{Description, Email, Location, Phone, Tag};
pub use id::Id;
pub use model::ModelManager;
pub use name::{AnimalName, Name, PersonName};
pub use person::{Person, PersonPatch};
pub use state::State;
pub use unique_list::{Identity, UniqueList};

#[cfg(test)]
mod tests;
