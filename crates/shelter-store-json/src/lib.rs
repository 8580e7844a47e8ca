//! JSON file backend for the shelter contact store.
//!
//! Reads and writes a whole [`shelter_core::AddressBook`] as one JSON
//! document. All field-level validation of stored records happens here; a
//! load either yields a complete, consistent book or an error.

mod encode;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{JsonStore, ReferenceMode, decode, encode};
