//! Shell state and command dispatch.

use std::{collections::BTreeSet, num::NonZeroUsize};

use anyhow::{Context as _, anyhow};
use shelter_core::{
  AddressBook, Animal, AnimalPatch, Contact, FeedingSession, ModelManager, Person,
  PersonPatch, Tag, contact,
};
use shelter_store_json::JsonStore;
use tracing::{debug, warn};

use crate::{
  command::{self, Command, ParseFailure, Section},
  render,
};

// ─── Outcome ──────────────────────────────────────────────────────────────────

/// What the shell should do after a line has been handled.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
  /// Print the text (if any) and read the next line.
  Reply(String),
  Exit,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level shell state: the model and where it is persisted.
pub struct App {
  model: ModelManager,
  store: JsonStore,
}

impl App {
  pub fn new(store: JsonStore, initial: &AddressBook) -> Self {
    let mut model = ModelManager::default();
    model.reset_data(initial);
    Self { model, store }
  }

  #[cfg(test)]
  pub fn model(&self) -> &ModelManager { &self.model }

  /// Parse and run one input line.
  pub fn execute(&mut self, line: &str) -> Outcome {
    let command = match command::parse(line) {
      Ok(command) => command,
      Err(ParseFailure::Empty) => return Outcome::Reply(String::new()),
      Err(ParseFailure::Quoting(e)) => return Outcome::Reply(format!("Error: {e}")),
      Err(ParseFailure::Clap(e)) => {
        return Outcome::Reply(e.render().to_string().trim_end().to_owned());
      }
    };
    debug!(?command, "dispatching");

    if matches!(command, Command::Exit) {
      return Outcome::Exit;
    }

    match self.dispatch(command) {
      Ok(Reply { text, changed }) => {
        if changed && let Err(e) = self.store.save(self.model.address_book()) {
          warn!(error = %e, "save failed");
          return Outcome::Reply(format!("{text}\nWarning: could not save data: {e}"));
        }
        Outcome::Reply(text)
      }
      Err(e) => Outcome::Reply(format!("Error: {e}")),
    }
  }

  fn dispatch(&mut self, command: Command) -> anyhow::Result<Reply> {
    match command {
      Command::AddPerson { name, phone, email, tags } => {
        let person = Person::new(name, phone, email, tags);
        let text = format!("Added person: {}", render::person(&person));
        self.model.add_person(person)?;
        self.model.update_filtered_person_list(contact::show_all());
        Ok(Reply::changed(text))
      }

      Command::AddAnimal { name, description, location, tags } => {
        let animal = Animal::new(name, description, location, tags);
        let text = format!("Added animal: {}", render::animal(&animal));
        self.model.add_animal(animal)?;
        self.model.update_filtered_animal_list(contact::show_all());
        Ok(Reply::changed(text))
      }

      Command::EditPerson { index, name, phone, email, tags, clear_tags } => {
        let patch = PersonPatch { name, phone, email, tags: tag_set(tags, clear_tags) };
        if patch.is_empty() {
          return Err(anyhow!("nothing to change"));
        }
        let target = self.person_at(index)?;
        let edited = target.edited(patch);
        let text = format!("Edited person: {}", render::person(&edited));
        self.model.set_person(&target, edited)?;
        Ok(Reply::changed(text))
      }

      Command::EditAnimal { index, name, description, location, tags, clear_tags } => {
        let patch =
          AnimalPatch { name, description, location, tags: tag_set(tags, clear_tags) };
        if patch.is_empty() {
          return Err(anyhow!("nothing to change"));
        }
        let target = self.animal_at(index)?;
        let edited = target.edited(patch);
        let text = format!("Edited animal: {}", render::animal(&edited));
        self.model.set_animal(&target, edited)?;
        Ok(Reply::changed(text))
      }

      Command::DeletePerson { index } => {
        let target = self.person_at(index)?;
        self.model.delete_person(&target)?;
        Ok(Reply::changed(format!("Deleted person: {}", target.name())))
      }

      Command::DeleteAnimal { index } => {
        let target = self.animal_at(index)?;
        self.model.delete_animal(&target)?;
        Ok(Reply::changed(format!("Deleted animal: {}", target.name())))
      }

      Command::Feed { animal, person, at, notes } => {
        let animal = self.animal_at(animal)?;
        let person = self.person_at(person)?;
        let session = FeedingSession::new(animal.id(), person.id(), at, notes);
        self.model.add_feeding_session(session.clone())?;
        Ok(Reply::changed(format!(
          "Recorded: {}",
          render::feeding_session(&session, &self.model)
        )))
      }

      Command::DeleteFeeding { index } => {
        let session = self
          .model
          .feeding_sessions()
          .get(index.get() - 1)
          .cloned()
          .with_context(|| format!("no feeding session at index {index}"))?;
        let text = format!("Deleted: {}", render::feeding_session(&session, &self.model));
        self.model.delete_feeding_session(&session)?;
        Ok(Reply::changed(text))
      }

      Command::List { section } => {
        self.model.update_filtered_person_list(contact::show_all());
        self.model.update_filtered_animal_list(contact::show_all());
        Ok(Reply::unchanged(self.listing(section)))
      }

      Command::FindPerson { keywords, tag } => {
        let predicate = match tag {
          Some(tag) => contact::has_tag(tag),
          None => contact::name_contains_keywords(keywords),
        };
        self.model.update_filtered_person_list(predicate);
        Ok(Reply::unchanged(self.listing(Section::Persons)))
      }

      Command::FindAnimal { keywords, tag } => {
        let predicate = match tag {
          Some(tag) => contact::has_tag(tag),
          None => contact::name_contains_keywords(keywords),
        };
        self.model.update_filtered_animal_list(predicate);
        Ok(Reply::unchanged(self.listing(Section::Animals)))
      }

      Command::Undo => {
        self.model.undo()?;
        Ok(Reply::changed("Undone.".to_owned()))
      }

      Command::Redo => {
        self.model.redo()?;
        Ok(Reply::changed("Redone.".to_owned()))
      }

      Command::Clear => {
        self.model.clear()?;
        Ok(Reply::changed("Cleared all records.".to_owned()))
      }

      Command::Exit => Ok(Reply::unchanged(String::new())),
    }
  }

  // ── Index resolution ──────────────────────────────────────────────────────

  fn person_at(&self, index: NonZeroUsize) -> anyhow::Result<Person> {
    self
      .model
      .filtered_persons()
      .nth(index.get() - 1)
      .cloned()
      .with_context(|| format!("no person at index {index}"))
  }

  fn animal_at(&self, index: NonZeroUsize) -> anyhow::Result<Animal> {
    self
      .model
      .filtered_animals()
      .nth(index.get() - 1)
      .cloned()
      .with_context(|| format!("no animal at index {index}"))
  }

  // ── Rendering ─────────────────────────────────────────────────────────────

  fn listing(&self, section: Section) -> String {
    let persons = || render::numbered("Persons", self.model.filtered_persons().map(render::person));
    let animals = || render::numbered("Animals", self.model.filtered_animals().map(render::animal));
    let sessions = || {
      render::numbered(
        "Feeding sessions",
        self
          .model
          .feeding_sessions()
          .iter()
          .map(|s| render::feeding_session(s, &self.model)),
      )
    };

    match section {
      Section::Persons => persons(),
      Section::Animals => animals(),
      Section::Sessions => sessions(),
      Section::All => [persons(), animals(), sessions()].join("\n"),
    }
  }
}

/// A successful command's output, and whether the data changed.
struct Reply {
  text:    String,
  changed: bool,
}

impl Reply {
  fn changed(text: String) -> Self { Self { text, changed: true } }

  fn unchanged(text: String) -> Self { Self { text, changed: false } }
}

/// `None` leaves tags untouched; `clear` replaces them with nothing.
fn tag_set(tags: Vec<Tag>, clear: bool) -> Option<BTreeSet<Tag>> {
  (clear || !tags.is_empty()).then(|| tags.into_iter().collect())
}
