//! In-memory resource service.
//!
//! Holds both collections behind one shared handle and applies the same
//! server-side semantics the remote service does: id assignment on
//! create, patch-only-supplied-fields, 404 on missing records. Useful
//! for controller tests and offline demos.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, instrument};
use uuid::Uuid;

use keeper_core::error::{Error, RemoteError};
use keeper_core::traits::{BanControl, ResourceClient};
use keeper_core::types::RecordId;
use keeper_core::{
    Animal, AnimalFields, AnimalPatch, Person, PersonFields, PersonPatch, Result,
};

/// An in-memory record service.
///
/// Cloning shares the underlying collections, so a clone handed to a
/// controller observes the same data as the original.
#[derive(Debug, Clone, Default)]
pub struct MemoryService {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    people: RwLock<Vec<Person>>,
    animals: RwLock<Vec<Animal>>,
}

fn generate_id() -> RecordId {
    let uuid = Uuid::new_v4().to_string().replace('-', "");
    RecordId::new(uuid).expect("uuid is never empty")
}

fn not_found(id: &RecordId) -> Error {
    Error::Remote(RemoteError::not_found(id))
}

impl MemoryService {
    /// Create an empty service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a person, returning the stored record with its assigned id.
    pub fn seed_person(&self, fields: PersonFields) -> Person {
        let person = Person {
            id: generate_id(),
            name: fields.name,
            gender: fields.gender,
            banned: fields.banned,
        };
        self.inner
            .people
            .write()
            .unwrap()
            .push(person.clone());
        person
    }

    /// Seed an animal, returning the stored record with its assigned id.
    pub fn seed_animal(&self, fields: AnimalFields) -> Animal {
        let animal = Animal {
            id: generate_id(),
            name: fields.name,
            species: fields.species,
            age: fields.age,
        };
        self.inner
            .animals
            .write()
            .unwrap()
            .push(animal.clone());
        animal
    }
}

#[async_trait]
impl ResourceClient<Person> for MemoryService {
    async fn list(&self) -> Result<Vec<Person>> {
        Ok(self.inner.people.read().unwrap().clone())
    }

    #[instrument(skip(self, fields))]
    async fn create(&self, fields: &PersonFields) -> Result<Person> {
        let person = Person {
            id: generate_id(),
            name: fields.name.clone(),
            gender: fields.gender,
            banned: fields.banned,
        };

        self.inner.people.write().unwrap().push(person.clone());
        debug!(id = %person.id, "Created person");

        Ok(person)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &RecordId, patch: &PersonPatch) -> Result<Person> {
        let mut people = self.inner.people.write().unwrap();
        let person = people
            .iter_mut()
            .find(|p| p.id == *id)
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = &patch.name {
            person.name = name.clone();
        }
        if let Some(gender) = patch.gender {
            person.gender = gender;
        }
        if let Some(banned) = patch.banned {
            person.banned = banned;
        }

        debug!(%id, "Patched person");
        Ok(person.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &RecordId) -> Result<()> {
        let mut people = self.inner.people.write().unwrap();
        let before = people.len();
        people.retain(|p| p.id != *id);

        if people.len() == before {
            return Err(not_found(id));
        }

        debug!(%id, "Deleted person");
        Ok(())
    }
}

#[async_trait]
impl BanControl for MemoryService {}

#[async_trait]
impl ResourceClient<Animal> for MemoryService {
    async fn list(&self) -> Result<Vec<Animal>> {
        Ok(self.inner.animals.read().unwrap().clone())
    }

    #[instrument(skip(self, fields))]
    async fn create(&self, fields: &AnimalFields) -> Result<Animal> {
        let animal = Animal {
            id: generate_id(),
            name: fields.name.clone(),
            species: fields.species,
            age: fields.age,
        };

        self.inner.animals.write().unwrap().push(animal.clone());
        debug!(id = %animal.id, "Created animal");

        Ok(animal)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: &RecordId, patch: &AnimalPatch) -> Result<Animal> {
        let mut animals = self.inner.animals.write().unwrap();
        let animal = animals
            .iter_mut()
            .find(|a| a.id == *id)
            .ok_or_else(|| not_found(id))?;

        if let Some(name) = &patch.name {
            animal.name = name.clone();
        }
        if let Some(species) = patch.species {
            animal.species = species;
        }
        if let Some(age) = patch.age {
            animal.age = age;
        }

        debug!(%id, "Patched animal");
        Ok(animal.clone())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &RecordId) -> Result<()> {
        let mut animals = self.inner.animals.write().unwrap();
        let before = animals.len();
        animals.retain(|a| a.id != *id);

        if animals.len() == before {
            return Err(not_found(id));
        }

        debug!(%id, "Deleted animal");
        Ok(())
    }
}
