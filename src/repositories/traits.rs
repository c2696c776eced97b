//! Common repository traits
//!
//! This module defines generic interfaces for database operations.
//! [`Repository`](super::Repository) implements all of them for every entity;
//! callers that only need part of the surface depend on the trait instead.

use crate::core::DalError;
use crate::dtos::PageQuery;
use uuid::Uuid;

/// Keys and uuid generated by an insert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted<Id> {
    pub key: Id,
    pub uuid: Uuid,
}

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the entity to insert (generated key fields are ignored)
/// * `Id` - Type of the primary key (e.g. `i32`, `(i32, i32)`)
pub trait Create<Entity, Id> {
    /// Inserts one entity inside its own transaction
    ///
    /// # Returns
    /// * `Ok(Inserted)` - Key(s) and uuid assigned by the database
    /// * `Err(DalError)` - Error during insertion, transaction rolled back
    async fn create(&self, data: &Entity) -> Result<Inserted<Id>, DalError>;
}

/// Trait for loading many entities with a single COPY
pub trait BulkCreate<Entity> {
    /// Copies every entity in one round trip
    ///
    /// # Returns
    /// * `Ok(u64)` - Number of rows the server reports as copied
    /// * `Err(DalError)` - Error raised by the copy, unchanged
    async fn create_many(&self, data: &[Entity]) -> Result<u64, DalError>;
}

/// Trait for reading a single entity by primary key
///
/// # Type Parameters
/// * `Entity` - Type of the entity to read
/// * `Id` - Type of the primary key (e.g. `i32`, `(i32, i32)`)
pub trait Read<Entity, Id> {
    /// Reads an entity from the database by its primary key
    ///
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(DalError)` - Error during reading
    async fn read(&self, id: &Id) -> Result<Option<Entity>, DalError>;
}

/// Trait for reading multiple entities by list of primary keys
pub trait ReadMany<Entity, Id> {
    /// Reads multiple entities from the database by their primary keys
    ///
    /// # Returns
    /// * `Ok(Vec<Entity>)` - Vec containing all found entities (can be empty)
    /// * `Err(DalError)` - Error during reading
    ///
    /// # Note
    /// Entities are returned in the order they are found in the database,
    /// which may not match the order of the provided IDs.
    async fn read_many(&self, ids: &[Id]) -> Result<Vec<Entity>, DalError>;
}

/// Trait for reading entities by their externally stable uuid
pub trait ReadByUuid<Entity> {
    async fn read_by_uuid(&self, uuid: &Uuid) -> Result<Option<Entity>, DalError>;

    /// Binds the whole slice as one array parameter
    async fn read_many_by_uuid(&self, uuids: &[Uuid]) -> Result<Vec<Entity>, DalError>;
}

/// Trait for reading a whole table
pub trait ReadAll<Entity> {
    async fn read_all(&self) -> Result<Vec<Entity>, DalError>;
}

/// Trait for filtered, sorted and windowed reads
pub trait Paginate<Entity> {
    async fn paginate(&self, page: &PageQuery) -> Result<Vec<Entity>, DalError>;
}

/// Trait for updating existing entities
pub trait Update<Entity> {
    /// Overwrites every mutable column of the row identified by the entity's key
    ///
    /// # Returns
    /// * `Ok(())` - Statement committed
    /// * `Err(DalError::MissingKey)` - Key unset or zero, nothing was sent
    /// * `Err(DalError)` - Error during update, transaction rolled back
    async fn update(&self, data: &Entity) -> Result<(), DalError>;
}

/// Trait for deleting entities
///
/// # Type Parameters
/// * `Id` - Type of the primary key
pub trait Delete<Id> {
    /// Deletes an entity from the database
    ///
    /// # Returns
    /// * `Ok(())` - Deletion successful, including when no row matched
    /// * `Err(DalError)` - Error during deletion
    async fn delete(&self, id: &Id) -> Result<(), DalError>;
}

/// Trait for counting rows
pub trait Count {
    async fn count(&self) -> Result<i64, DalError>;
}
