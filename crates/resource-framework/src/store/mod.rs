//! # Record Store
//!
//! Persistence behind the resource services. [`Repository`] is the seam the services are
//! written against; [`StoreActor`] is the in-memory implementation, a single Tokio task
//! that owns every record of one entity type and answers [`StoreRequest`] messages sent
//! by the cloneable [`StoreClient`].
//!
//! The store enforces two constraints on every save, whatever the caller checked before:
//! references are unique per entity type, and [`ResourceEntity::violations`] must be empty.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;

pub use actor::StoreActor;
pub use client::StoreClient;
pub use error::StoreError;
pub use message::{Response, StoreRequest};

use async_trait::async_trait;

use crate::entity::{EntityId, ResourceEntity};
use crate::reference::Reference;

/// Storage operations needed by [`crate::ResourceService`].
#[async_trait]
pub trait Repository<T: ResourceEntity>: Send + Sync {
    async fn find_by_reference(&self, reference: &Reference) -> Result<Option<T>, StoreError>;

    /// Every stored record, in insertion order.
    async fn find_all(&self) -> Result<Vec<T>, StoreError>;

    async fn find_where(&self, filter: T::Filter) -> Result<Vec<T>, StoreError>;

    /// Inserts a record without id, or replaces the record with the same id.
    async fn save(&self, record: T) -> Result<T, StoreError>;

    async fn delete(&self, id: EntityId) -> Result<(), StoreError>;
}
