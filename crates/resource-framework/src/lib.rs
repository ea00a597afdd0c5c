//! # Resource Framework
//!
//! This crate provides the building blocks for exposing stored business resources
//! (products, orders, payments, …) through one uniform lifecycle. Every resource is
//! addressed by a normalized business reference, every mutation goes through the same
//! pre-flight checks, and every outcome comes back in the same [`ResponseEnvelope`].
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into four layers:
//!
//! 1. **Entity Layer** ([`ResourceEntity`]) - Your domain model: how a body becomes a
//!    record, how a partial body merges, which constraints hold.
//! 2. **Lifecycle Layer** ([`ResourceService`], [`LifecycleValidator`]) - Reference
//!    normalization, existence rules, normalization before save.
//! 3. **Outcome Layer** ([`ResponseEnvelope`], [`ErrorDecoder`]) - Success envelopes and
//!    the single failure boundary that folds a cause chain into one error envelope.
//! 4. **Storage Layer** ([`Repository`], [`StoreActor`], [`StoreClient`]) - An actor per
//!    entity type owning its records, reached through a cloneable client.
//!
//! You write the entity **once**; the framework handles references, envelopes, error
//! decoding and storage concurrency.
//!
//! ## Operation Kinds
//!
//! | Kind | Existence rule | Success status | Message |
//! |------|----------------|----------------|---------|
//! | `Create` | must be absent | 201 | `Creation successful` |
//! | `FullUpdate` | must exist | 200 | `Update successful` |
//! | `PartialUpdate` | must exist | 200 | `Partial update successful` |
//! | `Delete` | must exist | 200 | `Deletion successful` |
//! | `Other` | must exist | 200 | `Operation successful` |
//!
//! A blank reference is rejected with `MandatoryReference` for every kind, before any
//! storage access.
//!
//! ## Wiring
//!
//! ```rust,ignore
//! let (actor, client) = StoreActor::<Product>::new(32);
//! let handle = tokio::spawn(actor.run());
//!
//! let products = ResourceService::with_settings(client, ServiceSettings::default());
//! let envelope = products.create(body).await;
//! assert_eq!(envelope.status, 201);
//!
//! drop(products);
//! handle.await?;
//! ```
//!
//! ## Concurrency Model
//!
//! - Each store actor runs in its own Tokio task and handles requests one at a time
//! - The reference index lives inside the actor, so uniqueness holds even when two
//!   creates for the same reference race past the service's existence check
//! - Services hold no mutable state and can be shared freely
//!
//! ## Testing
//!
//! The [`mock`] module provides a recording [`mock::MockRepository`] for service-level
//! tests and channel helpers for asserting the requests a [`StoreClient`] sends.

pub mod controller;
pub mod decoder;
pub mod entity;
pub mod envelope;
pub mod error;
pub mod lifecycle;
pub mod mock;
pub mod reference;
pub mod service;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export core types for convenience
pub use controller::ResourceController;
pub use decoder::ErrorDecoder;
pub use entity::{round_amount, EntityId, NoAction, ResourceEntity, ServiceSettings};
pub use envelope::{ProblemDetail, ResponseEnvelope};
pub use error::{field_violations, ErrorKind, FieldViolation, ResourceError};
pub use lifecycle::{LifecycleValidator, OperationKind, Proceed};
pub use reference::Reference;
pub use service::ResourceService;
pub use store::{Repository, StoreActor, StoreClient, StoreError};
