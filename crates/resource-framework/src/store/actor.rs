//! # Store Actor
//!
//! The `StoreActor` owns every record of one entity type and processes [`StoreRequest`]
//! messages sequentially. Each actor runs in its own Tokio task, so the record map and
//! the reference index never need a lock.

use std::collections::{BTreeMap, HashMap};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::entity::{EntityId, ResourceEntity};
use crate::reference::Reference;
use crate::store::{StoreClient, StoreError, StoreRequest};

/// In-memory record store for entity type `T`.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `StoreActor::new()` to get the `actor` (server) and `client` (interface).
/// 2.  **Run**: Spawn the actor's run loop in a background task.
/// 3.  **Share**: Hand the client to a [`crate::ResourceService`].
///
/// ```rust,ignore
/// let (actor, client) = StoreActor::<Product>::new(32);
/// let handle = tokio::spawn(actor.run());
/// let service = ResourceService::with_settings(client, ServiceSettings::default());
/// ```
///
/// The loop ends once every client has been dropped.
///
/// # Implementation Details
///
/// Records live in a `BTreeMap` keyed by [`EntityId`], so full scans come back in
/// insertion order. A `HashMap` from [`Reference`] to id backs the unique index.
///
/// * **Save without id**: rejects a reference already indexed, assigns the next id.
/// * **Save with id**: replaces the stored record, re-indexing if the reference changed.
/// * **Delete**: drops the record and its index entry.
pub struct StoreActor<T: ResourceEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    records: BTreeMap<EntityId, T>,
    index: HashMap<Reference, EntityId>,
    next_id: u64,
}

impl<T: ResourceEntity> StoreActor<T> {
    /// Creates a new `StoreActor` and its associated `StoreClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client
    /// calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            records: BTreeMap::new(),
            index: HashMap::new(),
            next_id: 1,
        };
        (actor, StoreClient::new(sender))
    }

    /// Runs the event loop until the channel closes.
    pub async fn run(mut self) {
        let entity_type = T::ENTITY_NAME;
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::FindByReference {
                    reference,
                    respond_to,
                } => {
                    let record = self
                        .index
                        .get(&reference)
                        .and_then(|id| self.records.get(id))
                        .cloned();
                    debug!(entity_type, %reference, found = record.is_some(), "FindByReference");
                    let _ = respond_to.send(Ok(record));
                }
                StoreRequest::FindAll { respond_to } => {
                    let rows: Vec<T> = self.records.values().cloned().collect();
                    debug!(entity_type, rows = rows.len(), "FindAll");
                    let _ = respond_to.send(Ok(rows));
                }
                StoreRequest::FindWhere { filter, respond_to } => {
                    let rows: Vec<T> = self
                        .records
                        .values()
                        .filter(|record| record.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, rows = rows.len(), "FindWhere");
                    let _ = respond_to.send(Ok(rows));
                }
                StoreRequest::Save { record, respond_to } => {
                    let result = self.save(record);
                    match &result {
                        Ok(saved) => {
                            info!(entity_type, reference = %saved.reference(), size = self.records.len(), "Saved")
                        }
                        Err(e) => warn!(entity_type, error = %e, "Save rejected"),
                    }
                    let _ = respond_to.send(result);
                }
                StoreRequest::Delete { id, respond_to } => {
                    let result = self.delete(id);
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.records.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.records.len(), "Shutdown");
    }

    fn save(&mut self, mut record: T) -> Result<T, StoreError> {
        let violations = record.violations();
        if !violations.is_empty() {
            return Err(StoreError::ConstraintViolation {
                entity: T::ENTITY_NAME,
                violations,
            });
        }

        let reference = record.reference().clone();
        let owner = self.index.get(&reference).copied();
        let duplicate = || StoreError::DuplicateReference {
            entity: T::ENTITY_NAME,
            reference: reference.clone(),
        };

        let id = match record.id() {
            Some(id) => {
                let previous = self
                    .records
                    .get(&id)
                    .map(|stored| stored.reference().clone())
                    .ok_or(StoreError::MissingRecord {
                        entity: T::ENTITY_NAME,
                        id,
                    })?;
                if owner.is_some_and(|owner| owner != id) {
                    return Err(duplicate());
                }
                self.index.remove(&previous);
                id
            }
            None => {
                if owner.is_some() {
                    return Err(duplicate());
                }
                let id = EntityId(self.next_id);
                self.next_id += 1;
                record.assign_id(id);
                id
            }
        };

        self.index.insert(reference, id);
        self.records.insert(id, record.clone());
        Ok(record)
    }

    fn delete(&mut self, id: EntityId) -> Result<(), StoreError> {
        let record = self.records.remove(&id).ok_or(StoreError::MissingRecord {
            entity: T::ENTITY_NAME,
            id,
        })?;
        self.index.remove(record.reference());
        Ok(())
    }
}
