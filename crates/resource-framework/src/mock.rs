//! # Mock Stores & Testing Guide
//!
//! Two test doubles stand in for a running [`crate::store::StoreActor`]:
//!
//! | Double | What it replaces | Use case |
//! |--------|------------------|----------|
//! | [`MockRepository`] | the whole [`Repository`] | Unit-testing [`crate::ResourceService`] logic, recording every storage call |
//! | [`create_mock_store`] + `expect_*` | the actor behind a real [`StoreClient`] | Asserting the exact [`StoreRequest`] a client sends and scripting the reply |
//!
//! ## Testing Strategies
//!
//! <details>
//! <summary><b>Pattern 0: Service Logic Test (MockRepository)</b></summary>
//!
//! **When to use**: Checking lifecycle rules without spawning a store task, e.g. that
//! a failed pre-flight check never reaches `save`.
//!
//! ```rust,ignore
//! let repository = MockRepository::<Product>::new();
//! let service = ResourceService::with_settings(repository.clone(), ServiceSettings::default());
//!
//! let envelope = service.create(ProductBody::default()).await;
//! assert_eq!(envelope.status, 400);
//! assert!(repository.calls().is_empty());
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 1: Store Protocol Test (create_mock_store)</b></summary>
//!
//! **When to use**: Checking what a [`StoreClient`] puts on the wire.
//!
//! ```rust,ignore
//! let (client, mut receiver) = create_mock_store::<Product>(4);
//! tokio::spawn(async move { client.find_all().await });
//! let respond_to = expect_find_all(&mut receiver).await.unwrap();
//! respond_to.send(Ok(vec![])).unwrap();
//! ```
//! </details>
//!
//! <details>
//! <summary><b>Pattern 2: Full Store Test (real actor)</b></summary>
//!
//! See `tests/store_lifecycle.rs` for services running against spawned store actors.
//! </details>
//!
//! ## Testing Failure Scenarios
//!
//! Storage failures that a real store only produces under rare conditions can be queued
//! on a [`MockRepository`] with [`MockRepository::fail_next_save`].

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{mpsc, oneshot};

use crate::entity::{EntityId, ResourceEntity};
use crate::reference::Reference;
use crate::store::{Repository, StoreClient, StoreError, StoreRequest};

// =============================================================================
// RECORDING REPOSITORY
// =============================================================================

/// A storage call observed by a [`MockRepository`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryCall {
    FindByReference(Reference),
    FindAll,
    FindWhere,
    Save(Reference),
    Delete(EntityId),
}

struct MockState<T> {
    records: Vec<T>,
    calls: Vec<RepositoryCall>,
    next_id: u64,
    save_failures: VecDeque<StoreError>,
}

/// An in-memory [`Repository`] that records every call.
///
/// Unlike the store actor it enforces no constraint: saves always succeed unless a
/// failure was queued. Clones share state, so a test can keep one handle for
/// inspection while the service owns another.
pub struct MockRepository<T: ResourceEntity> {
    state: Arc<Mutex<MockState<T>>>,
}

impl<T: ResourceEntity> Clone for MockRepository<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: ResourceEntity> Default for MockRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ResourceEntity> MockRepository<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                records: Vec::new(),
                calls: Vec::new(),
                next_id: 1,
                save_failures: VecDeque::new(),
            })),
        }
    }

    /// Seeds records, assigning ids to those without one. Seeding is not recorded as calls.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mock = Self::new();
        {
            let mut state = mock.lock();
            for mut record in records {
                if record.id().is_none() {
                    record.assign_id(EntityId(state.next_id));
                    state.next_id += 1;
                }
                state.records.push(record);
            }
        }
        mock
    }

    /// Makes the next `save` fail with `error` instead of storing anything.
    pub fn fail_next_save(&self, error: StoreError) {
        self.lock().save_failures.push_back(error);
    }

    pub fn calls(&self) -> Vec<RepositoryCall> {
        self.lock().calls.clone()
    }

    pub fn saves(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, RepositoryCall::Save(_)))
            .count()
    }

    pub fn records(&self) -> Vec<T> {
        self.lock().records.clone()
    }

    fn lock(&self) -> MutexGuard<'_, MockState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl<T: ResourceEntity> Repository<T> for MockRepository<T> {
    async fn find_by_reference(&self, reference: &Reference) -> Result<Option<T>, StoreError> {
        let mut state = self.lock();
        state
            .calls
            .push(RepositoryCall::FindByReference(reference.clone()));
        Ok(state
            .records
            .iter()
            .find(|record| record.reference() == reference)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let mut state = self.lock();
        state.calls.push(RepositoryCall::FindAll);
        Ok(state.records.clone())
    }

    async fn find_where(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        let mut state = self.lock();
        state.calls.push(RepositoryCall::FindWhere);
        Ok(state
            .records
            .iter()
            .filter(|record| record.matches(&filter))
            .cloned()
            .collect())
    }

    async fn save(&self, mut record: T) -> Result<T, StoreError> {
        let mut state = self.lock();
        state
            .calls
            .push(RepositoryCall::Save(record.reference().clone()));
        if let Some(error) = state.save_failures.pop_front() {
            return Err(error);
        }

        match record.id() {
            Some(id) => {
                let position = state
                    .records
                    .iter()
                    .position(|stored| stored.id() == Some(id));
                match position {
                    Some(index) => state.records[index] = record.clone(),
                    None => state.records.push(record.clone()),
                }
            }
            None => {
                record.assign_id(EntityId(state.next_id));
                state.next_id += 1;
                state.records.push(record.clone());
            }
        }
        Ok(record)
    }

    async fn delete(&self, id: EntityId) -> Result<(), StoreError> {
        let mut state = self.lock();
        state.calls.push(RepositoryCall::Delete(id));
        let before = state.records.len();
        state.records.retain(|record| record.id() != Some(id));
        if state.records.len() == before {
            Err(StoreError::MissingRecord {
                entity: T::ENTITY_NAME,
                id,
            })
        } else {
            Ok(())
        }
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test controls, with no actor behind it.
///
/// # Testing Strategy
/// The test plays the store: it pulls each [`StoreRequest`] off the receiver with one of
/// the `expect_*` helpers, asserts on its content and answers on the returned sender.
pub fn create_mock_store<T: ResourceEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FindByReference request
pub async fn expect_find_by_reference<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    Reference,
    oneshot::Sender<Result<Option<T>, StoreError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::FindByReference {
            reference,
            respond_to,
        }) => Some((reference, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a FindAll request
pub async fn expect_find_all<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<oneshot::Sender<Result<Vec<T>, StoreError>>> {
    match receiver.recv().await {
        Some(StoreRequest::FindAll { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a Save request
pub async fn expect_save<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T, oneshot::Sender<Result<T, StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Save { record, respond_to }) => Some((record, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: ResourceEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(EntityId, oneshot::Sender<Result<(), StoreError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Delete { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{gadget, Gadget, GadgetFilter};

    #[tokio::test]
    async fn test_mock_repository_records_calls() {
        let repository = MockRepository::with_records([gadget("gadget-001", 4)]);
        let reference = Reference::parse("gadget-001").unwrap();

        let found = repository.find_by_reference(&reference).await.unwrap();
        assert_eq!(found.unwrap().id, Some(EntityId(1)));

        let saved = repository.save(gadget("gadget-002", 9)).await.unwrap();
        assert_eq!(saved.id, Some(EntityId(2)));

        let rows = repository
            .find_where(GadgetFilter { min_available: 5 })
            .await
            .unwrap();
        assert_eq!(rows, vec![saved.clone()]);

        repository.delete(EntityId(1)).await.unwrap();
        assert_eq!(repository.records(), vec![saved]);

        assert_eq!(
            repository.calls(),
            vec![
                RepositoryCall::FindByReference(reference),
                RepositoryCall::Save(Reference::parse("GADGET-002").unwrap()),
                RepositoryCall::FindWhere,
                RepositoryCall::Delete(EntityId(1)),
            ]
        );
    }

    #[tokio::test]
    async fn test_queued_save_failure() {
        let repository = MockRepository::<Gadget>::new();
        repository.fail_next_save(StoreError::StoreClosed);

        let err = repository.save(gadget("gadget-001", 1)).await.unwrap_err();
        assert_eq!(err, StoreError::StoreClosed);
        assert!(repository.records().is_empty());

        assert!(repository.save(gadget("gadget-001", 1)).await.is_ok());
        assert_eq!(repository.saves(), 2);
    }

    #[tokio::test]
    async fn test_expect_find_all_answers_client() {
        let (client, mut receiver) = create_mock_store::<Gadget>(2);
        let call = tokio::spawn(async move { client.find_all().await });

        let respond_to = expect_find_all(&mut receiver).await.unwrap();
        respond_to.send(Ok(vec![gadget("gadget-001", 1)])).unwrap();

        assert_eq!(call.await.unwrap().unwrap().len(), 1);
    }
}
