//! # Store Client
//!
//! The cloneable handle used to talk to a [`crate::store::StoreActor`]. Implements
//! [`Repository`] by forwarding each call as a [`StoreRequest`] and awaiting the
//! oneshot reply.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use crate::entity::{EntityId, ResourceEntity};
use crate::reference::Reference;
use crate::store::{Repository, Response, StoreError, StoreRequest};

/// Holds only a sender, so cloning is cheap and clones can be shared across tasks.
#[derive(Clone)]
pub struct StoreClient<T: ResourceEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: ResourceEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> StoreRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::StoreClosed)?;
        response.await.map_err(|_| StoreError::StoreDropped)?
    }
}

#[async_trait]
impl<T: ResourceEntity> Repository<T> for StoreClient<T> {
    async fn find_by_reference(&self, reference: &Reference) -> Result<Option<T>, StoreError> {
        let reference = reference.clone();
        self.request(|respond_to| StoreRequest::FindByReference {
            reference,
            respond_to,
        })
        .await
    }

    async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindAll { respond_to })
            .await
    }

    async fn find_where(&self, filter: T::Filter) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| StoreRequest::FindWhere { filter, respond_to })
            .await
    }

    async fn save(&self, record: T) -> Result<T, StoreError> {
        self.request(|respond_to| StoreRequest::Save { record, respond_to })
            .await
    }

    async fn delete(&self, id: EntityId) -> Result<(), StoreError> {
        self.request(|respond_to| StoreRequest::Delete { id, respond_to })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{create_mock_store, expect_delete, expect_find_by_reference, expect_save};
    use crate::test_support::{gadget, Gadget};

    #[tokio::test]
    async fn test_client_forwards_requests() {
        let (client, mut receiver) = create_mock_store::<Gadget>(4);
        let stored = gadget("gadget-001", 3);

        let lookup = tokio::spawn({
            let client = client.clone();
            async move {
                client
                    .find_by_reference(&Reference::parse(" gadget-001").unwrap())
                    .await
            }
        });
        let (reference, respond_to) = expect_find_by_reference(&mut receiver).await.unwrap();
        assert_eq!(reference.as_str(), "GADGET-001");
        respond_to.send(Ok(Some(stored.clone()))).unwrap();
        assert_eq!(lookup.await.unwrap().unwrap(), Some(stored.clone()));

        let save = tokio::spawn({
            let client = client.clone();
            let record = stored.clone();
            async move { client.save(record).await }
        });
        let (record, respond_to) = expect_save(&mut receiver).await.unwrap();
        assert_eq!(record, stored);
        let mut saved = record;
        saved.id = Some(EntityId(7));
        respond_to.send(Ok(saved)).unwrap();
        assert_eq!(save.await.unwrap().unwrap().id, Some(EntityId(7)));

        let delete = tokio::spawn(async move { client.delete(EntityId(7)).await });
        let (id, respond_to) = expect_delete(&mut receiver).await.unwrap();
        assert_eq!(id, EntityId(7));
        respond_to.send(Ok(())).unwrap();
        assert!(delete.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_dropped_reply_is_reported() {
        let (client, mut receiver) = create_mock_store::<Gadget>(1);
        let call = tokio::spawn(async move { client.find_all().await });
        drop(receiver.recv().await);
        assert_eq!(call.await.unwrap().unwrap_err(), StoreError::StoreDropped);
    }
}
