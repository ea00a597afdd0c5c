//! # Store Messages
//!
//! Requests sent from [`crate::store::StoreClient`] to [`crate::store::StoreActor`].
//! Every variant carries a oneshot sender the actor answers on.

use tokio::sync::oneshot;

use crate::entity::{EntityId, ResourceEntity};
use crate::reference::Reference;
use crate::store::StoreError;

/// Type alias for the one-shot response channel used by the store.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

#[derive(Debug)]
pub enum StoreRequest<T: ResourceEntity> {
    FindByReference {
        reference: Reference,
        respond_to: Response<Option<T>>,
    },
    FindAll {
        respond_to: Response<Vec<T>>,
    },
    FindWhere {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Save {
        record: T,
        respond_to: Response<T>,
    },
    Delete {
        id: EntityId,
        respond_to: Response<()>,
    },
}
