//! # ResourceController Trait
//!
//! Provides the standard resource surface (`get`, `list`, `create`, `replace`, `patch`,
//! `delete`, `perform`) to per-entity facades, built on top of a generic
//! [`ResourceService`]. A facade only exposes its inner service and adds its own
//! domain operations next to the provided ones.
use async_trait::async_trait;

use crate::entity::ResourceEntity;
use crate::envelope::ResponseEnvelope;
use crate::service::ResourceService;
use crate::store::Repository;

/// Trait for resource-specific facades to inherit the standard operations.
///
/// # Example
///
/// ```rust,ignore
/// struct ProductService {
///     inner: ResourceService<Product>,
/// }
///
/// impl ResourceController<Product> for ProductService {
///     type Repository = StoreClient<Product>;
///
///     fn service(&self) -> &ResourceService<Product> {
///         &self.inner
///     }
/// }
///
/// // get(), create(), patch(), ... are provided automatically
/// let envelope = products.create(body).await;
/// ```
#[async_trait]
pub trait ResourceController<T: ResourceEntity>: Send + Sync {
    type Repository: Repository<T>;

    /// Access the inner generic service.
    fn service(&self) -> &ResourceService<T, Self::Repository>;

    #[tracing::instrument(skip(self), fields(entity_type = T::ENTITY_NAME))]
    async fn get(&self, reference: Option<&str>) -> Result<T, ResponseEnvelope<T>> {
        self.service().get(reference).await
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::ENTITY_NAME))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, ResponseEnvelope<T>> {
        self.service().list(filter).await
    }

    async fn list_all(&self) -> Result<Vec<T>, ResponseEnvelope<T>> {
        self.service().list_all().await
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::ENTITY_NAME))]
    async fn create(&self, body: T::Body) -> ResponseEnvelope<T> {
        self.service().create(body).await
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::ENTITY_NAME))]
    async fn replace(&self, reference: Option<&str>, body: T::Body) -> ResponseEnvelope<T> {
        self.service().replace(reference, body).await
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::ENTITY_NAME))]
    async fn patch(&self, reference: Option<&str>, body: T::Body) -> ResponseEnvelope<T> {
        self.service().patch(reference, body).await
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::ENTITY_NAME))]
    async fn delete(&self, reference: Option<&str>) -> ResponseEnvelope<T> {
        self.service().delete(reference).await
    }

    #[tracing::instrument(skip(self), fields(entity_type = T::ENTITY_NAME))]
    async fn perform(&self, reference: Option<&str>, action: T::Action) -> ResponseEnvelope<T> {
        self.service().perform(reference, action).await
    }
}
