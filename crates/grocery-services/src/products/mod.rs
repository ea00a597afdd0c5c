//! Product resource: store wiring, the [`ProductService`] facade and margin reporting.

pub mod entity;
mod margins;

use resource_framework::{
    Repository, ResourceController, ResourceService, ResponseEnvelope, ServiceSettings,
    StoreActor, StoreClient,
};
use tracing::info_span;

use crate::model::{Product, ProductFilter, ProductMargin};

/// Creates a product store actor and the service facade bound to it.
pub fn new(capacity: usize, settings: ServiceSettings) -> (StoreActor<Product>, ProductService) {
    let (actor, client) = StoreActor::new(capacity);
    let span = info_span!("products", entity_type = "product");
    let service = ProductService::new(ResourceService::new(client, settings, span));
    (actor, service)
}

/// Product operations: the standard surface from [`ResourceController`] plus catalogue reports.
pub struct ProductService<R: Repository<Product> = StoreClient<Product>> {
    inner: ResourceService<Product, R>,
}

impl<R: Repository<Product>> ProductService<R> {
    pub fn new(inner: ResourceService<Product, R>) -> Self {
        Self { inner }
    }

    /// Products with more than `quantity_min` units available.
    pub async fn available_over(
        &self,
        quantity_min: i64,
    ) -> Result<Vec<Product>, ResponseEnvelope<Product>> {
        self.inner
            .list(ProductFilter::available_over(quantity_min))
            .await
    }

    /// Margins of every product. An empty catalogue is a 404 envelope.
    pub async fn margins(&self) -> Result<Vec<ProductMargin>, ResponseEnvelope<Product>> {
        let decimals = self.inner.settings().amount_decimals;
        let products = self.inner.list_all().await?;
        Ok(products
            .into_iter()
            .map(|product| ProductMargin::of(product, decimals))
            .collect())
    }
}

impl<R: Repository<Product>> ResourceController<Product> for ProductService<R> {
    type Repository = R;

    fn service(&self) -> &ResourceService<Product, R> {
        &self.inner
    }
}
