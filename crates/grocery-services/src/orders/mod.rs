//! Purchase order resource: store wiring and the [`OrderService`] facade.

pub mod entity;

use resource_framework::{
    Repository, ResourceController, ResourceService, ResponseEnvelope, ServiceSettings,
    StoreActor, StoreClient,
};
use tracing::info_span;

use crate::model::{OrderFilter, PurchaseOrder};

/// Creates an order store actor and the service facade bound to it.
pub fn new(capacity: usize, settings: ServiceSettings) -> (StoreActor<PurchaseOrder>, OrderService) {
    let (actor, client) = StoreActor::new(capacity);
    let span = info_span!("orders", entity_type = "order");
    let service = OrderService::new(ResourceService::new(client, settings, span));
    (actor, service)
}

pub struct OrderService<R: Repository<PurchaseOrder> = StoreClient<PurchaseOrder>> {
    inner: ResourceService<PurchaseOrder, R>,
}

impl<R: Repository<PurchaseOrder>> OrderService<R> {
    pub fn new(inner: ResourceService<PurchaseOrder, R>) -> Self {
        Self { inner }
    }

    /// Orders for one product, optionally restricted to paid or unpaid ones.
    pub async fn for_product(
        &self,
        product_reference: &str,
        paid: Option<bool>,
    ) -> Result<Vec<PurchaseOrder>, ResponseEnvelope<PurchaseOrder>> {
        self.inner
            .list(OrderFilter::new(Some(product_reference), paid))
            .await
    }
}

impl<R: Repository<PurchaseOrder>> ResourceController<PurchaseOrder> for OrderService<R> {
    type Repository = R;

    fn service(&self) -> &ResourceService<PurchaseOrder, R> {
        &self.inner
    }
}
