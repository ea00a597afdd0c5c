//! Payment resource: store wiring, the [`PaymentService`] facade and cancellation.

mod actions;
pub mod entity;

pub use actions::*;

use resource_framework::{
    Repository, ResourceController, ResourceService, ResponseEnvelope, ServiceSettings,
    StoreActor, StoreClient,
};
use tracing::info_span;

use crate::model::{Payment, PaymentFilter, PaymentStatus};

/// Creates a payment store actor and the service facade bound to it.
pub fn new(capacity: usize, settings: ServiceSettings) -> (StoreActor<Payment>, PaymentService) {
    let (actor, client) = StoreActor::new(capacity);
    let span = info_span!("payments", entity_type = "payment");
    let service = PaymentService::new(ResourceService::new(client, settings, span));
    (actor, service)
}

pub struct PaymentService<R: Repository<Payment> = StoreClient<Payment>> {
    inner: ResourceService<Payment, R>,
}

impl<R: Repository<Payment>> PaymentService<R> {
    pub fn new(inner: ResourceService<Payment, R>) -> Self {
        Self { inner }
    }

    /// `POST /payments/{reference}/cancelation`.
    pub async fn cancel(&self, reference: Option<&str>) -> ResponseEnvelope<Payment> {
        self.inner.perform(reference, PaymentAction::Cancel).await
    }

    pub async fn for_order(
        &self,
        order_reference: &str,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<Payment>, ResponseEnvelope<Payment>> {
        self.inner
            .list(PaymentFilter::new(Some(order_reference), status))
            .await
    }
}

impl<R: Repository<Payment>> ResourceController<Payment> for PaymentService<R> {
    type Repository = R;

    fn service(&self) -> &ResourceService<Payment, R> {
        &self.inner
    }
}
