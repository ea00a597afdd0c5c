use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::GroceryConfig;
use crate::error::GroceryError;
use crate::orders::OrderService;
use crate::payments::PaymentService;
use crate::products::ProductService;

/// Owns the running product, order and payment stores.
///
/// The three resources are independent: no store talks to another, so each actor is
/// spawned on its own task with nothing injected.
///
/// # Example
///
/// ```ignore
/// let system = GrocerySystem::new(&GroceryConfig::load()?);
///
/// let envelope = system.products.create(body).await;
/// let margins = system.products.margins().await;
///
/// system.shutdown().await?;
/// ```
pub struct GrocerySystem {
    pub products: ProductService,
    pub orders: OrderService,
    pub payments: PaymentService,

    /// Store tasks, joined on shutdown.
    handles: Vec<JoinHandle<()>>,
}

impl GrocerySystem {
    /// Spawns every store with the channel capacity and amount format from `config`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: &GroceryConfig) -> Self {
        let capacity = config.store.channel_capacity;
        let settings = config.settings();

        let (product_store, products) = crate::products::new(capacity, settings);
        let (order_store, orders) = crate::orders::new(capacity, settings);
        let (payment_store, payments) = crate::payments::new(capacity, settings);

        let handles = vec![
            tokio::spawn(product_store.run()),
            tokio::spawn(order_store.run()),
            tokio::spawn(payment_store.run()),
        ];
        info!(capacity, "Grocery stores started");

        Self {
            products,
            orders,
            payments,
            handles,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(&GroceryConfig::default())
    }

    /// Drops every facade and waits for the store tasks to finish.
    ///
    /// Clones of a facade taken before shutdown keep their store alive, so this only
    /// returns once those clones are dropped too.
    pub async fn shutdown(self) -> Result<(), GroceryError> {
        info!("Shutting down grocery stores...");

        drop(self.products);
        drop(self.orders);
        drop(self.payments);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Store task failed");
                return Err(e.into());
            }
        }

        info!("Grocery stores stopped.");
        Ok(())
    }
}
