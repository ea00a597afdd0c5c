use chrono::NaiveDate;
use grocery_services::lifecycle::{setup_tracing, GrocerySystem};
use grocery_services::model::{OrderBody, PaymentBody, ProductBody};
use grocery_services::payments::PaymentAction;
use grocery_services::{GroceryConfig, GroceryError};
use resource_framework::{ResourceController, ResponseEnvelope};
use serde::Serialize;
use tracing::{info, warn, Instrument};

fn render<T: Serialize>(envelope: &ResponseEnvelope<T>) -> Result<String, GroceryError> {
    Ok(serde_json::to_string(envelope)?)
}

#[tokio::main]
async fn main() -> Result<(), GroceryError> {
    setup_tracing();

    let config = GroceryConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Falling back to default configuration");
        GroceryConfig::default()
    });
    info!(?config, "Starting grocery services");

    let system = GrocerySystem::new(&config);

    // Catalogue
    let span = tracing::info_span!("catalogue");
    async {
        let created = system
            .products
            .create(ProductBody {
                reference: Some("apple-0001".to_string()),
                name: Some("Golden apple".to_string()),
                image_url: Some("https://example.com/apple.png".to_string()),
                price: Some(1.499),
                purchase_price: Some(0.8),
                available: Some(120),
            })
            .await;
        info!(envelope = %render(&created)?, "Product create");

        let patched = system
            .products
            .patch(
                Some("APPLE-0001"),
                ProductBody {
                    available: Some(80),
                    ..Default::default()
                },
            )
            .await;
        info!(envelope = %render(&patched)?, "Product patch");

        match system.products.available_over(50).await {
            Ok(products) => info!(count = products.len(), "Products in stock"),
            Err(envelope) => warn!(envelope = %render(&envelope)?, "Product listing failed"),
        }

        match system.products.margins().await {
            Ok(margins) => info!(margins = %serde_json::to_string(&margins)?, "Margins"),
            Err(envelope) => warn!(envelope = %render(&envelope)?, "Margins failed"),
        }
        Ok::<_, GroceryError>(())
    }
    .instrument(span)
    .await?;

    // Order and payment
    let span = tracing::info_span!("checkout");
    async {
        let order_date = NaiveDate::from_ymd_opt(2024, 3, 1);
        let order = system
            .orders
            .create(OrderBody {
                reference: Some("ord-00001".to_string()),
                product_reference: Some("apple-0001".to_string()),
                order_date,
                quantity: Some(40),
                amount: Some(32.0),
                balance: Some(32.0),
                paid: Some(false),
            })
            .await;
        info!(envelope = %render(&order)?, "Order create");

        let payment = system
            .payments
            .create(PaymentBody {
                reference: Some("pay-00001".to_string()),
                order_reference: Some("ord-00001".to_string()),
                payment_date: order_date,
                payment_amount: Some(32.0),
                masked_card_number: Some("XXXX-XXXX-XXXX-4242".to_string()),
                ..Default::default()
            })
            .await;
        info!(envelope = %render(&payment)?, "Payment create");

        let cancelled = system.payments.cancel(Some("pay-00001")).await;
        info!(envelope = %render(&cancelled)?, "Payment cancelation");

        // POST /payments/{reference}/{action}
        let action: PaymentAction = "cancelation".parse()?;
        let again = system.payments.perform(Some("pay-00001"), action).await;
        info!(envelope = %render(&again)?, "Payment {}", action.path());

        let missing = system.payments.cancel(Some("pay-99999")).await;
        warn!(envelope = %render(&missing)?, "Payment cancelation");
        Ok::<_, GroceryError>(())
    }
    .instrument(span)
    .await?;

    system.shutdown().await?;

    info!("Grocery services stopped");
    Ok(())
}
