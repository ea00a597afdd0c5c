//! # Grocery Services
//!
//! Product catalogue, purchase orders and payments built on [`resource_framework`].
//!
//! - **[model]**: stored records ([`Product`](model::Product), [`PurchaseOrder`](model::PurchaseOrder),
//!   [`Payment`](model::Payment)), their client bodies and list filters.
//! - **[products]**, **[orders]**, **[payments]**: one `ResourceEntity` impl and one service
//!   facade per resource. Facades get the standard operations from
//!   [`ResourceController`](resource_framework::ResourceController) and add their own
//!   (margins, per-product orders, payment cancelation).
//! - **[lifecycle]**: [`GrocerySystem`](lifecycle::GrocerySystem) starts and stops the stores.
//! - **[config]**: layered settings (defaults, `grocery.*` file, `GROCERY__*` variables).
//!
//! Every operation answers with a [`ResponseEnvelope`](resource_framework::ResponseEnvelope);
//! reads return the records directly and fall back to an envelope on failure.

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod orders;
pub mod payments;
pub mod products;

pub use crate::config::GroceryConfig;
pub use crate::error::GroceryError;
