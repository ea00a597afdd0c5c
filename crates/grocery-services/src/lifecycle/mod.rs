//! # Runtime Lifecycle
//!
//! Starting, wiring and stopping the store actors behind the grocery services.
//!
//! - [`GrocerySystem`] spawns one store actor per resource and hands out the service facades.
//! - [`setup_tracing`] installs the log subscriber used by the binary.
//!
//! Shutdown is channel driven: dropping every facade closes the store channels, each
//! actor drains and exits, and [`GrocerySystem::shutdown`] joins their tasks.

mod grocery_system;
mod tracing;

pub use grocery_system::GrocerySystem;
pub use self::tracing::setup_tracing;
