//! Log subscriber setup.
//!
//! Levels come from `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run -p grocery-services
//! RUST_LOG=resource_framework=debug,info cargo run -p grocery-services
//! ```
//!
//! Every service runs inside a span named after its resource (`products`, `orders`,
//! `payments`) carrying an `entity_type` field, and the controller operations open a
//! nested span per call, so a compact line reads like:
//!
//! ```text
//! INFO products:create{entity_type="product"}: Created reference=APPLE-001
//! WARN payments:perform{entity_type="payment"}: Not found entity_type="payment" kind=OTHER reference=PAY-00009
//! ```
//!
//! Module paths are hidden; the spans already say which resource a line belongs to.

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
