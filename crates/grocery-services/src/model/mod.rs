//! Data structures for the grocery resources: stored records, client bodies and filters.

pub mod order;
pub mod payment;
pub mod product;

pub use order::*;
pub use payment::*;
pub use product::*;
