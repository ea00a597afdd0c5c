//! Custom actions for the Payment resource.
//!
//! Actions are addressed by a path segment (`POST /payments/{reference}/cancelation`)
//! and run through the `Other` operation kind.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentAction {
    /// Marks the payment `CANCELLED`. Cancelling twice is accepted.
    Cancel,
}

impl PaymentAction {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Cancel => "cancelation",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown payment action: {0}")]
pub struct UnknownPaymentAction(pub String);

impl FromStr for PaymentAction {
    type Err = UnknownPaymentAction;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        match segment.trim() {
            "cancelation" => Ok(Self::Cancel),
            other => Err(UnknownPaymentAction(other.to_string())),
        }
    }
}
