//! # Business References
//!
//! Every resource is addressed by a human-assigned business reference (`"APPLE-001"`),
//! never by its storage identity. This module owns the canonical form of that key:
//! references are compared, indexed and reported only after being upper-cased and
//! trimmed, so `" apple-001 "` and `"APPLE-001"` address the same record.
//!
//! A [`Reference`] can only be built through [`Reference::normalize`], which makes the
//! canonical form a type-level guarantee: any function that accepts a `Reference` knows
//! it is non-blank and already normalized.

use serde::Serialize;
use std::fmt::{self, Display};
use std::ops::RangeInclusive;

use crate::error::FieldViolation;

/// Accepted length of a stored reference, in characters.
pub const REFERENCE_LENGTH: RangeInclusive<usize> = 5..=50;

/// A normalized, non-blank business reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Reference(String);

impl Reference {
    /// Canonicalizes a raw client value.
    ///
    /// Returns `None` when the value is missing or blank once trimmed. The operation is
    /// idempotent: normalizing an already-normalized value yields the same reference.
    pub fn normalize(raw: Option<&str>) -> Option<Self> {
        let canonical = raw?.to_uppercase().trim().to_string();
        if canonical.is_empty() {
            None
        } else {
            Some(Self(canonical))
        }
    }

    /// Shorthand for [`Reference::normalize`] on a present value.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::normalize(Some(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length constraint check, reported under `property`.
    pub fn violations(&self, property: &str) -> Vec<FieldViolation> {
        let length = self.0.chars().count();
        if REFERENCE_LENGTH.contains(&length) {
            Vec::new()
        } else {
            vec![FieldViolation::new(
                property,
                format!(
                    "size must be between {} and {}",
                    REFERENCE_LENGTH.start(),
                    REFERENCE_LENGTH.end()
                ),
            )]
        }
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Reference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
