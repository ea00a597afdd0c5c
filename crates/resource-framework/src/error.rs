//! # Resource Errors
//!
//! One error enum is shared by every resource type. Each variant maps to a stable
//! [`ErrorKind`], and the kind alone decides the HTTP-style status a failure produces
//! (see [`ErrorKind::status`]). `UnknownError` may wrap another `ResourceError` as its
//! cause, forming the chain that [`crate::decoder::ErrorDecoder`] walks.

use serde::Serialize;
use std::fmt::{self, Display};
use validator::ValidationErrors;

use crate::envelope::{STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND};
use crate::reference::Reference;

/// Stable classification of a [`ResourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MandatoryReference,
    AlreadyExists,
    NotFound,
    Validation,
    Unknown,
}

impl ErrorKind {
    /// Name reported in the `exception` fields of an error envelope.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MandatoryReference => "MandatoryReferenceError",
            Self::AlreadyExists => "AlreadyExistsError",
            Self::NotFound => "NotFoundError",
            Self::Validation => "ValidationError",
            Self::Unknown => "UnknownError",
        }
    }

    /// Status table. `Unknown` never overrides a status chosen by a more specific cause.
    pub const fn status(self) -> u16 {
        match self {
            Self::NotFound => STATUS_NOT_FOUND,
            Self::MandatoryReference | Self::AlreadyExists | Self::Validation => STATUS_BAD_REQUEST,
            Self::Unknown => STATUS_INTERNAL_ERROR,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A constraint failure on a single property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub property: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            message: message.into(),
        }
    }
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}': {}", self.property, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ResourceError {
    #[error("The {entity} reference is mandatory")]
    MandatoryReference { entity: &'static str },

    #[error("A {entity} with the requested reference {reference} already exists")]
    AlreadyExists {
        entity: &'static str,
        reference: Reference,
    },

    #[error("{}", not_found_message(.entity, .reference))]
    NotFound {
        entity: &'static str,
        reference: Option<Reference>,
    },

    #[error("The {entity} data is not valid")]
    Validation {
        entity: &'static str,
        violations: Vec<FieldViolation>,
    },

    #[error("{message}")]
    Unknown {
        message: String,
        #[source]
        source: Option<Box<ResourceError>>,
    },
}

fn not_found_message(entity: &str, reference: &Option<Reference>) -> String {
    let mut chars = entity.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    match reference {
        Some(reference) => {
            format!("{capitalized} with the requested code {reference} doesn't exist")
        }
        None => format!("No existing {entity} for the requested parameters"),
    }
}

impl ResourceError {
    pub fn not_found(entity: &'static str, reference: Option<Reference>) -> Self {
        Self::NotFound { entity, reference }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            source: None,
        }
    }

    /// Wraps `self` as the cause of a new `UnknownError` carrying `message`.
    pub fn within(self, message: impl Into<String>) -> Self {
        Self::Unknown {
            message: message.into(),
            source: Some(Box::new(self)),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MandatoryReference { .. } => ErrorKind::MandatoryReference,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Validation { .. } => ErrorKind::Validation,
            Self::Unknown { .. } => ErrorKind::Unknown,
        }
    }

    /// The directly wrapped cause, if any.
    pub fn cause(&self) -> Option<&ResourceError> {
        match self {
            Self::Unknown { source, .. } => source.as_deref(),
            _ => None,
        }
    }

    /// Iterates from `self` down to the innermost cause.
    pub fn chain(&self) -> impl Iterator<Item = &ResourceError> {
        std::iter::successors(Some(self), |error| error.cause())
    }

    /// Field-level violations carried by this failure, empty for other kinds.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            Self::Validation { violations, .. } => violations,
            _ => &[],
        }
    }
}

/// Merges the reference length check with derived `validator` results, sorted by property.
pub fn field_violations(
    reference: &Reference,
    checked: Result<(), ValidationErrors>,
) -> Vec<FieldViolation> {
    let mut violations = reference.violations("reference");
    if let Err(errors) = checked {
        for (property, failures) in errors.field_errors() {
            for failure in failures.iter() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| failure.code.to_string());
                violations.push(FieldViolation::new(property.to_string(), message));
            }
        }
    }
    violations.sort_by(|a, b| a.property.cmp(&b.property));
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(raw: &str) -> Reference {
        Reference::parse(raw).unwrap()
    }

    #[test]
    fn test_messages() {
        let mandatory = ResourceError::MandatoryReference { entity: "product" };
        assert_eq!(mandatory.to_string(), "The product reference is mandatory");

        let exists = ResourceError::AlreadyExists {
            entity: "order",
            reference: reference("ord-00001"),
        };
        assert_eq!(
            exists.to_string(),
            "A order with the requested reference ORD-00001 already exists"
        );

        let missing = ResourceError::not_found("payment", Some(reference("pay-00001")));
        assert_eq!(
            missing.to_string(),
            "Payment with the requested code PAY-00001 doesn't exist"
        );

        let none = ResourceError::not_found("product", None);
        assert_eq!(
            none.to_string(),
            "No existing product for the requested parameters"
        );
    }

    #[test]
    fn test_status_table() {
        assert_eq!(ErrorKind::NotFound.status(), 404);
        assert_eq!(ErrorKind::MandatoryReference.status(), 400);
        assert_eq!(ErrorKind::AlreadyExists.status(), 400);
        assert_eq!(ErrorKind::Validation.status(), 400);
        assert_eq!(ErrorKind::Unknown.status(), 500);
    }

    #[test]
    fn test_chain_walks_to_innermost_cause() {
        let root = ResourceError::not_found("product", None);
        let error = root.clone().within("middle").within("outer");

        let kinds: Vec<ErrorKind> = error.chain().map(ResourceError::kind).collect();
        assert_eq!(
            kinds,
            vec![ErrorKind::Unknown, ErrorKind::Unknown, ErrorKind::NotFound]
        );
        assert_eq!(error.chain().last(), Some(&root));
        assert!(std::error::Error::source(&error).is_some());
    }

    #[test]
    fn test_violation_display() {
        let violation = FieldViolation::new("price", "must be between 0 and 100000");
        assert_eq!(violation.to_string(), "'price': must be between 0 and 100000");
    }
}
