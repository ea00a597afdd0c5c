//! # Store Errors

use crate::entity::EntityId;
use crate::error::{FieldViolation, ResourceError};
use crate::reference::Reference;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("Store closed")]
    StoreClosed,
    #[error("Store dropped response channel")]
    StoreDropped,
    #[error("Unique index violation on {entity} reference {reference}")]
    DuplicateReference {
        entity: &'static str,
        reference: Reference,
    },
    #[error("Constraint violation on {entity}")]
    ConstraintViolation {
        entity: &'static str,
        violations: Vec<FieldViolation>,
    },
    #[error("No {entity} stored under {id}")]
    MissingRecord { entity: &'static str, id: EntityId },
}

impl From<StoreError> for ResourceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::DuplicateReference { entity, reference } => {
                ResourceError::AlreadyExists { entity, reference }
            }
            StoreError::ConstraintViolation { entity, violations } => {
                ResourceError::Validation { entity, violations }
            }
            StoreError::MissingRecord { entity, .. } => ResourceError::not_found(entity, None),
            other => ResourceError::unknown(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_conversion_keeps_kind() {
        let duplicate = StoreError::DuplicateReference {
            entity: "product",
            reference: Reference::parse("apple-001").unwrap(),
        };
        assert_eq!(ResourceError::from(duplicate).kind(), ErrorKind::AlreadyExists);

        let rejected = StoreError::ConstraintViolation {
            entity: "product",
            violations: vec![FieldViolation::new("name", "size must be between 3 and 255")],
        };
        let converted = ResourceError::from(rejected);
        assert_eq!(converted.kind(), ErrorKind::Validation);
        assert_eq!(converted.violations().len(), 1);

        let closed = ResourceError::from(StoreError::StoreClosed);
        assert_eq!(closed.kind(), ErrorKind::Unknown);
        assert_eq!(closed.to_string(), "Store closed");
    }
}
