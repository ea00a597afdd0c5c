//! # Lifecycle Validator
//!
//! Pre-flight checks that run before any mutation reaches the store. Given an
//! [`OperationKind`], the normalized reference and the record currently stored under
//! it, the validator decides whether the operation may proceed:
//!
//! | Kind                         | Stored record | Outcome              |
//! |------------------------------|---------------|----------------------|
//! | any                          | (no reference)| `MandatoryReference` |
//! | `Create`                     | present       | `AlreadyExists`      |
//! | `Create`                     | absent        | proceed              |
//! | every other kind             | absent        | `NotFound`           |
//! | every other kind             | present       | proceed              |

use serde::Serialize;
use std::fmt::{self, Display};
use tracing::{debug, warn, Span};

use crate::entity::ResourceEntity;
use crate::error::ResourceError;
use crate::reference::Reference;

/// Classification of a mutating request. Fixes the existence rule and the success envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationKind {
    Create,
    FullUpdate,
    PartialUpdate,
    Delete,
    Other,
}

impl OperationKind {
    /// Whether the operation targets a record that must already exist.
    pub const fn expects_existing(self) -> bool {
        !matches!(self, Self::Create)
    }
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Create => "CREATE",
            Self::FullUpdate => "FULL_UPDATE",
            Self::PartialUpdate => "PARTIAL_UPDATE",
            Self::Delete => "DELETE",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// Green light from [`LifecycleValidator::check_existence`].
#[derive(Debug, Clone, PartialEq)]
pub struct Proceed<T> {
    pub reference: Reference,
    /// Stored record, `None` only for `Create`.
    pub existing: Option<T>,
    /// `"{base path}/{reference}"`.
    pub location: String,
}

#[derive(Debug, Clone)]
pub struct LifecycleValidator {
    entity: &'static str,
    base_path: &'static str,
    span: Span,
}

impl LifecycleValidator {
    pub fn new(entity: &'static str, base_path: &'static str, span: Span) -> Self {
        Self {
            entity,
            base_path,
            span,
        }
    }

    pub fn for_entity<T: ResourceEntity>(span: Span) -> Self {
        Self::new(T::ENTITY_NAME, T::BASE_PATH, span)
    }

    pub fn location(&self, reference: &Reference) -> String {
        format!("{}/{}", self.base_path.trim_end_matches('/'), reference)
    }

    /// Normalizes the raw reference, failing with `MandatoryReference` when it is blank.
    pub fn require_reference(&self, raw: Option<&str>) -> Result<Reference, ResourceError> {
        Reference::normalize(raw).ok_or_else(|| {
            self.span
                .in_scope(|| warn!(entity_type = self.entity, ?raw, "Missing reference"));
            ResourceError::MandatoryReference {
                entity: self.entity,
            }
        })
    }

    pub fn check_existence<T>(
        &self,
        kind: OperationKind,
        reference: Reference,
        existing: Option<T>,
    ) -> Result<Proceed<T>, ResourceError> {
        let _entered = self.span.enter();
        match (kind.expects_existing(), existing.is_some()) {
            (false, true) => {
                warn!(entity_type = self.entity, %kind, %reference, "Already exists");
                Err(ResourceError::AlreadyExists {
                    entity: self.entity,
                    reference,
                })
            }
            (true, false) => {
                warn!(entity_type = self.entity, %kind, %reference, "Not found");
                Err(ResourceError::not_found(self.entity, Some(reference)))
            }
            _ => {
                debug!(entity_type = self.entity, %kind, %reference, "Proceed");
                let location = self.location(&reference);
                Ok(Proceed {
                    reference,
                    existing,
                    location,
                })
            }
        }
    }

    /// Single-record read check.
    pub fn require_found<T>(
        &self,
        reference: &Reference,
        existing: Option<T>,
    ) -> Result<T, ResourceError> {
        existing.ok_or_else(|| {
            self.span
                .in_scope(|| warn!(entity_type = self.entity, %reference, "Not found"));
            ResourceError::not_found(self.entity, Some(reference.clone()))
        })
    }

    /// Collection read check. An empty result is a `NotFound` without reference.
    pub fn check_collection<T>(&self, rows: Vec<T>) -> Result<Vec<T>, ResourceError> {
        if rows.is_empty() {
            self.span
                .in_scope(|| warn!(entity_type = self.entity, "No matching records"));
            Err(ResourceError::not_found(self.entity, None))
        } else {
            Ok(rows)
        }
    }
}
