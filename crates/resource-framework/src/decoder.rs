//! # Error Decoder
//!
//! The single failure boundary of a request. Any [`ResourceError`] escaping a service
//! operation is handed to [`ErrorDecoder::decode`], which walks its cause chain and folds
//! it into one [`ResponseEnvelope`]:
//!
//! 1. The outermost failure sets `message` and `exception` and is the first problem.
//! 2. Each deeper cause is appended as a problem unless its kind equals its parent's
//!    (wrappers of the same kind collapse into one entry).
//! 3. A deeper cause carrying field violations forces status 400, rewrites `message` to
//!    `'<property>': <message>` and reports `ValidationError` as the exception. The
//!    outermost failure keeps its own message.
//! 4. Status precedence is 404 over 400 over 500, whatever the nesting order.

use tracing::{error, warn, Span};

use crate::envelope::{
    ProblemDetail, ResponseEnvelope, STATUS_BAD_REQUEST, STATUS_INTERNAL_ERROR, STATUS_NOT_FOUND,
};
use crate::error::{ErrorKind, ResourceError};

#[derive(Debug, Clone)]
pub struct ErrorDecoder {
    span: Span,
}

impl ErrorDecoder {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    pub fn decode<T>(&self, path: impl Into<String>, failure: &ResourceError) -> ResponseEnvelope<T> {
        let _entered = self.span.enter();

        let mut status = STATUS_INTERNAL_ERROR;
        let mut message = failure.to_string();
        let mut exception = failure.kind().name().to_string();
        let mut problems = Vec::new();
        let mut parent: Option<ErrorKind> = None;

        for cause in failure.chain() {
            let kind = cause.kind();
            error!(exception = kind.name(), "{cause}");

            match parent {
                None => problems.push(ProblemDetail::from(cause)),
                Some(previous) if previous != kind => {
                    problems.push(ProblemDetail::from(cause));
                    for violation in cause.violations() {
                        warn!(property = %violation.property, "{}", violation.message);
                        message = violation.to_string();
                        exception = ErrorKind::Validation.name().to_string();
                    }
                    if !cause.violations().is_empty() {
                        status = escalate(status, STATUS_BAD_REQUEST);
                    }
                }
                Some(_) => {}
            }

            status = escalate(status, kind.status());
            parent = Some(kind);
        }

        ResponseEnvelope::failure(status, message, path.into(), exception, problems)
    }
}

/// 404 beats 400, and both beat the 500 fallback.
fn escalate(current: u16, candidate: u16) -> u16 {
    match (current, candidate) {
        (STATUS_NOT_FOUND, _) | (_, STATUS_NOT_FOUND) => STATUS_NOT_FOUND,
        (_, STATUS_BAD_REQUEST) => STATUS_BAD_REQUEST,
        (current, _) => current,
    }
}
