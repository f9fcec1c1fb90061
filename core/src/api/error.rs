//! Public error types for the Settle API.
//!
//! This module defines the stable error types exposed to library users.
//! Internal errors are converted to these public types at API boundaries.

use crate::resolver::{EvalError, ResolveError, StatementError};
use crate::{String, ToString, Vec, format};
use ecow::EcoString;

#[cfg(feature = "std")]
use std::fmt;

#[cfg(not(feature = "std"))]
use core::fmt;

/// Public error type for all Settle operations.
///
/// This is the stable error type exposed to library users. Internal error
/// representations may change, but this public API remains stable.
#[derive(Debug)]
pub enum Error {
    /// Statement evaluation failed (expression mode, where there is no
    /// later pass to retry on).
    ///
    /// Contains one or more diagnostics with the offending statement text.
    Evaluation { diagnostics: Vec<Diagnostic> },

    /// The injected evaluation capability broke its contract.
    Capability(String),

    /// The caller-imposed pass bound was exceeded before convergence.
    PassLimit(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Evaluation { diagnostics } => {
                write!(f, "Evaluation failed with {} error(s)", diagnostics.len())
            }
            Error::Capability(msg) => write!(f, "Capability fault: {}", msg),
            Error::PassLimit(msg) => write!(f, "Pass limit exceeded: {}", msg),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// A diagnostic for one failing statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The original statement text.
    pub statement: EcoString,

    /// Human-readable description of the failure.
    pub message: String,
}

// ============================================================================
// Conversion from internal errors
// ============================================================================

impl Diagnostic {
    pub(crate) fn new(statement: impl Into<EcoString>, error: &StatementError) -> Self {
        Self {
            statement: statement.into(),
            message: error.to_string(),
        }
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::Capability(fault) => Error::Capability(fault.message.to_string()),
            ResolveError::PassLimit { passes, limit } => Error::PassLimit(format!(
                "no fixpoint after {} passes (limit: {})",
                passes, limit
            )),
        }
    }
}

impl Error {
    /// Wrap an expression-mode evaluation failure.
    pub(crate) fn from_eval(statement: &str, err: EvalError) -> Self {
        match err {
            EvalError::Statement(error) => Error::Evaluation {
                diagnostics: Vec::from([Diagnostic::new(statement, &error)]),
            },
            EvalError::Fault(fault) => Error::Capability(fault.message.to_string()),
        }
    }
}
