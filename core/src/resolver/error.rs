//! Resolution errors.
//!
//! Per-statement failures are not errors of the run: a statement that
//! cannot be evaluated this pass is simply retried on the next one, and a
//! statement that can never succeed is surfaced only in the errors-mode
//! result. The types here keep the two channels apart:
//!
//! - **Statement errors**: recoverable failures returned by the evaluation
//!   capability for one statement. Retried every pass; never abort the run.
//!
//! - **Capability faults / resolve errors**: the injected capability broke
//!   its contract, or a caller-imposed pass bound was exceeded. These are
//!   fatal and abort the whole run.

use crate::environment::Name;
use core::fmt;
use ecow::EcoString;

/// Recoverable failure of a single statement evaluation.
///
/// All variants are handled the same way by the resolver (fail this pass,
/// retry next pass); the distinction exists for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// The statement text is malformed and could not be attempted.
    Parse { message: EcoString },

    /// The statement references a name not (yet) in the environment.
    ///
    /// Indistinguishable from a parse error at the outcome level: the name
    /// may appear in the environment on a later pass, or never.
    UnresolvedName { name: Name },

    /// Any other host-defined evaluation failure.
    Other { message: EcoString },
}

impl StatementError {
    /// A malformed-statement error.
    pub fn parse(message: impl Into<EcoString>) -> Self {
        StatementError::Parse {
            message: message.into(),
        }
    }

    /// A reference to a name missing from the environment.
    pub fn unresolved(name: impl Into<Name>) -> Self {
        StatementError::UnresolvedName { name: name.into() }
    }

    /// Any other evaluation failure.
    pub fn other(message: impl Into<EcoString>) -> Self {
        StatementError::Other {
            message: message.into(),
        }
    }
}

impl fmt::Display for StatementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatementError::Parse { message } => write!(f, "parse error: {}", message),
            StatementError::UnresolvedName { name } => {
                write!(f, "unresolved name '{}'", name)
            }
            StatementError::Other { message } => write!(f, "{}", message),
        }
    }
}

/// The evaluation capability itself broke its contract.
///
/// The only fatal, run-aborting failure category: the capability is
/// supposed to turn every per-statement problem into a recoverable
/// [`StatementError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityFault {
    pub message: EcoString,
}

impl CapabilityFault {
    pub fn new(message: impl Into<EcoString>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CapabilityFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "evaluation capability fault: {}", self.message)
    }
}

/// Failure outcome of one evaluation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Recoverable: the statement failed this pass and will be retried.
    Statement(StatementError),

    /// Fatal: the capability misbehaved; the run aborts.
    Fault(CapabilityFault),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Statement(e) => write!(f, "{}", e),
            EvalError::Fault(e) => write!(f, "{}", e),
        }
    }
}

impl From<StatementError> for EvalError {
    fn from(e: StatementError) -> Self {
        EvalError::Statement(e)
    }
}

impl From<CapabilityFault> for EvalError {
    fn from(e: CapabilityFault) -> Self {
        EvalError::Fault(e)
    }
}

/// Fatal error aborting a resolver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The evaluation capability broke its contract.
    Capability(CapabilityFault),

    /// The caller-imposed pass bound was exceeded before reaching fixpoint.
    PassLimit { passes: usize, limit: usize },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::Capability(fault) => write!(f, "{}", fault),
            ResolveError::PassLimit { passes, limit } => {
                write!(
                    f,
                    "no fixpoint after {} passes (limit: {})",
                    passes, limit
                )
            }
        }
    }
}

impl From<CapabilityFault> for ResolveError {
    fn from(fault: CapabilityFault) -> Self {
        ResolveError::Capability(fault)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for StatementError {}

#[cfg(feature = "std")]
impl std::error::Error for CapabilityFault {}

#[cfg(feature = "std")]
impl std::error::Error for EvalError {}

#[cfg(feature = "std")]
impl std::error::Error for ResolveError {}
