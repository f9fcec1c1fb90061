//! Multi-pass fixpoint resolution of statement batches.
//!
//! The resolver takes a batch of textual statements whose mutual
//! dependencies are unknown (and possibly cyclic-looking) and resolves them
//! into one [`Environment`] by repeatedly attempting evaluation. The
//! evaluation order is implicit: a statement that depends on a name no
//! other statement has produced yet simply fails this pass and is retried
//! on the next one, after its dependency (if resolvable) has been added.
//! The run terminates the first time a pass resolves no new names.
//!
//! ## Design Principles
//!
//! - **Fault-tolerant**: no statement failure aborts the run; permanently
//!   unresolvable statements are dropped from the values-mode result and
//!   surfaced in the errors-mode result.
//! - **Snapshot discipline**: statements within one pass all see the same
//!   immutable environment and never each other's results, so a pass could
//!   be evaluated concurrently without synchronization.
//! - **Guaranteed termination**: each pass that makes progress resolves at
//!   least one statement, bounding a run at N+1 passes for N statements.
//!
//! ## Example
//!
//! ```ignore
//! use settle_core::resolver::{Evaluate, resolve};
//! use settle_core::environment::Environment;
//!
//! let resolution = resolve(&evaluator, &["B = A + 1", "A = 1"], Environment::new())?;
//! // pass 1: B fails (A unresolved), A resolves
//! // pass 2: B resolves
//! // pass 3: nothing new -> fixpoint
//! ```

mod error;
mod resolve;


pub use error::{CapabilityFault, EvalError, ResolveError, StatementError};

use crate::Vec;
use crate::environment::{Bindings, Environment, Name};
use ecow::EcoString;

/// The pluggable evaluation capability.
///
/// Implementors turn one statement text plus an environment into zero or
/// more bindings, or a recoverable [`StatementError`]. The resolver is
/// agnostic to the statement syntax and the value representation; any
/// expression engine that can be pointed at a name-to-value mapping fits
/// behind this trait.
///
/// Contract: every per-statement problem (malformed text, missing name,
/// runtime failure) must come back as `EvalError::Statement` so the
/// resolver can retry it. `EvalError::Fault` is reserved for the capability
/// itself misbehaving and aborts the whole run.
pub trait Evaluate {
    /// The value type bindings resolve to.
    type Value: Clone;

    /// Evaluate one statement against an environment snapshot.
    fn evaluate(
        &self,
        statement: &str,
        env: &Environment<Self::Value>,
    ) -> Result<Bindings<Self::Value>, EvalError>;
}

/// Options controlling one resolver run.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Return the still-failing statements with diagnostics instead of the
    /// resolved environment.
    ///
    /// Default: false
    pub return_errors: bool,

    /// When false, retain exported bindings' prefixed internal names in the
    /// result alongside the exported ones.
    ///
    /// Default: true
    pub export_only_shared: bool,

    /// Reserved prefix marking a binding as re-exported from a nested
    /// scope. A successful binding `<prefix>Foo` surfaces as `Foo`.
    ///
    /// Default: `"shared."`
    pub export_prefix: EcoString,

    /// Maximum number of evaluation passes (if Some).
    ///
    /// The fixpoint rule already bounds a run at N+1 passes; this is a
    /// caller-imposed safety net below that. Exceeding it aborts with
    /// [`ResolveError::PassLimit`].
    ///
    /// Default: None
    pub max_passes: Option<usize>,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            return_errors: false,
            export_only_shared: true,
            export_prefix: EcoString::from("shared."),
            max_passes: None,
        }
    }
}

/// A statement still failing when the run reached its fixpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedStatement {
    /// The original statement text.
    pub statement: EcoString,

    /// The error from the statement's last evaluation attempt.
    pub error: StatementError,
}

/// The outcome of a resolver run.
///
/// The two variants are mutually exclusive outputs of the same run,
/// selected up front by [`ResolveOptions::return_errors`]; a run does not
/// produce both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<V> {
    /// The final environment, name-ordered. Permanently failing statements
    /// have been dropped silently.
    Values(Environment<V>),

    /// The statements still pending after the final pass, each with its
    /// last evaluation error.
    Failures(Vec<FailedStatement>),
}

impl<V> Resolution<V> {
    /// The final environment, if this run was in values mode.
    pub fn into_values(self) -> Option<Environment<V>> {
        match self {
            Resolution::Values(env) => Some(env),
            Resolution::Failures(_) => None,
        }
    }

    /// The leftover failures, if this run was in errors mode.
    pub fn into_failures(self) -> Option<Vec<FailedStatement>> {
        match self {
            Resolution::Values(_) => None,
            Resolution::Failures(failures) => Some(failures),
        }
    }
}

/// Resolve a statement batch with default options.
///
/// ## Arguments
///
/// - `evaluator`: the evaluation capability
/// - `statements`: the statement batch, in any order
/// - `base`: the base environment (builtins, host constants)
///
/// ## Returns
///
/// The values-mode [`Resolution`] holding the final environment, or a fatal
/// [`ResolveError`].
///
/// ## Example
///
/// ```ignore
/// let resolution = resolve(&calc, &["B = A + 1", "A = 1"], Environment::new())?;
/// let env = resolution.into_values().unwrap();
/// assert_eq!(env.get("B"), Some(&2));
/// ```
pub fn resolve<E: Evaluate>(
    evaluator: &E,
    statements: &[&str],
    base: Environment<E::Value>,
) -> Result<Resolution<E::Value>, ResolveError> {
    resolve_with_options(evaluator, statements, base, &ResolveOptions::default())
}

/// Resolve a statement batch with custom options.
///
/// See [`resolve`]; `options` selects the result mode, the export-rename
/// convention, and an optional pass bound.
pub fn resolve_with_options<E: Evaluate>(
    evaluator: &E,
    statements: &[&str],
    base: Environment<E::Value>,
    options: &ResolveOptions,
) -> Result<Resolution<E::Value>, ResolveError> {
    resolve::Resolver::new(evaluator, statements, base, options).run()
}

/// Convenience constructor for a single binding outcome.
pub fn single_binding<V>(name: impl Into<Name>, value: V) -> Bindings<V> {
    let mut bindings = Bindings::new();
    bindings.push((name.into(), value));
    bindings
}
