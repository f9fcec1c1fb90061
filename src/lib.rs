//! Settle - best-effort fixpoint loading of named definitions
//!
//! # Overview
//!
//! Settle loads a batch of textual statements (each binding a name to an
//! expression) whose mutual dependencies are unknown and possibly
//! cyclic-looking, and resolves them into a single environment by repeated
//! evaluation passes. Statements that fail a pass are retried on the next
//! one; the run stops the first time a pass resolves nothing new. Common
//! use cases include:
//!
//! - Loading a serialized document of many named definitions
//! - Best-effort restoration of loosely-ordered declaration sets
//! - Configuration layers where some entries may reference others
//!
//! The expression language itself is pluggable: any engine that can turn
//! one statement plus a name-to-value mapping into bindings fits behind
//! the [`Evaluate`] trait. The bundled [`calc`] capability (integer and
//! string arithmetic) is enough for demos, tests, and simple documents.
//!
//! # Quick Start
//!
//! ```
//! use settle::calc::Calc;
//! use settle::{Engine, EngineOptions, Environment, Resolution};
//!
//! let engine = Engine::new(Calc, EngineOptions::default());
//!
//! let resolution = engine
//!     .resolve_section("section S;\nB = A + 1;\nA = 1;", Environment::new())
//!     .unwrap();
//!
//! let env = resolution.into_values().unwrap();
//! assert_eq!(env.len(), 2);
//! ```
//!
//! # Result Modes
//!
//! A run produces one of two mutually exclusive outputs, selected up front
//! by [`ResolveOptions::return_errors`]:
//!
//! 1. **Values mode** (default): the final environment, name-ordered;
//!    permanently failing statements are dropped silently.
//! 2. **Errors mode**: the statements still failing at the fixpoint, each
//!    with its last evaluation error.

// Re-export public API from settle_core
pub use settle_core::api::{
    Diagnostic, Engine, EngineOptions, EnvironmentBuilder, Error, ResolveOptions,
};

// Re-export commonly used types
pub use settle_core::environment::{self, Bindings, Environment, Name};
pub use settle_core::resolver::{
    self, CapabilityFault, EvalError, Evaluate, FailedStatement, Resolution, ResolveError,
    StatementError,
};
pub use settle_core::splitter;

mod error_renderer;
pub mod loader;

pub use error_renderer::{
    render_failures, render_failures_to, render_failures_to_string,
    render_failures_to_string_no_color,
};

// The `calc` capability uses `pest_derive`, whose generated parser code
// refers to the `alloc` crate by name.
#[cfg(feature = "calc")]
extern crate alloc;

#[cfg(feature = "calc")]
pub mod calc;
