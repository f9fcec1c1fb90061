//! Public API for the Settle resolution engine.
//!
//! This module provides the stable public API for loading statement
//! batches: construct a base environment with [`EnvironmentBuilder`], wrap
//! an evaluation capability in an [`Engine`], and resolve a section or a
//! single expression.
//!
//! # Example
//!
//! ```ignore
//! use settle_core::api::{Engine, EngineOptions, EnvironmentBuilder};
//!
//! let engine = Engine::new(calc, EngineOptions::default());
//! let base = EnvironmentBuilder::new().build();
//!
//! match engine.resolve_section("A = 1;\nB = A + 1;", base)? {
//!     Resolution::Values(env) => { /* name-ordered bindings */ }
//!     Resolution::Failures(failures) => { /* errors mode only */ }
//! }
//! ```

pub mod engine;
pub mod environment;
pub mod error;
pub mod options;

pub use engine::Engine;
pub use environment::EnvironmentBuilder;
pub use error::{Diagnostic, Error};
pub use options::{EngineOptions, ResolveOptions};
