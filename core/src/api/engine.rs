//! The Settle resolution engine.

use super::{EngineOptions, Error};
use crate::environment::{Bindings, Environment};
use crate::resolver::{self, Evaluate, Resolution, ResolveOptions};
use crate::splitter;

/// The Settle resolution engine.
///
/// The engine owns the injected evaluation capability and the default
/// options, and exposes the two loading modes:
///
/// - **Section mode**: split a document into statements and resolve them
///   to a fixpoint ([`Engine::resolve_section`], [`Engine::resolve_statements`]).
/// - **Expression mode**: evaluate one statement directly, bypassing the
///   fixpoint machinery ([`Engine::evaluate_expression`]).
///
/// # Example
///
/// ```ignore
/// use settle_core::api::{Engine, EngineOptions, EnvironmentBuilder};
///
/// let engine = Engine::new(calc, EngineOptions::default());
///
/// let mut base = EnvironmentBuilder::new();
/// base.register("pi", CalcValue::Int(3));
///
/// let resolution = engine.resolve_section("A = pi + 1;\nB = A + 1;", base.build())?;
/// ```
pub struct Engine<E: Evaluate> {
    evaluator: E,
    options: EngineOptions,
}

impl<E: Evaluate> Engine<E> {
    /// Create a new engine around an evaluation capability.
    pub fn new(evaluator: E, options: EngineOptions) -> Self {
        Self { evaluator, options }
    }

    /// Access the evaluation capability.
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Resolve a statement batch against `base` with the default options.
    pub fn resolve_statements(
        &self,
        statements: &[&str],
        base: Environment<E::Value>,
    ) -> Result<Resolution<E::Value>, Error> {
        self.resolve_statements_with_options(statements, base, &self.options.default_resolve_options)
    }

    /// Resolve a statement batch against `base` with custom options.
    pub fn resolve_statements_with_options(
        &self,
        statements: &[&str],
        base: Environment<E::Value>,
        options: &ResolveOptions,
    ) -> Result<Resolution<E::Value>, Error> {
        resolver::resolve_with_options(&self.evaluator, statements, base, options)
            .map_err(Error::from)
    }

    /// Split a section document and resolve its statements.
    ///
    /// The document is split on the statement terminator (in its CRLF, CR,
    /// and LF spellings, quote-aware); a leading `section <name>` header is
    /// dropped.
    pub fn resolve_section(
        &self,
        text: &str,
        base: Environment<E::Value>,
    ) -> Result<Resolution<E::Value>, Error> {
        self.resolve_section_with_options(text, base, &self.options.default_resolve_options)
    }

    /// Split a section document and resolve its statements, with custom
    /// options.
    pub fn resolve_section_with_options(
        &self,
        text: &str,
        base: Environment<E::Value>,
        options: &ResolveOptions,
    ) -> Result<Resolution<E::Value>, Error> {
        let statements = splitter::split_section(text);
        self.resolve_statements_with_options(&statements, base, options)
    }

    /// Evaluate one statement directly against `env` (expression mode).
    ///
    /// No retrying happens here: a recoverable failure is final and comes
    /// back as [`Error::Evaluation`].
    pub fn evaluate_expression(
        &self,
        text: &str,
        env: &Environment<E::Value>,
    ) -> Result<Bindings<E::Value>, Error> {
        self.evaluator
            .evaluate(text, env)
            .map_err(|err| Error::from_eval(text, err))
    }
}
