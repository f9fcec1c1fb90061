//! The fixpoint pass loop.

use crate::Vec;
use crate::environment::{self, Environment};
use crate::resolver::{
    Evaluate, EvalError, FailedStatement, Resolution, ResolveError, ResolveOptions, StatementError,
};
use core::mem;
use ecow::EcoString;
use tracing::debug;

/// A statement not yet resolved, with the error from its latest attempt.
struct Pending<'s> {
    text: &'s str,
    last_error: Option<StatementError>,
}

/// Single-shot driver for one resolver run.
///
/// Constructed from the statement batch, a base environment, and the
/// evaluation capability; consumed by [`Resolver::run`].
pub(crate) struct Resolver<'e, 's, E: Evaluate> {
    evaluator: &'e E,
    options: &'e ResolveOptions,
    pending: Vec<Pending<'s>>,
    environment: Environment<E::Value>,
    passes: usize,
}

impl<'e, 's, E: Evaluate> Resolver<'e, 's, E> {
    pub(crate) fn new(
        evaluator: &'e E,
        statements: &[&'s str],
        base: Environment<E::Value>,
        options: &'e ResolveOptions,
    ) -> Self {
        let pending = statements
            .iter()
            .map(|text| Pending {
                text: *text,
                last_error: None,
            })
            .collect();
        Self {
            evaluator,
            options,
            pending,
            environment: base,
            passes: 0,
        }
    }

    /// Drive passes to the fixpoint and select the result.
    pub(crate) fn run(mut self) -> Result<Resolution<E::Value>, ResolveError> {
        // Sentinel: no pass has run yet, so the loop body executes at
        // least once even over an empty base environment.
        let mut resolved_before_pass: Option<usize> = None;

        while resolved_before_pass.is_none_or(|count| self.environment.len() > count) {
            if self.pending.is_empty() {
                // Nothing left to evaluate; the environment cannot grow.
                break;
            }
            if let Some(limit) = self.options.max_passes {
                if self.passes >= limit {
                    return Err(ResolveError::PassLimit {
                        passes: self.passes,
                        limit,
                    });
                }
            }
            resolved_before_pass = Some(self.environment.len());
            self.run_pass()?;
        }

        debug!(
            passes = self.passes,
            resolved = self.environment.len(),
            unresolved = self.pending.len(),
            "fixpoint reached"
        );

        if self.options.return_errors {
            let failures = self
                .pending
                .into_iter()
                .map(|pending| FailedStatement {
                    statement: EcoString::from(pending.text),
                    error: pending.last_error.unwrap_or_else(|| {
                        StatementError::other("statement was never attempted")
                    }),
                })
                .collect();
            Ok(Resolution::Failures(failures))
        } else {
            Ok(Resolution::Values(self.environment))
        }
    }

    /// Evaluate every pending statement against the current snapshot, then
    /// merge the successes.
    ///
    /// Merging is deferred until all statements of the pass have been
    /// evaluated: results from strictly earlier passes are visible, results
    /// from the same pass are not.
    fn run_pass(&mut self) -> Result<(), ResolveError> {
        self.passes += 1;
        let attempted = self.pending.len();

        let mut successes = Vec::new();
        let mut failures = Vec::with_capacity(attempted);
        for pending in mem::take(&mut self.pending) {
            match self.evaluator.evaluate(pending.text, &self.environment) {
                Ok(bindings) => successes.push(bindings),
                Err(EvalError::Statement(error)) => failures.push(Pending {
                    text: pending.text,
                    last_error: Some(error),
                }),
                Err(EvalError::Fault(fault)) => return Err(ResolveError::Capability(fault)),
            }
        }

        let mut added = 0;
        for bindings in successes {
            let renamed = environment::apply_export_rename(
                bindings,
                &self.options.export_prefix,
                !self.options.export_only_shared,
            );
            added += self.environment.merge(renamed);
        }
        self.pending = failures;

        debug!(
            pass = self.passes,
            attempted,
            added,
            resolved = self.environment.len(),
            pending = self.pending.len(),
            "pass complete"
        );
        Ok(())
    }
}
