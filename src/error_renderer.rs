//! Rendering of still-failing statements using ariadne
//!
//! Errors-mode resolution returns the statements left unresolved at the
//! fixpoint. This module renders them as rich reports against the section
//! source they were split from, with source snippets and labels where the
//! statement can be located in the source, and message-only reports where
//! it cannot (e.g. statements supplied directly rather than split from a
//! document).

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use settle_core::resolver::FailedStatement;
use std::io::Write;

/// Render failing statements with rich formatting to stderr.
///
/// # Example
/// ```no_run
/// use settle::calc::Calc;
/// use settle::{Engine, EngineOptions, Environment, Resolution, ResolveOptions, render_failures};
///
/// let engine = Engine::new(Calc, EngineOptions::default());
/// let source = "C = unknown_name;";
/// let options = ResolveOptions { return_errors: true, ..ResolveOptions::default() };
///
/// match engine.resolve_section_with_options(source, Environment::new(), &options) {
///     Ok(Resolution::Failures(failures)) => render_failures(source, &failures),
///     _ => {}
/// }
/// ```
pub fn render_failures(source: &str, failures: &[FailedStatement]) {
    render_failures_to_writer(source, failures, &mut std::io::stderr(), true).ok();
}

/// Render failing statements to a specific writer.
///
/// This is useful when you want to control where the reports are written,
/// such as to a file, a buffer, or a custom output stream.
pub fn render_failures_to(
    source: &str,
    failures: &[FailedStatement],
    writer: &mut dyn Write,
) -> std::io::Result<()> {
    render_failures_to_writer(source, failures, writer, true)
}

/// Render failing statements to a String (useful for tests, web UIs, etc.)
pub fn render_failures_to_string(source: &str, failures: &[FailedStatement]) -> String {
    let mut buf = Vec::new();
    render_failures_to_writer(source, failures, &mut buf, true).ok();
    String::from_utf8_lossy(&buf).to_string()
}

/// Render failing statements to a String without color codes.
///
/// This is the same as `render_failures_to_string` but without ANSI color
/// codes, making the output easier to compare in tests.
pub fn render_failures_to_string_no_color(source: &str, failures: &[FailedStatement]) -> String {
    let mut buf = Vec::new();
    render_failures_to_writer(source, failures, &mut buf, false).ok();
    String::from_utf8_lossy(&buf).to_string()
}

fn render_failures_to_writer(
    source: &str,
    failures: &[FailedStatement],
    writer: &mut dyn Write,
    use_color: bool,
) -> std::io::Result<()> {
    for failure in failures {
        let message = failure.error.to_string();
        let span = source
            .find(failure.statement.as_str())
            .map(|start| start..start + failure.statement.len());

        match span {
            Some(span) => {
                let mut report = Report::build(ReportKind::Error, ("<section>", span.clone()))
                    .with_message(&message)
                    .with_config(Config::default().with_color(use_color));

                report = report.with_label(
                    Label::new(("<section>", span))
                        .with_message("statement could not be resolved")
                        .with_color(Color::Red),
                );

                report
                    .finish()
                    .write(("<section>", Source::from(source)), &mut *writer)?;
            }
            None => {
                writeln!(writer, "error: {}: {}", failure.statement, message)?;
            }
        }
    }

    Ok(())
}
