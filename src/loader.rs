//! Loading sources into environments.
//!
//! The loader is thin glue around the core: it acquires raw bytes, decodes
//! them to text with normalized line endings, and dispatches to the
//! fixpoint resolver (section mode) or to a single direct evaluation
//! (expression mode). The core never sees how text was acquired or
//! decoded.

use miette::Diagnostic;
use settle_core::api::{Engine, Error as EngineError};
use settle_core::environment::{Bindings, Environment};
use settle_core::resolver::{Evaluate, FailedStatement, Resolution, ResolveOptions};
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// How the loaded text is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Evaluate the whole text as one statement, bypassing the fixpoint.
    Expression,

    /// Split the text into statements and resolve them to a fixpoint.
    Section,
}

/// Errors from acquiring or decoding a source, or a fatal resolution error.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("failed to read '{path}'")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("source is not valid UTF-8")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// Result of a load.
#[derive(Debug)]
pub enum Loaded<V> {
    /// Section mode, values: the resolved environment.
    Environment(Environment<V>),

    /// Section mode, errors: the statements still failing at the fixpoint.
    Failures(Vec<FailedStatement>),

    /// Expression mode: the bindings of the single evaluated statement.
    Value(Bindings<V>),
}

/// Load a file and resolve it against `base` with the engine's default
/// options.
pub fn load_path<E: Evaluate>(
    engine: &Engine<E>,
    path: &Path,
    base: Environment<E::Value>,
    mode: LoadMode,
) -> Result<Loaded<E::Value>, LoadError> {
    load_path_with_options(
        engine,
        path,
        base,
        mode,
        &engine.options().default_resolve_options,
    )
}

/// Load a file and resolve it against `base` with custom options.
pub fn load_path_with_options<E: Evaluate>(
    engine: &Engine<E>,
    path: &Path,
    base: Environment<E::Value>,
    mode: LoadMode,
    options: &ResolveOptions,
) -> Result<Loaded<E::Value>, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = decode(bytes)?;
    load_str_with_options(engine, &text, base, mode, options)
}

/// Load already-acquired text and resolve it against `base` with the
/// engine's default options.
pub fn load_str<E: Evaluate>(
    engine: &Engine<E>,
    text: &str,
    base: Environment<E::Value>,
    mode: LoadMode,
) -> Result<Loaded<E::Value>, LoadError> {
    load_str_with_options(
        engine,
        text,
        base,
        mode,
        &engine.options().default_resolve_options,
    )
}

/// Load already-acquired text and resolve it against `base` with custom
/// options.
pub fn load_str_with_options<E: Evaluate>(
    engine: &Engine<E>,
    text: &str,
    base: Environment<E::Value>,
    mode: LoadMode,
    options: &ResolveOptions,
) -> Result<Loaded<E::Value>, LoadError> {
    let text = normalize_line_endings(text);
    match mode {
        LoadMode::Expression => {
            let bindings = engine.evaluate_expression(text.trim(), &base)?;
            Ok(Loaded::Value(bindings))
        }
        LoadMode::Section => {
            match engine.resolve_section_with_options(text.as_ref(), base, options)? {
                Resolution::Values(env) => Ok(Loaded::Environment(env)),
                Resolution::Failures(failures) => Ok(Loaded::Failures(failures)),
            }
        }
    }
}

/// Normalize `\r\n` and bare `\r` line endings to `\n`.
///
/// Borrows the input unchanged when it contains no carriage returns.
pub fn normalize_line_endings(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') {
        return Cow::Borrowed(text);
    }
    let mut normalized = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            normalized.push('\n');
        } else {
            normalized.push(ch);
        }
    }
    Cow::Owned(normalized)
}

fn decode(bytes: Vec<u8>) -> Result<String, LoadError> {
    let mut text = String::from_utf8(bytes)?;
    if text.starts_with('\u{feff}') {
        text.drain(..'\u{feff}'.len_utf8());
    }
    Ok(text)
}
