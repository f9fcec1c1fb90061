//! Configuration options for the Settle engine.

pub use crate::resolver::ResolveOptions;

/// Configuration options for the engine.
///
/// These set the defaults for resolution, which can be overridden on a
/// per-call basis.
///
/// # Example
///
/// ```
/// use settle_core::api::{EngineOptions, ResolveOptions};
///
/// let options = EngineOptions {
///     default_resolve_options: ResolveOptions {
///         return_errors: true,
///         ..ResolveOptions::default()
///     },
/// };
/// ```
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Default options for resolution.
    ///
    /// These can be overridden when calling the `*_with_options` engine
    /// methods.
    pub default_resolve_options: ResolveOptions,
}
