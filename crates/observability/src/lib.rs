//! Tracing and logging setup shared by the storefront binaries.

/// Initialize process-wide tracing in the given format.
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init(format: LogFormat) {
    tracing::init(format);
}

/// Tracing configuration (filter, output format).
pub mod tracing;

pub use self::tracing::LogFormat;
