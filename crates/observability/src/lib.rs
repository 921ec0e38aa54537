//! Tracing/logging setup shared by the console binaries.

/// Tracing configuration (filters, output format).
pub mod tracing;

pub use self::tracing::LogFormat;

/// Initialize process-wide tracing, format chosen by `WARDEN_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    let format = LogFormat::parse(std::env::var("WARDEN_LOG_FORMAT").ok().as_deref());
    tracing::init(format);
}
