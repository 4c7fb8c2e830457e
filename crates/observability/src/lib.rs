//! Tracing/logging setup shared by the quickbill binaries.

/// Initialize process-wide logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Tracing configuration (filter, writer, format).
pub mod tracing;
