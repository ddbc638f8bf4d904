//! Process-wide logging setup shared by the binaries.

pub mod logging;

pub use logging::LogFormat;

/// Initialize logging with the format chosen by `STOREDESK_LOG_FORMAT`.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    logging::init(LogFormat::from_env());
}
