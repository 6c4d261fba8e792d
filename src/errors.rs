use thiserror::Error;

/// Infrastructure-level failures: listener bootstrap, socket plumbing.
///
/// Protocol-level problems (bad nickname, bad arguments, unknown command,
/// ...) are never modeled as `Err` here. Per the wire protocol they are
/// reported to the offending client as a single sentinel frame and the
/// session continues. See `replies::Reply` and the `wire` sentinel
/// constants for those.
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("failed to bind listener on {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to start logger: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
