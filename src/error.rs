#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("command may not be empty")]
    EmptyCommand,

    #[error("Failed to load AWS configuration: {0}")]
    ConfigLoad(String),

    #[error("Failed to assume role: {0}")]
    AssumeRole(String),

    #[error("operation cancelled")]
    Cancelled,

    #[error("deadline exceeded")]
    DeadlineExceeded,

    #[error(transparent)]
    StdIoError(#[from] std::io::Error),
}

impl Error {
    /// Whether the error was caused by the caller's input rather than AWS or the network.
    pub fn is_usage_error(&self) -> bool {
        matches!(*self, Self::EmptyCommand)
    }
}
