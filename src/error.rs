use thiserror::Error;

/// Error type an implementor of [`crate::RemoteTransport`] may carry its
/// driver-native failure in.
pub type TransportError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum RemoteSqlError {
    /// A named placeholder had no value in the runtime bag. Raised before any
    /// transport activity.
    #[error("Missing value for placeholder: {0}")]
    MissingPlaceholderValue(String),

    /// The transport callback failed. Displays as the underlying error so the
    /// caller sees the transport's own failure, unwrapped.
    #[error("{0}")]
    TransportFailure(TransportError),

    /// A raw row carried fewer positional values than the statement selected
    /// fields. Contract violation between dialect and transport.
    #[error("Result row has {actual} columns but {expected} fields were selected")]
    MappingMismatch { expected: usize, actual: usize },
}

impl RemoteSqlError {
    /// Wrap a driver-native error as a transport failure.
    pub fn transport(err: impl Into<TransportError>) -> Self {
        RemoteSqlError::TransportFailure(err.into())
    }
}
