//! Error types for producer and transformer stages.

use std::sync::Arc;

/// The main error type for pipeline stages.
///
/// Errors travel inside [`StageResult`](crate::result::StageResult) values, so
/// the type is `Clone` and foreign errors are kept behind an `Arc`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// A producer's setup step failed before any item was produced
    #[error("Setup error: {0}")]
    Setup(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// A mapping function failed for one item
    #[error("Transform error: {0}")]
    Transform(#[source] Arc<dyn std::error::Error + Send + Sync>),

    /// The item was intentionally excluded from the result stream.
    ///
    /// Transformers never emit this as a result; it only reaches the
    /// configured error handler.
    #[error("Item skipped")]
    Skip,

    /// A custom error with a message
    #[error("{0}")]
    Custom(String),
}

// Convenience constructors
impl Error {
    /// Create a setup error from any error type
    pub fn setup<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Setup(Arc::new(error))
    }

    /// Create a transform error from any error type
    pub fn transform<E: std::error::Error + Send + Sync + 'static>(error: E) -> Self {
        Error::Transform(Arc::new(error))
    }

    /// Create a custom error with a message
    pub fn custom<S: Into<String>>(message: S) -> Self {
        Error::Custom(message.into())
    }

    /// Returns true if this is the skip sentinel.
    pub fn is_skip(&self) -> bool {
        matches!(self, Error::Skip)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Error {
    fn from(e: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Error::Custom(e.to_string())
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Custom(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Custom(s.to_string())
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, Error>;

/// Helper trait for converting foreign errors into our Error type
pub trait IntoError<T> {
    fn into_setup_error(self) -> Result<T>;
    fn into_transform_error(self) -> Result<T>;
}

impl<T, E> IntoError<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn into_setup_error(self) -> Result<T> {
        self.map_err(Error::setup)
    }

    fn into_transform_error(self) -> Result<T> {
        self.map_err(Error::transform)
    }
}
