use thiserror::Error;

/// Failure to produce a catalog snapshot.
///
/// Raised by a [`CatalogSource`](crate::similarity::CatalogSource) when the
/// backing store cannot be reached. The engine never retries: the fail-soft
/// entry points log the error and return an empty result set, the `try_*`
/// variants hand it to the caller.
#[derive(Debug, Error)]
#[error("catalog retrieval failed: {message}")]
pub struct RetrievalError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl RetrievalError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Wrap an underlying store error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
