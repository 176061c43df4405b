use std::fmt;

/// SDK-specific error types.
#[derive(Debug, Clone)]
pub enum ApiError {
    /// Response arrived but lacked the expected payload shape.
    JsonError(String),
    /// Caller supplied insufficient or invalid arguments.
    IncorrectParameters(String),
    /// Server-reported failure with a machine-readable code.
    BackendError {
        /// Opaque backend error code.
        code: i64,
        /// Optional human-readable reason.
        reason: Option<String>,
    },
    /// Network or protocol-level failure from the transport.
    Transport(String),
    /// The session or developer token was rejected.
    Unauthorized(String),
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<ApiError>,
        /// Additional context message.
        context: String,
    },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::JsonError(msg) => write!(f, "Malformed response: {}", msg),
            ApiError::IncorrectParameters(msg) => write!(f, "Incorrect parameters: {}", msg),
            ApiError::BackendError { code, reason } => match reason {
                Some(reason) => write!(f, "Backend error {}: {}", code, reason),
                None => write!(f, "Backend error {}", code),
            },
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `ApiError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, ApiError>;

    /// Add context lazily (only evaluated on error).
    fn with_context<F>(self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T, ApiError> {
    fn context(self, context: impl Into<String>) -> Result<T, ApiError> {
        self.map_err(|e| ApiError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }

    fn with_context<F>(self, f: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| ApiError::WithContext {
            source: Box::new(e),
            context: f(),
        })
    }
}
