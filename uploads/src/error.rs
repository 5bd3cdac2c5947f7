use std::fmt;

/// Why fetching a page of uploads failed.
///
/// Every variant is terminal for the call that produced it; nothing is retried internally.
/// Only [`FetchError::Upstream`] may succeed if the same call is repeated.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("error creating YouTube client: {0}")]
    Initialization(String),

    #[error("{0}")]
    NotFound(String),

    #[error("page {page} is beyond the available results")]
    OutOfRange { page: i64 },

    /// A transport or API failure. `message` holds the full cause chain.
    #[error("{context}: {message}")]
    Upstream {
        context: &'static str,
        message: String,
    },

    #[error("request was cancelled")]
    Cancelled,
}

/// The category of a [`FetchError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    Initialization,
    NotFound,
    OutOfRange,
    Upstream,
    Cancelled,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::InvalidArgument => "invalid argument",
            ErrorKind::Initialization => "initialization error",
            ErrorKind::NotFound => "not found",
            ErrorKind::OutOfRange => "out of range",
            ErrorKind::Upstream => "upstream error",
            ErrorKind::Cancelled => "cancelled",
        })
    }
}

impl FetchError {
    pub(crate) fn upstream(context: &'static str, report: eyre::Report) -> Self {
        FetchError::Upstream {
            context,
            message: format!("{report:#}"),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            FetchError::Initialization(_) => ErrorKind::Initialization,
            FetchError::NotFound(_) => ErrorKind::NotFound,
            FetchError::OutOfRange { .. } => ErrorKind::OutOfRange,
            FetchError::Upstream { .. } => ErrorKind::Upstream,
            FetchError::Cancelled => ErrorKind::Cancelled,
        }
    }

    /// Whether the same request could succeed if issued again later.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Upstream
    }
}
