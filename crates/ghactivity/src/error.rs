use chrono::{DateTime, Utc};

use crate::provider::ProviderError;

// -------------------------------------------------------------------------------------------------
// Error
// -------------------------------------------------------------------------------------------------
#[derive(Debug)]
pub enum Error {
    /// A repository full name could not be split into owner and name
    MalformedIdentity(String),

    /// A call to the repository provider failed
    Provider {
        /// What was being requested, e.g., the repository full name
        context: String,
        source: ProviderError,
    },

    /// The run was cancelled before the operation finished
    Cancelled,

    /// Processing panicked
    Panicked(String),

    /// The start of the time window is after its end
    InvalidPeriod {
        since: DateTime<Utc>,
        until: DateTime<Utc>,
    },
}

impl Error {
    pub(crate) fn provider<C: Into<String>>(context: C, source: ProviderError) -> Self {
        Error::Provider {
            context: context.into(),
            source,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedIdentity(n) => write!(f, "invalid repository name format: {n:?}"),
            Error::Provider { context, source } => write!(f, "{context}: {source}"),
            Error::Cancelled => write!(f, "operation was cancelled"),
            Error::Panicked(msg) => write!(f, "processing failed unexpectedly: {msg}"),
            Error::InvalidPeriod { since, until } => {
                write!(f, "invalid time window: {since} is after {until}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::MalformedIdentity(_) => None,
            Error::Provider { source, .. } => Some(source.as_ref()),
            Error::Cancelled => None,
            Error::Panicked(_) => None,
            Error::InvalidPeriod { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
