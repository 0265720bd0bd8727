use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid spot {spot}: {reason}")]
    InvalidSpot { spot: String, reason: String },

    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] InfraError),

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
}

impl DomainError {
    /// Stable, machine-readable error kind for callers that render
    /// their own messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDuration(_) => "invalid_duration",
            Self::InvalidSpot { .. } => "invalid_spot",
            Self::NotFound { .. } => "not_found",
            Self::Storage(_) => "io",
            Self::Scheduling(_) => "scheduling",
        }
    }

    pub fn reservation_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity: "Reservation",
            field: "id",
            value: id.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Rejection from a notification dispatcher.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulingError {
    #[error("Dispatcher rejected reminder for {reservation_id}: {reason}")]
    Rejected {
        reservation_id: String,
        reason: String,
    },

    #[error("Dispatcher unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
