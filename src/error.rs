//! Error types for the registration core.

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the backend REST boundary (file upload, submission).
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Request to {endpoint} failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    #[error("Server rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Wizard state-machine errors. These are user-facing warnings: the
/// controller refuses the operation and leaves its state untouched.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("At least {minimum} {label}(s) are required; cannot remove")]
    BelowMinimumParties { label: String, minimum: usize },

    #[error("At most {maximum} {label}(s) are allowed; cannot add another")]
    PartyLimitReached { label: String, maximum: usize },

    #[error("No {label} at index {index} (have {len})")]
    IndexOutOfRange {
        label: String,
        index: usize,
        len: usize,
    },

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("This application has already been submitted")]
    AlreadySubmitted,

    #[error("Submission is only available from the Payment step")]
    NotOnPaymentStep,

    #[error("Select a plan before submitting")]
    NoPlanSelected,
}

/// Result type alias for the registration core.
pub type Result<T> = std::result::Result<T, Error>;
