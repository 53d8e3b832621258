use thiserror::Error;

/// The central error type for termfolio.
///
/// Animation drivers have no error path; everything here comes from the
/// friend-request round trip, configuration, or the terminal host.
#[derive(Error, Debug)]
pub enum TermfolioError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Submission failed: {0}")]
    Submission(#[from] SubmissionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Transport or protocol failure talking to the friend-request endpoint.
///
/// Every variant is reported to the user the same way; the distinction only
/// matters for logs.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request timed out")]
    Timeout,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Terminal outcome of a failed submission, carrying the user-visible message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("{}", crate::submission::VALIDATION_MESSAGE)]
    Validation,

    #[error("{0}")]
    Rejected(String),

    #[error("{}", crate::submission::FATAL_MESSAGE)]
    Transport,
}

pub type Result<T> = std::result::Result<T, TermfolioError>;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_CONFIG_ERROR: u8 = 2;
pub const EXIT_VALIDATION_ERROR: u8 = 3;
pub const EXIT_API_ERROR: u8 = 4;

fn submission_exit_code(e: &SubmissionError) -> u8 {
    match e {
        SubmissionError::Validation => EXIT_VALIDATION_ERROR,
        SubmissionError::Rejected(_) | SubmissionError::Transport => EXIT_API_ERROR,
    }
}

/// Determine the appropriate process exit code for an error.
pub fn get_exit_code(e: &anyhow::Error) -> u8 {
    if let Some(err) = e.downcast_ref::<TermfolioError>() {
        return match err {
            TermfolioError::Config(_) => EXIT_CONFIG_ERROR,
            TermfolioError::Api(_) => EXIT_API_ERROR,
            TermfolioError::Submission(inner) => submission_exit_code(inner),
            _ => EXIT_ERROR,
        };
    }

    // Direct enum unwraps fallback
    if let Some(err) = e.downcast_ref::<SubmissionError>() {
        return submission_exit_code(err);
    }
    if e.downcast_ref::<ApiError>().is_some() {
        return EXIT_API_ERROR;
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("config") {
        return EXIT_CONFIG_ERROR;
    }

    EXIT_ERROR
}
