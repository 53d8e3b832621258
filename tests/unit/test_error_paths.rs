//! Unit tests for error classification and exit codes

use termfolio::errors::{
    get_exit_code, ApiError, SubmissionError, TermfolioError, EXIT_API_ERROR, EXIT_CONFIG_ERROR,
    EXIT_ERROR, EXIT_VALIDATION_ERROR,
};
use termfolio::submission::{FATAL_MESSAGE, VALIDATION_MESSAGE};

#[test]
fn test_submission_errors_display_user_messages() {
    assert_eq!(SubmissionError::Validation.to_string(), VALIDATION_MESSAGE);
    assert_eq!(SubmissionError::Transport.to_string(), FATAL_MESSAGE);
    assert_eq!(
        SubmissionError::Rejected("UID NOT FOUND".into()).to_string(),
        "UID NOT FOUND"
    );
}

#[test]
fn test_exit_codes_by_class() {
    let validation: anyhow::Error = TermfolioError::from(SubmissionError::Validation).into();
    let rejected: anyhow::Error =
        TermfolioError::from(SubmissionError::Rejected("no".into())).into();
    let api: anyhow::Error = ApiError::Timeout.into();
    let config: anyhow::Error = TermfolioError::Config("bad".into()).into();
    let other = anyhow::anyhow!("something else");

    assert_eq!(get_exit_code(&validation), EXIT_VALIDATION_ERROR);
    assert_eq!(get_exit_code(&rejected), EXIT_API_ERROR);
    assert_eq!(get_exit_code(&api), EXIT_API_ERROR);
    assert_eq!(get_exit_code(&config), EXIT_CONFIG_ERROR);
    assert_eq!(get_exit_code(&other), EXIT_ERROR);
}

#[test]
fn test_context_does_not_hide_class() {
    let err = anyhow::Error::from(TermfolioError::from(SubmissionError::Transport))
        .context("while sending");
    assert_eq!(get_exit_code(&err), EXIT_API_ERROR);
}
