use reqwest::StatusCode;
use thiserror::Error;

/// Anything that prevents a turn from producing new narrative.
///
/// The controller treats every variant the same way; the split only exists so
/// diagnostics say what went wrong.
#[derive(Debug, Error)]
pub enum SubmissionFailure {
    #[error("story backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("story backend returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("malformed story payload: {0}")]
    MalformedPayload(String),
}
