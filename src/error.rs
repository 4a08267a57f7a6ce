use thiserror::Error;

/// Failure taxonomy for every operation that touches an external capability.
///
/// Each variant renders as user-facing text; callers surface these as
/// warnings or feedback rather than letting them escape as panics.
#[derive(Debug, Error)]
pub enum CoachError {
    #[error("the coach is still starting up; please try again in a moment")]
    NotReady,
    #[error("{0}")]
    Validation(String),
    #[error("malformed coach reply: {0}")]
    MalformedResponse(String),
    #[error("coach request failed: {0}")]
    Transport(String),
    #[error("speech recognition is not available in this environment")]
    UnsupportedCapability,
}

impl From<reqwest::Error> for CoachError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CoachError::MalformedResponse(err.to_string())
        } else {
            CoachError::Transport(err.to_string())
        }
    }
}
