/// Errors from the external judge capability.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("judge transport failure: {0}")]
    Transport(String),
    #[error("judge returned status {status}: {body}")]
    BadStatus { status: u16, body: String },
    #[error("judge returned an unparseable verdict: {0}")]
    MalformedVerdict(String),
    #[error("no verdict configured for test '{0}'")]
    NoVerdict(String),
}

impl From<reqwest::Error> for JudgeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
