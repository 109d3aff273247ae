use thiserror::Error;

/// Which stage of a submission failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing input, caught before anything is sent.
    Validation,
    /// The call never produced a response (unreachable host, timeout, dropped body).
    Transport,
    /// The service answered with a non-success status.
    Service,
    /// The service answered with success but the body is not a playlist.
    Parse,
}

impl ErrorKind {
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Invalid input",
            ErrorKind::Transport => "Connection error",
            ErrorKind::Service => "Service error",
            ErrorKind::Parse => "Unexpected response",
        }
    }
}

/// Failure of a single playlist submission.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("city and mood are required")]
    Validation,

    #[error("could not reach the playlist service: {0}")]
    Transport(String),

    #[error("playlist service responded with {status}")]
    Service { status: String },

    #[error("could not read the playlist response: {0}")]
    Parse(String),
}

impl PlaylistError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            PlaylistError::Validation => ErrorKind::Validation,
            PlaylistError::Transport(_) => ErrorKind::Transport,
            PlaylistError::Service { .. } => ErrorKind::Service,
            PlaylistError::Parse(_) => ErrorKind::Parse,
        }
    }
}
