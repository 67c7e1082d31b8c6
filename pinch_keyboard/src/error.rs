use thiserror::Error;

/// Failure to obtain the next frame from the capture/detector collaborator.
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("camera stream ended")]
    EndOfStream,

    #[error("capture I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed detector record: {0}")]
    Malformed(String),

    #[error("no detector command given")]
    EmptyCommand,

    #[error("failed to start detector `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

impl CaptureError {
    /// Whether reading the next frame may succeed after this error.
    /// Only a bad record is worth retrying; the stream itself is still intact.
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::Malformed(_))
    }
}

impl From<serde_json::Error> for CaptureError {
    fn from(e: serde_json::Error) -> Self {
        CaptureError::Malformed(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("window error: {0}")]
    Window(String),

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

impl From<minifb::Error> for AppError {
    fn from(e: minifb::Error) -> Self {
        AppError::Window(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
