use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Logger initialization failed: {message}")]
    Logger { message: String },

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<log::SetLoggerError> for ServerError {
    fn from(e: log::SetLoggerError) -> Self {
        Self::Logger {
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
