use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Missing required setting: {0}")]
    MissingConfig(&'static str),

    #[error("Invalid sheet layout: {0}")]
    Layout(String),

    #[error("Failed to read sheet '{sheet}': {message}")]
    Sheet { sheet: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Layout parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("{0}")]
    Http(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<ureq::Error> for Error {
    fn from(e: ureq::Error) -> Self {
        let message = match &e {
            ureq::Error::StatusCode(status) => format!("HTTP {} error", status),
            ureq::Error::Timeout(_) => format!("Request timed out: {}", e),
            ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => {
                format!("Connection failed: {}", e)
            }
            _ => format!("HTTP error: {}", e),
        };
        Error::Http(message)
    }
}
