use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenError {
    #[error("Configuration error: environment variable {0} is not set")]
    MissingCredential(&'static str),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Reference image not found: {}", .0.display())]
    ReferenceNotFound(PathBuf),
    #[error("Failed to decode image {}: {source}", path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to write image {}: {source}", path.display())]
    ImageEncode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error ({status}): {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl GenError {
    /// True for failures that happen before anything is sent to the API.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            GenError::MissingCredential(_)
                | GenError::Config(_)
                | GenError::ReferenceNotFound(_)
                | GenError::ImageDecode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, GenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = GenError::MissingCredential("GEMINI_API_KEY");
        assert_eq!(
            err.to_string(),
            "Configuration error: environment variable GEMINI_API_KEY is not set"
        );

        let err = GenError::ReferenceNotFound(PathBuf::from("/tmp/missing.png"));
        assert_eq!(err.to_string(), "Reference image not found: /tmp/missing.png");
    }

    #[test]
    fn test_local_errors() {
        assert!(GenError::MissingCredential("GEMINI_API_KEY").is_local());
        assert!(GenError::ReferenceNotFound(PathBuf::from("a.png")).is_local());
        assert!(!GenError::ResponseError("bad".into()).is_local());
    }
}
