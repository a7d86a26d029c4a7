// Error types shared by the payload builder, the HTTP client and the
// upload controller. Validation errors block a submission before any
// network call; submit errors end a submission after it started.

use thiserror::Error;

/// Problems found while building a payload. These are shown to the user
/// as an alert and no request is sent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Must choose an image file")]
    NoImageSelected,

    #[error("Must choose a zip file")]
    NoZipSelected,

    #[error("Cannot have 0x0 image. Specify at least one dimension")]
    ZeroDimensions,

    #[error("{0} is not a valid min size, expected WIDTHxHEIGHT such as 200x400")]
    InvalidMinSize(String),

    #[error("multiplier must be between 1 and 4, got {0}")]
    InvalidMultiplier(u8),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),
}

/// Failures after validation passed. The `Display` text is what ends up
/// in the status line.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("could not read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("No faces detected!")]
    NoFaces,

    #[error("An error occurred")]
    Http(u16),

    #[error("{0}")]
    Transport(String),

    #[error("could not save download: {0}")]
    Save(#[source] std::io::Error),
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_texts_match_page_messages() {
        assert_eq!(SubmitError::NoFaces.to_string(), "No faces detected!");
        assert_eq!(SubmitError::Http(500).to_string(), "An error occurred");
        assert_eq!(SubmitError::Http(400).to_string(), "An error occurred");
    }

    #[test]
    fn validation_texts() {
        assert_eq!(
            ValidationError::NoImageSelected.to_string(),
            "Must choose an image file"
        );
        assert_eq!(
            ValidationError::ZeroDimensions.to_string(),
            "Cannot have 0x0 image. Specify at least one dimension"
        );
    }
}
