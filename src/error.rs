use serde::Serialize;
use thiserror::Error;

/// Terminal failure of a recognition call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecognizeError {
    #[error("Invalid image URI received: {uri}")]
    InvalidUri { uri: String },

    #[error("Failed to load image from URI: {uri} ({reason})")]
    ImageLoad { uri: String, reason: String },

    #[error("Failed to process image: {reason}")]
    Processing { reason: String },
}

impl RecognizeError {
    pub const INVALID_URI: &'static str = "INVALID_URI";
    pub const ERROR_LOADING_IMAGE: &'static str = "ERROR_LOADING_IMAGE";
    pub const ERROR_PROCESSING_IMAGE: &'static str = "ERROR_PROCESSING_IMAGE";

    pub(crate) fn image_load(uri: &str, err: anyhow::Error) -> Self {
        Self::ImageLoad {
            uri: uri.to_string(),
            reason: format!("{:#}", err),
        }
    }

    pub(crate) fn processing(err: anyhow::Error) -> Self {
        Self::Processing {
            reason: format!("{:#}", err),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidUri { .. } => Self::INVALID_URI,
            Self::ImageLoad { .. } => Self::ERROR_LOADING_IMAGE,
            Self::Processing { .. } => Self::ERROR_PROCESSING_IMAGE,
        }
    }

    pub fn to_rejection(&self) -> Rejection {
        Rejection {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

/// Wire form of a [`RecognizeError`] handed to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}
