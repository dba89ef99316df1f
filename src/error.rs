//! Error handling for the resume optimizer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeOptimizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("No extractable text: {0}")]
    NoExtractableText(String),

    #[error("{subject} is too short for meaningful analysis (minimum {minimum} characters required)")]
    InputTooShort { subject: String, minimum: usize },

    #[error("Malformed catalog pattern '{pattern}': {reason}")]
    MalformedPattern { pattern: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("File too large: {size_mb:.1} MB exceeds the {limit_mb} MB limit")]
    FileTooLarge { size_mb: f64, limit_mb: u64 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Enhancement error: {0}")]
    Enhancement(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Rendering error: {0}")]
    Rendering(String),
}

pub type Result<T> = std::result::Result<T, ResumeOptimizerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeOptimizerError {
    fn from(err: anyhow::Error) -> Self {
        ResumeOptimizerError::Processing(format!("{:#}", err))
    }
}

impl From<reqwest::Error> for ResumeOptimizerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ResumeOptimizerError::Network(
                "Request timeout - the website took too long to respond".to_string(),
            )
        } else if err.is_connect() {
            ResumeOptimizerError::Network(
                "Connection error - unable to reach the website".to_string(),
            )
        } else {
            ResumeOptimizerError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_too_short_names_minimum() {
        let err = ResumeOptimizerError::InputTooShort {
            subject: "Resume text".to_string(),
            minimum: 50,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Resume text is too short"));
        assert!(msg.contains("50"));
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: ResumeOptimizerError = anyhow::anyhow!("boom").into();
        assert!(matches!(err, ResumeOptimizerError::Processing(_)));
    }
}
