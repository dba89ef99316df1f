//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{Result, ResumeOptimizerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size_mb: u64,
    min_resume_chars: usize,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_cache,
            max_file_size_mb: config.max_file_size_mb,
            min_resume_chars: config.min_extracted_chars,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub fn with_limits(mut self, max_file_size_mb: u64, min_resume_chars: usize) -> Self {
        self.max_file_size_mb = max_file_size_mb;
        self.min_resume_chars = min_resume_chars;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                debug!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeOptimizerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        self.check_size(path).await?;

        let file_type = FileType::from_path(path);
        info!("Reading {} file: {}", file_type.label(), path.display());

        let text = match file_type {
            FileType::Pdf => PdfExtractor.extract(path).await?,
            FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => MarkdownExtractor.extract(path).await?,
            FileType::Unknown => {
                return Err(ResumeOptimizerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {} (expected .pdf, .txt or .md)",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Extract a resume and reject ones too short to analyze
    pub async fn extract_resume(&mut self, path: &Path) -> Result<String> {
        let text = self.extract_text(path).await?;
        let length = text.trim().chars().count();

        if length < self.min_resume_chars {
            return Err(ResumeOptimizerError::InvalidInput(format!(
                "Resume file contains insufficient text ({} characters, minimum {})",
                length, self.min_resume_chars
            )));
        }
        Ok(text)
    }

    async fn check_size(&self, path: &Path) -> Result<()> {
        let size_mb = tokio::fs::metadata(path).await?.len() as f64 / BYTES_PER_MB;

        if size_mb > self.max_file_size_mb as f64 {
            return Err(ResumeOptimizerError::FileTooLarge {
                size_mb,
                limit_mb: self.max_file_size_mb,
            });
        }
        Ok(())
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_file(suffix: &str, content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[tokio::test]
    async fn test_file_too_large() {
        let file = temp_file(".txt", &vec![b'a'; 2 * 1024 * 1024]);
        let mut manager = InputManager::new().with_limits(1, 100);

        let err = manager.extract_text(file.path()).await.unwrap_err();
        assert!(matches!(err, ResumeOptimizerError::FileTooLarge { limit_mb: 1, .. }));
    }

    #[tokio::test]
    async fn test_short_resume_rejected() {
        let file = temp_file(".txt", b"Jane Doe, engineer");
        let mut manager = InputManager::new();

        let err = manager.extract_resume(file.path()).await.unwrap_err();
        assert!(matches!(err, ResumeOptimizerError::InvalidInput(_)));
        assert!(err.to_string().contains("insufficient text"));
    }

    #[tokio::test]
    async fn test_cache_disabled() {
        let file = temp_file(".txt", b"some text");
        let mut manager = InputManager::new().with_cache(false);

        manager.extract_text(file.path()).await.unwrap();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_clear_cache() {
        let file = temp_file(".md", b"# Title\n\nBody");
        let mut manager = InputManager::new();

        assert_eq!(manager.extract_text(file.path()).await.unwrap(), "Title\nBody");
        assert_eq!(manager.cache_size(), 1);
        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_unknown_extension() {
        let file = temp_file(".docx", b"binary");
        let mut manager = InputManager::new();

        let err = manager.extract_text(file.path()).await.unwrap_err();
        assert!(matches!(err, ResumeOptimizerError::UnsupportedFormat(_)));
    }
}
