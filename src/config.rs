//! Configuration management for the resume optimizer

use crate::error::{Result, ResumeOptimizerError};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub enhancement: EnhancementConfig,
    pub scraper: ScraperConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_file_size_mb: u64,
    /// Minimum characters a resume must yield after extraction
    pub min_extracted_chars: usize,
    pub enable_cache: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
    pub output_dir: PathBuf,
    pub template: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhancementConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Markdown,
    Html,
    Pdf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
            min_extracted_chars: 100,
            enable_cache: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
            output_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("resume-optimizer")
                .join("optimized"),
            template: "ats_modern".to_string(),
        }
    }
}

impl Default for EnhancementConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: "https://api.perplexity.ai/chat/completions".to_string(),
            model: "sonar".to_string(),
            api_key_env: "PERPLEXITY_API_KEY".to_string(),
            timeout_secs: 60,
            max_retries: 3,
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

impl EnhancementConfig {
    /// API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    /// Load from the default location, writing defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| ResumeOptimizerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Write through a temp file in the same directory so a crash never
    /// leaves a truncated config behind
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        let content = toml::to_string_pretty(self)
            .map_err(|e| ResumeOptimizerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        let mut file = tempfile::NamedTempFile::new_in(&parent)?;
        file.write_all(content.as_bytes())?;
        file.persist(path).map_err(|e| ResumeOptimizerError::Io(e.error))?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-optimizer")
            .join("config.toml")
    }

    /// Set a dotted key such as `output.detailed` or `enhancement.model`.
    ///
    /// The new value is parsed according to the type of the existing one.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        let (section, field) = key.split_once('.').ok_or_else(|| {
            ResumeOptimizerError::Configuration(format!("Key must look like 'section.field': {}", key))
        })?;

        let mut root = toml::Value::try_from(&*self)
            .map_err(|e| ResumeOptimizerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        let slot = root
            .get_mut(section)
            .and_then(|table| table.get_mut(field))
            .ok_or_else(|| ResumeOptimizerError::Configuration(format!("Unknown configuration key: {}", key)))?;

        let parsed = parse_like(slot, value).ok_or_else(|| {
            ResumeOptimizerError::Configuration(format!(
                "Invalid value '{}' for {} (expected {})",
                value,
                key,
                slot.type_str()
            ))
        })?;
        *slot = parsed;

        *self = root
            .try_into()
            .map_err(|e| ResumeOptimizerError::Configuration(format!("Invalid value for {}: {}", key, e)))?;
        Ok(())
    }
}

fn parse_like(current: &toml::Value, raw: &str) -> Option<toml::Value> {
    match current {
        toml::Value::Boolean(_) => raw.parse().ok().map(toml::Value::Boolean),
        toml::Value::Integer(_) => raw.parse().ok().map(toml::Value::Integer),
        toml::Value::Float(_) => raw.parse().ok().map(toml::Value::Float),
        toml::Value::String(_) => Some(toml::Value::String(raw.to_string())),
        _ => None,
    }
}
