//! CLI interface for the resume optimizer

use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-optimizer")]
#[command(version)]
#[command(about = "Heuristic resume and job description matching tool")]
#[command(long_about = "Score a resume against a job description with catalog-based skill matching, \
ATS heuristics and prioritized suggestions, then render an optimized resume")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        #[command(flatten)]
        job: JobSource,

        /// Output format: console, json, markdown, html, pdf
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Show matched and missing lists and extracted facts
        #[arg(short, long)]
        detailed: bool,

        /// Ask the configured AI provider for extra suggestions and content
        #[arg(long)]
        enhance: bool,

        /// Render an optimized resume document
        #[arg(long)]
        render: bool,

        /// Template for the rendered resume (see `templates`)
        #[arg(short, long)]
        template: Option<String>,
    },

    /// Extract facts from a single resume or job description
    Facts {
        /// Path to the document (PDF, TXT, MD)
        #[arg(short, long)]
        input: PathBuf,

        /// Kind of document
        #[arg(short, long, value_enum, default_value_t = DocumentKind::Resume)]
        kind: DocumentKind,

        /// Output format: console or json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Scrape a job posting and print it
    Scrape {
        /// Job posting URL
        #[arg(short, long)]
        url: String,
    },

    /// List available resume templates
    Templates,

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Where the job description comes from; exactly one is required
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct JobSource {
    /// Path to job description file (TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description text
    #[arg(long)]
    pub job_text: Option<String>,

    /// Job posting URL to scrape
    #[arg(long)]
    pub job_url: Option<String>,
}

impl JobSource {
    /// Human-readable origin for report metadata
    pub fn describe(&self) -> String {
        match (&self.job, &self.job_url) {
            (Some(path), _) => path.display().to_string(),
            (None, Some(url)) => url.clone(),
            (None, None) => "inline text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DocumentKind {
    Resume,
    Job,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "output.template")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        "pdf" => Ok(OutputFormat::Pdf),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html, pdf", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert_eq!(parse_output_format("pdf"), Ok(OutputFormat::Pdf));
        assert!(parse_output_format("docx").unwrap_err().contains("docx"));
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["pdf", "txt", "md"];
        assert!(validate_file_extension(Path::new("resume.PDF"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("resume.docx"), &allowed).is_err());
        assert_eq!(
            validate_file_extension(Path::new("resume"), &allowed),
            Err("File has no extension".to_string())
        );
    }

    #[test]
    fn test_job_source_is_exclusive() {
        let parsed = Cli::try_parse_from([
            "resume-optimizer", "analyze", "--resume", "r.txt", "--job", "j.txt", "--job-url", "https://x.io",
        ]);
        assert!(parsed.is_err());

        let parsed = Cli::try_parse_from(["resume-optimizer", "analyze", "--resume", "r.txt"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["resume-optimizer", "analyze", "-r", "r.txt", "--job-text", "Rust engineer"])
            .unwrap();
        match cli.command {
            Commands::Analyze { job, .. } => assert_eq!(job.describe(), "inline text"),
            _ => panic!("expected analyze"),
        }
    }
}
