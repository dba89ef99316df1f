//! Combined analysis report

use crate::enhance::{merge_suggestions, Enhancement, OptimizedContent};
use crate::processing::facts::Facts;
use crate::processing::scorer::MatchResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything one `analyze` run produced, ready for any formatter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    pub resume: Facts,
    pub job: Facts,
    pub match_result: MatchResult,

    /// Heuristic suggestions followed by deduplicated AI items
    pub suggestions: Vec<String>,

    /// Raw AI action items, empty when enhancement was off or failed
    pub ai_suggestions: Vec<String>,
    pub optimized_content: Option<OptimizedContent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    pub resume_source: String,
    pub job_source: String,
    pub processing_time_ms: u64,
    pub enhancement_used: bool,
}

impl ReportMetadata {
    pub fn new(resume_source: impl Into<String>, job_source: impl Into<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_source: resume_source.into(),
            job_source: job_source.into(),
            processing_time_ms: 0,
            enhancement_used: false,
        }
    }
}

impl AnalysisReport {
    pub fn new(
        metadata: ReportMetadata,
        resume: Facts,
        job: Facts,
        match_result: MatchResult,
        suggestions: Vec<String>,
    ) -> Self {
        Self {
            metadata,
            resume,
            job,
            match_result,
            suggestions,
            ai_suggestions: Vec::new(),
            optimized_content: None,
        }
    }

    /// Fold provider output into the report without touching any score
    pub fn apply_enhancement(&mut self, enhancement: Enhancement) {
        self.metadata.enhancement_used =
            !enhancement.ai_suggestions.is_empty() || enhancement.optimized_content.is_some();
        self.suggestions = merge_suggestions(&self.suggestions, &enhancement.ai_suggestions);
        self.ai_suggestions = enhancement.ai_suggestions;
        self.optimized_content = enhancement.optimized_content;
    }

    pub fn with_processing_time(mut self, processing_time_ms: u64) -> Self {
        self.metadata.processing_time_ms = processing_time_ms;
        self
    }

    /// Skills the job wants that the resume lacks, technical first
    pub fn missing_skills(&self) -> impl Iterator<Item = &String> {
        self.match_result
            .missing_technical_skills
            .iter()
            .chain(self.match_result.missing_soft_skills.iter())
    }
}
