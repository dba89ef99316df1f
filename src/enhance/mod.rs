//! Optional AI enhancement of the heuristic analysis.
//!
//! Everything here is additive: a failed or disabled provider leaves the
//! heuristic report untouched.

pub mod client;
pub mod prompts;

pub use client::{ChatCompletionsClient, EnhancementError};

use crate::processing::analyzer::MIN_TEXT_CHARS;
use crate::processing::facts::Facts;
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;
use std::future::Future;

/// AI items appended after the heuristic suggestions
pub const MAX_AI_SUGGESTIONS: usize = 5;

/// Job facts as reported by a provider. Every field is optional because
/// model output is not trusted to be complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiJobFacts {
    #[serde(deserialize_with = "lenient_string")]
    pub job_title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub company_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub experience_required: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub education_requirements: Option<String>,
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub responsibilities: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub clean_job_description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizedContent {
    pub professional_summary: String,
    pub optimized_experience_bullets: Vec<String>,
    pub key_achievements: Vec<String>,
    pub skills_summary: String,
    pub cover_letter_opener: String,
}

pub trait EnhancementProvider {
    fn analyze_job(&self, url: &str) -> impl Future<Output = Result<AiJobFacts, EnhancementError>> + Send;

    fn optimize_content(
        &self,
        resume: &Facts,
        job: &Facts,
    ) -> impl Future<Output = Result<OptimizedContent, EnhancementError>> + Send;

    fn recommend_actions(
        &self,
        resume_text: &str,
        job_text: &str,
    ) -> impl Future<Output = Result<Vec<String>, EnhancementError>> + Send;
}

/// What a provider added to one analysis
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enhancement {
    pub ai_suggestions: Vec<String>,
    pub optimized_content: Option<OptimizedContent>,
}

/// Ask the provider for action items and optimized content. Failures are
/// logged and leave the corresponding part empty.
pub async fn enhance<P: EnhancementProvider>(
    provider: &P,
    resume_text: &str,
    job_text: &str,
    resume: &Facts,
    job: &Facts,
) -> Enhancement {
    let ai_suggestions = match provider.recommend_actions(resume_text, job_text).await {
        Ok(items) => {
            info!("Provider returned {} action items", items.len());
            items
        }
        Err(e) => {
            warn!("AI recommendations unavailable: {}", e);
            Vec::new()
        }
    };

    let optimized_content = match provider.optimize_content(resume, job).await {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("AI content optimization unavailable: {}", e);
            None
        }
    };

    Enhancement {
        ai_suggestions,
        optimized_content,
    }
}

/// Prefer the provider's cleaned description of a job URL over scraped text
/// when it is long enough to analyze
pub async fn refine_job_text<P: EnhancementProvider>(provider: &P, url: &str, scraped: String) -> String {
    match provider.analyze_job(url).await {
        Ok(facts) => match facts.clean_job_description {
            Some(clean) if clean.trim().chars().count() >= MIN_TEXT_CHARS => {
                info!("Using AI-cleaned job description ({} chars)", clean.len());
                clean
            }
            _ => scraped,
        },
        Err(e) => {
            warn!("AI job analysis unavailable: {}", e);
            scraped
        }
    }
}

/// Append up to five AI items that do not repeat a heuristic suggestion
pub fn merge_suggestions(heuristic: &[String], ai: &[String]) -> Vec<String> {
    let mut seen: HashSet<String> = heuristic.iter().map(|s| normalize(s)).collect();
    let mut merged = heuristic.to_vec();

    let fresh = ai
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(normalize(s)))
        .take(MAX_AI_SUGGESTIONS)
        .map(str::to_string);
    merged.extend(fresh);
    merged
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Accept a string, a number or null for fields models fill inconsistently
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubProvider {
        clean_description: Option<String>,
        actions: Result<Vec<String>, u16>,
    }

    impl EnhancementProvider for StubProvider {
        async fn analyze_job(&self, _url: &str) -> Result<AiJobFacts, EnhancementError> {
            Ok(AiJobFacts {
                clean_job_description: self.clean_description.clone(),
                ..Default::default()
            })
        }

        async fn optimize_content(&self, resume: &Facts, _job: &Facts) -> Result<OptimizedContent, EnhancementError> {
            Ok(OptimizedContent {
                professional_summary: format!("Engineer with {} years of experience", resume.experience_years),
                ..Default::default()
            })
        }

        async fn recommend_actions(&self, _resume: &str, _job: &str) -> Result<Vec<String>, EnhancementError> {
            self.actions.clone().map_err(|status| EnhancementError::Api {
                status,
                message: "unavailable".to_string(),
            })
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_merge_dedupes_and_caps() {
        let heuristic = strings(&["Add metrics", "Use action verbs"]);
        let ai = strings(&["add metrics", "A", "B", " ", "C", "A", "D", "E", "F"]);

        let merged = merge_suggestions(&heuristic, &ai);
        assert_eq!(merged, strings(&["Add metrics", "Use action verbs", "A", "B", "C", "D", "E"]));
    }

    #[test]
    fn test_merge_keeps_long_heuristic_list() {
        let heuristic: Vec<String> = (0..10).map(|i| format!("tip {}", i)).collect();
        let merged = merge_suggestions(&heuristic, &strings(&["ai tip"]));
        assert_eq!(merged.len(), 11);
        assert_eq!(merged[10], "ai tip");
    }

    #[test]
    fn test_ai_job_facts_tolerates_loose_types() {
        let facts: AiJobFacts = serde_json::from_str(
            r#"{"job_title": "Engineer", "experience_required": 5, "location": null, "technical_skills": ["rust"], "extra": true}"#,
        )
        .unwrap();

        assert_eq!(facts.job_title.as_deref(), Some("Engineer"));
        assert_eq!(facts.experience_required.as_deref(), Some("5"));
        assert_eq!(facts.location, None);
        assert!(facts.soft_skills.is_empty());
    }

    #[tokio::test]
    async fn test_enhance_with_failing_recommendations() {
        let provider = StubProvider {
            clean_description: None,
            actions: Err(503),
        };
        let resume = Facts {
            experience_years: 4,
            ..Default::default()
        };

        let enhancement = enhance(&provider, "resume", "job", &resume, &Facts::default()).await;
        assert!(enhancement.ai_suggestions.is_empty());
        assert_eq!(
            enhancement.optimized_content.map(|c| c.professional_summary),
            Some("Engineer with 4 years of experience".to_string())
        );
    }

    #[tokio::test]
    async fn test_refine_job_text() {
        let long = "Senior backend engineer building Rust services on AWS with Kubernetes.".to_string();
        let provider = StubProvider {
            clean_description: Some(long.clone()),
            actions: Ok(Vec::new()),
        };
        assert_eq!(refine_job_text(&provider, "https://x.io/job", "scraped".to_string()).await, long);

        let provider = StubProvider {
            clean_description: Some("too short".to_string()),
            actions: Ok(Vec::new()),
        };
        assert_eq!(refine_job_text(&provider, "https://x.io/job", "scraped".to_string()).await, "scraped");
    }
}
