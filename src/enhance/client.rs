//! HTTP client for OpenAI-style chat-completions endpoints

use crate::config::EnhancementConfig;
use crate::enhance::prompts;
use crate::enhance::{AiJobFacts, EnhancementProvider, OptimizedContent};
use crate::error::ResumeOptimizerError;
use crate::processing::facts::Facts;
use log::{debug, warn};
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnhancementError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("Provider returned empty content")]
    EmptyContent,

    #[error("API key not set (expected environment variable {0})")]
    MissingApiKey(String),
}

impl From<EnhancementError> for ResumeOptimizerError {
    fn from(err: EnhancementError) -> Self {
        ResumeOptimizerError::Enhancement(err.to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Default, Deserialize)]
struct ActionPlan {
    #[serde(default)]
    recommended_action_items: Vec<String>,
}

/// Sampling settings for one kind of request
#[derive(Debug, Clone, Copy)]
struct Sampling {
    max_tokens: u32,
    temperature: f32,
}

/// Upper bound on attempts whatever the configuration says
const MAX_RETRIES: u32 = 5;
/// Largest backoff exponent; delays stop growing at 32 seconds
const MAX_BACKOFF_EXPONENT: u32 = 5;

const JOB_ANALYSIS: Sampling = Sampling { max_tokens: 2000, temperature: 0.1 };
const OPTIMIZATION: Sampling = Sampling { max_tokens: 1200, temperature: 0.3 };
const ACTION_ITEMS: Sampling = Sampling { max_tokens: 1500, temperature: 0.2 };

#[derive(Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_retries: u32,
}

impl ChatCompletionsClient {
    pub fn new(config: &EnhancementConfig, api_key: String) -> Result<Self, EnhancementError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_retries: config.max_retries.clamp(1, MAX_RETRIES),
        })
    }

    /// Build a client with the key from the configured environment variable
    pub fn from_config(config: &EnhancementConfig) -> Result<Self, EnhancementError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| EnhancementError::MissingApiKey(config.api_key_env.clone()))?;
        Self::new(config, api_key)
    }

    /// Send one system + user exchange and return the reply text.
    /// Retries on 429 and 5xx with exponential backoff.
    async fn complete(&self, system: &str, prompt: &str, sampling: Sampling) -> Result<String, EnhancementError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: prompt },
            ],
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
        };

        let mut last_error: Option<EnhancementError> = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = backoff_delay(attempt);
                warn!("Enhancement request attempt {} failed, retrying after {}ms", attempt, delay.as_millis());
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EnhancementError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Enhancement API returned {}", status);
                last_error = Some(EnhancementError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(EnhancementError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat: ChatResponse = response.json().await?;
            let content = chat
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .filter(|c| !c.trim().is_empty())
                .ok_or(EnhancementError::EmptyContent)?;

            debug!("Enhancement call succeeded ({} chars)", content.len());
            return Ok(content);
        }

        Err(last_error.unwrap_or(EnhancementError::RateLimited {
            retries: self.max_retries,
        }))
    }

    async fn complete_json<T: DeserializeOwned>(
        &self,
        system: &str,
        prompt: &str,
        sampling: Sampling,
    ) -> Result<T, EnhancementError> {
        let text = self.complete(system, prompt, sampling).await?;
        parse_json_reply(&text)
    }
}

impl EnhancementProvider for ChatCompletionsClient {
    async fn analyze_job(&self, url: &str) -> Result<AiJobFacts, EnhancementError> {
        self.complete_json(prompts::JOB_ANALYST_SYSTEM, &prompts::job_analysis_prompt(url), JOB_ANALYSIS)
            .await
    }

    async fn optimize_content(&self, resume: &Facts, job: &Facts) -> Result<OptimizedContent, EnhancementError> {
        let job_title = job_title_hint(job);
        let prompt = prompts::optimization_prompt(resume.experience_years, &job_title, &job.technical_skills);
        self.complete_json(prompts::RESUME_WRITER_SYSTEM, &prompt, OPTIMIZATION).await
    }

    async fn recommend_actions(&self, resume_text: &str, job_text: &str) -> Result<Vec<String>, EnhancementError> {
        let prompt = prompts::action_items_prompt(resume_text, job_text);
        let plan: ActionPlan = self
            .complete_json(prompts::CAREER_COUNSELOR_SYSTEM, &prompt, ACTION_ITEMS)
            .await?;
        Ok(plan.recommended_action_items)
    }
}

/// Delay before retry `attempt` (1-based): 1s, 2s, 4s, ... capped at 32s
fn backoff_delay(attempt: u32) -> Duration {
    let exponent = attempt.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
    Duration::from_millis(1000 << exponent)
}

fn job_title_hint(job: &Facts) -> String {
    match job.job_profile.as_ref() {
        Some(profile) => format!("{} position", profile.job_level),
        None => "Target Position".to_string(),
    }
}

/// Deserialize the JSON object embedded in a model reply
pub fn parse_json_reply<T: DeserializeOwned>(text: &str) -> Result<T, EnhancementError> {
    serde_json::from_str(extract_json(text)).map_err(EnhancementError::Parse)
}

/// Locate the JSON object in a reply that may be fenced or wrapped in prose
pub fn extract_json(text: &str) -> &str {
    let text = strip_json_fences(text);
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped.strip_suffix("```").map(str::trim).unwrap_or(stripped)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_from_prose() {
        let input = "Here is the analysis you asked for:\n```json\n{\"a\": {\"b\": 1}}\n```\nLet me know!";
        assert_eq!(extract_json(input), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_parse_action_plan() {
        let plan: ActionPlan =
            parse_json_reply("{\"recommended_action_items\": [\"Add metrics\"], \"strengths\": []}").unwrap();
        assert_eq!(plan.recommended_action_items, vec!["Add metrics"]);

        let err = parse_json_reply::<ActionPlan>("no json here").unwrap_err();
        assert!(matches!(err, EnhancementError::Parse(_)));
    }

    #[test]
    fn test_missing_api_key() {
        let config = EnhancementConfig {
            api_key_env: "RESUME_OPTIMIZER_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..Default::default()
        };

        let err = ChatCompletionsClient::from_config(&config).err().unwrap();
        assert!(matches!(err, EnhancementError::MissingApiKey(_)));
        assert!(ResumeOptimizerError::from(err).to_string().contains("RESUME_OPTIMIZER_TEST_KEY_THAT_IS_NEVER_SET"));
    }

    #[test]
    fn test_backoff_delay_is_capped() {
        assert_eq!(backoff_delay(1), Duration::from_secs(1));
        assert_eq!(backoff_delay(3), Duration::from_secs(4));
        assert_eq!(backoff_delay(6), Duration::from_secs(32));
        assert_eq!(backoff_delay(200), Duration::from_secs(32));
    }

    #[test]
    fn test_retries_clamped() {
        let config = EnhancementConfig {
            max_retries: 60,
            ..Default::default()
        };
        let client = ChatCompletionsClient::new(&config, "key".to_string()).unwrap();
        assert_eq!(client.max_retries, MAX_RETRIES);

        let config = EnhancementConfig {
            max_retries: 0,
            ..Default::default()
        };
        let client = ChatCompletionsClient::new(&config, "key".to_string()).unwrap();
        assert_eq!(client.max_retries, 1);
    }

    #[test]
    fn test_client_with_explicit_key() {
        let client = ChatCompletionsClient::new(&EnhancementConfig::default(), "key".to_string()).unwrap();
        assert_eq!(client.model, "sonar");
        assert_eq!(client.max_retries, 3);
    }
}
