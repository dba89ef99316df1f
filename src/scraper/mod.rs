//! Job posting retrieval from job board URLs

pub mod sites;

use crate::config::ScraperConfig;
use crate::error::{Result, ResumeOptimizerError};
use log::{info, warn};
use reqwest::{Client, Url};
use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use sites::{adapter_for, SiteAdapter, GENERIC_CONTENT, GENERIC_TITLE};
use std::time::Duration;

pub const DEFAULT_TITLE: &str = "Job Title";
pub const DEFAULT_COMPANY: &str = "Company Name";

/// Paragraphs shorter than this are navigation or boilerplate
const MIN_PARAGRAPH_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub url: String,
    /// Host the posting came from, without a `www.` prefix
    pub scraped_from: String,
}

pub struct JobScraper {
    client: Client,
}

impl JobScraper {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResumeOptimizerError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    pub async fn scrape(&self, url: &str) -> Result<ScrapedJob> {
        let domain = validate_url(url)?;
        info!("Fetching job posting from {}", domain);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ResumeOptimizerError::Network(format!("HTTP error: {}", response.status())));
        }

        let html = response.text().await?;
        let job = parse_job_page(&html, url, &domain)?;

        info!("Scraped {} characters for '{}' at {}", job.description.len(), job.title, job.company);
        Ok(job)
    }
}

/// Check that `url` is http(s) with a host, returning the normalized host
pub fn validate_url(url: &str) -> Result<String> {
    let invalid = || ResumeOptimizerError::InvalidInput("Invalid URL provided".to_string());

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    let host = parsed.host_str().filter(|h| !h.is_empty()).ok_or_else(invalid)?.to_lowercase();

    Ok(host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
}

/// Extract a posting from a fetched page.
///
/// Known boards use their own selectors; anything else, or a known board
/// whose layout yields no description, goes through the generic rules.
pub fn parse_job_page(html: &str, url: &str, domain: &str) -> Result<ScrapedJob> {
    let document = Html::parse_document(html);

    let fields = adapter_for(domain)
        .and_then(|adapter| {
            let fields = parse_with_adapter(&document, adapter);
            if fields.is_none() {
                warn!("No description found with {} rules, falling back to generic parsing", adapter.domain);
            }
            fields
        })
        .unwrap_or_else(|| parse_generic(&document));

    if fields.description.is_empty() {
        return Err(ResumeOptimizerError::Scraping("No job description content found".to_string()));
    }

    Ok(ScrapedJob {
        title: non_empty_or(fields.title, DEFAULT_TITLE),
        company: non_empty_or(fields.company, DEFAULT_COMPANY),
        location: fields.location,
        description: fields.description,
        url: url.to_string(),
        scraped_from: domain.to_string(),
    })
}

#[derive(Debug, Default)]
struct PageFields {
    title: String,
    company: String,
    location: String,
    description: String,
}

fn parse_with_adapter(document: &Html, adapter: &SiteAdapter) -> Option<PageFields> {
    let description = find_text_by_selectors(document, adapter.description).or_else(|| {
        adapter
            .paragraph_fallback
            .then(|| paragraphs(document, 0, "\n"))
            .filter(|text| !text.is_empty())
    })?;

    Some(PageFields {
        title: find_text_by_selectors(document, adapter.title).unwrap_or_default(),
        company: find_text_by_selectors(document, adapter.company).unwrap_or_default(),
        location: find_text_by_selectors(document, adapter.location).unwrap_or_default(),
        description,
    })
}

fn parse_generic(document: &Html) -> PageFields {
    let description = find_text_by_selectors(document, GENERIC_CONTENT)
        .or_else(|| Some(paragraphs(document, MIN_PARAGRAPH_CHARS, "\n\n")).filter(|text| !text.is_empty()))
        .unwrap_or_else(|| clean_text(&document.root_element().text().collect::<Vec<_>>().join(" ")));

    PageFields {
        title: find_text_by_selectors(document, GENERIC_TITLE).unwrap_or_default(),
        description,
        ..Default::default()
    }
}

fn find_text_by_selectors(document: &Html, selectors: &[&str]) -> Option<String> {
    for selector_str in selectors {
        if let Ok(selector) = Selector::parse(selector_str) {
            if let Some(element) = document.select(&selector).next() {
                let text = clean_text(&element.text().collect::<Vec<_>>().join(" "));
                if !text.is_empty() {
                    return Some(text);
                }
            }
        }
    }
    None
}

/// Text of every `<p>` longer than `min_chars`, joined by `separator`
fn paragraphs(document: &Html, min_chars: usize, separator: &str) -> String {
    let Ok(selector) = Selector::parse("p") else {
        return String::new();
    };

    document
        .select(&selector)
        .map(|p| p.text().collect::<String>())
        .filter(|text| text.trim().chars().count() > min_chars)
        .map(|text| clean_text(&text))
        .collect::<Vec<_>>()
        .join(separator)
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty_or(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONG_PARAGRAPH: &str =
        "We are looking for a backend engineer with strong Rust and PostgreSQL experience to join our team.";

    #[test]
    fn test_validate_url() {
        assert_eq!(validate_url("https://www.linkedin.com/jobs/view/1").unwrap(), "linkedin.com");
        assert_eq!(validate_url("http://Jobs.Lever.co/acme/123").unwrap(), "jobs.lever.co");

        for bad in ["not a url", "example.com/jobs", "", "mailto:jobs@example.com", "ftp://example.com/job"] {
            let err = validate_url(bad).unwrap_err();
            assert!(matches!(err, ResumeOptimizerError::InvalidInput(_)), "{}", bad);
        }
    }

    #[test]
    fn test_linkedin_adapter() {
        let html = r#"<html><body>
            <h1 class="top-card-layout__title">Senior Rust Engineer</h1>
            <a class="topcard__org-name-link"> Acme   Corp </a>
            <span class="topcard__flavor--bullet">Berlin, Germany</span>
            <div class="description__text"><p>Build services.</p><ul><li>Rust</li><li>AWS</li></ul></div>
        </body></html>"#;

        let job = parse_job_page(html, "https://linkedin.com/jobs/1", "linkedin.com").unwrap();
        assert_eq!(job.title, "Senior Rust Engineer");
        assert_eq!(job.company, "Acme Corp");
        assert_eq!(job.location, "Berlin, Germany");
        assert_eq!(job.description, "Build services. Rust AWS");
        assert_eq!(job.scraped_from, "linkedin.com");
    }

    #[test]
    fn test_lever_adapter_with_data_attributes() {
        let html = r#"<html><body>
            <h2 data-qa="posting-name">Platform Engineer</h2>
            <div data-qa="posting-description">Own our Kubernetes clusters.</div>
        </body></html>"#;

        let job = parse_job_page(html, "https://jobs.lever.co/acme/1", "jobs.lever.co").unwrap();
        assert_eq!(job.title, "Platform Engineer");
        assert_eq!(job.company, DEFAULT_COMPANY);
        assert_eq!(job.description, "Own our Kubernetes clusters.");
    }

    #[test]
    fn test_generic_content_selector() {
        let html = r#"<html><head><title>Careers</title></head><body>
            <nav>Home | Jobs</nav>
            <article><h2>Data Engineer</h2><p>Python and Spark.</p></article>
        </body></html>"#;

        let job = parse_job_page(html, "https://careers.example.com/1", "careers.example.com").unwrap();
        assert_eq!(job.title, "Data Engineer");
        assert_eq!(job.company, DEFAULT_COMPANY);
        assert_eq!(job.description, "Data Engineer Python and Spark.");
    }

    #[test]
    fn test_generic_paragraph_fallback() {
        let html = format!(
            "<html><body><div><p>Apply now</p><p>{}</p><p>{}</p></div></body></html>",
            LONG_PARAGRAPH, LONG_PARAGRAPH
        );

        let job = parse_job_page(&html, "https://example.com/job", "example.com").unwrap();
        assert_eq!(job.title, DEFAULT_TITLE);
        assert_eq!(job.description, format!("{}\n\n{}", LONG_PARAGRAPH, LONG_PARAGRAPH));
    }

    #[test]
    fn test_generic_body_text_fallback() {
        let html = "<html><body><div>Short   posting text</div></body></html>";

        let job = parse_job_page(html, "https://example.com/job", "example.com").unwrap();
        assert_eq!(job.description, "Short posting text");
    }

    #[test]
    fn test_known_site_falls_back_to_generic() {
        let html = r#"<html><body><h1>Site Reliability Engineer</h1><main>On-call rotation and Terraform.</main></body></html>"#;

        let job = parse_job_page(html, "https://www.dice.com/job/1", "dice.com").unwrap();
        assert_eq!(job.title, "Site Reliability Engineer");
        assert_eq!(job.description, "On-call rotation and Terraform.");
    }

    #[test]
    fn test_empty_page_is_scraping_error() {
        let err = parse_job_page("<html><body>   </body></html>", "https://example.com", "example.com").unwrap_err();
        assert!(matches!(err, ResumeOptimizerError::Scraping(_)));
        assert!(err.to_string().contains("No job description content found"));
    }

    #[test]
    fn test_scraper_builds_from_config() {
        assert!(JobScraper::new(&ScraperConfig::default()).is_ok());
    }
}
