//! Text analyzer turning raw resume or job text into structured facts

use crate::error::{Result, ResumeOptimizerError};
use crate::processing::catalog::{
    LabeledPattern, SkillCatalog, ACTION_VERBS, COMPETITIVE_INDICATORS, GENERAL_INDUSTRY, INDUSTRY_FALLBACKS,
    REMOTE_INDICATORS, STANDARD_SECTIONS, URGENT_INDICATORS,
};
use crate::processing::facts::{
    CompanySize, ContactInfo, EducationLevel, ExperienceLevel, Facts, JobLevel, JobProfile,
    QualityMetrics,
};
use crate::processing::text_processor::{contains_any, count_present, TextProcessor, MAX_KEYWORDS};
use log::debug;
use regex::Regex;
use std::sync::Arc;

/// Minimum trimmed length, in characters, of any analyzed text
pub const MIN_TEXT_CHARS: usize = 50;

/// Stateless analyzer over a shared catalog; safe to use from many threads
pub struct TextAnalyzer {
    catalog: Arc<SkillCatalog>,
    text_processor: TextProcessor,
}

impl TextAnalyzer {
    pub fn new() -> Result<Self> {
        Self::with_catalog(Arc::new(SkillCatalog::new()?))
    }

    pub fn with_catalog(catalog: Arc<SkillCatalog>) -> Result<Self> {
        Ok(Self {
            catalog,
            text_processor: TextProcessor::new()?,
        })
    }

    pub fn catalog(&self) -> &SkillCatalog {
        &self.catalog
    }

    pub fn shared_catalog(&self) -> Arc<SkillCatalog> {
        Arc::clone(&self.catalog)
    }

    /// Extract facts from resume text, including quality metrics and the
    /// ATS compatibility score
    pub fn analyze_resume(&self, text: &str) -> Result<Facts> {
        ensure_min_length(text, "Resume text")?;

        let lowered = text.to_lowercase();
        let mut facts = self.common_facts(text, &lowered);
        facts.quality_metrics = Some(self.analyze_quality(&lowered));
        facts.ats_score = Some(self.ats_score(text));

        debug!(
            "Resume analysis complete - {} technical skills, {} soft skills, {} years",
            facts.technical_skills.len(),
            facts.soft_skills.len(),
            facts.experience_years
        );
        Ok(facts)
    }

    /// Extract facts from a job description, including the posting's
    /// requirements profile
    pub fn analyze_job_description(&self, text: &str) -> Result<Facts> {
        ensure_min_length(text, "Job description")?;

        let lowered = text.to_lowercase();
        let mut facts = self.common_facts(text, &lowered);
        let profile = self.analyze_job_profile(text, &lowered);

        debug!(
            "Job analysis complete - {} position requiring {} technical skills",
            profile.job_level,
            facts.technical_skills.len()
        );
        facts.job_profile = Some(profile);
        Ok(facts)
    }

    fn common_facts(&self, text: &str, lowered: &str) -> Facts {
        let experience_years = self.extract_experience_years(lowered);

        Facts {
            technical_skills: self.catalog.find_technical_skills(lowered),
            soft_skills: self.catalog.find_soft_skills(lowered),
            experience_years,
            experience_level: ExperienceLevel::from_years(experience_years),
            education_level: self.detect_education(lowered),
            contact_info: self.extract_contact_info(text),
            quality_metrics: None,
            keywords: self.text_processor.extract_keywords(text, MAX_KEYWORDS),
            detected_industry: self.detect_industry(lowered),
            ats_score: None,
            text_stats: self.text_processor.text_stats(text),
            job_profile: None,
        }
    }

    /// Largest year count any experience pattern captures, 0 when none match
    pub fn extract_experience_years(&self, lowered: &str) -> u32 {
        labeled_numbers(self.catalog.experience_patterns(), lowered)
            .max()
            .unwrap_or(0)
    }

    /// First level, in phd to associates order, with a matching pattern
    pub fn detect_education(&self, lowered: &str) -> Option<EducationLevel> {
        self.catalog
            .education_patterns()
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(lowered)))
            .map(|(level, _)| *level)
    }

    /// First match per channel, read from the original-case text
    pub fn extract_contact_info(&self, text: &str) -> ContactInfo {
        let patterns = self.catalog.contact_patterns();

        ContactInfo {
            email: patterns.email.find(text).map(|m| m.as_str().to_string()),
            phone: patterns.phone.find(text).map(|m| m.as_str().to_string()),
            linkedin: first_group(&patterns.linkedin, text),
            github: first_group(&patterns.github, text),
        }
    }

    pub fn analyze_quality(&self, lowered: &str) -> QualityMetrics {
        let numbers_found = self.catalog.quantity_pattern().find_iter(lowered).count();
        let action_verbs_found = count_present(lowered, ACTION_VERBS);

        let quantification_score = (numbers_found as f64 * 10.0).min(100.0);
        let action_verb_score = (action_verbs_found as f64 * 5.0).min(100.0);

        QualityMetrics {
            quantification_score,
            action_verb_score,
            overall_quality: quantification_score * 0.6 + action_verb_score * 0.4,
            numbers_found,
            action_verbs_found,
        }
    }

    /// Industry with the most keyword hits; ties go to the earlier table entry
    pub fn detect_industry(&self, lowered: &str) -> String {
        let mut best: Option<(&str, usize)> = None;

        for (industry, keywords) in self.catalog.industry_keywords() {
            let hits = keywords.iter().filter(|k| lowered.contains(k.as_str())).count();
            if hits > 0 && best.map_or(true, |(_, top)| hits > top) {
                best = Some((industry.as_str(), hits));
            }
        }

        if let Some((industry, _)) = best {
            return industry.to_string();
        }

        INDUSTRY_FALLBACKS
            .iter()
            .find(|(_, words)| contains_any(lowered, words))
            .map_or(GENERAL_INDUSTRY, |&(industry, _)| industry)
            .to_string()
    }

    /// Parseability estimate in [0, 100]
    pub fn ats_score(&self, text: &str) -> f64 {
        let mut score = 100.0;

        if !text.is_ascii() {
            score -= 10.0;
        }

        let lowered = text.to_lowercase();
        let found_sections = count_present(&lowered, STANDARD_SECTIONS);
        let section_score = found_sections as f64 / STANDARD_SECTIONS.len() as f64 * 20.0;

        let word_count = text.split_whitespace().count();
        if word_count < 300 {
            score -= 15.0;
        } else if word_count > 800 {
            score -= 5.0;
        }

        f64::max(0.0, score - (20.0 - section_score))
    }

    pub fn analyze_job_profile(&self, text: &str, lowered: &str) -> JobProfile {
        JobProfile {
            experience_required: self.required_experience(lowered),
            job_level: self.job_level(lowered),
            education_required: self.education_required(lowered),
            remote_friendly: contains_any(lowered, REMOTE_INDICATORS),
            company_size: self.company_size(lowered),
            urgent_hire: contains_any(lowered, URGENT_INDICATORS),
            competitive_position: contains_any(lowered, COMPETITIVE_INDICATORS),
            job_complexity_score: self.job_complexity(text, lowered),
        }
    }

    /// Smallest year count any requirement pattern captures; ranges such as
    /// "3-5 years" contribute both ends
    fn required_experience(&self, lowered: &str) -> u32 {
        labeled_numbers(self.catalog.required_experience_patterns(), lowered)
            .min()
            .unwrap_or(0)
    }

    fn job_level(&self, lowered: &str) -> JobLevel {
        self.catalog
            .job_level_patterns()
            .iter()
            .find(|(_, indicators)| contains_any(lowered, indicators))
            .map_or(JobLevel::Unspecified, |(level, _)| *level)
    }

    fn education_required(&self, lowered: &str) -> Option<EducationLevel> {
        self.catalog
            .education_requirement_patterns()
            .iter()
            .find(|(_, re)| re.is_match(lowered))
            .map(|(level, _)| *level)
    }

    fn company_size(&self, lowered: &str) -> CompanySize {
        self.catalog
            .company_size_indicators()
            .iter()
            .find(|(_, indicators)| contains_any(lowered, indicators))
            .map_or(CompanySize::Unknown, |(size, _)| *size)
    }

    fn job_complexity(&self, text: &str, lowered: &str) -> f64 {
        let pattern_hits: usize = self
            .catalog
            .complexity_patterns()
            .iter()
            .map(|re| re.find_iter(lowered).count())
            .sum();
        let length_factor = text.split_whitespace().count() as f64 / 50.0;

        ((pattern_hits as f64 + length_factor) * 10.0).min(100.0)
    }
}

fn ensure_min_length(text: &str, subject: &str) -> Result<()> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return Err(ResumeOptimizerError::InputTooShort {
            subject: subject.to_string(),
            minimum: MIN_TEXT_CHARS,
        });
    }
    Ok(())
}

/// Every numeric capture group of every match; unparsable values are skipped
/// Numbers captured by each pattern, logging which labeled rule fired
fn labeled_numbers<'a>(patterns: &'a [LabeledPattern], text: &'a str) -> impl Iterator<Item = u32> + 'a {
    patterns.iter().flat_map(move |pattern| {
        let numbers: Vec<u32> = captured_numbers(&pattern.regex, text).collect();
        if !numbers.is_empty() {
            debug!("Pattern '{}' captured {:?}", pattern.label, numbers);
        }
        numbers
    })
}

fn captured_numbers<'a>(re: &'a Regex, text: &'a str) -> impl Iterator<Item = u32> + 'a {
    re.captures_iter(text).flat_map(|caps| {
        caps.iter()
            .skip(1)
            .flatten()
            .filter_map(|m| m.as_str().parse::<u32>().ok())
            .collect::<Vec<_>>()
    })
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
