//! Weighted multi-factor scoring of a resume against a job description

use crate::processing::catalog::SkillCatalog;
use crate::processing::facts::{serialize_score, EducationLevel, Facts};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

/// Score assigned to the industry dimension when either side is unknown
pub const NEUTRAL_INDUSTRY_SCORE: f64 = 70.0;
pub const MAX_TOP_SKILL_GAPS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub technical: f64,
    pub soft_skills: f64,
    pub experience: f64,
    pub education: f64,
    pub industry: f64,
    pub keywords: f64,
}

/// Fixed weights; they sum to 1.0
pub const SCORING_WEIGHTS: ScoringWeights = ScoringWeights {
    technical: 0.35,
    soft_skills: 0.15,
    experience: 0.20,
    education: 0.10,
    industry: 0.10,
    keywords: 0.10,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStrength {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl MatchStrength {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            MatchStrength::Excellent
        } else if score >= 70.0 {
            MatchStrength::Good
        } else if score >= 50.0 {
            MatchStrength::Fair
        } else {
            MatchStrength::Poor
        }
    }
}

impl fmt::Display for MatchStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MatchStrength::Poor => "poor",
            MatchStrength::Fair => "fair",
            MatchStrength::Good => "good",
            MatchStrength::Excellent => "excellent",
        };
        f.write_str(label)
    }
}

/// Scored comparison of one resume against one job description.
///
/// Scores are 0-100 and kept at full precision; serialization rounds them to
/// one decimal. Skill and keyword lists follow the job side's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(serialize_with = "serialize_score")]
    pub overall_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub technical_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub soft_skills_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub experience_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub education_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub industry_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub keyword_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub ats_compatibility_score: f64,

    pub matched_technical_skills: Vec<String>,
    pub missing_technical_skills: Vec<String>,
    pub matched_soft_skills: Vec<String>,
    pub missing_soft_skills: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub matched_skills: Vec<String>,

    pub experience_gap: u32,
    pub experience_surplus: u32,

    pub match_strength: MatchStrength,
    pub top_skill_gaps: Vec<String>,
    pub scoring_weights: ScoringWeights,
}

pub struct MatchScorer {
    catalog: Arc<SkillCatalog>,
}

impl MatchScorer {
    pub fn new(catalog: Arc<SkillCatalog>) -> Self {
        Self { catalog }
    }

    /// Never fails: empty inputs produce the documented default scores
    pub fn score(&self, resume: &Facts, job: &Facts) -> MatchResult {
        let (matched_technical, missing_technical) = split_by_presence(&job.technical_skills, &resume.technical_skills);
        let (matched_soft, missing_soft) = split_by_presence(&job.soft_skills, &resume.soft_skills);
        let (matched_keywords, _) = split_by_presence(&job.keywords, &resume.keywords);

        let job_technical = unique_count(&job.technical_skills);
        let job_soft = unique_count(&job.soft_skills);
        let job_keywords = unique_count(&job.keywords);

        let technical_score = coverage(matched_technical.len(), job_technical, 100.0);
        let soft_skills_score = coverage(matched_soft.len(), job_soft, 100.0);
        // empty target keywords score 0, unlike the skill dimensions
        let keyword_score = coverage(matched_keywords.len(), job_keywords, 0.0);

        let resume_years = resume.experience_years;
        let required_years = job.experience_required();
        let experience_score = experience_score(resume_years, required_years);
        let education_score = education_score(resume.education_level, job.education_required());
        let industry_score = self.industry_score(resume.industry(), job.industry());

        let weights = SCORING_WEIGHTS;
        let weighted = technical_score * weights.technical
            + soft_skills_score * weights.soft_skills
            + experience_score * weights.experience
            + education_score * weights.education
            + industry_score * weights.industry
            + keyword_score * weights.keywords;

        let ats_compatibility_score = resume.ats_score.unwrap_or(0.0);
        let overall_score = weighted * (0.7 + 0.3 * (ats_compatibility_score / 100.0));

        let top_skill_gaps = self.top_skill_gaps(&missing_technical);
        let matched_skills = matched_technical
            .iter()
            .chain(matched_soft.iter())
            .cloned()
            .collect();

        MatchResult {
            overall_score,
            technical_score,
            soft_skills_score,
            experience_score,
            education_score,
            industry_score,
            keyword_score,
            ats_compatibility_score,
            matched_technical_skills: matched_technical,
            missing_technical_skills: missing_technical,
            matched_soft_skills: matched_soft,
            missing_soft_skills: missing_soft,
            matched_keywords,
            matched_skills,
            experience_gap: required_years.saturating_sub(resume_years),
            experience_surplus: resume_years.saturating_sub(required_years),
            match_strength: MatchStrength::from_score(overall_score),
            top_skill_gaps,
            scoring_weights: weights,
        }
    }

    pub fn industry_score(&self, resume_industry: Option<&str>, job_industry: Option<&str>) -> f64 {
        let (Some(resume_industry), Some(job_industry)) = (resume_industry, job_industry) else {
            return NEUTRAL_INDUSTRY_SCORE;
        };

        if resume_industry == job_industry {
            100.0
        } else if self.catalog.related_industries(resume_industry).contains(&job_industry) {
            80.0
        } else {
            50.0
        }
    }

    /// Missing skills ranked by importance; the sort is stable so equal
    /// importance keeps catalog order
    pub fn top_skill_gaps(&self, missing: &[String]) -> Vec<String> {
        let mut ranked: Vec<&String> = missing.iter().collect();
        ranked.sort_by_key(|skill| std::cmp::Reverse(self.catalog.skill_importance(skill)));
        ranked.into_iter().take(MAX_TOP_SKILL_GAPS).cloned().collect()
    }
}

pub fn experience_score(resume_years: u32, required_years: u32) -> f64 {
    if required_years == 0 {
        return 100.0;
    }

    let resume = resume_years as f64;
    let required = required_years as f64;

    if resume >= required {
        if resume <= required * 1.5 {
            100.0
        } else {
            f64::max(70.0, 100.0 - (resume - required * 1.5) * 5.0)
        }
    } else {
        f64::max(0.0, 100.0 - (required - resume) * 20.0)
    }
}

pub fn education_score(resume_level: Option<EducationLevel>, required_level: Option<EducationLevel>) -> f64 {
    let Some(required) = required_level else {
        return 100.0;
    };

    let resume = resume_level.map_or(0, EducationLevel::ordinal) as i32;
    let required = required.ordinal() as i32;

    match required - resume {
        d if d <= 0 => 100.0,
        1 => 75.0,
        2 => 50.0,
        _ => 25.0,
    }
}

fn coverage(matched: usize, total: usize, empty_default: f64) -> f64 {
    if total == 0 {
        empty_default
    } else {
        matched as f64 / total as f64 * 100.0
    }
}

fn unique_count(items: &[String]) -> usize {
    items.iter().collect::<HashSet<_>>().len()
}

/// Partition the target list, deduplicated in order, into entries the
/// candidate list has and entries it lacks
fn split_by_presence(target: &[String], candidate: &[String]) -> (Vec<String>, Vec<String>) {
    let have: HashSet<&str> = candidate.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut present = Vec::new();
    let mut absent = Vec::new();

    for item in target {
        if !seen.insert(item.as_str()) {
            continue;
        }
        if have.contains(item.as_str()) {
            present.push(item.clone());
        } else {
            absent.push(item.clone());
        }
    }

    (present, absent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::facts::JobProfile;

    fn scorer() -> MatchScorer {
        MatchScorer::new(Arc::new(SkillCatalog::new().unwrap()))
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn job_with(technical: &[&str], required_years: u32, education: Option<EducationLevel>) -> Facts {
        Facts {
            technical_skills: strings(technical),
            job_profile: Some(JobProfile {
                experience_required: required_years,
                education_required: education,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_end_to_end_example() {
        let resume = Facts {
            technical_skills: strings(&["python", "sql"]),
            experience_years: 2,
            education_level: Some(EducationLevel::Bachelors),
            ats_score: Some(90.0),
            ..Default::default()
        };
        let job = job_with(&["python", "sql", "aws"], 3, Some(EducationLevel::Bachelors));

        let result = scorer().score(&resume, &job);

        assert!((result.technical_score - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.soft_skills_score, 100.0);
        assert_eq!(result.experience_score, 80.0);
        assert_eq!(result.education_score, 100.0);
        assert_eq!(result.industry_score, NEUTRAL_INDUSTRY_SCORE);
        assert_eq!(result.keyword_score, 0.0);
        assert_eq!(result.missing_technical_skills, vec!["aws"]);
        assert_eq!(result.experience_gap, 1);
        assert_eq!(result.experience_surplus, 0);

        let weighted = (200.0 / 3.0) * 0.35 + 100.0 * 0.15 + 80.0 * 0.20 + 100.0 * 0.10 + 70.0 * 0.10;
        assert!((result.overall_score - weighted * 0.97).abs() < 1e-9);
        assert_eq!(result.match_strength, MatchStrength::Fair);
    }

    #[test]
    fn test_identical_facts_score_full_coverage() {
        let facts = Facts {
            technical_skills: strings(&["rust", "docker"]),
            soft_skills: strings(&["leadership"]),
            keywords: strings(&["systems", "platform"]),
            ..Default::default()
        };
        let result = scorer().score(&facts, &facts);

        assert_eq!(result.technical_score, 100.0);
        assert_eq!(result.soft_skills_score, 100.0);
        assert_eq!(result.keyword_score, 100.0);
        assert!(result.missing_technical_skills.is_empty());
        assert_eq!(result.matched_skills, vec!["rust", "docker", "leadership"]);
    }

    #[test]
    fn test_experience_score_boundaries() {
        let cases = [
            (5, 0, 100.0),
            (5, 5, 100.0),
            (7, 5, 100.0),
            (8, 5, 97.5),
            (20, 5, 70.0),
            (4, 5, 80.0),
            (3, 5, 60.0),
            (0, 10, 0.0),
        ];
        for (resume, required, expected) in cases {
            assert_eq!(experience_score(resume, required), expected, "resume={} required={}", resume, required);
        }
    }

    #[test]
    fn test_education_score() {
        use EducationLevel::*;
        let cases = [
            (None, None, 100.0),
            (Some(Phd), Some(Masters), 100.0),
            (Some(Bachelors), Some(Masters), 75.0),
            (Some(Bachelors), Some(Phd), 50.0),
            (Some(Associates), Some(Phd), 25.0),
            (None, Some(Bachelors), 50.0),
            (None, Some(Associates), 75.0),
        ];
        for (resume, required, expected) in cases {
            assert_eq!(education_score(resume, required), expected, "{:?} vs {:?}", resume, required);
        }
    }

    #[test]
    fn test_industry_score() {
        let scorer = scorer();
        assert_eq!(scorer.industry_score(None, Some("fintech")), 70.0);
        assert_eq!(scorer.industry_score(Some("technology"), None), 70.0);
        assert_eq!(scorer.industry_score(Some("gaming"), Some("gaming")), 100.0);
        assert_eq!(scorer.industry_score(Some("technology"), Some("ai_ml")), 80.0);
        assert_eq!(scorer.industry_score(Some("finance"), Some("fintech")), 80.0);
        assert_eq!(scorer.industry_score(Some("fintech"), Some("technology")), 50.0);
    }

    #[test]
    fn test_ats_factor() {
        let scorer = scorer();
        let job = job_with(&["python"], 0, None);
        let mut resume = Facts {
            technical_skills: strings(&["python"]),
            ats_score: Some(100.0),
            ..Default::default()
        };

        let full = scorer.score(&resume, &job).overall_score;
        // keywords score 0 and industry is neutral: 35 + 15 + 20 + 10 + 7
        assert!((full - 87.0).abs() < 1e-9);

        let mut previous = full;
        for ats in [80.0, 50.0, 10.0, 0.0] {
            resume.ats_score = Some(ats);
            let score = scorer.score(&resume, &job).overall_score;
            assert!(score < previous);
            previous = score;
        }
        assert!((previous - full * 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_top_skill_gaps_ranked_and_stable() {
        let scorer = scorer();
        let missing = strings(&["terraform", "html", "python", "helm", "aws", "docker", "ansible"]);
        let gaps = scorer.top_skill_gaps(&missing);

        assert_eq!(gaps, vec!["python", "aws", "docker", "html", "terraform"]);
    }

    #[test]
    fn test_match_strength_bands() {
        let cases = [
            (0.0, MatchStrength::Poor),
            (49.9, MatchStrength::Poor),
            (50.0, MatchStrength::Fair),
            (69.9, MatchStrength::Fair),
            (70.0, MatchStrength::Good),
            (84.9, MatchStrength::Good),
            (85.0, MatchStrength::Excellent),
            (100.0, MatchStrength::Excellent),
        ];
        for (score, expected) in cases {
            assert_eq!(MatchStrength::from_score(score), expected, "score = {}", score);
        }
    }

    #[test]
    fn test_serialized_scores_rounded() {
        let resume = Facts {
            technical_skills: strings(&["python", "sql"]),
            ats_score: Some(100.0),
            ..Default::default()
        };
        let job = job_with(&["python", "sql", "aws"], 0, None);
        let result = scorer().score(&resume, &job);

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["technical_score"], 66.7);
        assert_eq!(value["match_strength"], serde_json::json!(result.match_strength.to_string()));
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = SCORING_WEIGHTS;
        let sum = w.technical + w.soft_skills + w.experience + w.education + w.industry + w.keywords;
        assert!((sum - 1.0).abs() < 1e-9);
    }
}
