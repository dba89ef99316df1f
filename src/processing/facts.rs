//! Structured facts extracted from a resume or a job description

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Highest degree detected in a text, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationLevel {
    Associates,
    Bachelors,
    Masters,
    Phd,
}

impl EducationLevel {
    /// Ordinal used by the education score; unknown levels count as 0.
    pub fn ordinal(self) -> u8 {
        match self {
            EducationLevel::Associates => 1,
            EducationLevel::Bachelors => 2,
            EducationLevel::Masters => 3,
            EducationLevel::Phd => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EducationLevel::Associates => "associates",
            EducationLevel::Bachelors => "bachelors",
            EducationLevel::Masters => "masters",
            EducationLevel::Phd => "phd",
        }
    }
}

impl fmt::Display for EducationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExperienceLevel {
    #[default]
    #[serde(rename = "entry-level")]
    EntryLevel,
    #[serde(rename = "junior")]
    Junior,
    #[serde(rename = "mid-level")]
    MidLevel,
    #[serde(rename = "senior")]
    Senior,
}

impl ExperienceLevel {
    pub fn from_years(years: u32) -> Self {
        match years {
            y if y >= 8 => ExperienceLevel::Senior,
            y if y >= 3 => ExperienceLevel::MidLevel,
            y if y >= 1 => ExperienceLevel::Junior,
            _ => ExperienceLevel::EntryLevel,
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExperienceLevel::EntryLevel => "entry-level",
            ExperienceLevel::Junior => "junior",
            ExperienceLevel::MidLevel => "mid-level",
            ExperienceLevel::Senior => "senior",
        };
        f.write_str(label)
    }
}

/// Seniority advertised by a job posting.
///
/// `Unspecified` is what a posting without any level indicator reports; it is
/// shown as "Mid-level".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobLevel {
    Senior,
    Mid,
    Junior,
    #[default]
    #[serde(rename = "Mid-level")]
    Unspecified,
}

impl fmt::Display for JobLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            JobLevel::Senior => "Senior",
            JobLevel::Mid => "Mid",
            JobLevel::Junior => "Junior",
            JobLevel::Unspecified => "Mid-level",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanySize {
    Startup,
    Small,
    Medium,
    Large,
    #[default]
    Unknown,
}

impl fmt::Display for CompanySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CompanySize::Startup => "startup",
            CompanySize::Small => "small",
            CompanySize::Medium => "medium",
            CompanySize::Large => "large",
            CompanySize::Unknown => "unknown",
        };
        f.write_str(label)
    }
}

/// First match per contact channel; absent channels serialize as null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.linkedin.is_none() && self.github.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    #[serde(serialize_with = "serialize_score")]
    pub quantification_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub action_verb_score: f64,
    #[serde(serialize_with = "serialize_score")]
    pub overall_quality: f64,
    pub numbers_found: usize,
    pub action_verbs_found: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStats {
    pub word_count: usize,
    pub character_count: usize,
    pub line_count: usize,
    pub paragraph_count: usize,
}

/// Requirements and posting traits only a job description carries
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobProfile {
    pub experience_required: u32,
    pub job_level: JobLevel,
    pub education_required: Option<EducationLevel>,
    pub remote_friendly: bool,
    pub company_size: CompanySize,
    pub urgent_hire: bool,
    pub competitive_position: bool,
    #[serde(serialize_with = "serialize_score")]
    pub job_complexity_score: f64,
}

/// Structured extraction result for one analyzed text.
///
/// Skill lists hold catalog entries in catalog order and never contain
/// duplicates. `quality_metrics` and `ats_score` are only populated for
/// resumes, `job_profile` only for job descriptions. An empty
/// `detected_industry` means the industry is unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facts {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub experience_years: u32,
    pub experience_level: ExperienceLevel,
    pub education_level: Option<EducationLevel>,
    pub contact_info: ContactInfo,
    pub quality_metrics: Option<QualityMetrics>,
    pub keywords: Vec<String>,
    pub detected_industry: String,
    #[serde(serialize_with = "serialize_optional_score")]
    pub ats_score: Option<f64>,
    pub text_stats: TextStats,
    pub job_profile: Option<JobProfile>,
}

impl Facts {
    /// Years the posting asks for, 0 when no requirement was found.
    pub fn experience_required(&self) -> u32 {
        self.job_profile.as_ref().map_or(0, |p| p.experience_required)
    }

    pub fn education_required(&self) -> Option<EducationLevel> {
        self.job_profile.as_ref().and_then(|p| p.education_required)
    }

    pub fn industry(&self) -> Option<&str> {
        if self.detected_industry.is_empty() {
            None
        } else {
            Some(&self.detected_industry)
        }
    }

    pub fn quality_overall(&self) -> f64 {
        self.quality_metrics.as_ref().map_or(0.0, |q| q.overall_quality)
    }
}

/// Round to one decimal for reporting; internal arithmetic keeps full precision.
pub fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn serialize_score<S>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(round_one(*value))
}

pub(crate) fn serialize_optional_score<S>(
    value: &Option<f64>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) => serializer.serialize_some(&round_one(*v)),
        None => serializer.serialize_none(),
    }
}
