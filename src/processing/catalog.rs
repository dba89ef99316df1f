//! Skill and pattern catalog
//!
//! Every keyword list and regex table the analyzer consults lives here. The
//! catalog is built once, validated on construction, and shared read-only
//! (usually behind an `Arc`) by every analyzer instance.

use crate::error::{Result, ResumeOptimizerError};
use crate::processing::facts::{CompanySize, EducationLevel, JobLevel};
use crate::processing::text_processor::PhraseMatcher;
use regex::Regex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// Importance assigned to skills absent from the importance table
pub const DEFAULT_SKILL_IMPORTANCE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillCategory {
    ProgrammingLanguages,
    FrameworksLibraries,
    Databases,
    CloudDevops,
    ToolsTechnologies,
    Methodologies,
}

impl SkillCategory {
    pub fn label(self) -> &'static str {
        match self {
            SkillCategory::ProgrammingLanguages => "Programming Languages",
            SkillCategory::FrameworksLibraries => "Frameworks & Libraries",
            SkillCategory::Databases => "Databases",
            SkillCategory::CloudDevops => "Cloud & DevOps",
            SkillCategory::ToolsTechnologies => "Tools & Technologies",
            SkillCategory::Methodologies => "Methodologies",
        }
    }
}

const PROGRAMMING_LANGUAGES: &[&str] = &[
    "python", "java", "javascript", "typescript", "c++", "c#", "php", "ruby", "go", "rust",
    "swift", "kotlin", "scala", "r", "matlab", "perl", "shell", "bash", "powershell", "sql",
    "html", "css", "sass", "less", "dart", "elixir", "haskell", "clojure", "f#", "vb.net",
    "cobol", "fortran", "assembly", "lua", "groovy",
];

const FRAMEWORKS_LIBRARIES: &[&str] = &[
    "react", "angular", "vue", "svelte", "ember", "backbone", "jquery", "nodejs", "express",
    "koa", "fastify", "django", "flask", "fastapi", "pyramid", "tornado", "spring",
    "spring boot", "hibernate", "struts", "laravel", "symfony", "codeigniter", "rails",
    "sinatra", "asp.net", "mvc", "blazor", "xamarin", "unity", "unreal", "tensorflow",
    "pytorch", "keras", "scikit-learn", "pandas", "numpy", "matplotlib", "seaborn", "plotly",
    "opencv", "nltk", "spacy", "hugging face", "transformers",
];

const DATABASES: &[&str] = &[
    "mysql", "postgresql", "sqlite", "oracle", "sql server", "mongodb", "cassandra", "redis",
    "elasticsearch", "solr", "neo4j", "dynamodb", "couchdb", "influxdb", "firebase", "mariadb",
    "cockroachdb", "amazon rds", "azure sql", "google cloud sql",
];

const CLOUD_DEVOPS: &[&str] = &[
    "aws", "azure", "gcp", "google cloud platform", "digital ocean", "linode", "docker",
    "kubernetes", "openshift", "helm", "istio", "jenkins", "github actions", "gitlab ci",
    "circle ci", "travis ci", "azure devops", "terraform", "ansible", "chef", "puppet",
    "vagrant", "packer", "consul", "vault", "nomad", "prometheus", "grafana", "elk stack",
    "datadog", "new relic", "splunk", "nagios", "zabbix",
];

const TOOLS_TECHNOLOGIES: &[&str] = &[
    "git", "github", "gitlab", "bitbucket", "svn", "mercurial", "jira", "confluence", "slack",
    "microsoft teams", "zoom", "figma", "sketch", "adobe xd", "photoshop", "illustrator",
    "after effects", "premiere pro", "blender", "autocad", "solidworks", "excel", "powerbi",
    "tableau", "qlik", "looker", "apache spark", "hadoop", "kafka", "rabbitmq", "celery",
    "airflow", "luigi", "prefect", "dbt",
];

const METHODOLOGIES: &[&str] = &[
    "agile", "scrum", "kanban", "lean", "six sigma", "devops", "ci/cd", "tdd", "bdd",
    "pair programming", "code review", "microservices", "monolith", "serverless",
    "event-driven architecture", "domain-driven design", "clean architecture",
    "solid principles", "design patterns", "rest api", "graphql", "grpc", "oauth", "jwt",
    "saml", "ldap", "sso", "encryption", "ssl/tls", "penetration testing",
    "vulnerability assessment", "compliance", "gdpr", "hipaa", "sox", "pci dss",
];

const INDUSTRY_SKILLS: &[(&str, &[&str])] = &[
    ("fintech", &["blockchain", "cryptocurrency", "defi", "trading algorithms", "risk management", "compliance", "kyc", "aml"]),
    ("healthcare", &["hipaa", "hl7", "fhir", "medical devices", "clinical trials", "telemedicine", "ehr", "emr"]),
    ("ecommerce", &["payment processing", "inventory management", "supply chain", "logistics", "crm", "shopify", "magento", "woocommerce"]),
    ("gaming", &["game engines", "unity", "unreal engine", "c#", "c++", "graphics programming", "shader programming", "multiplayer networking"]),
    ("iot", &["embedded systems", "sensors", "actuators", "edge computing", "mqtt", "lorawan", "zigbee", "bluetooth"]),
    ("ai_ml", &["machine learning", "deep learning", "neural networks", "computer vision", "nlp", "reinforcement learning", "mlops", "model deployment"]),
];

const SOFT_SKILLS: &[&str] = &[
    "leadership", "communication", "teamwork", "collaboration", "problem solving",
    "analytical thinking", "critical thinking", "creative thinking", "innovation",
    "adaptability", "flexibility", "resilience", "time management", "organization",
    "project management", "stakeholder management", "client relations", "customer service",
    "presentation skills", "public speaking", "negotiation", "conflict resolution", "mentoring",
    "coaching", "training", "strategic planning", "decision making", "attention to detail",
    "quality assurance", "continuous improvement", "agile mindset", "emotional intelligence",
    "cultural awareness", "remote work", "cross-functional collaboration",
];

const EXPERIENCE_PATTERNS: &[(&str, &str)] = &[
    ("years of experience", r"(\d+)[\+]?\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)"),
    ("year experience", r"(\d+)[\+]?\s*(?:year|yr)\s*(?:experience|exp)"),
    ("experience: years", r"experience[:\s]*(\d+)[\+]?\s*(?:years?|yrs?)"),
    ("years in/with/of", r"(\d+)[\+]?\s*(?:years?|yrs?)\s*(?:in|with|of)"),
    ("over years", r"over\s*(\d+)\s*(?:years?|yrs?)"),
    ("more than years", r"more than\s*(\d+)\s*(?:years?|yrs?)"),
];

const REQUIRED_EXPERIENCE_PATTERNS: &[(&str, &str)] = &[
    ("years of experience", r"(\d+)[\+]?\s*(?:years?|yrs?)\s*(?:of\s*)?(?:experience|exp)"),
    ("minimum years", r"minimum\s*(\d+)\s*(?:years?|yrs?)"),
    ("at least years", r"at least\s*(\d+)\s*(?:years?|yrs?)"),
    ("year range", r"(\d+)[\+]?\s*(?:to|\-)\s*(\d+)\s*(?:years?|yrs?)"),
];

const EDUCATION_PATTERNS: &[(EducationLevel, &[&str])] = &[
    (EducationLevel::Phd, &[r"\bphd\b", r"\bph\.d\b", r"\bdoctorate\b", r"\bdoctoral\b"]),
    (
        EducationLevel::Masters,
        &[r"\bmaster['s]?\b", r"\bmba\b", r"\bms\b", r"\bm\.s\b", r"\bma\b", r"\bm\.a\b", r"\bmsc\b", r"\bm\.sc\b"],
    ),
    (
        EducationLevel::Bachelors,
        &[
            r"\bbachelor['s]?\b", r"\bbs\b", r"\bb\.s\b", r"\bba\b", r"\bb\.a\b", r"\bbsc\b",
            r"\bb\.sc\b", r"\bbtech\b", r"\bb\.tech\b",
        ],
    ),
    // "\bas\b" also matches the plain word "as"
    (EducationLevel::Associates, &[r"\bassociate['s]?\b", r"\bas\b", r"\ba\.s\b", r"\bdiploma\b"]),
];

const EDUCATION_REQUIREMENT_PATTERNS: &[(EducationLevel, &str)] = &[
    (EducationLevel::Phd, r"phd.*required|doctorate.*required"),
    (EducationLevel::Masters, r"master.*required|mba.*required"),
    (EducationLevel::Bachelors, r"bachelor.*required|degree.*required"),
];

const EMAIL_PATTERN: &str = r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b";
// Broad on purpose: dates and zip codes can match too
const PHONE_PATTERN: &str = r"(\+\d{1,3}[-.\s]?)?\(?\d{1,4}\)?[-.\s]?\d{1,4}[-.\s]?\d{1,4}[-.\s]?\d{1,9}";
const LINKEDIN_PATTERN: &str = r"linkedin\.com/(?:in/)?([A-Za-z0-9-]+)";
const GITHUB_PATTERN: &str = r"github\.com/([A-Za-z0-9-]+)";

const JOB_LEVEL_INDICATORS: &[(JobLevel, &[&str])] = &[
    (
        JobLevel::Senior,
        &["senior", "lead", "principal", "staff", "architect", "manager", "director", "head of", "vp", "cto", "cio"],
    ),
    (
        JobLevel::Mid,
        &["mid-level", "intermediate", "experienced", "specialist", "analyst", "developer", "engineer"],
    ),
    (
        JobLevel::Junior,
        &["junior", "entry", "entry-level", "associate", "intern", "trainee", "graduate", "assistant"],
    ),
];

const COMPANY_SIZE_INDICATORS: &[(CompanySize, &[&str])] = &[
    (CompanySize::Startup, &["startup", "early stage", "seed", "series a"]),
    (CompanySize::Small, &["small", "growing", "10-50", "50-100"]),
    (CompanySize::Medium, &["medium", "100-500", "500-1000"]),
    (CompanySize::Large, &["large", "enterprise", "1000+", "fortune"]),
];

pub const REMOTE_INDICATORS: &[&str] = &["remote", "work from home", "distributed", "telecommute"];
pub const URGENT_INDICATORS: &[&str] = &["urgent", "immediate", "asap", "immediately", "right away"];
pub const COMPETITIVE_INDICATORS: &[&str] = &["competitive", "multiple candidates", "fast-paced", "dynamic"];

pub const ACTION_VERBS: &[&str] = &[
    "achieved", "administered", "analyzed", "architected", "automated", "built", "collaborated",
    "created", "delivered", "designed", "developed", "directed", "enhanced", "established",
    "executed", "implemented", "improved", "increased", "led", "managed", "optimized",
    "organized", "pioneered", "reduced", "resolved", "spearheaded", "streamlined",
];

pub const STANDARD_SECTIONS: &[&str] = &["experience", "education", "skills", "summary"];

const QUANTITY_PATTERN: &str = r"\d+(?:\.\d+)?(?:%|k|m|b|\$|€|£)";

const COMPLEXITY_PATTERNS: &[&str] = &[
    r"\b(?:required|must have|essential)\b",
    r"\b(?:preferred|nice to have|bonus)\b",
    r"\b(?:years?|yrs?)\b",
];

/// Coarse buckets consulted when no cataloged industry keyword is present
pub const INDUSTRY_FALLBACKS: &[(&str, &[&str])] = &[
    ("technology", &["software", "developer", "engineer", "programming"]),
    ("finance", &["finance", "banking", "investment"]),
    ("healthcare", &["healthcare", "medical", "hospital"]),
];

pub const GENERAL_INDUSTRY: &str = "general";

const RELATED_INDUSTRIES: &[(&str, &[&str])] = &[
    ("technology", &["fintech", "ai_ml", "iot"]),
    ("healthcare", &["fintech"]),
    ("finance", &["fintech"]),
];

const SKILL_IMPORTANCE: &[(&str, u32)] = &[
    ("python", 10), ("java", 10), ("javascript", 10), ("react", 9), ("aws", 9), ("sql", 9),
    ("git", 8), ("docker", 8), ("kubernetes", 8), ("node.js", 8),
    ("angular", 7), ("vue", 7), ("django", 7), ("flask", 7), ("spring", 7),
    ("html", 5), ("css", 5), ("bootstrap", 4),
];

/// A compiled regex with a human-readable label
#[derive(Debug, Clone)]
pub struct LabeledPattern {
    pub label: &'static str,
    pub regex: Regex,
}

#[derive(Debug, Clone)]
pub struct ContactPatterns {
    pub email: Regex,
    pub phone: Regex,
    pub linkedin: Regex,
    pub github: Regex,
}

pub struct SkillCatalog {
    categories: Vec<(SkillCategory, Vec<String>)>,
    industries: Vec<(String, Vec<String>)>,
    all_technical: Vec<String>,
    soft_skills: Vec<String>,
    technical_matcher: PhraseMatcher,
    soft_matcher: PhraseMatcher,
    experience_patterns: Vec<LabeledPattern>,
    required_experience_patterns: Vec<LabeledPattern>,
    education_patterns: Vec<(EducationLevel, Vec<Regex>)>,
    education_requirement_patterns: Vec<(EducationLevel, Regex)>,
    contact_patterns: ContactPatterns,
    quantity_pattern: Regex,
    complexity_patterns: Vec<Regex>,
    importance: HashMap<&'static str, u32>,
}

impl SkillCatalog {
    /// Build and validate the built-in tables.
    ///
    /// Fails with `MalformedPattern` when a regex does not compile or a skill
    /// entry is not a trimmed, lowercase, non-empty phrase.
    pub fn new() -> Result<Self> {
        let categories = vec![
            (SkillCategory::ProgrammingLanguages, owned(PROGRAMMING_LANGUAGES)?),
            (SkillCategory::FrameworksLibraries, owned(FRAMEWORKS_LIBRARIES)?),
            (SkillCategory::Databases, owned(DATABASES)?),
            (SkillCategory::CloudDevops, owned(CLOUD_DEVOPS)?),
            (SkillCategory::ToolsTechnologies, owned(TOOLS_TECHNOLOGIES)?),
            (SkillCategory::Methodologies, owned(METHODOLOGIES)?),
        ];

        let industries = INDUSTRY_SKILLS
            .iter()
            .map(|(name, skills)| -> Result<(String, Vec<String>)> {
                Ok((name.to_string(), owned(skills)?))
            })
            .collect::<Result<Vec<_>>>()?;

        let all_technical = dedup_in_order(
            categories
                .iter()
                .flat_map(|(_, skills)| skills.iter())
                .chain(industries.iter().flat_map(|(_, skills)| skills.iter())),
        );
        let soft_skills = dedup_in_order(owned(SOFT_SKILLS)?.iter());

        let technical_matcher = PhraseMatcher::new(&all_technical)?;
        let soft_matcher = PhraseMatcher::new(&soft_skills)?;

        let experience_patterns = labeled(EXPERIENCE_PATTERNS)?;
        let required_experience_patterns = labeled(REQUIRED_EXPERIENCE_PATTERNS)?;

        let education_patterns = EDUCATION_PATTERNS
            .iter()
            .map(|(level, patterns)| -> Result<(EducationLevel, Vec<Regex>)> {
                let compiled = patterns
                    .iter()
                    .map(|p| compile(&format!("(?i){}", p)))
                    .collect::<Result<Vec<_>>>()?;
                Ok((*level, compiled))
            })
            .collect::<Result<Vec<_>>>()?;

        let education_requirement_patterns = EDUCATION_REQUIREMENT_PATTERNS
            .iter()
            .map(|(level, p)| -> Result<(EducationLevel, Regex)> { Ok((*level, compile(p)?)) })
            .collect::<Result<Vec<_>>>()?;

        let contact_patterns = ContactPatterns {
            email: compile(EMAIL_PATTERN)?,
            phone: compile(PHONE_PATTERN)?,
            linkedin: compile(LINKEDIN_PATTERN)?,
            github: compile(GITHUB_PATTERN)?,
        };

        let complexity_patterns = COMPLEXITY_PATTERNS
            .iter()
            .map(|p| compile(p))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            categories,
            industries,
            all_technical,
            soft_skills,
            technical_matcher,
            soft_matcher,
            experience_patterns,
            required_experience_patterns,
            education_patterns,
            education_requirement_patterns,
            contact_patterns,
            quantity_pattern: compile(QUANTITY_PATTERN)?,
            complexity_patterns,
            importance: SKILL_IMPORTANCE.iter().copied().collect(),
        })
    }

    /// Technical skills across all categories and industries, deduplicated,
    /// in catalog order
    pub fn all_technical_skills(&self) -> &[String] {
        &self.all_technical
    }

    pub fn soft_skills(&self) -> &[String] {
        &self.soft_skills
    }

    /// Category a technical skill is listed under, if any
    pub fn category_of(&self, skill: &str) -> Option<SkillCategory> {
        self.categories
            .iter()
            .find(|(_, skills)| skills.iter().any(|s| s == skill))
            .map(|(category, _)| *category)
    }

    pub fn industry_keywords(&self) -> &[(String, Vec<String>)] {
        &self.industries
    }

    pub fn experience_patterns(&self) -> &[LabeledPattern] {
        &self.experience_patterns
    }

    pub fn required_experience_patterns(&self) -> &[LabeledPattern] {
        &self.required_experience_patterns
    }

    /// Ordered phd, masters, bachelors, associates
    pub fn education_patterns(&self) -> &[(EducationLevel, Vec<Regex>)] {
        &self.education_patterns
    }

    pub fn education_requirement_patterns(&self) -> &[(EducationLevel, Regex)] {
        &self.education_requirement_patterns
    }

    /// Ordered senior, mid, junior
    pub fn job_level_patterns(&self) -> &'static [(JobLevel, &'static [&'static str])] {
        JOB_LEVEL_INDICATORS
    }

    pub fn company_size_indicators(&self) -> &'static [(CompanySize, &'static [&'static str])] {
        COMPANY_SIZE_INDICATORS
    }

    pub fn contact_patterns(&self) -> &ContactPatterns {
        &self.contact_patterns
    }

    pub fn quantity_pattern(&self) -> &Regex {
        &self.quantity_pattern
    }

    pub fn complexity_patterns(&self) -> &[Regex] {
        &self.complexity_patterns
    }

    pub fn skill_importance(&self, skill: &str) -> u32 {
        self.importance
            .get(skill)
            .copied()
            .unwrap_or(DEFAULT_SKILL_IMPORTANCE)
    }

    pub fn related_industries(&self, industry: &str) -> &'static [&'static str] {
        for &(name, related) in RELATED_INDUSTRIES {
            if name == industry {
                return related;
            }
        }
        &[]
    }

    /// Technical skills found standalone in already-lowercased text
    pub fn find_technical_skills(&self, lowered: &str) -> Vec<String> {
        self.technical_matcher
            .find_standalone(lowered)
            .into_iter()
            .map(|i| self.all_technical[i].clone())
            .collect()
    }

    pub fn find_soft_skills(&self, lowered: &str) -> Vec<String> {
        self.soft_matcher
            .find_standalone(lowered)
            .into_iter()
            .map(|i| self.soft_skills[i].clone())
            .collect()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ResumeOptimizerError::MalformedPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}

fn labeled(table: &[(&'static str, &str)]) -> Result<Vec<LabeledPattern>> {
    table
        .iter()
        .map(|&(label, pattern)| -> Result<LabeledPattern> {
            Ok(LabeledPattern {
                label,
                regex: compile(pattern)?,
            })
        })
        .collect()
}

fn owned(list: &[&str]) -> Result<Vec<String>> {
    list.iter()
        .map(|s| {
            if s.is_empty() || s.trim() != *s || s.to_lowercase() != *s {
                Err(ResumeOptimizerError::MalformedPattern {
                    pattern: s.to_string(),
                    reason: "skill entries must be non-empty, trimmed and lowercase".to_string(),
                })
            } else {
                Ok(s.to_string())
            }
        })
        .collect()
}

fn dedup_in_order<'a>(items: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    items
        .filter(|s| seen.insert(s.to_string()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_builds() {
        let catalog = SkillCatalog::new().unwrap();
        assert!(catalog.all_technical_skills().len() > 150);
        assert_eq!(catalog.soft_skills().len(), 35);
        assert_eq!(catalog.industry_keywords().len(), 6);
    }

    #[test]
    fn test_technical_skills_deduplicated() {
        let catalog = SkillCatalog::new().unwrap();
        let skills = catalog.all_technical_skills();
        let unique: HashSet<_> = skills.iter().collect();
        assert_eq!(unique.len(), skills.len());

        // c++ first appears among the languages, not under gaming
        let cpp = skills.iter().position(|s| s == "c++").unwrap();
        let blockchain = skills.iter().position(|s| s == "blockchain").unwrap();
        assert!(cpp < blockchain);
    }

    #[test]
    fn test_education_patterns_ordered() {
        let catalog = SkillCatalog::new().unwrap();
        let levels: Vec<_> = catalog.education_patterns().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            levels,
            vec![
                EducationLevel::Phd,
                EducationLevel::Masters,
                EducationLevel::Bachelors,
                EducationLevel::Associates
            ]
        );
    }

    #[test]
    fn test_job_levels_ordered() {
        let catalog = SkillCatalog::new().unwrap();
        let levels: Vec<_> = catalog.job_level_patterns().iter().map(|(l, _)| *l).collect();
        assert_eq!(levels, vec![JobLevel::Senior, JobLevel::Mid, JobLevel::Junior]);
    }

    #[test]
    fn test_skill_importance() {
        let catalog = SkillCatalog::new().unwrap();
        let cases = [("python", 10), ("react", 9), ("docker", 8), ("flask", 7), ("css", 5), ("bootstrap", 4), ("terraform", 3)];
        for (skill, expected) in cases {
            assert_eq!(catalog.skill_importance(skill), expected, "skill = {}", skill);
        }
    }

    #[test]
    fn test_related_industries() {
        let catalog = SkillCatalog::new().unwrap();
        assert_eq!(catalog.related_industries("technology"), &["fintech", "ai_ml", "iot"]);
        assert!(catalog.related_industries("gaming").is_empty());
    }

    #[test]
    fn test_malformed_entries_rejected() {
        assert!(matches!(owned(&["Python"]), Err(ResumeOptimizerError::MalformedPattern { .. })));
        assert!(matches!(owned(&[" go"]), Err(ResumeOptimizerError::MalformedPattern { .. })));
        assert!(matches!(compile("(unclosed"), Err(ResumeOptimizerError::MalformedPattern { .. })));
    }

    #[test]
    fn test_category_lookup() {
        let catalog = SkillCatalog::new().unwrap();
        assert_eq!(catalog.category_of("postgresql"), Some(SkillCategory::Databases));
        assert_eq!(catalog.category_of("kubernetes"), Some(SkillCategory::CloudDevops));
        assert_eq!(catalog.category_of("blockchain"), None);
    }

    #[test]
    fn test_experience_patterns_labeled() {
        let catalog = SkillCatalog::new().unwrap();
        let labels: Vec<&str> = catalog.experience_patterns().iter().map(|p| p.label).collect();
        assert_eq!(labels[0], "years of experience");
        assert_eq!(labels.len(), 6);

        let required: Vec<&str> = catalog.required_experience_patterns().iter().map(|p| p.label).collect();
        assert_eq!(required, vec!["years of experience", "minimum years", "at least years", "year range"]);
    }
}
