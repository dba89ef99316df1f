//! Prioritized improvement suggestions derived from a match result

use crate::processing::facts::Facts;
use crate::processing::scorer::{MatchResult, MatchStrength};

pub const MAX_SUGGESTIONS: usize = 10;

const UNIVERSAL_TIPS: &[&str] = &[
    "📊 Use specific metrics and numbers to demonstrate impact (e.g., 'Reduced processing time by 40%', 'Managed $2M budget')",
    "💪 Start bullet points with strong action verbs: Architected, Optimized, Spearheaded, Streamlined, Pioneered",
    "🎯 Customize your Professional Summary to directly address the job requirements and company needs",
    "📱 Ensure your resume is mobile-friendly and prints correctly in both PDF and text formats",
    "🔄 Use consistent formatting, bullet styles, and date formats throughout your resume",
];

const UNIVERSAL_TIPS_USED: usize = 3;

#[derive(Debug, Default, Clone, Copy)]
pub struct SuggestionEngine;

impl SuggestionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Ordered, capped list of suggestions. Rules fire in a fixed priority
    /// order; strength advice and general tips always follow.
    pub fn suggest(&self, result: &MatchResult, resume: &Facts, job: &Facts) -> Vec<String> {
        let mut suggestions = Vec::new();

        if result.overall_score < 40.0 {
            suggestions.push(
                "🚨 CRITICAL: Your resume requires major optimization. Consider professional resume writing services or significant restructuring."
                    .to_string(),
            );
        }

        if !result.top_skill_gaps.is_empty() {
            let gaps = &result.top_skill_gaps;
            if gaps.len() > 3 {
                suggestions.push(format!(
                    "🔧 HIGH PRIORITY: Add these critical technical skills: {}. Consider online courses or certifications.",
                    gaps[..3].join(", ")
                ));
            } else {
                suggestions.push(format!(
                    "🔧 TECHNICAL SKILLS: Include experience with {} in your resume.",
                    gaps.join(", ")
                ));
            }
        }

        if result.experience_gap > 2 {
            suggestions.push(format!(
                "📈 EXPERIENCE GAP: You need {} more years of experience. Highlight relevant projects, internships, and volunteer work to bridge this gap.",
                result.experience_gap
            ));
        } else if result.experience_gap > 0 {
            suggestions.push(format!(
                "📊 Emphasize transferable skills and relevant projects to compensate for the {}-year experience gap.",
                result.experience_gap
            ));
        }

        if result.experience_surplus > 5 {
            suggestions.push(
                "💼 You're significantly overqualified. Consider applying for senior positions or highlighting leadership and mentoring experience."
                    .to_string(),
            );
        }

        if result.missing_soft_skills.len() > 2 {
            suggestions.push(format!(
                "🤝 SOFT SKILLS: Demonstrate these competencies: {}. Use specific examples in your experience section.",
                result.missing_soft_skills[..3].join(", ")
            ));
        }

        if result.ats_compatibility_score < 70.0 {
            suggestions.push(
                "🤖 ATS COMPATIBILITY: Improve formatting - use standard fonts, avoid tables/images, and include standard section headings ('Experience', 'Education', 'Skills')."
                    .to_string(),
            );
        }

        if resume.quality_overall() < 70.0 {
            suggestions.push(
                "✍️ CONTENT QUALITY: Add more quantified achievements (e.g., 'Increased efficiency by 25%', 'Led team of 8 developers')."
                    .to_string(),
            );
        }

        if result.keyword_score < 60.0 {
            suggestions.push(
                "🎯 KEYWORDS: Incorporate more job-specific terms naturally throughout your resume. Use both acronyms and full terms (e.g., 'AI/Artificial Intelligence')."
                    .to_string(),
            );
        }

        if result.industry_score < 70.0 {
            if let (Some(resume_industry), Some(job_industry)) = (resume.industry(), job.industry()) {
                if resume_industry != job_industry {
                    suggestions.push(format!(
                        "🏢 INDUSTRY FOCUS: Tailor your experience to emphasize {} industry knowledge and terminology.",
                        job_industry
                    ));
                }
            }
        }

        if result.education_score < 80.0 {
            if let Some(required) = job.education_required() {
                suggestions.push(format!(
                    "🎓 EDUCATION: Ensure your {} degree is prominently displayed. Include relevant coursework if applicable.",
                    required
                ));
            }
        }

        suggestions.push(strength_advice(result.match_strength).to_string());
        suggestions.extend(UNIVERSAL_TIPS.iter().take(UNIVERSAL_TIPS_USED).map(|tip| tip.to_string()));

        suggestions.truncate(MAX_SUGGESTIONS);
        suggestions
    }
}

fn strength_advice(strength: MatchStrength) -> &'static str {
    match strength {
        MatchStrength::Poor => "📋 STRATEGY: Consider significant resume restructuring. Focus on the top 3-5 missing skills and create specific examples of how you've used similar technologies.",
        MatchStrength::Fair => "📝 OPTIMIZATION: You're close to a good match. Focus on incorporating the missing technical skills and quantifying your achievements.",
        MatchStrength::Good => "🔧 FINE-TUNING: Minor adjustments needed. Add the missing skills and ensure your resume is ATS-optimized.",
        MatchStrength::Excellent => "⭐ EXCELLENT MATCH: Your resume aligns well with this position. Consider customizing your summary to mention specific company needs.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::catalog::SkillCatalog;
    use crate::processing::facts::{EducationLevel, JobProfile, QualityMetrics};
    use crate::processing::scorer::MatchScorer;
    use std::sync::Arc;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn score(resume: &Facts, job: &Facts) -> MatchResult {
        MatchScorer::new(Arc::new(SkillCatalog::new().unwrap())).score(resume, job)
    }

    fn strong_resume() -> Facts {
        Facts {
            technical_skills: strings(&["python", "sql"]),
            soft_skills: strings(&["leadership"]),
            keywords: strings(&["platform", "data"]),
            experience_years: 5,
            education_level: Some(EducationLevel::Masters),
            detected_industry: "technology".to_string(),
            ats_score: Some(100.0),
            quality_metrics: Some(QualityMetrics {
                overall_quality: 90.0,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn matching_job() -> Facts {
        Facts {
            technical_skills: strings(&["python", "sql"]),
            soft_skills: strings(&["leadership"]),
            keywords: strings(&["platform", "data"]),
            detected_industry: "technology".to_string(),
            job_profile: Some(JobProfile {
                experience_required: 5,
                education_required: Some(EducationLevel::Bachelors),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_excellent_match_gets_strength_and_tips_only() {
        let resume = strong_resume();
        let job = matching_job();
        let result = score(&resume, &job);
        let suggestions = SuggestionEngine::new().suggest(&result, &resume, &job);

        assert_eq!(result.match_strength, MatchStrength::Excellent);
        assert_eq!(suggestions.len(), 4);
        assert!(suggestions[0].starts_with("⭐ EXCELLENT MATCH"));
        assert!(suggestions[1].starts_with("📊 Use specific metrics"));
        assert!(suggestions[3].starts_with("🎯 Customize your Professional Summary"));
    }

    #[test]
    fn test_poor_match_hits_every_rule_and_caps() {
        let resume = Facts {
            soft_skills: strings(&[]),
            detected_industry: "healthcare".to_string(),
            ..Default::default()
        };
        let job = Facts {
            technical_skills: strings(&["python", "java", "aws", "docker", "kubernetes", "git"]),
            soft_skills: strings(&["leadership", "communication", "teamwork", "mentoring"]),
            keywords: strings(&["platform"]),
            detected_industry: "gaming".to_string(),
            job_profile: Some(JobProfile {
                experience_required: 8,
                education_required: Some(EducationLevel::Masters),
                ..Default::default()
            }),
            ..Default::default()
        };
        let result = score(&resume, &job);
        let suggestions = SuggestionEngine::new().suggest(&result, &resume, &job);

        assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
        assert!(suggestions[0].starts_with("🚨 CRITICAL"));
        assert_eq!(
            suggestions[1],
            "🔧 HIGH PRIORITY: Add these critical technical skills: python, java, aws. Consider online courses or certifications."
        );
        assert!(suggestions[2].contains("You need 8 more years"));
        assert!(suggestions[3].contains("leadership, communication, teamwork"));
        assert!(suggestions[4].starts_with("🤖 ATS COMPATIBILITY"));
        assert!(suggestions[5].starts_with("✍️ CONTENT QUALITY"));
        assert!(suggestions[6].starts_with("🎯 KEYWORDS"));
        assert!(suggestions[7].contains("emphasize gaming industry"));
        assert!(suggestions[8].contains("Ensure your masters degree"));
        assert!(suggestions[9].starts_with("📋 STRATEGY"));
    }

    #[test]
    fn test_small_gaps_use_softer_wording() {
        let resume = strong_resume();
        let mut job = matching_job();
        job.technical_skills.push("aws".to_string());
        if let Some(profile) = job.job_profile.as_mut() {
            profile.experience_required = 6;
        }
        let result = score(&resume, &job);
        let suggestions = SuggestionEngine::new().suggest(&result, &resume, &job);

        assert!(suggestions.contains(&"🔧 TECHNICAL SKILLS: Include experience with aws in your resume.".to_string()));
        assert!(suggestions
            .iter()
            .any(|s| s.contains("compensate for the 1-year experience gap")));
    }

    #[test]
    fn test_overqualified() {
        let mut resume = strong_resume();
        resume.experience_years = 12;
        let job = matching_job();
        let result = score(&resume, &job);
        let suggestions = SuggestionEngine::new().suggest(&result, &resume, &job);

        assert_eq!(result.experience_surplus, 7);
        assert!(suggestions.iter().any(|s| s.starts_with("💼 You're significantly overqualified")));
    }

    #[test]
    fn test_industry_rule_needs_both_sides_known() {
        let mut resume = strong_resume();
        resume.detected_industry.clear();
        let mut job = matching_job();
        job.detected_industry = "gaming".to_string();
        let result = score(&resume, &job);
        let suggestions = SuggestionEngine::new().suggest(&result, &resume, &job);

        assert!(!suggestions.iter().any(|s| s.contains("INDUSTRY FOCUS")));
    }
}
