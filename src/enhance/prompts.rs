//! Prompt text for the chat-completions provider.
//!
//! Every prompt asks for a single JSON object; the client tolerates fences
//! and surrounding prose anyway.

pub const JOB_ANALYST_SYSTEM: &str = "You are an expert job market analyst and content extractor. \
    Extract clean, accurate job posting information while filtering out promotional content and website noise.";

pub const RESUME_WRITER_SYSTEM: &str = "You are a professional resume writer specializing in ATS optimization \
    and career advancement. Create compelling, results-oriented content.";

pub const CAREER_COUNSELOR_SYSTEM: &str = "You are a professional career counselor and resume optimization expert \
    with 15+ years of experience in ATS systems and hiring practices.";

/// Character budgets for texts embedded in the action-item prompt
pub const RESUME_PROMPT_CHARS: usize = 3000;
pub const JOB_PROMPT_CHARS: usize = 2000;

pub fn job_analysis_prompt(url: &str) -> String {
    format!(
        r#"Please analyze this job posting URL and extract the following information.

URL: {url}

Focus only on the actual job posting content. Ignore navigation menus, advertisements,
promotional banners, footer content and related job suggestions.

Respond with this exact JSON object:
{{
    "job_title": "...",
    "company_name": "...",
    "location": "...",
    "experience_required": "...",
    "education_requirements": "...",
    "technical_skills": ["..."],
    "soft_skills": ["..."],
    "responsibilities": ["..."],
    "clean_job_description": "..."
}}"#
    )
}

pub fn optimization_prompt(experience_years: u32, job_title: &str, required_skills: &[String]) -> String {
    let skills = if required_skills.is_empty() {
        "relevant technologies".to_string()
    } else {
        required_skills.iter().take(5).cloned().collect::<Vec<_>>().join(", ")
    };

    format!(
        r#"Create an optimized professional summary and experience descriptions for this resume based on the job requirements:

CURRENT RESUME DATA:
- Experience: {experience_years} years
- Target Job: {job_title}
- Required Skills: {skills}

Respond with this JSON object:
{{
    "professional_summary": "...",
    "optimized_experience_bullets": ["...", "...", "..."],
    "key_achievements": ["...", "..."],
    "skills_summary": "...",
    "cover_letter_opener": "..."
}}

Requirements:
1. Use action verbs (Developed, Led, Implemented, Architected)
2. Include quantifiable metrics where possible
3. Incorporate job-relevant keywords naturally
4. Keep the language ATS-friendly
5. Focus on achievements, not just responsibilities"#
    )
}

pub fn action_items_prompt(resume_text: &str, job_text: &str) -> String {
    format!(
        r#"As a professional resume optimization expert, analyze this resume against the job description and provide actionable optimization advice.

RESUME:
{}

JOB DESCRIPTION:
{}

Respond with this JSON object:
{{
    "recommended_action_items": ["..."]
}}

Cover ATS compatibility, keyword optimization, quantifiable achievements and skill gaps."#,
        truncate_chars(resume_text, RESUME_PROMPT_CHARS),
        truncate_chars(job_text, JOB_PROMPT_CHARS)
    )
}

/// Prefix of at most `max` characters, never splitting a char
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("short", 10), "short");
    }

    #[test]
    fn test_action_prompt_truncates_inputs() {
        let resume = "r".repeat(RESUME_PROMPT_CHARS + 500);
        let prompt = action_items_prompt(&resume, "job text");

        assert!(prompt.contains(&"r".repeat(RESUME_PROMPT_CHARS)));
        assert!(!prompt.contains(&"r".repeat(RESUME_PROMPT_CHARS + 1)));
        assert!(prompt.contains("job text"));
    }

    #[test]
    fn test_optimization_prompt_skills() {
        let skills: Vec<String> = ["rust", "go", "aws", "gcp", "sql", "kafka"].iter().map(|s| s.to_string()).collect();
        let prompt = optimization_prompt(4, "Backend Engineer", &skills);

        assert!(prompt.contains("Required Skills: rust, go, aws, gcp, sql\n"));
        assert!(optimization_prompt(0, "X", &[]).contains("relevant technologies"));
    }
}
