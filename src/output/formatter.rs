//! Report formatters: console, JSON, Markdown and HTML

use crate::config::OutputFormat;
use crate::error::{Result, ResumeOptimizerError};
use crate::output::report::AnalysisReport;
use crate::processing::facts::Facts;
use crate::processing::scorer::MatchStrength;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

/// Dimension label, score and weight, in display order
fn score_rows(report: &AnalysisReport) -> [(&'static str, f64, f64); 6] {
    let m = &report.match_result;
    let w = &m.scoring_weights;
    [
        ("Technical Skills", m.technical_score, w.technical),
        ("Soft Skills", m.soft_skills_score, w.soft_skills),
        ("Experience", m.experience_score, w.experience),
        ("Education", m.education_score, w.education),
        ("Industry", m.industry_score, w.industry),
        ("Keywords", m.keyword_score, w.keywords),
    ]
}

fn strength_label(strength: MatchStrength) -> &'static str {
    match strength {
        MatchStrength::Excellent => "EXCELLENT",
        MatchStrength::Good => "GOOD",
        MatchStrength::Fair => "FAIR",
        MatchStrength::Poor => "POOR",
    }
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn source_name(source: &str) -> String {
    Path::new(source)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            3 => "▒",
            _ => "░",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            3 => Color::Yellow,
            _ => Color::White,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, strength: MatchStrength) -> String {
        let color = match strength {
            MatchStrength::Excellent => Color::Green,
            MatchStrength::Good => Color::BrightGreen,
            MatchStrength::Fair => Color::Yellow,
            MatchStrength::Poor => Color::BrightRed,
        };
        let badge = strength_label(strength);

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn score_color(score: f64) -> Color {
        match score {
            s if s >= 80.0 => Color::Green,
            s if s >= 60.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_facts(&self, title: &str, facts: &Facts) -> String {
        let mut output = self.format_header(title, 3);
        output.push_str(&format!("Technical skills: {}\n", join_or_none(&facts.technical_skills)));
        output.push_str(&format!("Soft skills: {}\n", join_or_none(&facts.soft_skills)));
        output.push_str(&format!(
            "Experience: {} years ({})\n",
            facts.experience_years, facts.experience_level
        ));
        output.push_str(&format!(
            "Education: {}\n",
            facts.education_level.map_or("not detected".to_string(), |e| e.to_string())
        ));
        output.push_str(&format!("Industry: {}\n", facts.industry().unwrap_or("unknown")));

        if let Some(profile) = &facts.job_profile {
            output.push_str(&format!(
                "Requires: {} years, level {}, education {}\n",
                profile.experience_required,
                profile.job_level,
                profile.education_required.map_or("none".to_string(), |e| e.to_string())
            ));
            output.push_str(&format!(
                "Company size: {} | Remote: {} | Urgent: {} | Complexity: {:.1}\n",
                profile.company_size,
                if profile.remote_friendly { "yes" } else { "no" },
                if profile.urgent_hire { "yes" } else { "no" },
                profile.job_complexity_score
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.match_result;
        let mut output = String::new();

        output.push_str(&self.format_header("📊 RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Overall Match", 2));
        output.push_str(&format!(
            "Overall Score: {:.1}% {}\n",
            result.overall_score,
            self.format_score_badge(result.match_strength)
        ));
        output.push_str(&format!("ATS Compatibility: {:.1}%\n", result.ats_compatibility_score));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (label, score, weight) in score_rows(report) {
            let value = self.colorize(&format!("{:.1}%", score), Self::score_color(score));
            output.push_str(&format!("  {:<18} {} (weight: {:.0}%)\n", label, value, weight * 100.0));
        }

        output.push_str(&self.format_header("Skills", 3));
        output.push_str(&format!(
            "✅ Matched: {}\n",
            self.colorize(&join_or_none(&result.matched_skills), Color::Green)
        ));
        if !result.top_skill_gaps.is_empty() {
            output.push_str(&format!(
                "❌ Top gaps: {}\n",
                self.colorize(&result.top_skill_gaps.join(", "), Color::Red)
            ));
        }
        if result.experience_gap > 0 {
            output.push_str(&format!("📈 Experience gap: {} years\n", result.experience_gap));
        }

        if self.detailed {
            let missing: Vec<String> = report.missing_skills().cloned().collect();
            output.push_str(&format!("Missing skills: {}\n", join_or_none(&missing)));
            output.push_str(&format!("Matched keywords: {}\n", join_or_none(&result.matched_keywords)));
            output.push_str(&self.format_facts("Resume Facts", &report.resume));
            output.push_str(&self.format_facts("Job Facts", &report.job));
        }

        output.push_str(&self.format_header("💡 Suggestions", 2));
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            output.push_str(&format!("{:>2}. {}\n", i + 1, suggestion));
        }

        if let Some(content) = &report.optimized_content {
            output.push_str(&self.format_header("✨ AI-Optimized Content", 2));
            if !content.professional_summary.is_empty() {
                output.push_str(&format!("Summary: {}\n", self.colorize(&content.professional_summary, Color::Cyan)));
            }
            for bullet in &content.optimized_experience_bullets {
                output.push_str(&format!("  • {}\n", bullet));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(strength: MatchStrength) -> &'static str {
        match strength {
            MatchStrength::Excellent => "🟢 Excellent",
            MatchStrength::Good => "🟡 Good",
            MatchStrength::Fair => "🟠 Fair",
            MatchStrength::Poor => "🔴 Poor",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.match_result;
        let mut output = String::new();

        output.push_str("# 📊 Resume Match Analysis Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                source_name(&report.metadata.resume_source),
                source_name(&report.metadata.job_source)
            ));
        }

        output.push_str("## Overall Match\n\n");
        output.push_str(&format!(
            "**Overall Score:** {:.1}% {}\n\n",
            result.overall_score,
            Self::markdown_score_badge(result.match_strength)
        ));
        output.push_str(&format!("**ATS Compatibility:** {:.1}%\n\n", result.ats_compatibility_score));

        output.push_str("### Score Breakdown\n\n");
        output.push_str("| Dimension | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for (label, score, weight) in score_rows(report) {
            output.push_str(&format!("| {} | {:.1}% | {:.0}% |\n", label, score, weight * 100.0));
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        output.push_str(&format!("- **Matched:** {}\n", join_or_none(&result.matched_skills)));
        output.push_str(&format!(
            "- **Missing technical:** {}\n",
            join_or_none(&result.missing_technical_skills)
        ));
        output.push_str(&format!("- **Missing soft:** {}\n", join_or_none(&result.missing_soft_skills)));
        output.push_str(&format!("- **Top gaps:** {}\n\n", join_or_none(&result.top_skill_gaps)));

        output.push_str("## 💡 Suggestions\n\n");
        for (i, suggestion) in report.suggestions.iter().enumerate() {
            output.push_str(&format!("{}. {}\n", i + 1, suggestion));
        }
        output.push('\n');

        if let Some(content) = &report.optimized_content {
            output.push_str("## ✨ AI-Optimized Content\n\n");
            if !content.professional_summary.is_empty() {
                output.push_str(&format!("> {}\n\n", content.professional_summary));
            }
            for bullet in &content.optimized_experience_bullets {
                output.push_str(&format!("- {}\n", bullet));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by resume-optimizer v{}{}*\n",
                report.metadata.tool_version,
                if report.metadata.enhancement_used { " with AI enhancement" } else { "" }
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

struct HtmlScoreRow {
    label: &'static str,
    score: String,
    weight: String,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Analysis Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; margin-bottom: 30px; border-bottom: 3px solid #007acc; padding-bottom: 20px; }
        .score-badge { display: inline-block; padding: 8px 16px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        table { border-collapse: collapse; width: 100%; }
        td, th { padding: 8px; border-bottom: 1px solid #e9ecef; text-align: left; }
        .suggestion { background: #f8f9fa; padding: 12px; margin: 8px 0; border-radius: 6px; border-left: 4px solid #17a2b8; }
        .metadata { background: #e9ecef; padding: 15px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>📊 Resume Match Analysis Report</h1>
            <p>Generated: {{ generated_at }} | Processing time: {{ processing_time }}ms</p>
        </div>

        <div class="section">
            <h2>Overall Match</h2>
            <h3>Overall Score: {{ overall_score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <p><strong>ATS Compatibility:</strong> {{ ats_score }}%</p>
            <table>
                <tr><th>Dimension</th><th>Score</th><th>Weight</th></tr>
                {% for row in score_rows %}
                <tr><td>{{ row.label }}</td><td>{{ row.score }}%</td><td>{{ row.weight }}%</td></tr>
                {% endfor %}
            </table>
        </div>

        <div class="section">
            <h2>Skills</h2>
            <p><strong>Matched:</strong> {{ matched_skills }}</p>
            <p><strong>Missing:</strong> {{ missing_skills }}</p>
            <p><strong>Top gaps:</strong> {{ top_gaps }}</p>
        </div>

        <div class="section">
            <h2>💡 Suggestions</h2>
            {% for suggestion in suggestions %}
            <div class="suggestion">{{ suggestion }}</div>
            {% endfor %}
        </div>

        {% if has_optimized_content %}
        <div class="section">
            <h2>✨ AI-Optimized Content</h2>
            <blockquote>{{ professional_summary }}</blockquote>
            {% if !bullets.is_empty() %}
            <ul>
                {% for bullet in bullets %}
                <li>{{ bullet }}</li>
                {% endfor %}
            </ul>
            {% endif %}
        </div>
        {% endif %}

        <div class="metadata">
            <p><strong>ℹ️ Generated by resume-optimizer v{{ version }}</strong></p>
            <p><strong>Resume:</strong> {{ resume_file }} | <strong>Job:</strong> {{ job_file }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    generated_at: String,
    processing_time: u64,
    overall_score: String,
    score_class: &'static str,
    score_label: &'static str,
    ats_score: String,
    score_rows: Vec<HtmlScoreRow>,
    matched_skills: String,
    missing_skills: String,
    top_gaps: String,
    suggestions: Vec<String>,
    has_optimized_content: bool,
    professional_summary: String,
    bullets: Vec<String>,
    version: String,
    resume_file: String,
    job_file: String,
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let result = &report.match_result;

        let score_class = match result.match_strength {
            MatchStrength::Excellent => "score-excellent",
            MatchStrength::Good => "score-good",
            MatchStrength::Fair => "score-fair",
            MatchStrength::Poor => "score-poor",
        };

        let score_rows = score_rows(report)
            .into_iter()
            .map(|(label, score, weight)| HtmlScoreRow {
                label,
                score: format!("{:.1}", score),
                weight: format!("{:.0}", weight * 100.0),
            })
            .collect();

        let missing: Vec<String> = report.missing_skills().cloned().collect();
        let content = report.optimized_content.as_ref();

        let bullets = content
            .map(|c| c.optimized_experience_bullets.clone())
            .unwrap_or_default();

        HtmlTemplate {
            include_styles: self.include_styles,
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            processing_time: report.metadata.processing_time_ms,
            overall_score: format!("{:.1}", result.overall_score),
            score_class,
            score_label: strength_label(result.match_strength),
            ats_score: format!("{:.1}", result.ats_compatibility_score),
            score_rows,
            matched_skills: join_or_none(&result.matched_skills),
            missing_skills: join_or_none(&missing),
            top_gaps: join_or_none(&result.top_skill_gaps),
            suggestions: report.suggestions.clone(),
            has_optimized_content: content.is_some(),
            professional_summary: content.map(|c| c.professional_summary.clone()).unwrap_or_default(),
            bullets,
            version: report.metadata.tool_version.clone(),
            resume_file: source_name(&report.metadata.resume_source),
            job_file: source_name(&report.metadata.job_source),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeOptimizerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false)
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    /// Text output for every format except PDF, which the document renderer
    /// writes as bytes
    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
            OutputFormat::Pdf => Err(ResumeOptimizerError::OutputFormatting(
                "PDF reports are written by the document renderer".to_string(),
            )),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
        OutputFormat::Pdf => "pdf",
    };

    format!("{}_analysis{}.{}", base_name, timestamp_suffix, extension)
}
