//! Optimized resume rendering to PDF, with a plain-text fallback

use crate::enhance::OptimizedContent;
use crate::error::{Result, ResumeOptimizerError};
use crate::processing::catalog::SkillCatalog;
use crate::processing::facts::{ContactInfo, Facts};
use crate::processing::scorer::MatchResult;
use crate::processing::text_processor::collapse_whitespace;
use log::{debug, info, warn};
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

pub const PREVIEW_CHARS: usize = 500;
pub const ANALYSIS_SUGGESTIONS: usize = 8;
const MAX_ALTERNATIVES: usize = 2;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateId {
    AtsModern,
    TechFocused,
    ClassicProfessional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    Summary,
    Skills,
    Experience,
    Analysis,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::AtsModern, TemplateId::TechFocused, TemplateId::ClassicProfessional];

    pub fn id(self) -> &'static str {
        match self {
            TemplateId::AtsModern => "ats_modern",
            TemplateId::TechFocused => "tech_focused",
            TemplateId::ClassicProfessional => "classic_professional",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            TemplateId::AtsModern => "Modern ATS",
            TemplateId::TechFocused => "Tech Focused",
            TemplateId::ClassicProfessional => "Classic Professional",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TemplateId::AtsModern => "Clean, professional format optimized for ATS systems",
            TemplateId::TechFocused => "Emphasizes technical skills and achievements with modern styling",
            TemplateId::ClassicProfessional => "Traditional corporate resume format with clean structure",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Unknown ids fall back to `AtsModern`
    pub fn resolve(id: &str) -> Self {
        Self::from_id(id).unwrap_or_else(|| {
            warn!("Unknown template '{}', using {}", id, TemplateId::AtsModern.id());
            TemplateId::AtsModern
        })
    }

    fn sections(self) -> &'static [(SectionKind, &'static str)] {
        match self {
            TemplateId::AtsModern => &[
                (SectionKind::Summary, "SUMMARY"),
                (SectionKind::Skills, "SKILLS"),
                (SectionKind::Experience, "EXPERIENCE"),
                (SectionKind::Analysis, "ANALYSIS"),
            ],
            TemplateId::TechFocused => &[
                (SectionKind::Skills, "TECHNICAL SKILLS"),
                (SectionKind::Summary, "SUMMARY"),
                (SectionKind::Experience, "EXPERIENCE"),
                (SectionKind::Analysis, "ANALYSIS"),
            ],
            TemplateId::ClassicProfessional => &[
                (SectionKind::Summary, "PROFESSIONAL SUMMARY"),
                (SectionKind::Experience, "EXPERIENCE"),
                (SectionKind::Skills, "CORE COMPETENCIES"),
                (SectionKind::Analysis, "ANALYSIS"),
            ],
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Scores and advice printed at the end of a rendered resume
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisBlock {
    pub overall_score: f64,
    pub technical_score: f64,
    pub soft_skills_score: f64,
    pub matched_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Structured resume ready for any template
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeContent {
    pub name: String,
    pub contact: ContactInfo,
    pub summary: String,
    /// Technical skills grouped by catalog category; matched skills first
    pub skill_groups: Vec<(String, Vec<String>)>,
    pub soft_skills: Vec<String>,
    pub experience: Vec<String>,
    pub analysis: AnalysisBlock,
}

impl ResumeContent {
    pub fn build(
        resume_text: &str,
        resume: &Facts,
        result: &MatchResult,
        suggestions: &[String],
        optimized: Option<&OptimizedContent>,
        catalog: &SkillCatalog,
    ) -> Self {
        let mut lines = resume_text.lines().map(str::trim).filter(|l| !l.is_empty());
        let name = lines.next().map(|first| clean_name(first, catalog)).unwrap_or_default();
        let name = if name.is_empty() { "Candidate".to_string() } else { name };

        let mut experience: Vec<String> = optimized
            .map(|c| c.optimized_experience_bullets.clone())
            .unwrap_or_default();
        experience.extend(lines.map(str::to_string));

        let summary = optimized
            .map(|c| c.professional_summary.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| heuristic_summary(resume));

        Self {
            name,
            contact: resume.contact_info.clone(),
            summary,
            skill_groups: group_skills(&resume.technical_skills, &result.matched_technical_skills, catalog),
            soft_skills: resume.soft_skills.clone(),
            experience,
            analysis: AnalysisBlock {
                overall_score: result.overall_score,
                technical_score: result.technical_score,
                soft_skills_score: result.soft_skills_score,
                matched_skills: result.matched_skills.clone(),
                suggestions: suggestions.iter().take(ANALYSIS_SUGGESTIONS).cloned().collect(),
            },
        }
    }

    fn contact_line(&self) -> String {
        [&self.contact.email, &self.contact.phone, &self.contact.linkedin, &self.contact.github]
            .into_iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// First line of a resume with email and phone fragments removed
fn clean_name(line: &str, catalog: &SkillCatalog) -> String {
    let patterns = catalog.contact_patterns();
    let without_email = patterns.email.replace_all(line, " ");
    let without_phone = patterns.phone.replace_all(&without_email, " ");

    collapse_whitespace(&without_phone)
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '|' | ',' | '-' | '•' | '·'))
        .to_string()
}

fn heuristic_summary(resume: &Facts) -> String {
    let focus = if resume.technical_skills.is_empty() {
        "relevant technologies".to_string()
    } else {
        resume.technical_skills.iter().take(3).cloned().collect::<Vec<_>>().join(", ")
    };

    if resume.experience_years > 0 {
        format!(
            "Results-driven professional with {}+ years of experience in {}.",
            resume.experience_years, focus
        )
    } else {
        format!("Motivated professional with hands-on experience in {}.", focus)
    }
}

fn group_skills(skills: &[String], matched: &[String], catalog: &SkillCatalog) -> Vec<(String, Vec<String>)> {
    let matched: HashSet<&str> = matched.iter().map(String::as_str).collect();
    let (mut ordered, rest): (Vec<&String>, Vec<&String>) =
        skills.iter().partition(|s| matched.contains(s.as_str()));
    ordered.extend(rest);

    let mut groups: Vec<(String, Vec<String>)> = Vec::new();
    for skill in ordered {
        let label = catalog.category_of(skill).map_or("Other", |c| c.label());
        match groups.iter_mut().find(|(name, _)| name == label) {
            Some((_, members)) => members.push(skill.clone()),
            None => groups.push((label.to_string(), vec![skill.clone()])),
        }
    }
    groups
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Title,
    Heading,
    Body,
}

impl LineStyle {
    fn font_size(self) -> f32 {
        match self {
            LineStyle::Title => 20.0,
            LineStyle::Heading => 13.0,
            LineStyle::Body => 10.0,
        }
    }

    fn line_height_mm(self) -> f32 {
        match self {
            LineStyle::Title => 10.0,
            LineStyle::Heading => 8.0,
            LineStyle::Body => 5.0,
        }
    }

    /// Graphemes per line at this size across the printable width
    fn wrap_width(self) -> usize {
        match self {
            LineStyle::Title => 45,
            LineStyle::Heading => 70,
            LineStyle::Body => 95,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Line {
    style: LineStyle,
    text: String,
}

impl Line {
    fn new(style: LineStyle, text: impl Into<String>) -> Self {
        Self { style, text: text.into() }
    }
}

fn layout(content: &ResumeContent, template: TemplateId) -> Vec<Line> {
    let mut lines = vec![Line::new(LineStyle::Title, content.name.clone())];
    let contact = content.contact_line();
    if !contact.is_empty() {
        lines.push(Line::new(LineStyle::Body, contact));
    }

    for &(kind, heading) in template.sections() {
        lines.push(Line::new(LineStyle::Body, ""));
        lines.push(Line::new(LineStyle::Heading, heading));

        match kind {
            SectionKind::Summary => lines.push(Line::new(LineStyle::Body, content.summary.clone())),
            SectionKind::Skills => {
                for (category, skills) in &content.skill_groups {
                    lines.push(Line::new(LineStyle::Body, format!("{}: {}", category, skills.join(", "))));
                }
                if !content.soft_skills.is_empty() {
                    lines.push(Line::new(
                        LineStyle::Body,
                        format!("Soft Skills: {}", content.soft_skills.join(", ")),
                    ));
                }
            }
            SectionKind::Experience => {
                lines.extend(content.experience.iter().map(|l| Line::new(LineStyle::Body, l.clone())));
            }
            SectionKind::Analysis => {
                let a = &content.analysis;
                lines.push(Line::new(LineStyle::Body, format!("Overall Match Score: {:.1}%", a.overall_score)));
                lines.push(Line::new(LineStyle::Body, format!("Technical Skills Score: {:.1}%", a.technical_score)));
                lines.push(Line::new(LineStyle::Body, format!("Soft Skills Score: {:.1}%", a.soft_skills_score)));
                if !a.matched_skills.is_empty() {
                    lines.push(Line::new(
                        LineStyle::Body,
                        format!("Matched Skills: {}", a.matched_skills.join(", ")),
                    ));
                }
                for (i, suggestion) in a.suggestions.iter().enumerate() {
                    lines.push(Line::new(LineStyle::Body, format!("{}. {}", i + 1, suggestion)));
                }
            }
        }
    }
    lines
}

/// Plain-text rendering of a template's layout
pub fn render_plain(content: &ResumeContent, template: TemplateId) -> String {
    layout(content, template)
        .into_iter()
        .map(|line| match line.style {
            LineStyle::Title => format!("{}\n{}", line.text, "=".repeat(line.text.graphemes(true).count())),
            _ => line.text,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedDocument {
    pub file_path: PathBuf,
    pub text_preview: String,
    pub template: TemplateId,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Write a PDF for `template` into `output_dir`, falling back to the
    /// text report if PDF generation fails
    pub fn render(&self, content: &ResumeContent, template: TemplateId, output_dir: &Path) -> Result<RenderedDocument> {
        fs::create_dir_all(output_dir)?;
        let stem = output_stem(template);
        let file_path = output_dir.join(format!("{}.pdf", stem));

        let lines = layout(content, template);
        match write_pdf(&content.name, &lines, &file_path) {
            Ok(()) => {
                info!("Rendered {} resume to {}", template, file_path.display());
                Ok(RenderedDocument {
                    file_path,
                    text_preview: preview(&render_plain(content, template)),
                    template,
                })
            }
            Err(e) => {
                warn!("PDF rendering failed ({}), writing text report instead", e);
                self.render_text(content, template, output_dir)
            }
        }
    }

    /// Plain-text "RESUME ANALYSIS REPORT" fallback
    pub fn render_text(&self, content: &ResumeContent, template: TemplateId, output_dir: &Path) -> Result<RenderedDocument> {
        fs::create_dir_all(output_dir)?;
        let file_path = output_dir.join(format!("{}.txt", output_stem(template)));
        let text = text_report(content);

        fs::write(&file_path, &text)?;
        Ok(RenderedDocument {
            file_path,
            text_preview: preview(&text),
            template,
        })
    }

    /// Render up to two other templates; failures are logged and skipped
    pub fn render_alternatives(
        &self,
        content: &ResumeContent,
        selected: TemplateId,
        output_dir: &Path,
    ) -> Vec<RenderedDocument> {
        [TemplateId::AtsModern, TemplateId::TechFocused]
            .into_iter()
            .filter(|t| *t != selected)
            .take(MAX_ALTERNATIVES)
            .filter_map(|template| match self.render(content, template, output_dir) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("Skipping {} alternative: {}", template, e);
                    None
                }
            })
            .collect()
    }
}

/// Write arbitrary text (one body line per input line) as a PDF
pub fn write_text_pdf(title: &str, text: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut lines = vec![Line::new(LineStyle::Heading, title)];
    lines.extend(text.lines().map(|l| Line::new(LineStyle::Body, l)));
    write_pdf(title, &lines, path)
}

fn text_report(content: &ResumeContent) -> String {
    let mut out = String::new();
    out.push_str("RESUME ANALYSIS REPORT\n");
    out.push_str(&"=".repeat(50));
    out.push_str("\n\n");

    out.push_str(&format!("{}\n", content.name));
    let contact = content.contact_line();
    if !contact.is_empty() {
        out.push_str(&format!("{}\n", contact));
    }
    out.push('\n');

    out.push_str("TECHNICAL SKILLS\n");
    for (category, skills) in &content.skill_groups {
        out.push_str(&format!("- {}: {}\n", category, skills.join(", ")));
    }
    out.push('\n');

    let a = &content.analysis;
    out.push_str("ANALYSIS RESULTS\n");
    out.push_str(&format!("Overall Match Score: {:.1}%\n", a.overall_score));
    out.push_str(&format!("Technical Skills Score: {:.1}%\n", a.technical_score));
    out.push_str(&format!("Matched Skills: {}\n\n", a.matched_skills.join(", ")));

    out.push_str("OPTIMIZATION RECOMMENDATIONS\n");
    for (i, suggestion) in a.suggestions.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, suggestion));
    }
    out
}

fn output_stem(template: TemplateId) -> String {
    format!("optimized_resume_{}_{}", template.id(), chrono::Utc::now().format("%Y%m%d_%H%M%S"))
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn pdf_error(e: impl fmt::Display) -> ResumeOptimizerError {
    ResumeOptimizerError::Rendering(e.to_string())
}

/// Page writer that tracks the cursor and starts new pages as needed
struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
    y_mm: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) = PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            font,
            y_mm: PAGE_HEIGHT_MM - MARGIN_MM,
            pages: 1,
        })
    }

    fn write_line(&mut self, style: LineStyle, text: &str) {
        let height = style.line_height_mm();
        if self.y_mm - height < MARGIN_MM {
            self.pages += 1;
            let (page, layer) = self.doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Layer {}", self.pages),
            );
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y_mm = PAGE_HEIGHT_MM - MARGIN_MM;
        }

        self.y_mm -= height;
        if !text.is_empty() {
            self.layer
                .use_text(text, style.font_size(), Mm(MARGIN_MM), Mm(self.y_mm), &self.font);
        }
    }

    fn save(self, path: &Path) -> Result<()> {
        let pages = self.pages;
        self.doc
            .save(&mut BufWriter::new(File::create(path)?))
            .map_err(pdf_error)?;
        debug!("Wrote {} page(s) to {}", pages, path.display());
        Ok(())
    }
}

fn write_pdf(title: &str, lines: &[Line], path: &Path) -> Result<()> {
    let mut writer = PdfWriter::new(title)?;

    for line in lines {
        let text = pdf_safe(&line.text);
        if text.is_empty() {
            writer.write_line(line.style, "");
            continue;
        }
        for wrapped in wrap_graphemes(&text, line.style.wrap_width()) {
            writer.write_line(line.style, &wrapped);
        }
    }

    writer.save(path)
}

/// The built-in fonts only cover Latin-1; bullets become dashes and other
/// characters outside that range are dropped
fn pdf_safe(text: &str) -> String {
    let mapped: String = text
        .chars()
        .filter_map(|c| match c {
            '•' | '–' | '—' => Some('-'),
            '‘' | '’' => Some('\''),
            '“' | '”' => Some('"'),
            c if (c as u32) < 0x100 => Some(c),
            _ => None,
        })
        .collect();
    mapped.trim().to_string()
}

/// Word-wrap to at most `width` graphemes per line; longer words are split
pub fn wrap_graphemes(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let graphemes: Vec<&str> = word.graphemes(true).collect();

        if current_len > 0 && current_len + 1 + graphemes.len() > width {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }

        for chunk in graphemes.chunks(width) {
            if current_len > 0 {
                if current_len + 1 + chunk.len() > width {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                } else {
                    current.push(' ');
                    current_len += 1;
                }
            }
            current.push_str(&chunk.concat());
            current_len += chunk.len();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scorer::MatchScorer;
    use std::sync::Arc;

    const RESUME: &str = "Jane Doe | jane@example.com | (555) 123-4567\n\
        Senior engineer building data platforms\n\
        - Led migration of 40 services to Kubernetes\n";

    fn sample_content(optimized: Option<&OptimizedContent>) -> ResumeContent {
        let catalog = Arc::new(SkillCatalog::new().unwrap());
        let resume = Facts {
            technical_skills: vec!["python".to_string(), "docker".to_string(), "aws".to_string()],
            soft_skills: vec!["leadership".to_string()],
            experience_years: 6,
            contact_info: ContactInfo {
                email: Some("jane@example.com".to_string()),
                ..Default::default()
            },
            ats_score: Some(85.0),
            ..Default::default()
        };
        let job = Facts {
            technical_skills: vec!["aws".to_string(), "kubernetes".to_string()],
            ..Default::default()
        };
        let result = MatchScorer::new(Arc::clone(&catalog)).score(&resume, &job);
        let suggestions: Vec<String> = (1..=12).map(|i| format!("tip {}", i)).collect();

        ResumeContent::build(RESUME, &resume, &result, &suggestions, optimized, &catalog)
    }

    #[test]
    fn test_template_ids() {
        assert_eq!(TemplateId::from_id("tech_focused"), Some(TemplateId::TechFocused));
        assert_eq!(TemplateId::from_id(" Classic_Professional "), Some(TemplateId::ClassicProfessional));
        assert_eq!(TemplateId::from_id("fancy"), None);
        assert_eq!(TemplateId::resolve("fancy"), TemplateId::AtsModern);
    }

    #[test]
    fn test_content_build() {
        let content = sample_content(None);

        assert_eq!(content.name, "Jane Doe");
        assert_eq!(content.summary, "Results-driven professional with 6+ years of experience in python, docker, aws.");
        assert_eq!(content.analysis.suggestions.len(), ANALYSIS_SUGGESTIONS);
        assert_eq!(content.experience.len(), 2);
        // matched skill leads
        let all: Vec<&String> = content.skill_groups.iter().flat_map(|(_, s)| s).collect();
        assert_eq!(all[0], "aws");
    }

    #[test]
    fn test_ai_content_preferred() {
        let optimized = OptimizedContent {
            professional_summary: "Platform engineer.".to_string(),
            optimized_experience_bullets: vec!["Cut deploy time by 60%".to_string()],
            ..Default::default()
        };
        let content = sample_content(Some(&optimized));

        assert_eq!(content.summary, "Platform engineer.");
        assert_eq!(content.experience[0], "Cut deploy time by 60%");
    }

    #[test]
    fn test_section_order_per_template() {
        let content = sample_content(None);
        let headings = |t: TemplateId| -> Vec<String> {
            layout(&content, t)
                .into_iter()
                .filter(|l| l.style == LineStyle::Heading)
                .map(|l| l.text)
                .collect()
        };

        assert_eq!(headings(TemplateId::AtsModern), vec!["SUMMARY", "SKILLS", "EXPERIENCE", "ANALYSIS"]);
        assert_eq!(headings(TemplateId::TechFocused), vec!["TECHNICAL SKILLS", "SUMMARY", "EXPERIENCE", "ANALYSIS"]);
        assert_eq!(
            headings(TemplateId::ClassicProfessional),
            vec!["PROFESSIONAL SUMMARY", "EXPERIENCE", "CORE COMPETENCIES", "ANALYSIS"]
        );
    }

    #[test]
    fn test_render_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let doc = DocumentRenderer::new()
            .render(&sample_content(None), TemplateId::TechFocused, dir.path())
            .unwrap();

        assert_eq!(doc.file_path.extension().and_then(|e| e.to_str()), Some("pdf"));
        let bytes = fs::read(&doc.file_path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(doc.text_preview.starts_with("Jane Doe"));
        assert!(doc.text_preview.chars().count() <= PREVIEW_CHARS);
    }

    #[test]
    fn test_render_text_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let doc = DocumentRenderer::new()
            .render_text(&sample_content(None), TemplateId::AtsModern, dir.path())
            .unwrap();

        let text = fs::read_to_string(&doc.file_path).unwrap();
        assert!(text.starts_with("RESUME ANALYSIS REPORT"));
        assert!(text.contains("OPTIMIZATION RECOMMENDATIONS\n1. tip 1\n"));
        assert!(!text.contains("tip 9"));
    }

    #[test]
    fn test_alternatives_exclude_selected() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = DocumentRenderer::new();
        let content = sample_content(None);

        let alternatives = renderer.render_alternatives(&content, TemplateId::AtsModern, dir.path());
        assert_eq!(alternatives.len(), 1);
        assert_eq!(alternatives[0].template, TemplateId::TechFocused);

        let alternatives = renderer.render_alternatives(&content, TemplateId::ClassicProfessional, dir.path());
        assert_eq!(alternatives.len(), 2);
    }

    #[test]
    fn test_long_content_spans_pages() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("long.pdf");
        let text = (0..200).map(|i| format!("line {}", i)).collect::<Vec<_>>().join("\n");

        write_text_pdf("Report", &text, &path).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_wrap_graphemes() {
        assert_eq!(wrap_graphemes("alpha beta gamma", 10), vec!["alpha beta", "gamma"]);
        assert_eq!(wrap_graphemes("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_graphemes("é é é", 3), vec!["é é", "é"]);
        assert!(wrap_graphemes("   ", 10).is_empty());
    }

    #[test]
    fn test_pdf_safe() {
        assert_eq!(pdf_safe("📊 Score • 90% café"), "Score - 90% café");
    }
}
