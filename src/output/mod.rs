//! Report assembly, formatting and document rendering

pub mod formatter;
pub mod render;
pub mod report;

pub use formatter::{OutputFormatter, ReportGenerator};
pub use render::{DocumentRenderer, RenderedDocument, ResumeContent, TemplateId};
pub use report::{AnalysisReport, ReportMetadata};
