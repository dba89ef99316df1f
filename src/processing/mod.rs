//! Heuristic analysis: skill catalog, fact extraction, scoring and suggestions

pub mod analyzer;
pub mod catalog;
pub mod facts;
pub mod scorer;
pub mod suggestions;
pub mod text_processor;

pub use analyzer::TextAnalyzer;
pub use catalog::SkillCatalog;
pub use facts::Facts;
pub use scorer::{MatchResult, MatchScorer, MatchStrength};
pub use suggestions::SuggestionEngine;
