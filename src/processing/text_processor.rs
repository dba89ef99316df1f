//! Text processing and normalization

use crate::error::{Result, ResumeOptimizerError};
use crate::processing::facts::TextStats;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use std::collections::{HashMap, HashSet};

const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "are", "with", "this", "that", "have", "from", "they", "been", "will",
    "would", "could", "should", "may", "might", "must", "can", "shall",
];

pub const MAX_KEYWORDS: usize = 20;

pub struct TextProcessor {
    stop_words: HashSet<&'static str>,
    token_regex: Regex,
}

impl TextProcessor {
    pub fn new() -> Result<Self> {
        let pattern = r"\b[a-zA-Z]{3,}\b";
        let token_regex = Regex::new(pattern).map_err(|e| ResumeOptimizerError::MalformedPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            token_regex,
        })
    }

    /// Tokenize into lowercase alphabetic words, dropping stop words and
    /// anything of three letters or fewer
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        self.token_regex
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|w| w.len() > 3 && !self.stop_words.contains(w))
            .map(str::to_string)
            .collect()
    }

    /// Most frequent tokens; equal counts keep first-seen order
    pub fn extract_keywords(&self, text: &str, max_keywords: usize) -> Vec<String> {
        let mut order: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for token in self.tokenize(text) {
            match index.get(&token) {
                Some(&i) => order[i].1 += 1,
                None => {
                    index.insert(token.clone(), order.len());
                    order.push((token, 1));
                }
            }
        }

        // sort_by is stable, so ties stay in insertion order
        order.sort_by(|a, b| b.1.cmp(&a.1));
        order.into_iter().take(max_keywords).map(|(word, _)| word).collect()
    }

    pub fn text_stats(&self, text: &str) -> TextStats {
        TextStats {
            word_count: text.split_whitespace().count(),
            character_count: text.chars().count(),
            line_count: text.lines().filter(|l| !l.trim().is_empty()).count(),
            paragraph_count: text.split("\n\n").filter(|p| !p.trim().is_empty()).count(),
        }
    }
}

/// Multi-phrase matcher that only accepts standalone occurrences.
///
/// A hit counts when the characters on either side are not word characters,
/// so "javascript" never matches inside "typescript" and "c++" still matches
/// before a comma or whitespace.
pub struct PhraseMatcher {
    automaton: AhoCorasick,
    phrase_count: usize,
}

impl PhraseMatcher {
    pub fn new(phrases: &[String]) -> Result<Self> {
        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(phrases)
            .map_err(|e| ResumeOptimizerError::MalformedPattern {
                pattern: "phrase matcher".to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            automaton,
            phrase_count: phrases.len(),
        })
    }

    /// Indices of phrases found standalone in `lowered`, sorted ascending.
    /// The caller is responsible for lowercasing.
    pub fn find_standalone(&self, lowered: &str) -> Vec<usize> {
        let mut found = vec![false; self.phrase_count];

        for m in self.automaton.find_overlapping_iter(lowered) {
            if is_standalone(lowered, m.start(), m.end()) {
                found[m.pattern().as_usize()] = true;
            }
        }

        found
            .iter()
            .enumerate()
            .filter_map(|(i, hit)| hit.then_some(i))
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_standalone(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text[..start].chars().next_back().map_or(true, |c| !is_word_char(c));
    let after_ok = text[end..].chars().next().map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}

pub fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Number of needles present at least once
pub fn count_present(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|n| haystack.contains(*n)).count()
}

/// Collapse every whitespace run into a single space
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
