//! Tag Normalization
//!
//! Repairs the tag mistakes that generated question text is known to contain, one line at a
//! time. Lines that cannot be trusted are dropped rather than reported: upstream noise is
//! expected and omission is the recovery.
//!
//! # Rules
//!
//! Applied to the trimmed line, in this order:
//!
//! 1. Drop the line if it contains a garbage token or (optionally) a private-use symbol.
//! 2. Exclusive repairs on the generic passage tag `[지문또는문단]`, first match wins:
//!    - next to a structural tag: remove the passage tag, rewrite `[해설]` to `[교사용정답]`
//!    - directly followed by a circled enumerator (①..⑳): the passage tag becomes `[선택지]`
//!    - still leading the line: keep only if the untagged text is longer than the minimum
//! 3. Strip question numbering: `[문제] 3. text` becomes `[문제] text`.
//!
//! `normalize(normalize(x)) == normalize(x)` holds for every input; the rules only ever remove
//! tags, and removals are repeated until nothing is left to remove.

use crate::tags::{self, ANSWER_KEY, CHOICE, EXPLANATION, PASSAGE_GENERIC, STRUCTURAL_TAGS};
use once_cell::sync::Lazy;
use regex::Regex;

/// Generic passage tag followed (after optional whitespace) by a circled enumerator.
static ENUMERATED_PASSAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[지문또는문단\]\s*[①-⑳]").unwrap());

/// Leading question tag followed by one or more `N.` numbering prefixes.
static NUMBERED_QUESTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[문제\]\s*(?:\d+\.\s*)+").unwrap());

/// Knobs for the repair rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Untagged passage text must be longer than this many characters to survive.
    pub min_passage_chars: usize,
    pub garbage_tokens: Vec<String>,
    pub drop_private_use: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            min_passage_chars: 30,
            garbage_tokens: tags::DEFAULT_GARBAGE_TOKENS
                .iter()
                .map(|t| t.to_string())
                .collect(),
            drop_private_use: true,
        }
    }
}

/// Stateless line repairer.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize one raw line. `None` means the line is dropped.
    pub fn normalize_line(&self, raw: &str) -> Option<String> {
        let line = raw.trim();
        if line.is_empty() {
            return None;
        }
        if self.is_garbage(line) {
            tracing::debug!(line = %preview(line), "dropping line with generator artifacts");
            return None;
        }

        let repaired = self.repair_passage_tag(line)?;
        let renumbered = NUMBERED_QUESTION.replace(&repaired, "[문제] ");
        let result = renumbered.trim();

        // Tag removal can splice a garbage token together
        if result.is_empty() || self.is_garbage(result) {
            return None;
        }
        Some(result.to_string())
    }

    /// Normalize a block of text line by line, joining the surviving lines with `\n`.
    pub fn normalize_text(&self, text: &str) -> String {
        text.lines()
            .filter_map(|line| self.normalize_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn is_garbage(&self, line: &str) -> bool {
        self.options
            .garbage_tokens
            .iter()
            .any(|token| line.contains(token.as_str()))
            || (self.options.drop_private_use && line.chars().any(tags::is_private_use))
    }

    fn repair_passage_tag(&self, line: &str) -> Option<String> {
        if !line.contains(PASSAGE_GENERIC) {
            return Some(line.to_string());
        }

        if STRUCTURAL_TAGS.iter().any(|tag| line.contains(tag)) {
            let merged = remove_all(line, PASSAGE_GENERIC).replace(EXPLANATION, ANSWER_KEY);
            return Some(merged.trim().to_string());
        }

        if ENUMERATED_PASSAGE.is_match(line) {
            return Some(line.replace(PASSAGE_GENERIC, CHOICE));
        }

        if line.starts_with(PASSAGE_GENERIC) {
            let content = remove_all(line, PASSAGE_GENERIC);
            let length = content.trim().chars().count();
            if length > self.options.min_passage_chars {
                return Some(line.to_string());
            }
            tracing::debug!(line = %preview(line), length, "dropping short passage fragment");
            return None;
        }

        Some(line.to_string())
    }
}

/// Normalize one line with the default options.
pub fn normalize(raw: &str) -> Option<String> {
    Normalizer::default().normalize_line(raw)
}

/// Tag a raw reading passage paragraph by paragraph with the generic passage tag.
///
/// Paragraphs are separated by blank lines. A passage without blank lines is split on single
/// line breaks instead. Line breaks inside a paragraph are folded into spaces so every
/// paragraph stays on one tagged line.
pub fn tag_passage(passage: &str) -> String {
    let passage = passage.replace("\r\n", "\n");
    let mut paragraphs = split_blocks(&passage, "\n\n");
    if paragraphs.len() <= 1 {
        paragraphs = split_blocks(&passage, "\n");
    }

    paragraphs
        .iter()
        .map(|p| {
            let folded = p.lines().map(str::trim).collect::<Vec<_>>().join(" ");
            format!("{} {}", PASSAGE_GENERIC, folded)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn split_blocks<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    text.split(separator)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

fn remove_all(line: &str, tag: &str) -> String {
    let mut result = line.to_string();
    while result.contains(tag) {
        result = result.replace(tag, "");
    }
    result
}

pub(crate) fn preview(line: &str) -> String {
    line.chars().take(20).collect()
}
