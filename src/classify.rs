//! Content Classification
//!
//! Maps a normalized line to its canonical role by looking at the leading tag only. Nothing
//! about the content, the position or earlier lines is considered, so the result is a pure
//! function of the text.
//!
//! Classification order is the [`TAG_PRIORITY`](crate::tags::TAG_PRIORITY) table:
//! 1. Question
//! 2. Answer key (both spellings)
//! 3. Choice
//! 4. Context
//! 5. Passage (three spellings)
//! 6. Default to Other

use crate::tags::TAG_PRIORITY;
use serde::Serialize;
use std::fmt;

/// The fixed set of content roles a line can play in a question layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CanonicalRole {
    /// Reading passage text (지문)
    Passage,
    /// Question stem (문제)
    Question,
    /// Example or context block shown with the question (보기)
    Context,
    /// One answer option (선택지)
    Choice,
    /// Teacher's answer and explanation (교사용정답)
    AnswerKey,
    Other,
}

impl CanonicalRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalRole::Passage => "passage",
            CanonicalRole::Question => "question",
            CanonicalRole::Context => "context",
            CanonicalRole::Choice => "choice",
            CanonicalRole::AnswerKey => "answer-key",
            CanonicalRole::Other => "other",
        }
    }
}

impl fmt::Display for CanonicalRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determine the role of a normalized line from its leading tag.
pub fn classify(line: &str) -> CanonicalRole {
    TAG_PRIORITY
        .iter()
        .find(|(tag, _)| line.starts_with(tag))
        .map(|(_, role)| *role)
        .unwrap_or(CanonicalRole::Other)
}

/// Remove one leading `[...]` tag and the whitespace around the remaining content.
///
/// Lines without a leading tag are only trimmed.
pub fn strip_tag(line: &str) -> &str {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            // A tag needs at least one character between the brackets
            if close > 0 {
                return rest[close + 1..].trim();
            }
        }
    }
    trimmed
}
