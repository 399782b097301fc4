//! Tag vocabulary
//!
//! The bracketed tags that the upstream producers (a markup parser or a text generator) put at
//! the start of each line. This is a bit-exact contract: every spelling here is matched
//! literally, no trimming or case folding happens inside the brackets.
//!
//! Several spellings share a role (three passage spellings, two answer-key spellings). The
//! order in which they are tried is [`TAG_PRIORITY`], an explicit list rather than whatever
//! order a chain of `if`s happens to have.

use crate::classify::CanonicalRole;

pub const QUESTION: &str = "[문제]";
pub const CONTEXT: &str = "[보기]";
pub const CHOICE: &str = "[선택지]";
pub const ANSWER_KEY: &str = "[교사용정답]";
pub const ANSWER_KEY_ALT: &str = "[정답해설]";
/// Generator alias for the answer key, rewritten to [`ANSWER_KEY`] during repair.
pub const EXPLANATION: &str = "[해설]";

/// The generic passage tag the generator emits; the only spelling the repair rules touch.
pub const PASSAGE_GENERIC: &str = "[지문또는문단]";
pub const PASSAGE: &str = "[지문]";
pub const PARAGRAPH: &str = "[문단]";

pub const DRAMA_BOX: &str = "[희곡지문]";
pub const UNDERLINE: &str = "[밑줄]";
pub const STUDENT_ANSWER: &str = "[학생용]";

/// Ordered prefix table used by the classifier. First match wins.
///
/// Question and answer-key spellings are tried before the passage spellings so that a line the
/// repair pass could not fully clean still lands on its structural role.
pub const TAG_PRIORITY: &[(&str, CanonicalRole)] = &[
    (QUESTION, CanonicalRole::Question),
    (ANSWER_KEY, CanonicalRole::AnswerKey),
    (ANSWER_KEY_ALT, CanonicalRole::AnswerKey),
    (CHOICE, CanonicalRole::Choice),
    (CONTEXT, CanonicalRole::Context),
    (PASSAGE_GENERIC, CanonicalRole::Passage),
    (PASSAGE, CanonicalRole::Passage),
    (PARAGRAPH, CanonicalRole::Passage),
];

/// Tags whose presence next to [`PASSAGE_GENERIC`] means the passage tag is a mistake.
pub const STRUCTURAL_TAGS: &[&str] = &[
    QUESTION,
    CHOICE,
    CONTEXT,
    ANSWER_KEY,
    ANSWER_KEY_ALT,
    EXPLANATION,
];

/// Artifacts seen in degraded generator output. A line containing any of these is dropped.
pub const DEFAULT_GARBAGE_TOKENS: &[&str] = &[
    "[Odyssey]",
    "\u{F00BC}",
    "\u{F00DB}",
    "[세부 정보",
    "[세부 내용",
];

/// Circled enumerators ① through ⑳.
pub fn is_enumerator_glyph(c: char) -> bool {
    ('\u{2460}'..='\u{2473}').contains(&c)
}

/// Private-use code points in the BMP and both supplementary private-use planes.
pub fn is_private_use(c: char) -> bool {
    matches!(c,
        '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}' | '\u{100000}'..='\u{10FFFD}')
}
