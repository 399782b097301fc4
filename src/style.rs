//! Style Resolution
//!
//! Static lookup from a canonical role to the paragraph style the target document uses for it.
//! `Other` is the only role that looks at the text: the auxiliary tags (drama box, underline,
//! student answer) classify as `Other` but still get their dedicated styles.

use crate::classify::CanonicalRole;
use crate::tags;
use serde::Serialize;
use std::fmt;

/// Paragraph styles of the target document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StyleId {
    DefaultBody,
    BodyText,
    Question,
    ChoiceList,
    TeacherAnswer,
    ContextIndent,
    DramaBox,
    UnderlineHighlight,
    StudentAnswer,
}

/// Style used for the blank paragraph the spacing automaton inserts before a section.
///
/// Separators always render as faint answer-key lines, whatever role triggered them.
pub const SEPARATOR_STYLE: StyleId = StyleId::TeacherAnswer;

impl StyleId {
    pub const ALL: [StyleId; 9] = [
        StyleId::DefaultBody,
        StyleId::BodyText,
        StyleId::Question,
        StyleId::ChoiceList,
        StyleId::TeacherAnswer,
        StyleId::ContextIndent,
        StyleId::DramaBox,
        StyleId::UnderlineHighlight,
        StyleId::StudentAnswer,
    ];

    /// Stable identifier used in serialized instruction streams.
    pub fn id(&self) -> &'static str {
        match self {
            StyleId::DefaultBody => "default-body",
            StyleId::BodyText => "body-text",
            StyleId::Question => "question",
            StyleId::ChoiceList => "choice-list",
            StyleId::TeacherAnswer => "teacher-answer",
            StyleId::ContextIndent => "context-indent",
            StyleId::DramaBox => "drama-box",
            StyleId::UnderlineHighlight => "underline-highlight",
            StyleId::StudentAnswer => "student-answer",
        }
    }

    /// Style name as registered in the target document's style sheet.
    pub fn display_name(&self) -> &'static str {
        match self {
            StyleId::DefaultBody => "바탕글",
            StyleId::BodyText => "a.본문",
            StyleId::Question => "a.문제",
            StyleId::ChoiceList => "a.문항제시문",
            StyleId::TeacherAnswer => "a.교사용정답",
            StyleId::ContextIndent => "a.보기들여쓰기",
            StyleId::DramaBox => "a.박스안희곡",
            StyleId::UnderlineHighlight => "a.밑줄_노랑",
            StyleId::StudentAnswer => "a.학생용정답",
        }
    }

    /// Style shortcut bound in the target document, for keystroke-driven sinks.
    pub fn shortcut(&self) -> &'static str {
        match self {
            StyleId::DefaultBody => "ctrl+1",
            StyleId::BodyText => "ctrl+2",
            StyleId::Question => "ctrl+3",
            StyleId::ChoiceList => "ctrl+4",
            StyleId::TeacherAnswer => "ctrl+5",
            StyleId::ContextIndent => "ctrl+7",
            StyleId::DramaBox => "ctrl+8",
            StyleId::UnderlineHighlight => "ctrl+9",
            StyleId::StudentAnswer => "ctrl+0",
        }
    }
}

impl fmt::Display for StyleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Resolve the paragraph style for a classified line.
///
/// `line` is only consulted for [`CanonicalRole::Other`].
pub fn resolve_style(role: CanonicalRole, line: &str) -> StyleId {
    match role {
        CanonicalRole::Passage => StyleId::BodyText,
        CanonicalRole::Question => StyleId::Question,
        CanonicalRole::Context => StyleId::ContextIndent,
        CanonicalRole::Choice => StyleId::ChoiceList,
        CanonicalRole::AnswerKey => StyleId::TeacherAnswer,
        CanonicalRole::Other => auxiliary_style(line).unwrap_or(StyleId::DefaultBody),
    }
}

fn auxiliary_style(line: &str) -> Option<StyleId> {
    if line.starts_with(tags::DRAMA_BOX) {
        Some(StyleId::DramaBox)
    } else if line.starts_with(tags::UNDERLINE) {
        Some(StyleId::UnderlineHighlight)
    } else if line.starts_with(tags::STUDENT_ANSWER) {
        Some(StyleId::StudentAnswer)
    } else {
        None
    }
}
