//! Instruction stream
//!
//! The output of processing one item: what a sink has to do to the target document. A batch
//! carries no reference to the automaton that produced it.

use crate::classify::CanonicalRole;
use crate::style::{StyleId, SEPARATOR_STYLE};
use serde::Serialize;
use std::fmt;

/// A single edit applied at the document cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "kebab-case")]
pub enum Instruction {
    SetStyle { style: StyleId },
    InsertText { text: String },
    InsertSeparator { count: usize },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::SetStyle { style } => write!(f, "style {}", style),
            Instruction::InsertText { text } => write!(f, "text {:?}", text),
            Instruction::InsertSeparator { count } => write!(f, "separator {}", count),
        }
    }
}

/// Everything emitted for one item.
///
/// Always in this order: the optional blank separator (styled with
/// [`SEPARATOR_STYLE`]), the item's style, its text, then the trailing separator units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionBatch {
    pub order: usize,
    pub role: CanonicalRole,
    pub blank_before: bool,
    pub style: StyleId,
    pub text: String,
    pub separator_units: usize,
}

impl InstructionBatch {
    /// Flatten the batch into the instructions a sink replays.
    pub fn instructions(&self) -> Vec<Instruction> {
        let mut instructions = Vec::with_capacity(5);
        if self.blank_before {
            instructions.push(Instruction::SetStyle {
                style: SEPARATOR_STYLE,
            });
            instructions.push(Instruction::InsertSeparator { count: 1 });
        }
        instructions.push(Instruction::SetStyle { style: self.style });
        instructions.push(Instruction::InsertText {
            text: self.text.clone(),
        });
        instructions.push(Instruction::InsertSeparator {
            count: self.separator_units,
        });
        instructions
    }
}
