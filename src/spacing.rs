//! Spacing Automaton
//!
//! Decides where blank paragraphs go. Two separate things are decided per item:
//!
//! - Whether a blank separator paragraph precedes the item. This depends on the previous role
//!   and on two per-question flags, so it is the only sequence-dependent part of the pipeline.
//! - How many separator units (paragraph breaks) follow the item's content. This depends on the
//!   item's role alone.
//!
//! # Blank-before rules
//!
//! | previous | current  | condition                     | blank |
//! |----------|----------|-------------------------------|-------|
//! | Passage  | Question |                               | yes   |
//! | Question | Context  | no context blank yet          | yes   |
//! | Context  | Choice   | no choice blank yet           | yes   |
//! | anything else                                       | no    |
//!
//! A `Question` clears both flags before the table is consulted, so every question starts
//! clean. The flags are never set by anything other than the row that inserts the blank.

use crate::classify::CanonicalRole;

/// Per-run automaton state. Create one per run; nothing here outlives it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AutomatonState {
    pub previous_role: Option<CanonicalRole>,
    pub context_blank_emitted: bool,
    pub choice_blank_emitted: bool,
}

impl AutomatonState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next role, returning whether a blank separator must precede it.
    pub fn advance(&mut self, current: CanonicalRole) -> bool {
        let (blank, next) = transition(self, current);
        *self = next;
        blank
    }
}

/// Pure transition function: `(state, current) -> (insert blank before, next state)`.
pub fn transition(state: &AutomatonState, current: CanonicalRole) -> (bool, AutomatonState) {
    let mut next = *state;

    if current == CanonicalRole::Question {
        next.context_blank_emitted = false;
        next.choice_blank_emitted = false;
    }

    let blank = match (state.previous_role, current) {
        (Some(CanonicalRole::Passage), CanonicalRole::Question) => true,
        (Some(CanonicalRole::Question), CanonicalRole::Context) if !next.context_blank_emitted => {
            next.context_blank_emitted = true;
            true
        }
        (Some(CanonicalRole::Context), CanonicalRole::Choice) if !next.choice_blank_emitted => {
            next.choice_blank_emitted = true;
            true
        }
        _ => false,
    };

    next.previous_role = Some(current);
    (blank, next)
}

/// How many separator units follow an item's content.
///
/// Context and choice lines stay visually tight; every other block gets a full blank line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeparatorPolicy {
    pub tight_units: usize,
    pub loose_units: usize,
}

impl SeparatorPolicy {
    pub fn new(tight_units: usize, loose_units: usize) -> Self {
        Self {
            tight_units,
            loose_units,
        }
    }

    pub fn units_after(&self, role: CanonicalRole) -> usize {
        match role {
            CanonicalRole::Context | CanonicalRole::Choice => self.tight_units,
            _ => self.loose_units,
        }
    }
}

impl Default for SeparatorPolicy {
    fn default() -> Self {
        Self::new(1, 2)
    }
}
