//! # qtag
//!
//! Lays out tagged exam-question text for a word processor.
//!
//! Upstream producers (an HTML export or a text generator) hand over lines such as
//! `[문제] 다음 글을 읽고...` or `[선택지] ① ...`. qtag repairs the tags, classifies every line
//! into a canonical role and turns the sequence into "set this style, insert this text, insert
//! this many paragraph breaks" instructions for a sink that edits the target document.
//!
//! Pipeline
//!
//!     raw line ─ normalize ─ classify ─┬─ style ───────────┬─ InstructionBatch ─ Sink
//!                                      └─ spacing automaton ┘
//!
//!     Only the spacing automaton carries state from one item to the next, and that state
//!     lives in the sequencer for the duration of a single run.
//!
//! File layout
//!
//!     .
//!     ├── tags.rs          # Tag vocabulary and classification priority
//!     ├── normalize.rs     # Tag repair, passage tagging
//!     ├── classify.rs      # Canonical roles
//!     ├── style.rs         # Role → paragraph style
//!     ├── spacing.rs       # Blank-before automaton, separator units
//!     ├── instruction.rs   # Instruction batches
//!     ├── sink.rs          # Sink trait, recording and stream sinks
//!     ├── sequencer.rs     # Runs items through everything above
//!     ├── source           # Tagged text and HTML producers
//!     ├── preview.rs
//!     └── config.rs        # Layered TOML configuration
//!
//! This is a pure lib: nothing here prints or reads the environment. The `qtag` binary is the
//! shell around it.

pub mod classify;
pub mod config;
pub mod instruction;
pub mod normalize;
pub mod preview;
pub mod sequencer;
pub mod sink;
pub mod source;
pub mod spacing;
pub mod style;
pub mod tags;

pub use classify::{classify, strip_tag, CanonicalRole};
pub use instruction::{Instruction, InstructionBatch};
pub use normalize::{normalize, tag_passage, NormalizeOptions, Normalizer};
pub use sequencer::{
    CancelFlag, ContentItem, EmissionSequencer, ItemFailure, ItemOutcome, RunSummary,
};
pub use sink::{OutputFormat, RecordingSink, Sink, SinkError, StreamSink};
pub use spacing::{transition, AutomatonState, SeparatorPolicy};
pub use style::{resolve_style, StyleId, SEPARATOR_STYLE};
