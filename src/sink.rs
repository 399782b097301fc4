//! Instruction sinks
//!
//! A sink applies instructions to a single linear cursor in a target document. Calls are
//! synchronous: a sink returns only once the edit has landed, or fails explicitly. There is
//! no undo, so a failure part-way through a batch leaves the earlier edits in place.
//!
//! Two sinks ship with the crate:
//! - [`RecordingSink`] keeps the instructions in memory (tests, dry runs)
//! - [`StreamSink`] writes each batch to any `io::Write` as text, JSON lines or YAML

use crate::instruction::{Instruction, InstructionBatch};
use crate::style::StyleId;
use serde::Deserialize;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

/// Errors reported by a sink for a single instruction or batch.
#[derive(Debug)]
pub enum SinkError {
    /// The target refused the edit
    Rejected(String),
    /// Writing to the underlying stream failed
    Io(io::Error),
    /// The batch could not be encoded for the stream
    Encode(String),
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkError::Rejected(msg) => write!(f, "Sink rejected instruction: {}", msg),
            SinkError::Io(err) => write!(f, "Sink I/O error: {}", err),
            SinkError::Encode(msg) => write!(f, "Sink encoding error: {}", msg),
        }
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SinkError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SinkError {
    fn from(err: io::Error) -> Self {
        SinkError::Io(err)
    }
}

/// The document-side collaborator of the emission sequencer.
pub trait Sink {
    fn set_style(&mut self, style: StyleId) -> Result<(), SinkError>;

    fn insert_text(&mut self, text: &str) -> Result<(), SinkError>;

    fn insert_separator(&mut self, count: usize) -> Result<(), SinkError>;

    /// Apply a whole batch. Stops at the first failing instruction.
    fn apply_batch(&mut self, batch: &InstructionBatch) -> Result<(), SinkError> {
        for instruction in batch.instructions() {
            match instruction {
                Instruction::SetStyle { style } => self.set_style(style)?,
                Instruction::InsertText { text } => self.insert_text(&text)?,
                Instruction::InsertSeparator { count } => self.insert_separator(count)?,
            }
        }
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn set_style(&mut self, style: StyleId) -> Result<(), SinkError> {
        (**self).set_style(style)
    }

    fn insert_text(&mut self, text: &str) -> Result<(), SinkError> {
        (**self).insert_text(text)
    }

    fn insert_separator(&mut self, count: usize) -> Result<(), SinkError> {
        (**self).insert_separator(count)
    }

    fn apply_batch(&mut self, batch: &InstructionBatch) -> Result<(), SinkError> {
        (**self).apply_batch(batch)
    }
}

/// In-memory sink that records every instruction it is given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingSink {
    instructions: Vec<Instruction>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn into_instructions(self) -> Vec<Instruction> {
        self.instructions
    }
}

impl Sink for RecordingSink {
    fn set_style(&mut self, style: StyleId) -> Result<(), SinkError> {
        self.instructions.push(Instruction::SetStyle { style });
        Ok(())
    }

    fn insert_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.instructions.push(Instruction::InsertText {
            text: text.to_string(),
        });
        Ok(())
    }

    fn insert_separator(&mut self, count: usize) -> Result<(), SinkError> {
        self.instructions.push(Instruction::InsertSeparator { count });
        Ok(())
    }
}

/// Serialization used by [`StreamSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [
        OutputFormat::Text,
        OutputFormat::Json,
        OutputFormat::Yaml,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown output format '{}' (expected one of: {})",
                    s,
                    known_formats()
                )
            })
    }
}

fn known_formats() -> String {
    OutputFormat::ALL
        .iter()
        .map(OutputFormat::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Sink that serializes instructions onto a writer and flushes after every batch.
pub struct StreamSink<W: Write> {
    writer: W,
    format: OutputFormat,
}

impl<W: Write> StreamSink<W> {
    pub fn new(writer: W, format: OutputFormat) -> Self {
        Self { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_instruction(&mut self, instruction: &Instruction) -> Result<(), SinkError> {
        match self.format {
            OutputFormat::Text => writeln!(self.writer, "  {}", instruction)?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, instruction)
                    .map_err(|e| SinkError::Encode(e.to_string()))?;
                writeln!(self.writer)?;
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(instruction)
                    .map_err(|e| SinkError::Encode(e.to_string()))?;
                write!(self.writer, "---\n{}", yaml)?;
            }
        }
        Ok(())
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn set_style(&mut self, style: StyleId) -> Result<(), SinkError> {
        self.write_instruction(&Instruction::SetStyle { style })
    }

    fn insert_text(&mut self, text: &str) -> Result<(), SinkError> {
        self.write_instruction(&Instruction::InsertText {
            text: text.to_string(),
        })
    }

    fn insert_separator(&mut self, count: usize) -> Result<(), SinkError> {
        self.write_instruction(&Instruction::InsertSeparator { count })
    }

    fn apply_batch(&mut self, batch: &InstructionBatch) -> Result<(), SinkError> {
        match self.format {
            OutputFormat::Text => {
                let marker = if batch.blank_before { " +blank" } else { "" };
                writeln!(self.writer, "#{} {}{}", batch.order, batch.role, marker)?;
                for instruction in batch.instructions() {
                    self.write_instruction(&instruction)?;
                }
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut self.writer, batch)
                    .map_err(|e| SinkError::Encode(e.to_string()))?;
                writeln!(self.writer)?;
            }
            OutputFormat::Yaml => {
                let yaml =
                    serde_yaml::to_string(batch).map_err(|e| SinkError::Encode(e.to_string()))?;
                write!(self.writer, "---\n{}", yaml)?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
