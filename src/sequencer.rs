//! Emission Sequencer
//!
//! Drives the pipeline over an ordered list of items:
//!
//! raw text → [`Normalizer`] → [`classify`] → [`resolve_style`] + [`AutomatonState`] →
//! [`InstructionBatch`] → [`Sink`]
//!
//! Items are processed strictly one after another in input order. A fresh automaton state is
//! created for every run and never leaves it. A sink failure is recorded against its item and
//! the run moves on; there is no retry and no rollback. Cancellation is checked between items,
//! so an in-flight sink call always completes.

use crate::classify::{classify, strip_tag};
use crate::instruction::InstructionBatch;
use crate::normalize::{preview, Normalizer};
use crate::sink::Sink;
use crate::spacing::{AutomatonState, SeparatorPolicy};
use crate::style::resolve_style;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One unit of input, as handed over by the upstream producer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub order: usize,
    pub text: String,
}

impl ContentItem {
    pub fn new(order: usize, text: impl Into<String>) -> Self {
        Self {
            order,
            text: text.into(),
        }
    }

    /// Number a list of raw lines in their given order.
    pub fn from_lines<I, S>(lines: I) -> Vec<ContentItem>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(order, text)| ContentItem::new(order, text))
            .collect()
    }
}

/// Cooperative cancellation shared between the run and whoever may stop it.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// A sink failure, located well enough to find the item again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFailure {
    pub order: usize,
    pub reason: String,
    /// Leading characters of the raw text
    pub preview: String,
}

/// What happened to a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Emitted(InstructionBatch),
    /// The normalizer discarded the line; nothing reached the sink
    Dropped,
    Failed(ItemFailure),
}

/// Per-run counts. `total` is the number of input items, including any left unprocessed
/// by a cancellation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub dropped: usize,
    pub total: usize,
    pub cancelled: bool,
    pub failures: Vec<ItemFailure>,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed + self.dropped
    }

    fn record(&mut self, outcome: &ItemOutcome) {
        match outcome {
            ItemOutcome::Emitted(_) => self.succeeded += 1,
            ItemOutcome::Dropped => self.dropped += 1,
            ItemOutcome::Failed(failure) => {
                self.failed += 1;
                self.failures.push(failure.clone());
            }
        }
    }
}

/// Runs items through normalization, classification, styling and spacing.
#[derive(Debug, Clone, Default)]
pub struct EmissionSequencer {
    normalizer: Normalizer,
    separators: SeparatorPolicy,
}

impl EmissionSequencer {
    pub fn new(normalizer: Normalizer, separators: SeparatorPolicy) -> Self {
        Self {
            normalizer,
            separators,
        }
    }

    /// Build the batch for one item, advancing `state`. `None` if the line was dropped.
    pub fn plan(&self, state: &mut AutomatonState, item: &ContentItem) -> Option<InstructionBatch> {
        let line = self.normalizer.normalize_line(&item.text)?;
        let role = classify(&line);
        let style = resolve_style(role, &line);
        let blank_before = state.advance(role);
        if blank_before {
            tracing::debug!(order = item.order, %role, "inserting blank separator");
        }

        Some(InstructionBatch {
            order: item.order,
            role,
            blank_before,
            style,
            text: strip_tag(&line).to_string(),
            separator_units: self.separators.units_after(role),
        })
    }

    /// Plan a whole run without a sink.
    pub fn plan_all(&self, items: &[ContentItem]) -> Vec<InstructionBatch> {
        let mut state = AutomatonState::new();
        items
            .iter()
            .filter_map(|item| self.plan(&mut state, item))
            .collect()
    }

    /// Process one item against the sink.
    pub fn process_item<S: Sink>(
        &self,
        state: &mut AutomatonState,
        item: &ContentItem,
        sink: &mut S,
    ) -> ItemOutcome {
        let Some(batch) = self.plan(state, item) else {
            return ItemOutcome::Dropped;
        };

        match sink.apply_batch(&batch) {
            Ok(()) => ItemOutcome::Emitted(batch),
            Err(err) => {
                let failure = ItemFailure {
                    order: item.order,
                    reason: err.to_string(),
                    preview: preview(&item.text),
                };
                tracing::warn!(
                    order = failure.order,
                    text = %failure.preview,
                    error = %failure.reason,
                    "sink failed for item"
                );
                ItemOutcome::Failed(failure)
            }
        }
    }

    /// Run every item in order against the sink.
    pub fn run<S: Sink>(
        &self,
        items: &[ContentItem],
        mut sink: S,
        cancel: &CancelFlag,
    ) -> RunSummary {
        let mut state = AutomatonState::new();
        let mut summary = RunSummary {
            total: items.len(),
            ..RunSummary::default()
        };
        tracing::info!(total = items.len(), "starting emission run");

        for (index, item) in items.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!(processed = index, total = items.len(), "run cancelled");
                summary.cancelled = true;
                break;
            }

            let outcome = self.process_item(&mut state, item, &mut sink);
            summary.record(&outcome);

            if (index + 1) % 10 == 0 {
                tracing::debug!(processed = index + 1, total = items.len(), "progress");
            }
        }

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            dropped = summary.dropped,
            total = summary.total,
            "emission run finished"
        );
        summary
    }
}
