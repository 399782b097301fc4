//! Tagged text source: one item per non-empty line.

use crate::sequencer::ContentItem;

/// Split tagged text into items. Lines are trimmed, blank lines skipped, and `order` counts
/// the surviving lines.
pub fn items_from_text(source: &str) -> Vec<ContentItem> {
    ContentItem::from_lines(
        source
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty()),
    )
}
