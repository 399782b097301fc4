//! Numbered listing of items before a run, showing the style and role each one resolves to.
//!
//! Preview looks at the raw item text, before normalization, so it shows what the producer
//! actually handed over.

use crate::classify::{classify, strip_tag};
use crate::sequencer::ContentItem;
use crate::style::resolve_style;

pub const DEFAULT_LIMIT: usize = 10;
const CONTENT_CHARS: usize = 40;

/// Render the first `limit` items, one per line.
pub fn preview(items: &[ContentItem], limit: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} items\n", items.len()));

    for (i, item) in items.iter().take(limit).enumerate() {
        let role = classify(&item.text);
        let style = resolve_style(role, &item.text);
        out.push_str(&format!(
            "{:2}. [{}] ({}) {}\n",
            i + 1,
            style.display_name(),
            role,
            truncate(strip_tag(&item.text), CONTENT_CHARS)
        ));
    }

    if items.len() > limit {
        out.push_str(&format!("    ... and {} more\n", items.len() - limit));
    }
    out
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        let head: String = text.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        text.to_string()
    }
}
