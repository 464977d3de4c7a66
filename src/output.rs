//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper that writes to stdout. Format functions are pure so
//! tests can assert on exact lines.
//!
//! # Output Format
//!
//! ## Check / Scan
//!
//! ```text
//! Gallery: 5 images in 3 groups
//! (ungrouped) (1 photos)
//!     001 cover
//!         Source: 001-cover.jpg
//! Landscapes (3 photos)
//!     001 Dawn over the lake
//!         Source: 010-Landscapes/001-dawn.jpg
//!
//! Config
//!     config.toml
//! ```
//!
//! ## Replay
//!
//! ```text
//! > open:B
//!     open B
//!         Caption: Caption B
//!         Position: 2 / 3 in G
//! > close
//!     closed
//! ```
//!
//! ## Build
//!
//! ```text
//! Grid → index.html
//! 001 Dawn over the lake → view/1.html
//! Missing: thumbs/gone.jpg
//! Generated 1 grid page, 5 overlay pages, copied 5 assets
//! ```

use crate::generate::GenerateReport;
use crate::input::InputEvent;
use crate::lightbox::Snapshot;
use crate::model::GalleryModel;
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn group_label(group: Option<&str>) -> &str {
    group.unwrap_or("(ungrouped)")
}

/// Captioned entries show the caption, uncaptioned ones their id in parens.
fn entry_line(index: usize, caption: &str, id: &str) -> String {
    if caption.is_empty() {
        format!("{} ({})", format_index(index), id)
    } else {
        format!("{} {}", format_index(index), truncate(caption, 60))
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{cut}...")
    }
}

// ============================================================================
// Check / Scan
// ============================================================================

/// Inventory of a loaded gallery, grouped, entries in display order.
pub fn format_gallery_output(model: &GalleryModel, source_root: &Path) -> Vec<String> {
    let groups = model.groups();
    let mut lines = vec![format!(
        "Gallery: {} images in {} groups",
        model.len(),
        groups.len()
    )];

    for group in groups {
        let members = model.entries_in_group(group);
        lines.push(format!("{} ({} photos)", group_label(group), members.len()));
        for (i, entry) in members.iter().enumerate() {
            lines.push(format!(
                "{}{}",
                indent(1),
                entry_line(i + 1, &entry.caption, &entry.id)
            ));
            lines.push(format!("{}Source: {}", indent(2), entry.full_source));
            if entry.thumbnail_source != entry.full_source {
                lines.push(format!("{}Thumbnail: {}", indent(2), entry.thumbnail_source));
            }
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }
    lines
}

pub fn print_gallery_output(model: &GalleryModel, source_root: &Path) {
    for line in format_gallery_output(model, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Replay
// ============================================================================

pub fn format_event(event: &InputEvent) -> String {
    format!("> {event}")
}

/// One emitted snapshot, indented under the event that caused it.
pub fn format_snapshot(snapshot: &Snapshot<'_>) -> Vec<String> {
    let Some(entry) = snapshot.open_entry else {
        return vec![format!("{}closed", indent(1))];
    };
    let mut lines = vec![format!("{}open {}", indent(1), entry.id)];
    if !entry.caption.is_empty() {
        lines.push(format!("{}Caption: {}", indent(2), entry.caption));
    }
    if let Some(pos) = snapshot.position {
        lines.push(format!(
            "{}Position: {} / {} in {}",
            indent(2),
            pos + 1,
            snapshot.group_size,
            group_label(entry.group())
        ));
    }
    lines
}

pub fn format_rejected(error: &dyn std::error::Error) -> String {
    format!("{}rejected: {}", indent(1), error)
}

// ============================================================================
// Build
// ============================================================================

pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Grid \u{2192} index.html".to_string()];

    for (i, page) in report.pages.iter().enumerate() {
        lines.push(format!(
            "{} \u{2192} {}",
            entry_line(i + 1, &page.caption, &page.id),
            page.path
        ));
    }

    for missing in &report.missing_assets {
        lines.push(format!("Missing: {}", missing));
    }

    lines.push(format!(
        "Generated 1 grid page, {} overlay pages, copied {} assets",
        report.pages.len(),
        report.copied_assets
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
