//! Shared test utilities for the simple-lightbox test suite.
//!
//! Provides fixture setup, small ready-made galleries, lookup helpers and a
//! recording observer for asserting on controller notifications.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut controller = LightboxController::new(abc_model());
//! let recorder = Recorder::default();
//! controller.subscribe(recorder.clone());
//!
//! controller.open("B").unwrap();
//! assert_eq!(recorder.open_ids(), vec![Some("B".to_string())]);
//! ```

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use tempfile::TempDir;

use crate::lightbox::{Observer, Snapshot};
use crate::model::GalleryModel;
use crate::types::ImageEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Entry and model builders
// =========================================================================

/// An entry with predictable sources and caption derived from its id.
pub fn entry(id: &str, group: Option<&str>) -> ImageEntry {
    let entry = ImageEntry::new(id, format!("thumbs/{id}.jpg"), format!("full/{id}.jpg"))
        .with_caption(format!("Caption {id}"));
    match group {
        Some(g) => entry.with_group(g),
        None => entry,
    }
}

/// A, B, C all in group "G".
pub fn abc_model() -> GalleryModel {
    GalleryModel::from_entries(vec![
        entry("A", Some("G")),
        entry("B", Some("G")),
        entry("C", Some("G")),
    ])
    .unwrap()
}

/// Interleaved groups: G = [g1, g2, g3], H = [h1], ungrouped = [u1, u2].
pub fn mixed_model() -> GalleryModel {
    GalleryModel::from_entries(vec![
        entry("g1", Some("G")),
        entry("u1", None),
        entry("g2", Some("G")),
        entry("h1", Some("H")),
        entry("g3", Some("G")),
        entry("u2", None),
    ])
    .unwrap()
}

/// `n` entries `{group}0..{group}{n-1}`, all in `group`.
pub fn group_model(group: &str, n: usize) -> GalleryModel {
    let entries = (0..n)
        .map(|i| entry(&format!("{group}{i}"), Some(group)))
        .collect();
    GalleryModel::from_entries(entries).unwrap()
}

// =========================================================================
// Lookups and extractors
// =========================================================================

/// Ids in iteration order.
pub fn ids<'a>(entries: impl IntoIterator<Item = &'a ImageEntry>) -> Vec<&'a str> {
    entries.into_iter().map(|e| e.id.as_str()).collect()
}

/// Find an entry by id. Panics if not found.
pub fn find_entry<'a>(entries: &'a [ImageEntry], id: &str) -> &'a ImageEntry {
    entries.iter().find(|e| e.id == id).unwrap_or_else(|| {
        let available = ids(entries);
        panic!("entry '{id}' not found. Available: {available:?}")
    })
}

// =========================================================================
// Observer recording
// =========================================================================

/// Records the open entry id of every snapshot it receives.
///
/// Clones share the same log, so keep one clone and subscribe the other.
#[derive(Clone, Default)]
pub struct Recorder {
    log: Rc<RefCell<Vec<Option<String>>>>,
}

impl Recorder {
    pub fn open_ids(&self) -> Vec<Option<String>> {
        self.log.borrow().clone()
    }
}

impl Observer for Recorder {
    fn on_change(&mut self, snapshot: &Snapshot<'_>) {
        self.log
            .borrow_mut()
            .push(snapshot.open_entry.map(|e| e.id.clone()));
    }
}
