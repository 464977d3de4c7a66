//! The gallery model: an immutable, validated list of entries.
//!
//! ## Groups
//!
//! Every entry belongs to exactly one group. Entries with a `group` tag are
//! grouped by that tag; entries without one (or with an empty tag) share a
//! single implicit group, addressed as `None` throughout this module.
//!
//! Group membership never reorders anything: a group's entries are the
//! manifest entries carrying that tag, in manifest order.
//!
//! ## Validation
//!
//! [`GalleryModel::load`] rejects the whole list when any entry has an empty
//! `id`, `thumbnail_source` or `full_source`, or when two entries share an
//! `id`. A rejected load leaves the previous contents in place.

use crate::types::ImageEntry;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Entry not found: {0}")]
    NotFound(String),
}

#[derive(Debug, Clone, Default)]
pub struct GalleryModel {
    entries: Vec<ImageEntry>,
    /// id → manifest position
    index: HashMap<String, usize>,
}

impl GalleryModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a model from a list of entries, validating it.
    pub fn from_entries(entries: Vec<ImageEntry>) -> Result<Self, ModelError> {
        let mut model = Self::new();
        model.load(entries)?;
        Ok(model)
    }

    /// Replaces the entire entry list.
    pub fn load(&mut self, entries: Vec<ImageEntry>) -> Result<(), ModelError> {
        let index = validate(&entries)?;
        self.entries = entries;
        self.index = index;
        Ok(())
    }

    /// All entries in display order.
    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ImageEntry> {
        self.index.get(id).map(|&pos| &self.entries[pos])
    }

    /// Position of an entry in the full manifest (0-based).
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Effective group of an entry, or `NotFound`.
    pub fn group_of(&self, id: &str) -> Result<Option<&str>, ModelError> {
        self.get(id)
            .map(ImageEntry::group)
            .ok_or_else(|| ModelError::NotFound(id.to_string()))
    }

    /// Entries sharing `group`, in original relative order.
    pub fn entries_in_group(&self, group: Option<&str>) -> Vec<&ImageEntry> {
        self.entries
            .iter()
            .filter(|e| e.group() == group)
            .collect()
    }

    pub fn group_len(&self, group: Option<&str>) -> usize {
        self.entries.iter().filter(|e| e.group() == group).count()
    }

    /// Position of `id` within `group`'s ordered subsequence.
    ///
    /// An entry that exists but belongs to another group is `NotFound` too.
    pub fn index_in_group(&self, id: &str, group: Option<&str>) -> Result<usize, ModelError> {
        self.entries
            .iter()
            .filter(|e| e.group() == group)
            .position(|e| e.id == id)
            .ok_or_else(|| ModelError::NotFound(id.to_string()))
    }

    /// Distinct groups in order of first appearance.
    pub fn groups(&self) -> Vec<Option<&str>> {
        let mut groups: Vec<Option<&str>> = Vec::new();
        for entry in &self.entries {
            let group = entry.group();
            if !groups.contains(&group) {
                groups.push(group);
            }
        }
        groups
    }
}

fn validate(entries: &[ImageEntry]) -> Result<HashMap<String, usize>, ModelError> {
    let mut index = HashMap::with_capacity(entries.len());
    for (pos, entry) in entries.iter().enumerate() {
        if entry.id.is_empty() {
            return Err(ModelError::Validation(format!(
                "entry #{} has an empty id",
                pos + 1
            )));
        }
        if entry.full_source.is_empty() {
            return Err(ModelError::Validation(format!(
                "entry '{}' has an empty full_source",
                entry.id
            )));
        }
        if entry.thumbnail_source.is_empty() {
            return Err(ModelError::Validation(format!(
                "entry '{}' has an empty thumbnail_source",
                entry.id
            )));
        }
        if index.insert(entry.id.clone(), pos).is_some() {
            return Err(ModelError::Validation(format!(
                "duplicate entry id '{}'",
                entry.id
            )));
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;

    #[test]
    fn load_preserves_display_order() {
        let model = GalleryModel::from_entries(vec![
            entry("c", None),
            entry("a", None),
            entry("b", None),
        ])
        .unwrap();
        assert_eq!(ids(model.entries().iter()), vec!["c", "a", "b"]);
    }

    #[test]
    fn load_empty_list_succeeds() {
        let model = GalleryModel::from_entries(vec![]).unwrap();
        assert!(model.is_empty());
        assert!(model.groups().is_empty());
    }

    #[test]
    fn duplicate_id_is_validation_error() {
        let result = GalleryModel::from_entries(vec![entry("a", None), entry("a", Some("G"))]);
        assert!(matches!(result, Err(ModelError::Validation(msg)) if msg.contains("'a'")));
    }

    #[test]
    fn empty_full_source_is_validation_error() {
        let mut bad = entry("a", None);
        bad.full_source.clear();
        let result = GalleryModel::from_entries(vec![bad]);
        assert!(matches!(result, Err(ModelError::Validation(msg)) if msg.contains("full_source")));
    }

    #[test]
    fn empty_thumbnail_source_is_validation_error() {
        let mut bad = entry("a", None);
        bad.thumbnail_source.clear();
        assert!(matches!(
            GalleryModel::from_entries(vec![bad]),
            Err(ModelError::Validation(_))
        ));
    }

    #[test]
    fn empty_id_is_validation_error() {
        assert!(matches!(
            GalleryModel::from_entries(vec![entry("", None)]),
            Err(ModelError::Validation(_))
        ));
    }

    #[test]
    fn failed_load_keeps_previous_contents() {
        let mut model = GalleryModel::from_entries(vec![entry("x", None)]).unwrap();
        let result = model.load(vec![entry("a", None), entry("a", None)]);
        assert!(result.is_err());
        assert_eq!(ids(model.entries().iter()), vec!["x"]);
        assert!(model.get("x").is_some());
        assert!(model.get("a").is_none());
    }

    #[test]
    fn load_replaces_previous_contents() {
        let mut model = GalleryModel::from_entries(vec![entry("x", None)]).unwrap();
        model.load(vec![entry("y", None)]).unwrap();
        assert!(model.get("x").is_none());
        assert_eq!(model.position("y"), Some(0));
    }

    #[test]
    fn entries_in_group_partitions_by_group() {
        let model = mixed_model();
        assert_eq!(ids(model.entries_in_group(Some("G"))), vec!["g1", "g2", "g3"]);
        assert_eq!(ids(model.entries_in_group(Some("H"))), vec!["h1"]);
        assert_eq!(ids(model.entries_in_group(None)), vec!["u1", "u2"]);

        let total: usize = model.groups().iter().map(|g| model.group_len(*g)).sum();
        assert_eq!(total, model.len());
    }

    #[test]
    fn entries_in_unknown_group_is_empty() {
        let model = mixed_model();
        assert!(model.entries_in_group(Some("nope")).is_empty());
    }

    #[test]
    fn groups_in_first_appearance_order() {
        let model = mixed_model();
        assert_eq!(model.groups(), vec![Some("G"), None, Some("H")]);
    }

    #[test]
    fn index_in_group_locates_entry() {
        let model = mixed_model();
        assert_eq!(model.index_in_group("g1", Some("G")), Ok(0));
        assert_eq!(model.index_in_group("g3", Some("G")), Ok(2));
        assert_eq!(model.index_in_group("u2", None), Ok(1));
    }

    #[test]
    fn index_in_group_wrong_group_is_not_found() {
        let model = mixed_model();
        assert_eq!(
            model.index_in_group("g1", Some("H")),
            Err(ModelError::NotFound("g1".to_string()))
        );
    }

    #[test]
    fn index_in_group_unknown_id_is_not_found() {
        let model = mixed_model();
        assert!(matches!(
            model.index_in_group("zzz", None),
            Err(ModelError::NotFound(_))
        ));
    }

    #[test]
    fn group_of_reports_effective_group() {
        let model = GalleryModel::from_entries(vec![
            entry("a", Some("")),
            entry("b", Some("G")),
        ])
        .unwrap();
        assert_eq!(model.group_of("a"), Ok(None));
        assert_eq!(model.group_of("b"), Ok(Some("G")));
        assert!(model.group_of("c").is_err());
    }
}
