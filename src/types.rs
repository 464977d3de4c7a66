//! Shared types used across the manifest, model and renderer.
//!
//! These types are serialized to and from manifest files (TOML or JSON) and
//! must stay identical across all modules that consume them.

use serde::{Deserialize, Serialize};

/// One displayable image with its metadata.
///
/// Entries are created once when a gallery is loaded and never edited
/// afterwards. `thumbnail_source` and `full_source` may point at the same
/// file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageEntry {
    /// Stable identifier, unique within a gallery.
    pub id: String,
    /// Location of the preview shown in the grid.
    pub thumbnail_source: String,
    /// Location of the full-resolution image shown in the overlay.
    pub full_source: String,
    /// Display text under the image.
    #[serde(default)]
    pub caption: String,
    /// Grouping tag. Entries sharing a group are navigable together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl ImageEntry {
    pub fn new(
        id: impl Into<String>,
        thumbnail_source: impl Into<String>,
        full_source: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            thumbnail_source: thumbnail_source.into(),
            full_source: full_source.into(),
            caption: String::new(),
            group: None,
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Effective group: `None` for the implicit group.
    ///
    /// An empty tag counts as no tag, so `group = ""` and an absent group
    /// land in the same implicit group.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref().filter(|g| !g.is_empty())
    }
}

/// An ordered list of entries as read from a manifest file.
///
/// TOML form:
///
/// ```toml
/// [[entries]]
/// id = "dawn"
/// thumbnail_source = "thumbs/dawn.jpg"
/// full_source = "images/dawn.jpg"
/// caption = "Dawn over the lake"
/// group = "Landscapes"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub entries: Vec<ImageEntry>,
}
