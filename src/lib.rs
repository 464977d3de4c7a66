//! # Simple Lightbox
//!
//! A thumbnail grid with a lightbox overlay, rendered as a static site.
//! Clicking a tile opens the full image over a dimmed backdrop; previous and
//! next move through the image's group and wrap around at both ends; close,
//! a backdrop click or Escape dismisses the overlay.
//!
//! # Architecture
//!
//! ```text
//! manifest / content dir ──▶ GalleryModel ──▶ LightboxController ──▶ Snapshot ──▶ Renderer
//!                                                   ▲                               │
//!                                                   └──── open / next / previous / close
//! ```
//!
//! The controller is the only place state changes. It owns the model,
//! mutates the overlay state through `&mut self` and hands an immutable
//! [`lightbox::Snapshot`] to every observer after each successful
//! transition. Renderers (the static site in [`generate`], the `replay`
//! command) are pure functions of a snapshot.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `ImageEntry` and `Manifest`, the serde types for manifest files |
//! | [`model`] | `GalleryModel`: validated, ordered entries and group-aware lookups |
//! | [`lightbox`] | `LightboxController` state machine, snapshots and observers |
//! | [`input`] | Textual input events and their dispatch onto the controller |
//! | [`manifest`] | Manifest files (TOML/JSON) and content directory scanning |
//! | [`naming`] | `NNN-name` convention used to order and caption scanned files |
//! | [`config`] | `config.toml` over stock defaults, validation, CSS generation |
//! | [`generate`] | Maud templates for the grid and overlay pages; writes the site |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Page per Overlay State
//!
//! The generated site needs no JavaScript to work. Every reachable overlay
//! state is rendered ahead of time as `view/N.html`, and the overlay's
//! previous, next and close controls are plain links between those pages.
//! The build drives the same [`lightbox::LightboxController`] that `replay`
//! uses, so the links always agree with the state machine's wrap rules.
//! A small script only adds keyboard shortcuts on top.
//!
//! ## Groups Are Tags
//!
//! Grouping is a tag on each entry rather than a nesting level. Entries of
//! different groups may interleave in the manifest; navigation follows the
//! manifest order restricted to the open entry's group.

pub mod config;
pub mod generate;
pub mod input;
pub mod lightbox;
pub mod manifest;
pub mod model;
pub mod naming;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
