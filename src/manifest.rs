//! Manifest loading and content scanning.
//!
//! A gallery is defined by an explicit, ordered list of [`ImageEntry`]. The
//! list comes from one of two places:
//!
//! 1. **A manifest file** (`.toml` or `.json`), see [`load_manifest`].
//! 2. **A content directory**, see [`scan`]:
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── 001-cover.jpg            # Root images: implicit group
//! ├── 010-Landscapes/          # Group "Landscapes"
//! │   ├── 001-dawn.jpg
//! │   ├── 001-dawn.txt         # Caption sidecar
//! │   └── 002-dusk.jpg
//! └── 020-Portraits/           # Group "Portraits"
//!     └── 001-anna.jpg
//! ```
//!
//! Scanning rules:
//! - Images at the root are ungrouped; images in a first-level directory
//!   belong to the group named by that directory's display title. Deeper
//!   directories are not scanned.
//! - Order follows the `NNN-` prefix (see [`crate::naming`]); root images
//!   come before groups.
//! - The id is the path relative to the root, without extension. When two
//!   files share a stem (`001-dawn.jpg`, `001-dawn.png`), the later one keeps
//!   its extension in the id.
//! - Two group directories with the same display title (`010-Landscapes/`,
//!   `020-Landscapes/`) are an error.
//! - The caption is the sidecar `.txt` if present, else the file's display title.
//! - Thumbnail and full source are the same relative path.

use crate::model::{GalleryModel, ModelError};
use crate::naming::parse_entry_name;
use crate::types::{ImageEntry, Manifest};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Unsupported manifest format (expected .toml or .json): {0}")]
    UnsupportedFormat(PathBuf),
    #[error("Directories {first} and {second} share the group title \"{title}\"")]
    DuplicateGroup {
        title: String,
        first: String,
        second: String,
    },
    #[error(transparent)]
    Model(#[from] ModelError),
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "avif"];

/// Directories never treated as groups.
const SKIPPED_DIRS: &[&str] = &["dist", "assets"];

/// Read a manifest file, picking the parser from the extension.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let content = match ext.as_str() {
        "toml" | "json" => fs::read_to_string(path)?,
        _ => return Err(ManifestError::UnsupportedFormat(path.to_path_buf())),
    };
    let manifest = if ext == "toml" {
        toml::from_str(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    Ok(manifest)
}

/// Resolve the entry list: the explicit manifest when given, else a scan of `source`.
pub fn resolve(source: &Path, manifest: Option<&Path>) -> Result<Manifest, ManifestError> {
    match manifest {
        Some(path) => load_manifest(path),
        None => scan(source),
    }
}

/// Resolve and validate in one step.
pub fn load_model(source: &Path, manifest: Option<&Path>) -> Result<GalleryModel, ManifestError> {
    let manifest = resolve(source, manifest)?;
    Ok(GalleryModel::from_entries(manifest.entries)?)
}

/// Walk a content directory into a manifest.
pub fn scan(root: &Path) -> Result<Manifest, ManifestError> {
    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by(display_order)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_skipped(e));

    let mut entries = Vec::new();
    let mut taken_ids = HashSet::new();
    // group title -> directory it was first seen in
    let mut group_dirs: HashMap<String, String> = HashMap::new();
    for item in walker {
        let item = item?;
        if !(item.file_type().is_file() && is_image(item.path())) {
            continue;
        }
        let mut entry = scan_entry(root, item.path())?;
        entry.id = unique_id(&entry.id, &entry.full_source, &mut taken_ids);

        if let (Some(title), Some(dir)) = (entry.group.as_ref(), group_dir(&entry.full_source)) {
            let first = group_dirs.entry(title.clone()).or_insert_with(|| dir.to_string());
            if first.as_str() != dir {
                return Err(ManifestError::DuplicateGroup {
                    title: title.clone(),
                    first: first.clone(),
                    second: dir.to_string(),
                });
            }
        }
        entries.push(entry);
    }
    Ok(Manifest { entries })
}

/// First free id among the stem id, the full relative path, then `path~N`.
fn unique_id(stem_id: &str, source: &str, taken: &mut HashSet<String>) -> String {
    let mut candidates = [stem_id.to_string(), source.to_string()]
        .into_iter()
        .chain((2..).map(|n| format!("{source}~{n}")));
    let id = candidates
        .find(|c| !taken.contains(c))
        .unwrap_or_else(|| source.to_string());
    taken.insert(id.clone());
    id
}

/// Directory part of a scanned relative source, `None` at the root.
fn group_dir(source: &str) -> Option<&str> {
    source.rsplit_once('/').map(|(dir, _)| dir)
}

fn scan_entry(root: &Path, path: &Path) -> Result<ImageEntry, ManifestError> {
    let rel = path.strip_prefix(root).unwrap_or(path);
    let source = to_url_path(rel);
    let id = to_url_path(&rel.with_extension(""));

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let sidecar = path.with_extension("txt");
    let caption = if sidecar.is_file() {
        fs::read_to_string(&sidecar)?.trim().to_string()
    } else {
        title_or_raw(&stem)
    };

    let group = rel
        .parent()
        .and_then(Path::file_name)
        .map(|dir| title_or_raw(&dir.to_string_lossy()));

    let mut entry = ImageEntry::new(id, source.clone(), source).with_caption(caption);
    entry.group = group;
    Ok(entry)
}

/// Display title, or the raw name when the title is empty (`007.jpg`).
fn title_or_raw(name: &str) -> String {
    let parsed = parse_entry_name(name);
    if parsed.display_title.is_empty() {
        name.to_string()
    } else {
        parsed.display_title
    }
}

/// Relative path with `/` separators regardless of platform.
fn to_url_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Files before directories, then `NNN-` order on the stem.
fn display_order(a: &DirEntry, b: &DirEntry) -> Ordering {
    let a_dir = a.file_type().is_dir();
    let b_dir = b.file_type().is_dir();
    a_dir
        .cmp(&b_dir)
        .then_with(|| parse_entry_name(&sort_stem(a)).display_order(&parse_entry_name(&sort_stem(b))))
        .then_with(|| a.file_name().cmp(b.file_name()))
}

fn sort_stem(entry: &DirEntry) -> String {
    let path = entry.path();
    let name = if entry.file_type().is_dir() {
        path.file_name()
    } else {
        path.file_stem()
    };
    name.map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&&*name))
}

fn is_image(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    IMAGE_EXTENSIONS.contains(&ext.as_str())
}
