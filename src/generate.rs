//! HTML site generation: the renderer side of the lightbox.
//!
//! Every page is a pure function of a [`Snapshot`]: the tile grid is always
//! drawn, and when the snapshot has an open entry the overlay is drawn on
//! top of it. The generator walks the controller through each entry and
//! writes one page per state:
//!
//! ```text
//! dist/
//! ├── index.html          # Closed: grid only
//! ├── view/
//! │   ├── 1.html          # Open on entry 1 (manifest position, 1-based)
//! │   └── ...
//! └── 010-Landscapes/     # Local images, copied from the content directory
//!     └── 001-dawn.jpg
//! ```
//!
//! Rebuilding removes `view/N.html` pages from earlier builds first, so a
//! smaller gallery leaves no orphan pages. Building into the content
//! directory itself is allowed; images already in place are not copied.
//!
//! ## Overlay navigation
//!
//! Prev/next links come from [`LightboxController::sibling`], so they wrap
//! inside the entry's group and disappear for single-entry groups. The close
//! button, the backdrop and the Escape key all lead back to the grid at the
//! entry's tile (`index.html#tile-N`).
//!
//! ## Page chrome
//!
//! The menu toggles with a checkbox, the call-to-action blinks through a CSS
//! animation whose period comes from config, and scroll-to-top is a plain
//! anchor. None of them carry state or scripts; the only script is the
//! overlay's keyboard handler (`static/lightbox.js`).

use crate::config::{self, SiteConfig};
use crate::lightbox::{LightboxController, Snapshot};
use crate::model::{GalleryModel, ModelError};
use crate::types::ImageEntry;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/lightbox.js");

/// Where the overlay's controls point.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLinks {
    pub close: String,
    pub prev: Option<String>,
    pub next: Option<String>,
}

/// One generated overlay page.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub id: String,
    pub caption: String,
    /// Path relative to the output directory.
    pub path: String,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<GeneratedPage>,
    pub copied_assets: usize,
    /// Relative sources that were not found under the content directory.
    pub missing_assets: Vec<String>,
}

pub fn generate(
    model: &GalleryModel,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let css = build_css(config);
    let view_dir = output_dir.join("view");
    remove_stale_pages(&view_dir)?;
    fs::create_dir_all(&view_dir)?;

    let mut controller = LightboxController::new(model.clone());
    let index = render_page(&controller.snapshot(), None, config, &css, "");
    fs::write(output_dir.join("index.html"), index.into_string())?;

    let mut report = GenerateReport::default();
    for (pos, entry) in model.entries().iter().enumerate() {
        controller.open(&entry.id)?;
        let links = overlay_links(&controller, "../");
        let page = render_page(&controller.snapshot(), Some(&links), config, &css, "../");
        let path = view_page_url(pos);
        fs::write(output_dir.join(&path), page.into_string())?;
        report.pages.push(GeneratedPage {
            id: entry.id.clone(),
            caption: entry.caption.clone(),
            path,
        });
    }
    controller.close();

    let (copied, missing) = copy_assets(model, source_dir, output_dir)?;
    report.copied_assets = copied;
    report.missing_assets = missing;
    Ok(report)
}

fn build_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(config),
        CSS_STATIC
    )
}

/// Output path of the overlay page for the entry at manifest position `pos`.
pub fn view_page_url(pos: usize) -> String {
    format!("view/{}.html", pos + 1)
}

fn tile_anchor(pos: usize) -> String {
    format!("tile-{}", pos + 1)
}

/// Links for the controller's current entry, relative to a page at `root`.
///
/// A closed controller yields a plain link back to the grid.
pub fn overlay_links(controller: &LightboxController, root: &str) -> OverlayLinks {
    let model = controller.model();
    let page_of = |entry: &ImageEntry| {
        model
            .position(&entry.id)
            .map(|pos| format!("{root}{}", view_page_url(pos)))
    };
    let close = match controller.current_entry().and_then(|e| model.position(&e.id)) {
        Some(pos) => format!("{root}index.html#{}", tile_anchor(pos)),
        None => format!("{root}index.html"),
    };
    OverlayLinks {
        close,
        prev: controller.sibling(-1).and_then(page_of),
        next: controller.sibling(1).and_then(page_of),
    }
}

fn is_absolute_url(url: &str) -> bool {
    url.starts_with('/')
        || url.starts_with('#')
        || url.contains("://")
        || url.starts_with("data:")
        || url.starts_with("mailto:")
}

/// Prefix a relative URL with `root`; absolute URLs and fragments pass through.
fn resolve_url(root: &str, url: &str) -> String {
    if is_absolute_url(url) {
        url.to_string()
    } else {
        format!("{root}{url}")
    }
}

/// Copy local image files referenced by the manifest into the output.
///
/// URLs, absolute paths and paths escaping the content directory are left
/// alone. Returns the number of copied files and the sources not found.
fn copy_assets(
    model: &GalleryModel,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<(usize, Vec<String>), GenerateError> {
    let sources: BTreeSet<&str> = model
        .entries()
        .iter()
        .flat_map(|e| [e.thumbnail_source.as_str(), e.full_source.as_str()])
        .filter(|s| is_local_relative(s))
        .collect();

    let mut copied = 0;
    let mut missing = Vec::new();
    for source in sources {
        let src = source_dir.join(source);
        if !src.is_file() {
            missing.push(source.to_string());
            continue;
        }
        let dst: PathBuf = output_dir.join(source);
        if is_same_file(&src, &dst)? {
            copied += 1;
            continue;
        }
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&src, &dst)?;
        copied += 1;
    }
    Ok((copied, missing))
}

/// Copying a file onto itself truncates it; building in place hits this.
fn is_same_file(src: &Path, dst: &Path) -> Result<bool, GenerateError> {
    if !dst.exists() {
        return Ok(false);
    }
    Ok(fs::canonicalize(src)? == fs::canonicalize(dst)?)
}

/// Delete `view/N.html` pages left by an earlier build. Other files stay.
fn remove_stale_pages(view_dir: &Path) -> Result<(), GenerateError> {
    if !view_dir.is_dir() {
        return Ok(());
    }
    for item in fs::read_dir(view_dir)? {
        let path = item?.path();
        let is_page = path.extension().is_some_and(|e| e == "html")
            && path
                .file_stem()
                .and_then(|s| s.to_str())
                .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()));
        if is_page && path.is_file() {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}

fn is_local_relative(source: &str) -> bool {
    !is_absolute_url(source)
        && Path::new(source)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

// ============================================================================
// HTML Components
// ============================================================================

fn base_document(title: &str, css: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body id="top" class=[body_class] {
                (content)
            }
        }
    }
}

/// Header with the title and the collapsible menu.
fn site_header(config: &SiteConfig, root: &str) -> Markup {
    html! {
        header.site-header {
            h1.site-title {
                a href={ (root) "index.html" } { (config.title) }
            }
            @if !config.menu.is_empty() || config.cta.is_some() {
                input.menu-toggle type="checkbox" id="menu-toggle";
                label.menu-button for="menu-toggle" aria-label="Menu" {
                    span.menu-line {}
                    span.menu-line {}
                    span.menu-line {}
                }
                nav.site-menu {
                    ul {
                        @for link in &config.menu {
                            li { a href=(resolve_url(root, &link.href)) { (link.title) } }
                        }
                        @if let Some(cta) = &config.cta {
                            li.cta {
                                a.blinking href=(resolve_url(root, &cta.href)) { (cta.title) }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_intro(markdown: &str) -> Markup {
    let mut body = String::new();
    md_html::push_html(&mut body, Parser::new(markdown));
    html! {
        div.intro { (PreEscaped(body)) }
    }
}

/// The tile grid, in manifest order.
pub fn render_grid(entries: &[ImageEntry], root: &str) -> Markup {
    html! {
        div.tile-grid {
            @for (pos, entry) in entries.iter().enumerate() {
                a.tile id=(tile_anchor(pos)) href={ (root) (view_page_url(pos)) } {
                    figure {
                        img src=(resolve_url(root, &entry.thumbnail_source)) alt=(entry.caption) loading="lazy";
                        figcaption {
                            @if let Some(group) = entry.group() {
                                span.tile-group { (group) }
                            }
                            (entry.caption)
                        }
                    }
                }
            }
        }
    }
}

/// The overlay for the snapshot's open entry; empty markup when closed.
pub fn render_overlay(
    snapshot: &Snapshot<'_>,
    links: &OverlayLinks,
    config: &SiteConfig,
    root: &str,
) -> Markup {
    let Some(entry) = snapshot.open_entry else {
        return html! {};
    };
    let counter = snapshot
        .position
        .filter(|_| config.lightbox.show_counter && snapshot.has_multiple_in_group)
        .map(|pos| format!("{} / {}", pos + 1, snapshot.group_size));
    let show_caption = config.lightbox.show_captions && !entry.caption.is_empty();

    html! {
        div.lightbox role="dialog" aria-modal="true" aria-label=(entry.caption) {
            a.lightbox-backdrop href=(links.close) data-dismiss="backdrop" aria-label="Close" {}
            figure.lightbox-frame {
                img src=(resolve_url(root, &entry.full_source)) alt=(entry.caption);
                @if show_caption {
                    figcaption { (entry.caption) }
                }
            }
            @if let Some(counter) = counter {
                p.lightbox-counter { (counter) }
            }
            @if snapshot.has_multiple_in_group {
                @if let Some(prev) = &links.prev {
                    a.lightbox-prev href=(prev) rel="prev" aria-label="Previous" { "‹" }
                }
                @if let Some(next) = &links.next {
                    a.lightbox-next href=(next) rel="next" aria-label="Next" { "›" }
                }
            }
            a.lightbox-close href=(links.close) data-dismiss="close" aria-label="Close" { "×" }
            div.lightbox-keys
                data-close=(links.close)
                data-prev=[links.prev.as_deref()]
                data-next=[links.next.as_deref()] {}
        }
        script { (PreEscaped(JS)) }
    }
}

/// A full page for one snapshot: chrome, grid, and the overlay when open.
pub fn render_page(
    snapshot: &Snapshot<'_>,
    links: Option<&OverlayLinks>,
    config: &SiteConfig,
    css: &str,
    root: &str,
) -> Markup {
    let open = snapshot.open_entry;
    let page_title = match open {
        Some(entry) if !entry.caption.is_empty() => format!("{} - {}", config.title, entry.caption),
        _ => config.title.clone(),
    };

    let content = html! {
        (site_header(config, root))
        main.gallery {
            @if let Some(intro) = &config.intro {
                (render_intro(intro))
            }
            (render_grid(snapshot.entries, root))
        }
        @if let Some(footer) = &config.footer {
            footer.site-footer { p { (footer) } }
        }
        a.to-top href="#top" aria-label="Back to top" { "↑" }
        @if let Some(links) = links {
            (render_overlay(snapshot, links, config, root))
        }
    };

    let body_class = open.map(|_| "lightbox-open");
    base_document(&page_title, css, body_class, content)
}

// ============================================================================
// Tests
// ============================================================================
