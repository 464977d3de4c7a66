//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root; every key is optional and overrides the stock default.
//!
//! ## Configuration Options
//!
//! ```toml
//! title = "Gallery"            # Page title and heading
//! intro = "Some *markdown*"    # Optional text above the grid
//! footer = "© 2016"            # Optional footer line
//!
//! [grid]
//! columns = 3                  # Tiles per row on wide screens
//! thumbnail_gap = "1rem"       # Gap between tiles
//! grid_padding = "2rem"        # Padding around the grid
//!
//! [lightbox]
//! show_captions = true         # Caption under the overlay image
//! show_counter = true          # "2 / 5" position within the group
//!
//! [[menu]]                     # Collapsible navigation menu, in order
//! title = "Home"
//! href = "index.html"
//!
//! [cta]                        # Blinking call-to-action link in the menu
//! title = "Registration"
//! href = "registration.html"
//! blink_interval_ms = 1000     # One fade-out/fade-in cycle
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#111111"
//! text_muted = "#666666"       # Captions, counter, menu
//! border = "#e0e0e0"
//! link = "#333333"
//! link_hover = "#000000"
//! backdrop = "rgba(0, 0, 0, 0.85)"
//!
//! [colors.dark]
//! background = "#0a0a0a"
//! text = "#eeeeee"
//! text_muted = "#999999"
//! border = "#333333"
//! link = "#cccccc"
//! link_hover = "#ffffff"
//! backdrop = "rgba(0, 0, 0, 0.92)"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Smallest blink period accepted; anything faster is a strobe.
pub const MIN_BLINK_INTERVAL_MS: u32 = 200;

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page title and heading.
    pub title: String,
    /// Markdown shown above the grid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intro: Option<String>,
    /// Plain text footer line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
    pub grid: GridConfig,
    pub lightbox: LightboxConfig,
    pub colors: ColorConfig,
    /// Links in the collapsible menu.
    pub menu: Vec<MenuLink>,
    /// Blinking call-to-action link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<CtaConfig>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Gallery".to_string(),
            intro: None,
            footer: None,
            grid: GridConfig::default(),
            lightbox: LightboxConfig::default(),
            colors: ColorConfig::default(),
            menu: Vec::new(),
            cta: None,
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if !(1..=12).contains(&self.grid.columns) {
            return Err(ConfigError::Validation(
                "grid.columns must be 1-12".into(),
            ));
        }
        for (i, link) in self.menu.iter().enumerate() {
            if link.title.is_empty() || link.href.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "menu[{i}] needs both title and href"
                )));
            }
        }
        if let Some(cta) = &self.cta {
            if cta.title.is_empty() || cta.href.is_empty() {
                return Err(ConfigError::Validation(
                    "cta needs both title and href".into(),
                ));
            }
            if cta.blink_interval_ms < MIN_BLINK_INTERVAL_MS {
                return Err(ConfigError::Validation(format!(
                    "cta.blink_interval_ms must be at least {MIN_BLINK_INTERVAL_MS}"
                )));
            }
        }
        Ok(())
    }
}

/// Tile grid layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Tiles per row on wide screens.
    pub columns: u32,
    /// Gap between tiles (CSS value).
    pub thumbnail_gap: String,
    /// Padding around the grid (CSS value).
    pub grid_padding: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: 3,
            thumbnail_gap: "1rem".to_string(),
            grid_padding: "2rem".to_string(),
        }
    }
}

/// Overlay presentation toggles.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightboxConfig {
    pub show_captions: bool,
    pub show_counter: bool,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            show_captions: true,
            show_counter: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuLink {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtaConfig {
    pub title: String,
    pub href: String,
    #[serde(default = "default_blink_interval")]
    pub blink_interval_ms: u32,
}

fn default_blink_interval() -> u32 {
    1000
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Captions, counter and menu.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    pub link_hover: String,
    /// Overlay backdrop behind the open image.
    pub backdrop: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#111111".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#333333".to_string(),
            link_hover: "#000000".to_string(),
            backdrop: "rgba(0, 0, 0, 0.85)".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0a0a0a".to_string(),
            text: "#eeeeee".to_string(),
            text_muted: "#999999".to_string(),
            border: "#333333".to_string(),
            link: "#cccccc".to_string(),
            link_hover: "#ffffff".to_string(),
            backdrop: "rgba(0, 0, 0, 0.92)".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key-by-key; any other overlay value (arrays included)
/// replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value, `None` if absent.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory over stock defaults.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(dir)?)
}

/// A fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Lightbox Configuration
# =============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Page title and heading.
title = "Gallery"

# Markdown shown above the grid.
# intro = "Selected work, 2014-2016."

# Plain text footer line.
# footer = "© 2016"

# ---------------------------------------------------------------------------
# Tile grid
# ---------------------------------------------------------------------------
[grid]
# Tiles per row on wide screens (1-12).
columns = 3

# Gap between tiles (CSS value).
thumbnail_gap = "1rem"

# Padding around the grid (CSS value).
grid_padding = "2rem"

# ---------------------------------------------------------------------------
# Lightbox overlay
# ---------------------------------------------------------------------------
[lightbox]
# Caption under the open image.
show_captions = true

# "2 / 5" position within the image's group.
show_counter = true

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#111111"
text_muted = "#666666"    # Captions, counter, menu
border = "#e0e0e0"
link = "#333333"
link_hover = "#000000"
backdrop = "rgba(0, 0, 0, 0.85)"

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0a0a0a"
text = "#eeeeee"
text_muted = "#999999"
border = "#333333"
link = "#cccccc"
link_hover = "#ffffff"
backdrop = "rgba(0, 0, 0, 0.92)"

# ---------------------------------------------------------------------------
# Menu links, in display order
# ---------------------------------------------------------------------------
# [[menu]]
# title = "Home"
# href = "index.html"

# ---------------------------------------------------------------------------
# Call-to-action link, blinking while the page is shown
# ---------------------------------------------------------------------------
# [cta]
# title = "Registration"
# href = "registration.html"
# blink_interval_ms = 1000
"##
}

/// Generate CSS custom properties from color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
{light}
}}

@media (prefers-color-scheme: dark) {{
    :root {{
{dark}
    }}
}}"#,
        light = color_vars(&colors.light, "    "),
        dark = color_vars(&colors.dark, "        "),
    )
}

fn color_vars(scheme: &ColorScheme, indent: &str) -> String {
    [
        ("bg", &scheme.background),
        ("text", &scheme.text),
        ("text-muted", &scheme.text_muted),
        ("border", &scheme.border),
        ("link", &scheme.link),
        ("link-hover", &scheme.link_hover),
        ("backdrop", &scheme.backdrop),
    ]
    .iter()
    .map(|(name, value)| format!("{indent}--color-{name}: {value};"))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Generate CSS custom properties for grid layout and the blink period.
pub fn generate_theme_css(config: &SiteConfig) -> String {
    let blink = config
        .cta
        .as_ref()
        .map(|c| c.blink_interval_ms)
        .unwrap_or_else(default_blink_interval);
    format!(
        r#":root {{
    --grid-columns: {columns};
    --thumbnail-gap: {gap};
    --grid-padding: {padding};
    --blink-period: {blink}ms;
}}"#,
        columns = config.grid.columns,
        gap = config.grid.thumbnail_gap,
        padding = config.grid.grid_padding,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.title, "Gallery");
        assert_eq!(config.grid.columns, 3);
        assert!(config.lightbox.show_captions);
        assert!(config.menu.is_empty());
        assert!(config.cta.is_none());
        assert_eq!(config.colors.dark.background, "#0a0a0a");
    }

    #[test]
    fn parse_partial_config() {
        let config: SiteConfig = toml::from_str(
            r##"
[colors.light]
backdrop = "black"
"##,
        )
        .unwrap();
        assert_eq!(config.colors.light.backdrop, "black");
        assert_eq!(config.colors.light.text, "#111111");
        assert_eq!(config.grid.columns, 3);
    }

    #[test]
    fn parse_menu_and_cta() {
        let config: SiteConfig = toml::from_str(
            r#"
[[menu]]
title = "Home"
href = "index.html"

[[menu]]
title = "About"
href = "about.html"

[cta]
title = "Registration"
href = "registration.html"
"#,
        )
        .unwrap();
        assert_eq!(config.menu.len(), 2);
        assert_eq!(config.menu[1].title, "About");
        let cta = config.cta.unwrap();
        assert_eq!(cta.blink_interval_ms, 1000);
    }

    // =========================================================================
    // load_config
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "Gallery");
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r#"
title = "MRS"
footer = "B-Tech Project 2016"

[grid]
columns = 4
"#,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.title, "MRS");
        assert_eq!(config.footer.as_deref(), Some("B-Tech Project 2016"));
        assert_eq!(config.grid.columns, 4);
        assert_eq!(config.grid.thumbnail_gap, "1rem");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "title = ").unwrap();
        assert!(matches!(load_config(tmp.path()), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[grid]\ncolumnz = 2\n").unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[carousel]\nspeed = 3\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_columns_range() {
        let mut config = SiteConfig::default();
        config.grid.columns = 0;
        assert!(config.validate().is_err());
        config.grid.columns = 13;
        assert!(config.validate().is_err());
        config.grid.columns = 12;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_empty_title() {
        let mut config = SiteConfig::default();
        config.title = "  ".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn validate_blink_too_fast() {
        let mut config = SiteConfig::default();
        config.cta = Some(CtaConfig {
            title: "Go".to_string(),
            href: "go.html".to_string(),
            blink_interval_ms: 50,
        });
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("blink_interval_ms"));
    }

    #[test]
    fn validate_menu_link_needs_href() {
        let mut config = SiteConfig::default();
        config.menu.push(MenuLink {
            title: "Home".to_string(),
            href: String::new(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_config_validates_values() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[grid]\ncolumns = 40\n").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // Merging
    // =========================================================================

    #[test]
    fn merge_toml_table_merge() {
        let base: toml::Value = toml::from_str("[grid]\ncolumns = 3\nthumbnail_gap = \"1rem\"\n").unwrap();
        let overlay: toml::Value = toml::from_str("[grid]\ncolumns = 5\n").unwrap();
        let merged = merge_toml(base, overlay);
        let grid = merged.get("grid").unwrap();
        assert_eq!(grid.get("columns").unwrap().as_integer(), Some(5));
        assert_eq!(grid.get("thumbnail_gap").unwrap().as_str(), Some("1rem"));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base: toml::Value =
            toml::from_str("[[menu]]\ntitle = \"A\"\nhref = \"a\"\n[[menu]]\ntitle = \"B\"\nhref = \"b\"\n")
                .unwrap();
        let overlay: toml::Value = toml::from_str("[[menu]]\ntitle = \"C\"\nhref = \"c\"\n").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged.get("menu").unwrap().as_array().unwrap().len(), 1);
    }

    #[test]
    fn resolve_config_with_no_overlay() {
        let config = resolve_config(stock_defaults_value(), None).unwrap();
        assert_eq!(config.grid.columns, 3);
    }

    #[test]
    fn stock_defaults_value_is_table_without_optionals() {
        let value = stock_defaults_value();
        let table = value.as_table().unwrap();
        assert!(table.contains_key("grid"));
        assert!(table.contains_key("colors"));
        assert!(!table.contains_key("cta"));
    }

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.title, defaults.title);
        assert_eq!(parsed.grid.columns, defaults.grid.columns);
        assert_eq!(parsed.colors.light.backdrop, defaults.colors.light.backdrop);
        assert_eq!(parsed.colors.dark.link_hover, defaults.colors.dark.link_hover);
        assert!(parsed.cta.is_none());
        assert!(parsed.menu.is_empty());
    }

    // =========================================================================
    // CSS generation
    // =========================================================================

    #[test]
    fn generate_color_css_includes_both_schemes() {
        let mut colors = ColorConfig::default();
        colors.light.background = "#f0f0f0".to_string();
        colors.dark.background = "#1a1a1a".to_string();
        let css = generate_color_css(&colors);
        assert!(css.contains("--color-bg: #f0f0f0;"));
        assert!(css.contains("--color-bg: #1a1a1a;"));
        assert!(css.contains("--color-backdrop:"));
        assert!(css.contains("prefers-color-scheme: dark"));
    }

    #[test]
    fn generate_theme_css_uses_blink_period() {
        let mut config = SiteConfig::default();
        assert!(generate_theme_css(&config).contains("--blink-period: 1000ms;"));
        config.cta = Some(CtaConfig {
            title: "Go".to_string(),
            href: "go.html".to_string(),
            blink_interval_ms: 600,
        });
        let css = generate_theme_css(&config);
        assert!(css.contains("--blink-period: 600ms;"));
        assert!(css.contains("--grid-columns: 3;"));
    }
}
