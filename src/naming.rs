//! The `NNN-name` convention used when scanning a content directory.
//!
//! Group directories and image files may carry a numeric prefix that fixes
//! their display order. The rest of the name, with dashes turned into
//! spaces, becomes the group title or the default caption:
//!
//! - `010-Street-Scenes/` → group "Street Scenes", ordered at 10
//! - `002-Harbour-at-Dusk.jpg` → caption "Harbour at Dusk", ordered at 2
//! - `portrait.jpg` → caption "portrait", ordered after every numbered entry

use std::cmp::Ordering;

/// A file or directory name split into its order prefix and title.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Order prefix, if the name starts with digits followed by `-` (or is all digits).
    pub number: Option<u32>,
    /// Remainder after the prefix, dashes preserved.
    pub name: String,
    /// `name` with dashes replaced by spaces.
    pub display_title: String,
}

impl ParsedName {
    /// Ordering used for scanned entries: numbered first by number, then
    /// unnumbered, ties broken by the raw name.
    pub fn display_order(&self, other: &Self) -> Ordering {
        match (self.number, other.number) {
            (Some(a), Some(b)) => a.cmp(&b).then_with(|| self.name.cmp(&other.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.name.cmp(&other.name),
        }
    }
}

pub fn parse_entry_name(name: &str) -> ParsedName {
    let (number, rest) = match name.split_once('-') {
        Some((prefix, rest)) => match prefix.parse::<u32>() {
            Ok(n) => (Some(n), rest),
            Err(_) => (None, name),
        },
        None => match name.parse::<u32>() {
            Ok(n) => (Some(n), ""),
            Err(_) => (None, name),
        },
    };
    ParsedName {
        number,
        name: rest.to_string(),
        display_title: rest.replace('-', " "),
    }
}
