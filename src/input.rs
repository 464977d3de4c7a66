//! Input events from the hosting page.
//!
//! Tile activation carries an entry id; navigation and dismissal carry
//! nothing. The textual form is what `simple-lightbox replay` accepts:
//!
//! | Text | Event |
//! |------|-------|
//! | `open:<id>` | [`InputEvent::Activate`] |
//! | `next` | [`InputEvent::Next`] |
//! | `prev`, `previous` | [`InputEvent::Previous`] |
//! | `close` | [`InputEvent::Dismiss`] (close request) |
//! | `backdrop` | [`InputEvent::Dismiss`] (backdrop click) |
//! | `escape`, `esc` | [`InputEvent::Dismiss`] (escape key) |

use crate::lightbox::{DismissTrigger, LightboxController, LightboxState};
use crate::model::ModelError;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Unknown input event: {0}")]
    Unknown(String),
    #[error("Missing entry id in: {0}")]
    MissingId(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Activate(String),
    Next,
    Previous,
    Dismiss(DismissTrigger),
}

impl FromStr for InputEvent {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(id) = s.strip_prefix("open:") {
            if id.is_empty() {
                return Err(InputError::MissingId(s.to_string()));
            }
            return Ok(InputEvent::Activate(id.to_string()));
        }
        match s.to_ascii_lowercase().as_str() {
            "next" => Ok(InputEvent::Next),
            "prev" | "previous" => Ok(InputEvent::Previous),
            "close" => Ok(InputEvent::Dismiss(DismissTrigger::CloseRequest)),
            "backdrop" => Ok(InputEvent::Dismiss(DismissTrigger::Backdrop)),
            "escape" | "esc" => Ok(InputEvent::Dismiss(DismissTrigger::EscapeKey)),
            "open" => Err(InputError::MissingId(s.to_string())),
            _ => Err(InputError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Activate(id) => write!(f, "open:{id}"),
            InputEvent::Next => write!(f, "next"),
            InputEvent::Previous => write!(f, "prev"),
            InputEvent::Dismiss(DismissTrigger::CloseRequest) => write!(f, "close"),
            InputEvent::Dismiss(DismissTrigger::Backdrop) => write!(f, "backdrop"),
            InputEvent::Dismiss(DismissTrigger::EscapeKey) => write!(f, "escape"),
        }
    }
}

/// Applies one event to the controller.
///
/// Only `Activate` can fail, with `NotFound` for an unknown id.
pub fn dispatch<'a>(
    controller: &'a mut LightboxController,
    event: &InputEvent,
) -> Result<&'a LightboxState, ModelError> {
    match event {
        InputEvent::Activate(id) => controller.open(id),
        InputEvent::Next => Ok(controller.next()),
        InputEvent::Previous => Ok(controller.previous()),
        InputEvent::Dismiss(trigger) => Ok(controller.dismiss(*trigger)),
    }
}

/// Parses a list of textual events, stopping at the first bad one.
pub fn parse_events<S: AsRef<str>>(items: &[S]) -> Result<Vec<InputEvent>, InputError> {
    items.iter().map(|s| s.as_ref().parse()).collect()
}
