//! The lightbox state machine.
//!
//! A [`LightboxController`] owns a [`GalleryModel`] and the overlay state:
//!
//! ```text
//!            open(id)                    next() / previous()
//!  Closed ──────────────▶ Open(group, position) ◀──────┐
//!    ▲                        │       │                │
//!    └──── close() ───────────┘       └────────────────┘
//! ```
//!
//! ## Navigation
//!
//! `next()` and `previous()` move within the open entry's group and wrap
//! around at both ends. A group with a single entry has nowhere to go, so
//! both are no-ops there. Both are also no-ops while closed.
//!
//! ## Notifications
//!
//! Every successful transition hands a [`Snapshot`] to each registered
//! [`Observer`]. Failed calls (`open` with an unknown id) and no-ops
//! (navigation in a single-entry group, `close` while closed) notify nobody.
//! The renderer reads snapshots and must only feed state back through
//! `open`, `next`/`previous` and `close`.

use crate::model::{GalleryModel, ModelError};
use crate::types::ImageEntry;
use serde::Serialize;

/// Overlay state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LightboxState {
    #[default]
    Closed,
    /// `position` indexes the group's ordered subsequence, not the manifest.
    Open {
        group: Option<String>,
        position: usize,
    },
}

/// Inputs that all mean "close the overlay".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    CloseRequest,
    Backdrop,
    EscapeKey,
}

/// Declarative render state handed to observers after each transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<'a> {
    pub entries: &'a [ImageEntry],
    pub open_entry: Option<&'a ImageEntry>,
    pub has_multiple_in_group: bool,
    /// 0-based position of `open_entry` within its group.
    pub position: Option<usize>,
    /// Size of the open entry's group, 0 when closed.
    pub group_size: usize,
}

/// Receives a snapshot after every successful transition.
pub trait Observer {
    fn on_change(&mut self, snapshot: &Snapshot<'_>);
}

struct FnObserver<F>(F);

impl<F> Observer for FnObserver<F>
where
    F: FnMut(&Snapshot<'_>),
{
    fn on_change(&mut self, snapshot: &Snapshot<'_>) {
        (self.0)(snapshot)
    }
}

pub struct LightboxController {
    model: GalleryModel,
    state: LightboxState,
    observers: Vec<Box<dyn Observer>>,
}

impl LightboxController {
    pub fn new(model: GalleryModel) -> Self {
        Self {
            model,
            state: LightboxState::Closed,
            observers: Vec::new(),
        }
    }

    pub fn model(&self) -> &GalleryModel {
        &self.model
    }

    pub fn state(&self) -> &LightboxState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, LightboxState::Open { .. })
    }

    /// Registers an observer notified after every successful transition.
    pub fn subscribe(&mut self, observer: impl Observer + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Registers a closure as an observer.
    pub fn subscribe_fn<F>(&mut self, f: F)
    where
        F: FnMut(&Snapshot<'_>) + 'static,
    {
        self.observers.push(Box::new(FnObserver(f)));
    }

    /// Opens the overlay on `id`, from either state.
    ///
    /// An unknown id returns `NotFound` and leaves the state untouched.
    pub fn open(&mut self, id: &str) -> Result<&LightboxState, ModelError> {
        let group = self.model.group_of(id)?.map(str::to_string);
        let position = self.model.index_in_group(id, group.as_deref())?;
        self.state = LightboxState::Open { group, position };
        self.notify();
        Ok(&self.state)
    }

    pub fn next(&mut self) -> &LightboxState {
        self.step(1);
        &self.state
    }

    pub fn previous(&mut self) -> &LightboxState {
        self.step(-1);
        &self.state
    }

    /// Closes the overlay. Calling it while closed does nothing.
    pub fn close(&mut self) -> &LightboxState {
        if self.is_open() {
            self.state = LightboxState::Closed;
            self.notify();
        }
        &self.state
    }

    pub fn dismiss(&mut self, trigger: DismissTrigger) -> &LightboxState {
        match trigger {
            DismissTrigger::CloseRequest | DismissTrigger::Backdrop | DismissTrigger::EscapeKey => {
                self.close()
            }
        }
    }

    pub fn current_entry(&self) -> Option<&ImageEntry> {
        match &self.state {
            LightboxState::Closed => None,
            LightboxState::Open { group, position } => self
                .model
                .entries()
                .iter()
                .filter(|e| e.group() == group.as_deref())
                .nth(*position),
        }
    }

    /// The entry `offset` steps away from the current one, with wrap-around.
    ///
    /// `None` while closed or when the group has a single entry.
    pub fn sibling(&self, offset: isize) -> Option<&ImageEntry> {
        let LightboxState::Open { group, position } = &self.state else {
            return None;
        };
        let members = self.model.entries_in_group(group.as_deref());
        if members.len() <= 1 {
            return None;
        }
        members
            .get(wrap(*position, members.len(), offset))
            .copied()
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        build_snapshot(&self.model, &self.state)
    }

    /// Replaces the gallery contents, closing the overlay first.
    ///
    /// The close happens even if the new entries are rejected, so no position
    /// into the old list survives the call.
    pub fn reload(&mut self, entries: Vec<ImageEntry>) -> Result<(), ModelError> {
        self.close();
        self.model.load(entries)?;
        self.notify();
        Ok(())
    }

    fn step(&mut self, offset: isize) {
        let LightboxState::Open { group, position } = &self.state else {
            return;
        };
        let len = self.model.group_len(group.as_deref());
        if len <= 1 {
            return;
        }
        let target = wrap(*position, len, offset);
        if let LightboxState::Open { position, .. } = &mut self.state {
            *position = target;
        }
        self.notify();
    }

    fn notify(&mut self) {
        let snapshot = build_snapshot(&self.model, &self.state);
        for observer in &mut self.observers {
            observer.on_change(&snapshot);
        }
    }
}

fn wrap(position: usize, len: usize, offset: isize) -> usize {
    (position as isize + offset).rem_euclid(len as isize) as usize
}

fn build_snapshot<'a>(model: &'a GalleryModel, state: &LightboxState) -> Snapshot<'a> {
    match state {
        LightboxState::Closed => Snapshot {
            entries: model.entries(),
            open_entry: None,
            has_multiple_in_group: false,
            position: None,
            group_size: 0,
        },
        LightboxState::Open { group, position } => {
            let members = model.entries_in_group(group.as_deref());
            Snapshot {
                entries: model.entries(),
                open_entry: members.get(*position).copied(),
                has_multiple_in_group: members.len() > 1,
                position: Some(*position),
                group_size: members.len(),
            }
        }
    }
}
