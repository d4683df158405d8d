//! Collapsed/expanded panel state, remembered per viewport bucket.

use super::platform::HostProfile;
use super::storage::{SettingsExt, SettingsStore};

/// Widths at or below this are treated as the narrow (mobile) layout.
pub const NARROW_BREAKPOINT_PX: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Viewport {
    Narrow,
    Wide,
}

impl Viewport {
    pub fn from_width(width_px: f64) -> Self {
        if width_px <= NARROW_BREAKPOINT_PX {
            Viewport::Narrow
        } else {
            Viewport::Wide
        }
    }

    pub fn storage_key(self) -> &'static str {
        match self {
            Viewport::Narrow => "gym_helper_collapsed_mobile",
            Viewport::Wide => "gym_helper_collapsed_desktop",
        }
    }
}

/// Reads and writes the collapse flag according to the host profile.
/// Hosts that do not persist it always start expanded.
pub struct CollapseStore<S> {
    store: S,
    persists: bool,
}

impl<S: SettingsStore> CollapseStore<S> {
    pub fn new(store: S, profile: &HostProfile) -> Self {
        Self {
            store,
            persists: profile.persists_collapse_state,
        }
    }

    pub fn load(&self, viewport: Viewport) -> bool {
        if !self.persists {
            return false;
        }
        self.store.get_or(viewport.storage_key(), false)
    }

    pub fn save(&self, viewport: Viewport, collapsed: bool) {
        if !self.persists {
            return;
        }
        if let Err(err) = self.store.set(viewport.storage_key(), &collapsed) {
            tracing::warn!("could not persist collapse state: {err}");
        }
    }
}
