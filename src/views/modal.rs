//! Dialog lifecycle: an overlay panel with explicit open/close state.

use crate::views::tree::{RegionId, ViewError, ViewTree};

/// An overlay dialog. Open and close touch presentation state only and
/// are idempotent; the data layer is never involved.
#[derive(Debug)]
pub struct Modal {
    region: RegionId,
    visible: bool,
}

impl Modal {
    /// Bind a dialog to its layout region. Fails when the region was
    /// never declared, before the dialog can be registered anywhere.
    pub fn new(tree: &ViewTree, region: &str) -> Result<Self, ViewError> {
        Ok(Modal {
            region: tree.region(region)?,
            visible: false,
        })
    }

    pub fn open(&mut self) {
        self.visible = true;
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    pub fn is_open(&self) -> bool {
        self.visible
    }

    /// Dismiss-control indirection: every dismiss path lands here, so a
    /// variant can intercept dismissal in one place.
    pub fn on_close(&mut self) {
        self.close();
    }

    #[allow(dead_code)]
    pub fn region(&self) -> RegionId {
        self.region
    }
}
