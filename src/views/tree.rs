//! View tree - the static catalogue of named layout regions.
//!
//! Components bind to a region by name when they are constructed; an
//! undeclared region is a hard construction error, surfaced before the
//! component registers anywhere. Rendering itself never touches regions:
//! the UI is a stateless projection of component data, so there are no
//! element handles to go stale.

use std::fmt;

/// Regions the standard layout declares
const STANDARD_REGIONS: &[&str] = &[
    "sidebar-accounts",
    "sidebar-menu",
    "header-user",
    "content",
    "modal-login",
    "modal-create-account",
    "modal-new-income",
    "modal-new-expense",
];

/// Construction failure of a view component
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    MissingRegion(String),
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::MissingRegion(name) => {
                write!(f, "layout region does not exist: {name}")
            }
        }
    }
}

impl std::error::Error for ViewError {}

/// A region name proven to exist in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionId(&'static str);

impl RegionId {
    pub fn name(&self) -> &'static str {
        self.0
    }
}

/// The catalogue of declared layout regions
pub struct ViewTree {
    regions: &'static [&'static str],
}

impl ViewTree {
    /// The layout every session starts with
    pub fn standard() -> Self {
        ViewTree {
            regions: STANDARD_REGIONS,
        }
    }

    /// Resolve a region name, failing fast when the layout never
    /// declared it
    pub fn region(&self, name: &str) -> Result<RegionId, ViewError> {
        self.regions
            .iter()
            .find(|r| **r == name)
            .map(|r| RegionId(r))
            .ok_or_else(|| ViewError::MissingRegion(name.to_string()))
    }
}
