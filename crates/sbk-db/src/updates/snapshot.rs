//! Dashboard snapshot metadata update builder.

use sbk_core::enums::SnapshotStatus;
use serde::Serialize;

/// Changes to a stored snapshot. Computed fields cannot be updated.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SnapshotUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SnapshotStatus>,
}

impl SnapshotUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none()
    }
}

pub struct SnapshotUpdateBuilder(SnapshotUpdate);

impl SnapshotUpdateBuilder {
    pub fn new() -> Self {
        Self(SnapshotUpdate::default())
    }

    pub fn name(mut self, val: impl Into<String>) -> Self {
        self.0.name = Some(val.into());
        self
    }

    pub const fn status(mut self, val: SnapshotStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    pub fn build(self) -> SnapshotUpdate {
        self.0
    }
}

impl Default for SnapshotUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
