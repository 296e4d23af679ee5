use crate::utils::revision::Revision;
use log::{debug, warn};
use strum_macros::{Display, EnumIter};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Residency {
    /// Re-sent with every frame.
    Dynamic,
    /// Sent once, then kept on the device until invalidated.
    Static,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, Display)]
pub enum DataKind {
    Primitives,
    Lights,
    BoundingBoxes,
    Materials,
    Textures,
    RandomTable,
    LevelTable,
}

impl DataKind {
    #[must_use]
    pub const fn residency(self) -> Residency {
        match self {
            DataKind::Primitives | DataKind::Lights | DataKind::BoundingBoxes => Residency::Dynamic,
            DataKind::Materials | DataKind::Textures | DataKind::RandomTable | DataKind::LevelTable => Residency::Static,
        }
    }
}

/// Remembers whether the static data already lives on the device.
/// The flag only changes through [`Self::mark_static_uploaded`] and
/// [`Self::invalidate`]; revisions merely make a forgotten invalidation visible.
pub struct DeviceSyncCache {
    static_uploaded: bool,
    uploaded_revision: Option<Revision>,
    stale_frames: u64,
    staleness_reported: bool,
}

impl DeviceSyncCache {
    #[must_use]
    pub fn new() -> Self {
        Self {
            static_uploaded: false,
            uploaded_revision: None,
            stale_frames: 0,
            staleness_reported: false,
        }
    }

    #[must_use]
    pub fn needs_static_upload(&self) -> bool {
        !self.static_uploaded
    }

    /// To be called only after the device accepted the transfer.
    pub fn mark_static_uploaded(&mut self, revision: Revision) {
        self.static_uploaded = true;
        self.uploaded_revision = Some(revision);
        self.staleness_reported = false;
        debug!("static data resident on device at {}", revision);
    }

    pub fn invalidate(&mut self) {
        if self.static_uploaded {
            debug!("static data invalidated");
        }
        self.static_uploaded = false;
    }

    /// Reports static data that changed after the upload without an
    /// invalidation; the device keeps the old copy in that case.
    /// Warns once per upload.
    pub fn check_staleness(&mut self, current: Revision) -> bool {
        let stale = self.static_uploaded && self.uploaded_revision != Some(current);
        if stale {
            self.stale_frames += 1;
            if !self.staleness_reported {
                self.staleness_reported = true;
                warn!("materials or textures changed after upload ({:?} -> {}); invalidate the sync cache to resend them", self.uploaded_revision, current);
            }
        }
        stale
    }

    #[must_use]
    pub fn stale_frames(&self) -> u64 {
        self.stale_frames
    }

    #[must_use]
    pub fn staleness_reported(&self) -> bool {
        self.staleness_reported
    }
}

impl Default for DeviceSyncCache {
    fn default() -> Self {
        Self::new()
    }
}
