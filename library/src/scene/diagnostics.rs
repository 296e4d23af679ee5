/// Counters for conditions the registries recover from silently.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneDiagnostics {
    pub(crate) rejected_handles: u64,
    pub(crate) rejected_box_ids: u64,
    pub(crate) dropped_box_assignments: u64,
    pub(crate) exhausted_capacity: u64,
}

impl SceneDiagnostics {
    /// Setter calls ignored because the handle was never allocated.
    #[must_use]
    pub fn rejected_handles(&self) -> u64 {
        self.rejected_handles
    }

    #[must_use]
    pub fn rejected_box_ids(&self) -> u64 {
        self.rejected_box_ids
    }

    /// Assignments that found the target box full.
    #[must_use]
    pub fn dropped_box_assignments(&self) -> u64 {
        self.dropped_box_assignments
    }

    #[must_use]
    pub fn exhausted_capacity(&self) -> u64 {
        self.exhausted_capacity
    }
}
