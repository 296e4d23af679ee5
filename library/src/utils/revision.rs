use derive_more::Display;

/// Monotonic change counter of a registry; compared, never decremented.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Display)]
#[display("r{_0}")]
pub struct Revision(u64);

impl Revision {
    pub(crate) fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    #[must_use]
    pub(crate) fn combined_with(self, other: Revision) -> Revision {
        Revision(self.0.wrapping_add(other.0))
    }

    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}
