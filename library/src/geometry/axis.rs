use strum_macros::{EnumCount, EnumIter};

#[derive(EnumCount, EnumIter, Copy, Clone, Default, Debug, PartialEq)]
pub(crate) enum Axis {
    #[default]
    X,
    Y,
    Z,
}

impl Axis {
    #[must_use]
    pub(crate) const fn as_index(self) -> usize {
        self as usize
    }
}
