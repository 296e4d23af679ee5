use crate::geometry::aabb::Aabb;
use crate::geometry::alias::Point;
use crate::scene::handles::PrimitiveHandle;

/// Outcome of placing a primitive into a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Membership {
    Inserted,
    AlreadyPresent,
    /// The box is full; the extent still grew but the primitive is not listed.
    Dropped,
    /// The box id lies outside the index.
    Rejected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoundingBox {
    extent: Aabb,
    members: Vec<PrimitiveHandle>,
    member_capacity: usize,
}

impl BoundingBox {
    #[must_use]
    pub(crate) fn new(view_distance: f32, member_capacity: usize) -> Self {
        assert!(member_capacity > 0);
        Self {
            extent: Aabb::make_inverted(view_distance),
            members: Vec::with_capacity(member_capacity),
            member_capacity,
        }
    }

    pub(crate) fn assign(&mut self, handle: PrimitiveHandle, points: &[Point], half_width: f32) -> Membership {
        let membership = if self.members.contains(&handle) {
            Membership::AlreadyPresent
        } else if self.members.len() < self.member_capacity {
            self.members.push(handle);
            Membership::Inserted
        } else {
            Membership::Dropped
        };

        for point in points {
            self.extent.include(*point, half_width);
        }
        membership
    }

    /// Removes the handle from the member list; the extent is kept.
    pub(crate) fn detach(&mut self, handle: PrimitiveHandle) -> bool {
        match self.members.iter().position(|member| *member == handle) {
            Some(position) => {
                self.members.remove(position);
                true
            }
            None => false,
        }
    }

    pub(crate) fn reset(&mut self, view_distance: f32) {
        self.extent = Aabb::make_inverted(view_distance);
        self.members.clear();
    }

    #[must_use]
    pub fn extent(&self) -> &Aabb {
        &self.extent
    }

    #[must_use]
    pub fn members(&self) -> &[PrimitiveHandle] {
        &self.members
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn member_capacity(&self) -> usize {
        self.member_capacity
    }
}
