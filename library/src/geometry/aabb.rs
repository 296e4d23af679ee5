use crate::geometry::alias::{Point, Vector};
use crate::geometry::axis::Axis;
use strum::IntoEnumIterator;

/// Axis-aligned box whose corners only grow until explicitly reset.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb {
    min: Point,
    max: Point,
}

impl Aabb {
    /// Corners swapped and pushed to the view distance, so that
    /// the first included point collapses the box onto itself.
    #[must_use]
    pub fn make_inverted(view_distance: f32) -> Self {
        assert!(view_distance > 0.0, "view distance must be positive");
        Aabb {
            min: Point::new(view_distance, view_distance, view_distance),
            max: Point::new(-view_distance, -view_distance, -view_distance),
        }
    }

    #[must_use]
    pub fn from_points(a: Point, b: Point) -> Self {
        Aabb {
            min: a.component_wise_min(b),
            max: a.component_wise_max(b),
        }
    }

    #[must_use]
    pub fn make_union(left: Aabb, right: Aabb) -> Self {
        Aabb {
            min: left.min.component_wise_min(right.min),
            max: left.max.component_wise_max(right.max),
        }
    }

    pub fn include(&mut self, center: Point, half_width: f32) {
        let offset = Vector::new(half_width, half_width, half_width);
        self.min = self.min.component_wise_min(center - offset);
        self.max = self.max.component_wise_max(center + offset);
    }

    #[must_use]
    pub fn contains(&self, center: Point, half_width: f32) -> bool {
        Axis::iter().all(|axis| {
            let index = axis.as_index();
            self.min[index] <= center[index] - half_width && center[index] + half_width <= self.max[index]
        })
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        Axis::iter().any(|axis| self.min[axis.as_index()] > self.max[axis.as_index()])
    }

    #[must_use]
    pub fn extent(&self) -> Vector {
        self.max - self.min
    }

    #[must_use]
    pub const fn min(&self) -> Point {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> Point {
        self.max
    }
}

pub trait MinMax {
    fn component_wise_min(self, other: Point) -> Self;
    fn component_wise_max(self, other: Point) -> Self;
}

impl MinMax for Point {
    #[must_use]
    fn component_wise_min(self, other: Point) -> Self {
        Point::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    #[must_use]
    fn component_wise_max(self, other: Point) -> Self {
        Point::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_inverted_box_is_inverted() {
        let system_under_test = Aabb::make_inverted(100.0);

        assert_eq!(system_under_test.is_inverted(), true);
        assert_eq!(system_under_test.min(), Point::new(100.0, 100.0, 100.0));
        assert_eq!(system_under_test.max(), Point::new(-100.0, -100.0, -100.0));
    }

    #[test]
    #[should_panic]
    fn test_inverted_box_rejects_zero_distance() {
        let _ = Aabb::make_inverted(0.0);
    }

    #[test]
    fn test_first_inclusion_collapses_sentinel() {
        let mut system_under_test = Aabb::make_inverted(1000.0);

        system_under_test.include(Point::new(1.0, 2.0, 3.0), 0.5);

        assert_eq!(system_under_test.is_inverted(), false);
        assert_eq!(system_under_test.min(), Point::new(0.5, 1.5, 2.5));
        assert_eq!(system_under_test.max(), Point::new(1.5, 2.5, 3.5));
    }

    #[test]
    fn test_inclusion_never_shrinks() {
        let mut system_under_test = Aabb::make_inverted(1000.0);
        system_under_test.include(Point::new(-10.0, 0.0, 0.0), 1.0);
        system_under_test.include(Point::new(10.0, 0.0, 0.0), 1.0);
        let before = system_under_test;

        system_under_test.include(Point::new(0.0, 0.0, 0.0), 0.1);

        assert_eq!(system_under_test, before);
        assert_eq!(system_under_test.extent(), Vector::new(22.0, 2.0, 2.0));
    }

    #[rstest]
    #[case(Point::new(0.0, 0.0, 0.0), 1.0, true)]
    #[case(Point::new(4.0, 0.0, 0.0), 1.0, true)]
    #[case(Point::new(4.5, 0.0, 0.0), 1.0, false)]
    #[case(Point::new(0.0, 0.0, 0.0), 6.0, false)]
    fn test_contains(#[case] center: Point, #[case] half_width: f32, #[case] expected: bool) {
        let system_under_test = Aabb::from_points(Point::new(-5.0, -5.0, -5.0), Point::new(5.0, 5.0, 5.0));
        assert_eq!(system_under_test.contains(center, half_width), expected);
    }

    #[test]
    fn test_union() {
        let left = Aabb::from_points(Point::new(0.0, 0.0, 0.0), Point::new(1.0, 1.0, 1.0));
        let right = Aabb::from_points(Point::new(-1.0, 2.0, 0.5), Point::new(0.5, 3.0, 0.7));

        let actual = Aabb::make_union(left, right);

        assert_eq!(actual.min(), Point::new(-1.0, 0.0, 0.0));
        assert_eq!(actual.max(), Point::new(1.0, 3.0, 1.0));
    }
}
