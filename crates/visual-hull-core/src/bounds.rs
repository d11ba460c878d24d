//! Axis-aligned bounding boxes.

use glam::DVec3;

use crate::axis::Axis;

/// Axis-aligned world-space box `(minX,maxX,minY,maxY,minZ,maxZ)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3 {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds3 {
    /// Creates a box from two corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<I: IntoIterator<Item = DVec3>>(points: I) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self::new(first, first);
        for p in points {
            bounds.extend(p);
        }
        Some(bounds)
    }

    /// Grows the box to contain `p`.
    pub fn extend(&mut self, p: DVec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    /// Smallest box containing both.
    #[must_use]
    pub fn union(&self, other: &Bounds3) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Edge lengths.
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// `(min, max)` along one axis.
    pub fn range(&self, axis: Axis) -> (f64, f64) {
        (axis.component(self.min), axis.component(self.max))
    }

    /// Flat `(minX, maxX, minY, maxY, minZ, maxZ)` layout.
    pub fn to_array(&self) -> [f64; 6] {
        [
            self.min.x, self.max.x, self.min.y, self.max.y, self.min.z, self.max.z,
        ]
    }

    pub fn contains(&self, p: DVec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }
}

impl std::fmt::Display for Bounds3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [x0, x1, y0, y1, z0, z1] = self.to_array();
        write!(f, "({x0}, {x1}, {y0}, {y1}, {z0}, {z1})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_points() {
        let b = Bounds3::from_points([
            DVec3::new(1.0, -2.0, 0.0),
            DVec3::new(-1.0, 2.0, 3.0),
            DVec3::new(0.0, 0.0, -3.0),
        ])
        .unwrap();
        assert_eq!(b.min, DVec3::new(-1.0, -2.0, -3.0));
        assert_eq!(b.max, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(b.range(Axis::Y), (-2.0, 2.0));
        assert!(Bounds3::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_union_and_contains() {
        let a = Bounds3::new(DVec3::ZERO, DVec3::ONE);
        let b = Bounds3::new(DVec3::splat(-1.0), DVec3::splat(0.5));
        let u = a.union(&b);
        assert_eq!(u.to_array(), [-1.0, 1.0, -1.0, 1.0, -1.0, 1.0]);
        assert!(u.contains(DVec3::splat(0.9)));
        assert!(!a.contains(DVec3::splat(-0.1)));
        assert_eq!(u.center(), DVec3::ZERO);
    }
}
