//! Infinite planes and lines in 3D.

use glam::DVec3;

/// A plane defined by a point on it and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane3 {
    /// A point on the plane.
    pub point: DVec3,
    /// Unit normal of the plane.
    pub normal: DVec3,
}

impl Plane3 {
    /// Creates a plane through `point` with the given normal (normalized here).
    pub fn new(point: DVec3, normal: DVec3) -> Self {
        Self {
            point,
            normal: normal.normalize(),
        }
    }

    /// Signed distance from `p` to the plane, positive on the normal side.
    pub fn signed_distance(&self, p: DVec3) -> f64 {
        (p - self.point).dot(self.normal)
    }

    /// Orthogonal projection of `p` onto the plane.
    pub fn project(&self, p: DVec3) -> DVec3 {
        p - self.signed_distance(p) * self.normal
    }

    /// Whether `p` lies on the plane within `tolerance`.
    pub fn contains(&self, p: DVec3, tolerance: f64) -> bool {
        self.signed_distance(p).abs() < tolerance
    }
}

/// An infinite line `point + t * direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3 {
    pub point: DVec3,
    pub direction: DVec3,
}

impl Line3 {
    pub fn new(point: DVec3, direction: DVec3) -> Self {
        Self { point, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f64) -> DVec3 {
        self.point + t * self.direction
    }

    /// Closest point on the line to `p`.
    pub fn closest_point(&self, p: DVec3) -> DVec3 {
        let t = (p - self.point).dot(self.direction) / self.direction.length_squared();
        self.at(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_distance() {
        let plane = Plane3::new(DVec3::ZERO, DVec3::new(0.0, 2.0, 0.0));
        assert_eq!(plane.normal, DVec3::Y);
        assert!(plane.signed_distance(DVec3::new(0.0, 1.0, 0.0)) > 0.0);
        assert!(plane.signed_distance(DVec3::new(0.0, -1.0, 0.0)) < 0.0);
        assert!(plane.signed_distance(DVec3::new(1.0, 0.0, 1.0)).abs() < 1e-12);
    }

    #[test]
    fn test_project() {
        let plane = Plane3::new(DVec3::new(0.0, 0.0, 2.0), DVec3::Z);
        let projected = plane.project(DVec3::new(1.0, 5.0, -7.0));
        assert!((projected - DVec3::new(1.0, 5.0, 2.0)).length() < 1e-12);
        assert!(plane.contains(projected, 1e-9));
    }

    #[test]
    fn test_line_closest_point() {
        let line = Line3::new(DVec3::new(0.0, 1.0, 0.0), DVec3::new(2.0, 0.0, 0.0));
        let closest = line.closest_point(DVec3::new(3.0, 4.0, 5.0));
        assert!((closest - DVec3::new(3.0, 1.0, 0.0)).length() < 1e-12);
    }
}
