//! World coordinate axes.

use glam::{DVec2, DVec3};

/// One of the three world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the axis most nearly parallel to `v` (largest absolute component).
    ///
    /// Ties resolve to the earlier axis.
    pub fn dominant(v: DVec3) -> Self {
        let a = v.abs();
        if a.x >= a.y && a.x >= a.z {
            Axis::X
        } else if a.y >= a.z {
            Axis::Y
        } else {
            Axis::Z
        }
    }

    /// Index of the axis (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector along the axis.
    pub fn unit(self) -> DVec3 {
        match self {
            Axis::X => DVec3::X,
            Axis::Y => DVec3::Y,
            Axis::Z => DVec3::Z,
        }
    }

    /// The two remaining axes, in increasing order.
    pub fn others(self) -> (Axis, Axis) {
        match self {
            Axis::X => (Axis::Y, Axis::Z),
            Axis::Y => (Axis::X, Axis::Z),
            Axis::Z => (Axis::X, Axis::Y),
        }
    }

    /// Component of `v` along this axis.
    pub fn component(self, v: DVec3) -> f64 {
        v[self.index()]
    }

    /// Drops this axis' coordinate, keeping the others in increasing order.
    pub fn drop(self, v: DVec3) -> DVec2 {
        let (a, b) = self.others();
        DVec2::new(a.component(v), b.component(v))
    }

    /// Inverse of [`Axis::drop`]: reinserts `fixed` as this axis' coordinate.
    pub fn lift(self, v: DVec2, fixed: f64) -> DVec3 {
        match self {
            Axis::X => DVec3::new(fixed, v.x, v.y),
            Axis::Y => DVec3::new(v.x, fixed, v.y),
            Axis::Z => DVec3::new(v.x, v.y, fixed),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}
