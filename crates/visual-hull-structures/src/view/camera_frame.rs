//! Orthographic camera frame (origin plus image-plane basis).

use glam::{DMat2, DVec2, DVec3};
use visual_hull_core::{Axis, Plane3};

/// Calibrated orthographic camera frame.
///
/// `vy` is the viewing direction; `vx` and `vz` span the image plane
/// (horizontal and vertical). Image-plane coordinates `(u, v)` map to
/// `origin + u * vx + v * vz`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    origin: DVec3,
    vx: DVec3,
    vy: DVec3,
    vz: DVec3,
    /// Rows of the pseudo-inverse of `[vx vz]`.
    inverse_basis: [DVec3; 2],
}

impl CameraFrame {
    /// Creates a frame, normalizing `vy`.
    ///
    /// Returns `None` when `vy` has zero length or `vx` and `vz` do not span a plane.
    pub fn new(origin: DVec3, vx: DVec3, vy: DVec3, vz: DVec3) -> Option<Self> {
        let vy = vy.try_normalize()?;

        // (A^T A)^-1 A^T for A = [vx vz]; tolerates slightly non-orthogonal input.
        let xz = vx.dot(vz);
        let gram = DMat2::from_cols_array(&[vx.length_squared(), xz, xz, vz.length_squared()]);
        if gram.determinant().abs() < 1e-12 {
            return None;
        }
        let inv = gram.inverse();
        let inverse_basis = [
            inv.x_axis.x * vx + inv.y_axis.x * vz,
            inv.x_axis.y * vx + inv.y_axis.y * vz,
        ];

        Some(Self {
            origin,
            vx,
            vy,
            vz,
            inverse_basis,
        })
    }

    /// Centre of the image plane in world space.
    pub fn origin(&self) -> DVec3 {
        self.origin
    }

    /// Horizontal image-plane axis.
    pub fn vx(&self) -> DVec3 {
        self.vx
    }

    /// Unit viewing direction.
    pub fn vy(&self) -> DVec3 {
        self.vy
    }

    /// Vertical image-plane axis.
    pub fn vz(&self) -> DVec3 {
        self.vz
    }

    /// Lifts image-plane coordinates to world space.
    pub fn plane_to_real(&self, uv: DVec2) -> DVec3 {
        self.origin + uv.x * self.vx + uv.y * self.vz
    }

    /// Least-squares projection of a world point onto image-plane coordinates.
    pub fn real_to_plane(&self, p: DVec3) -> DVec2 {
        let delta = p - self.origin;
        DVec2::new(
            self.inverse_basis[0].dot(delta),
            self.inverse_basis[1].dot(delta),
        )
    }

    /// The image plane: through `origin`, normal to `vy`.
    pub fn image_plane(&self) -> Plane3 {
        Plane3::new(self.origin, self.vy)
    }

    /// World axis most nearly parallel to the viewing direction.
    pub fn dominant_axis(&self) -> Axis {
        Axis::dominant(self.vy)
    }

    /// Whether `direction` is parallel to the viewing direction within `epsilon`.
    pub fn is_aligned_with(&self, direction: DVec3, epsilon: f64) -> bool {
        self.vy.cross(direction.normalize_or_zero()).length() <= epsilon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_on_plane() {
        let frame = CameraFrame::new(
            DVec3::new(0.0, -5.0, 0.0),
            DVec3::X,
            DVec3::Y,
            DVec3::Z,
        )
        .unwrap();
        let uv = DVec2::new(1.5, -2.0);
        let p = frame.plane_to_real(uv);
        assert_eq!(p, DVec3::new(1.5, -5.0, -2.0));
        assert!((frame.real_to_plane(p) - uv).length() < 1e-12);
    }

    #[test]
    fn test_projection_drops_depth() {
        let frame = CameraFrame::new(DVec3::ZERO, DVec3::Y, DVec3::X, DVec3::Z).unwrap();
        let uv = frame.real_to_plane(DVec3::new(42.0, 3.0, -1.0));
        assert!((uv - DVec2::new(3.0, -1.0)).length() < 1e-12);
    }

    #[test]
    fn test_scaled_basis() {
        let frame =
            CameraFrame::new(DVec3::ZERO, DVec3::X * 2.0, DVec3::Y * 3.0, DVec3::Z * 0.5).unwrap();
        assert_eq!(frame.vy(), DVec3::Y);
        let uv = frame.real_to_plane(DVec3::new(4.0, 7.0, 1.0));
        assert!((uv - DVec2::new(2.0, 2.0)).length() < 1e-12);
    }

    #[test]
    fn test_degenerate_frames() {
        assert!(CameraFrame::new(DVec3::ZERO, DVec3::X, DVec3::ZERO, DVec3::Z).is_none());
        assert!(CameraFrame::new(DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::X * 2.0).is_none());
    }

    #[test]
    fn test_alignment() {
        let frame = CameraFrame::new(DVec3::ZERO, DVec3::Y, -DVec3::X, DVec3::Z).unwrap();
        assert_eq!(frame.dominant_axis(), Axis::X);
        assert!(frame.is_aligned_with(DVec3::X * 4.0, 1e-9));
        assert!(!frame.is_aligned_with(DVec3::Z, 1e-9));
    }
}
