//! Calibrated orthographic silhouette views.

mod camera_frame;
mod silhouette;

pub use camera_frame::CameraFrame;
pub use silhouette::Silhouette;

use glam::{DVec2, DVec3};
use rayon::prelude::*;
use visual_hull_core::{Axis, Plane3, Result, VisualHullError};

use crate::contour::{trace_contour, SilhouetteMask};

/// One silhouette observation: a camera frame plus the object's outline.
///
/// Views are immutable once built.
#[derive(Debug, Clone)]
pub struct View {
    name: String,
    frame: CameraFrame,
    silhouette: Silhouette,
}

impl View {
    /// Creates a view from a frame and an outline given in `(u, v)` coordinates.
    pub fn new(name: impl Into<String>, frame: CameraFrame, outline: Vec<DVec2>) -> Result<Self> {
        let name = name.into();
        let vertices = outline.len();
        let silhouette =
            Silhouette::new(outline).ok_or(VisualHullError::DegenerateSilhouette {
                view: name.clone(),
                vertices,
            })?;
        Ok(Self {
            name,
            frame,
            silhouette,
        })
    }

    /// Creates a view from raw frame vectors.
    pub fn from_vectors(
        name: impl Into<String>,
        origin: DVec3,
        vx: DVec3,
        vy: DVec3,
        vz: DVec3,
        outline: Vec<DVec2>,
    ) -> Result<Self> {
        let name = name.into();
        let frame = CameraFrame::new(origin, vx, vy, vz)
            .ok_or_else(|| VisualHullError::DegenerateCameraFrame { view: name.clone() })?;
        Self::new(name, frame, outline)
    }

    /// Creates a view by tracing the outline of a binary silhouette raster.
    pub fn from_mask(
        name: impl Into<String>,
        frame: CameraFrame,
        mask: &SilhouetteMask,
    ) -> Result<Self> {
        let outline = trace_contour(mask).unwrap_or_default();
        Self::new(name, frame, outline)
    }

    /// Source name of the view.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self) -> &CameraFrame {
        &self.frame
    }

    pub fn silhouette(&self) -> &Silhouette {
        &self.silhouette
    }

    pub fn origin(&self) -> DVec3 {
        self.frame.origin()
    }

    pub fn vx(&self) -> DVec3 {
        self.frame.vx()
    }

    /// Unit viewing direction.
    pub fn vy(&self) -> DVec3 {
        self.frame.vy()
    }

    pub fn vz(&self) -> DVec3 {
        self.frame.vz()
    }

    /// `origin + u * vx + v * vz`.
    pub fn plane_to_real(&self, uv: DVec2) -> DVec3 {
        self.frame.plane_to_real(uv)
    }

    /// Least-squares `(u, v)` of a world point.
    pub fn real_to_plane(&self, p: DVec3) -> DVec2 {
        self.frame.real_to_plane(p)
    }

    /// Silhouette containment of image-plane coordinates, boundary included.
    pub fn is_inside(&self, uv: DVec2) -> bool {
        self.silhouette.contains(uv)
    }

    /// [`View::real_to_plane`] over many points, evaluated in parallel.
    pub fn real_to_plane_batch(&self, points: &[DVec3]) -> Vec<DVec2> {
        points.par_iter().map(|&p| self.real_to_plane(p)).collect()
    }

    /// [`View::is_inside`] over many points, evaluated in parallel.
    pub fn is_inside_batch(&self, points: &[DVec2]) -> Vec<bool> {
        self.silhouette.contains_batch(points)
    }

    /// Projects world points and tests each against the silhouette.
    pub fn project_inside_batch(&self, points: &[DVec3]) -> Vec<bool> {
        points
            .par_iter()
            .map(|&p| self.is_inside(self.real_to_plane(p)))
            .collect()
    }

    /// The outline lifted into world space.
    pub fn silhouette_3d(&self) -> Vec<DVec3> {
        self.silhouette
            .vertices()
            .iter()
            .map(|&uv| self.plane_to_real(uv))
            .collect()
    }

    /// Corners of the outline's bounding rectangle in world space.
    pub fn footprint_corners(&self) -> [DVec3; 4] {
        self.silhouette
            .bounding_corners()
            .map(|uv| self.plane_to_real(uv))
    }

    /// Plane through the origin, normal to the viewing direction.
    pub fn image_plane(&self) -> Plane3 {
        self.frame.image_plane()
    }

    /// World axis most nearly parallel to the viewing direction.
    pub fn view_axis(&self) -> Axis {
        self.frame.dominant_axis()
    }
}
