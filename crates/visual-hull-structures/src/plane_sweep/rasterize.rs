//! Scan-line sampling of seed silhouettes along the common line.

use glam::DVec3;
use visual_hull_core::{Axis, ScanDirection};

use crate::view::View;

/// Sweep axis shared by both seed views.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepFrame {
    /// Unit direction of the seed image planes' common line.
    pub direction: DVec3,
    pub step: f64,
}

impl SweepFrame {
    /// Normalizes `direction` and flips it so its dominant component is positive.
    pub fn new(direction: DVec3, step: f64) -> Option<Self> {
        let mut direction = direction.try_normalize()?;
        if Axis::dominant(direction).component(direction) < 0.0 {
            direction = -direction;
        }
        Some(Self { direction, step })
    }

    /// Sweep key of a world point.
    pub fn key(&self, p: DVec3) -> f64 {
        p.dot(self.direction)
    }

    /// Scan-line keys at bin centres covering `[min, max]`.
    pub fn levels(&self, min: f64, max: f64) -> Vec<f64> {
        let span = max - min;
        if !span.is_finite() || span <= 0.0 {
            return Vec::new();
        }
        let count = (span / self.step).ceil() as usize;
        (0..count)
            .map(|i| min + (i as f64 + 0.5) * self.step)
            .collect()
    }
}

/// How one view's image-plane coordinates map onto sweep keys.
#[derive(Debug, Clone, Copy)]
pub struct ViewScan<'a> {
    view: &'a View,
    direction: ScanDirection,
    /// Key change per unit of the swept image coordinate.
    scale: f64,
    /// Key of the view origin.
    offset: f64,
}

impl<'a> ViewScan<'a> {
    /// Lays out scan lines of `view` perpendicular to the sweep direction.
    ///
    /// Returns `None` when the sweep direction is parallel to neither image axis.
    pub fn new(view: &'a View, frame: &SweepFrame, epsilon: f64) -> Option<Self> {
        let d = frame.direction;
        let parallel = |axis: DVec3| axis.normalize_or_zero().cross(d).length() <= epsilon;
        let (direction, scale) = if parallel(view.vz()) {
            (ScanDirection::Horizontal, view.vz().dot(d))
        } else if parallel(view.vx()) {
            (ScanDirection::Vertical, view.vx().dot(d))
        } else {
            return None;
        };
        Some(Self {
            view,
            direction,
            scale,
            offset: view.origin().dot(d),
        })
    }

    pub fn view(&self) -> &'a View {
        self.view
    }

    pub fn direction(&self) -> ScanDirection {
        self.direction
    }

    /// Range of sweep keys covered by the silhouette.
    pub fn key_range(&self) -> (f64, f64) {
        let (min, max) = self.view.silhouette().bounds();
        let (lo, hi) = match self.direction {
            ScanDirection::Horizontal => (min.y, max.y),
            ScanDirection::Vertical => (min.x, max.x),
        };
        let a = self.offset + lo * self.scale;
        let b = self.offset + hi * self.scale;
        (a.min(b), a.max(b))
    }

    /// Inside spans of the scan line at `key`, lifted to world space.
    pub fn segments_at(&self, key: f64) -> Vec<(DVec3, DVec3)> {
        let level = (key - self.offset) / self.scale;
        self.view
            .silhouette()
            .scanline(self.direction, level)
            .into_iter()
            .map(|s| (self.view.plane_to_real(s.start), self.view.plane_to_real(s.end)))
            .collect()
    }
}
