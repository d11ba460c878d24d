//! Silhouette outline in a view's image plane.

use geo::Area;
use glam::DVec2;
use rayon::prelude::*;
use visual_hull_core::geometry::{point_in_polygon, scanline_segments, to_geo_polygon};
use visual_hull_core::{ScanDirection, Segment2};

/// A simple closed polygon in `(u, v)` image-plane coordinates.
#[derive(Debug, Clone)]
pub struct Silhouette {
    vertices: Vec<DVec2>,
    polygon: geo::Polygon<f64>,
    min: DVec2,
    max: DVec2,
}

impl Silhouette {
    /// Creates a silhouette from an implicitly closed vertex ring.
    ///
    /// Returns `None` for fewer than 3 vertices or zero area.
    pub fn new(vertices: Vec<DVec2>) -> Option<Self> {
        if vertices.len() < 3 {
            return None;
        }
        let polygon = to_geo_polygon(&vertices);
        if polygon.unsigned_area() <= f64::EPSILON {
            return None;
        }
        let (min, max) = vertices.iter().fold(
            (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        );
        Some(Self {
            vertices,
            polygon,
            min,
            max,
        })
    }

    /// Outline vertices in order.
    pub fn vertices(&self) -> &[DVec2] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Bounding rectangle as `(min, max)` corners.
    pub fn bounds(&self) -> (DVec2, DVec2) {
        (self.min, self.max)
    }

    /// The four bounding rectangle corners, counter-clockwise from `min`.
    pub fn bounding_corners(&self) -> [DVec2; 4] {
        [
            self.min,
            DVec2::new(self.max.x, self.min.y),
            self.max,
            DVec2::new(self.min.x, self.max.y),
        ]
    }

    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    /// Whether `uv` lies inside or on the outline.
    pub fn contains(&self, uv: DVec2) -> bool {
        point_in_polygon(&self.polygon, uv)
    }

    /// [`Silhouette::contains`] over many points, evaluated in parallel.
    pub fn contains_batch(&self, points: &[DVec2]) -> Vec<bool> {
        points.par_iter().map(|&uv| self.contains(uv)).collect()
    }

    /// Inside spans of one scan line.
    pub fn scanline(&self, direction: ScanDirection, level: f64) -> Vec<Segment2> {
        scanline_segments(&self.vertices, direction, level)
    }
}
