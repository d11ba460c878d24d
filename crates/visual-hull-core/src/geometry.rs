//! Stateless geometry kernel shared by both reconstruction algorithms.
//!
//! Local degeneracies (parallel lines, empty or multi-piece overlaps) are
//! reported as `None` or an empty polygon so callers can drop the offending
//! item instead of aborting a reconstruction.

use geo::{Area, BooleanOps, Coord, Intersects, LineString};
use glam::{DMat2, DVec2, DVec3};

use crate::axis::Axis;
use crate::error::{Result, VisualHullError};
use crate::plane::Line3;

/// Planar polygon in 3D: ordered vertices, closing edge implied.
pub type Polygon3 = Vec<DVec3>;

/// Determinants below this are treated as singular.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Polygons with less area than this are treated as empty.
const AREA_EPSILON: f64 = 1e-12;

/// A 2D line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub start: DVec2,
    pub end: DVec2,
}

impl Segment2 {
    pub fn new(start: DVec2, end: DVec2) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }
}

/// Orientation of scan lines in a 2D `(u, v)` frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanDirection {
    /// Lines of constant `v`, running along `u`.
    Horizontal,
    /// Lines of constant `u`, running along `v`.
    Vertical,
}

/// Intersects the lines `p1 + t*d1` and `p2 + s*d2` in the least-squares sense.
///
/// Returns the point on the first line closest to the second, or `None` when
/// the lines are parallel. Skew lines are not detected.
pub fn intersect_lines(p1: DVec3, d1: DVec3, p2: DVec3, d2: DVec3) -> Option<DVec3> {
    // Normal equations of [d1, -d2] * (t, s) = p2 - p1.
    let delta = p2 - p1;
    let d12 = d1.dot(d2);
    let normal = DMat2::from_cols_array(&[d1.length_squared(), -d12, -d12, d2.length_squared()]);
    if normal.determinant().abs() < SINGULAR_EPSILON {
        return None;
    }
    let ts = normal.inverse() * DVec2::new(d1.dot(delta), -d2.dot(delta));
    Some(p1 + ts.x * d1)
}

/// Intersection line of the planes `(n1, p1)` and `(n2, p2)`.
///
/// The returned point is found by solving the 2x2 system over the two
/// coordinates not dominant in `n1 x n2`, with the dominant one set to zero.
pub fn planes_intersection(n1: DVec3, p1: DVec3, n2: DVec3, p2: DVec3) -> Result<Line3> {
    let direction = n1.cross(n2);
    if direction.length() < SINGULAR_EPSILON {
        return Err(VisualHullError::ParallelPlanes);
    }

    let fixed = Axis::dominant(direction);
    let (a, b) = fixed.others();
    let system = DMat2::from_cols(
        DVec2::new(a.component(n1), a.component(n2)),
        DVec2::new(b.component(n1), b.component(n2)),
    );
    if system.determinant().abs() < SINGULAR_EPSILON {
        return Err(VisualHullError::ParallelPlanes);
    }
    let rhs = DVec2::new(n1.dot(p1), n2.dot(p2));
    let solved = system.inverse() * rhs;

    Ok(Line3::new(fixed.lift(solved, 0.0), direction))
}

/// Builds a `geo` polygon from an implicitly closed vertex ring.
pub fn to_geo_polygon(vertices: &[DVec2]) -> geo::Polygon<f64> {
    let ring: Vec<Coord<f64>> = vertices.iter().map(|v| Coord { x: v.x, y: v.y }).collect();
    geo::Polygon::new(LineString::from(ring), Vec::new())
}

/// Vertex ring of a `geo` polygon's exterior without the repeated closing vertex.
pub fn from_geo_polygon(polygon: &geo::Polygon<f64>) -> Vec<DVec2> {
    let mut ring: Vec<DVec2> = polygon
        .exterior()
        .coords()
        .map(|c| DVec2::new(c.x, c.y))
        .collect();
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    ring
}

/// Whether `p` lies inside or on the boundary of `polygon`.
pub fn point_in_polygon(polygon: &geo::Polygon<f64>, p: DVec2) -> bool {
    polygon.intersects(&Coord { x: p.x, y: p.y })
}

/// Intersection of two 2D polygons.
///
/// Returns `None` when the overlap is empty, has negligible area, or is not a
/// single polygon. Holes of a single-piece result are discarded.
pub fn intersect_polygons_2d(a: &geo::Polygon<f64>, b: &geo::Polygon<f64>) -> Option<Vec<DVec2>> {
    let overlap = a.intersection(b);
    let [piece] = overlap.0.as_slice() else {
        return None;
    };
    if piece.unsigned_area() < AREA_EPSILON {
        return None;
    }
    let ring = from_geo_polygon(piece);
    (ring.len() >= 3).then_some(ring)
}

/// Intersects two coplanar 3D polygons lying in a plane of constant `axis`.
///
/// Both polygons are reduced to 2D by dropping `axis`, intersected, and the
/// result is lifted back with `poly_a`'s `axis` coordinate. Returns an empty
/// polygon when there is no single-piece overlap.
pub fn intersect_coplanar_polygons(poly_a: &[DVec3], poly_b: &[DVec3], axis: Axis) -> Polygon3 {
    let Some(first) = poly_a.first() else {
        return Vec::new();
    };
    if poly_b.len() < 3 || poly_a.len() < 3 {
        return Vec::new();
    }
    let fixed = axis.component(*first);
    let flat_a: Vec<DVec2> = poly_a.iter().map(|&p| axis.drop(p)).collect();
    let flat_b: Vec<DVec2> = poly_b.iter().map(|&p| axis.drop(p)).collect();

    intersect_polygons_2d(&to_geo_polygon(&flat_a), &to_geo_polygon(&flat_b))
        .map(|ring| ring.into_iter().map(|v| axis.lift(v, fixed)).collect())
        .unwrap_or_default()
}

/// Intersects a closed polygon with one scan line.
///
/// Uses the half-open even-odd crossing rule, so a scan line that runs
/// exactly along a horizontal edge does not count that edge twice. Returns
/// the inside spans in increasing order along the line.
pub fn scanline_segments(vertices: &[DVec2], direction: ScanDirection, level: f64) -> Vec<Segment2> {
    // (across, along) coordinates of a vertex for this scan direction.
    let split = |p: DVec2| match direction {
        ScanDirection::Horizontal => (p.y, p.x),
        ScanDirection::Vertical => (p.x, p.y),
    };
    let join = |along: f64| match direction {
        ScanDirection::Horizontal => DVec2::new(along, level),
        ScanDirection::Vertical => DVec2::new(level, along),
    };

    let n = vertices.len();
    let mut crossings = Vec::new();
    for i in 0..n {
        let (a_across, a_along) = split(vertices[i]);
        let (b_across, b_along) = split(vertices[(i + 1) % n]);
        let spans = (a_across <= level && level < b_across) || (b_across <= level && level < a_across);
        if spans {
            let t = (level - a_across) / (b_across - a_across);
            crossings.push(a_along + t * (b_along - a_along));
        }
    }
    crossings.sort_by(f64::total_cmp);

    crossings
        .chunks_exact(2)
        .filter(|pair| pair[1] - pair[0] > SINGULAR_EPSILON)
        .map(|pair| Segment2::new(join(pair[0]), join(pair[1])))
        .collect()
}
