//! Plane-sweep reconstruction from rasterized silhouette bands.
//!
//! Two non-parallel seed views are swept with scan lines perpendicular to
//! the common line of their image planes. Each scan line yields inside
//! spans in both views; pairing one span from each view and intersecting
//! the viewing rays through their endpoints gives a quadrilateral slice of
//! the visual hull. The slices are then clipped by every remaining view
//! that looks straight down their normal.

mod buckets;
mod rasterize;

pub use buckets::SweepBuckets;
pub use rasterize::{SweepFrame, ViewScan};

use std::mem;

use glam::DVec3;
use visual_hull_core::geometry::{intersect_coplanar_polygons, intersect_lines, planes_intersection};
use visual_hull_core::{
    Axis, Plane3, Polygon3, ReconstructionOptions, Result, VisualHullError,
};

use crate::view::View;

/// Progress of a [`PlaneSweep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepStage {
    /// No seed pair has been consumed.
    #[default]
    Init,
    /// Seed quads built from the first two distinguishing views.
    Seeded,
    /// Remaining views are being applied.
    Refining,
    Done,
}

/// One slice of the reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneRecord {
    /// Sweep key the slice was bucketed under.
    pub key: f64,
    pub plane: Plane3,
    /// Planar polygons lying in `plane`; empty once refinement removed them all.
    pub polygons: Vec<Polygon3>,
}

impl PlaneRecord {
    pub fn new(key: f64, point: DVec3, normal: DVec3) -> Self {
        Self {
            key,
            plane: Plane3::new(point, normal),
            polygons: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn vertex_count(&self) -> usize {
        self.polygons.iter().map(Vec::len).sum()
    }
}

/// Views split into the seed pair and the views left for refinement.
#[derive(Debug, Clone)]
pub struct SeedPartition {
    pub first: View,
    pub second: View,
    pub remaining: Vec<View>,
}

impl SeedPartition {
    /// Moves the seed pair out of `views`, keeping the others in order.
    pub fn split(views: Vec<View>, epsilon: f64) -> Result<Self> {
        let (a, b) = select_seed_indices(&views, epsilon)?;
        let mut first = None;
        let mut second = None;
        let mut remaining = Vec::with_capacity(views.len().saturating_sub(2));
        for (index, view) in views.into_iter().enumerate() {
            if index == a {
                first = Some(view);
            } else if index == b {
                second = Some(view);
            } else {
                remaining.push(view);
            }
        }
        match (first, second) {
            (Some(first), Some(second)) => Ok(Self {
                first,
                second,
                remaining,
            }),
            _ => Err(VisualHullError::NoDistinguishingViewPair),
        }
    }
}

/// Indices of the first view and the first later view not parallel to it.
pub fn select_seed_indices(views: &[View], epsilon: f64) -> Result<(usize, usize)> {
    let first = views.first().ok_or(VisualHullError::NoDistinguishingViewPair)?;
    views
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, view)| first.vy().cross(view.vy()).length() > epsilon)
        .map(|(index, _)| (0, index))
        .ok_or(VisualHullError::NoDistinguishingViewPair)
}

/// Spans found at one sweep key, per seed view.
#[derive(Debug, Default)]
struct Slice {
    record: Option<PlaneRecord>,
    first: Vec<(DVec3, DVec3)>,
    second: Vec<(DVec3, DVec3)>,
}

/// Plane-sweep reconstructor.
#[derive(Debug, Clone)]
pub struct PlaneSweep {
    step: f64,
    key_precision: f64,
    parallel_epsilon: f64,
    stage: SweepStage,
    planes: SweepBuckets<PlaneRecord>,
    remaining: Vec<View>,
}

impl PlaneSweep {
    pub fn new(step: f64, key_precision: f64, parallel_epsilon: f64) -> Result<Self> {
        for (name, value) in [
            ("step", step),
            ("key_precision", key_precision),
            ("parallel_epsilon", parallel_epsilon),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(VisualHullError::InvalidParameter { name, value });
            }
        }
        Ok(Self {
            step,
            key_precision,
            parallel_epsilon,
            stage: SweepStage::Init,
            planes: SweepBuckets::new(key_precision),
            remaining: Vec::new(),
        })
    }

    pub fn from_options(options: &ReconstructionOptions) -> Result<Self> {
        Self::new(options.step, options.key_precision, options.parallel_epsilon)
    }

    pub fn stage(&self) -> SweepStage {
        self.stage
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Slices in increasing key order.
    pub fn planes(&self) -> impl Iterator<Item = &PlaneRecord> {
        self.planes.values()
    }

    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Slice bucketed under `key`, within the key precision.
    pub fn plane_at(&self, key: f64) -> Option<&PlaneRecord> {
        self.planes.get(key).map(|(_, record)| record)
    }

    /// Views not consumed as seeds.
    pub fn remaining_views(&self) -> &[View] {
        &self.remaining
    }

    /// Seeds the slice map from the first distinguishing view pair.
    ///
    /// Without such a pair the sweep stays at [`SweepStage::Init`] with no
    /// slices; that is a valid, empty reconstruction.
    pub fn initial_reconstruct(&mut self, views: Vec<View>) -> Result<()> {
        self.planes = SweepBuckets::new(self.key_precision);
        self.remaining.clear();
        self.stage = SweepStage::Init;

        let seeds = match SeedPartition::split(views, self.parallel_epsilon) {
            Ok(seeds) => seeds,
            Err(VisualHullError::NoDistinguishingViewPair) => {
                log::warn!("no pair of non-parallel views, plane sweep result is empty");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        log::info!(
            "using '{}' and '{}' for initial reconstruction",
            seeds.first.name(),
            seeds.second.name()
        );

        let common = match planes_intersection(
            seeds.first.vy(),
            seeds.first.origin(),
            seeds.second.vy(),
            seeds.second.origin(),
        ) {
            Ok(line) => line,
            Err(VisualHullError::ParallelPlanes) => {
                log::warn!("seed image planes are parallel, plane sweep result is empty");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if let Some(frame) = SweepFrame::new(common.direction, self.step) {
            self.planes = self.seed_planes(&seeds.first, &seeds.second, &frame);
        }
        log::debug!("seeded {} slices", self.planes.len());

        self.remaining = seeds.remaining;
        self.stage = SweepStage::Seeded;
        Ok(())
    }

    fn seed_planes(&self, first: &View, second: &View, frame: &SweepFrame) -> SweepBuckets<PlaneRecord> {
        let (Some(scan_a), Some(scan_b)) = (
            ViewScan::new(first, frame, self.parallel_epsilon),
            ViewScan::new(second, frame, self.parallel_epsilon),
        ) else {
            log::warn!(
                "common line {} is not along an image axis of both seed views",
                frame.direction
            );
            return SweepBuckets::new(self.key_precision);
        };

        let (min_a, max_a) = scan_a.key_range();
        let (min_b, max_b) = scan_b.key_range();
        let levels = frame.levels(min_a.min(min_b), max_a.max(max_b));

        let mut slices: SweepBuckets<Slice> = SweepBuckets::new(self.key_precision);
        for &level in &levels {
            for (scan, from_first) in [(&scan_a, true), (&scan_b, false)] {
                // Both views share the scan level, so it is the key; lifted
                // endpoints drift off it when a frame is not exactly orthonormal.
                for segment in scan.segments_at(level) {
                    let slice = slices.get_or_insert_with(level, Slice::default);
                    slice
                        .record
                        .get_or_insert_with(|| PlaneRecord::new(level, segment.0, frame.direction));
                    if from_first {
                        slice.first.push(segment);
                    } else {
                        slice.second.push(segment);
                    }
                }
            }
        }

        let (ray_a, ray_b) = (first.vy(), second.vy());
        slices.map(|key, slice| {
            let mut record = slice
                .record
                .unwrap_or_else(|| PlaneRecord::new(key, frame.direction * key, frame.direction));
            for &(src_a, dst_a) in &slice.first {
                for &(src_b, dst_b) in &slice.second {
                    let corners = [
                        intersect_lines(src_a, ray_a, src_b, ray_b),
                        intersect_lines(src_a, ray_a, dst_b, ray_b),
                        intersect_lines(dst_a, ray_a, dst_b, ray_b),
                        intersect_lines(dst_a, ray_a, src_b, ray_b),
                    ];
                    if let [Some(a), Some(b), Some(c), Some(d)] = corners {
                        record.polygons.push(vec![a, b, c, d]);
                    }
                }
            }
            record
        })
    }

    /// Clips every slice by each remaining view in turn.
    pub fn refine(&mut self) {
        if self.stage == SweepStage::Init {
            return;
        }
        self.stage = SweepStage::Refining;
        let views = mem::take(&mut self.remaining);
        for view in &views {
            log::info!("using '{}' to refine", view.name());
            self.refine_with(view);
        }
        self.remaining = views;
        self.stage = SweepStage::Done;
    }

    /// Clips the slices whose normal `view` looks along; returns how many were clipped.
    ///
    /// Polygons left without overlap are dropped. Slices the view is not
    /// aligned with, and slices whose normal is not along a world axis, are
    /// left untouched.
    pub fn refine_with(&mut self, view: &View) -> usize {
        let outline = view.silhouette_3d();
        let mut clipped = 0;
        for record in self.planes.values_mut() {
            let normal = record.plane.normal;
            if !view.frame().is_aligned_with(normal, self.parallel_epsilon) {
                log::debug!(
                    "view '{}' is not aligned with slice {}, skipping",
                    view.name(),
                    record.key
                );
                continue;
            }
            let axis = Axis::dominant(normal);
            if axis.unit().cross(normal).length() > self.parallel_epsilon {
                log::debug!(
                    "slice {} has oblique normal {normal}, skipping '{}'",
                    record.key,
                    view.name()
                );
                continue;
            }
            let projected: Polygon3 = outline.iter().map(|&p| record.plane.project(p)).collect();
            let before = record.polygons.len();
            record.polygons = mem::take(&mut record.polygons)
                .into_iter()
                .map(|polygon| intersect_coplanar_polygons(&polygon, &projected, axis))
                .filter(|polygon| !polygon.is_empty())
                .collect();
            if record.polygons.len() < before {
                log::debug!(
                    "slice {} dropped {} polygons",
                    record.key,
                    before - record.polygons.len()
                );
            }
            clipped += 1;
        }
        clipped
    }

    /// Slices in increasing key order, including emptied ones.
    pub fn extract_surface(&self) -> Vec<PlaneRecord> {
        self.planes.values().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn square(half: f64) -> Vec<DVec2> {
        vec![
            DVec2::new(-half, -half),
            DVec2::new(half, -half),
            DVec2::new(half, half),
            DVec2::new(-half, half),
        ]
    }

    fn view(name: &str, vx: DVec3, vy: DVec3, vz: DVec3) -> View {
        View::from_vectors(name, DVec3::ZERO, vx, vy, vz, square(1.0)).unwrap()
    }

    fn cube_views() -> Vec<View> {
        vec![
            view("side", DVec3::Y, DVec3::X, DVec3::Z),
            view("side-again", -DVec3::Y, -DVec3::X, DVec3::Z),
            view("front", DVec3::X, DVec3::Y, DVec3::Z),
            view("top", DVec3::X, DVec3::Z, DVec3::Y),
        ]
    }

    #[test]
    fn test_seed_selection_skips_parallel() {
        let views = cube_views();
        assert_eq!(select_seed_indices(&views, 1e-6).unwrap(), (0, 2));

        let seeds = SeedPartition::split(views, 1e-6).unwrap();
        assert_eq!(seeds.first.name(), "side");
        assert_eq!(seeds.second.name(), "front");
        let names: Vec<&str> = seeds.remaining.iter().map(View::name).collect();
        assert_eq!(names, vec!["side-again", "top"]);
    }

    #[test]
    fn test_seed_selection_without_pair() {
        assert!(matches!(
            select_seed_indices(&[], 1e-6),
            Err(VisualHullError::NoDistinguishingViewPair)
        ));
        let views = vec![view("a", DVec3::Y, DVec3::X, DVec3::Z)];
        assert!(matches!(
            SeedPartition::split(views, 1e-6),
            Err(VisualHullError::NoDistinguishingViewPair)
        ));
    }

    #[test]
    fn test_seeded_quads() {
        let mut sweep = PlaneSweep::new(1.0, 1e-6, 1e-6).unwrap();
        sweep.initial_reconstruct(cube_views()).unwrap();
        assert_eq!(sweep.stage(), SweepStage::Seeded);
        assert_eq!(sweep.plane_count(), 2);
        assert_eq!(sweep.remaining_views().len(), 2);

        let keys: Vec<f64> = sweep.planes().map(|p| p.key).collect();
        assert_eq!(keys, vec![-0.5, 0.5]);
        let upper = sweep.plane_at(0.5).unwrap();
        assert_eq!(upper.plane.normal, DVec3::Z);
        assert_eq!(upper.polygons.len(), 1);
        for corner in &upper.polygons[0] {
            assert!((corner.x.abs() - 1.0).abs() < 1e-9);
            assert!((corner.y.abs() - 1.0).abs() < 1e-9);
            assert!((corner.z - 0.5).abs() < 1e-9);
        }
    }

    #[test]
    fn test_refine_reaches_done() {
        let mut sweep = PlaneSweep::new(0.5, 1e-6, 1e-6).unwrap();
        sweep.initial_reconstruct(cube_views()).unwrap();
        sweep.refine();
        assert_eq!(sweep.stage(), SweepStage::Done);
        assert_eq!(sweep.plane_count(), 4);
        assert!(sweep.planes().all(|p| p.polygons.len() == 1));
    }

    #[test]
    fn test_refine_clips_to_smaller_silhouette() {
        let mut sweep = PlaneSweep::new(1.0, 1e-6, 1e-6).unwrap();
        sweep.initial_reconstruct(cube_views()[..3].to_vec()).unwrap();
        let top = View::from_vectors("top", DVec3::ZERO, DVec3::X, DVec3::Z, DVec3::Y, square(0.5)).unwrap();
        assert_eq!(sweep.refine_with(&top), 2);
        let area: f64 = sweep
            .planes()
            .flat_map(|p| p.polygons.iter())
            .map(|poly| {
                let flat: Vec<DVec2> = poly.iter().map(|&p| Axis::Z.drop(p)).collect();
                geo::Area::unsigned_area(&visual_hull_core::geometry::to_geo_polygon(&flat))
            })
            .sum();
        assert!((area - 2.0).abs() < 1e-9);

        let far = View::from_vectors(
            "far",
            DVec3::new(10.0, 0.0, 0.0),
            DVec3::X,
            DVec3::Z,
            DVec3::Y,
            square(0.5),
        )
        .unwrap();
        sweep.refine_with(&far);
        assert!(sweep.planes().all(PlaneRecord::is_empty));
        assert_eq!(sweep.plane_count(), 2);
    }

    #[test]
    fn test_parallel_view_leaves_slices_unchanged() {
        let mut sweep = PlaneSweep::new(1.0, 1e-6, 1e-6).unwrap();
        sweep.initial_reconstruct(cube_views()[..3].to_vec()).unwrap();
        let before = sweep.extract_surface();
        let tilted = View::from_vectors(
            "tilted",
            DVec3::ZERO,
            DVec3::X,
            DVec3::new(0.0, 1.0, 1.0),
            DVec3::new(0.0, -1.0, 1.0),
            square(0.1),
        )
        .unwrap();
        assert_eq!(sweep.refine_with(&tilted), 0);
        assert_eq!(sweep.extract_surface(), before);
    }

    #[test]
    fn test_slightly_skewed_frame_still_pairs() {
        let wide = |name: &str, vx: DVec3, vy: DVec3| View::from_vectors(name, DVec3::ZERO, vx, vy, DVec3::Z, square(300.0)).unwrap();
        for tilt in [0.0, 1e-8, 1e-7] {
            let views = vec![
                wide("side", DVec3::new(0.0, 1.0, tilt), DVec3::X),
                wide("front", DVec3::X, DVec3::Y),
            ];
            let mut sweep = PlaneSweep::new(10.0, 1e-6, 1e-6).unwrap();
            sweep.initial_reconstruct(views).unwrap();
            assert_eq!(sweep.plane_count(), 60, "tilt {tilt}");
            assert!(sweep.planes().all(|p| p.polygons.len() == 1), "tilt {tilt}");
        }
    }

    #[test]
    fn test_oblique_slices_are_not_refined() {
        let d = DVec3::new(1.0, 1.0, 0.0).normalize();
        let e = DVec3::new(1.0, -1.0, 0.0).normalize();
        let views = vec![
            view("down", e, DVec3::Z, d),
            view("diagonal", DVec3::Z, e, d),
        ];
        let mut sweep = PlaneSweep::new(0.5, 1e-6, 1e-6).unwrap();
        sweep.initial_reconstruct(views).unwrap();
        assert!(sweep.plane_count() > 0);
        assert!(sweep.planes().all(|p| p.polygons.len() == 1));
        let before = sweep.extract_surface();

        let along = View::from_vectors("along", DVec3::ZERO, DVec3::Z, d, e, square(0.2)).unwrap();
        assert_eq!(sweep.refine_with(&along), 0);
        assert_eq!(sweep.extract_surface(), before);
    }

    #[test]
    fn test_single_view_is_empty() {
        let mut sweep = PlaneSweep::new(1.0, 1e-6, 1e-6).unwrap();
        sweep
            .initial_reconstruct(vec![view("only", DVec3::Y, DVec3::X, DVec3::Z)])
            .unwrap();
        sweep.refine();
        assert_eq!(sweep.stage(), SweepStage::Init);
        assert_eq!(sweep.plane_count(), 0);
        assert!(sweep.extract_surface().is_empty());
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(matches!(
            PlaneSweep::new(0.0, 1e-6, 1e-6),
            Err(VisualHullError::InvalidParameter { name: "step", .. })
        ));
        assert!(matches!(
            PlaneSweep::new(1.0, f64::NAN, 1e-6),
            Err(VisualHullError::InvalidParameter { name: "key_precision", .. })
        ));
    }
}
