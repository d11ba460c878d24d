//! The model: loaded views plus their aggregate bounds.

use std::fmt;
use std::path::Path;

use visual_hull_core::{
    Axis, Bounds3, ReconstructionOptions, Result, ViewSourceOptions, VisualHullError,
};
use visual_hull_structures::View;

use crate::loader;
use crate::reconstructor::{Reconstructor, Surface, SurfaceSummary};

/// A set of views of one object.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    views: Vec<View>,
    bounds: Bounds3,
}

impl Model {
    /// Creates a model from already built views.
    pub fn new(name: impl Into<String>, views: Vec<View>) -> Result<Self> {
        let name = name.into();
        let bounds = model_bounds(&views).ok_or_else(|| VisualHullError::MissingInputData {
            view: name.clone(),
            what: "views".to_string(),
        })?;
        Ok(Self {
            name,
            views,
            bounds,
        })
    }

    /// Loads every view directory under `path`.
    pub fn load(path: impl AsRef<Path>, options: &ViewSourceOptions) -> Result<Self> {
        let path = path.as_ref();
        let views = loader::load_views(path, options)?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::new(name, views)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// World-space box enclosing every view's silhouette footprint.
    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    /// Runs the configured algorithm to completion.
    ///
    /// The model's views are left untouched; the reconstructor works on a copy.
    pub fn reconstruct(&self, options: &ReconstructionOptions) -> Result<Surface> {
        let mut reconstructor = Reconstructor::from_options(options)?;
        log::info!("starting {:?} reconstruction of '{}'", reconstructor.method(), self.name);
        reconstructor.initial_reconstruct(self.views.clone(), self.bounds)?;
        log::info!("refining model");
        reconstructor.refine();
        let surface = reconstructor.extract_surface();
        log::info!("reconstruction finished: {}", self.summarize(&surface));
        Ok(surface)
    }

    /// Counts of `surface` alongside this model's bounds.
    pub fn summarize(&self, surface: &Surface) -> SurfaceSummary {
        surface.summary(self.bounds)
    }
}

/// Union of the view footprints in world axes.
///
/// A view only bounds the axes spanning its image plane; it says nothing
/// about depth along its own viewing axis. Axes no view spans fall back to
/// the extent of all footprint corners.
pub fn model_bounds(views: &[View]) -> Option<Bounds3> {
    let mut fallback: Option<Bounds3> = None;
    let mut ranges: [Option<(f64, f64)>; 3] = [None; 3];

    for view in views {
        let corners = view.footprint_corners();
        let skipped = view.view_axis();
        for corner in corners {
            match fallback.as_mut() {
                Some(b) => b.extend(corner),
                None => fallback = Some(Bounds3::new(corner, corner)),
            }
            for axis in Axis::ALL.into_iter().filter(|&a| a != skipped) {
                let value = axis.component(corner);
                let range = &mut ranges[axis.index()];
                *range = Some(match *range {
                    Some((lo, hi)) => (lo.min(value), hi.max(value)),
                    None => (value, value),
                });
            }
        }
    }

    let mut bounds = fallback?;
    for axis in Axis::ALL {
        if let Some((lo, hi)) = ranges[axis.index()] {
            bounds.min[axis.index()] = lo;
            bounds.max[axis.index()] = hi;
        }
    }
    Some(bounds)
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model '{}' ({} views)", self.name, self.views.len())?;
        writeln!(f, "Bounds: {}", self.bounds)?;
        writeln!(
            f,
            "{:<16} {:<28} {:<28} {:<28} {:<28}",
            "view", "origin", "vx", "vy", "vz"
        )?;
        for view in &self.views {
            writeln!(
                f,
                "{:<16} {:<28} {:<28} {:<28} {:<28}",
                view.name(),
                view.origin().to_string(),
                view.vx().to_string(),
                view.vy().to_string(),
                view.vz().to_string()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec2, DVec3};

    fn rect_view(name: &str, vx: DVec3, vy: DVec3, vz: DVec3, half: DVec2) -> View {
        View::from_vectors(
            name,
            DVec3::ZERO,
            vx,
            vy,
            vz,
            vec![
                DVec2::new(-half.x, -half.y),
                DVec2::new(half.x, -half.y),
                DVec2::new(half.x, half.y),
                DVec2::new(-half.x, half.y),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_bounds_from_orthogonal_views() {
        let views = vec![
            rect_view("front", DVec3::X, DVec3::Y, DVec3::Z, DVec2::new(2.0, 1.0)),
            rect_view("top", DVec3::X, DVec3::Z, DVec3::Y, DVec2::new(1.5, 3.0)),
        ];
        let bounds = model_bounds(&views).unwrap();
        assert_eq!(bounds.to_array(), [-2.0, 2.0, -3.0, 3.0, -1.0, 1.0]);
    }

    #[test]
    fn test_bounds_fall_back_for_unspanned_axis() {
        let views = vec![rect_view("front", DVec3::X, DVec3::Y, DVec3::Z, DVec2::new(2.0, 1.0))];
        let bounds = model_bounds(&views).unwrap();
        assert_eq!(bounds.to_array(), [-2.0, 2.0, 0.0, 0.0, -1.0, 1.0]);
        assert!(model_bounds(&[]).is_none());
    }

    #[test]
    fn test_model_requires_views() {
        assert!(matches!(
            Model::new("empty", Vec::new()),
            Err(VisualHullError::MissingInputData { .. })
        ));
    }

    #[test]
    fn test_display_lists_views() {
        let model = Model::new(
            "cube",
            vec![rect_view("front", DVec3::X, DVec3::Y, DVec3::Z, DVec2::ONE)],
        )
        .unwrap();
        let text = model.to_string();
        assert!(text.starts_with("Model 'cube' (1 views)"));
        assert!(text.contains("front"));
        assert!(text.contains("Bounds: (-1, 1, 0, 0, -1, 1)"));
    }
}
