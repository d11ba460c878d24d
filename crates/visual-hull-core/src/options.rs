//! Configuration options for reconstruction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VisualHullError};

/// Options controlling a reconstruction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconstructionOptions {
    /// Which reconstruction algorithm to run.
    pub method: Method,

    /// Spacing between plane-sweep scan lines (smaller is finer).
    pub step: f64,

    /// Voxel grid edge count (larger is finer).
    pub resolution: usize,

    /// Two sweep keys closer than this share a plane.
    pub key_precision: f64,

    /// Cross-product norm below which two directions count as parallel.
    pub parallel_epsilon: f64,

    /// Shape of the voxel carving output.
    pub voxel_surface: VoxelSurfaceMode,
}

impl Default for ReconstructionOptions {
    fn default() -> Self {
        Self {
            method: Method::VoxelCarve,
            step: 1.0,
            resolution: 64,
            key_precision: 1e-6,
            parallel_epsilon: 1e-6,
            voxel_surface: VoxelSurfaceMode::Cubes,
        }
    }
}

impl ReconstructionOptions {
    /// Options for a plane-sweep run with the given scan line spacing.
    pub fn plane_sweep(step: f64) -> Self {
        Self {
            method: Method::PlaneSweep,
            step,
            ..Self::default()
        }
    }

    /// Options for a voxel carving run with the given grid resolution.
    pub fn voxel_carve(resolution: usize) -> Self {
        Self {
            method: Method::VoxelCarve,
            resolution,
            ..Self::default()
        }
    }

    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&json)?;
        log::debug!("loaded reconstruction options from {}", path.display());
        Ok(options)
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        positive("step", self.step)?;
        positive("key_precision", self.key_precision)?;
        positive("parallel_epsilon", self.parallel_epsilon)?;
        if self.resolution < 2 {
            return Err(VisualHullError::InvalidResolution(self.resolution));
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VisualHullError::InvalidParameter { name, value })
    }
}

/// Reconstruction algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Method {
    /// Planar polygons from paired scan lines, refined by further views.
    PlaneSweep,
    /// Boolean voxel grid carved by every view.
    #[default]
    VoxelCarve,
}

/// Output shape of the voxel carver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VoxelSurfaceMode {
    /// One cube per active voxel.
    #[default]
    Cubes,
    /// Only the edges of faces between active and inactive voxels.
    BoundaryEdges,
}

/// Where a view's inputs live inside its directory, and how its image is thresholded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewSourceOptions {
    /// Camera frame metadata file name.
    pub camera_file: String,

    /// Silhouette raster file name.
    pub silhouette_file: String,

    /// Pixels with luminance at or below this value belong to the object.
    pub object_threshold: u8,
}

impl Default for ViewSourceOptions {
    fn default() -> Self {
        Self {
            camera_file: "camera.json".to_string(),
            silhouette_file: "plane.bmp".to_string(),
            object_threshold: 254,
        }
    }
}
