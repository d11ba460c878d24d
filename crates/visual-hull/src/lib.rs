//! visual-hull-rs: 3D reconstruction from calibrated orthographic silhouettes.
//!
//! A model is a directory of views. Each view is a camera frame (origin plus
//! image-plane basis) and a binary silhouette image. Two algorithms turn the
//! views into geometry:
//!
//! - **Plane sweep** builds planar slices from two non-parallel seed views
//!   and clips them with the remaining views. Output: [`Surface::Planes`].
//! - **Voxel carving** removes every cell of a dense grid whose projection
//!   falls outside some silhouette. Output: [`Surface::Voxels`] or
//!   [`Surface::VoxelEdges`].
//!
//! # Quick Start
//!
//! ```no_run
//! use visual_hull::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let model = Model::load("models/cube", &ViewSourceOptions::default())?;
//!     println!("{model}");
//!
//!     let surface = model.reconstruct(&ReconstructionOptions::voxel_carve(32))?;
//!     println!("{}", model.summarize(&surface));
//!
//!     Ok(())
//! }
//! ```

// Image dimensions and indices are converted between integer widths
#![allow(clippy::cast_possible_truncation)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod init;
pub mod loader;
mod model;
mod reconstructor;

pub use init::{init_logging, run};
pub use model::{model_bounds, Model};
pub use reconstructor::{Reconstructor, Surface, SurfaceStats, SurfaceSummary};

// Re-export core types
pub use visual_hull_core::{
    geometry, Axis, Bounds3, Line3, Method, Plane3, Polygon3, ReconstructionOptions, Result,
    ScanDirection, Segment2, ViewSourceOptions, VisualHullError, VoxelSurfaceMode,
};

// Re-export structures
pub use visual_hull_structures::{
    select_seed_indices, trace_contour, CameraFrame, PlaneRecord, PlaneSweep, SeedPartition,
    Silhouette, SilhouetteMask, SweepBuckets, SweepStage, View, VoxelCarver, VoxelCubes,
    VoxelGrid,
};

pub use glam::{DVec2, DVec3};
