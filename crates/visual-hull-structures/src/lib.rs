//! Reconstruction structures for visual-hull-rs.
//!
//! This crate provides the views and the two reconstruction algorithms:
//! - Calibrated silhouette views and contour tracing
//! - Plane-sweep reconstruction (polygonal slices)
//! - Voxel carving (dense boolean grid)

// Pixel, voxel and lattice indices are converted to world coordinates throughout
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod contour;
pub mod plane_sweep;
pub mod view;
pub mod voxel_grid;

pub use contour::{trace_contour, SilhouetteMask};
pub use plane_sweep::{
    select_seed_indices, PlaneRecord, PlaneSweep, SeedPartition, SweepBuckets, SweepFrame,
    SweepStage, ViewScan,
};
pub use view::{CameraFrame, Silhouette, View};
pub use voxel_grid::{VoxelCarver, VoxelCubes, VoxelGrid};
