//! Core types for visual-hull-rs.
//!
//! This crate provides the pieces shared by every reconstruction algorithm:
//! - [`VisualHullError`] and the crate-wide [`Result`]
//! - [`ReconstructionOptions`] and [`ViewSourceOptions`] configuration
//! - [`Axis`], [`Bounds3`], [`Plane3`] and [`Line3`] primitives
//! - the stateless [`geometry`] kernel (line/plane intersection, coplanar
//!   polygon intersection, point containment, scan-line clipping)

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel and voxel indices are converted to world coordinates throughout
#![allow(clippy::cast_precision_loss)]

pub mod axis;
pub mod bounds;
pub mod error;
pub mod geometry;
pub mod options;
pub mod plane;

pub use axis::Axis;
pub use bounds::Bounds3;
pub use error::{Result, VisualHullError};
pub use geometry::{Polygon3, ScanDirection, Segment2};
pub use options::{Method, ReconstructionOptions, ViewSourceOptions, VoxelSurfaceMode};
pub use plane::{Line3, Plane3};

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3};
