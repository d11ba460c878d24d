//! Error types for visual-hull-rs.

use thiserror::Error;

/// The main error type for reconstruction operations.
#[derive(Error, Debug)]
pub enum VisualHullError {
    /// A view source lacks its camera metadata or its silhouette image.
    #[error("view '{view}' is missing its {what}")]
    MissingInputData { view: String, what: String },

    /// The traced silhouette contour is not a usable polygon.
    #[error("view '{view}' has a degenerate silhouette ({vertices} vertices)")]
    DegenerateSilhouette { view: String, vertices: usize },

    /// The camera frame cannot be inverted for 3D to 2D projection.
    #[error("view '{view}' has a degenerate camera frame")]
    DegenerateCameraFrame { view: String },

    /// Two planes are parallel and have no intersection line.
    #[error("planes are parallel")]
    ParallelPlanes,

    /// No pair of views with non-parallel viewing directions exists.
    #[error("no pair of views with distinct viewing directions")]
    NoDistinguishingViewPair,

    /// Voxel grid resolution is too small.
    #[error("invalid voxel resolution {0}: must be at least 2")]
    InvalidResolution(usize),

    /// A numeric parameter is out of range.
    #[error("invalid parameter {name} = {value}: must be positive")]
    InvalidParameter { name: &'static str, value: f64 },

    /// A silhouette image could not be decoded.
    #[error("failed to decode image '{path}': {message}")]
    ImageDecode { path: String, message: String },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for reconstruction operations.
pub type Result<T> = std::result::Result<T, VisualHullError>;
