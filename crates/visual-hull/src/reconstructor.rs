//! Algorithm selection and reconstruction output.

use std::fmt;

use glam::DVec3;
use visual_hull_core::{Bounds3, Method, ReconstructionOptions, Result, VoxelSurfaceMode};
use visual_hull_structures::{PlaneRecord, PlaneSweep, View, VoxelCarver, VoxelCubes};

/// The reconstruction algorithm chosen for a run.
#[derive(Debug, Clone)]
pub enum Reconstructor {
    PlaneSweep(PlaneSweep),
    VoxelCarve(VoxelCarver),
}

impl Reconstructor {
    /// Builds the reconstructor named by `options.method`.
    pub fn from_options(options: &ReconstructionOptions) -> Result<Self> {
        options.validate()?;
        Ok(match options.method {
            Method::PlaneSweep => Self::PlaneSweep(PlaneSweep::from_options(options)?),
            Method::VoxelCarve => Self::VoxelCarve(VoxelCarver::from_options(options)?),
        })
    }

    pub fn method(&self) -> Method {
        match self {
            Self::PlaneSweep(_) => Method::PlaneSweep,
            Self::VoxelCarve(_) => Method::VoxelCarve,
        }
    }

    /// Takes ownership of the views and builds the initial state.
    ///
    /// `bounds` is the model's bounding box; only voxel carving uses it.
    pub fn initial_reconstruct(&mut self, views: Vec<View>, bounds: Bounds3) -> Result<()> {
        match self {
            Self::PlaneSweep(sweep) => sweep.initial_reconstruct(views),
            Self::VoxelCarve(carver) => carver.initial_reconstruct(views, bounds),
        }
    }

    /// Applies the views not consumed by the initial step.
    pub fn refine(&mut self) {
        match self {
            Self::PlaneSweep(sweep) => sweep.refine(),
            Self::VoxelCarve(carver) => {
                carver.refine();
            }
        }
    }

    pub fn extract_surface(&self) -> Surface {
        match self {
            Self::PlaneSweep(sweep) => Surface::Planes(sweep.extract_surface()),
            Self::VoxelCarve(carver) => match carver.surface_mode() {
                VoxelSurfaceMode::Cubes => Surface::Voxels(carver.cubes()),
                VoxelSurfaceMode::BoundaryEdges => Surface::VoxelEdges(carver.boundary_edges()),
            },
        }
    }
}

/// Reconstructed geometry, ready for a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Plane-sweep slices in increasing key order. Slices may be empty.
    Planes(Vec<PlaneRecord>),
    /// Active voxel centres with their shared cube size.
    Voxels(VoxelCubes),
    /// Boundary face edges of the carved volume.
    VoxelEdges(Vec<(DVec3, DVec3)>),
}

impl Surface {
    pub fn stats(&self) -> SurfaceStats {
        match self {
            Self::Planes(planes) => SurfaceStats::Planes {
                planes: planes.len(),
                non_empty: planes.iter().filter(|p| !p.is_empty()).count(),
                polygons: planes.iter().map(|p| p.polygons.len()).sum(),
                vertices: planes.iter().map(PlaneRecord::vertex_count).sum(),
            },
            Self::Voxels(cubes) => SurfaceStats::Voxels {
                total: cubes.total_cells,
                active: cubes.centers.len(),
            },
            Self::VoxelEdges(edges) => SurfaceStats::Edges { edges: edges.len() },
        }
    }

    /// Counts of this surface together with the box it was reconstructed in.
    pub fn summary(&self, bounds: Bounds3) -> SurfaceSummary {
        SurfaceSummary {
            stats: self.stats(),
            bounds,
        }
    }

    /// Slices that still hold geometry.
    pub fn non_empty_planes(&self) -> Vec<&PlaneRecord> {
        match self {
            Self::Planes(planes) => planes.iter().filter(|p| !p.is_empty()).collect(),
            _ => Vec::new(),
        }
    }
}

/// Size summary of a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStats {
    Planes {
        planes: usize,
        non_empty: usize,
        polygons: usize,
        vertices: usize,
    },
    Voxels {
        total: usize,
        active: usize,
    },
    Edges {
        edges: usize,
    },
}

impl fmt::Display for SurfaceStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planes {
                planes,
                non_empty,
                polygons,
                vertices,
            } => write!(
                f,
                "{planes} planes ({non_empty} non-empty), {polygons} polygons, {vertices} vertices"
            ),
            Self::Voxels { total, active } => write!(f, "{active} of {total} voxels active"),
            Self::Edges { edges } => write!(f, "{edges} boundary edges"),
        }
    }
}

/// [`SurfaceStats`] plus the model bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSummary {
    pub stats: SurfaceStats,
    pub bounds: Bounds3,
}

impl fmt::Display for SurfaceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} within bounds {}", self.stats, self.bounds)
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.stats())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_options() {
        let sweep = Reconstructor::from_options(&ReconstructionOptions::plane_sweep(0.5)).unwrap();
        assert_eq!(sweep.method(), Method::PlaneSweep);
        let carve = Reconstructor::from_options(&ReconstructionOptions::voxel_carve(8)).unwrap();
        assert_eq!(carve.method(), Method::VoxelCarve);
        assert!(Reconstructor::from_options(&ReconstructionOptions::voxel_carve(1)).is_err());
    }

    #[test]
    fn test_stats_display() {
        let stats = SurfaceStats::Voxels {
            total: 64,
            active: 10,
        };
        assert_eq!(stats.to_string(), "10 of 64 voxels active");
        let surface = Surface::Planes(Vec::new());
        assert_eq!(
            surface.to_string(),
            "0 planes (0 non-empty), 0 polygons, 0 vertices"
        );
        assert!(surface.non_empty_planes().is_empty());
    }

    #[test]
    fn test_summary_includes_bounds() {
        let bounds = Bounds3::new(DVec3::splat(-1.0), DVec3::new(1.0, 2.0, 3.0));
        let summary = Surface::VoxelEdges(Vec::new()).summary(bounds);
        assert_eq!(summary.stats, SurfaceStats::Edges { edges: 0 });
        assert_eq!(summary.bounds, bounds);
        assert_eq!(
            summary.to_string(),
            "0 boundary edges within bounds (-1, 1, -1, 2, -1, 3)"
        );
    }
}
