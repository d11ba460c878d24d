//! Silhouette carving of a [`VoxelGrid`].

use glam::DVec3;
use visual_hull_core::{Bounds3, ReconstructionOptions, Result, VisualHullError, VoxelSurfaceMode};

use super::VoxelGrid;
use crate::view::View;

impl VoxelGrid {
    /// Deactivates every column whose lattice sample falls outside `view`'s silhouette.
    ///
    /// Columns run along the view's dominant axis, so one containment test
    /// decides all `R` cells behind a lattice point. Returns the active count
    /// afterwards.
    pub fn carve(&mut self, view: &View) -> usize {
        let axis = view.view_axis();
        let r = self.resolution();
        let inside = view.project_inside_batch(&self.lattice(axis));
        for (n, _) in inside.iter().enumerate().filter(|(_, &inside)| !inside) {
            self.carve_column(axis, n / r, n % r);
        }
        self.active_count()
    }
}

/// Active cell centres with their shared size.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelCubes {
    pub centers: Vec<DVec3>,
    pub cube_size: DVec3,
    /// Number of cells in the grid, active or not.
    pub total_cells: usize,
}

/// Voxel-carving reconstructor.
#[derive(Debug, Clone)]
pub struct VoxelCarver {
    resolution: usize,
    surface_mode: VoxelSurfaceMode,
    grid: Option<VoxelGrid>,
    views: Vec<View>,
}

impl VoxelCarver {
    pub fn new(resolution: usize, surface_mode: VoxelSurfaceMode) -> Result<Self> {
        if resolution < 2 {
            return Err(VisualHullError::InvalidResolution(resolution));
        }
        Ok(Self {
            resolution,
            surface_mode,
            grid: None,
            views: Vec::new(),
        })
    }

    pub fn from_options(options: &ReconstructionOptions) -> Result<Self> {
        Self::new(options.resolution, options.voxel_surface)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn surface_mode(&self) -> VoxelSurfaceMode {
        self.surface_mode
    }

    /// The grid, once allocated by [`VoxelCarver::initial_reconstruct`].
    pub fn grid(&self) -> Option<&VoxelGrid> {
        self.grid.as_ref()
    }

    /// Allocates a fully active grid over `bounds` and takes the views to carve with.
    pub fn initial_reconstruct(&mut self, views: Vec<View>, bounds: Bounds3) -> Result<()> {
        let grid = VoxelGrid::new(bounds, self.resolution)?;
        log::info!(
            "allocated {r}x{r}x{r} voxel grid over {bounds}",
            r = self.resolution
        );
        self.grid = Some(grid);
        self.views = views;
        Ok(())
    }

    /// Carves the grid with every view in order.
    ///
    /// Returns the active count after each view.
    pub fn refine(&mut self) -> Vec<usize> {
        let Some(grid) = self.grid.as_mut() else {
            return Vec::new();
        };
        self.views
            .iter()
            .map(|view| {
                let active = grid.carve(view);
                log::info!("carved with '{}': {active} voxels active", view.name());
                active
            })
            .collect()
    }

    /// Centres of the surviving cells.
    pub fn cubes(&self) -> VoxelCubes {
        match &self.grid {
            Some(grid) => VoxelCubes {
                centers: grid.active_centers(),
                cube_size: grid.cell_size(),
                total_cells: grid.len(),
            },
            None => VoxelCubes {
                centers: Vec::new(),
                cube_size: DVec3::ZERO,
                total_cells: 0,
            },
        }
    }

    /// Edges of the faces between surviving and carved cells.
    pub fn boundary_edges(&self) -> Vec<(DVec3, DVec3)> {
        self.grid.as_ref().map(VoxelGrid::boundary_edges).unwrap_or_default()
    }
}
