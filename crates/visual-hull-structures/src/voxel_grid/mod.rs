//! Dense boolean voxel grid over an axis-aligned box.

mod carver;

pub use carver::{VoxelCarver, VoxelCubes};

use std::collections::BTreeSet;

use glam::DVec3;
use visual_hull_core::{Axis, Bounds3, Result, VisualHullError};

/// Face-neighbour offsets, one pair per axis.
const NEIGHBOURS: [(Axis, isize); 6] = [
    (Axis::X, -1),
    (Axis::X, 1),
    (Axis::Y, -1),
    (Axis::Y, 1),
    (Axis::Z, -1),
    (Axis::Z, 1),
];

/// An `R x R x R` grid of cells, all active until carved.
///
/// Cell `(i, j, k)` indexes the x, y and z axes and is stored at
/// `(i * R + j) * R + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelGrid {
    bounds: Bounds3,
    resolution: usize,
    cells: Vec<bool>,
}

impl VoxelGrid {
    /// Allocates a fully active grid. Fails for `resolution < 2`.
    pub fn new(bounds: Bounds3, resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(VisualHullError::InvalidResolution(resolution));
        }
        Ok(Self {
            bounds,
            resolution,
            cells: vec![true; resolution.pow(3)],
        })
    }

    pub fn bounds(&self) -> Bounds3 {
        self.bounds
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.resolution + j) * self.resolution + k
    }

    pub fn is_active(&self, i: usize, j: usize, k: usize) -> bool {
        self.cells[self.index(i, j, k)]
    }

    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|&&active| active).count()
    }

    /// World-space size of one cell.
    pub fn cell_size(&self) -> DVec3 {
        self.bounds.size() / self.resolution as f64
    }

    /// World-space centre of cell `(i, j, k)`.
    pub fn cell_center(&self, i: usize, j: usize, k: usize) -> DVec3 {
        let index = DVec3::new(i as f64, j as f64, k as f64) + 0.5;
        self.bounds.min + index * self.cell_size()
    }

    /// Centres of all active cells, in storage order.
    pub fn active_centers(&self) -> Vec<DVec3> {
        self.active_cells()
            .map(|(i, j, k)| self.cell_center(i, j, k))
            .collect()
    }

    fn active_cells(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        let r = self.resolution;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &active)| active)
            .map(move |(index, _)| (index / (r * r), (index / r) % r, index % r))
    }

    /// World-space sample point `(p, q)` of the lattice perpendicular to `axis`.
    ///
    /// `p` and `q` index the two other axes in increasing order; nodes run
    /// from `min` to `max` inclusive. The coordinate along `axis` is the
    /// bounds centre.
    pub fn lattice_point(&self, axis: Axis, p: usize, q: usize) -> DVec3 {
        let (a, b) = axis.others();
        let node = |axis: Axis, n: usize| {
            let (lo, hi) = self.bounds.range(axis);
            lo + n as f64 * (hi - lo) / (self.resolution - 1) as f64
        };
        let mut point = self.bounds.center();
        point[a.index()] = node(a, p);
        point[b.index()] = node(b, q);
        point
    }

    /// All lattice points perpendicular to `axis`, `p`-major.
    pub fn lattice(&self, axis: Axis) -> Vec<DVec3> {
        let r = self.resolution;
        (0..r * r)
            .map(|n| self.lattice_point(axis, n / r, n % r))
            .collect()
    }

    /// Deactivates every cell of the column `(p, q)` running along `axis`.
    pub fn carve_column(&mut self, axis: Axis, p: usize, q: usize) {
        for n in 0..self.resolution {
            let (i, j, k) = match axis {
                Axis::X => (n, p, q),
                Axis::Y => (p, n, q),
                Axis::Z => (p, q, n),
            };
            let index = self.index(i, j, k);
            self.cells[index] = false;
        }
    }

    fn is_active_at(&self, cell: [isize; 3]) -> bool {
        let r = self.resolution;
        match cell.map(usize::try_from) {
            [Ok(i), Ok(j), Ok(k)] if i < r && j < r && k < r => self.is_active(i, j, k),
            _ => false,
        }
    }

    /// Edges of the faces separating active cells from inactive or outside ones.
    ///
    /// Each edge appears once even when several boundary faces share it.
    pub fn boundary_edges(&self) -> Vec<(DVec3, DVec3)> {
        let corners = self.resolution + 1;
        let corner_index = |c: [usize; 3]| (c[0] * corners + c[1]) * corners + c[2];
        let corner_position = |index: usize| {
            let c = DVec3::new(
                (index / (corners * corners)) as f64,
                ((index / corners) % corners) as f64,
                (index % corners) as f64,
            );
            self.bounds.min + c * self.cell_size()
        };

        let mut edges = BTreeSet::new();
        for (i, j, k) in self.active_cells() {
            let cell = [i, j, k];
            for (axis, offset) in NEIGHBOURS {
                let mut neighbour = cell.map(|c| c as isize);
                neighbour[axis.index()] += offset;
                if self.is_active_at(neighbour) {
                    continue;
                }
                let (a, b) = axis.others();
                let face_corner = |da: usize, db: usize| {
                    let mut c = cell;
                    c[axis.index()] += usize::from(offset > 0);
                    c[a.index()] += da;
                    c[b.index()] += db;
                    corner_index(c)
                };
                let ring = [face_corner(0, 0), face_corner(1, 0), face_corner(1, 1), face_corner(0, 1)];
                for n in 0..4 {
                    let (s, t) = (ring[n], ring[(n + 1) % 4]);
                    edges.insert((s.min(t), s.max(t)));
                }
            }
        }

        edges
            .into_iter()
            .map(|(s, t)| (corner_position(s), corner_position(t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_grid(resolution: usize) -> VoxelGrid {
        VoxelGrid::new(Bounds3::new(DVec3::splat(-1.0), DVec3::splat(1.0)), resolution).unwrap()
    }

    #[test]
    fn test_invalid_resolution() {
        let bounds = Bounds3::new(DVec3::ZERO, DVec3::ONE);
        assert!(matches!(VoxelGrid::new(bounds, 0), Err(VisualHullError::InvalidResolution(0))));
        assert!(matches!(VoxelGrid::new(bounds, 1), Err(VisualHullError::InvalidResolution(1))));
    }

    #[test]
    fn test_indexing_and_centres() {
        let grid = unit_grid(4);
        assert_eq!(grid.len(), 64);
        assert_eq!(grid.index(1, 2, 3), 27);
        assert_eq!(grid.cell_size(), DVec3::splat(0.5));
        assert_eq!(grid.cell_center(0, 0, 0), DVec3::splat(-0.75));
        assert_eq!(grid.cell_center(3, 1, 2), DVec3::new(0.75, -0.25, 0.25));
        assert_eq!(grid.active_centers().len(), 64);
    }

    #[test]
    fn test_lattice() {
        let grid = unit_grid(3);
        assert_eq!(grid.lattice_point(Axis::Y, 0, 2), DVec3::new(-1.0, 0.0, 1.0));
        assert_eq!(grid.lattice_point(Axis::X, 1, 0), DVec3::new(0.0, 0.0, -1.0));
        let lattice = grid.lattice(Axis::Z);
        assert_eq!(lattice.len(), 9);
        assert_eq!(lattice[5], DVec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_carve_column() {
        let mut grid = unit_grid(4);
        grid.carve_column(Axis::Y, 1, 2);
        assert_eq!(grid.active_count(), 60);
        assert!((0..4).all(|j| !grid.is_active(1, j, 2)));
        assert!(grid.is_active(2, 0, 1));

        grid.carve_column(Axis::X, 0, 2);
        assert!(!grid.is_active(3, 0, 2));
        assert_eq!(grid.active_count(), 57);
    }

    #[test]
    fn test_boundary_edges_single_cell() {
        let mut grid = unit_grid(2);
        for (p, q) in [(0, 1), (1, 0), (1, 1)] {
            grid.carve_column(Axis::Z, p, q);
        }
        grid.carve_column(Axis::X, 0, 1);
        assert_eq!(grid.active_count(), 1);
        let edges = grid.boundary_edges();
        assert_eq!(edges.len(), 12);
        for (a, b) in edges {
            assert!((a.distance(b) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_boundary_edges_full_block() {
        // 6 faces of 12 edges, minus the 24 segments shared along block edges.
        let grid = unit_grid(2);
        assert_eq!(grid.boundary_edges().len(), 48);
    }
}
