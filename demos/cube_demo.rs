//! Demo reconstructing a synthetic object with both algorithms.
//!
//! Builds three orthogonal views of an L-shaped prism, runs the plane sweep
//! and voxel carving, and prints a summary of each result.
//!
//! Run with `RUST_LOG=info cargo run --example cube_demo` to see progress.

use visual_hull::{
    init_logging, DVec2, DVec3, Model, ReconstructionOptions, Result, Surface, View,
    VoxelSurfaceMode,
};

fn rectangle(half: DVec2) -> Vec<DVec2> {
    vec![
        DVec2::new(-half.x, -half.y),
        DVec2::new(half.x, -half.y),
        DVec2::new(half.x, half.y),
        DVec2::new(-half.x, half.y),
    ]
}

/// An "L" seen from above.
fn l_outline() -> Vec<DVec2> {
    vec![
        DVec2::new(-2.0, -2.0),
        DVec2::new(2.0, -2.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(0.0, 0.0),
        DVec2::new(0.0, 2.0),
        DVec2::new(-2.0, 2.0),
    ]
}

fn main() -> Result<()> {
    init_logging();

    let views = vec![
        View::from_vectors("side", DVec3::ZERO, DVec3::Y, DVec3::X, DVec3::Z, rectangle(DVec2::new(2.0, 1.0)))?,
        View::from_vectors("front", DVec3::ZERO, DVec3::X, DVec3::Y, DVec3::Z, rectangle(DVec2::new(2.0, 1.0)))?,
        View::from_vectors("top", DVec3::ZERO, DVec3::X, DVec3::Z, DVec3::Y, l_outline())?,
    ];
    let model = Model::new("l-prism", views)?;
    println!("{model}");

    let planes = model.reconstruct(&ReconstructionOptions::plane_sweep(0.25))?;
    println!("plane sweep: {planes}");
    if let Surface::Planes(records) = &planes {
        for record in records.iter().filter(|r| !r.is_empty()) {
            println!(
                "  z = {:>6.3}: {} polygon(s), {} vertices",
                record.key,
                record.polygons.len(),
                record.vertex_count()
            );
        }
    }

    let cubes = model.reconstruct(&ReconstructionOptions::voxel_carve(16))?;
    println!("voxel carving: {cubes}");

    let edges = model.reconstruct(&ReconstructionOptions {
        voxel_surface: VoxelSurfaceMode::BoundaryEdges,
        ..ReconstructionOptions::voxel_carve(16)
    })?;
    println!("voxel boundary: {edges}");

    Ok(())
}
