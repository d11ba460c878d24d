//! Logging setup and the one-call entry point.

use std::path::Path;

use visual_hull_core::{ReconstructionOptions, Result, ViewSourceOptions};

use crate::model::Model;
use crate::reconstructor::Surface;

/// Installs the `env_logger` backend, configured by `RUST_LOG`.
///
/// Calling it more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

/// Loads the model under `path` and reconstructs it.
///
/// # Example
///
/// ```no_run
/// use visual_hull::*;
///
/// fn main() -> Result<()> {
///     let options = ReconstructionOptions::plane_sweep(0.5);
///     let surface = run("models/cube", &options, &ViewSourceOptions::default())?;
///     println!("{surface}");
///     Ok(())
/// }
/// ```
pub fn run(
    path: impl AsRef<Path>,
    options: &ReconstructionOptions,
    sources: &ViewSourceOptions,
) -> Result<Surface> {
    init_logging();
    options.validate()?;
    let model = Model::load(path, sources)?;
    log::info!("model summary:\n{model}");
    model.reconstruct(options)
}
