//! Loading views from a model directory.
//!
//! A model directory holds one sub-directory per view, each containing a
//! camera metadata JSON file and a silhouette raster.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use glam::DVec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use visual_hull_core::{Result, ViewSourceOptions, VisualHullError};
use visual_hull_structures::{CameraFrame, SilhouetteMask, View};

/// Camera metadata as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraJson {
    /// Display name; the directory name is used when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub origin: [f64; 3],
    pub vx: [f64; 3],
    pub vy: [f64; 3],
    pub vz: [f64; 3],
}

impl CameraJson {
    /// Camera frame described by this metadata.
    pub fn frame(&self) -> Option<CameraFrame> {
        CameraFrame::new(
            DVec3::from_array(self.origin),
            DVec3::from_array(self.vx),
            DVec3::from_array(self.vy),
            DVec3::from_array(self.vz),
        )
    }
}

fn directory_name(dir: &Path) -> String {
    dir.file_name()
        .map_or_else(|| dir.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Reads a raster and marks pixels at or below `threshold` luminance as object.
pub fn load_mask(path: &Path, threshold: u8) -> Result<SilhouetteMask> {
    let image = image::open(path)
        .map_err(|e| VisualHullError::ImageDecode {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
        .to_luma8();
    let (width, height) = image.dimensions();
    Ok(SilhouetteMask::from_fn(width as usize, height as usize, |x, z| {
        image.get_pixel(x as u32, z as u32).0[0] <= threshold
    }))
}

/// Loads one view directory.
pub fn load_view(dir: &Path, options: &ViewSourceOptions) -> Result<View> {
    let dir_name = directory_name(dir);
    let camera_path = dir.join(&options.camera_file);
    let image_path = dir.join(&options.silhouette_file);
    if !camera_path.is_file() {
        return Err(VisualHullError::MissingInputData {
            view: dir_name,
            what: format!("camera metadata ({})", options.camera_file),
        });
    }
    if !image_path.is_file() {
        return Err(VisualHullError::MissingInputData {
            view: dir_name,
            what: format!("silhouette image ({})", options.silhouette_file),
        });
    }

    let camera: CameraJson = serde_json::from_reader(BufReader::new(File::open(&camera_path)?))?;
    let name = camera.name.clone().unwrap_or(dir_name);
    let frame = camera
        .frame()
        .ok_or_else(|| VisualHullError::DegenerateCameraFrame { view: name.clone() })?;
    let mask = load_mask(&image_path, options.object_threshold)?;

    let view = View::from_mask(name, frame, &mask)?;
    log::debug!(
        "loaded view '{}' with {} silhouette vertices",
        view.name(),
        view.silhouette().len()
    );
    Ok(view)
}

/// View sub-directories of `root`, sorted by name.
pub fn view_directories(root: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Loads every view under `root` in parallel, in directory-name order.
///
/// Any view that fails to load aborts the whole load.
pub fn load_views(root: &Path, options: &ViewSourceOptions) -> Result<Vec<View>> {
    let dirs = view_directories(root)?;
    if dirs.is_empty() {
        return Err(VisualHullError::MissingInputData {
            view: directory_name(root),
            what: "view directories".to_string(),
        });
    }
    let views = dirs
        .par_iter()
        .map(|dir| load_view(dir, options))
        .collect::<Result<Vec<_>>>()?;
    log::info!("loaded {} views from {}", views.len(), root.display());
    Ok(views)
}
