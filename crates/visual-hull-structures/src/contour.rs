//! Boundary tracing for binary silhouette rasters.

use glam::DVec2;

type Pixel = (isize, isize);

/// 8-neighbourhood in clockwise order (image rows grow downward), starting east.
const NEIGHBOURS: [(isize, isize); 8] = [
    (1, 0),   // E
    (1, 1),   // SE
    (0, 1),   // S
    (-1, 1),  // SW
    (-1, 0),  // W
    (-1, -1), // NW
    (0, -1),  // N
    (1, -1),  // NE
];

const WEST: usize = 4;

/// Binary raster, row-major, `true` marks object pixels.
///
/// `x` indexes columns and `z` indexes rows (image rows grow downward).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SilhouetteMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl SilhouetteMask {
    /// Creates a mask from row-major pixel data.
    ///
    /// Returns `None` if `data.len() != width * height`.
    pub fn new(width: usize, height: usize, data: Vec<bool>) -> Option<Self> {
        (data.len() == width * height).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Creates a mask by evaluating `f(x, z)` for every pixel.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for z in 0..height {
            for x in 0..width {
                data.push(f(x, z));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether `(x, z)` is an object pixel. Out-of-range reads are background.
    pub fn get(&self, x: isize, z: isize) -> bool {
        match (usize::try_from(x), usize::try_from(z)) {
            (Ok(x), Ok(z)) if x < self.width && z < self.height => self.data[z * self.width + x],
            _ => false,
        }
    }

    /// Number of object pixels.
    pub fn object_count(&self) -> usize {
        self.data.iter().filter(|&&b| b).count()
    }

    /// Object pixel touching the background in its 8-neighbourhood.
    fn on_ring(&self, x: isize, z: isize) -> bool {
        if !self.get(x, z) {
            return false;
        }
        (-1..=1).any(|dz| (-1..=1).any(|dx| (dx, dz) != (0, 0) && !self.get(x + dx, z + dz)))
    }
}

/// Next boundary pixel clockwise from `backtrack`, with the heading taken.
fn next_boundary_step(mask: &SilhouetteMask, current: Pixel, backtrack: usize) -> Option<(usize, Pixel)> {
    (1..=8).map(|step| (backtrack + step) % 8).find_map(|heading| {
        let (dx, dz) = NEIGHBOURS[heading];
        let next = (current.0 + dx, current.1 + dz);
        mask.get(next.0, next.1).then_some((heading, next))
    })
}

/// Moore-neighbour walk around the region containing `start`.
///
/// `start` must be the first object pixel in raster order, so its west
/// neighbour is background. Diagonal moves also record the object pixel
/// between the two cells, which keeps the path 4-connected. The walk stops
/// when it is about to leave `start` the same way it first did.
fn trace_boundary(mask: &SilhouetteMask, start: Pixel) -> Option<Vec<Pixel>> {
    let (first_heading, second) = next_boundary_step(mask, start, WEST)?;
    let guard = 8 * mask.object_count() + 8;

    let mut path = Vec::new();
    let (mut current, mut heading, mut next) = (start, first_heading, second);
    for _ in 0..guard {
        path.push(current);
        if heading % 2 == 1 {
            let (dx, dz) = NEIGHBOURS[(heading + 1) % 8];
            let inner = (current.0 + dx, current.1 + dz);
            let came_from = path.len().checked_sub(2).map(|i| path[i]);
            if mask.get(inner.0, inner.1) && came_from != Some(inner) {
                path.push(inner);
            }
        }
        // The neighbour searched just before `heading`, seen from the new pixel.
        let backtrack = (heading + if heading % 2 == 0 { 6 } else { 5 }) % 8;
        current = next;
        (heading, next) = next_boundary_step(mask, current, backtrack)?;
        if current == start && next == second {
            return Some(path);
        }
    }

    log::debug!("contour walk did not close after {guard} steps");
    None
}

/// Traces the outer boundary of a single hole-free foreground region.
///
/// Returns one vertex per direction change, as `(x, -z)` pixel coordinates
/// centred on the midpoint of their bounding box. A boundary pixel is a
/// vertex when both its horizontal and its vertical neighbour pairs mix
/// ring and non-ring pixels. Returns `None` when the raster has no object
/// pixels, the region is a single pixel, or the walk cannot close.
pub fn trace_contour(mask: &SilhouetteMask) -> Option<Vec<DVec2>> {
    let start = (0..mask.height as isize)
        .flat_map(|z| (0..mask.width as isize).map(move |x| (x, z)))
        .find(|&(x, z)| mask.get(x, z))?;
    let path = trace_boundary(mask, start)?;

    let is_corner = |&(x, z): &Pixel| {
        mask.on_ring(x - 1, z) != mask.on_ring(x + 1, z)
            && mask.on_ring(x, z - 1) != mask.on_ring(x, z + 1)
    };
    let mut corners: Vec<Pixel> = path.into_iter().filter(is_corner).collect();
    corners.dedup();
    Some(center(&corners))
}

fn center(corners: &[(isize, isize)]) -> Vec<DVec2> {
    let points: Vec<DVec2> = corners
        .iter()
        .map(|&(x, z)| DVec2::new(x as f64, -(z as f64)))
        .collect();
    let (min, max) = points.iter().fold(
        (DVec2::splat(f64::INFINITY), DVec2::splat(f64::NEG_INFINITY)),
        |(lo, hi), &p| (lo.min(p), hi.max(p)),
    );
    let mid = (min + max) * 0.5;
    points.into_iter().map(|p| p - mid).collect()
}
