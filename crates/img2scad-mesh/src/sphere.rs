//! Spherical parameterization: sample grid to displaced sphere vertices, plus
//! the quad-split triangulation over the same grid.
//!
//! # Coordinate pipeline
//!
//! 1. Sample `(i, j)` with `i` in `[0, height]`, `j` in `[0, width]`
//! 2. Block-averaged brightness `b` in `[0, 1]` via [`average_brightness`]
//! 3. Longitude `theta = 2π j / width`, colatitude `phi = π i / height`
//! 4. Radius `diameter / 2 + depth * b`
//! 5. Cartesian point on the displaced sphere

use std::f64::consts::PI;

use glam::DVec3;

use crate::averager::average_brightness;
use crate::brightness::PixelSource;
use crate::error::MeshError;
use crate::sphere_mesh::{Face, SphereMesh};

/// Geometry and sampling parameters for one conversion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereParams {
    /// Diameter of the undisplaced sphere.
    pub diameter: f64,
    /// Extra radius applied at full brightness.
    pub depth: f64,
    /// Decimation block size in pixels; 1 disables averaging.
    pub grid: u32,
}

impl SphereParams {
    /// Diameter used when none is configured.
    pub const DEFAULT_DIAMETER: f64 = 180.0;
    /// Depth as a fraction of the diameter when none is configured.
    pub const DEFAULT_DEPTH_RATIO: f64 = 0.04;
    /// Decimation block size used when none is configured.
    pub const DEFAULT_GRID: u32 = 2;

    /// Create validated parameters.
    ///
    /// # Errors
    ///
    /// Rejects a non-positive or non-finite `diameter`, a non-finite `depth`
    /// and a zero `grid`.
    pub fn new(diameter: f64, depth: f64, grid: u32) -> Result<Self, MeshError> {
        if !(diameter > 0.0 && diameter.is_finite()) {
            return Err(MeshError::InvalidDiameter(diameter));
        }
        if !depth.is_finite() {
            return Err(MeshError::InvalidDepth(depth));
        }
        if grid == 0 {
            return Err(MeshError::InvalidGrid);
        }
        Ok(Self {
            diameter,
            depth,
            grid,
        })
    }

    /// Radius of the undisplaced sphere.
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            diameter: Self::DEFAULT_DIAMETER,
            depth: Self::DEFAULT_DIAMETER * Self::DEFAULT_DEPTH_RATIO,
            grid: Self::DEFAULT_GRID,
        }
    }
}

/// Position of sample `(i, j)` for a normalized `brightness`.
pub fn sphere_vertex(
    i: u32,
    j: u32,
    width: u32,
    height: u32,
    brightness: f64,
    params: &SphereParams,
) -> DVec3 {
    let r = params.radius();
    let adjust = params.depth * brightness;
    let theta = 2.0 * PI * f64::from(j) / f64::from(width);
    let phi = PI * f64::from(i) / f64::from(height);
    let radial = r + adjust;

    DVec3::new(
        radial * theta.cos() * phi.sin(),
        radial * theta.sin() * phi.sin(),
        radial * phi.cos(),
    )
}

/// Build the displaced sphere for an image.
///
/// Produces `(height + 1) * (width + 1)` vertices in row-major order and
/// `2 * height * width` faces. Row `0` collapses onto the north pole and row
/// `height` onto the south pole; column `width` coincides with column `0`.
///
/// # Errors
///
/// Fails for an empty image, invalid parameters, or a vertex grid too large for
/// 32-bit indices.
pub fn build_sphere_mesh<S: PixelSource + ?Sized>(
    source: &S,
    params: &SphereParams,
) -> Result<SphereMesh, MeshError> {
    let width = source.width();
    let height = source.height();
    if width == 0 || height == 0 {
        return Err(MeshError::EmptyImage { width, height });
    }
    let params = SphereParams::new(params.diameter, params.depth, params.grid)?;

    let vertex_count = (u64::from(width) + 1) * (u64::from(height) + 1);
    if vertex_count > u64::from(u32::MAX) {
        return Err(MeshError::TooManyVertices { width, height });
    }

    let mut vertices = Vec::with_capacity(vertex_count as usize);
    for i in 0..=height {
        for j in 0..=width {
            let brightness = average_brightness(source, i, j, params.grid);
            vertices.push(sphere_vertex(i, j, width, height, brightness, &params));
        }
    }

    let stride = width + 1;
    let idx = |i: u32, j: u32| i * stride + j;
    let mut faces: Vec<Face> = Vec::with_capacity(2 * width as usize * height as usize);
    for i in 0..height {
        for j in 0..width {
            faces.push([idx(i, j), idx(i + 1, j + 1), idx(i + 1, j)]);
            faces.push([idx(i, j), idx(i, j + 1), idx(i + 1, j + 1)]);
        }
    }

    Ok(SphereMesh::new(width, height, vertices, faces))
}
