//! Brightness-displaced sphere meshes: pixel sampling, block decimation,
//! spherical parameterization and row-major triangulation.

pub mod averager;
pub mod brightness;
pub mod error;
pub mod sphere;
pub mod sphere_mesh;

pub use averager::average_brightness;
pub use brightness::{PixelSource, brightness, pack_rgb};
pub use error::MeshError;
pub use sphere::{SphereParams, build_sphere_mesh, sphere_vertex};
pub use sphere_mesh::{Face, SphereMesh};
