//! Application error types.

use std::io;
use std::path::PathBuf;

use img2scad_config::ConfigError;
use img2scad_mesh::MeshError;
use thiserror::Error;

/// Errors raised by the batch driver.
///
/// [`AppError::MissingDirectory`], [`AppError::Config`] and
/// [`AppError::InvalidParams`] abort the run; the rest are reported per file.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required directory does not exist.
    #[error("{label} path is not a folder: {}", .path.display())]
    MissingDirectory {
        /// Which directory (`jpg`, `scad` or `stl`).
        label: &'static str,
        /// The configured path.
        path: PathBuf,
    },

    /// Loading or saving configuration failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Configured sphere parameters are unusable.
    #[error("invalid mesh parameters: {0}")]
    InvalidParams(#[source] MeshError),

    /// Listing a directory failed.
    #[error("failed to read directory {}: {source}", .path.display())]
    Walk {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An image could not be opened or decoded.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        /// Source image.
        path: PathBuf,
        /// Underlying decoder error.
        #[source]
        source: image::ImageError,
    },

    /// The image decoded but no mesh could be built from it.
    #[error("failed to build mesh for {}: {source}", .path.display())]
    Mesh {
        /// Source image.
        path: PathBuf,
        /// Underlying mesh error.
        #[source]
        source: MeshError,
    },

    /// Writing an output file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Output file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
