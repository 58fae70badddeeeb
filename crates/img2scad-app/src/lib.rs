//! img2scad batch application.
//!
//! Walks an image directory, writes one displaced-sphere OpenSCAD module per
//! image and optionally hands each result to an external renderer.

pub mod batch;
pub mod discover;
pub mod error;
pub mod paths;
pub mod renderer;

pub use batch::{Batch, BatchReport};
pub use error::AppError;
