//! OpenSCAD output: fixed-precision number formatting and the `polyhedron`
//! module writer.

pub mod number;
pub mod writer;

pub use number::format_number;
pub use writer::{MODULE_NAME, scad_source, wrapper_source, write_scad, write_scad_file};
