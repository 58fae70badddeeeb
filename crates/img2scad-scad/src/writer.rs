//! Serializes a [`SphereMesh`] as an OpenSCAD module wrapping one `polyhedron`.
//!
//! The layout is byte-for-byte stable so generated files can be diffed:
//!
//! ```text
//! module body() {
//!   polyhedron(
//!     points = [
//!       [x, y, z],
//!
//!     ],
//!     faces = [      [a, b, c], [d, e, f],
//!     ],
//!     convexity = 10);
//! }
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use glam::DVec3;
use img2scad_mesh::SphereMesh;

use crate::number::format_number;

/// Name of the generated OpenSCAD module.
pub const MODULE_NAME: &str = "body";

/// Convexity hint passed to `polyhedron`.
const CONVEXITY: u32 = 10;

/// Write `mesh` as a `module body()` definition.
pub fn write_scad<W: Write>(out: &mut W, mesh: &SphereMesh, precision: usize) -> io::Result<()> {
    write!(out, "module {MODULE_NAME}() {{\n  polyhedron(\n    points = [\n")?;

    for vertex in mesh.vertices() {
        write_point(out, *vertex, precision)?;
    }

    out.write_all(b"\n    ],\n    faces = [")?;

    // Two triangles per grid cell share a line.
    for cell in mesh.faces().chunks(2) {
        out.write_all(b"     ")?;
        for face in cell {
            write!(out, " [{}, {}, {}],", face[0], face[1], face[2])?;
        }
        out.write_all(b"\n")?;
    }

    write!(out, "    ],\n    convexity = {CONVEXITY});\n}}")
}

fn write_point<W: Write>(out: &mut W, p: DVec3, precision: usize) -> io::Result<()> {
    writeln!(
        out,
        "      [{}, {}, {}],",
        format_number(p.x, precision),
        format_number(p.y, precision),
        format_number(p.z, precision)
    )
}

/// Render `mesh` to a string.
pub fn scad_source(mesh: &SphereMesh, precision: usize) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_scad(&mut buf, mesh, precision);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write `mesh` to `path`, replacing any existing file.
pub fn write_scad_file(path: &Path, mesh: &SphereMesh, precision: usize) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_scad(&mut out, mesh, precision)?;
    out.flush()
}

/// A minimal top-level file that includes a generated module file and instantiates it.
pub fn wrapper_source(module_file_name: &str) -> String {
    format!("include <{module_file_name}>\n\n{MODULE_NAME}();\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use img2scad_mesh::{SphereParams, build_sphere_mesh};

    fn golden_image() -> RgbImage {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([0, 0, 0]));
        img.put_pixel(0, 1, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 0, 255]));
        img
    }

    const GOLDEN: &str = "module body() {
  polyhedron(
    points = [
      [0, 0, 97.2],
      [0, 0, 97.2],
      [0, 0, 97.2],
      [93.93702, 0, 0],
      [-92.431, 0, 0],
      [93.93702, 0, 0],
      [0, 0, -93.93702],
      [0, 0, -93.93702],
      [0, 0, -93.93702],

    ],
    faces = [      [0, 4, 3], [0, 1, 4],
      [1, 5, 4], [1, 2, 5],
      [3, 7, 6], [3, 4, 7],
      [4, 8, 7], [4, 5, 8],
    ],
    convexity = 10);
}";

    #[test]
    fn test_two_by_two_golden_output() {
        let params = SphereParams::new(180.0, 7.2, 1).unwrap();
        let mesh = build_sphere_mesh(&golden_image(), &params).unwrap();
        assert_eq!(scad_source(&mesh, 5), GOLDEN);
    }

    #[test]
    fn test_output_is_deterministic() {
        let params = SphereParams::default();
        let a = scad_source(&build_sphere_mesh(&golden_image(), &params).unwrap(), 5);
        let b = scad_source(&build_sphere_mesh(&golden_image(), &params).unwrap(), 5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_line_counts_match_mesh() {
        let img = RgbImage::from_fn(5, 3, |x, y| Rgb([(x * 40) as u8, (y * 80) as u8, 7]));
        let mesh = build_sphere_mesh(&img, &SphereParams::default()).unwrap();
        let text = scad_source(&mesh, 5);

        let point_lines = text
            .lines()
            .filter(|l| l.starts_with("      [") && l.matches('[').count() == 1)
            .count();
        let face_lines = text.lines().filter(|l| l.contains("], [")).count();
        assert_eq!(point_lines, mesh.vertex_count());
        assert_eq!(face_lines, mesh.face_count() / 2);
        assert!(text.starts_with("module body() {\n"));
        assert!(text.ends_with("    convexity = 10);\n}"));
    }

    #[test]
    fn test_precision_is_applied() {
        let params = SphereParams::new(180.0, 7.2, 1).unwrap();
        let mesh = build_sphere_mesh(&golden_image(), &params).unwrap();
        let text = scad_source(&mesh, 1);
        assert!(text.contains("[93.9, 0, 0],"));
        assert!(text.contains("[-92.4, 0, 0],"));
    }

    #[test]
    fn test_write_scad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("golden.scad-prefix");
        let params = SphereParams::new(180.0, 7.2, 1).unwrap();
        let mesh = build_sphere_mesh(&golden_image(), &params).unwrap();

        write_scad_file(&path, &mesh, 5).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), GOLDEN);
    }

    #[test]
    fn test_wrapper_source() {
        assert_eq!(
            wrapper_source("photo.scad-prefix"),
            "include <photo.scad-prefix>\n\nbody();\n"
        );
    }
}
