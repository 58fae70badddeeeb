//! Output path derivation.

use std::path::{Path, PathBuf};

/// Extension of the generated module file.
pub const SCAD_PREFIX_EXT: &str = "scad-prefix";
/// Extension of the top-level file handed to the renderer.
pub const SCAD_EXT: &str = "scad";
/// Extension of the rendered mesh.
pub const STL_EXT: &str = "stl";

/// The three files derived from one source image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputPaths {
    /// Generated `module body()` file, in the scad directory.
    pub scad_prefix: PathBuf,
    /// Renderer input that includes the prefix file, in the scad directory.
    pub scad: PathBuf,
    /// Renderer output, in the stl directory.
    pub stl: PathBuf,
}

impl OutputPaths {
    /// Derive output paths from an image path, keeping its base file name.
    pub fn derive(image: &Path, scad_dir: &Path, stl_dir: &Path) -> Self {
        let name = image
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            scad_prefix: scad_dir.join(replace_extension(&name, SCAD_PREFIX_EXT)),
            scad: scad_dir.join(replace_extension(&name, SCAD_EXT)),
            stl: stl_dir.join(replace_extension(&name, STL_EXT)),
        }
    }
}

/// Replace everything after the last `.` in `file_name` with `extension`.
///
/// Names without a dot get `.{extension}` appended.
pub fn replace_extension(file_name: &str, extension: &str) -> String {
    match file_name.rfind('.') {
        Some(dot) => format!("{}{extension}", &file_name[..=dot]),
        None => format!("{file_name}.{extension}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_last_extension() {
        assert_eq!(replace_extension("moon.jpg", "stl"), "moon.stl");
        assert_eq!(replace_extension("moon.v2.jpeg", "scad"), "moon.v2.scad");
        assert_eq!(replace_extension("moon.", "scad"), "moon.scad");
    }

    #[test]
    fn test_name_without_dot_gets_extension() {
        assert_eq!(replace_extension("moon", "stl"), "moon.stl");
    }

    #[test]
    fn test_derive_output_paths() {
        let paths = OutputPaths::derive(
            Path::new("jpg/planets/earth.png"),
            Path::new("out/scad"),
            Path::new("out/stl"),
        );
        assert_eq!(paths.scad_prefix, PathBuf::from("out/scad/earth.scad-prefix"));
        assert_eq!(paths.scad, PathBuf::from("out/scad/earth.scad"));
        assert_eq!(paths.stl, PathBuf::from("out/stl/earth.stl"));
    }
}
