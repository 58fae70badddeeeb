//! Recursive image discovery, kept separate from conversion.

use std::fs;
use std::path::{Path, PathBuf};

use image::ImageReader;
use tracing::debug;

use crate::error::AppError;

/// Every image file under `root`, depth-first with entries sorted by name.
///
/// A regular file counts as an image when its leading bytes (or, failing
/// that, its extension) identify an image format. Directory symlinks are not
/// followed.
pub fn find_images(root: &Path) -> Result<Vec<PathBuf>, AppError> {
    let mut found = Vec::new();
    walk(root, &mut found)?;
    Ok(found)
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) -> Result<(), AppError> {
    let walk_err = |source| AppError::Walk {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(walk_err)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(walk_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        debug!(path = %path.display(), "visiting");

        let file_type = entry.file_type().map_err(walk_err)?;
        if file_type.is_dir() {
            walk(&path, found)?;
        } else if path.is_file() && is_image_file(&path) {
            found.push(path);
        } else {
            debug!(path = %path.display(), "skipping non-image entry");
        }
    }
    Ok(())
}

/// Returns `true` if `path` is an image, by content or extension, in a format
/// this build can decode.
pub fn is_image_file(path: &Path) -> bool {
    match ImageReader::open(path).and_then(|reader| reader.with_guessed_format()) {
        Ok(reader) => match reader.format() {
            Some(format) if format.reading_enabled() => true,
            Some(format) => {
                debug!(path = %path.display(), ?format, "no decoder for image format");
                false
            }
            None => false,
        },
        Err(err) => {
            debug!(path = %path.display(), %err, "cannot sniff content type");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_png(path: &Path) {
        RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_finds_images_recursively_in_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        write_png(&dir.path().join("b.png"));
        write_png(&dir.path().join("a.png"));
        write_png(&nested.join("c.png"));
        fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let found = find_images(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![
                dir.path().join("a.png"),
                dir.path().join("b.png"),
                nested.join("c.png"),
            ]
        );
    }

    #[test]
    fn test_content_sniffing_ignores_misleading_extension() {
        let dir = tempfile::tempdir().unwrap();
        let disguised = dir.path().join("photo.dat");
        let png_bytes = {
            let src = dir.path().join("src.png");
            write_png(&src);
            fs::read(&src).unwrap()
        };
        fs::write(&disguised, png_bytes).unwrap();

        assert!(is_image_file(&disguised));
        assert!(!is_image_file(&dir.path().join("missing.png")));
    }

    #[test]
    fn test_plain_text_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        let text = dir.path().join("readme");
        fs::write(&text, "hello").unwrap();
        assert!(!is_image_file(&text));
    }

    #[test]
    fn test_formats_without_decoder_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let webp = dir.path().join("x.webp");
        let mut webp_bytes = b"RIFF\x24\0\0\0WEBPVP8 ".to_vec();
        webp_bytes.resize(44, 0);
        fs::write(&webp, webp_bytes).unwrap();
        let tiff = dir.path().join("y.tif");
        fs::write(&tiff, b"II*\0\x08\0\0\0\0\0").unwrap();
        write_png(&dir.path().join("z.png"));

        assert!(!is_image_file(&webp));
        assert!(!is_image_file(&tiff));
        assert_eq!(
            find_images(dir.path()).unwrap(),
            vec![dir.path().join("z.png")]
        );
    }

    #[test]
    fn test_missing_root_is_walk_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_images(&dir.path().join("absent")).unwrap_err();
        assert!(matches!(err, AppError::Walk { .. }));
    }
}
