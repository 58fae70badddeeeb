//! Batch driver: validate directories, find images, convert each in turn.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::{ImageError, ImageReader};
use img2scad_config::Config;
use img2scad_mesh::{SphereMesh, SphereParams, build_sphere_mesh};
use img2scad_scad::{wrapper_source, write_scad_file};
use tracing::{debug, error, info, warn};

use crate::discover::find_images;
use crate::error::AppError;
use crate::paths::OutputPaths;
use crate::renderer::{RenderOutcome, Renderer};

/// Counters collected over one batch run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Images turned into `.scad-prefix` files.
    pub converted: usize,
    /// Renders that exited successfully.
    pub rendered: usize,
    /// Renders that failed, timed out, or could not start.
    pub render_failures: usize,
    /// Images that could not be converted.
    pub failed: Vec<PathBuf>,
}

impl BatchReport {
    /// Returns `true` if every image was converted.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A validated, ready-to-run conversion batch.
#[derive(Debug)]
pub struct Batch {
    image_dir: PathBuf,
    scad_dir: PathBuf,
    stl_dir: PathBuf,
    params: SphereParams,
    precision: usize,
    write_wrapper: bool,
    renderer: Option<Renderer>,
}

impl Batch {
    /// Build a batch from configuration.
    ///
    /// # Errors
    ///
    /// Fails if a directory is missing (checked in `jpg`, `scad`, `stl` order)
    /// or the mesh parameters are invalid.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let paths = &config.paths;
        require_dir("jpg", &paths.image_dir)?;
        require_dir("scad", &paths.scad_dir)?;
        require_dir("stl", &paths.stl_dir)?;

        let params = SphereParams::new(
            config.mesh.diameter,
            config.mesh.effective_depth(),
            config.mesh.grid,
        )
        .map_err(AppError::InvalidParams)?;

        let renderer = config.renderer.command.clone().map(|command| {
            Renderer::new(
                command,
                Duration::from_secs(config.renderer.timeout_minutes.saturating_mul(60)),
            )
        });

        Ok(Self {
            image_dir: paths.image_dir.clone(),
            scad_dir: paths.scad_dir.clone(),
            stl_dir: paths.stl_dir.clone(),
            params,
            precision: config.output.precision as usize,
            write_wrapper: config.output.write_wrapper,
            renderer,
        })
    }

    /// Sphere parameters applied to every image.
    pub fn params(&self) -> &SphereParams {
        &self.params
    }

    /// Convert every image under the image directory, one at a time.
    ///
    /// Per-image failures are logged and recorded in the report; only a
    /// failure to list the image directory aborts the run.
    pub fn run(&self) -> Result<BatchReport, AppError> {
        let images = find_images(&self.image_dir)?;
        info!(count = images.len(), dir = %self.image_dir.display(), "found images");

        let mut report = BatchReport::default();
        for image in images {
            match self.convert(&image) {
                Ok(paths) => {
                    report.converted += 1;
                    self.render(&paths, &mut report);
                }
                Err(err) => {
                    error!("{err}");
                    report.failed.push(image);
                }
            }
        }

        info!(
            converted = report.converted,
            rendered = report.rendered,
            render_failures = report.render_failures,
            failed = report.failed.len(),
            "batch finished"
        );
        Ok(report)
    }

    /// Build and write the mesh description for one image.
    pub fn convert(&self, image_path: &Path) -> Result<OutputPaths, AppError> {
        let paths = OutputPaths::derive(image_path, &self.scad_dir, &self.stl_dir);
        info!(
            "Converting {} to {}...",
            image_path.display(),
            paths.scad_prefix.display()
        );

        let mesh = self.build_mesh(image_path)?;
        debug!(
            vertices = mesh.vertex_count(),
            faces = mesh.face_count(),
            "mesh built"
        );

        write_scad_file(&paths.scad_prefix, &mesh, self.precision).map_err(|source| {
            AppError::Write {
                path: paths.scad_prefix.clone(),
                source,
            }
        })?;

        if self.write_wrapper && !paths.scad.exists() {
            self.write_wrapper_file(&paths)?;
        }
        Ok(paths)
    }

    fn build_mesh(&self, image_path: &Path) -> Result<SphereMesh, AppError> {
        let pixels = ImageReader::open(image_path)
            .and_then(|reader| reader.with_guessed_format())
            .map_err(ImageError::IoError)
            .and_then(|reader| reader.decode())
            .map_err(|source| AppError::Decode {
                path: image_path.to_path_buf(),
                source,
            })?
            .to_rgb8();

        build_sphere_mesh(&pixels, &self.params).map_err(|source| AppError::Mesh {
            path: image_path.to_path_buf(),
            source,
        })
    }

    fn write_wrapper_file(&self, paths: &OutputPaths) -> Result<(), AppError> {
        let include = paths
            .scad_prefix
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(path = %paths.scad.display(), "writing wrapper");
        fs::write(&paths.scad, wrapper_source(&include)).map_err(|source| AppError::Write {
            path: paths.scad.clone(),
            source,
        })
    }

    fn render(&self, paths: &OutputPaths, report: &mut BatchReport) {
        let Some(renderer) = &self.renderer else {
            return;
        };

        info!(
            "Converting {} to {}...",
            paths.scad.display(),
            paths.stl.display()
        );
        match renderer.render(&paths.scad, &paths.stl) {
            Ok(RenderOutcome::Success) => report.rendered += 1,
            Ok(RenderOutcome::Failed(status)) => {
                warn!(input = %paths.scad.display(), %status, "renderer failed");
                report.render_failures += 1;
            }
            Ok(RenderOutcome::TimedOut) => report.render_failures += 1,
            Err(err) => {
                warn!(program = %renderer.command().program, %err, "could not run renderer");
                report.render_failures += 1;
            }
        }
    }
}

fn require_dir(label: &'static str, path: &Path) -> Result<(), AppError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(AppError::MissingDirectory {
            label,
            path: path.to_path_buf(),
        })
    }
}
