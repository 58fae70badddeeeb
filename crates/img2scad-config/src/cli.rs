//! Command-line argument parsing for img2scad.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, RendererCommand};

/// img2scad command-line arguments.
///
/// CLI values override settings loaded from the `--config` file.
#[derive(Parser, Debug, Default)]
#[command(
    name = "img2scad",
    about = "Wrap images around brightness-displaced spheres as OpenSCAD polyhedra"
)]
pub struct CliArgs {
    /// Directory searched recursively for images [default: jpg].
    pub image_dir: Option<PathBuf>,

    /// Directory for generated `.scad-prefix` files [default: scad].
    pub scad_dir: Option<PathBuf>,

    /// Directory for rendered `.stl` files [default: stl].
    pub stl_dir: Option<PathBuf>,

    /// Renderer command line, split on whitespace (e.g. "openscad" or
    /// "flatpak run org.openscad.OpenSCAD"). Rendering is skipped when absent.
    pub renderer: Option<String>,

    /// Sphere diameter.
    #[arg(long)]
    pub diameter: Option<f64>,

    /// Radial displacement at full brightness [default: 4% of diameter].
    #[arg(long)]
    pub depth: Option<f64>,

    /// Decimation block size in pixels (1 = no averaging).
    #[arg(long)]
    pub grid: Option<u32>,

    /// Maximum fractional digits per coordinate.
    #[arg(long)]
    pub precision: Option<u32>,

    /// Minutes to wait for each render before killing it.
    #[arg(long)]
    pub timeout_minutes: Option<u64>,

    /// Generate missing `.scad` wrappers that include the prefix file.
    #[arg(long)]
    pub write_wrapper: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory for JSON log files.
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Path to a RON config file.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the effective configuration to this file and exit.
    #[arg(long)]
    pub save_config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref dir) = args.image_dir {
            self.paths.image_dir = dir.clone();
        }
        if let Some(ref dir) = args.scad_dir {
            self.paths.scad_dir = dir.clone();
        }
        if let Some(ref dir) = args.stl_dir {
            self.paths.stl_dir = dir.clone();
        }
        if let Some(ref cmd) = args.renderer {
            self.renderer.command = RendererCommand::parse(cmd);
        }
        if let Some(d) = args.diameter {
            self.mesh.diameter = d;
        }
        if let Some(d) = args.depth {
            self.mesh.depth = Some(d);
        }
        if let Some(g) = args.grid {
            self.mesh.grid = g;
        }
        if let Some(p) = args.precision {
            self.output.precision = p;
        }
        if let Some(t) = args.timeout_minutes {
            self.renderer.timeout_minutes = t;
        }
        if let Some(w) = args.write_wrapper {
            self.output.write_wrapper = w;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(ref dir) = args.log_dir {
            self.debug.log_dir = Some(dir.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positional_arguments() {
        let args = CliArgs::parse_from([
            "img2scad",
            "photos",
            "out/scad",
            "out/stl",
            "flatpak run org.openscad.OpenSCAD",
        ]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);

        assert_eq!(config.paths.image_dir, PathBuf::from("photos"));
        assert_eq!(config.paths.scad_dir, PathBuf::from("out/scad"));
        assert_eq!(config.paths.stl_dir, PathBuf::from("out/stl"));
        let cmd = config.renderer.command.unwrap();
        assert_eq!(cmd.program, "flatpak");
        assert_eq!(cmd.args, vec!["run", "org.openscad.OpenSCAD"]);
    }

    #[test]
    fn test_partial_positionals_keep_defaults() {
        let args = CliArgs::parse_from(["img2scad", "photos"]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);

        assert_eq!(config.paths.image_dir, PathBuf::from("photos"));
        assert_eq!(config.paths.scad_dir, PathBuf::from("scad"));
        assert_eq!(config.paths.stl_dir, PathBuf::from("stl"));
        assert!(config.renderer.command.is_none());
    }

    #[test]
    fn test_flag_overrides() {
        let args = CliArgs::parse_from([
            "img2scad",
            "--diameter",
            "100",
            "--grid",
            "1",
            "--timeout-minutes",
            "5",
            "--log-level",
            "debug",
        ]);
        let mut config = Config::default();
        config.apply_cli_overrides(&args);

        assert_eq!(config.mesh.diameter, 100.0);
        assert_eq!(config.mesh.grid, 1);
        assert!((config.mesh.effective_depth() - 4.0).abs() < 1e-12);
        assert_eq!(config.renderer.timeout_minutes, 5);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.output.precision, 5);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }
}
