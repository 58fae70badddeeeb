//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level converter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Input and output directories.
    pub paths: PathsConfig,
    /// Sphere geometry and sampling settings.
    pub mesh: MeshConfig,
    /// Mesh description output settings.
    pub output: OutputConfig,
    /// External renderer settings.
    pub renderer: RendererConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Directories the batch reads from and writes into. All must already exist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory walked recursively for source images.
    pub image_dir: PathBuf,
    /// Directory receiving `.scad-prefix` mesh descriptions (and `.scad` wrappers).
    pub scad_dir: PathBuf,
    /// Directory receiving rendered `.stl` files.
    pub stl_dir: PathBuf,
}

/// Sphere geometry configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeshConfig {
    /// Diameter of the undisplaced sphere.
    pub diameter: f64,
    /// Radial displacement at full brightness. `None` means 4% of the diameter.
    pub depth: Option<f64>,
    /// Decimation block size in pixels; 1 disables averaging.
    pub grid: u32,
}

/// Mesh description output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Maximum fractional digits written per coordinate.
    pub precision: u32,
    /// Generate a `.scad` wrapper calling `body()` when none exists yet.
    pub write_wrapper: bool,
}

/// External renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RendererConfig {
    /// Command used to turn a `.scad` file into an `.stl`. Rendering is skipped when unset.
    pub command: Option<RendererCommand>,
    /// How long to wait for a single render before killing it.
    pub timeout_minutes: u64,
}

/// An external program plus its leading arguments.
///
/// The input and output paths are appended at invocation time as
/// `<input> -o <output>`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RendererCommand {
    /// Executable name or path.
    pub program: String,
    /// Arguments passed before the input path.
    #[serde(default)]
    pub args: Vec<String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Directory for JSON log files. No file logging when unset.
    pub log_dir: Option<PathBuf>,
}

impl MeshConfig {
    /// Depth after applying the diameter-relative default.
    pub fn effective_depth(&self) -> f64 {
        self.depth.unwrap_or(self.diameter * 0.04)
    }
}

impl RendererCommand {
    /// Split a command line on whitespace into program and arguments.
    ///
    /// Quoting is not supported. Returns `None` for a blank string.
    pub fn parse(command: &str) -> Option<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

// --- Default implementations ---

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from("jpg"),
            scad_dir: PathBuf::from("scad"),
            stl_dir: PathBuf::from("stl"),
        }
    }
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            diameter: 180.0,
            depth: None,
            grid: 2,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: 5,
            write_wrapper: false,
        }
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_minutes: 60,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from a RON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save config as pretty RON, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(path, serialized).map_err(|source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        })
    }
}
