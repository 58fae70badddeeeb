//! Configuration system for img2scad.
//!
//! Settings persist as RON files and can be overridden from the command line.
//! Every section is forward/backward compatible: missing fields fall back to
//! their defaults and unknown fields are ignored.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DebugConfig, MeshConfig, OutputConfig, PathsConfig, RendererCommand, RendererConfig,
};
pub use error::ConfigError;
