//! Configuration loading and management for the Attendance Engine.
//!
//! This module loads the engine settings (default wage, local calendar
//! offset, history window, export patterns and server address) from a YAML
//! file.
//!
//! # Example
//!
//! ```no_run
//! use attendance_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/attendance.yaml").unwrap();
//! println!("Listening on {}", config.bind_address());
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{BootstrapAdmin, EngineConfig, ExportConfig, ServerConfig};
