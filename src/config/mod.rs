//! Configuration loading and management for the Payroll Engine.
//!
//! This module provides the payroll [`Settings`] value and the loader that
//! reads it from a YAML file. Settings are always passed explicitly into the
//! calculation functions; nothing in the engine reads a global.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Daily hours: {}", config.settings().daily_standard_hours);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, SETTINGS_FILE_NAME};
pub use types::Settings;
