//! Configuration module for Linklens
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use linklens::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("linklens.toml")).unwrap();
//! println!("Request timeout: {}s", config.http.request_timeout);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{AnalyzerConfig, Config, HttpConfig, TitleScope};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;
