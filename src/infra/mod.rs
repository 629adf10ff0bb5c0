//! Infrastructure
//!
//! - `config` - TOML configuration loading

pub mod config;

pub use config::Config;
