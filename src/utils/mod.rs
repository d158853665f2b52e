//! Configuration utilities.

/// TOML configuration loading, env overrides and validation.
pub mod toml_config;
