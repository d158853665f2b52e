//! TOML-based configuration for the ROC weather services
//!
//! Configuration comes from an optional `roc.toml` file, then the process
//! environment (after `.env` is loaded) overrides the peer URLs and region.
//! Agent identifiers are referenced indirectly through env-var names.
//!
//! The configuration is read once at startup and shared behind an `Arc`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Env var overriding `bridge.weather_url`
pub const WEATHER_URL_ENV: &str = "MCP_WEATHER_URL";
/// Env var overriding `frontend.bridge_url`
pub const BRIDGE_URL_ENV: &str = "ROC_HANDLER_URL";
/// Env var overriding `agent.region`
pub const REGION_ENV: &str = "AWS_REGION";

/// Root configuration structure loaded from roc.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RocConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub weather: WeatherConfig,

    #[serde(default)]
    pub bridge: BridgeConfig,

    #[serde(default)]
    pub frontend: FrontendConfig,

    #[serde(default)]
    pub agent: AgentConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// ============= Weather Endpoint Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_port")]
    pub port: u16,

    /// Extra source identifiers, each bound to a provider implementation
    #[serde(default)]
    pub sources: BTreeMap<String, SourceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Provider implementation name (e.g. "mock")
    pub kind: String,
}

fn default_weather_port() -> u16 {
    8003
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            port: default_weather_port(),
            sources: BTreeMap::new(),
        }
    }
}

// ============= Invocation Bridge Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    #[serde(default = "default_bridge_port")]
    pub port: u16,

    /// Base URL of the weather endpoint
    #[serde(default = "default_weather_url")]
    pub weather_url: String,
}

fn default_bridge_port() -> u16 {
    8002
}

fn default_weather_url() -> String {
    "http://localhost:8003".to_string()
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            port: default_bridge_port(),
            weather_url: default_weather_url(),
        }
    }
}

// ============= Frontend (Orchestrator) Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_frontend_port")]
    pub port: u16,

    /// Base URL of the invocation bridge
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,
}

fn default_frontend_port() -> u16 {
    8000
}

fn default_bridge_url() -> String {
    "http://localhost:8002".to_string()
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            port: default_frontend_port(),
            bridge_url: default_bridge_url(),
        }
    }
}

// ============= Agent Runtime Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default)]
    pub runtime: RuntimeKind,

    #[serde(default = "default_region")]
    pub region: String,

    /// Environment variable name containing the agent identifier
    #[serde(default = "default_agent_id_env")]
    pub agent_id_env: String,

    /// Environment variable name containing the agent alias identifier
    #[serde(default = "default_agent_alias_id_env")]
    pub agent_alias_id_env: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeKind {
    #[default]
    Bedrock,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_agent_id_env() -> String {
    "BEDROCK_AGENT_ID".to_string()
}

fn default_agent_alias_id_env() -> String {
    "BEDROCK_AGENT_ALIAS_ID".to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeKind::default(),
            region: default_region(),
            agent_id_env: default_agent_id_env(),
            agent_alias_id_env: default_agent_alias_id_env(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl RocConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: RocConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Load the file when present, fall back to defaults otherwise, then apply
    /// environment overrides and validate
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Self::load(path)?
        } else {
            tracing::info!("No configuration file at {:?}, using defaults", path);
            Self::default()
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Override peer URLs and region from the environment
    pub fn apply_env_overrides(&mut self) {
        if let Some(url) = non_empty_env(WEATHER_URL_ENV) {
            self.bridge.weather_url = url;
        }
        if let Some(url) = non_empty_env(BRIDGE_URL_ENV) {
            self.frontend.bridge_url = url;
        }
        if let Some(region) = non_empty_env(REGION_ENV) {
            self.agent.region = region;
        }
    }

    /// Validate the configuration for internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bridge.weather_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "bridge.weather_url must not be empty".to_string(),
            ));
        }
        if self.frontend.bridge_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "frontend.bridge_url must not be empty".to_string(),
            ));
        }

        let mut ports = HashSet::new();
        for (name, port) in [
            ("weather", self.weather.port),
            ("bridge", self.bridge.port),
            ("frontend", self.frontend.port),
        ] {
            if !ports.insert(port) {
                return Err(ConfigError::ValidationError(format!(
                    "{}.port {} is already used by another service",
                    name, port
                )));
            }
        }

        for (id, source) in &self.weather.sources {
            if id.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "weather source identifiers must not be empty".to_string(),
                ));
            }
            source
                .kind
                .parse::<crate::weather::ProviderKind>()
                .map_err(|e| {
                    ConfigError::ValidationError(format!("weather.sources.{}: {}", id, e))
                })?;
        }

        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        non_empty_env(env_name)
    }

    /// Get the agent identifier from the environment
    pub fn agent_id(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.agent.agent_id_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.agent.agent_id_env.clone()))
    }

    /// Get the agent alias identifier from the environment
    pub fn agent_alias_id(&self) -> Result<String, ConfigError> {
        self.resolve_env(&self.agent.agent_alias_id_env)
            .ok_or_else(|| ConfigError::MissingEnvVar(self.agent.agent_alias_id_env.clone()))
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config() -> String {
        r#"
[server]
host = "0.0.0.0"
log_level = "debug"
log_format = "json"

[weather]
port = 9003

[weather.sources.demo]
kind = "mock"

[bridge]
port = 9002
weather_url = "http://weather.internal:9003"

[frontend]
port = 9000
bridge_url = "http://bridge.internal:9002"

[agent]
runtime = "bedrock"
region = "ap-northeast-1"
agent_id_env = "TEST_AGENT_ID"
agent_alias_id_env = "TEST_AGENT_ALIAS_ID"
"#
        .to_string()
    }

    #[test]
    fn test_parse_config() {
        let config: RocConfig = toml::from_str(&create_test_config()).unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.weather.port, 9003);
        assert_eq!(config.weather.sources["demo"].kind, "mock");
        assert_eq!(config.bridge.weather_url, "http://weather.internal:9003");
        assert_eq!(config.frontend.bridge_url, "http://bridge.internal:9002");
        assert_eq!(config.agent.region, "ap-northeast-1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config: RocConfig = toml::from_str("").unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.weather.port, 8003);
        assert_eq!(config.bridge.port, 8002);
        assert_eq!(config.bridge.weather_url, "http://localhost:8003");
        assert_eq!(config.frontend.port, 8000);
        assert_eq!(config.frontend.bridge_url, "http://localhost:8002");
        assert_eq!(config.agent.runtime, RuntimeKind::Bedrock);
        assert_eq!(config.agent.region, "us-east-1");
        assert_eq!(config.agent.agent_id_env, "BEDROCK_AGENT_ID");
        assert_eq!(config.agent.agent_alias_id_env, "BEDROCK_AGENT_ALIAS_ID");
    }

    #[test]
    fn test_validation_unknown_source_kind() {
        let content = r#"
[weather.sources.radar]
kind = "doppler"
"#;
        let config: RocConfig = toml::from_str(content).unwrap();
        let result = config.validate();
        assert!(matches!(result, Err(ConfigError::ValidationError(msg)) if msg.contains("radar")));
    }

    #[test]
    fn test_validation_duplicate_ports() {
        let content = r#"
[weather]
port = 8000
"#;
        let config: RocConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validation_empty_peer_url() {
        let content = r#"
[bridge]
weather_url = "  "
"#;
        let config: RocConfig = toml::from_str(content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let result = RocConfig::load("definitely-not-here.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roc.toml");
        std::fs::write(&path, create_test_config()).unwrap();

        let config = RocConfig::load(&path).unwrap();
        assert_eq!(config.weather.port, 9003);
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roc.toml");
        std::fs::write(&path, "[weather\nport = ").unwrap();

        assert!(matches!(
            RocConfig::load(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_missing_agent_id_env() {
        let mut config = RocConfig::default();
        config.agent.agent_id_env = "ROC_TEST_UNSET_AGENT_ID".to_string();

        match config.agent_id() {
            Err(ConfigError::MissingEnvVar(name)) => assert_eq!(name, "ROC_TEST_UNSET_AGENT_ID"),
            other => panic!("expected MissingEnvVar, got {:?}", other),
        }
    }

    #[test]
    fn test_agent_ids_resolved_from_env() {
        // SAFETY: the variable names are unique to this test
        unsafe {
            std::env::set_var("ROC_TEST_AGENT_ID", "AGENT123");
            std::env::set_var("ROC_TEST_AGENT_ALIAS_ID", "ALIAS456");
        }

        let mut config = RocConfig::default();
        config.agent.agent_id_env = "ROC_TEST_AGENT_ID".to_string();
        config.agent.agent_alias_id_env = "ROC_TEST_AGENT_ALIAS_ID".to_string();

        assert_eq!(config.agent_id().unwrap(), "AGENT123");
        assert_eq!(config.agent_alias_id().unwrap(), "ALIAS456");
    }
}
