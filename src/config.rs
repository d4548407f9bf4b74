use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use regex::Regex;
use tracing::debug;

use crate::error::ConfigError;

/// Process-wide settings. Loaded once in `main`, then shared read-only.
#[derive(Clone, Deserialize)]
pub struct Config {
    pub vision_key: String,
    pub translator_key: String,
    #[serde(default)]
    pub system_config: SystemConfig,
    #[serde(default)]
    pub service_config: ServiceConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SystemConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Request body cap in bytes. `None` leaves uploads unbounded.
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_vision_base_url")]
    pub vision_base_url: String,
    #[serde(default = "default_translator_base_url")]
    pub translator_base_url: String,
    /// Caption text used when a translation fails.
    #[serde(default = "default_translation_fallback")]
    pub translation_fallback: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "templates".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_vision_base_url() -> String {
    "https://koreacentral.api.cognitive.microsoft.com".to_string()
}

fn default_translator_base_url() -> String {
    "https://api.cognitive.microsofttranslator.com".to_string()
}

fn default_translation_fallback() -> String {
    "번역 에러".to_string()
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: None,
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            vision_base_url: default_vision_base_url(),
            translator_base_url: default_translator_base_url(),
            translation_fallback: default_translation_fallback(),
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("vision_key", &"<redacted>")
            .field("translator_key", &"<redacted>")
            .field("system_config", &self.system_config)
            .field("service_config", &self.service_config)
            .finish()
    }
}

/// Fallback locations tried when `CONFIG_PATH` is not set.
pub const DEFAULT_PATHS: &[&str] = &["config.json", "../metadata/config.json"];

/// Load the startup config.
///
/// An `explicit` path must load. Otherwise `fallbacks` are tried in order;
/// absent files are skipped, but one that exists and fails to load is fatal.
pub fn load_first(
    explicit: Option<&str>,
    fallbacks: &[&str],
) -> Result<(Config, String), ConfigError> {
    if let Some(path) = explicit {
        return Ok((Config::load(path)?, path.to_string()));
    }

    for path in fallbacks {
        match Config::load(path) {
            Ok(config) => return Ok((config, path.to_string())),
            Err(ConfigError::Read { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                debug!("No config at {}", path);
            }
            Err(e) => return Err(e),
        }
    }

    Err(ConfigError::NotFound(
        fallbacks.iter().map(|p| p.to_string()).collect(),
    ))
}

impl Config {
    /// Load and validate a config file. JSON unless the extension says YAML.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let bytes = fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_string(),
            source,
        })?;
        let content = substitute_env_vars(&decode_utf8(&bytes))?;

        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());
        let config: Config = match extension.as_deref() {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_key("vision_key", &self.vision_key)?;
        validate_key("translator_key", &self.translator_key)?;
        if self.system_config.port == 0 {
            return Err(ConfigError::Validation(
                "system_config.port must be > 0".into(),
            ));
        }
        if self.system_config.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "system_config.request_timeout_secs must be > 0".into(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.system_config.request_timeout_secs)
    }
}

/// A key that is blank or still holds a `${VAR}` reference (unset variable)
/// would only fail on the first upstream call.
fn validate_key(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{name} must not be empty")));
    }
    if value.contains("${") {
        return Err(ConfigError::Validation(format!(
            "{name} references an unset environment variable: {value}"
        )));
    }
    Ok(())
}

/// UTF-8 decode, dropping a leading BOM.
fn decode_utf8(bytes: &[u8]) -> String {
    let (cow, _) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    cow.into_owned()
}

/// Replace `${VAR}` with the environment value. Unknown names are left as-is.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
    let pattern = Regex::new(r"\$\{(\w+)\}")
        .map_err(|e| ConfigError::Validation(format!("bad substitution pattern: {e}")))?;
    let replaced = pattern.replace_all(content, |caps: &regex::Captures| {
        std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
    });
    Ok(replaced.into_owned())
}
