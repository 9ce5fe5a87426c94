//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `GLOSAURUS_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CORS_ORIGINS, DEFAULT_EMBED_CACHE_CAPACITY, DEFAULT_GENERATOR_MAX_TOKENS,
    DEFAULT_GENERATOR_MODEL, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT_SECS,
};
use crate::suggest::SuggestionStrategy;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `GLOSAURUS_*` overrides on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Sentence embedding model directory. Unset runs the stub embedder.
    pub model_dir: Option<PathBuf>,

    /// ReSyf JSON export. Unset serves an empty lexicon.
    pub lexicon_path: Option<PathBuf>,

    /// Candidate source. Default: lexicon.
    pub strategy: SuggestionStrategy,

    /// Text generation model. Default: `qwen3:0.6b`.
    pub generator_model: String,

    /// Token budget per generation. Default: `300`.
    pub generator_max_tokens: u32,

    /// Pull the generator model through the local runtime at startup.
    pub pull_model: bool,

    /// Allowed CORS origins; `["*"]` allows any.
    pub cors_origins: Vec<String>,

    /// Cached embeddings; `0` disables the cache. Default: `10_000`.
    pub embed_cache_capacity: u64,

    /// Per-request timeout. Default: 30s.
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
            model_dir: None,
            lexicon_path: None,
            strategy: SuggestionStrategy::default(),
            generator_model: DEFAULT_GENERATOR_MODEL.to_string(),
            generator_max_tokens: DEFAULT_GENERATOR_MAX_TOKENS,
            pull_model: false,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            embed_cache_capacity: DEFAULT_EMBED_CACHE_CAPACITY,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "GLOSAURUS_PORT";
    const ENV_BIND_ADDR: &'static str = "GLOSAURUS_BIND_ADDR";
    const ENV_MODEL_DIR: &'static str = "GLOSAURUS_MODEL_DIR";
    const ENV_LEXICON_PATH: &'static str = "GLOSAURUS_LEXICON_PATH";
    const ENV_STRATEGY: &'static str = "GLOSAURUS_STRATEGY";
    const ENV_GENERATOR_MODEL: &'static str = "GLOSAURUS_GENERATOR_MODEL";
    const ENV_GENERATOR_MAX_TOKENS: &'static str = "GLOSAURUS_GENERATOR_MAX_TOKENS";
    const ENV_PULL_MODEL: &'static str = "GLOSAURUS_PULL_MODEL";
    const ENV_CORS_ORIGINS: &'static str = "GLOSAURUS_CORS_ORIGINS";
    const ENV_EMBED_CACHE_CAPACITY: &'static str = "GLOSAURUS_EMBED_CACHE_CAPACITY";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "GLOSAURUS_REQUEST_TIMEOUT_SECS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let model_dir = Self::parse_optional_path_from_env(Self::ENV_MODEL_DIR);
        let lexicon_path = Self::parse_optional_path_from_env(Self::ENV_LEXICON_PATH);
        let strategy = Self::parse_strategy_from_env(defaults.strategy)?;
        let generator_model =
            Self::parse_string_from_env(Self::ENV_GENERATOR_MODEL, defaults.generator_model);
        let generator_max_tokens = Self::parse_u64_from_env(
            Self::ENV_GENERATOR_MAX_TOKENS,
            u64::from(defaults.generator_max_tokens),
        )
        .try_into()
        .unwrap_or(defaults.generator_max_tokens);
        let pull_model = Self::parse_bool_from_env(Self::ENV_PULL_MODEL, defaults.pull_model);
        let cors_origins = Self::parse_list_from_env(Self::ENV_CORS_ORIGINS, defaults.cors_origins);
        let embed_cache_capacity =
            Self::parse_u64_from_env(Self::ENV_EMBED_CACHE_CAPACITY, defaults.embed_cache_capacity);
        let request_timeout = Duration::from_secs(Self::parse_u64_from_env(
            Self::ENV_REQUEST_TIMEOUT_SECS,
            defaults.request_timeout.as_secs(),
        ));

        Ok(Self {
            port,
            bind_addr,
            model_dir,
            lexicon_path,
            strategy,
            generator_model,
            generator_max_tokens,
            pull_model,
            cors_origins,
            embed_cache_capacity,
            request_timeout,
        })
    }

    /// Validates paths and basic invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref path) = self.model_dir {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        if let Some(ref path) = self.lexicon_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_file() {
                return Err(ConfigError::NotAFile { path: path.clone() });
            }
        }

        if self.generator_model.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_GENERATOR_MODEL,
                value: self.generator_model.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                name: Self::ENV_REQUEST_TIMEOUT_SECS,
                value: "0".to_string(),
                reason: "must be at least one second".to_string(),
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// `true` when any origin is allowed.
    pub fn cors_allows_any(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_strategy_from_env(
        default: SuggestionStrategy,
    ) -> Result<SuggestionStrategy, ConfigError> {
        match env::var(Self::ENV_STRATEGY) {
            Ok(value) if !value.trim().is_empty() => {
                value
                    .parse()
                    .map_err(|reason| ConfigError::InvalidValue {
                        name: Self::ENV_STRATEGY,
                        value,
                        reason,
                    })
            }
            _ => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name).unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn parse_bool_from_env(var_name: &str, default: bool) -> bool {
        match env::var(var_name) {
            Ok(v) => matches!(
                v.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            ),
            Err(_) => default,
        }
    }

    fn parse_list_from_env(var_name: &str, default: Vec<String>) -> Vec<String> {
        match env::var(var_name) {
            Ok(v) => v
                .split(',')
                .map(|item| item.trim().to_string())
                .filter(|item| !item.is_empty())
                .collect(),
            Err(_) => default,
        }
    }
}
