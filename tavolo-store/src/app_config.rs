use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BusinessRules {
    #[serde(default = "default_rate_limit")]
    pub rate_limit_per_minute: i64,
    #[serde(default = "default_max_party_size")]
    pub max_party_size: i32,
    #[serde(default = "default_sweep_seconds")]
    pub expiry_sweep_seconds: u64,
}

fn default_rate_limit() -> i64 {
    100
}
fn default_max_party_size() -> i32 {
    20
}
fn default_sweep_seconds() -> u64 {
    300
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_expiration_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// Rate limiting is skipped entirely when no Redis URL is configured.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RedisConfig {
    pub url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Add in the current environment file
            // Default to 'development' env
            // Note that this file is _optional_
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add in a local configuration file
            // This file shouldn't be checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Add in settings from the environment (with a prefix of TAVOLO)
            // Eg.. `TAVOLO__SERVER__PORT=8081` would set the server port
            .add_source(config::Environment::with_prefix("TAVOLO").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
