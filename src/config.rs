use std::env;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

use crate::auth::{password, AdminCredentials, TokenKeys};

/// Configuration problems detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

/// Connection settings for PostgreSQL.
///
/// `url` (from `DATABASE_URL`) takes precedence over the individual parts.
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
}

impl DatabaseConfig {
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        match &self.url {
            Some(url) => url.parse().map_err(|_| ConfigError::Invalid {
                name: "DATABASE_URL",
                value: url.clone(),
            }),
            None => Ok(PgConnectOptions::new()
                .host(&self.host)
                .port(self.port)
                .username(&self.user)
                .password(&self.password)
                .database(&self.name)),
        }
    }
}

pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    /// Declared for deployment parity; no route consumes it.
    pub api_key: Option<String>,
    pub bcrypt_cost: u32,
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub jwt_secret: Option<String>,
    pub require_token: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let bcrypt_cost = parse_or(&get, "BCRYPT_COST", password::DEFAULT_COST)?;
        if !(password::MIN_COST..=password::MAX_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(Self {
            server: ServerConfig {
                host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&get, "PORT", 5000)?,
            },
            database: DatabaseConfig {
                url: get("DATABASE_URL"),
                host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
                port: parse_or(&get, "DB_PORT", 5432)?,
                user: get("DB_USER").unwrap_or_else(|| "your_username".to_string()),
                password: get("DB_PASSWORD").unwrap_or_else(|| "your_password".to_string()),
                name: get("DB_NAME").unwrap_or_else(|| "todoapp".to_string()),
                max_connections: parse_or(&get, "DB_MAX_CONNECTIONS", 10)?,
            },
            api_key: get("API_KEY"),
            bcrypt_cost,
            admin_username: get("ADMIN_USERNAME"),
            admin_password: get("ADMIN_PASSWORD"),
            jwt_secret: get("JWT_SECRET"),
            require_token: parse_flag(&get, "REQUIRE_TOKEN")?,
        })
    }

    /// Admin login pair; required by the task service only.
    pub fn admin_credentials(&self) -> Result<AdminCredentials, ConfigError> {
        let username = self
            .admin_username
            .as_deref()
            .ok_or(ConfigError::Missing("ADMIN_USERNAME"))?;
        let password = self
            .admin_password
            .as_deref()
            .ok_or(ConfigError::Missing("ADMIN_PASSWORD"))?;
        Ok(AdminCredentials::new(username, password))
    }

    pub fn token_keys(&self) -> Result<TokenKeys, ConfigError> {
        self.jwt_secret
            .as_deref()
            .map(TokenKeys::new)
            .ok_or(ConfigError::Missing("JWT_SECRET"))
    }
}

fn parse_or<G, T>(get: &G, name: &'static str, default: T) -> Result<T, ConfigError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match get(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

fn parse_flag<G>(get: &G, name: &'static str) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        None => Ok(false),
        Some(value) => match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid { name, value }),
        },
    }
}
