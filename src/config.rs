//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use crate::domain::{GeoCoordinate, ReadinessPolicy, DEFAULT_READY_THRESHOLD};
use crate::protocol::DEFAULT_DEPOT;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL
    pub database_url: String,

    /// Maximum database connections in pool
    pub database_max_connections: u32,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Environment (development, production)
    pub environment: String,

    /// Fill ratio from which a container must be collected
    pub ready_threshold: f64,

    /// Where every circuit starts and ends
    pub depot: GeoCoordinate,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnv("DATABASE_URL"))?;

        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 10)?;

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = parse_or("PORT", 3000)?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let ready_threshold = parse_or("READY_THRESHOLD", DEFAULT_READY_THRESHOLD)?;
        ReadinessPolicy::new(ready_threshold)
            .map_err(|_| ConfigError::InvalidValue("READY_THRESHOLD"))?;

        let depot = GeoCoordinate::new(
            parse_or("DEPOT_LATITUDE", DEFAULT_DEPOT.latitude())?,
            parse_or("DEPOT_LONGITUDE", DEFAULT_DEPOT.longitude())?,
        );

        Ok(Self {
            database_url,
            database_max_connections,
            host,
            port,
            environment,
            ready_threshold,
            depot,
        })
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Readiness policy built from the configured threshold
    pub fn readiness_policy(&self) -> Result<ReadinessPolicy, ConfigError> {
        ReadinessPolicy::new(self.ready_threshold)
            .map_err(|_| ConfigError::InvalidValue("READY_THRESHOLD"))
    }
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue(key)),
        Err(_) => Ok(default),
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
