use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;

/// Longest access-token lifetime accepted from the environment (one year).
pub const MAX_JWT_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(get: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt = JwtConfig {
            secret: get("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: get("JWT_ISSUER").unwrap_or_else(|| "bookmark-api".into()),
            audience: get("JWT_AUDIENCE").unwrap_or_else(|| "bookmark-api-users".into()),
            ttl_minutes: get("JWT_TTL_MINUTES")
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(15)
                .clamp(1, MAX_JWT_TTL_MINUTES),
        };
        Ok(Self {
            database_url,
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: get("APP_PORT")
                .and_then(|v| v.parse::<u16>().ok())
                .unwrap_or(8080),
            jwt,
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}
