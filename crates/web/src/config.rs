use std::time::Duration;

use anyhow::{Context, Result, bail};

const DEFAULT_ACCESS_TOKEN_TTL_SECS: u64 = 5 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECS: u64 = 24 * 60 * 60;
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let jwt_secret = std::env::var("JWT_SECRET").context("Cannot load JWT_SECRET env variable")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 bytes long");
        }

        let access_token_ttl = optional_env("ACCESS_TOKEN_TTL_SECS")?
            .unwrap_or(DEFAULT_ACCESS_TOKEN_TTL_SECS);
        let refresh_token_ttl = optional_env("REFRESH_TOKEN_TTL_SECS")?
            .unwrap_or(DEFAULT_REFRESH_TOKEN_TTL_SECS);
        if refresh_token_ttl <= access_token_ttl {
            bail!("REFRESH_TOKEN_TTL_SECS must be greater than ACCESS_TOKEN_TTL_SECS");
        }

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            database_max_connections: optional_env("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            jwt_secret,
            access_token_ttl: Duration::from_secs(access_token_ttl),
            refresh_token_ttl: Duration::from_secs(refresh_token_ttl),
        })
    }
}

fn optional_env<T>(key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a number", key)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Cannot load {} env variable", key)),
    }
}
