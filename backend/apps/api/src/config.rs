//! Server configuration
//!
//! Everything is read from the environment (a `.env` file is loaded first).
//! Secrets are base64 encoded.

use std::env;
use std::net::SocketAddr;

use anyhow::{Context, bail};
use auth::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose;
use content::ContentConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Shortest accepted token signing key, in bytes
const MIN_SIGNING_KEY_LENGTH: usize = 32;

#[derive(Debug)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
    pub content: ContentConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let database_max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid DATABASE_MAX_CONNECTIONS: {}", raw))?,
            Err(_) => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("Invalid BIND_ADDR")?;

        let frontend_origins = parse_origins(
            &env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string()),
        );

        Ok(Self {
            database_url,
            database_max_connections,
            bind_addr,
            frontend_origins,
            auth: auth_config()?,
            content: content_config()?,
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("JWT_SIGNING_KEY") {
        Ok(encoded) => AuthConfig {
            token_secret: Some(signing_key(&encoded)?),
            ..AuthConfig::default()
        },
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SIGNING_KEY not set, tokens will not survive a restart");
            AuthConfig::development()
        }
        Err(_) => bail!("JWT_SIGNING_KEY must be set in production"),
    };

    if let Ok(encoded) = env::var("PASSWORD_PEPPER") {
        config.password_pepper = Some(
            general_purpose::STANDARD
                .decode(encoded.trim())
                .context("PASSWORD_PEPPER must be base64")?,
        );
    }

    Ok(config)
}

fn content_config() -> anyhow::Result<ContentConfig> {
    let mut config = ContentConfig::default();
    if let Ok(raw) = env::var("MAX_PAGE_SIZE") {
        config.max_page_size = raw
            .parse()
            .with_context(|| format!("Invalid MAX_PAGE_SIZE: {}", raw))?;
    }
    if config.default_page_size > config.max_page_size {
        config.default_page_size = config.max_page_size;
    }
    if config.max_page_size == 0 {
        bail!("MAX_PAGE_SIZE must be at least 1");
    }
    Ok(config)
}

fn signing_key(encoded: &str) -> anyhow::Result<Vec<u8>> {
    let key = general_purpose::STANDARD
        .decode(encoded.trim())
        .context("JWT_SIGNING_KEY must be base64")?;
    if key.len() < MIN_SIGNING_KEY_LENGTH {
        bail!(
            "JWT_SIGNING_KEY must decode to at least {} bytes",
            MIN_SIGNING_KEY_LENGTH
        );
    }
    Ok(key)
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn test_signing_key_length() {
        let short = general_purpose::STANDARD.encode([7u8; 16]);
        assert!(signing_key(&short).is_err());

        let long = general_purpose::STANDARD.encode([7u8; 32]);
        assert_eq!(signing_key(&long).unwrap().len(), 32);

        assert!(signing_key("not base64!").is_err());
    }
}
