//! Server configuration read from the process environment (`.env` included)

use std::env;

use anyhow::{Context, bail};
use auth::{AuthConfig, Environment};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "https://soldbyghost.com,http://localhost:3000";

pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment: Environment = optional("ENV")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let token_secret = optional("TOKEN_SECRET").context("TOKEN_SECRET must be set")?;
        let cookie_domain = optional("COOKIE_DOMAIN");
        let pepper = optional("PASSWORD_PEPPER").map(String::into_bytes);

        let auth = AuthConfig::for_environment(environment, token_secret.into_bytes(), cookie_domain)
            .context("Invalid auth configuration")?
            .with_pepper(pepper);

        let port = match optional("PORT") {
            Some(v) => v.parse().with_context(|| format!("PORT is not a port number: {v}"))?,
            None => DEFAULT_PORT,
        };

        let database_url = optional("DATABASE_URL").context("DATABASE_URL must be set")?;

        let database_max_connections = match optional("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {v}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if database_max_connections == 0 {
            bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        let frontend_origins = optional("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            port,
            database_url,
            database_max_connections,
            frontend_origins,
            auth,
        })
    }
}

/// Set and non-blank
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
