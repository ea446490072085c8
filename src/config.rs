use std::net::SocketAddr;

use anyhow::Context;

pub const DEFAULT_SECRET_KEY: &str = "dev";

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub secret_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(env_var)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let addr = listen_addr(&lookup)?;

        let database_url =
            lookup("DATABASE_URL").unwrap_or_else(|| "sqlite://data.db?mode=rwc".to_string());

        let secret_key = match lookup("SECRET_KEY") {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!("SECRET_KEY not set, flash cookies are signed with the dev key");
                DEFAULT_SECRET_KEY.to_string()
            }
        };

        Ok(Self { addr, database_url, secret_key })
    }
}

/// `HOST`/`PORT` only, for binaries that need nothing else.
pub fn addr_from_env() -> anyhow::Result<SocketAddr> {
    dotenvy::dotenv().ok();
    listen_addr(&env_var)
}

fn listen_addr(lookup: &impl Fn(&str) -> Option<String>) -> anyhow::Result<SocketAddr> {
    let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
    let port: u16 = lookup("PORT").unwrap_or_else(|| "5000".to_string()).parse().context("PORT")?;
    format!("{host}:{port}").parse().context("HOST/PORT")
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}
