use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use tracing::warn;

/// Placeholder secret used when none is configured. Fine for local
/// development, never for a real deployment.
pub const DEV_JWT_SECRET: &str = "dev-secret-change-me";

pub struct Config {
    pub jwt_secret: String,
    pub data_dir: PathBuf,
    pub addr: SocketAddr,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let jwt_secret =
            std::env::var("PINBOARD_JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.into());
        if jwt_secret == DEV_JWT_SECRET {
            warn!("PINBOARD_JWT_SECRET is unset; using the development placeholder secret");
        }

        let data_dir: PathBuf = std::env::var("PINBOARD_DATA_DIR")
            .unwrap_or_else(|_| "./data".into())
            .into();
        let host = std::env::var("PINBOARD_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = std::env::var("PINBOARD_PORT")
            .unwrap_or_else(|_| "5000".into())
            .parse()
            .context("PINBOARD_PORT must be a port number")?;
        let token_ttl_secs: i64 = std::env::var("PINBOARD_TOKEN_TTL_SECS")
            .unwrap_or_else(|_| pinboard_api::session::DEFAULT_TTL_SECS.to_string())
            .parse()
            .context("PINBOARD_TOKEN_TTL_SECS must be an integer")?;
        anyhow::ensure!(token_ttl_secs > 0, "PINBOARD_TOKEN_TTL_SECS must be positive");

        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .context("PINBOARD_HOST/PINBOARD_PORT do not form a socket address")?;

        Ok(Self {
            jwt_secret,
            data_dir,
            addr,
            token_ttl_secs,
        })
    }
}
