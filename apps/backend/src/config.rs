//! Process configuration read from the environment (and `.env`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub kid_catalog_path: PathBuf,
    pub adult_catalog_path: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let host = std::env::var("HOST")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)));

        let port = std::env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let kid_catalog_path = std::env::var("KID_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path("kid_words.json"));

        let adult_catalog_path = std::env::var("ADULT_CATALOG_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_path("adult_words.json"));

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            database_url,
            host,
            port,
            kid_catalog_path,
            adult_catalog_path,
            log_level,
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Bundled catalog file shipped with the crate.
pub fn default_data_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data").join(file)
}
