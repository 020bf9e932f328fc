use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

/// Which repository backend the application wires at startup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    /// Persistent SQLite store
    Sqlite,
    /// In-memory reference implementation
    Memory,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_path: PathBuf,
    pub pool_size: u32,
    pub storage: StorageBackend,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "8080".to_string()).parse().context("PORT")?;

        let database_path =
            std::env::var("DATABASE_PATH").unwrap_or_else(|_| "filmorate.db".to_string());

        let pool_size: u32 =
            std::env::var("POOL_SIZE").ok().and_then(|s| s.parse().ok()).unwrap_or(15);

        let storage = match std::env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "sqlite".to_string())
            .as_str()
        {
            "sqlite" => StorageBackend::Sqlite,
            "memory" => StorageBackend::Memory,
            other => anyhow::bail!("Unknown STORAGE_BACKEND: {}", other),
        };

        Ok(Self {
            addr: format!("{}:{}", host, port).parse().context("HOST/PORT")?,
            database_path: PathBuf::from(database_path),
            pool_size,
            storage,
        })
    }
}
