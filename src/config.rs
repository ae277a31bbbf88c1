use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use dotenvy::dotenv;

/// Which storage adapter backs the message log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    Sqlite,
    Memory,
}

/// Runtime configuration, read once from the environment at startup.
/// A `.env` file in the working directory is honored.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub database_url: String,
    pub store_mode: StoreMode,
    pub allowed_origin: String,
    pub listen_addr: SocketAddr,
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

impl Config {
    pub fn from_env() -> Result<Config> {
        dotenv().ok();

        let store_mode = match env_or("CHAT_STORE", "sqlite").as_str() {
            "sqlite" => StoreMode::Sqlite,
            "memory" => StoreMode::Memory,
            other => bail!("unsupported CHAT_STORE value: {other}"),
        };
        let listen_addr = env_or("LISTEN_ADDR", "0.0.0.0:8000")
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        Ok(Config {
            api_key: env_or("OPENAI_API_KEY", ""),
            api_base: env_or("OPENAI_API_URL", "http://0.0.0.0:1234/v1"),
            database_url: env_or("DATABASE_URL", "chat.db"),
            store_mode,
            allowed_origin: env_or("ALLOWED_ORIGIN", "http://localhost:3000"),
            listen_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test so nothing else races on the process environment.
    #[test]
    fn from_env_reads_store_mode_and_defaults() {
        for key in [
            "OPENAI_API_KEY",
            "OPENAI_API_URL",
            "DATABASE_URL",
            "CHAT_STORE",
            "ALLOWED_ORIGIN",
            "LISTEN_ADDR",
        ] {
            std::env::remove_var(key);
        }

        let config = Config::from_env().unwrap();
        assert!(config.api_key.is_empty());
        assert_eq!(config.api_base, "http://0.0.0.0:1234/v1");
        assert_eq!(config.database_url, "chat.db");
        assert_eq!(config.store_mode, StoreMode::Sqlite);
        assert_eq!(config.allowed_origin, "http://localhost:3000");
        assert_eq!(config.listen_addr, "0.0.0.0:8000".parse().unwrap());

        std::env::set_var("CHAT_STORE", "memory");
        assert_eq!(Config::from_env().unwrap().store_mode, StoreMode::Memory);

        std::env::set_var("CHAT_STORE", "redis");
        assert!(Config::from_env().is_err());
        std::env::remove_var("CHAT_STORE");
    }
}
