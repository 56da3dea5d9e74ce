//! Configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port (default: 3000).
    pub port: u16,

    /// Path to a JSON file of menu link records (default: ./menus.json).
    pub menus_file: PathBuf,

    /// CORS allowed origins (comma-separated, default: "*").
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .context("PORT must be a valid u16")?;

        let menus_file = env::var("MENUS_FILE")
            .unwrap_or_else(|_| "./menus.json".to_string())
            .into();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            port,
            menus_file,
            cors_allowed_origins,
        })
    }
}
