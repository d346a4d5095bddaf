// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf};
use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub rust_log: String,
    pub log_dir: PathBuf,
    pub quiz_catalog_path: Option<PathBuf>,
    pub tutorial_catalog_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            rust_log: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            quiz_catalog_path: None,
            tutorial_catalog_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let bind_addr = match env::var("BIND_ADDR") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                eprintln!("Invalid BIND_ADDR '{}' ({}), using {}", raw, e, defaults.bind_addr);
                defaults.bind_addr
            }),
            Err(_) => defaults.bind_addr,
        };

        let rust_log = env::var("RUST_LOG")
            .unwrap_or(defaults.rust_log);

        let log_dir = env::var("LOG_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        let quiz_catalog_path = env::var("QUIZ_CATALOG_PATH").ok().map(PathBuf::from);
        let tutorial_catalog_path = env::var("TUTORIAL_CATALOG_PATH").ok().map(PathBuf::from);

        Self {
            bind_addr,
            rust_log,
            log_dir,
            quiz_catalog_path,
            tutorial_catalog_path,
        }
    }
}
