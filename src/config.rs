// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

/// Maximum attempts at generating a collision-free slug on publish.
pub const SLUG_GENERATION_ATTEMPTS: usize = 5;

/// Length of the random slug token assigned on publish.
pub const GENERATED_SLUG_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct Config {
    /// Postgres connection string. `None` selects the in-memory stores.
    pub database_url: Option<String>,
    pub rust_log: String,
    pub bind_addr: SocketAddr,
    /// Base used to build the `publicUrl` returned on publish.
    pub public_base_url: Option<Url>,
    pub cors_origins: Vec<String>,
    pub log_dir: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.trim().is_empty());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let public_base_url = env::var("PUBLIC_BASE_URL")
            .ok()
            .and_then(|v| Url::parse(&v).ok());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_else(|_| default_origins());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        Self {
            database_url,
            rust_log,
            bind_addr,
            public_base_url,
            cors_origins,
            log_dir,
        }
    }

    /// Builds the public link for a published quiz slug.
    pub fn public_url(&self, slug: &str) -> String {
        let path = format!("/quiz/{}", slug);
        match &self.public_base_url {
            Some(base) => format!("{}{}", base.as_str().trim_end_matches('/'), path),
            None => path,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            rust_log: "info".to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            public_base_url: None,
            cors_origins: default_origins(),
            log_dir: "logs".to_string(),
        }
    }
}

fn default_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://127.0.0.1:3000".to_string(),
    ]
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
