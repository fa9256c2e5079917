// src/config.rs

use std::env;
use dotenvy::dotenv;

/// Number of exam results retained per test bank. Older rows are trimmed on insert.
pub const RESULTS_KEPT_PER_BANK: i64 = 3;

/// Row limit for the "recent results" listing.
pub const RECENT_RESULTS_LIMIT: i64 = 10;

/// Upper bound for an uploaded import file.
pub const MAX_IMPORT_BYTES: usize = 10 * 1024 * 1024;

/// Import documents address options as `option_a` .. `option_z`.
pub const MAX_OPTIONS_PER_QUESTION: usize = 26;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub rust_log: String,
    pub bind_addr: String,
    /// Directory holding `{exam_code}/images/{file}` assets.
    pub media_root: String,
    /// Allowed CORS origins. A single `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://test_engine.db".to_string());

        let rust_log = env::var("RUST_LOG")
            .unwrap_or_else(|_| "info".to_string());

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string());

        let media_root = env::var("MEDIA_ROOT")
            .unwrap_or_else(|_| "media".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|raw| parse_origins(&raw))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:4200".to_string(),
                    "http://127.0.0.1:4200".to_string(),
                ]
            });

        Self {
            database_url,
            rust_log,
            bind_addr,
            media_root,
            cors_origins,
        }
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
