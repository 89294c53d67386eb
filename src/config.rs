use std::{env, fmt::Display, str::FromStr};

use tracing::info;

pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub token_secret: String,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("PORT", "3000"),
            database_url: try_load("DATABASE_URL", "sqlite::memory:"),
            // The signing secret has no default; it must come from the environment.
            token_secret: env::var("TOKEN_SECRET").expect("TOKEN_SECRET must be set"),
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| format!("Invalid {key} value: {e}"))
        .expect("Environment misconfigured!")
}
