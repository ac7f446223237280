// src/config.rs

use std::{path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Artificial pause before `/predict` answers. Zero disables it.
    pub predict_delay: Duration,
    pub static_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
            predict_delay: Duration::from_millis(750),
            static_dir: PathBuf::from("public"),
        }
    }
}

impl AppConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable           | Default   |
    /// |--------------------|-----------|
    /// | `HOST`             | `0.0.0.0` |
    /// | `PORT`             | `5000`    |
    /// | `PREDICT_DELAY_MS` | `750`     |
    /// | `STATIC_DIR`       | `public`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(v) => parse_var("PORT", &v)?,
            None => defaults.port,
        };
        let predict_delay = match lookup("PREDICT_DELAY_MS") {
            Some(v) => Duration::from_millis(parse_var("PREDICT_DELAY_MS", &v)?),
            None => defaults.predict_delay,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            predict_delay,
            static_dir: lookup("STATIC_DIR").map(PathBuf::from).unwrap_or(defaults.static_dir),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}
