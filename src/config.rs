//! Environment-driven configuration.

use std::env;

use reqwest::Url;
use thiserror::Error;

use crate::domain::money::{self, Money};
use crate::domain::pricing::DEFAULT_FULL_PRICE;

const DEFAULT_STORE_URL: &str = "http://localhost:3000";
const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_TMDB_LANGUAGE: &str = "pt-BR";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not valid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: reason.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct TmdbConfig {
    pub api_key: String,
    pub base_url: Url,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub store_url: Url,
    pub full_price: Money,
    /// `None` disables the now-playing feature.
    pub tmdb: Option<TmdbConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable source; unset and blank
    /// values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| invalid("PORT", e))?,
            None => 8080,
        };
        let store_url = parse_url(
            "STORE_URL",
            &var("STORE_URL").unwrap_or_else(|| DEFAULT_STORE_URL.to_string()),
        )?;
        let full_price = match var("TICKET_FULL_PRICE") {
            Some(raw) => money::parse(&raw).map_err(|e| invalid("TICKET_FULL_PRICE", e))?,
            None => Money::from(DEFAULT_FULL_PRICE),
        };
        if full_price < Money::from(0) {
            return Err(invalid("TICKET_FULL_PRICE", "must not be negative"));
        }

        let tmdb = match var("TMDB_API_KEY") {
            Some(api_key) => Some(TmdbConfig {
                api_key: api_key.trim().to_string(),
                base_url: parse_url(
                    "TMDB_BASE_URL",
                    &var("TMDB_BASE_URL").unwrap_or_else(|| DEFAULT_TMDB_BASE_URL.to_string()),
                )?,
                language: var("TMDB_LANGUAGE").unwrap_or_else(|| DEFAULT_TMDB_LANGUAGE.to_string()),
            }),
            None => None,
        };

        Ok(Self {
            host,
            port,
            store_url,
            full_price,
            tmdb,
        })
    }
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| invalid(name, e))?;
    if url.cannot_be_a_base() {
        return Err(invalid(name, "must be an absolute http(s) URL"));
    }
    Ok(url)
}
