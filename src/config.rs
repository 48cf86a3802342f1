use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub network_min_delay_ms: u64,
    pub network_max_delay_ms: u64,
    /// Probability in `[0, 1]` that a simulated write fails.
    pub network_failure_rate: f64,
    pub seed_on_start: bool,
    pub share_base_url: String,
    pub jobs_page_size: i64,
    pub candidates_page_size: i64,
    pub cors_allowed_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_address: "0.0.0.0:3000".to_string(),
            network_min_delay_ms: 200,
            network_max_delay_ms: 1200,
            network_failure_rate: 0.05,
            seed_on_start: true,
            share_base_url: "https://recruitify.app/assessment".to_string(),
            jobs_page_size: 10,
            candidates_page_size: 20,
            cors_allowed_origin: None,
        }
    }
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let defaults = Config::default();

        let config = Self {
            server_address: env::var("SERVER_ADDRESS").unwrap_or(defaults.server_address),
            network_min_delay_ms: get_env_parse_or(
                "NETWORK_MIN_DELAY_MS",
                defaults.network_min_delay_ms,
            )?,
            network_max_delay_ms: get_env_parse_or(
                "NETWORK_MAX_DELAY_MS",
                defaults.network_max_delay_ms,
            )?,
            network_failure_rate: get_env_parse_or(
                "NETWORK_FAILURE_RATE",
                defaults.network_failure_rate,
            )?,
            seed_on_start: get_env_parse_or("SEED_ON_START", defaults.seed_on_start)?,
            share_base_url: env::var("SHARE_BASE_URL").unwrap_or(defaults.share_base_url),
            jobs_page_size: get_env_parse_or("JOBS_PAGE_SIZE", defaults.jobs_page_size)?,
            candidates_page_size: get_env_parse_or(
                "CANDIDATES_PAGE_SIZE",
                defaults.candidates_page_size,
            )?,
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok(),
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.network_failure_rate) {
            return Err(Error::Config(format!(
                "NETWORK_FAILURE_RATE must be within [0, 1], got {}",
                self.network_failure_rate
            )));
        }
        if self.network_min_delay_ms > self.network_max_delay_ms {
            return Err(Error::Config(
                "NETWORK_MIN_DELAY_MS must not exceed NETWORK_MAX_DELAY_MS".to_string(),
            ));
        }
        if self.jobs_page_size < 1 || self.candidates_page_size < 1 {
            return Err(Error::Config("Page sizes must be positive".to_string()));
        }
        Ok(())
    }
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_checks() {
        assert!(Config::default().check().is_ok());
    }

    #[test]
    fn rejects_out_of_range_failure_rate() {
        let config = Config {
            network_failure_rate: 1.5,
            ..Config::default()
        };
        assert!(matches!(config.check(), Err(Error::Config(_))));
    }

    #[test]
    fn rejects_inverted_delay_window() {
        let config = Config {
            network_min_delay_ms: 500,
            network_max_delay_ms: 100,
            ..Config::default()
        };
        assert!(matches!(config.check(), Err(Error::Config(_))));
    }
}
