use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 3001;

/// Selects how much of a server fault is shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "test" => Ok(Environment::Development),
            other => anyhow::bail!("unknown APP_ENV '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub address: SocketAddr,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL").context("DATABASE_URL must be set")?;
        let host = match lookup("HOST") {
            Some(host) => host
                .parse::<IpAddr>()
                .with_context(|| format!("HOST '{}' is not an IP address", host))?,
            None => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = match lookup("PORT") {
            Some(port) => port
                .parse::<u16>()
                .with_context(|| format!("PORT '{}' is not a valid port", port))?,
            None => DEFAULT_PORT,
        };
        let environment = match lookup("APP_ENV") {
            Some(environment) => environment.parse()?,
            None => Environment::default(),
        };

        Ok(Config {
            database_url,
            address: SocketAddr::new(host, port),
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_database_url_is_set() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "sqlite://blog.db")])).unwrap();
        assert_eq!(config.database_url, "sqlite://blog.db");
        assert_eq!(config.address, SocketAddr::from(([127, 0, 0, 1], 3001)));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn database_url_is_required() {
        let error = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(error.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn reads_host_port_and_environment() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("HOST", "0.0.0.0"),
            ("PORT", "8000"),
            ("APP_ENV", "Production"),
        ]))
        .unwrap();
        assert_eq!(config.address, SocketAddr::from(([0, 0, 0, 0], 8000)));
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn rejects_bad_port() {
        let error = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(error.to_string().contains("PORT"));
    }

    #[test]
    fn rejects_unknown_environment() {
        assert!("staging".parse::<Environment>().is_err());
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
    }
}
