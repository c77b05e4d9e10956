use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use reqwest::Url;

use crate::error::ConfigError;

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8002";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json
}

/// Process-wide settings, loaded once at startup and passed into the app state.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub service_url: Url,
    pub timeout: Duration,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat
}

impl RelayConfig {

    pub fn from_env() -> Result<Self, ConfigError> {

        Self::from_lookup(|name| std::env::var(name).ok())

    }

    // split out from from_env so tests don't have to mutate the process env
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>
    {

        let raw_url = lookup("CODEGEN_SERVICE_URL")
            .unwrap_or_else(|| DEFAULT_SERVICE_URL.to_string());
        let service_url = Url::parse(&raw_url)
            .map_err(|e| invalid("CODEGEN_SERVICE_URL", &raw_url, e.to_string()))?;
        // "localhost:8002" parses with scheme "localhost", catch it here
        // instead of falling back on every request
        if !matches!(service_url.scheme(), "http" | "https") || service_url.host_str().is_none() {
            return Err(invalid("CODEGEN_SERVICE_URL", &raw_url, "expected an http(s) url with a host".to_string()));
        }

        let timeout_secs = match lookup("CODEGEN_TIMEOUT_SECS") {
            Some(raw) => match raw.parse::<u64>() {
                Ok(0) => return Err(invalid("CODEGEN_TIMEOUT_SECS", &raw, "must be greater than zero".to_string())),
                Ok(secs) => secs,
                Err(e) => return Err(invalid("CODEGEN_TIMEOUT_SECS", &raw, e.to_string()))
            },
            None => DEFAULT_TIMEOUT_SECS
        };

        let host: IpAddr = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| invalid("HOST", &raw, e.to_string()))?,
            None => IpAddr::from([0, 0, 0, 0])
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse::<u16>().map_err(|e| invalid("PORT", &raw, e.to_string()))?,
            None => DEFAULT_PORT
        };

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => return Err(invalid("LOG_FORMAT", other, "expected text or json".to_string()))
        };

        Ok(RelayConfig {
            service_url,
            timeout: Duration::from_secs(timeout_secs),
            bind_addr: SocketAddr::new(host, port),
            log_format
        })

    }

}

fn invalid(name: &'static str, value: &str, reason: String) -> ConfigError {

    ConfigError::InvalidVar {
        name,
        value: value.to_string(),
        reason
    }

}
