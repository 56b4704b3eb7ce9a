//! Storefront gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `AUTOTIENDA_HOST` - Bind address (default: 127.0.0.1)
//! - `AUTOTIENDA_PORT` - Listen port (default: 3000)
//! - `AUTOS_API_URL` - Catalog service base URL
//!   (default: `http://localhost:8080/api/autos`)
//! - `USUARIOS_API_URL` - Users service base URL
//!   (default: `http://localhost:8081/api/usuarios`)
//! - `CARRITO_API_URL` - Cart service base URL
//!   (default: `http://localhost:8082/api/carrito`)
//! - `ORDENES_API_URL` - Orders service base URL
//!   (default: `http://localhost:8083/api/ordenes`)
//! - `AUTOTIENDA_SESSION_DAYS` - Session inactivity expiry in days (default: 7)

use std::net::{IpAddr, SocketAddr};

use thiserror::Error;
use url::Url;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Base URLs of the four remote REST collections.
#[derive(Debug, Clone)]
pub struct ServiceUrls {
    /// Catalog (autos) service.
    pub autos: Url,
    /// Users (usuarios) service.
    pub usuarios: Url,
    /// Cart (carrito) service.
    pub carrito: Url,
    /// Orders (ordenes) service.
    pub ordenes: Url,
}

impl ServiceUrls {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            autos: get_url_or_default("AUTOS_API_URL", "http://localhost:8080/api/autos")?,
            usuarios: get_url_or_default(
                "USUARIOS_API_URL",
                "http://localhost:8081/api/usuarios",
            )?,
            carrito: get_url_or_default("CARRITO_API_URL", "http://localhost:8082/api/carrito")?,
            ordenes: get_url_or_default("ORDENES_API_URL", "http://localhost:8083/api/ordenes")?,
        })
    }
}

/// Storefront gateway configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to.
    pub host: IpAddr,
    /// Port to listen on.
    pub port: u16,
    /// Remote service base URLs.
    pub services: ServiceUrls,
    /// Session inactivity expiry in days.
    pub session_days: i64,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("AUTOTIENDA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("AUTOTIENDA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("AUTOTIENDA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("AUTOTIENDA_PORT".to_string(), e.to_string()))?;
        let session_days = get_env_or_default("AUTOTIENDA_SESSION_DAYS", "7")
            .parse::<i64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("AUTOTIENDA_SESSION_DAYS".to_string(), e.to_string())
            })?;

        let services = ServiceUrls::from_env()?;

        Ok(Self {
            host,
            port,
            services,
            session_days,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable as a URL, falling back to a default.
fn get_url_or_default(key: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = get_env_or_default(key, default);
    Url::parse(raw.trim_end_matches('/'))
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Configuration pointing at the default local service URLs, for unit tests.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 3000,
        services: ServiceUrls {
            autos: Url::parse("http://localhost:8080/api/autos").unwrap(),
            usuarios: Url::parse("http://localhost:8081/api/usuarios").unwrap(),
            carrito: Url::parse("http://localhost:8082/api/carrito").unwrap(),
            ordenes: Url::parse("http://localhost:8083/api/ordenes").unwrap(),
        },
        session_days: 7,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = test_config();

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn url_defaults_strip_trailing_slashes() {
        // Unset variable falls back to the default, normalized without a
        // trailing slash so clients can join `/{id}` paths safely.
        let url = get_url_or_default("AUTOTIENDA_TEST_UNSET_URL", "http://localhost:8080/api/autos/")
            .unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/autos");
    }
}
