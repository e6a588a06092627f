//! Environment-driven configuration.

/// Application configuration assembled from environment variables.
///
/// The deployment target is a libSQL/Turso database, so both the URL and
/// the auth token are read; the token is unused when pointing at a local
/// SQLite file.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection URL (`DATABASE_URL`).
    pub database_url: String,
    /// Auth token for the remote store (`DATABASE_AUTH_TOKEN`).
    pub database_auth_token: Option<String>,
    /// Bind address override (`CARTO_BIND_ADDR`).
    pub bind_addr: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the environment, falling back to the
    /// given database URL when `DATABASE_URL` is absent.
    pub fn from_env_or(default_database_url: &str) -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| default_database_url.to_string()),
            database_auth_token: std::env::var("DATABASE_AUTH_TOKEN").ok(),
            bind_addr: std::env::var("CARTO_BIND_ADDR").ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_url_defaults_when_unset() {
        std::env::remove_var("DATABASE_URL");
        let config = AppConfig::from_env_or("sqlite://fallback.db");
        assert_eq!(config.database_url, "sqlite://fallback.db");

        std::env::set_var("DATABASE_URL", "sqlite://explicit.db");
        let config = AppConfig::from_env_or("sqlite://fallback.db");
        assert_eq!(config.database_url, "sqlite://explicit.db");
        std::env::remove_var("DATABASE_URL");
    }
}
