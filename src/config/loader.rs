//! Configuration loading from the environment
//!
//! Every setting has a hardcoded fallback so the server starts with no
//! environment at all, matching a local development database.

use std::env;
use std::path::PathBuf;

use super::{Config, DatabaseConfig, ServerConfig, SessionConfig};

/// Load configuration from environment variables
pub fn load_config() -> Config {
    let defaults = Config::default();

    Config {
        server: ServerConfig {
            host: env_or("HOST", defaults.server.host),
            port: env_parsed("PORT", defaults.server.port),
            public_dir: env::var("PUBLIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.server.public_dir),
        },
        database: DatabaseConfig {
            host: env_or("DB_HOST", defaults.database.host),
            port: env_parsed("DB_PORT", defaults.database.port),
            user: env_or("DB_USER", defaults.database.user),
            password: env_or("DB_PASS", defaults.database.password),
            dbname: env_or("DB_NAME", defaults.database.dbname),
        },
        session: SessionConfig {
            ttl_minutes: env_parsed("SESSION_TTL_MINUTES", defaults.session.ttl_minutes),
        },
    }
}

fn env_or(key: &str, fallback: String) -> String {
    env::var(key).unwrap_or(fallback)
}

fn env_parsed<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = Config::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.dbname, "placement_management");
        assert_eq!(config.session.ttl_minutes, 30);
    }

    #[test]
    fn test_connection_string() {
        let config = Config::default();
        let conn = config.database.connection_string();
        assert!(conn.contains("host=localhost"));
        assert!(conn.contains("dbname=placement_management"));
    }
}
