use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed browser origin; any origin when unset.
    #[serde(default)]
    pub cors_origin: Option<String>,
    /// `development` exposes error details in 500 responses.
    #[serde(default = "default_environment")]
    pub environment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    #[serde(default = "default_jwt_expires_in")]
    pub expires_in: i64, // seconds
}

fn default_environment() -> String {
    "production".to_string()
}

fn default_jwt_expires_in() -> i64 {
    7 * 24 * 3600
}

impl ServerConfig {
    pub fn is_development(&self) -> bool {
        self.environment.eq_ignore_ascii_case("development")
    }
}

impl Config {
    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // without a config file everything comes from the environment
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => Self::parse(&config_str, &config_path)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL").ok_or_else(|| {
                    AppError::ConfigError(format!(
                        "DATABASE_URL is not set and no config file was found at {config_path}"
                    ))
                })?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 3000u16),
                        cors_origin: get_env("CORS_ORIGIN"),
                        environment: get_env("APP_ENV").unwrap_or_else(default_environment),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        expires_in: get_env_parse("JWT_EXPIRES_IN", default_jwt_expires_in()),
                    },
                }
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "Cannot read config file {config_path}: {e}"
                )));
            }
        };

        // environment variables win over the file
        config.apply_env_overrides();
        Ok(config)
    }

    fn parse(raw: &str, path: &str) -> AppResult<Self> {
        toml::from_str(raw).map_err(|e| {
            AppError::ConfigError(format!("Failed to parse config file {path}: {e}"))
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("CORS_ORIGIN") {
            self.server.cors_origin = Some(v);
        }
        if let Ok(v) = env::var("APP_ENV") {
            self.server.environment = v;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            self.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            self.jwt.expires_in = n;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_toml_uses_defaults() {
        let raw = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [database]
            url = "postgres://localhost/church"
            max_connections = 5

            [jwt]
            secret = "s3cret"
        "#;
        let config = Config::parse(raw, "config.toml").unwrap();
        assert_eq!(config.jwt.expires_in, 604_800);
        assert_eq!(config.server.environment, "production");
        assert!(!config.server.is_development());
        assert!(config.server.cors_origin.is_none());
    }

    #[test]
    fn test_malformed_file_is_a_config_error() {
        let err = Config::parse("[server]\nport = \"not a number\"", "broken.toml").unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("broken.toml"));

        // a file missing whole sections is rejected the same way
        assert!(matches!(
            Config::parse("[jwt]\nsecret = \"x\"", "partial.toml"),
            Err(AppError::ConfigError(_))
        ));
    }

    #[test]
    fn test_development_flag_is_case_insensitive() {
        let server = ServerConfig {
            host: "0.0.0.0".into(),
            port: 3000,
            cors_origin: None,
            environment: "Development".into(),
        };
        assert!(server.is_development());
    }
}
