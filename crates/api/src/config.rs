use std::str::FromStr;
use std::time::Duration;

use axum::http::HeaderValue;
use revise_llm::LlmConfig;

use crate::auth::jwt::JwtConfig;

const DEFAULT_PORT: u16 = 8001;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 180;
/// Large enough for a base64-encoded phone photo.
const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_JWT_EXPIRY_HOURS: i64 = 24 * 7;
const DEFAULT_AI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 120;

/// A configuration value that is missing or unparseable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Which [`Store`](revise_db::Store) implementation to run with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{other}'")),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("expected 'pretty' or 'json', got '{other}'")),
        }
    }
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin, without credentials.
    Any,
    List(Vec<HeaderValue>),
}

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret (and the database URL when running on
/// PostgreSQL) have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: CorsOrigins,
    /// HTTP request timeout in seconds. Must exceed the AI timeout.
    pub request_timeout_secs: u64,
    /// Maximum accepted request body size in bytes.
    pub max_body_bytes: usize,
    pub storage: StorageBackend,
    /// Required when `storage` is [`StorageBackend::Postgres`].
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
    pub llm: LlmConfig,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                    | Default                     |
    /// |----------------------------|-----------------------------|
    /// | `HOST`                     | `0.0.0.0`                   |
    /// | `PORT`                     | `8001`                      |
    /// | `CORS_ORIGINS`             | `http://localhost:3000`     |
    /// | `REQUEST_TIMEOUT_SECS`     | `180`                       |
    /// | `MAX_BODY_BYTES`           | `20971520` (20 MiB)         |
    /// | `STORAGE_BACKEND`          | `postgres`                  |
    /// | `DATABASE_URL`             | required for postgres       |
    /// | `DATABASE_MAX_CONNECTIONS` | `20`                        |
    /// | `JWT_SECRET`               | **required**                |
    /// | `JWT_EXPIRY_HOURS`         | `168`                       |
    /// | `AI_BASE_URL`              | `https://api.openai.com/v1` |
    /// | `AI_API_KEY`               | unset (generation disabled) |
    /// | `AI_MODEL`                 | `gpt-4o-mini`               |
    /// | `AI_TIMEOUT_SECS`          | `120`                       |
    /// | `AI_MAX_TOKENS`            | unset                       |
    /// | `LOG_FORMAT`               | `pretty`                    |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", var("PORT"), DEFAULT_PORT)?;
        let cors_origins = parse_cors_origins(
            &var("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into()),
        )?;
        let request_timeout_secs = parse_or(
            "REQUEST_TIMEOUT_SECS",
            var("REQUEST_TIMEOUT_SECS"),
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        let max_body_bytes = parse_or(
            "MAX_BODY_BYTES",
            var("MAX_BODY_BYTES"),
            DEFAULT_MAX_BODY_BYTES,
        )?;

        let storage = parse_or(
            "STORAGE_BACKEND",
            var("STORAGE_BACKEND"),
            StorageBackend::Postgres,
        )?;
        let database_url = var("DATABASE_URL");
        if storage == StorageBackend::Postgres && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        let database_max_connections = parse_or(
            "DATABASE_MAX_CONNECTIONS",
            var("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_DB_MAX_CONNECTIONS,
        )?;

        let jwt = JwtConfig {
            secret: var("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?,
            expiry_hours: parse_or(
                "JWT_EXPIRY_HOURS",
                var("JWT_EXPIRY_HOURS"),
                DEFAULT_JWT_EXPIRY_HOURS,
            )?,
        };
        if jwt.expiry_hours <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRY_HOURS",
                reason: "must be positive".into(),
            });
        }

        let llm = LlmConfig {
            base_url: var("AI_BASE_URL").unwrap_or_else(|| DEFAULT_AI_BASE_URL.into()),
            api_key: var("AI_API_KEY"),
            model: var("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.into()),
            timeout: Duration::from_secs(parse_or(
                "AI_TIMEOUT_SECS",
                var("AI_TIMEOUT_SECS"),
                DEFAULT_AI_TIMEOUT_SECS,
            )?),
            max_tokens: var("AI_MAX_TOKENS")
                .map(|v| parse_value("AI_MAX_TOKENS", &v))
                .transpose()?,
        };

        if request_timeout_secs <= llm.timeout.as_secs() {
            return Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                reason: format!("must exceed AI_TIMEOUT_SECS ({})", llm.timeout.as_secs()),
            });
        }

        let log_format = parse_or("LOG_FORMAT", var("LOG_FORMAT"), LogFormat::Pretty)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_body_bytes,
            storage,
            database_url,
            database_max_connections,
            jwt,
            llm,
            log_format,
        })
    }
}

fn parse_value<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
        var,
        reason: e.to_string(),
    })
}

fn parse_or<T>(var: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |v| parse_value(var, &v))
}

fn parse_cors_origins(raw: &str) -> Result<CorsOrigins, ConfigError> {
    let origins: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if origins.contains(&"*") {
        return Ok(CorsOrigins::Any);
    }

    origins
        .into_iter()
        .map(|o| {
            HeaderValue::from_str(o).map_err(|e| ConfigError::Invalid {
                var: "CORS_ORIGINS",
                reason: format!("'{o}': {e}"),
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(CorsOrigins::List)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_with_memory_backend() {
        let config = load(&[("JWT_SECRET", "s3cret"), ("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.jwt.expiry_hours, 168);
        assert_eq!(config.llm.model, DEFAULT_AI_MODEL);
        assert!(config.llm.api_key.is_none());
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(
            config.cors_origins,
            CorsOrigins::List(vec![HeaderValue::from_static(DEFAULT_CORS_ORIGIN)])
        );
    }

    #[test]
    fn jwt_secret_is_required() {
        assert_matches!(
            load(&[("STORAGE_BACKEND", "memory")]),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
        assert_matches!(
            load(&[("STORAGE_BACKEND", "memory"), ("JWT_SECRET", "  ")]),
            Err(ConfigError::Missing("JWT_SECRET"))
        );
    }

    #[test]
    fn postgres_requires_database_url() {
        assert_matches!(
            load(&[("JWT_SECRET", "s3cret")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        );
        let config = load(&[("JWT_SECRET", "s3cret"), ("DATABASE_URL", "postgres://db/revise")])
            .unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let result = load(&[
            ("JWT_SECRET", "s3cret"),
            ("STORAGE_BACKEND", "memory"),
            ("PORT", "eighty"),
        ]);
        assert_matches!(result, Err(ConfigError::Invalid { var: "PORT", .. }));

        let result = load(&[
            ("JWT_SECRET", "s3cret"),
            ("STORAGE_BACKEND", "memory"),
            ("JWT_EXPIRY_HOURS", "0"),
        ]);
        assert_matches!(result, Err(ConfigError::Invalid { var: "JWT_EXPIRY_HOURS", .. }));
    }

    #[test]
    fn request_timeout_must_exceed_ai_timeout() {
        let result = load(&[
            ("JWT_SECRET", "s3cret"),
            ("STORAGE_BACKEND", "memory"),
            ("REQUEST_TIMEOUT_SECS", "60"),
            ("AI_TIMEOUT_SECS", "60"),
        ]);
        assert_matches!(
            result,
            Err(ConfigError::Invalid {
                var: "REQUEST_TIMEOUT_SECS",
                ..
            })
        );

        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            ("STORAGE_BACKEND", "memory"),
            ("REQUEST_TIMEOUT_SECS", "61"),
            ("AI_TIMEOUT_SECS", "60"),
        ])
        .unwrap();
        assert_eq!(config.request_timeout_secs, 61);
    }

    #[test]
    fn body_limit_defaults_to_twenty_mebibytes() {
        let config = load(&[("JWT_SECRET", "s3cret"), ("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(config.max_body_bytes, 20 * 1024 * 1024);

        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            ("STORAGE_BACKEND", "memory"),
            ("MAX_BODY_BYTES", "1024"),
        ])
        .unwrap();
        assert_eq!(config.max_body_bytes, 1024);
    }

    #[test]
    fn wildcard_cors_and_overrides() {
        let config = load(&[
            ("JWT_SECRET", "s3cret"),
            ("STORAGE_BACKEND", "memory"),
            ("CORS_ORIGINS", "http://a.test, *"),
            ("AI_API_KEY", "sk-test"),
            ("AI_MAX_TOKENS", "4096"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();
        assert_eq!(config.cors_origins, CorsOrigins::Any);
        assert_eq!(config.llm.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.llm.max_tokens, Some(4096));
        assert_eq!(config.log_format, LogFormat::Json);
    }
}
