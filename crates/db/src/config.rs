//! Database configuration loaded from environment variables.

use std::path::PathBuf;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Whether connections to the database must be encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SslMode {
    /// Plain TCP connections.
    Disable,
    /// TLS with certificate validation and hostname checking.
    Require,
}

impl FromStr for SslMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "disable" => Ok(SslMode::Disable),
            "require" => Ok(SslMode::Require),
            other => Err(format!(
                "unknown ssl mode {other:?}, expected \"disable\" or \"require\""
            )),
        }
    }
}

/// How the resolved TLS policy ends up on the connection options.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TlsPolicy {
    Plain,
    Verified { root_cert: Option<PathBuf> },
}

/// Database configuration.
///
/// Pool sizing applies per execution context, not process-wide: every
/// context registered with [`PoolRegistry`](crate::registry::PoolRegistry)
/// gets its own pool with these limits.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Postgres connection URL.
    pub url: String,
    /// Connections held open per context pool (default: `1`).
    pub min_connections: u32,
    /// Connection ceiling per context pool (default: `10`).
    pub max_connections: u32,
    /// TLS requirement (default: [`SslMode::Disable`]).
    pub ssl_mode: SslMode,
    /// Explicit root certificate for TLS validation. When unset, the
    /// built-in trusted root store is used.
    pub ssl_root_cert: Option<PathBuf>,
}

impl DatabaseConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default     |
    /// |----------------------------|-------------|
    /// | `DATABASE_URL`             | (required)  |
    /// | `DATABASE_MIN_CONNECTIONS` | `1`         |
    /// | `DATABASE_MAX_CONNECTIONS` | `10`        |
    /// | `DATABASE_SSL_MODE`        | `disable`   |
    /// | `DATABASE_SSL_ROOT_CERT`   | (unset)     |
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

        let min_connections: u32 = std::env::var("DATABASE_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("DATABASE_MIN_CONNECTIONS must be a valid u32");

        let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DATABASE_MAX_CONNECTIONS must be a valid u32");

        let ssl_mode: SslMode = std::env::var("DATABASE_SSL_MODE")
            .unwrap_or_else(|_| "disable".into())
            .parse()
            .expect("DATABASE_SSL_MODE must be \"disable\" or \"require\"");

        let ssl_root_cert = std::env::var("DATABASE_SSL_ROOT_CERT").ok().map(PathBuf::from);

        Self {
            url,
            min_connections,
            max_connections,
            ssl_mode,
            ssl_root_cert,
        }
    }

    /// Build Postgres connection options from the URL and TLS policy.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        let options = PgConnectOptions::from_str(&self.url)?;
        Ok(match self.resolved_tls() {
            TlsPolicy::Plain => options.ssl_mode(PgSslMode::Disable),
            TlsPolicy::Verified { root_cert: None } => options.ssl_mode(PgSslMode::VerifyFull),
            TlsPolicy::Verified {
                root_cert: Some(path),
            } => options.ssl_mode(PgSslMode::VerifyFull).ssl_root_cert(path),
        })
    }

    /// Resolve the effective TLS policy.
    ///
    /// `require` means full verification: certificate validation against
    /// the trusted root store plus hostname checking. If an explicit root
    /// certificate is configured but unreadable, the connection downgrades
    /// to plain TCP with a warning instead of refusing to start.
    fn resolved_tls(&self) -> TlsPolicy {
        if self.ssl_mode == SslMode::Disable {
            return TlsPolicy::Plain;
        }
        match &self.ssl_root_cert {
            Some(path) if !path.is_file() => {
                tracing::warn!(
                    path = %path.display(),
                    "TLS root certificate is not readable, connecting without TLS"
                );
                TlsPolicy::Plain
            }
            other => TlsPolicy::Verified {
                root_cert: other.clone(),
            },
        }
    }
}
