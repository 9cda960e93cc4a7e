//! Database connection and pool configuration.
//!
//! Configuration is an explicit struct rather than ambient environment
//! lookups scattered through the code. The precedence rule is single and
//! simple: a field set on the struct wins over the environment-sourced
//! default ([`DbConfig::from_env`] + [`DbConfig::or_env`]).
//!
//! Recognized environment variables: `DATABASE_URL`, `PGHOST`, `PGPORT`,
//! `PGDATABASE`, `PGUSER`, `PGPASSWORD`, `PGSSLMODE`.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};

use crate::error::{SqlxErrorExt, SqlxResult};
use babelpress_data::DataError;

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Postgres connection and pool settings.
///
/// Either `connection_string` or the discrete fields may be used; when a
/// connection string is present it takes priority and the discrete fields
/// are ignored.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DbConfig {
    pub connection_string: Option<String>,

    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub ssl: Option<bool>,

    pub max_connections: Option<u32>,
    #[serde(with = "humantime_serde", default)]
    pub idle_timeout: Option<Duration>,
    #[serde(with = "humantime_serde", default)]
    pub connect_timeout: Option<Duration>,
}

impl DbConfig {
    /// Build a config entirely from the environment.
    pub fn from_env() -> Self {
        Self {
            connection_string: std::env::var("DATABASE_URL").ok(),
            host: std::env::var("PGHOST").ok(),
            port: std::env::var("PGPORT").ok().and_then(|p| p.parse().ok()),
            database: std::env::var("PGDATABASE").ok(),
            username: std::env::var("PGUSER").ok(),
            password: std::env::var("PGPASSWORD").ok(),
            ssl: std::env::var("PGSSLMODE")
                .ok()
                .map(|m| m.eq_ignore_ascii_case("require")),
            max_connections: None,
            idle_timeout: None,
            connect_timeout: None,
        }
    }

    /// Fill unset fields from the environment. Explicitly set fields win.
    pub fn or_env(self) -> Self {
        let env = Self::from_env();
        Self {
            connection_string: self.connection_string.or(env.connection_string),
            host: self.host.or(env.host),
            port: self.port.or(env.port),
            database: self.database.or(env.database),
            username: self.username.or(env.username),
            password: self.password.or(env.password),
            ssl: self.ssl.or(env.ssl),
            max_connections: self.max_connections,
            idle_timeout: self.idle_timeout,
            connect_timeout: self.connect_timeout,
        }
    }

    /// Resolve into connection options for the driver.
    pub fn connect_options(&self) -> SqlxResult<PgConnectOptions> {
        if let Some(url) = &self.connection_string {
            return PgConnectOptions::from_str(url).map_err(|e| e.into_data_error());
        }

        let mut opts = PgConnectOptions::new();
        if let Some(host) = &self.host {
            opts = opts.host(host);
        }
        if let Some(port) = self.port {
            opts = opts.port(port);
        }
        if let Some(database) = &self.database {
            opts = opts.database(database);
        }
        if let Some(username) = &self.username {
            opts = opts.username(username);
        }
        if let Some(password) = &self.password {
            opts = opts.password(password);
        }
        if let Some(ssl) = self.ssl {
            opts = opts.ssl_mode(if ssl { PgSslMode::Require } else { PgSslMode::Prefer });
        }
        Ok(opts)
    }

    fn pool_options(&self) -> PgPoolOptions {
        let mut opts =
            PgPoolOptions::new().max_connections(self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS));
        if let Some(idle) = self.idle_timeout {
            opts = opts.idle_timeout(idle);
        }
        if let Some(connect) = self.connect_timeout {
            opts = opts.acquire_timeout(connect);
        }
        opts
    }

    /// Create a pool and establish an initial connection.
    ///
    /// The pool is meant to be long-lived and shared across repositories;
    /// creating one per request risks connection exhaustion under load.
    pub async fn create_pool(&self) -> SqlxResult<PgPool> {
        let opts = self.connect_options()?;
        self.pool_options()
            .connect_with(opts)
            .await
            .map_err(|e| e.into_data_error())
    }

    /// Create a pool without connecting. The first query establishes the
    /// connection; configuration errors still surface immediately.
    pub fn connect_lazy(&self) -> SqlxResult<PgPool> {
        if self.connection_string.is_none() && self.host.is_none() {
            return Err(DataError::validation(
                "database config needs a connection_string or a host",
            ));
        }
        let opts = self.connect_options()?;
        Ok(self.pool_options().connect_lazy_with(opts))
    }
}
