use std::fmt;
use std::time::Duration as StdDuration;

use anyhow::{Context as _, bail};
use chrono::Duration;

use crate::domain::types::{
    DEFAULT_RESET_CODE_TTL_SECS, MAX_RESET_CODE_TTL_SECS, MIN_RESET_CODE_TTL_SECS,
};

const DEFAULT_AUTH_PORT: u16 = 3112;
const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Mail relay settings used by [`crate::infra::mailer::HttpMailer`].
#[derive(Clone)]
pub struct MailConfig {
    /// Relay endpoint accepting `POST` JSON messages. Env var: `MAIL_API_URL`.
    pub api_url: String,
    /// Bearer key for the relay. Env var: `MAIL_API_KEY`.
    pub api_key: String,
    /// Sender address. Env var: `MAIL_FROM`.
    pub from_address: String,
}

/// Auth service configuration loaded from environment variables.
pub struct AuthConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// HMAC secret bearer tokens are validated with. Env var: `JWT_SECRET`.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3112). Env var: `AUTH_PORT`.
    pub auth_port: u16,
    /// Reset code lifetime, 300..=900 seconds (default 600). Env var: `RESET_CODE_TTL_SECS`.
    pub reset_code_ttl: Duration,
    /// Expired-code sweep period (default 60s). Env var: `CODE_SWEEP_INTERVAL_SECS`.
    pub sweep_interval: StdDuration,
    pub mail: MailConfig,
}

const REDACTED: &str = "<redacted>";

// Secrets and the database URL are never rendered.
impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &REDACTED)
            .field("from_address", &self.from_address)
            .finish()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("database_url", &REDACTED)
            .field("jwt_secret", &REDACTED)
            .field("auth_port", &self.auth_port)
            .field("reset_code_ttl", &self.reset_code_ttl)
            .field("sweep_interval", &self.sweep_interval)
            .field("mail", &self.mail)
            .finish()
    }
}

impl AuthConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |key: &str| lookup(key).with_context(|| format!("{key} is not set"));

        let auth_port = match lookup("AUTH_PORT") {
            Some(v) => v.parse().with_context(|| format!("invalid AUTH_PORT {v:?}"))?,
            None => DEFAULT_AUTH_PORT,
        };
        let sweep_secs = match lookup("CODE_SWEEP_INTERVAL_SECS") {
            Some(v) => v
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .with_context(|| format!("invalid CODE_SWEEP_INTERVAL_SECS {v:?}"))?,
            None => DEFAULT_SWEEP_INTERVAL_SECS,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            auth_port,
            reset_code_ttl: parse_reset_code_ttl(lookup("RESET_CODE_TTL_SECS").as_deref())?,
            sweep_interval: StdDuration::from_secs(sweep_secs),
            mail: MailConfig {
                api_url: required("MAIL_API_URL")?,
                api_key: required("MAIL_API_KEY")?,
                from_address: required("MAIL_FROM")?,
            },
        })
    }
}

fn parse_reset_code_ttl(raw: Option<&str>) -> anyhow::Result<Duration> {
    let secs = match raw {
        Some(v) => v
            .parse::<i64>()
            .with_context(|| format!("invalid RESET_CODE_TTL_SECS {v:?}"))?,
        None => DEFAULT_RESET_CODE_TTL_SECS,
    };
    if !(MIN_RESET_CODE_TTL_SECS..=MAX_RESET_CODE_TTL_SECS).contains(&secs) {
        bail!(
            "RESET_CODE_TTL_SECS must be within {MIN_RESET_CODE_TTL_SECS}..={MAX_RESET_CODE_TTL_SECS}, got {secs}"
        );
    }
    Ok(Duration::seconds(secs))
}
