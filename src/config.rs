//! Environment-derived connection settings.

use std::collections::HashMap;

use tracing::{debug, warn};

pub const PROVIDER_VAR: &str = "DATABASE_PROVIDER";
pub const CONNECTION_URI_VAR: &str = "DATABASE_CONNECTION_URI";
/// The name the client reads its connection URI from.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Characters of the connection URI shown in diagnostic output.
pub const PREVIEW_CHARS: usize = 50;

const NOT_SET: &str = "NOT SET";

/// Key/value store the settings are read from.
pub trait EnvSource {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// The real process environment.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn set(&mut self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

impl EnvSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

fn non_empty<E: EnvSource + ?Sized>(env: &E, key: &str) -> Option<String> {
    env.get(key).filter(|v| !v.is_empty())
}

/// Copies `DATABASE_CONNECTION_URI` into `DATABASE_URL` when the latter is
/// unset. Returns whether a copy happened.
pub fn apply_url_alias<E: EnvSource + ?Sized>(env: &mut E) -> bool {
    if non_empty(env, DATABASE_URL_VAR).is_some() {
        return false;
    }
    let Some(uri) = non_empty(env, CONNECTION_URI_VAR) else {
        return false;
    };
    env.set(DATABASE_URL_VAR, &uri);
    debug!("mapped {} to {}", CONNECTION_URI_VAR, DATABASE_URL_VAR);
    true
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConnectionSettings {
    pub provider: Option<String>,
    pub connection_uri: Option<String>,
    pub database_url: Option<String>,
}

impl ConnectionSettings {
    pub fn from_env<E: EnvSource + ?Sized>(env: &E) -> Self {
        let settings = Self {
            provider: non_empty(env, PROVIDER_VAR),
            connection_uri: non_empty(env, CONNECTION_URI_VAR),
            database_url: non_empty(env, DATABASE_URL_VAR),
        };
        if let Some(provider) = settings.provider.as_deref() {
            if !is_postgres_provider(provider) {
                warn!(provider, "provider is not PostgreSQL; connecting over the PostgreSQL protocol anyway");
            }
        }
        settings
    }

    pub fn provider_display(&self) -> &str {
        self.provider.as_deref().unwrap_or(NOT_SET)
    }

    pub fn connection_uri_preview(&self) -> String {
        preview(self.connection_uri.as_deref())
    }
}

fn is_postgres_provider(provider: &str) -> bool {
    matches!(
        provider.to_ascii_lowercase().as_str(),
        "postgres" | "postgresql" | "cockroachdb" | "supabase"
    )
}

/// Shortened form of a connection URI that keeps the credentials past the
/// first [`PREVIEW_CHARS`] characters out of the output.
pub fn preview(uri: Option<&str>) -> String {
    match uri {
        Some(uri) => {
            let head: String = uri.chars().take(PREVIEW_CHARS).collect();
            format!("{head}...")
        }
        None => NOT_SET.to_string(),
    }
}

/// Severity the client logs at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Query,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Query => "debug",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub log: Vec<LogLevel>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            log: vec![LogLevel::Error, LogLevel::Warn],
        }
    }
}

impl ClientOptions {
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.log.contains(&level)
    }

    /// `tracing` filter directive for the most verbose enabled level, or
    /// `off` when none are enabled.
    pub fn filter(&self) -> &'static str {
        self.log
            .iter()
            .max()
            .map(|level| level.directive())
            .unwrap_or("off")
    }
}
