//! pgprobe - check that a PostgreSQL database is reachable and say why not
//!
//! # Example
//! ```ignore
//! use pgprobe::{check, config, ClientOptions, ConnectionSettings, Console, ProbeClient};
//!
//! let mut env = config::ProcessEnv;
//! config::apply_url_alias(&mut env);
//! let settings = ConnectionSettings::from_env(&env);
//!
//! let client = ProbeClient::new(settings.database_url, ClientOptions::default());
//! let outcome = check::run(&client, &mut Console::stdio()).await;
//! std::process::exit(outcome.exit_code().into());
//! ```

pub mod check;
pub mod config;
pub mod drivers;
pub mod error;
pub mod hints;
pub mod traits;
pub mod types;

mod client;

// Re-export main types for convenient access
pub use check::{CheckOutcome, Console};
pub use client::ProbeClient;
pub use config::{ClientOptions, ConnectionSettings, LogLevel};
pub use error::{DbFailure, ProbeError, Result};
pub use traits::DatabaseDriver;
pub use types::{QueryResult, RawQueryResult, Row};
