use std::sync::Arc;

use tracing::debug;

use crate::config::{ClientOptions, LogLevel};
use crate::drivers::TokioPostgresDriver;
use crate::error::Result;
use crate::traits::DatabaseDriver;
use crate::types::QueryResult;

/// Main entry point for pgprobe.
/// Owns a driver and exposes connect, raw query and disconnect.
pub struct ProbeClient {
    driver: Arc<dyn DatabaseDriver>,
    options: ClientOptions,
}

impl ProbeClient {
    /// Build a client for the given connection URI. Nothing touches the
    /// network until [`ProbeClient::connect`].
    ///
    /// # Example
    /// ```ignore
    /// let client = ProbeClient::new(Some(url), ClientOptions::default());
    /// client.connect().await?;
    /// ```
    pub fn new(database_url: Option<String>, options: ClientOptions) -> Self {
        Self::with_driver(Arc::new(TokioPostgresDriver::new(database_url)), options)
    }

    /// Create a new client with a custom driver.
    /// Useful for testing or using alternative database drivers.
    pub fn with_driver(driver: Arc<dyn DatabaseDriver>, options: ClientOptions) -> Self {
        Self { driver, options }
    }

    pub async fn connect(&self) -> Result<()> {
        self.driver.connect().await
    }

    /// Run `sql` and return its rows, connecting first if needed.
    pub async fn query_raw(&self, sql: &str) -> Result<QueryResult> {
        if !self.driver.is_connected().await {
            self.driver.connect().await?;
        }
        if self.options.enabled(LogLevel::Query) {
            debug!(sql, "query");
        }
        let raw = self.driver.execute(sql).await?;
        Ok(QueryResult::from_raw(raw))
    }

    pub async fn disconnect(&self) -> Result<()> {
        self.driver.disconnect().await
    }
}
