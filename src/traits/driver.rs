use async_trait::async_trait;

use crate::error::Result;
use crate::types::RawQueryResult;

/// Trait for database driver implementations.
/// Drivers are responsible for:
/// - Opening and closing the connection
/// - Executing queries and converting results to RawQueryResult
#[async_trait]
pub trait DatabaseDriver: Send + Sync {
    /// Open the connection. Calling this on an open driver is a no-op.
    async fn connect(&self) -> Result<()>;

    /// Execute a SQL query without parameters.
    async fn execute(&self, sql: &str) -> Result<RawQueryResult>;

    /// Close the connection. Calling this on a closed driver is a no-op.
    async fn disconnect(&self) -> Result<()>;

    /// Whether the driver currently holds an open connection.
    async fn is_connected(&self) -> bool;
}
