use async_trait::async_trait;
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_postgres::types::Type;
use tokio_postgres::{Client, Config};
use tracing::{debug, error};

use crate::error::{DbFailure, ProbeError, Result};
use crate::traits::DatabaseDriver;
use crate::types::RawQueryResult;

struct OpenConnection {
    client: Client,
    task: JoinHandle<()>,
}

/// PostgreSQL driver implementation using tokio-postgres.
///
/// The connection URI is only parsed when [`DatabaseDriver::connect`] runs, so
/// a malformed or missing URI surfaces as a connection failure.
pub struct TokioPostgresDriver {
    database_url: Option<String>,
    state: Mutex<Option<OpenConnection>>,
}

impl TokioPostgresDriver {
    pub fn new(database_url: Option<String>) -> Self {
        Self {
            database_url,
            state: Mutex::new(None),
        }
    }

    fn config(&self) -> Result<Config> {
        let url = self
            .database_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ProbeError::MissingConnectionUri)?;
        url.parse::<Config>()
            .map_err(|e| ProbeError::ConnectionFailed(e.into()))
    }
}

/// TLS as libpq does it for `prefer` and `require`: encrypt, but do not verify
/// the server certificate. `sslmode=disable` skips TLS entirely.
fn make_tls() -> Result<MakeTlsConnector> {
    let connector = TlsConnector::builder()
        .danger_accept_invalid_certs(true)
        .danger_accept_invalid_hostnames(true)
        .build()
        .map_err(|e| ProbeError::ConnectionFailed(DbFailure::new(e.to_string())))?;
    Ok(MakeTlsConnector::new(connector))
}

#[async_trait]
impl DatabaseDriver for TokioPostgresDriver {
    async fn connect(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        if state.is_some() {
            return Ok(());
        }

        let config = self.config()?;
        debug!(hosts = ?config.get_hosts(), ssl_mode = ?config.get_ssl_mode(), "connecting");

        let (client, connection) = config
            .connect(make_tls()?)
            .await
            .map_err(|e| ProbeError::ConnectionFailed(e.into()))?;

        // The connection future drives the socket; it ends once the client is dropped.
        let task = tokio::spawn(async move {
            if let Err(e) = connection.await {
                error!(error = %e, "PostgreSQL connection error");
            }
        });

        *state = Some(OpenConnection { client, task });
        Ok(())
    }

    async fn execute(&self, sql: &str) -> Result<RawQueryResult> {
        let state = self.state.lock().await;
        let conn = state.as_ref().ok_or_else(|| {
            ProbeError::QueryFailed(DbFailure::new("connection is not open"))
        })?;

        let rows = conn
            .client
            .query(sql, &[])
            .await
            .map_err(|e| ProbeError::QueryFailed(e.into()))?;

        let columns: Vec<String> = match rows.first() {
            Some(row) => row.columns().iter().map(|c| c.name().to_string()).collect(),
            None => Vec::new(),
        };

        let result_rows: Vec<Vec<String>> = rows
            .iter()
            .map(|row| {
                row.columns()
                    .iter()
                    .enumerate()
                    .map(|(i, col)| row_value_to_string(row, i, col.type_()))
                    .collect()
            })
            .collect();

        Ok(RawQueryResult::new(columns, result_rows))
    }

    async fn disconnect(&self) -> Result<()> {
        let Some(OpenConnection { client, task }) = self.state.lock().await.take() else {
            return Ok(());
        };
        drop(client);
        task.await
            .map_err(|e| ProbeError::DisconnectFailed(DbFailure::new(e.to_string())))?;
        debug!("disconnected");
        Ok(())
    }

    async fn is_connected(&self) -> bool {
        self.state.lock().await.is_some()
    }
}

/// Convert a row value at a given index to a string, dispatching on the
/// column's declared type.
fn row_value_to_string(row: &tokio_postgres::Row, index: usize, type_: &Type) -> String {
    fn render<T: ToString>(value: std::result::Result<Option<T>, tokio_postgres::Error>) -> String {
        match value {
            Ok(Some(v)) => v.to_string(),
            Ok(None) => "NULL".to_string(),
            Err(_) => "UNKNOWN".to_string(),
        }
    }

    match *type_ {
        Type::INT2 => render(row.try_get::<_, Option<i16>>(index)),
        Type::INT4 => render(row.try_get::<_, Option<i32>>(index)),
        Type::INT8 => render(row.try_get::<_, Option<i64>>(index)),
        Type::FLOAT4 => render(row.try_get::<_, Option<f32>>(index)),
        Type::FLOAT8 => render(row.try_get::<_, Option<f64>>(index)),
        Type::BOOL => render(row.try_get::<_, Option<bool>>(index)),
        // Text-like types (text, varchar, name, bpchar, unknown)
        _ => render(row.try_get::<_, Option<String>>(index)),
    }
}
