//! The end-to-end connectivity check.

use std::fmt::Display;
use std::io::{self, Write};
use std::process::ExitCode;

use tracing::debug;

use crate::client::ProbeClient;
use crate::error::{ProbeError, Result};
use crate::hints;

pub const VERSION_QUERY: &str = "SELECT version()";

const UNKNOWN_VERSION: &str = "Unknown";

/// Where the check writes its report: progress to `out`, failures to `err`.
pub struct Console<O: Write, E: Write> {
    pub out: O,
    pub err: E,
}

impl Console<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        Self {
            out: io::stdout(),
            err: io::stderr(),
        }
    }
}

impl Console<Vec<u8>, Vec<u8>> {
    /// A console that buffers everything, for inspecting the report.
    pub fn buffered() -> Self {
        Self {
            out: Vec::new(),
            err: Vec::new(),
        }
    }

    pub fn out_text(&self) -> String {
        String::from_utf8_lossy(&self.out).into_owned()
    }

    pub fn err_text(&self) -> String {
        String::from_utf8_lossy(&self.err).into_owned()
    }
}

#[derive(Debug)]
pub enum CheckOutcome {
    Success { version: String },
    Failure { error: ProbeError },
}

impl CheckOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CheckOutcome::Success { .. })
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            CheckOutcome::Success { .. } => 0,
            CheckOutcome::Failure { .. } => 1,
        }
    }
}

impl From<&CheckOutcome> for ExitCode {
    fn from(outcome: &CheckOutcome) -> Self {
        ExitCode::from(outcome.exit_code())
    }
}

/// Connect, ask for the server version, disconnect.
///
/// Any failure along the way, including the final disconnect, turns into a
/// report on `console.err` followed by a best-effort disconnect whose own
/// error is dropped.
pub async fn run<O: Write, E: Write>(
    client: &ProbeClient,
    console: &mut Console<O, E>,
) -> CheckOutcome {
    say(&mut console.out, "\nAttempting to connect...");

    match probe(client, console).await {
        Ok(version) => CheckOutcome::Success { version },
        Err(error) => {
            report_failure(&error, &mut console.err).ok();
            if let Err(e) = client.disconnect().await {
                debug!(error = %e, "ignoring disconnect failure after failed check");
            }
            CheckOutcome::Failure { error }
        }
    }
}

async fn probe<O: Write, E: Write>(
    client: &ProbeClient,
    console: &mut Console<O, E>,
) -> Result<String> {
    client.connect().await?;
    say(&mut console.out, "✅ Database connection successful!");

    let result = client.query_raw(VERSION_QUERY).await?;
    say(&mut console.out, "✅ Database query successful!");

    let version = result
        .first_row()
        .and_then(|row| row.get("version").ok())
        .unwrap_or(UNKNOWN_VERSION)
        .to_string();
    say(&mut console.out, format_args!("PostgreSQL version: {version}"));

    client.disconnect().await?;
    Ok(version)
}

/// Progress lines are best-effort; a closed stdout must not change the outcome.
fn say<W: Write>(out: &mut W, line: impl Display) {
    writeln!(out, "{line}").ok();
}

/// Writes the error code, message, full error and any matching hints.
pub fn report_failure<W: Write + ?Sized>(error: &ProbeError, err: &mut W) -> io::Result<()> {
    writeln!(err, "\n❌ Database connection failed:")?;
    writeln!(err, "Error code: {}", error.code().unwrap_or("none"))?;
    let message = error.message();
    writeln!(err, "Error message: {message}")?;
    writeln!(err, "\nFull error: {error:#?}")?;

    for hint in hints::matching_hints(&message) {
        hint.write_to(&mut *err)?;
    }
    Ok(())
}
