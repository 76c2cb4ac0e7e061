use std::process::ExitCode;

use pgprobe::config::{self, EnvSource, ProcessEnv, CONNECTION_URI_VAR, DATABASE_URL_VAR};
use pgprobe::{check, ClientOptions, ConnectionSettings, Console, ProbeClient};
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_tracing(options: &ClientOptions) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(options.filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// The environment is mutated here, while the process is still single-threaded;
// the runtime is only built afterwards.
fn main() -> ExitCode {
    dotenv::dotenv().ok();

    let options = ClientOptions::default();
    init_tracing(&options);

    let mut env = ProcessEnv;
    let settings = ConnectionSettings::from_env(&env);

    println!("Testing database connection...");
    println!("{}: {}", config::PROVIDER_VAR, settings.provider_display());
    println!("{}: {}", CONNECTION_URI_VAR, settings.connection_uri_preview());

    if config::apply_url_alias(&mut env) {
        println!("Mapped {CONNECTION_URI_VAR} to {DATABASE_URL_VAR}");
    }

    let client = ProbeClient::new(env.get(DATABASE_URL_VAR), options);

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "failed to start the async runtime");
            return ExitCode::FAILURE;
        }
    };

    let outcome = runtime.block_on(check::run(&client, &mut Console::stdio()));
    ExitCode::from(&outcome)
}
