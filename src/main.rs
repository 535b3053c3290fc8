//! Game API console entry point.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use url::Url;

use game_api_console::config::Config;
use game_api_console::console::view::{
    render_connectivity, render_endpoint_list, render_form, render_response,
};
use game_api_console::console::{ConsoleController, Session, StatusIndicator};
use game_api_console::error::AppError;
use game_api_console::export::{self, export_last_response, export_value};
use game_api_console::health::{check_health, ConnectivityPoller, PollSettings};
use game_api_console::metrics;
use game_api_console::registry::{EndpointRegistry, HEALTH_ENDPOINT_KEY, LOGS_ENDPOINT_KEY};
use game_api_console::transport::{endpoint_url, HttpTransport};

/// Manual console for the local game catalogue API.
#[derive(Parser, Debug)]
#[command(name = "game-api-console")]
#[command(about = "Pick an endpoint, fill in parameters, send it and read the JSON response")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// API base address (overrides CONSOLE_API_BASE).
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive console (default).
    Console,

    /// List registered endpoints.
    Endpoints,

    /// Show the form for one endpoint.
    Describe {
        /// Endpoint key.
        key: String,
    },

    /// Send one request and print the response.
    Send {
        /// Endpoint key.
        key: String,

        /// Parameter as name=value; repeatable.
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,

        /// JSON request body for endpoints that take one.
        #[arg(long)]
        body: Option<String>,

        /// Save the response JSON to this file.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check server connectivity once.
    Health,

    /// Poll server connectivity until interrupted.
    Watch,

    /// Fetch the server request log and save it to a file.
    ExportLogs {
        /// Output file (default: timestamped file in CONSOLE_EXPORT_DIR).
        path: Option<PathBuf>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got {}", raw))
}

fn main() -> anyhow::Result<()> {
    // The local offset can only be read reliably while single-threaded
    export::capture_local_offset();
    run()
}

#[tokio::main]
async fn run() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();
    let mut config = Config::load()?;

    // Initialize logging
    let filter = if args.verbose || config.verbose {
        EnvFilter::new("game_api_console=debug,info")
    } else {
        EnvFilter::try_new(&config.rust_log).unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Initialize metrics
    metrics::init_metrics();

    apply_overrides(&mut config, args.api_base)?;
    let base = config.api_base().map_err(|e| anyhow::anyhow!(e))?;

    match args.command {
        Some(Command::Endpoints) => cmd_endpoints(),
        Some(Command::Describe { key }) => cmd_describe(base, &key),
        Some(Command::Send {
            key,
            params,
            body,
            output,
        }) => cmd_send(&config, base, &key, params, body, output).await,
        Some(Command::Health) => cmd_health(&config, base).await,
        Some(Command::Watch) => cmd_watch(&config, base).await,
        Some(Command::ExportLogs { path }) => cmd_export_logs(&config, base, path).await,
        Some(Command::Console) | None => cmd_console(&config, base).await,
    }
}

/// Apply CLI overrides and validate the result.
fn apply_overrides(config: &mut Config, api_base: Option<String>) -> anyhow::Result<()> {
    if let Some(api_base) = api_base {
        config.console_api_base = api_base;
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        return Err(AppError::InvalidConfig(e).into());
    }

    Ok(())
}

fn health_url(base: &Url) -> Url {
    let registry = EndpointRegistry::builtin();
    let path = registry
        .get(HEALTH_ENDPOINT_KEY)
        .map(|e| e.path.as_str())
        .unwrap_or("/api/health");
    endpoint_url(base, path)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

/// List registered endpoints.
fn cmd_endpoints() -> anyhow::Result<()> {
    let registry = EndpointRegistry::builtin();
    print!("{}", render_endpoint_list(registry, &registry.default_endpoint().key));
    Ok(())
}

/// Show the form for one endpoint.
fn cmd_describe(base: Url, key: &str) -> anyhow::Result<()> {
    let console = ConsoleController::new(EndpointRegistry::builtin(), base, HttpTransport::new()?);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, key)?;
    print!("{}", render_form(&state));
    Ok(())
}

/// Send one request and print the response.
async fn cmd_send(
    config: &Config,
    base: Url,
    key: &str,
    params: Vec<(String, String)>,
    body: Option<String>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let transport = HttpTransport::with_timeout(config.request_timeout())?;
    let console = ConsoleController::new(EndpointRegistry::builtin(), base, transport);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, key)?;

    for (name, value) in params {
        state.set_param(&name, value)?;
    }
    if let Some(body) = body {
        state.set_body(body)?;
    }

    console.send_request(&mut state).await?;
    print!("{}", render_response(&state));

    if state.status() == StatusIndicator::Error {
        anyhow::bail!("request to {} failed", key);
    }

    if let (Some(output), Some(value)) = (output, state.last_response()) {
        let path = export_value(value, &output)?;
        println!("Saved response to {}", path.display());
    }

    Ok(())
}

/// Check server connectivity once.
async fn cmd_health(config: &Config, base: Url) -> anyhow::Result<()> {
    let transport = HttpTransport::new()?;
    let url = health_url(&base);
    let connectivity = check_health(&transport, &url, config.health_timeout()).await;

    println!("{}: {}", url, connectivity);

    if !connectivity.is_online() {
        anyhow::bail!("server is not healthy");
    }
    Ok(())
}

/// Poll server connectivity until interrupted.
async fn cmd_watch(config: &Config, base: Url) -> anyhow::Result<()> {
    let url = health_url(&base);
    let poller = ConnectivityPoller::spawn(
        HttpTransport::new()?,
        url.clone(),
        PollSettings::from_config(config),
    );
    let mut updates = poller.subscribe();

    info!(
        "Polling {} every {}s (Ctrl-C to stop)",
        url, config.console_health_interval_secs
    );

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                let at = snapshot
                    .last_checked
                    .map(|t| t.to_offset(export::capture_local_offset()))
                    .map(|t| format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second()))
                    .unwrap_or_default();
                println!("[{}] {}", at, render_connectivity(&snapshot));
            }
            _ = shutdown_signal() => {
                info!("Stopping poller");
                break;
            }
        }
    }

    poller.shutdown();
    Ok(())
}

/// Fetch the server request log and save it to a file.
async fn cmd_export_logs(config: &Config, base: Url, path: Option<PathBuf>) -> anyhow::Result<()> {
    let transport = HttpTransport::with_timeout(config.request_timeout())?;
    let console = ConsoleController::new(EndpointRegistry::builtin(), base, transport);
    let mut state = console.initial_state();
    console.select_endpoint(&mut state, LOGS_ENDPOINT_KEY)?;
    console.send_request(&mut state).await?;

    let Some(value) = state.last_response() else {
        print!("{}", render_response(&state));
        anyhow::bail!("could not fetch logs");
    };

    let path = match path {
        Some(path) => export_value(value, &path)?,
        None => export_last_response(&state, None, &config.console_export_dir)?,
    };

    let count = value.get("count").and_then(|c| c.as_u64()).unwrap_or(0);
    println!("Exported {} logs to {}", count, path.display());
    Ok(())
}

/// Interactive console.
async fn cmd_console(config: &Config, base: Url) -> anyhow::Result<()> {
    let transport = HttpTransport::with_timeout(config.request_timeout())?;
    let poller = ConnectivityPoller::spawn(
        transport.clone(),
        health_url(&base),
        PollSettings::from_config(config),
    );
    let console = ConsoleController::new(EndpointRegistry::builtin(), base, transport);
    let mut session = Session::new(&console, poller.subscribe(), config.console_export_dir.clone());

    let stdin = BufReader::new(tokio::io::stdin());
    session
        .run(stdin, &mut std::io::stdout(), shutdown_signal())
        .await?;

    poller.shutdown();
    Ok(())
}
