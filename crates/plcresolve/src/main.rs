//! plcresolve - resolve an AT Protocol handle to its did:plc identifier
//!
//! Fetches `https://<handle>/.well-known/atproto-did` and prints the DID
//! once it has been validated.

mod error;

use std::process::ExitCode;
use std::time::Duration;

use atproto_wellknown::{Cancellation, Did, Resolver, ResolverConfig};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::error::Result;

/// Exit code for any failed resolution (clap uses 2 for usage errors)
const EXIT_RESOLUTION_FAILED: u8 = 1;

#[derive(Debug, Parser)]
#[command(
    name = "plcresolve",
    version,
    about = "Resolve a Bluesky (AT Protocol) handle to its did:plc identifier"
)]
struct Cli {
    /// Bluesky (AT Protocol) handle (domain name), e.g. alice.bsky.social
    handle: String,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECONDS", value_parser = parse_timeout)]
    timeout: Option<Duration>,

    /// Print the handle and DID as JSON
    #[arg(long)]
    json: bool,

    /// Log resolution steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            timeout: self.timeout,
            ..ResolverConfig::default()
        }
    }
}

/// Seconds as a finite, non-negative float
fn parse_timeout(value: &str) -> std::result::Result<Duration, String> {
    let secs: f64 = value
        .parse()
        .map_err(|e| format!("{value:?} is not a number: {e}"))?;
    Duration::try_from_secs_f64(secs).map_err(|e| format!("{value:?} is not a valid timeout: {e}"))
}

#[derive(Debug, Serialize)]
struct Output<'a> {
    handle: &'a str,
    did: &'a Did,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("error: {}", e);
        return ExitCode::from(EXIT_RESOLUTION_FAILED);
    }

    match run(&cli).await {
        Ok(line) => {
            println!("{}", line);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Failed to retrieve valid DID for handle: {}", cli.handle);
            ExitCode::from(EXIT_RESOLUTION_FAILED)
        }
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("plcresolve={level}").parse()?)
        .add_directive(format!("atproto_wellknown={level}").parse()?);

    // Use JSON format for GCP Cloud Logging when LOG_FORMAT=json
    if std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false)
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_stackdriver::layer().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    };

    Ok(())
}

async fn run(cli: &Cli) -> Result<String> {
    let config = cli.resolver_config();
    debug!(handle = %cli.handle, timeout = ?config.timeout, "Resolving handle");

    // Ctrl+C cancels the in-flight fetch
    let (cancel_handle, cancel) = Cancellation::new();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            debug!("Interrupt received, cancelling resolution");
            cancel_handle.cancel();
        }
    });

    let resolver = Resolver::new(config);
    let result = resolver.resolve_with_cancel(&cli.handle, &cancel).await;
    interrupt.abort();

    let did = result?;
    info!(handle = %cli.handle, did = %did, "Received DID");

    render(&cli.handle, &did, cli.json)
}

fn render(handle: &str, did: &Did, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string(&Output { handle, did })?)
    } else {
        Ok(did.to_string())
    }
}
