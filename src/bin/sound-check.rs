/*!
 * Sound API connectivity check
 *
 * Checks the API with the health query and, when a private key is given,
 * runs the wallet login flow end to end.
 *
 * Usage:
 *   SOUND_API_KEY=<key> cargo run --bin sound-check -- --environment staging
 *   SOUND_API_KEY=<key> cargo run --bin sound-check -- --login-key 0x<hex>
 */

#![forbid(unsafe_code)]

use std::env;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sound_sdk::{Environment, LocalWallet, SoundClient};

const API_KEY_VAR: &str = "SOUND_API_KEY";

#[derive(Debug, Default)]
struct Args {
    environment: Environment,
    login_key: Option<String>,
}

fn print_usage() {
    println!("Sound API connectivity check");
    println!();
    println!("Usage:");
    println!("  sound-check [--environment <env>] [--login-key <hex>]");
    println!();
    println!("Options:");
    println!("  --environment <env>  production | preview | staging | development (default: production)");
    println!("  --login-key <hex>    Private key used to run the login flow");
    println!("  --help               Show this help message");
    println!();
    println!("Environment Variables:");
    println!("  {API_KEY_VAR}        API key sent as x-sound-client-key (required)");
    println!("  RUST_LOG             Log filter, e.g. sound_sdk=debug");
}

/// `Ok(None)` means help was requested
fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut iter = env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--environment" | "-e" => {
                let value = iter.next().context("--environment needs a value")?;
                args.environment = value.parse()?;
            }
            "--login-key" => {
                args.login_key = Some(iter.next().context("--login-key needs a value")?);
            }
            "--help" | "-h" => return Ok(None),
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(Some(args))
}

fn log_step(name: &str, passed: bool, detail: &str, started: Instant) {
    let status = if passed { "PASS".green().bold() } else { "FAIL".red().bold() };
    let elapsed = format!("({}ms)", started.elapsed().as_millis()).dimmed();
    println!("  {status} {name} {elapsed}");
    if !detail.is_empty() {
        println!("       {detail}");
    }
}

async fn run(args: Args) -> Result<bool> {
    let api_key = env::var(API_KEY_VAR).with_context(|| format!("{API_KEY_VAR} is not set"))?;
    let client = SoundClient::new(args.environment, api_key).context("failed to build client")?;

    println!(
        "{} {} ({})",
        "Sound API check:".cyan().bold(),
        client.environment(),
        client.endpoint()
    );

    let mut healthy = true;

    let started = Instant::now();
    match client.check().await {
        Ok(None) => log_step("health query", true, "", started),
        Ok(Some(check)) => {
            healthy = false;
            let messages: Vec<_> = check.errors.iter().map(|e| e.message.as_str()).collect();
            log_step("health query", false, &messages.join("; "), started);
        }
        Err(e) => {
            healthy = false;
            log_step("health query", false, &format!("{:#}", anyhow::Error::from(e)), started);
        }
    }

    if let Some(key) = args.login_key {
        let wallet = LocalWallet::from_private_key_hex(&key).context("invalid --login-key")?;
        let started = Instant::now();
        match client.login(&wallet).await {
            Ok(_) => log_step("login", true, &format!("signed in as {}", wallet.address()), started),
            Err(e) => {
                healthy = false;
                log_step("login", false, &format!("{:#}", anyhow::Error::from(e)), started);
            }
        }
    }

    Ok(healthy)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = match parse_args() {
        Ok(Some(args)) => args,
        Ok(None) => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            eprintln!("Use --help for usage");
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
