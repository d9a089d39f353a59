//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `batch_fetch` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Writing the JSON report to stdout
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::ffi::OsString;
use std::process;

use batch_fetch::config::{DEFAULT_MAX_ATTEMPTS, DEFAULT_PROXY_TYPE, DEFAULT_TIMEOUT_SECS};
use batch_fetch::export::write_report;
use batch_fetch::initialization::init_logger_with;
use batch_fetch::{parse_list, run_batch, Config, FetchPolicy, LogFormat, LogLevel};

/// Fetch a batch of URLs concurrently and print a JSON report.
#[derive(Debug, Parser)]
#[command(name = "batch_fetch", version, about)]
struct Cli {
    /// Comma-separated URLs to fetch
    #[arg(long)]
    urls: String,

    /// Comma-separated proxy URIs to rotate through
    #[arg(long, default_value = "")]
    proxies: String,

    /// Proxy-type label echoed back in the report
    #[arg(long, default_value = DEFAULT_PROXY_TYPE)]
    proxy_type: String,

    /// Per-attempt timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Maximum attempts per URL, including the first one
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_retries: u32,

    /// Log level: error, warn, info, debug or trace
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    /// Log format: plain or json
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    /// Leave the per-attempt trace out of the results
    #[arg(long)]
    no_trace: bool,

    /// Validate TLS certificates
    #[arg(long)]
    verify_tls: bool,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            urls: parse_list(&self.urls),
            proxies: parse_list(&self.proxies),
            proxy_type: self.proxy_type,
            timeout_seconds: self.timeout,
            max_attempts: self.max_retries,
            policy: FetchPolicy {
                capture_trace: !self.no_trace,
                accept_invalid_certs: !self.verify_tls,
            },
        }
    }
}

/// Flags existing callers pass with a single dash (`-urls`, `-timeout=5`).
const SINGLE_DASH_FLAGS: &[&str] = &["urls", "proxies", "proxy-type", "timeout", "max-retries"];

/// Rewrites single-dash spellings of the long flags to `--` form.
///
/// Short flags, values and anything not in [`SINGLE_DASH_FLAGS`] pass through untouched.
fn normalize_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-') else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if SINGLE_DASH_FLAGS.contains(&name) {
                OsString::from(format!("-{text}"))
            } else {
                arg
            }
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let log_level = cli.log_level.clone();
    let log_format = cli.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let config = cli.into_config();

    match run_batch(config).await {
        Ok(report) => {
            if let Err(e) = write_report(&report, std::io::stdout().lock()) {
                eprintln!("batch_fetch error: {:#}", e);
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("batch_fetch error: {:#}", e);
            process::exit(1);
        }
    }
}
