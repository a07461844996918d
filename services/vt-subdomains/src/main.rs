//! VirusTotal subdomain lister
//!
//! Single-binary CLI that:
//! 1. Reads the target domain from `-d` and API keys from VT_API_KEY{,2,3}
//! 2. Pages through VirusTotal's subdomains endpoint, switching keys on quota errors
//! 3. Prints the matching subdomains, sorted and deduplicated, to stdout

mod config;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vt_client::{Fetcher, SubdomainSet};
use vt_pool::CredentialPool;

use crate::config::{API_KEY_VARS, Config, api_keys_from_env};

const USAGE: &str = "Usage: -d domain.com";

#[derive(Parser, Debug)]
#[command(name = "vt-subdomains", version)]
#[command(about = "List the subdomains VirusTotal knows for a domain", long_about = None)]
struct Args {
    /// Domain to query (e.g., domain.com)
    #[arg(short = 'd', value_name = "DOMAIN")]
    domain: Option<String>,
}

impl Args {
    /// The domain to query, or None when missing or empty.
    fn domain(self) -> Option<String> {
        self.domain.filter(|d| !d.is_empty())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let Some(domain) = Args::parse().domain() else {
        println!("{USAGE}");
        return ExitCode::from(1);
    };

    match run(&domain).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "fatal");
            ExitCode::FAILURE
        }
    }
}

/// Initialize tracing on stderr with LOG_LEVEL / RUST_LOG filtering.
/// LOG_FORMAT=json switches to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
}

async fn run(domain: &str) -> Result<()> {
    let config = Config::discover().context("failed to load configuration")?;
    let keys = api_keys_from_env();
    run_with(domain, &config, keys, &mut io::stdout().lock()).await
}

/// Build the pool and fetcher, walk every page, and write the result to `out`.
async fn run_with<W: Write>(
    domain: &str,
    config: &Config,
    keys: Vec<String>,
    out: &mut W,
) -> Result<()> {
    let mut pool = CredentialPool::new(keys).with_context(|| {
        format!(
            "no API keys provided in environment variables ({})",
            API_KEY_VARS.join(", ")
        )
    })?;
    let fetcher = Fetcher::new(config.fetcher_config()).context("failed to build HTTP client")?;

    info!(
        domain,
        base_url = %config.api.base_url,
        keys = pool.len(),
        "querying subdomains"
    );

    let mut results = SubdomainSet::new();
    match fetcher.collect(domain, &mut pool, &mut results).await {
        Ok(_) => output::write_subdomains(out, &results).context("failed to write results"),
        Err(e) => {
            if config.output.flush_partial_on_error && !results.is_empty() {
                warn!(
                    subdomains = results.len(),
                    "writing partial results before exiting"
                );
                output::write_subdomains(out, &results)
                    .context("failed to write partial results")?;
            }
            Err(e).context("subdomain enumeration failed")
        }
    }
}
