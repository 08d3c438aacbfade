//! Peregrine - interactive iterative DNS lookups.
//!
//! Starts from a user-supplied root server and walks the delegation chain
//! itself for every `lookup` command, printing the answers and caching
//! every record seen along the way.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use console::style;
use peregrine_cache::RecordCache;
use peregrine_resolver::{IterativeResolver, ResolverConfig, UdpTransport};
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

mod repl;

/// Handle for swapping the log filter while the loop runs (`trace on|off`).
pub(crate) type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Iterative stub DNS resolver
///
/// Resolves names by walking the delegation chain from the given root
/// server, following referrals, CNAME chains, and glue records.
#[derive(Parser, Debug)]
#[command(name = "peregrine")]
#[command(version, about, long_about = None)]
struct Cli {
    /// IP address (dotted form) of the root DNS server to start lookups at
    root_server: String,

    /// Receive timeout for a single UDP exchange, in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5)]
    timeout_secs: u64,

    /// Base log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

/// Initializes the tracing subscriber behind a reloadable filter.
fn init_tracing(base_level: &str) -> FilterHandle {
    let filter =
        EnvFilter::try_new(base_level).unwrap_or_else(|_| EnvFilter::new(repl::DEFAULT_LEVEL));
    let (filter, handle) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time(),
        )
        .init();

    handle
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let root: IpAddr = cli
        .root_server
        .parse()
        .map_err(|_| anyhow!("invalid root server address '{}'", cli.root_server))?;

    let filter_handle = init_tracing(&cli.log_level);

    let config = ResolverConfig {
        timeout: Duration::from_secs(cli.timeout_secs),
        ..ResolverConfig::default()
    };

    // No resolution can happen without the socket; bailing here is the one
    // fatal error path.
    let transport = UdpTransport::bind(config.timeout).context("failed to open the UDP socket")?;

    let resolver = IterativeResolver::with_config(config, transport, Arc::new(RecordCache::new()));

    println!("Root DNS server is: {}", style(root).cyan().bold());

    let mut repl = repl::Repl::new(resolver, root, filter_handle, cli.log_level);
    repl.run()?;

    println!("Goodbye!");
    Ok(())
}
