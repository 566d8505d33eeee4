mod config;
mod error;

use std::path::PathBuf;

use capability::{CapabilitySet, CapabilityState, Catalog, ClusterCapabilities, capability_set};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use config::Config;
use error::{Error, Result};

const CONFIG_FILE: &str = "capctl.toml";

#[derive(Parser)]
#[command(name = "capctl")]
#[command(about = "Resolve which optional capabilities are active on a cluster", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the config file (default: ./capctl.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Catalog TOML file to use instead of the config's or the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show known, enabled, implicitly enabled and disabled capabilities
    Resolve {
        #[command(flatten)]
        observed: Observed,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show requested capabilities that are not enabled by any means
    Gaps {
        /// Capability to check (repeatable)
        #[arg(short, long = "request")]
        requested: Vec<String>,
        /// Capability already enabled by the caller (repeatable)
        #[arg(short, long = "enabled")]
        enabled: Vec<String>,
        #[command(flatten)]
        observed: Observed,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show the state of a single capability
    State {
        /// Capability name
        capability: String,
        #[command(flatten)]
        observed: Observed,
    },
    /// List catalog sets and their members
    Catalog,
}

#[derive(Args)]
struct Observed {
    /// Capability observed active on the cluster (repeatable, added to config)
    #[arg(short, long = "observed")]
    observed: Vec<String>,
}

/// Serialized form of `capctl resolve --json`.
#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    caps: &'a ClusterCapabilities,
    disabled: CapabilitySet,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = load(cli.config, cli.catalog)?;

    match cli.command {
        Commands::Resolve { observed, json } => cmd_resolve(&config, &observed, json),
        Commands::Gaps {
            requested,
            enabled,
            observed,
            json,
        } => cmd_gaps(&config, requested, enabled, &observed, json),
        Commands::State {
            capability,
            observed,
        } => cmd_state(&config, &capability, &observed),
        Commands::Catalog => cmd_catalog(&config.catalog()),
    }
}

fn cmd_resolve(config: &Config, observed: &Observed, json: bool) -> Result<()> {
    let caps = resolve(config, observed);
    let disabled = caps.disabled();

    if json {
        let report = Report {
            caps: &caps,
            disabled,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_set("Known", &caps.known);
    print_set("Enabled", &caps.enabled);
    print_set("Implicitly enabled", &caps.implicitly_enabled);
    print_set("Disabled", &disabled);
    Ok(())
}

fn cmd_gaps(
    config: &Config,
    requested: Vec<String>,
    enabled: Vec<String>,
    observed: &Observed,
    json: bool,
) -> Result<()> {
    let caps = resolve(config, observed);

    // No --request at all is "nothing to check", not "nothing missing".
    let requested = (!requested.is_empty()).then(|| capability_set(requested));
    let gaps = caps.gaps(requested.as_ref(), &capability_set(enabled));

    if json {
        println!("{}", serde_json::to_string_pretty(&gaps)?);
        return Ok(());
    }

    match gaps {
        None => println!("Nothing requested."),
        Some(gaps) if gaps.is_empty() => {
            println!("No gaps: every requested capability is enabled.");
        }
        Some(gaps) => {
            println!("Not enabled:");
            for cap in &gaps {
                println!("  {cap}");
            }
        }
    }
    Ok(())
}

fn cmd_state(config: &Config, capability: &str, observed: &Observed) -> Result<()> {
    let caps = resolve(config, observed);
    let state = caps.state_of(capability);
    println!("{capability}: {state}");

    if state == CapabilityState::Unknown {
        debug!(capability, "capability is not in any catalog set");
    }
    Ok(())
}

fn cmd_catalog(catalog: &Catalog) -> Result<()> {
    if catalog.sets.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    for name in catalog.set_names() {
        let marker = if name == catalog.current { " (current)" } else { "" };
        let members = catalog.get(name).map(join).unwrap_or_default();
        println!("{name}{marker}: {members}");
    }
    Ok(())
}

fn resolve(config: &Config, observed: &Observed) -> ClusterCapabilities {
    let mut all_observed = config.observed.clone();
    all_observed.extend(capability_set(observed.observed.iter().map(String::as_str)));

    ClusterCapabilities::from_spec(config.capabilities.as_ref(), &config.catalog(), &all_observed)
}

fn print_set(label: &str, set: &CapabilitySet) {
    println!("{label} ({}): {}", set.len(), join(set));
}

fn join(set: &CapabilitySet) -> String {
    set.iter()
        .map(|cap| cap.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn load(config: Option<PathBuf>, catalog: Option<PathBuf>) -> Result<Config> {
    let config = load_config(config)?;
    match catalog {
        Some(path) => Ok(config.with_catalog(Catalog::load(&path)?)?),
        None => Ok(config),
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) if !path.exists() => Err(Error::ConfigNotFound { path }),
        Some(path) => Ok(Config::load(&path)?),
        None => {
            let default_path = PathBuf::from(CONFIG_FILE);
            if default_path.exists() {
                Ok(Config::load(&default_path)?)
            } else {
                debug!("no {CONFIG_FILE}, using built-in catalog");
                Ok(Config::default())
            }
        }
    }
}
