//! Deep Router command line
//!
//! Resolves URLs against a directory of route files, the same way an
//! embedding application would, and prints what it found.
//!
//! # Architecture Overview
//!
//! ```text
//!   URL ──▶ segments ──▶ resolver ──▶ RouteDescriptor ──▶ dispatch ──▶ executor
//!                          ▲                │
//!                          │                └──▶ rewrite ──▶ new path
//!                 route map snapshot
//!                          ▲
//!            cache (TTL) ──┤
//!                          │
//!            fs scan of routes/ ◀── watcher (optional)
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use deep_router::config::loader::load_config;
use deep_router::config::watcher::RoutesWatcher;
use deep_router::dispatch::{dispatch, StaticFileExecutor};
use deep_router::observability::logging::init_logging;
use deep_router::{ParamChange, RouterConfig, Router};

const DEFAULT_CONFIG: &str = "deep-router.toml";

#[derive(Parser)]
#[command(name = "deep-router")]
#[command(about = "Resolve URLs against a tree of route files", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./deep-router.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Routes directory, overriding the configuration.
    #[arg(short, long)]
    routes: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL and print the route descriptor as JSON
    Resolve { url: String },
    /// List every known route
    Routes,
    /// Resolve a URL, apply changes (key=value, key, -key) and print the new path
    Rewrite { url: String, changes: Vec<String> },
    /// Resolve a URL and print the handler file it lands on
    Run { url: String },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None if Path::new(DEFAULT_CONFIG).exists() => load_config(Path::new(DEFAULT_CONFIG))?,
        None => RouterConfig::default(),
    };
    if let Some(routes) = cli.routes {
        config.routes.path = routes;
    }

    init_logging(&config.observability)?;

    tracing::debug!(
        routes = %config.routes.path.display(),
        cache = config.cache.enabled,
        ttl_secs = config.cache.ttl_secs,
        "Configuration loaded"
    );

    let router = Router::from_config(&config);

    // Keep the watcher alive for the whole command.
    let _watcher = match (config.cache.watch, router.cache()) {
        (true, Some(cache)) => Some(RoutesWatcher::new(&config.routes.path, cache.clone()).run()?),
        _ => None,
    };

    match cli.command {
        Commands::Resolve { url } => {
            let route = router.resolve(&url)?;
            println!("{}", serde_json::to_string_pretty(&route)?);
        }
        Commands::Routes => {
            let resolver = router.resolver()?;
            for (name, location) in resolver.routes().iter() {
                println!("{name}\t{location}");
            }
        }
        Commands::Rewrite { url, changes } => {
            let route = router.resolve(&url)?;
            let changes = changes.iter().map(|arg| ParamChange::parse_arg(arg));
            println!("{}", route.rewrite_url(changes));
        }
        Commands::Run { url } => {
            let mut route = router.resolve(&url)?;
            let output = dispatch(&mut route, &mut StaticFileExecutor, config.dispatch.max_reroutes)?;
            print!("{output}");
        }
    }

    Ok(())
}
