//! widgetbay server - serves component frontend bundles over HTTP.
//!
//! Registers the components given on the command line in the process-wide
//! registry and serves their local bundles under `/components/<name>/...`.

mod handler;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use widgetbay_core::{AppConfig, ComponentDeclaration, ComponentRegistry};

#[derive(Parser, Debug)]
#[command(name = "widgetbay-server")]
#[command(about = "HTTP server for widgetbay component bundles")]
struct Args {
    /// Port to listen on (0 = auto-assign)
    #[arg(short, long, default_value = "0")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Send `Access-Control-Allow-Origin: *` on every response
    #[arg(long)]
    allow_cross_origin: bool,

    /// Local component to serve, as NAME=DIR (repeatable)
    #[arg(long = "component", value_parser = parse_key_value)]
    components: Vec<(String, String)>,

    /// Remote component to register, as NAME=URL (repeatable)
    #[arg(long = "remote-component", value_parser = parse_key_value)]
    remote_components: Vec<(String, String)>,
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((name, value)) if !name.is_empty() && !value.is_empty() => {
            Ok((name.to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", s)),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("Starting {} server", AppConfig::APP_NAME);

    let registry = ComponentRegistry::instance();

    for (name, dir) in args.components {
        registry
            .register(ComponentDeclaration::from_path(name.clone(), PathBuf::from(dir)))
            .with_context(|| format!("failed to register component '{}'", name))?;
    }
    for (name, url) in args.remote_components {
        registry
            .register(ComponentDeclaration::from_url(name.clone(), url))
            .with_context(|| format!("failed to register component '{}'", name))?;
    }

    info!("Serving {} component(s): {:?}", registry.len(), registry.names());

    let options = server::ServerOptions {
        allow_cross_origin: args.allow_cross_origin,
    };
    let addr = server::start_server(registry, options, &args.host, args.port).await?;

    // Print port for supervising processes (intentional stdout)
    println!("SERVER_PORT={}", addr.port());

    info!("Component server running on {}", addr);

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received, exiting");

    Ok(())
}
