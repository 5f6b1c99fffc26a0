//! Roster UI server - JSON API over the in-memory user registry.

mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;
use axum::Router;
use clap::Parser;
use roster::io::config::{DEFAULT_CONFIG_PATH, load_config, parse_bind};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::state::SharedState;

#[derive(Parser)]
#[command(name = "roster-ui")]
#[command(about = "JSON API for user registration, login and filtered listing")]
struct Args {
    /// Config file (defaults apply when missing)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Address to bind the server to (overrides config)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roster_ui=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let config = load_config(&args.config).context("load config")?;
    let mut server = config.server.clone();
    if let Some(bind) = args.bind {
        parse_bind(&bind).context("--bind")?;
        server.bind = bind;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    info!(
        config = %args.config.display(),
        duplicate_emails = ?config.registry.duplicate_emails,
        "starting roster-ui"
    );

    let state = SharedState::new(&config);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", routes::api_router())
        .layer(cors)
        .with_state(state);

    let addr: SocketAddr = server.socket_addr()?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
