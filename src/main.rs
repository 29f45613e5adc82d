// Copyright 2026 Vulntrack Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use vulntrack::registry::SourceRegistry;
use vulntrack::rest::{self, AppState};

#[derive(Parser)]
#[command(
    name = "vulntrack",
    about = "Cloud security-bulletin tracker — scrape, classify, serve",
    version
)]
struct Cli {
    /// Port for the HTTP API
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Bind address
    #[arg(long, default_value = "127.0.0.1")]
    bind: IpAddr,

    /// Enable verbose/debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let directive = if cli.verbose {
        "vulntrack=debug"
    } else {
        "vulntrack=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(directive.parse().expect("directive is valid")),
        )
        .init();

    tracing::info!("starting vulntrack v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(AppState::new(SourceRegistry::with_defaults()));
    let addr = SocketAddr::new(cli.bind, cli.port);
    rest::serve(addr, state).await
}
