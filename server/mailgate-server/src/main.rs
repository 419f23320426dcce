use anyhow::Result;
use clap::Parser;
use std::{env, net::SocketAddr};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mailgate_server::{create_app, MailGateServer};

/// MailGate HTTP Server
#[derive(Parser, Debug)]
#[command(name = "mailgate-server")]
#[command(about = "Authenticated outbound-email gateway HTTP API server")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Server port
    #[arg(short, long, default_value = "8787")]
    port: u16,

    /// Run embedded migrations before serving
    #[arg(long)]
    migrate: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    init_tracing(args.verbose);

    info!("Starting MailGate HTTP server");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let server = MailGateServer::new().await?;

    if args.migrate {
        info!("Running embedded migrations");
        server.migrate().await?;
    }

    let app = create_app(server);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("MailGate server running on http://{}", addr);
    info!("Health check available at: http://{}/health", addr);
    info!(
        "API documentation available at: http://{}/api-docs/openapi.json",
        addr
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "mailgate_server={level},tower_http=info,sqlx=warn,reqwest=info",
            level = default_level
        )
        .into()
    });

    let is_development =
        env::var("MAILGATE_ENV").unwrap_or_else(|_| "development".to_string()) == "development";

    if is_development {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    } else {
        // Structured JSON logging for production
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(false).json())
            .init();
    }
}
