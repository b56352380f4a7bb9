use clap::Parser;
use tracing_subscriber::EnvFilter;

use blog_api::config::{self, StoreBackend};

#[derive(Parser)]
#[command(name = "blog-api")]
#[command(about = "Blog API server - posts with owner-checked mutations")]
#[command(version)]
struct Cli {
    #[arg(long, help = "Bind address (overrides API_HOST)")]
    host: Option<String>,

    #[arg(long, help = "Listen port (overrides API_PORT)")]
    port: Option<u16>,

    #[arg(long, help = "Use the in-memory store instead of PostgreSQL")]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("blog_api=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = config::config().clone();
    if let Some(host) = cli.host {
        config.api.host = host;
    }
    if let Some(port) = cli.port {
        config.api.port = port;
    }
    if cli.memory {
        config.database.backend = StoreBackend::Memory;
    }

    blog_api::serve(config).await
}
