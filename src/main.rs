use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staffdesk::cli::{self, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staffdesk=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => cli::commands::init(cli.config.clone()).await,
        Commands::Migrate => cli::commands::migrate(config_path).await,
        Commands::Serve { host, port } => cli::commands::serve(config_path, host, port).await,
        Commands::List { format } => cli::commands::list(config_path, format).await,
    };

    if let Err(e) = result {
        cli::error(&format!("{:#}", e));
        std::process::exit(1);
    }
    Ok(())
}
