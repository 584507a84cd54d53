use clap::{Parser, Subcommand};
use configuration::{ServerOverrides, Settings};
use std::path::PathBuf;

mod report;

/// The main entry point for the epirecords application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (DATABASE_URL) from the .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();
    let mut settings = configuration::load_config(&cli.config)?;
    let _log_guard = configuration::init_tracing(&settings.logging)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(overrides) => {
            overrides.apply(&mut settings.server);
            web_server::run_server(settings).await?;
        }
        Commands::InitSchema => {
            let pool = connect(&settings).await?;
            database::create_schema(&pool).await?;
        }
        Commands::Report(args) => {
            let pool = connect(&settings).await?;
            report::handle_report(args, pool).await?;
        }
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// REST API and reporting over the epidemiological records database.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file. Missing files fall back to defaults.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the CRUD API over HTTP.
    Serve(ServerOverrides),
    /// Create any missing table and exit.
    InitSchema,
    /// Run the analytical reporting script and print its result sets.
    Report(report::ReportArgs),
}

async fn connect(settings: &Settings) -> anyhow::Result<database::PgPool> {
    let pool = database::connect(
        settings.database.max_connections,
        settings.database.acquire_timeout(),
    )
    .await?;
    Ok(pool)
}
