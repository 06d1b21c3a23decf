use anyhow::Result;
use clap::{Parser, Subcommand};
use packdex::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "packdex")]
#[command(
    author,
    version = "0.2.1",
    about = "A CLI/TUI modpack browser and live status board for a community Minecraft server"
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Mod data file override for this invocation
    #[arg(long)]
    mods_file: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    Tui,

    /// Browse the mod catalog
    Mods {
        #[command(subcommand)]
        action: ModCommands,
    },

    /// List category tabs and their mod counts
    Categories,

    /// List the distinct tags in the pack
    Tags,

    /// Check the server status once
    Status,

    /// Open the live map in a browser
    Map,
}

#[derive(Subcommand)]
enum ModCommands {
    /// List every mod in the pack
    List,
    /// Search the catalog
    Search {
        /// Free-text query matched against name, description, and more
        #[arg(default_value = "")]
        query: String,
        /// Only show mods in this category
        #[arg(short, long)]
        category: Option<String>,
        /// Only show mods with this tag
        #[arg(short, long)]
        tag: Option<String>,
        /// Sort key: name, category, tag
        #[arg(short, long, default_value = "name")]
        sort: String,
    },
    /// Show full details for one mod
    Info { name: String },
}

fn setup_logging(verbosity: u8, also_stderr: bool) {
    let filter = match verbosity {
        0 => "packdex=info",
        1 => "packdex=debug",
        2 => "packdex=trace",
        _ => "trace",
    };

    // Write logs to a file to avoid corrupting the TUI
    let log_dir = std::env::var_os("HOME")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join(".packdex");

    std::fs::create_dir_all(&log_dir).ok();
    let log_file = log_dir.join("packdex.log");

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .expect("Failed to open log file");

    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::sync::Arc::new(file));

    if also_stderr {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let is_tui = matches!(cli.command, Some(Commands::Tui) | None);
    setup_logging(cli.verbose, !is_tui);

    // Load configuration
    let mut config = Config::load().await?;
    if let Some(mods_file) = cli.mods_file.as_deref() {
        let trimmed = mods_file.trim();
        if trimmed.is_empty() {
            anyhow::bail!("--mods-file cannot be empty");
        }
        config.mods_file_override = Some(trimmed.to_string());
    }

    // Initialize app
    let mut app = App::new(config).await?;

    match cli.command {
        Some(Commands::Tui) | None => {
            // Launch TUI (default behavior)
            app.run_tui().await?;
        }
        Some(Commands::Mods { action }) => match action {
            ModCommands::List => app.cmd_mod_list().await?,
            ModCommands::Search {
                query,
                category,
                tag,
                sort,
            } => {
                app.cmd_mod_search(&query, category.as_deref(), tag.as_deref(), &sort)
                    .await?
            }
            ModCommands::Info { name } => app.cmd_mod_info(&name).await?,
        },
        Some(Commands::Categories) => app.cmd_categories().await?,
        Some(Commands::Tags) => app.cmd_tags().await?,
        Some(Commands::Status) => app.cmd_status().await?,
        Some(Commands::Map) => app.cmd_map().await?,
    }

    Ok(())
}
