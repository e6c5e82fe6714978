use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use todosync::config::{Config, ConfigStore};
use todosync::item::ItemView;
use todosync::store::HttpStore;
use todosync::sync::SyncEngine;
use todosync::ui::list::CommandSurface;

#[derive(Parser, Debug)]
#[command(name = "todosync", version, about = "Todo list kept in sync with a remote store")]
struct Cli {
    /// Path to the config file (default: <config dir>/todosync/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the store base URL from the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the list
    List,
    /// Add an item
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },
    /// Toggle completion of the item at a position
    Toggle { index: usize },
    /// Delete the item at a position
    Delete { index: usize },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let path = cli.config.unwrap_or_else(Config::config_path);
    let config = ConfigStore::new(Config::load_from(&path)?, path);
    if let Some(base_url) = cli.base_url {
        config.override_base_url(base_url)?;
    }

    let store = HttpStore::new(&config.get().store)?;
    tracing::info!(url = store.collection_url(), "Using store");

    let engine = Arc::new(SyncEngine::init(Arc::new(store)));
    let surface = CommandSurface::new(engine);
    surface.refresh().await.context("Failed to load items")?;
    surface.current_view();

    let outcome = match cli.command {
        Command::List => Ok(()),
        Command::Add { text } => surface.add_item(&text.join(" ")).await.map(|_| ()),
        Command::Toggle { index } => surface.toggle_item(index).await,
        Command::Delete { index } => surface.delete_item(index).await.map(|_| ()),
    };

    // The view is printed even when the command failed.
    print_view(&surface.current_view());
    outcome?;
    Ok(())
}

fn print_view(rows: &[ItemView]) {
    if rows.is_empty() {
        println!("No items");
        return;
    }
    for (index, row) in rows.iter().enumerate() {
        let mark = if row.completed { "x" } else { " " };
        println!("{:>3}. [{}] {}", index, mark, row.text);
    }
}
