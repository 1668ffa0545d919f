mod backend;
mod commands;
mod config;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::backend::RecipeApiClient;
use crate::commands::{
    SearchArgs, cmd_favorites_list, cmd_favorites_remove, cmd_favorites_show, cmd_history_clear,
    cmd_history_list, cmd_history_show, cmd_search, cmd_settings_dark_mode, cmd_settings_show,
    cmd_timer,
};
use crate::config::Config;
use crate::render::RenderConfig;
use cookwise_core::service::CookwiseService;

const LOG_ENV: &str = "COOKWISE_LOG";

#[derive(Parser)]
#[command(
    name = "cookwise",
    version,
    about = "Find recipes for the ingredients you already have",
    long_about = "\n\n   ___         _           _
  / __|___  ___| |____ __ _(_)___ ___
 | (__/ _ \\/ _ \\ / /\\ V  V / (_-</ -_)
  \\___\\___/\\___/_\\_\\ \\_/\\_/|_/__/\\___|
      cook with what you have.
"
)]
struct Cli {
    /// Recipe backend URL (overrides COOKWISE_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search recipes by ingredients and open one
    Search {
        /// Ingredients you have (e.g. eggs "sour cream")
        #[arg(required = true)]
        ingredients: Vec<String>,
        /// Number of portions to ask the backend for
        #[arg(short, long)]
        portions: Option<String>,
        /// Open this recipe (name or row number) without prompting
        #[arg(long)]
        pick: Option<String>,
        /// Toggle the opened recipe's favorite flag
        #[arg(long)]
        favorite: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage favorite recipes
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommands,
    },
    /// Recently viewed recipes (most recent first)
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },
    /// Run a cooking countdown
    Timer {
        /// Countdown length in seconds
        seconds: String,
    },
    /// Show or change preferences
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
enum FavoritesCommands {
    /// List favorite recipes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show a favorite recipe
    Show {
        /// Recipe ID
        id: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a recipe from favorites
    Remove {
        /// Recipe ID
        id: u64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// List recently viewed recipes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Reopen a recently viewed recipe
    Show {
        /// Position in the list (1 = most recent)
        position: usize,
        /// Toggle the recipe's favorite flag
        #[arg(long)]
        favorite: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget all recently viewed recipes
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SettingsCommands {
    /// Show current settings and file locations
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Switch the dark color theme on or off
    DarkMode {
        /// on or off
        value: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.api_url)?;
    let svc = CookwiseService::new(&config.db_path)?;
    let dark_mode = svc.dark_mode()?;
    debug!(db = %config.db_path.display(), api_url = %config.api_url, dark_mode, "starting");
    let render = |json| RenderConfig::new(dark_mode, json);

    match cli.command {
        Commands::Search {
            ingredients,
            portions,
            pick,
            favorite,
            json,
        } => {
            let client = RecipeApiClient::new(&config.api_url)?;
            let args = SearchArgs {
                ingredients: &ingredients,
                portions: portions.as_deref(),
                pick: pick.as_deref(),
                favorite,
            };
            cmd_search(&svc, &client, &args, &render(json))
        }
        Commands::Favorites { command } => match command {
            FavoritesCommands::List { json } => cmd_favorites_list(&svc, &render(json)),
            FavoritesCommands::Show { id, json } => cmd_favorites_show(&svc, id, &render(json)),
            FavoritesCommands::Remove { id, json } => {
                cmd_favorites_remove(&svc, id, &render(json))
            }
        },
        Commands::History { command } => match command {
            HistoryCommands::List { json } => cmd_history_list(&svc, &render(json)),
            HistoryCommands::Show {
                position,
                favorite,
                json,
            } => cmd_history_show(&svc, position, favorite, &render(json)),
            HistoryCommands::Clear { json } => cmd_history_clear(&svc, &render(json)),
        },
        Commands::Timer { seconds } => cmd_timer(&seconds, &render(false)).await,
        Commands::Settings { command } => match command {
            SettingsCommands::Show { json } => cmd_settings_show(&svc, &config, &render(json)),
            SettingsCommands::DarkMode { value, json } => {
                cmd_settings_dark_mode(&svc, &value, &render(json))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "cookwise", "search", "eggs", "sour cream", "-p", "2", "--pick", "1", "--api-url",
            "http://localhost:9/r",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://localhost:9/r"));
        match cli.command {
            Commands::Search {
                ingredients,
                portions,
                pick,
                favorite,
                json,
            } => {
                assert_eq!(ingredients, ["eggs", "sour cream"]);
                assert_eq!(portions.as_deref(), Some("2"));
                assert_eq!(pick.as_deref(), Some("1"));
                assert!(!favorite);
                assert!(!json);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_search_requires_ingredients() {
        assert!(Cli::try_parse_from(["cookwise", "search"]).is_err());
    }
}
