mod chat;

use anyhow::Result;
use clap::{Parser, Subcommand};

use promptdeck_core::ModelConfig;
use promptdeck_prompts::PromptStore;

#[derive(Parser)]
#[command(name = "promptdeck")]
#[command(about = "PromptDeck - prompt library and local LLM chat")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat against the configured endpoint
    Chat,
    /// List or search the saved prompt library
    Prompts {
        #[command(subcommand)]
        command: PromptsCommand,
    },
    /// Show the active model configuration
    Status,
}

#[derive(Subcommand)]
enum PromptsCommand {
    /// List prompts, optionally restricted to a folder or to favorites
    List {
        #[arg(long)]
        folder: Option<String>,
        #[arg(long)]
        favorites: bool,
    },
    /// Search prompts by title or tag
    Search { query: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ModelConfig::from_env();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            config.validate()?;
            chat::run_chat(config).await?;
        }
        Commands::Prompts { command } => run_prompts(command),
        Commands::Status => {
            println!("endpoint:  {}", config.endpoint);
            println!("model:     {}", config.model_name);
            // Never echo the key itself.
            println!(
                "api key:   {}",
                if config.api_key.is_some() { "set" } else { "not set" }
            );
        }
    }

    Ok(())
}

fn run_prompts(command: PromptsCommand) {
    let store = PromptStore::with_builtins();

    let prompts: Vec<_> = match command {
        PromptsCommand::List { folder: Some(folder), favorites } => store
            .in_folder(&folder)
            .into_iter()
            .filter(|p| !favorites || p.favorite)
            .collect(),
        PromptsCommand::List { folder: None, favorites: true } => store.filter_favorites(""),
        PromptsCommand::List { folder: None, favorites: false } => store.all().iter().collect(),
        PromptsCommand::Search { query } => store.filter(&query),
    };

    if prompts.is_empty() {
        println!("No matching prompts.");
        return;
    }
    for prompt in prompts {
        let star = if prompt.favorite { "*" } else { " " };
        println!(
            "{star} {:<32} [{}] {}",
            prompt.title,
            prompt.folder,
            prompt.description
        );
    }
}
