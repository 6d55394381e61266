mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use common::config::StoreConfig;

#[derive(Parser, Debug)]
#[command(name = "tastyfood", author, version, about = "Tasty Food admin tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create any missing tables.
    Migrate,
    /// Manage recipe categories.
    #[command(subcommand)]
    Category(CategoryCommand),
    /// Manage user accounts.
    #[command(subcommand)]
    User(UserCommand),
}

#[derive(Subcommand, Debug)]
enum CategoryCommand {
    /// Add a category.
    Add { name: String },
    /// List categories with their ids.
    List,
    /// Delete a category with all of its recipes and their photos.
    Delete { id: i32 },
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Delete a user with their profile, recipes and every file they own.
    Delete { username: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = StoreConfig::load()?;
    let admin = commands::Admin::connect(&config).await?;

    match cli.command {
        Command::Migrate => admin.migrate().await,
        Command::Category(CategoryCommand::Add { name }) => admin.add_category(&name).await,
        Command::Category(CategoryCommand::List) => admin.list_categories().await,
        Command::Category(CategoryCommand::Delete { id }) => admin.delete_category(id).await,
        Command::User(UserCommand::Delete { username }) => admin.delete_user(&username).await,
    }
}
