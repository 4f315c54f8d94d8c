//! Command-line client for the notes backend.
//!
//! Commands:
//! - create: Create a note
//! - list: List notes matching filters
//! - update: Change every matching note
//! - delete: Delete every matching note
//!
//! Configuration via environment:
//! - NOTES_URL: Base URL of the notes server (default: http://localhost:3000)
//! - NOTES_TOKEN: JWT Bearer access token

mod commands;

use clap::{Parser, Subcommand};

use commands::{create::CreateArgs, delete::DeleteArgs, list::ListArgs, update::UpdateArgs};

/// Notes CLI
///
/// JSON output by default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes server URL
    #[arg(
        long,
        env = "NOTES_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    /// JWT Bearer token for authentication
    #[arg(long, env = "NOTES_TOKEN", global = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a note
    Create(CreateArgs),

    /// List notes
    List(ListArgs),

    /// Update every matching note
    Update(UpdateArgs),

    /// Delete every matching note
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client(cli.token.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let url = cli.url.trim_end_matches('/');

    let result = match cli.command {
        Commands::Create(args) => commands::create::execute(&client, url, cli.human, args).await,
        Commands::List(args) => commands::list::execute(&client, url, cli.human, args).await,
        Commands::Update(args) => commands::update::execute(&client, url, cli.human, args).await,
        Commands::Delete(args) => commands::delete::execute(&client, url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
