//! DELETE command - Delete every matching note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use super::{FilterArgs, HumanReadable, make_request, output};

/// Arguments for the delete command.
#[derive(Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// Skip confirmation prompt (for non-interactive use)
    #[arg(long, short = 'y')]
    pub yes: bool,
}

/// Response from a bulk delete.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeleteNotesResponse {
    pub msg: String,
    pub count: usize,
}

impl HumanReadable for DeleteNotesResponse {
    fn print_human(&self) {
        println!("{}", self.msg.green().bold());
    }
}

/// Execute the delete command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: DeleteArgs,
) -> Result<()> {
    // Confirmation prompt for interactive use
    if human && !args.yes {
        let scope = if args.filter.is_empty() {
            "ALL of your notes".to_string()
        } else {
            "every note matching the given filters".to_string()
        };
        eprint!(
            "{} Are you sure you want to delete {}? [y/N] ",
            "Warning:".yellow().bold(),
            scope
        );

        use std::io::Write;
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            eprintln!("Aborted.");
            return Ok(());
        }
    }

    let url = format!("{}/notes", base_url);

    let response: DeleteNotesResponse =
        make_request(client.delete(&url).query(&args.filter.to_query())).await?;

    output(&response, human)
}
