//! LIST command - List the caller's notes.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use notes_core::Note;

use super::{FilterArgs, HumanReadable, make_request, output, print_note};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Response from listing notes.
#[derive(Debug, Deserialize, Serialize)]
pub struct ListNotesResponse {
    /// Filters the server applied.
    pub filters: Vec<String>,
    pub notes: Vec<Note>,
}

impl HumanReadable for ListNotesResponse {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(80));
        println!("  {} {}", "Filters:".cyan(), self.filters.join(", "));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        for note in &self.notes {
            print_note(note);
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notes.len());
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ListArgs,
) -> Result<()> {
    let url = format!("{}/notes", base_url);

    let response: ListNotesResponse =
        make_request(client.get(&url).query(&args.filter.to_query())).await?;

    output(&response, human)
}
