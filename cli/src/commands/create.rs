//! CREATE command - Create a note.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};

use notes_core::Note;

use super::{HumanReadable, make_request, output, print_note};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note text
    pub text: String,

    /// Note type (the server defaults to "note")
    #[arg(long = "type")]
    pub type_name: Option<String>,

    /// Tags for the note (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

/// Request body for creating a note.
#[derive(Serialize)]
struct CreateNoteRequest {
    text: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<String>,
}

/// Response from creating a note.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateNoteResponse {
    pub msg: String,
    pub note: Note,
}

impl HumanReadable for CreateNoteResponse {
    fn print_human(&self) {
        println!("{}", self.msg.green().bold());
        println!();
        print_note(&self.note);
    }
}

/// Execute the create command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: CreateArgs,
) -> Result<()> {
    let url = format!("{}/notes", base_url);

    let request_body = CreateNoteRequest {
        text: args.text,
        type_name: args.type_name,
        tags: args.tags,
    };

    let response: CreateNoteResponse = make_request(client.post(&url).json(&request_body)).await?;

    output(&response, human)
}
