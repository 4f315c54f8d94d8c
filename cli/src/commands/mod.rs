//! Command implementations for the notes CLI.
//!
//! Each command module provides:
//! - Args struct for clap argument parsing
//! - execute() function that performs the command
//! - Human-readable and JSON output formatting

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use uuid::Uuid;

use notes_core::Note;

/// Common error type for HTTP requests.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Build an HTTP client, optionally configured with a Bearer token.
pub fn build_client(token: Option<&str>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();

    if let Some(token) = token {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| anyhow::anyhow!("Invalid token value: {}", e))?;
        headers.insert(AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }

    Ok(builder.build()?)
}

/// Print output in JSON or human-readable format.
pub fn output<T: Serialize + HumanReadable>(value: &T, human: bool) -> Result<()> {
    if human {
        value.print_human();
    } else {
        println!("{}", serde_json::to_string_pretty(value)?);
    }
    Ok(())
}

/// Trait for types that can be printed in human-readable format.
pub trait HumanReadable {
    fn print_human(&self);
}

/// Send a request and decode the JSON body, or surface the server's
/// `error.message`.
pub async fn make_request<T: serde::de::DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, CliError> {
    let response = request.send().await?;
    let status = response.status();

    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    Err(CliError::Server {
        status: status.as_u16(),
        message: error_message(&body),
    })
}

/// Pull `error.message` out of an error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.pointer("/error/message")
                .and_then(|v| v.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

/// Note filters shared by list, update, and delete.
///
/// Each flag maps to one query parameter; the server always adds the
/// caller's own id.
#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Match a single note by ID
    #[arg(long)]
    pub id: Option<Uuid>,

    /// Match archived (true) or active (false) notes
    #[arg(long)]
    pub archived: Option<bool>,

    /// Created on or after this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub from: Option<String>,

    /// Created on or before this date (YYYY-MM-DD or RFC 3339)
    #[arg(long)]
    pub till: Option<String>,

    /// Match notes of this type
    #[arg(long = "type-name")]
    pub type_name: Option<String>,

    /// Match notes carrying all of these tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,
}

impl FilterArgs {
    /// Query parameters for the set flags.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.id {
            query.push(("id", id.to_string()));
        }
        if let Some(archived) = self.archived {
            query.push(("is_archived", archived.to_string()));
        }
        if let Some(from) = &self.from {
            query.push(("from_date", from.clone()));
        }
        if let Some(till) = &self.till {
            query.push(("till_date", till.clone()));
        }
        if let Some(type_name) = &self.type_name {
            query.push(("type_name", type_name.clone()));
        }
        if !self.tags.is_empty() {
            query.push(("tag_list", self.tags.join(",")));
        }
        query
    }

    /// Whether no filter flag was given.
    pub fn is_empty(&self) -> bool {
        self.to_query().is_empty()
    }
}

/// Print one note as an indented block.
pub fn print_note(note: &Note) {
    let archived = if note.is_archived {
        " [archived]".dimmed().to_string()
    } else {
        String::new()
    };
    println!("  {}{}", truncate(&note.text, 72).bold(), archived);
    println!("    {} {}", "ID:".cyan(), note.id);
    println!(
        "    {} {}",
        "Type:".cyan(),
        note.type_name.as_deref().unwrap_or("-")
    );
    if !note.tags.is_empty() {
        let tags: Vec<&str> = note.tags.iter().map(String::as_str).collect();
        println!("    {} {}", "Tags:".cyan(), tags.join(", "));
    }
    println!("    {} {}", "Created:".cyan(), format_timestamp(&note.created));
}

/// Format a timestamp for human display.
pub fn format_timestamp(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Truncate a string for display, adding ellipsis if needed.
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_uses_server_keys() {
        let filter = FilterArgs {
            archived: Some(false),
            type_name: Some("todo".into()),
            tags: vec!["errand".into(), "home".into()],
            ..Default::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("is_archived", "false".to_string()),
                ("type_name", "todo".to_string()),
                ("tag_list", "errand,home".to_string()),
            ]
        );
        assert!(FilterArgs::default().is_empty());
    }

    #[test]
    fn test_error_message_reads_nested_field() {
        let body = r#"{"error":{"code":"NOT_FOUND","message":"Notes not found"}}"#;
        assert_eq!(error_message(body), "Notes not found");
        assert_eq!(error_message("plain text"), "plain text");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééé", 6), "ééé...");
    }
}
