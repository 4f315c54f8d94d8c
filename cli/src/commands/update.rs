//! UPDATE command - Apply changes to every matching note.

use anyhow::{Result, bail};
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{FilterArgs, HumanReadable, make_request, output};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    #[command(flatten)]
    pub filter: FilterArgs,

    /// New text
    #[arg(long)]
    pub text: Option<String>,

    /// New type
    #[arg(long = "set-type")]
    pub set_type: Option<String>,

    /// Replace the tag set (comma-separated)
    #[arg(long = "set-tags", value_delimiter = ',', conflicts_with = "clear_tags")]
    pub set_tags: Option<Vec<String>>,

    /// Remove every tag
    #[arg(long)]
    pub clear_tags: bool,

    /// Archive the matching notes
    #[arg(long, conflicts_with = "unarchive")]
    pub archive: bool,

    /// Unarchive the matching notes
    #[arg(long)]
    pub unarchive: bool,
}

impl UpdateArgs {
    /// JSON payload holding only the fields being changed.
    fn payload(&self) -> Map<String, Value> {
        let mut body = Map::new();
        if let Some(text) = &self.text {
            body.insert("text".into(), Value::from(text.as_str()));
        }
        if let Some(type_name) = &self.set_type {
            body.insert("type".into(), Value::from(type_name.as_str()));
        }
        if self.clear_tags {
            body.insert("tags".into(), Value::Array(Vec::new()));
        } else if let Some(tags) = &self.set_tags {
            body.insert("tags".into(), Value::from(tags.clone()));
        }
        if self.archive || self.unarchive {
            body.insert("is_archived".into(), Value::Bool(self.archive));
        }
        body
    }
}

/// Response from a bulk update.
#[derive(Debug, Deserialize, Serialize)]
pub struct UpdateNotesResponse {
    pub msg: String,
    pub count: usize,
}

impl HumanReadable for UpdateNotesResponse {
    fn print_human(&self) {
        println!("{}", self.msg.green().bold());
    }
}

/// Execute the update command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: UpdateArgs,
) -> Result<()> {
    let payload = args.payload();
    if payload.is_empty() {
        bail!("Nothing to update: pass --text, --set-type, --set-tags, --clear-tags, --archive or --unarchive");
    }

    let url = format!("{}/notes", base_url);

    let response: UpdateNotesResponse = make_request(
        client
            .put(&url)
            .query(&args.filter.to_query())
            .json(&payload),
    )
    .await?;

    output(&response, human)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> UpdateArgs {
        UpdateArgs {
            filter: FilterArgs::default(),
            text: None,
            set_type: None,
            set_tags: None,
            clear_tags: false,
            archive: false,
            unarchive: false,
        }
    }

    #[test]
    fn test_payload_holds_only_given_fields() {
        let update = UpdateArgs {
            text: Some("buy oat milk".into()),
            ..args()
        };
        let payload = Value::Object(update.payload());
        assert_eq!(payload, serde_json::json!({"text": "buy oat milk"}));
    }

    #[test]
    fn test_payload_tags_and_archive() {
        let update = UpdateArgs {
            clear_tags: true,
            unarchive: true,
            ..args()
        };
        let payload = Value::Object(update.payload());
        assert_eq!(payload, serde_json::json!({"tags": [], "is_archived": false}));

        let update = UpdateArgs {
            set_tags: Some(vec!["a".into(), "b".into()]),
            archive: true,
            ..args()
        };
        let payload = Value::Object(update.payload());
        assert_eq!(payload, serde_json::json!({"tags": ["a", "b"], "is_archived": true}));
    }

    #[test]
    fn test_empty_payload() {
        assert!(args().payload().is_empty());
    }
}
