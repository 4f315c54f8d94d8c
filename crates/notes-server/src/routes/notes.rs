//! Notes resource.
//!
//! This module implements the `/notes` endpoints:
//! - POST /notes - Create a note for the caller
//! - GET /notes - List the caller's notes matching the query filters
//! - PUT /notes - Update every matching note
//! - DELETE /notes - Delete every matching note
//!
//! Filters come from the query string and are limited to
//! `id, is_archived, from_date, till_date, type_name, tag_list`. The caller's
//! public id is always added, so no request can reach another user's notes.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use notes_core::{NewNote, Note, NoteFilter, NotePatch};
use notes_store::NoteStore;

use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Message returned when a create request has no `text`.
pub const MISSING_TEXT_MSG: &str = "A Key is missing, check: text!";

/// Message returned when an update or delete matches nothing.
pub const NOT_FOUND_MSG: &str = "Notes not found, please check your parameters!";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for POST /notes. Unknown keys are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    /// Note text. Required.
    #[serde(default)]
    pub text: Option<String>,
    /// Optional type label.
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// Optional tag labels.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

/// Request body for PUT /notes. Absent or null keys leave fields untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,
    /// Replaces the whole tag set, an empty list clears it.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub is_archived: Option<bool>,
}

impl UpdateNoteRequest {
    fn into_patch(self) -> NotePatch {
        NotePatch {
            text: self.text,
            type_name: self.type_name.filter(|t| !t.trim().is_empty()),
            tags: self.tags.map(clean_tags),
            is_archived: self.is_archived,
        }
    }
}

/// Response for POST /notes.
#[derive(Debug, Serialize)]
pub struct CreateNoteResponse {
    pub msg: String,
    pub note: Note,
}

/// Response for GET /notes.
#[derive(Debug, Serialize)]
pub struct ListNotesResponse {
    /// Names of the filters applied, the owner filter included.
    pub filters: Vec<String>,
    pub notes: Vec<Note>,
}

/// Response for PUT and DELETE /notes.
#[derive(Debug, Serialize)]
pub struct BulkResponse {
    pub msg: String,
    /// Number of notes affected.
    pub count: usize,
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Trim tag names and drop empty ones.
fn clean_tags(tags: Vec<String>) -> std::collections::BTreeSet<String> {
    tags.into_iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect()
}

/// Build the caller-scoped filter from query pairs and run it.
///
/// Returns the matched notes and the names of the filters applied.
pub async fn filter_notes(
    store: &dyn NoteStore,
    params: &[(String, String)],
    caller: &CurrentUser,
) -> ApiResult<(Vec<Note>, Vec<String>)> {
    let (filter, applied) = NoteFilter::from_params(params, caller.public_id.clone())?;
    let notes = store.find_notes(&filter).await?;
    Ok((notes, applied))
}

/// Decode a request body that must be a JSON object.
///
/// Extracting a `Map` first rejects arrays, which a derived `Deserialize`
/// would otherwise accept field by field.
fn json_body<T: DeserializeOwned>(
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<T> {
    let Json(body) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    serde_json::from_value(Value::Object(body))
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {}", e)))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /notes - Create a note owned by the caller.
///
/// # Response
///
/// - 201 Created: `{ "msg": ..., "note": {...} }`
/// - 400 Bad Request: `text` missing
async fn create_note(
    State(state): State<AppState>,
    caller: CurrentUser,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateNoteResponse>)> {
    let request: CreateNoteRequest = json_body(payload)?;

    let text = request
        .text
        .ok_or_else(|| ApiError::BadRequest(MISSING_TEXT_MSG.to_string()))?;

    let mut new_note = NewNote::new(caller.public_id.clone(), text);
    if let Some(type_name) = request.type_name.filter(|t| !t.trim().is_empty()) {
        new_note = new_note.with_type(type_name);
    }
    if let Some(tags) = request.tags.filter(|t| !t.is_empty()) {
        new_note.tags = clean_tags(tags);
    }

    let note = state.store().create_note(&new_note).await?;
    tracing::info!(note_id = %note.id, owner = %caller.public_id, "Note created");

    Ok((
        StatusCode::CREATED,
        Json(CreateNoteResponse {
            msg: "Note has been successfully created!".to_string(),
            note,
        }),
    ))
}

/// GET /notes - List the caller's notes.
///
/// An empty match is a 200 with an empty `notes` array.
async fn list_notes(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<ListNotesResponse>> {
    let (notes, filters) = filter_notes(state.store(), &params, &caller).await?;

    Ok(Json(ListNotesResponse { filters, notes }))
}

/// PUT /notes - Apply the payload to every matching note.
///
/// Each note is saved on its own; if a save fails, notes saved before it
/// stay updated.
///
/// # Response
///
/// - 200 OK: `{ "msg": ..., "count": n }`
/// - 404 Not Found: the filter matched nothing
async fn update_notes(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(params): Query<Vec<(String, String)>>,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> ApiResult<Json<BulkResponse>> {
    let patch = json_body::<UpdateNoteRequest>(payload)?.into_patch();

    let (notes, filters) = filter_notes(state.store(), &params, &caller).await?;
    if notes.is_empty() {
        return Err(ApiError::NotFound(NOT_FOUND_MSG.to_string()));
    }

    let mut count = 0;
    for mut note in notes {
        note.apply(&patch);
        state.store().save_note(&note).await?;
        count += 1;
    }

    tracing::info!(owner = %caller.public_id, count, ?filters, "Notes updated");

    Ok(Json(BulkResponse {
        msg: format!("{} notes have been successfully updated!", count),
        count,
    }))
}

/// DELETE /notes - Delete every matching note.
///
/// # Response
///
/// - 200 OK: `{ "msg": ..., "count": n }`
/// - 404 Not Found: the filter matched nothing
async fn delete_notes(
    State(state): State<AppState>,
    caller: CurrentUser,
    Query(params): Query<Vec<(String, String)>>,
) -> ApiResult<Json<BulkResponse>> {
    let (notes, filters) = filter_notes(state.store(), &params, &caller).await?;
    if notes.is_empty() {
        return Err(ApiError::NotFound(NOT_FOUND_MSG.to_string()));
    }

    let mut count = 0;
    for note in notes {
        state
            .store()
            .delete_note(&note.user_public_id, note.id)
            .await?;
        count += 1;
    }

    tracing::info!(owner = %caller.public_id, count, ?filters, "Notes deleted");

    Ok(Json(BulkResponse {
        msg: format!("{} notes have been successfully deleted!", count),
        count,
    }))
}

/// Build notes routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/notes",
        post(create_note)
            .get(list_notes)
            .put(update_notes)
            .delete(delete_notes),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_ignores_unknown_keys() {
        let request: UpdateNoteRequest =
            serde_json::from_str(r#"{"text": "x", "color": "red"}"#).unwrap();
        let patch = request.into_patch();
        assert_eq!(patch.text.as_deref(), Some("x"));
        assert!(patch.type_name.is_none());
        assert!(patch.tags.is_none());
        assert!(patch.is_archived.is_none());
    }

    #[test]
    fn test_update_request_null_leaves_field() {
        let request: UpdateNoteRequest =
            serde_json::from_str(r#"{"type": null, "tags": null}"#).unwrap();
        assert!(request.into_patch().is_empty());
    }

    #[test]
    fn test_update_request_empty_tags_clear() {
        let request: UpdateNoteRequest = serde_json::from_str(r#"{"tags": []}"#).unwrap();
        assert_eq!(request.into_patch().tags, Some(Default::default()));
    }

    #[test]
    fn test_create_request_reads_type_key() {
        let request: CreateNoteRequest =
            serde_json::from_str(r#"{"text": "t", "type": "todo", "tags": ["a"]}"#).unwrap();
        assert_eq!(request.type_name.as_deref(), Some("todo"));
        assert_eq!(request.tags, Some(vec!["a".to_string()]));
    }

    #[test]
    fn test_json_body_requires_object() {
        let empty: Result<Json<Map<String, Value>>, JsonRejection> = Ok(Json(Map::new()));
        let request: CreateNoteRequest = json_body(empty).unwrap();
        assert!(request.text.is_none());

        let mut body = Map::new();
        body.insert("text".into(), Value::from(5));
        let err = json_body::<CreateNoteRequest>(Ok(Json(body))).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_clean_tags() {
        let tags = clean_tags(vec![" a ".into(), "".into(), "b".into(), "a".into()]);
        assert_eq!(tags.into_iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
