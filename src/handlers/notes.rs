use axum::extract::{Path, State};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedState;

use super::parse_object_id;

/// POST /notes - Create a note
pub async fn create(
    State(state): State<SharedState>,
    Json(note): Json<Document>,
) -> ApiResult<Value> {
    let result = state.store.notes().insert_one(note).await?;
    Ok(ApiResponse::created(
        json!({ "insertedId": result.inserted_id }),
    ))
}

/// GET /notes/:email - Notes owned by one student
pub async fn list_by_owner(
    State(state): State<SharedState>,
    Path(email): Path<String>,
) -> ApiResult<Vec<Document>> {
    let notes: Vec<Document> = state
        .store
        .notes()
        .find(doc! { "email": email })
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(notes))
}

/// GET /note/:id - Look up a single note
pub async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Option<Document>> {
    let oid = parse_object_id(&id)?;
    let note = state.store.notes().find_one(doc! { "_id": oid }).await?;
    Ok(ApiResponse::success(note))
}

/// PATCH /notes/:id - Patch the full note body onto the record
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(mut body): Json<Document>,
) -> ApiResult<Value> {
    let oid = parse_object_id(&id)?;

    // The identifier is immutable; everything else in the body is applied
    body.remove("_id");
    if body.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let result = state
        .store
        .notes()
        .update_one(doc! { "_id": oid }, doc! { "$set": body })
        .await?;

    Ok(ApiResponse::success(json!({
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

/// DELETE /notes/:id - Delete a note
pub async fn delete(State(state): State<SharedState>, Path(id): Path<String>) -> ApiResult<Value> {
    let oid = parse_object_id(&id)?;
    let result = state.store.notes().delete_one(doc! { "_id": oid }).await?;

    Ok(ApiResponse::success(
        json!({ "deletedCount": result.deleted_count }),
    ))
}
