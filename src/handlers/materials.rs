use axum::extract::{Path, Query, State};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::is_duplicate_key;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedState;

use super::parse_object_id;

#[derive(Debug, Deserialize)]
pub struct MaterialCreateQuery {
    pub email: String,
    /// Session the material belongs to
    pub id: String,
}

/// POST /materials?email&id - Upload a material for one (email, session)
/// pair. The unique index rejects a second record for the same pair.
pub async fn create(
    State(state): State<SharedState>,
    Query(query): Query<MaterialCreateQuery>,
    Json(mut material): Json<Document>,
) -> ApiResult<Value> {
    material.insert("email", query.email);
    material.insert("sessionId", query.id);

    match state.store.materials().insert_one(material).await {
        Ok(result) => Ok(ApiResponse::created(
            json!({ "insertedId": result.inserted_id }),
        )),
        Err(err) if is_duplicate_key(&err) => Err(ApiError::bad_request("Card Already exist")),
        Err(err) => Err(err.into()),
    }
}

/// GET /material/:id - Look up a single material record
pub async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Option<Document>> {
    let oid = parse_object_id(&id)?;
    let material = state.store.materials().find_one(doc! { "_id": oid }).await?;
    Ok(ApiResponse::success(material))
}

/// GET /allMaterial - Administrative listing of every material
pub async fn list_all(State(state): State<SharedState>) -> ApiResult<Vec<Document>> {
    let materials: Vec<Document> = state
        .store
        .materials()
        .find(doc! {})
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(materials))
}

/// GET /materialStudent/:id - The material attached to one session
pub async fn get_by_session(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Option<Document>> {
    let material = state
        .store
        .materials()
        .find_one(doc! { "sessionId": id })
        .await?;
    Ok(ApiResponse::success(material))
}

/// GET /materialItems/:email - Materials uploaded by one tutor
pub async fn list_by_owner(
    State(state): State<SharedState>,
    Path(email): Path<String>,
) -> ApiResult<Vec<Document>> {
    let materials: Vec<Document> = state
        .store
        .materials()
        .find(doc! { "email": email })
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(materials))
}

/// PATCH /materials/:id - Replace the doc/image fields of one record
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Document>,
) -> ApiResult<Value> {
    let oid = parse_object_id(&id)?;

    let mut fields = Document::new();
    for key in ["doc", "image"] {
        if let Some(value) = body.get(key) {
            fields.insert(key, value.clone());
        }
    }
    if fields.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let result = state
        .store
        .materials()
        .update_one(doc! { "_id": oid }, doc! { "$set": fields })
        .await?;

    Ok(ApiResponse::success(json!({
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

/// DELETE /materials/:id and DELETE /AdminMaterials/:id - Remove one
/// material record; both routes behave identically.
pub async fn delete(State(state): State<SharedState>, Path(id): Path<String>) -> ApiResult<Value> {
    let oid = parse_object_id(&id)?;
    let result = state
        .store
        .materials()
        .delete_one(doc! { "_id": oid })
        .await?;

    Ok(ApiResponse::success(
        json!({ "deletedCount": result.deleted_count }),
    ))
}
