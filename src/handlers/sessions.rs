use axum::extract::{Path, Query, State};
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::paging::{parse_price_sort, price_sort_doc, Pagination};
use crate::state::SharedState;

use super::parse_object_id;

#[derive(Debug, Deserialize)]
pub struct SessionListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// POST /session - Create a tutoring session
pub async fn create(
    State(state): State<SharedState>,
    Json(session): Json<Document>,
) -> ApiResult<Value> {
    let result = state.store.sessions().insert_one(session).await?;
    Ok(ApiResponse::created(
        json!({ "insertedId": result.inserted_id }),
    ))
}

/// GET /session?page&limit&sortBy - Public paginated listing of approved
/// sessions, optionally sorted by price
pub async fn list_public(
    State(state): State<SharedState>,
    Query(query): Query<SessionListQuery>,
) -> ApiResult<Vec<Document>> {
    // Validate before touching the store
    let paging = Pagination::from_params(query.page.as_deref(), query.limit.as_deref())?;
    let sort = parse_price_sort(query.sort_by.as_deref());

    let collection = state.store.sessions();
    let mut find = collection
        .find(doc! { "status": "success" })
        .skip(paging.skip)
        .limit(paging.limit);
    if let Some(direction) = sort {
        find = find.sort(price_sort_doc(direction));
    }

    let sessions: Vec<Document> = find.await?.try_collect().await?;
    Ok(ApiResponse::success(sessions))
}

/// GET /sessionAdmin - Unfiltered listing for administrative review
pub async fn list_admin(State(state): State<SharedState>) -> ApiResult<Vec<Document>> {
    let sessions: Vec<Document> = state
        .store
        .sessions()
        .find(doc! {})
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(sessions))
}

/// GET /session/:id - Look up a single session
pub async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Option<Document>> {
    let oid = parse_object_id(&id)?;
    let session = state.store.sessions().find_one(doc! { "_id": oid }).await?;
    Ok(ApiResponse::success(session))
}

/// GET /personalSession/:email - Sessions offered by one tutor
pub async fn list_by_tutor(
    State(state): State<SharedState>,
    Path(email): Path<String>,
) -> ApiResult<Vec<Document>> {
    let sessions: Vec<Document> = state
        .store
        .sessions()
        .find(doc! { "tutorEmail": email })
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(sessions))
}

/// GET /sessionCount - Number of approved sessions
pub async fn count(State(state): State<SharedState>) -> ApiResult<Value> {
    let count = state
        .store
        .sessions()
        .count_documents(doc! { "status": "success" })
        .await?;
    Ok(ApiResponse::success(json!({ "count": count })))
}

/// PATCH /session/:id - Approve/reject a session: patch status, price and
/// feedback via upsert on the identifier
pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Document>,
) -> ApiResult<Value> {
    let oid = parse_object_id(&id)?;

    let mut fields = Document::new();
    for key in ["status", "price", "feedback"] {
        if let Some(value) = body.get(key) {
            fields.insert(key, value.clone());
        }
    }
    if fields.is_empty() {
        return Err(ApiError::bad_request("No updatable fields provided"));
    }

    let result = state
        .store
        .sessions()
        .update_one(doc! { "_id": oid }, doc! { "$set": fields })
        .upsert(true)
        .await?;

    Ok(ApiResponse::success(json!({
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id,
    })))
}

/// PATCH /sessionReq/:id - Tutor re-requests approval: the status moves
/// back to pending (or to the status the body names) via upsert
pub async fn request_approval(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(body): Json<Document>,
) -> ApiResult<Value> {
    let oid = parse_object_id(&id)?;
    let status = body.get_str("status").unwrap_or("pending");

    let result = state
        .store
        .sessions()
        .update_one(doc! { "_id": oid }, doc! { "$set": { "status": status } })
        .upsert(true)
        .await?;

    Ok(ApiResponse::success(json!({
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
        "upsertedId": result.upserted_id,
    })))
}
