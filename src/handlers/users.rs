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
use crate::types::Role;

use super::parse_object_id;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserCreateQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoleUpdate {
    pub role: String,
}

/// GET /users?search=... - List users, optionally filtered by a
/// case-insensitive substring match over name or email
pub async fn list(
    State(state): State<SharedState>,
    Query(query): Query<UserListQuery>,
) -> ApiResult<Vec<Document>> {
    let filter = match query.search.as_deref().filter(|s| !s.is_empty()) {
        Some(search) => doc! {
            "$or": [
                { "name": { "$regex": search, "$options": "i" } },
                { "email": { "$regex": search, "$options": "i" } },
            ]
        },
        None => doc! {},
    };

    let users: Vec<Document> = state.store.users().find(filter).await?.try_collect().await?;
    Ok(ApiResponse::success(users))
}

/// POST /users?email=... - Register a user. Registration is idempotent by
/// email: the unique index turns a duplicate insert into an "already
/// exists" marker instead of a second record.
pub async fn create(
    State(state): State<SharedState>,
    Query(query): Query<UserCreateQuery>,
    Json(mut user): Json<Document>,
) -> ApiResult<Value> {
    let email = query
        .email
        .or_else(|| user.get_str("email").ok().map(str::to_owned))
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("email is required"))?;
    user.insert("email", email);

    match state.store.users().insert_one(user).await {
        Ok(result) => Ok(ApiResponse::success(
            json!({ "insertedId": result.inserted_id }),
        )),
        Err(err) if is_duplicate_key(&err) => Ok(ApiResponse::success(
            json!({ "message": "user already exists", "insertedId": null }),
        )),
        Err(err) => Err(err.into()),
    }
}

/// PATCH /users/:id - Update a user's role
pub async fn update_role(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(update): Json<RoleUpdate>,
) -> ApiResult<Value> {
    let role = Role::parse(&update.role)
        .ok_or_else(|| ApiError::bad_request(format!("Unknown role: {}", update.role)))?;
    let oid = parse_object_id(&id)?;

    let result = state
        .store
        .users()
        .update_one(doc! { "_id": oid }, doc! { "$set": { "role": role.as_str() } })
        .await?;

    Ok(ApiResponse::success(json!({
        "matchedCount": result.matched_count,
        "modifiedCount": result.modified_count,
    })))
}

/// DELETE /users/:id - Delete a user record
pub async fn delete(State(state): State<SharedState>, Path(id): Path<String>) -> ApiResult<Value> {
    let oid = parse_object_id(&id)?;
    let result = state.store.users().delete_one(doc! { "_id": oid }).await?;

    Ok(ApiResponse::success(
        json!({ "deletedCount": result.deleted_count }),
    ))
}
