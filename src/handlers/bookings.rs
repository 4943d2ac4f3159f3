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

#[derive(Debug, Deserialize)]
pub struct BookingCreateQuery {
    pub email: String,
    /// Session being booked
    pub id: String,
}

/// POST /bookedSession?email&id - Book a session for a student. The unique
/// index rejects a second booking of the same session by the same student.
pub async fn create(
    State(state): State<SharedState>,
    Query(query): Query<BookingCreateQuery>,
    Json(mut booking): Json<Document>,
) -> ApiResult<Value> {
    booking.insert("email", query.email);
    booking.insert("sessionId", query.id);

    match state.store.booked_sessions().insert_one(booking).await {
        Ok(result) => Ok(ApiResponse::created(
            json!({ "insertedId": result.inserted_id }),
        )),
        Err(err) if is_duplicate_key(&err) => Err(ApiError::bad_request("Already Booked")),
        Err(err) => Err(err.into()),
    }
}

/// GET /bookedSession/:email - Sessions booked by one student
pub async fn list_by_owner(
    State(state): State<SharedState>,
    Path(email): Path<String>,
) -> ApiResult<Vec<Document>> {
    let bookings: Vec<Document> = state
        .store
        .booked_sessions()
        .find(doc! { "email": email })
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(bookings))
}
