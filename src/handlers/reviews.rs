use axum::extract::State;
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde_json::{json, Value};

use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedState;

/// POST /reviews - Append a review
pub async fn create(
    State(state): State<SharedState>,
    Json(review): Json<Document>,
) -> ApiResult<Value> {
    let result = state.store.reviews().insert_one(review).await?;
    Ok(ApiResponse::created(
        json!({ "insertedId": result.inserted_id }),
    ))
}

/// GET /reviews - List every review
pub async fn list(State(state): State<SharedState>) -> ApiResult<Vec<Document>> {
    let reviews: Vec<Document> = state
        .store
        .reviews()
        .find(doc! {})
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(reviews))
}
