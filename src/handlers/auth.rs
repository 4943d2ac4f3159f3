use axum::extract::{Path, State};
use axum::Json;
use mongodb::bson::doc;
use serde_json::{json, Value};

use crate::auth::{generate_jwt, Claims};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::SharedState;

/// POST /jwt - Issue a signed token for a user payload
pub async fn issue_token(
    State(state): State<SharedState>,
    Json(payload): Json<Value>,
) -> ApiResult<Value> {
    let email = payload
        .get("email")
        .and_then(Value::as_str)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ApiError::bad_request("email is required"))?;

    let claims = Claims::new(email, state.config.security.token_expiry_hours);
    let token = generate_jwt(&claims, &state.config.security.jwt_secret)?;

    Ok(ApiResponse::success(json!({ "token": token })))
}

/// GET /user/:email - Return the role stored on a user record
pub async fn user_role(
    State(state): State<SharedState>,
    Path(email): Path<String>,
) -> ApiResult<Value> {
    let user = state.store.users().find_one(doc! { "email": email }).await?;

    let role = user
        .as_ref()
        .and_then(|u| u.get_str("role").ok())
        .map(str::to_owned);

    Ok(ApiResponse::success(json!({ "role": role })))
}
