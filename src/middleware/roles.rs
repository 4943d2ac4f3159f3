use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use mongodb::bson::doc;

use crate::error::ApiError;
use crate::state::SharedState;
use crate::types::Role;

use super::auth::AuthUser;

/// Role verification middleware: requires the authenticated caller's own
/// user record to carry the Tutor role.
pub async fn require_tutor(
    state: State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(state, request, next, Role::Tutor).await
}

/// Role verification middleware: requires the authenticated caller's own
/// user record to carry the Admin role.
pub async fn require_admin(
    state: State<SharedState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    require_role(state, request, next, Role::Admin).await
}

async fn require_role(
    State(state): State<SharedState>,
    request: Request,
    next: Next,
    required: Role,
) -> Result<Response, ApiError> {
    // Set by require_token; role checks never run unauthenticated
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Token verification required before role checks"))?;

    let record = state
        .store
        .users()
        .find_one(doc! { "email": auth_user.email.as_str() })
        .await?;

    let role = record
        .as_ref()
        .and_then(|user| user.get_str("role").ok())
        .and_then(Role::parse);

    if role == Some(required) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            "Role check failed: '{}' is not {}",
            auth_user.email,
            required.as_str()
        );
        Err(ApiError::forbidden("Forbidden access"))
    }
}
