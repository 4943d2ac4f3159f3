pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod paging;
pub mod payments;
pub mod state;
pub mod types;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn_with_state;
use axum::response::{IntoResponse, Json};
use axum::routing::{delete, get, patch, post};
use axum::Router;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{require_admin, require_token, require_tutor};
use crate::state::SharedState;

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(authenticated_routes(state.clone()))
        .merge(tutor_routes(state.clone()))
        .merge(admin_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Routes that require no token: registration, token issue, the public
/// session listing, and reviews.
fn public_routes() -> Router<SharedState> {
    use handlers::{auth, reviews, sessions, users};

    Router::new()
        .route("/jwt", post(auth::issue_token))
        .route("/users", post(users::create))
        .route("/session", get(sessions::list_public))
        .route("/session/:id", get(sessions::get_by_id))
        .route("/sessionCount", get(sessions::count))
        .route("/reviews", post(reviews::create).get(reviews::list))
}

/// Routes any authenticated user may call.
fn authenticated_routes(state: SharedState) -> Router<SharedState> {
    use handlers::{auth, bookings, materials, notes, payments};

    Router::new()
        .route("/user/:email", get(auth::user_role))
        .route("/bookedSession", post(bookings::create))
        .route("/bookedSession/:email", get(bookings::list_by_owner))
        .route("/notes", post(notes::create))
        .route(
            "/notes/:id",
            get(notes::list_by_owner)
                .patch(notes::update)
                .delete(notes::delete),
        )
        .route("/note/:id", get(notes::get_by_id))
        .route("/material/:id", get(materials::get_by_id))
        .route("/materialStudent/:id", get(materials::get_by_session))
        .route("/create-payment-intent", post(payments::create_intent))
        .route("/sessionPayments", post(payments::create))
        .route_layer(from_fn_with_state(state, require_token))
}

/// Routes reserved for tutors.
fn tutor_routes(state: SharedState) -> Router<SharedState> {
    use handlers::{materials, sessions};

    Router::new()
        .route("/session", post(sessions::create))
        .route("/personalSession/:email", get(sessions::list_by_tutor))
        .route("/sessionReq/:id", patch(sessions::request_approval))
        .route("/materials", post(materials::create))
        .route("/materialItems/:email", get(materials::list_by_owner))
        .route(
            "/materials/:id",
            patch(materials::update).delete(materials::delete),
        )
        .route_layer(from_fn_with_state(state.clone(), require_tutor))
        .route_layer(from_fn_with_state(state, require_token))
}

/// Routes reserved for admins.
fn admin_routes(state: SharedState) -> Router<SharedState> {
    use handlers::{materials, payments, sessions, users};

    Router::new()
        .route("/users", get(users::list))
        .route(
            "/users/:id",
            patch(users::update_role).delete(users::delete),
        )
        .route("/sessionAdmin", get(sessions::list_admin))
        .route("/session/:id", patch(sessions::update))
        .route("/allMaterial", get(materials::list_all))
        .route("/AdminMaterials/:id", delete(materials::delete))
        .route("/payment", get(payments::list))
        .route("/total-revenue", get(payments::total_revenue))
        .route("/total-revenue-by-month", get(payments::revenue_by_month))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
        .route_layer(from_fn_with_state(state, require_token))
}

async fn root() -> &'static str {
    "LearnHub API is up and running"
}

async fn health(State(state): State<SharedState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "store unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string()
                }
            })),
        ),
    }
}
