use std::sync::Arc;

use learnhub_api::config::AppConfig;
use learnhub_api::db::Store;
use learnhub_api::payments::PaymentProvider;
use learnhub_api::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    let store = Store::connect(&config.database)
        .await
        .expect("invalid store configuration");

    // Index provisioning must not block startup when the store is unreachable
    let index_store = store.clone();
    tokio::spawn(async move {
        if let Err(e) = index_store.ensure_indexes().await {
            tracing::warn!("Could not provision unique indexes: {}", e);
        }
    });

    let payments = PaymentProvider::new(&config.payments);
    let port = config.server.port;
    let state = Arc::new(AppState {
        config,
        store,
        payments,
    });

    let app = learnhub_api::app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("LearnHub API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
