use mongodb::bson::{doc, Document};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use tracing::info;

use crate::config::DatabaseConfig;

/// Collection names as they exist in the LearnHub database.
pub const USERS: &str = "users";
pub const SESSIONS: &str = "sessions";
pub const MATERIALS: &str = "materials";
pub const NOTES: &str = "notes";
pub const PAYMENTS: &str = "payments";
pub const BOOKED_SESSIONS: &str = "bookedSessions";
pub const REVIEWS: &str = "reviews";

/// Shared handle to the document store. Cloning is cheap; the underlying
/// driver client is created once at startup and lives for the process.
#[derive(Clone)]
pub struct Store {
    db: Database,
}

impl Store {
    /// Build the store handle. The driver connects lazily, so this succeeds
    /// even when the server is unreachable; the first operation surfaces
    /// any connectivity problem.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(&config.uri).await?;
        let db = client.database(&config.name);
        Ok(Self { db })
    }

    pub fn users(&self) -> Collection<Document> {
        self.db.collection(USERS)
    }

    pub fn sessions(&self) -> Collection<Document> {
        self.db.collection(SESSIONS)
    }

    pub fn materials(&self) -> Collection<Document> {
        self.db.collection(MATERIALS)
    }

    pub fn notes(&self) -> Collection<Document> {
        self.db.collection(NOTES)
    }

    pub fn payments(&self) -> Collection<Document> {
        self.db.collection(PAYMENTS)
    }

    pub fn booked_sessions(&self) -> Collection<Document> {
        self.db.collection(BOOKED_SESSIONS)
    }

    pub fn reviews(&self) -> Collection<Document> {
        self.db.collection(REVIEWS)
    }

    /// Provision the unique indexes that back duplicate rejection: one user
    /// per email, one material and one booking per (email, sessionId).
    pub async fn ensure_indexes(&self) -> Result<(), mongodb::error::Error> {
        let unique = IndexOptions::builder().unique(true).build();

        self.users()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;

        self.materials()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1, "sessionId": 1 })
                    .options(unique.clone())
                    .build(),
            )
            .await?;

        self.booked_sessions()
            .create_index(
                IndexModel::builder()
                    .keys(doc! { "email": 1, "sessionId": 1 })
                    .options(unique)
                    .build(),
            )
            .await?;

        info!("Unique indexes are in place");
        Ok(())
    }

    /// Pings the server to confirm connectivity
    pub async fn health_check(&self) -> Result<(), mongodb::error::Error> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}

/// True when the error is a unique-index violation (server code 11000).
pub fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}
