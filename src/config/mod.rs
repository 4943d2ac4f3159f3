use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration, built once at startup and owned by the
/// service state rather than held in module-level statics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub payments: PaymentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_expiry_hours: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub currency: String,
    /// Provider floor for card intents, in minor currency units.
    pub minimum_amount: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn defaults() -> Self {
        Self {
            server: ServerConfig { port: 5000 },
            database: DatabaseConfig {
                uri: "mongodb://127.0.0.1:27017".to_string(),
                name: "LearnHub".to_string(),
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                token_expiry_hours: 5,
            },
            payments: PaymentConfig {
                secret_key: String::new(),
                currency: "usd".to_string(),
                minimum_amount: 50,
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.uri = v;
        }
        if let Ok(v) = env::var("DATABASE_NAME") {
            self.database.name = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_EXPIRY_HOURS") {
            self.security.token_expiry_hours =
                v.parse().unwrap_or(self.security.token_expiry_hours);
        }
        if let Ok(v) = env::var("PAYMENT_SECRET_KEY") {
            self.payments.secret_key = v;
        }
        if let Ok(v) = env::var("PAYMENT_CURRENCY") {
            self.payments.currency = v;
        }
        if let Ok(v) = env::var("PAYMENT_MINIMUM_AMOUNT") {
            self.payments.minimum_amount = v.parse().unwrap_or(self.payments.minimum_amount);
        }

        self
    }
}
