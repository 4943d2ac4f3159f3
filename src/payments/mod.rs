use serde::Deserialize;

use crate::config::PaymentConfig;
use crate::error::ApiError;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// Client for the card-payment provider. Holds the provider secret and a
/// reused HTTP connection pool.
#[derive(Clone)]
pub struct PaymentProvider {
    secret_key: String,
    currency: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct IntentResponse {
    client_secret: String,
}

/// Convert a price in major currency units to minor units (cents).
pub fn amount_from_price(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

impl PaymentProvider {
    pub fn new(config: &PaymentConfig) -> Self {
        Self {
            secret_key: config.secret_key.clone(),
            currency: config.currency.clone(),
            http: reqwest::Client::new(),
        }
    }

    /// Create a card payment intent for `amount` minor units and return the
    /// client-usable secret. Amount validation happens before this call.
    pub async fn create_card_intent(&self, amount: i64) -> Result<String, ApiError> {
        let params = [
            ("amount", amount.to_string()),
            ("currency", self.currency.clone()),
            ("payment_method_types[]", "card".to_string()),
        ];

        let response = self
            .http
            .post(PAYMENT_INTENTS_URL)
            .bearer_auth(&self.secret_key)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Payment provider request failed: {}", e);
                ApiError::bad_gateway("Payment provider is unreachable")
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Payment provider rejected intent ({}): {}", status, body);
            return Err(ApiError::bad_gateway("Payment provider rejected the request"));
        }

        let intent: IntentResponse = response.json().await.map_err(|e| {
            tracing::error!("Payment provider returned malformed body: {}", e);
            ApiError::bad_gateway("Payment provider returned an unexpected response")
        })?;

        Ok(intent.client_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_conversion() {
        assert_eq!(amount_from_price(5.0), 500);
        assert_eq!(amount_from_price(0.40), 40);
        assert_eq!(amount_from_price(19.99), 1999);
        assert_eq!(amount_from_price(0.0), 0);
    }

    #[test]
    fn test_amount_rounds_fractional_cents() {
        assert_eq!(amount_from_price(10.009), 1001);
        assert_eq!(amount_from_price(0.499), 50);
    }
}
