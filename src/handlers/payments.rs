use axum::extract::State;
use axum::Json;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::payments::amount_from_price;
use crate::state::SharedState;

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    pub price: f64,
}

/// POST /sessionPayments - Append a payment to the ledger
pub async fn create(
    State(state): State<SharedState>,
    Json(payment): Json<Document>,
) -> ApiResult<Value> {
    let result = state.store.payments().insert_one(payment).await?;
    Ok(ApiResponse::created(
        json!({ "insertedId": result.inserted_id }),
    ))
}

/// GET /payment - List the full payment ledger
pub async fn list(State(state): State<SharedState>) -> ApiResult<Vec<Document>> {
    let payments: Vec<Document> = state
        .store
        .payments()
        .find(doc! {})
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(payments))
}

fn total_revenue_pipeline() -> Vec<Document> {
    vec![doc! {
        "$group": {
            "_id": null,
            "totalRevenue": { "$sum": "$price" },
        }
    }]
}

fn monthly_revenue_pipeline() -> Vec<Document> {
    vec![
        doc! {
            "$group": {
                "_id": { "$dateToString": { "format": "%Y-%m", "date": { "$toDate": "$date" } } },
                "totalRevenue": { "$sum": "$price" },
            }
        },
        doc! { "$project": { "_id": 0, "month": "$_id", "totalRevenue": 1 } },
        doc! { "$sort": { "month": 1 } },
    ]
}

/// GET /total-revenue - Sum of every payment's price
pub async fn total_revenue(State(state): State<SharedState>) -> ApiResult<Value> {
    let results: Vec<Document> = state
        .store
        .payments()
        .aggregate(total_revenue_pipeline())
        .await?
        .try_collect()
        .await?;

    // An empty ledger aggregates to no groups at all
    let total = results
        .first()
        .and_then(|d| d.get("totalRevenue").cloned())
        .unwrap_or(Bson::Int32(0));

    Ok(ApiResponse::success(json!({ "totalRevenue": total })))
}

/// GET /total-revenue-by-month - Revenue grouped by calendar month of the
/// payment date, chronologically ascending
pub async fn revenue_by_month(State(state): State<SharedState>) -> ApiResult<Vec<Document>> {
    let results: Vec<Document> = state
        .store
        .payments()
        .aggregate(monthly_revenue_pipeline())
        .await?
        .try_collect()
        .await?;
    Ok(ApiResponse::success(results))
}

/// POST /create-payment-intent - Create a card payment intent for a price
/// in major units and return the provider's client secret
pub async fn create_intent(
    State(state): State<SharedState>,
    Json(request): Json<CreateIntentRequest>,
) -> ApiResult<Value> {
    let amount = amount_from_price(request.price);
    if amount < state.config.payments.minimum_amount {
        return Err(ApiError::validation_error(format!(
            "Amount must be at least {} cents",
            state.config.payments.minimum_amount
        )));
    }

    let client_secret = state.payments.create_card_intent(amount).await?;
    Ok(ApiResponse::success(json!({ "clientSecret": client_secret })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_revenue_pipeline_shape() {
        let pipeline = total_revenue_pipeline();
        assert_eq!(pipeline.len(), 1);
        let group = pipeline[0].get_document("$group").unwrap();
        assert_eq!(group.get("_id"), Some(&Bson::Null));
        assert_eq!(
            group.get_document("totalRevenue").unwrap(),
            &doc! { "$sum": "$price" }
        );
    }

    #[test]
    fn test_monthly_pipeline_groups_by_year_month_and_sorts_ascending() {
        let pipeline = monthly_revenue_pipeline();
        assert_eq!(pipeline.len(), 3);

        let group = pipeline[0].get_document("$group").unwrap();
        let key = group.get_document("_id").unwrap();
        let date_to_string = key.get_document("$dateToString").unwrap();
        assert_eq!(date_to_string.get_str("format"), Ok("%Y-%m"));

        let sort = pipeline[2].get_document("$sort").unwrap();
        assert_eq!(sort.get("month"), Some(&Bson::Int32(1)));
    }
}
