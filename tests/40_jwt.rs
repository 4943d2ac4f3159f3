mod common;

use anyhow::Result;
use reqwest::StatusCode;

use learnhub_api::auth::decode_jwt;

#[tokio::test]
async fn issues_a_five_hour_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/jwt", server.base_url))
        .json(&serde_json::json!({ "email": "tutor@learnhub.io", "name": "A Tutor" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);

    let token = body["data"]["token"]
        .as_str()
        .expect("token missing from response");

    let claims = decode_jwt(token, common::TEST_JWT_SECRET)?;
    assert_eq!(claims.email, "tutor@learnhub.io");
    assert_eq!(claims.exp - claims.iat, 5 * 3600);
    Ok(())
}

#[tokio::test]
async fn token_request_without_email_is_rejected() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/jwt", server.base_url))
        .json(&serde_json::json!({ "name": "No Email" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "email is required");
    Ok(())
}
