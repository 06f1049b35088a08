use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::{
    matchers::{any, header, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{kit_subscribe_path, TestApp};

#[tokio::test]
async fn subscribe_ok() -> Result<()> {
    let app = TestApp::spawn().await?;

    let subscription = json!({
        "subscriber": {
            "id": 1,
            "email_address": "jane@example.com"
        }
    });
    Mock::given(path(kit_subscribe_path()))
        .and(method("POST"))
        .and(header("Content-Type", "application/json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "subscription": subscription })),
        )
        .expect(1)
        .mount(&app.kit_server)
        .await;

    let res = app
        .post_subscribe(&json!({
            "email": "jane@example.com",
            "firstName": "Jane"
        }))
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::OK,
        "Wrong response StatusCode: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    assert_eq!(
        json!({
            "success": true,
            "subscription": subscription
        }),
        body
    );

    Ok(())
}

#[tokio::test]
async fn subscribe_ok_without_first_name() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(kit_subscribe_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscription": { "subscriber": { "email_address": "jane@example.com" } }
        })))
        .expect(1)
        .mount(&app.kit_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "jane@example.com" }))
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn subscribe_method_not_allowed() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.kit_server)
        .await;

    let url = format!("http://{}/api/subscribe", app.addr);
    let requests = [
        app.http_client.get(&url),
        app.http_client.put(&url),
        app.http_client.delete(&url),
        app.http_client.patch(&url),
    ];

    for request in requests {
        let res = request.send().await?;

        assert_eq!(
            res.status(),
            StatusCode::METHOD_NOT_ALLOWED,
            "Wrong response StatusCode: {}",
            res.status()
        );

        let body: Value = res.json().await?;
        assert_eq!(json!({ "error": "Method not allowed" }), body);
    }

    Ok(())
}

#[tokio::test]
async fn subscribe_requires_an_email() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.kit_server)
        .await;

    let tests = [
        (json!({}), "Empty json"),
        (json!({ "firstName": "Jane" }), "Missing email"),
        (json!({ "email": "" }), "Empty email"),
        (
            json!({ "email": "", "firstName": "Jane" }),
            "Empty email with first name",
        ),
    ];

    for (json_request, params) in tests {
        let res = app.post_subscribe(&json_request).await?;

        assert_eq!(
            res.status(),
            StatusCode::BAD_REQUEST,
            "Wrong response: ({}), for request with: {params}",
            res.status(),
        );

        let body: Value = res.json().await?;
        assert_eq!(
            json!({ "error": "Email is required" }),
            body,
            "Wrong body for request with: {params}"
        );
    }

    Ok(())
}

#[tokio::test]
async fn subscribe_without_credentials_is_a_configuration_error() -> Result<()> {
    let app = TestApp::spawn_with_credentials(None).await?;

    // The app must not call Kit when it has no credentials.
    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.kit_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "jane@example.com" }))
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(json!({ "error": "Server configuration error" }), body);

    Ok(())
}

#[tokio::test]
async fn subscribe_kit_timeout_is_an_internal_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    // The test client is configured with a 200ms timeout.
    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "subscription": {} }))
                .set_delay(std::time::Duration::from_secs(180)),
        )
        .expect(1)
        .mount(&app.kit_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "jane@example.com" }))
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(json!({ "error": "Internal server error" }), body);

    Ok(())
}

#[tokio::test]
async fn subscribe_unparseable_kit_reply_is_an_internal_error() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&app.kit_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "jane@example.com" }))
        .await?;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = res.json().await?;
    assert_eq!(json!({ "error": "Internal server error" }), body);

    Ok(())
}

#[tokio::test]
async fn subscribe_kit_rejection_is_mirrored_with_details() -> Result<()> {
    let app = TestApp::spawn().await?;

    let kit_error = json!({ "error": "Not Found", "message": "Form not found" });
    Mock::given(path(kit_subscribe_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_json(kit_error.clone()))
        .expect(1)
        .mount(&app.kit_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "jane@example.com" }))
        .await?;

    assert_eq!(
        res.status(),
        StatusCode::NOT_FOUND,
        "The upstream status was not mirrored, got: {}",
        res.status()
    );

    let body: Value = res.json().await?;
    assert_eq!(
        json!({
            "error": "Failed to subscribe",
            "details": kit_error
        }),
        body
    );

    Ok(())
}

#[tokio::test]
async fn subscribe_success_without_subscription_is_flagged() -> Result<()> {
    let app = TestApp::spawn().await?;

    let kit_reply = json!({ "status": "quarantined" });
    Mock::given(path(kit_subscribe_path()))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kit_reply.clone()))
        .expect(1)
        .mount(&app.kit_server)
        .await;

    let res = app
        .post_subscribe(&json!({ "email": "jane@example.com" }))
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = res.json().await?;
    assert_eq!(
        json!({
            "error": "Subscription not created",
            "details": kit_reply
        }),
        body
    );

    Ok(())
}
