/// Integration tests for the address endpoints
///
/// Addresses are reachable only through a contact owned by the
/// authenticated user; both a wrong contact id and a wrong address id
/// produce a 404.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::TestContext;
use serde_json::json;
use tower::Service as _;

#[tokio::test]
async fn test_create_address() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/contacts/{}/addresses", contact.id))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "street": "Jalan Test",
                "city": "Jakarta",
                "province": "DKI Jakarta",
                "country": "Indonesia",
                "postal_code": "12345"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert!(body["data"]["id"].is_i64());
    assert_eq!(body["data"]["street"], "Jalan Test");
    assert_eq!(body["data"]["city"], "Jakarta");
    assert_eq!(body["data"]["province"], "DKI Jakarta");
    assert_eq!(body["data"]["country"], "Indonesia");
    assert_eq!(body["data"]["postal_code"], "12345");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_address_rejects_invalid_request() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/contacts/{}/addresses", contact.id))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "street": "Jalan Test",
                "city": "Jakarta",
                "province": "DKI Jakarta",
                "country": "",
                "postal_code": ""
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::read_json(response).await;
    assert_eq!(body["errors"].as_array().unwrap().len(), 2);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_create_address_returns_404_for_unknown_contact() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();

    let request = Request::builder()
        .method("POST")
        .uri(format!("/api/contacts/{}/addresses", contact.id + 1))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "country": "Indonesia",
                "postal_code": "12345"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::read_json(response).await;
    assert_eq!(body["errors"], "Contact not found");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_address() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();
    let address = common::create_test_address(&ctx, contact.id).await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id, address.id
        ))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["data"]["id"], address.id);
    assert_eq!(body["data"]["street"], "Jalan Test");
    assert_eq!(body["data"]["country"], "Indonesia");
    assert_eq!(body["data"]["postal_code"], "12345");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_address_returns_404_for_unknown_address() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();
    let address = common::create_test_address(&ctx, contact.id).await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id,
            address.id + 1
        ))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::read_json(response).await;
    assert_eq!(body["errors"], "Address not found");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_get_address_under_other_users_contact_returns_404() {
    let ctx = TestContext::new().await.unwrap();
    let other = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&other).await.unwrap();
    let address = common::create_test_address(&other, contact.id)
        .await
        .unwrap();

    // The contact (and its address) exist, but under a different owner
    let request = Request::builder()
        .method("GET")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id, address.id
        ))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = common::read_json(response).await;
    assert_eq!(body["errors"], "Contact not found");

    ctx.cleanup().await.unwrap();
    other.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_list_addresses() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();
    common::create_test_address(&ctx, contact.id).await.unwrap();
    common::create_test_address(&ctx, contact.id).await.unwrap();

    let request = Request::builder()
        .method("GET")
        .uri(format!("/api/contacts/{}/addresses", contact.id))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_update_address() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();
    let address = common::create_test_address(&ctx, contact.id).await.unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id, address.id
        ))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "street": "Jalan Baru",
                "city": "Bandung",
                "province": "Jawa Barat",
                "country": "Indonesia",
                "postal_code": "54321"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["data"]["id"], address.id);
    assert_eq!(body["data"]["street"], "Jalan Baru");
    assert_eq!(body["data"]["city"], "Bandung");
    assert_eq!(body["data"]["postal_code"], "54321");

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_update_address_returns_404_for_unknown_address() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();
    let address = common::create_test_address(&ctx, contact.id).await.unwrap();

    let request = Request::builder()
        .method("PUT")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id,
            address.id + 1
        ))
        .header("authorization", ctx.auth_header())
        .header("content-type", "application/json")
        .body(Body::from(
            json!({
                "country": "Indonesia",
                "postal_code": "54321"
            })
            .to_string(),
        ))
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_delete_address() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();
    let address = common::create_test_address(&ctx, contact.id).await.unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id, address.id
        ))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::read_json(response).await;
    assert_eq!(body["data"], "OK");

    // The address is gone
    let request = Request::builder()
        .method("GET")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id, address.id
        ))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}

#[tokio::test]
async fn test_delete_address_returns_404_for_unknown_address() {
    let ctx = TestContext::new().await.unwrap();
    let contact = common::create_test_contact(&ctx).await.unwrap();
    let address = common::create_test_address(&ctx, contact.id).await.unwrap();

    let request = Request::builder()
        .method("DELETE")
        .uri(format!(
            "/api/contacts/{}/addresses/{}",
            contact.id,
            address.id + 1
        ))
        .header("authorization", ctx.auth_header())
        .body(Body::empty())
        .unwrap();

    let response = ctx.app.clone().call(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    ctx.cleanup().await.unwrap();
}
