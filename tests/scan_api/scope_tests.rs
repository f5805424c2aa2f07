//! Scope target registry and fuzz config endpoints.

use actix_web::test;
use serde_json::{Value, json};

use super::helpers::*;

#[actix_rt::test]
async fn test_scope_target_crud() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;

    let id = register_url(&app, "https://x.com").await;

    // Duplicate registration conflicts
    let req = test::TestRequest::post()
        .uri("/api/v1/scope-targets")
        .set_json(json!({"type": "URL", "scope_target": "https://x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);

    // Unknown type is a bad request
    let req = test::TestRequest::post()
        .uri("/api/v1/scope-targets")
        .set_json(json!({"type": "Domain", "scope_target": "x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let (status, one) = get_json(&app, &format!("/api/v1/scope-targets/{}", id)).await;
    assert_eq!(status, 200);
    assert_eq!(one["type"], "URL");
    assert_eq!(one["scope_target"], "https://x.com");

    let (_, all) = get_json(&app, "/api/v1/scope-targets").await;
    assert_eq!(all.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/scope-targets/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let (status, _) = get_json(&app, &format!("/api/v1/scope-targets/{}", id)).await;
    assert_eq!(status, 404);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/scope-targets/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_rt::test]
async fn test_fuzz_config_round_trip() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    let id = register_url(&app, "https://x.com").await;
    let uri = format!("/api/v1/scope/{}/fuzz-config", id);

    let (status, empty) = get_json(&app, &uri).await;
    assert_eq!(status, 200);
    assert_eq!(empty, json!({}));

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({
            "method": "GET",
            "threads": 25,
            "matchStatusCodes": "200,204",
            "proxyURL": "http://127.0.0.1:8080",
            "headers": [{"name": "X-Test", "value": "1"}]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "success"}));

    let (_, saved) = get_json(&app, &uri).await;
    assert_eq!(saved["threads"], 25);
    assert_eq!(saved["matchStatusCodes"], "200,204");
    assert_eq!(saved["proxyURL"], "http://127.0.0.1:8080");
    assert_eq!(saved["headers"][0]["name"], "X-Test");
}

#[actix_rt::test]
async fn test_fuzz_config_requires_known_scope() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    let uri = format!("/api/v1/scope/{}/fuzz-config", uuid::Uuid::new_v4());

    let (status, _) = get_json(&app, &uri).await;
    assert_eq!(status, 404);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({"threads": 5}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_rt::test]
async fn test_fuzz_config_accepts_null_fields() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    let id = register_url(&app, "https://x.com").await;
    let uri = format!("/api/v1/scope/{}/fuzz-config", id);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({
            "threads": 10,
            "matchStatusCodes": "200",
            "headers": null,
            "cookies": null,
            "wordlistId": null
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let (_, saved) = get_json(&app, &uri).await;
    assert_eq!(saved["threads"], 10);
    assert_eq!(saved["matchStatusCodes"], "200");
    assert_eq!(saved["headers"], json!([]));
    assert_eq!(saved["wordlistId"], "");
}

#[actix_rt::test]
async fn test_fuzz_config_rejects_wrong_types() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    let id = register_url(&app, "https://x.com").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/scope/{}/fuzz-config", id))
        .set_json(json!({"threads": "many"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_rt::test]
async fn test_health_and_ready() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;

    let (status, body) = get_json(&app, "/api/v1/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get_json(&app, "/api/v1/ready").await;
    assert_eq!(status, 200);
    assert_eq!(body["database"], "connected");
}
