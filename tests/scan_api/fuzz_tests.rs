//! Fuzzer scans: config resolution and report normalization.

use serde_json::json;

use super::helpers::*;

fn report() -> String {
    json!({
        "commandline": "ffuf",
        "results": [
            {"input": {"FUZZ": "admin"}, "status": 301, "length": 169, "words": 5, "lines": 8},
            {"input": {"FUZZ": ".git"}, "status": 403, "length": 0, "words": 1, "lines": 1}
        ]
    })
    .to_string()
}

#[actix_rt::test]
async fn test_fuzz_scan_with_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![stdout(""), stdout(&report())]), tmp.path());
    let app = create_test_app(&ctx).await;
    let scope_id = register_url(&app, "https://x.com").await;

    let (status, body) = start_scan(
        &app,
        "ffuf",
        json!({"url": "https://x.com", "scope_target_id": scope_id}),
    )
    .await;
    assert_eq!(status, 202);
    let scan_id = body["scan_id"].as_str().unwrap();

    let done = wait_for_terminal(&app, "ffuf", scan_id).await;
    assert_eq!(done["status"], "success");
    assert_eq!(
        done["result"],
        json!({"endpoints": [
            {"path": "admin", "status": 301, "size": 169, "words": 5, "lines": 8},
            {"path": ".git", "status": 403, "size": 0, "words": 1, "lines": 1}
        ]})
    );

    let seen = ctx.host.seen();
    assert_eq!(
        seen[0],
        format!(
            "docker exec recon-framework-ffuf-1 ffuf -w /wordlists/ffuf-wordlist-5000.txt -u https://x.com/FUZZ \
             -mc 200-299,301,302,307,401,403,405,500 -o /tmp/ffuf-{0}.json -of json -ac -c -r -t 40 -timeout 30",
            scan_id
        )
    );
    assert_eq!(
        seen[1],
        format!("docker exec recon-framework-ffuf-1 cat /tmp/ffuf-{}.json", scan_id)
    );
}

#[actix_rt::test]
async fn test_fuzz_scan_uses_saved_config() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![stdout(""), stdout(&report())]), tmp.path());
    let app = create_test_app(&ctx).await;
    let scope_id = register_url(&app, "https://x.com").await;

    let req = actix_web::test::TestRequest::put()
        .uri(&format!("/api/v1/scope/{}/fuzz-config", scope_id))
        .set_json(json!({"threads": 10, "matchStatusCodes": "200"}))
        .to_request();
    let resp = actix_web::test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);

    let (_, body) = start_scan(
        &app,
        "ffuf",
        json!({"url": "https://x.com", "scope_target_id": scope_id}),
    )
    .await;
    wait_for_terminal(&app, "ffuf", body["scan_id"].as_str().unwrap()).await;

    let fuzz = &ctx.host.seen()[0];
    assert!(fuzz.contains(" -t 10 "), "{}", fuzz);
    assert!(fuzz.contains(" -mc 200 "), "{}", fuzz);
    assert!(fuzz.contains(" -w /wordlists/ffuf-wordlist-5000.txt "), "{}", fuzz);
}

#[actix_rt::test]
async fn test_truncated_report_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let truncated = &report()[..40];
    let ctx = TestContext::new(ScriptedHost::new(vec![stdout(""), stdout(truncated)]), tmp.path());
    let app = create_test_app(&ctx).await;
    let scope_id = register_url(&app, "https://x.com").await;

    let (_, body) = start_scan(
        &app,
        "ffuf",
        json!({"url": "https://x.com", "scope_target_id": scope_id}),
    )
    .await;
    let done = wait_for_terminal(&app, "ffuf", body["scan_id"].as_str().unwrap()).await;
    assert_eq!(done["status"], "error");
    assert_eq!(done["error"], "failed to parse results");
    assert!(done["result"].is_null());
}

#[actix_rt::test]
async fn test_fuzz_requires_scope_id() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    register_url(&app, "https://x.com").await;

    let (status, _) = start_scan(&app, "ffuf", json!({"url": "https://x.com"})).await;
    assert_eq!(status, 400);
    assert_eq!(ctx.store.scan_count(), 0);
}
