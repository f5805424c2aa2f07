//! Scan lifecycle through the HTTP API.

use serde_json::json;

use super::helpers::*;

/// Crawler scan: accepted, pending while the tool runs, then success with stdout.
#[actix_rt::test]
async fn test_crawler_scan_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    let host = ScriptedHost::gated(vec![stdout("https://x.com/a\nhttps://x.com/b\n")]);
    let ctx = TestContext::new(host.clone(), tmp.path());
    let app = create_test_app(&ctx).await;
    let scope_id = register_url(&app, "https://x.com").await;

    let (status, body) = start_scan(&app, "katana", json!({"url": "https://x.com"})).await;
    assert_eq!(status, 202);
    let scan_id = body["scan_id"].as_str().unwrap().to_string();

    let (status, pending) = get_json(&app, &format!("/api/v1/scan/katana/{}", scan_id)).await;
    assert_eq!(status, 200);
    assert_eq!(pending["status"], "pending");
    assert!(pending["result"].is_null());
    assert_eq!(pending["url"], "https://x.com");
    assert_eq!(pending["scope_target_id"], scope_id.as_str());

    host.release(1);
    let done = wait_for_terminal(&app, "katana", &scan_id).await;
    assert_eq!(done["status"], "success");
    assert_eq!(done["result"], "https://x.com/a\nhttps://x.com/b\n");
    assert!(done["error"].is_null());
    assert_eq!(done["execution_time_ms"], 25);
    assert_eq!(
        done["command"],
        "docker exec recon-framework-katana-1 katana -u https://x.com -d 5 -jc -kf all -silent -nc -p 15"
    );
    let ts = |key: &str| {
        chrono::DateTime::parse_from_rfc3339(done[key].as_str().unwrap()).unwrap()
    };
    assert!(ts("completed_at") >= ts("created_at"));
}

/// Unscoped crawler scan is refused and creates no job.
#[actix_rt::test]
async fn test_unscoped_scan_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    let scope_id = register_url(&app, "https://x.com").await;

    let list_uri = format!("/api/v1/scope/{}/scans/katana", scope_id);
    let (_, before) = get_json(&app, &list_uri).await;

    let (status, body) = start_scan(&app, "katana", json!({"url": "https://y.com"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");

    let (_, after) = get_json(&app, &list_uri).await;
    assert_eq!(before.as_array().unwrap().len(), after.as_array().unwrap().len());
    assert_eq!(ctx.store.scan_count(), 0);
    assert!(ctx.host.seen().is_empty());
}

#[actix_rt::test]
async fn test_scope_mismatch_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    register_url(&app, "https://x.com").await;
    let other = register_url(&app, "https://y.com").await;

    let (status, _) = start_scan(
        &app,
        "ffuf",
        json!({"url": "https://x.com", "scope_target_id": other}),
    )
    .await;
    assert_eq!(status, 400);
    assert_eq!(ctx.store.scan_count(), 0);
}

#[actix_rt::test]
async fn test_bad_requests() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;
    register_url(&app, "https://x.com").await;

    let (status, _) = start_scan(&app, "nmap", json!({"url": "https://x.com"})).await;
    assert_eq!(status, 404);

    let (status, _) = start_scan(&app, "gau", json!({"url": ""})).await;
    assert_eq!(status, 400);

    let (status, body) = start_scan(&app, "gau", json!({"target": "https://x.com"})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "INVALID_INPUT");
}

#[actix_rt::test]
async fn test_failed_tool_is_recorded() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(
        ScriptedHost::new(vec![failure("Error: No such container\n")]),
        tmp.path(),
    );
    let app = create_test_app(&ctx).await;
    register_url(&app, "https://x.com").await;

    let (_, body) = start_scan(&app, "waybackurls", json!({"url": "https://x.com"})).await;
    let scan_id = body["scan_id"].as_str().unwrap();

    let done = wait_for_terminal(&app, "waybackurls", scan_id).await;
    assert_eq!(done["status"], "error");
    assert_eq!(done["error"], "Error: No such container\n");
    assert!(done["result"].is_null());
}

#[actix_rt::test]
async fn test_scan_lookup_is_per_tool() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![stdout("a\n")]), tmp.path());
    let app = create_test_app(&ctx).await;
    register_url(&app, "https://x.com").await;

    let (_, body) = start_scan(&app, "gau", json!({"url": "https://x.com"})).await;
    let scan_id = body["scan_id"].as_str().unwrap();
    wait_for_terminal(&app, "gau", scan_id).await;

    let (status, _) = get_json(&app, &format!("/api/v1/scan/linkfinder/{}", scan_id)).await;
    assert_eq!(status, 404);

    let (status, _) = get_json(
        &app,
        &format!("/api/v1/scan/gau/{}", uuid::Uuid::now_v7()),
    )
    .await;
    assert_eq!(status, 404);

    assert_eq!(
        ctx.host.seen(),
        vec![
            "docker run --rm sxcurity/gau:latest x.com --providers wayback,commoncrawl,otx --json --threads 10"
                .to_string()
        ]
    );
}

#[actix_rt::test]
async fn test_list_newest_first() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(
        ScriptedHost::new(vec![stdout("1\n"), stdout("2\n"), stdout("3\n")]),
        tmp.path(),
    );
    let app = create_test_app(&ctx).await;
    let scope_id = register_url(&app, "https://x.com").await;

    let mut ids = Vec::new();
    for _ in 0..2 {
        let (_, body) = start_scan(&app, "linkfinder", json!({"url": "https://x.com"})).await;
        let id = body["scan_id"].as_str().unwrap().to_string();
        wait_for_terminal(&app, "linkfinder", &id).await;
        ids.push(id);
    }
    let (_, body) = start_scan(&app, "katana", json!({"url": "https://x.com"})).await;
    wait_for_terminal(&app, "katana", body["scan_id"].as_str().unwrap()).await;

    let uri = format!("/api/v1/scope/{}/scans/linkfinder", scope_id);
    let (status, list) = get_json(&app, &uri).await;
    assert_eq!(status, 200);
    let listed: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|j| j["scan_id"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec![ids[1].as_str(), ids[0].as_str()]);
}
