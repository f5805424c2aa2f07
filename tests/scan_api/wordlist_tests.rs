//! Wordlist upload, use by the fuzzer, and deletion.

use actix_web::test;
use serde_json::{Value, json};

use super::helpers::*;

const BOUNDARY: &str = "----recon-test-boundary";

fn multipart_body(field: &str, filename: &str, content: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
         Content-Type: text/plain\r\n\r\n{content}\r\n--{b}--\r\n",
        b = BOUNDARY
    )
}

fn upload_request(field: &str, filename: &str, content: &str) -> actix_http::Request {
    test::TestRequest::post()
        .uri("/api/v1/fuzz/wordlists")
        .insert_header((
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(multipart_body(field, filename, content))
        .to_request()
}

#[actix_rt::test]
async fn test_wordlist_lifecycle() {
    let tmp = tempfile::tempdir().unwrap();
    let host = ScriptedHost::new(vec![stdout(""), stdout(r#"{"results": []}"#)]);
    let ctx = TestContext::new(host, tmp.path());
    let app = create_test_app(&ctx).await;

    let req = upload_request("wordlist", "api.txt", "admin\nlogin\n");
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let wordlist: Value = test::read_body_json(resp).await;
    assert_eq!(wordlist["name"], "api.txt");
    assert_eq!(wordlist["line_count"], 2);
    assert_eq!(wordlist["file_size"], 12);
    let id = wordlist["id"].as_str().unwrap().to_string();
    let path = wordlist["path"].as_str().unwrap().to_string();
    assert!(std::path::Path::new(&path).exists());

    let (_, list) = get_json(&app, "/api/v1/fuzz/wordlists").await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // A config naming the wordlist makes the fuzzer use its path
    let scope_id = register_url(&app, "https://x.com").await;
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/scope/{}/fuzz-config", scope_id))
        .set_json(json!({"wordlistId": id}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let (_, body) = start_scan(
        &app,
        "ffuf",
        json!({"url": "https://x.com", "scope_target_id": scope_id}),
    )
    .await;
    let done = wait_for_terminal(&app, "ffuf", body["scan_id"].as_str().unwrap()).await;
    assert_eq!(done["result"], json!({"endpoints": []}));
    assert!(ctx.host.seen()[0].contains(&format!(" -w {} ", path)));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/fuzz/wordlists/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    assert!(!std::path::Path::new(&path).exists());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/fuzz/wordlists/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_rt::test]
async fn test_upload_requires_wordlist_field() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = TestContext::new(ScriptedHost::new(vec![]), tmp.path());
    let app = create_test_app(&ctx).await;

    let resp = test::call_service(&app, upload_request("file", "api.txt", "admin\n")).await;
    assert_eq!(resp.status(), 400);
    assert!(ctx.repos.wordlists.list_wordlists().await.unwrap().is_empty());
}
