//! Shared helpers for the scan API suite.

use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, dev::ServiceResponse, test, web};
use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::Semaphore;

use recon_scan_lib::api;
use recon_scan_lib::config::ToolConfig;
use recon_scan_lib::db::{MemoryStore, Repositories};
use recon_scan_lib::services::{
    EventBroadcaster, ProcessOutput, ScanController, ToolHost, ToolInvocation, WordlistStore,
};

/// Tool host replaying canned outputs in order.
///
/// When gated, each run waits for a permit from [`ScriptedHost::release`].
pub struct ScriptedHost {
    outputs: Mutex<VecDeque<ProcessOutput>>,
    seen: Mutex<Vec<ToolInvocation>>,
    gate: Option<Semaphore>,
}

impl ScriptedHost {
    pub fn new(outputs: Vec<ProcessOutput>) -> Arc<Self> {
        Arc::new(Self {
            outputs: Mutex::new(outputs.into()),
            seen: Mutex::default(),
            gate: None,
        })
    }

    pub fn gated(outputs: Vec<ProcessOutput>) -> Arc<Self> {
        Arc::new(Self {
            outputs: Mutex::new(outputs.into()),
            seen: Mutex::default(),
            gate: Some(Semaphore::new(0)),
        })
    }

    pub fn release(&self, runs: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(runs);
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen
            .lock()
            .unwrap()
            .iter()
            .map(ToolInvocation::command_line)
            .collect()
    }
}

#[async_trait]
impl ToolHost for ScriptedHost {
    async fn run(&self, invocation: &ToolInvocation) -> ProcessOutput {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        self.seen.lock().unwrap().push(invocation.clone());
        self.outputs.lock().unwrap().pop_front().unwrap_or_default()
    }
}

pub fn stdout(text: &str) -> ProcessOutput {
    ProcessOutput {
        stdout: text.to_string(),
        elapsed: Duration::from_millis(25),
        ..Default::default()
    }
}

pub fn failure(stderr: &str) -> ProcessOutput {
    ProcessOutput {
        stderr: stderr.to_string(),
        exec_error: Some("exit status: 1".to_string()),
        elapsed: Duration::from_millis(5),
        ..Default::default()
    }
}

/// Everything a test needs to drive and inspect the app.
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub host: Arc<ScriptedHost>,
    pub repos: Repositories,
    pub controller: ScanController,
    pub wordlists: WordlistStore,
}

impl TestContext {
    pub fn new(host: Arc<ScriptedHost>, wordlist_dir: &Path) -> Self {
        let store = Arc::new(MemoryStore::new());
        let repos = Repositories::from_store(store.clone());
        let controller = ScanController::new(
            repos.clone(),
            host.clone(),
            ToolConfig::default(),
            4,
            EventBroadcaster::new(),
        );
        let wordlists =
            WordlistStore::new(wordlist_dir.to_path_buf(), 1024 * 1024, repos.wordlists.clone());

        Self {
            store,
            host,
            repos,
            controller,
            wordlists,
        }
    }
}

/// Create the test app with every `/api/v1` route.
pub async fn create_test_app(
    ctx: &TestContext,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = ServiceResponse,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(ctx.repos.clone()))
            .app_data(web::Data::new(ctx.controller.clone()))
            .app_data(web::Data::new(ctx.wordlists.clone()))
            .app_data(web::Data::new(ctx.controller.events().clone()))
            .service(web::scope("/api/v1").configure(api::configure)),
    )
    .await
}

/// Register a URL scope target and return its id.
pub async fn register_url<S>(app: &S, url: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri("/api/v1/scope-targets")
        .set_json(json!({"type": "URL", "scope_target": url}))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), 201, "scope target registration failed");
    let body: Value = test::read_body_json(resp).await;
    body["id"].as_str().unwrap().to_string()
}

/// POST a scan request, returning status and body.
pub async fn start_scan<S>(app: &S, tool: &str, body: Value) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/scan/{}", tool))
        .set_json(body)
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

/// GET a JSON resource, returning status and body.
pub async fn get_json<S>(app: &S, uri: &str) -> (u16, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let req = test::TestRequest::get().uri(uri).to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status().as_u16();
    let body = test::read_body(resp).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

/// Poll a scan until it leaves `pending`.
pub async fn wait_for_terminal<S>(app: &S, tool: &str, scan_id: &str) -> Value
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = ServiceResponse,
            Error = actix_web::Error,
        >,
{
    for _ in 0..200 {
        let (status, body) = get_json(app, &format!("/api/v1/scan/{}/{}", tool, scan_id)).await;
        assert_eq!(status, 200);
        if body["status"] != "pending" {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("scan {} never finished", scan_id);
}
