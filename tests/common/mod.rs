#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{header, Request, Response},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use tourdesk_api::{
    app,
    config::{AppConfig, SecretString},
    session::Role,
    state::AppState,
    users::{MemoryUserStore, NewUser, User},
};

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";
pub const ADMIN_EMAIL: &str = "admin@tourdesk.test";
pub const ADMIN_PASSWORD: &str = "admin-password";

// ---------------------------------------------------------------------------
// In-process router
// ---------------------------------------------------------------------------

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
}

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "SESSION_SECRET" => Some(SECRET.to_string()),
        _ => None,
    })
    .expect("test configuration should be valid")
}

pub fn test_app() -> TestApp {
    let state = AppState::new(test_config(), Arc::new(MemoryUserStore::new()));
    let router = app::router(state.clone());
    TestApp { state, router }
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible")
    }

    /// `Cookie` header value for a freshly issued session.
    pub fn cookie_for(&self, principal_id: &str, role: Role) -> String {
        let issued = self.state.codec.issue(principal_id, role).expect("issue session");
        format!("session={}", issued.token)
    }

    pub async fn create_user(&self, email: &str, password: &str, role: Role) -> User {
        self.state
            .users
            .create(NewUser {
                email: email.to_string(),
                name: "Test User".to_string(),
                role,
                password: SecretString::new(password),
                profile: None,
            })
            .await
            .expect("create user")
    }
}

pub fn get(path: &str, cookie: Option<&str>) -> Request<Body> {
    request("GET", path, cookie, Body::empty())
}

pub fn delete(path: &str, cookie: Option<&str>) -> Request<Body> {
    request("DELETE", path, cookie, Body::empty())
}

pub fn post_json(path: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut req = request("POST", path, cookie, Body::from(body.to_string()));
    req.headers_mut()
        .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
    req
}

fn request(method: &str, path: &str, cookie: Option<&str>, body: Body) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(body).expect("valid request")
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("json body")
}

pub fn location<B>(response: &Response<B>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// The `Set-Cookie` header for the session cookie, if the response has one.
pub fn session_set_cookie<B>(response: &Response<B>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("session="))
        .map(str::to_string)
}

/// Turn a `Set-Cookie` value into the matching `Cookie` request header value.
pub fn cookie_header(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .unwrap_or_default()
        .to_string()
}

// ---------------------------------------------------------------------------
// Spawned server binary
// ---------------------------------------------------------------------------

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tourdesk-api"));
        cmd.env("TOURDESK_HOST", "127.0.0.1")
            .env("TOURDESK_PORT", port.to_string())
            .env("SESSION_SECRET", SECRET)
            .env("ADMIN_EMAIL", ADMIN_EMAIL)
            .env("ADMIN_PASSWORD", ADMIN_PASSWORD)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status().is_success() {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// HTTP client that leaves redirects and cookies to the test.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("reqwest client")
}
