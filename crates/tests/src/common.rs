use axum::{
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared_types::{ChangePasswordForm, CHANGE_PASSWORD_PATH};
use std::cell::RefCell;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral localhost port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

/// Serve the real REST router.
pub async fn spawn_app() -> String {
    spawn(server::rest::rest_router()).await
}

/// One request as seen by a [`Recorder`] backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: Value,
    pub platform: Option<String>,
}

/// Backend stub that records every POST to the password endpoint and
/// answers with a fixed status.
#[derive(Clone, Default)]
pub struct Recorder {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn hits(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Serve a [`Recorder`] backend answering with `status`.
pub async fn spawn_recorder(status: StatusCode) -> (String, Recorder) {
    let recorder = Recorder::default();
    let log = recorder.requests.clone();

    let router = Router::new().route(
        CHANGE_PASSWORD_PATH,
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let log = log.clone();
            async move {
                let platform = headers
                    .get("x-client-platform")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                log.lock().unwrap().push(RecordedRequest { body, platform });

                if status.is_success() {
                    (status, Json(json!({ "message": "ok" })))
                } else {
                    (
                        status,
                        Json(json!({ "kind": "InternalError", "message": "backend exploded" })),
                    )
                }
            }
        }),
    );

    (spawn(router).await, recorder)
}

/// A base URL nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no local address");
    drop(listener);
    format!("http://{addr}")
}

/// Form pre-filled with the given entries.
pub fn filled_form(password: &str, confirm: &str) -> RefCell<ChangePasswordForm> {
    let mut form = ChangePasswordForm::new();
    form.set_password(password);
    form.set_confirm_password(confirm);
    RefCell::new(form)
}
