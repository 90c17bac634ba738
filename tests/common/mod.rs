#![allow(dead_code)]

use axum::{
    Router,
    extract::{Multipart, State},
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::{NamedTempFile, TempDir};

#[derive(Debug, Clone)]
pub struct RecordedUpload {
    pub authorization: Option<String>,
    pub fields: HashMap<String, String>,
    pub file_field: Option<String>,
    pub file_name: Option<String>,
    pub file_content_type: Option<String>,
    pub file_bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct RecordedWorkflow {
    pub authorization: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

#[derive(Clone)]
struct MockState {
    upload_reply: (u16, String),
    workflow_reply: (u16, String),
    workflow_delay: Duration,
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    workflows: Arc<Mutex<Vec<RecordedWorkflow>>>,
}

/// In-process stand-in for the workflow API, mounted under `/v1`.
pub struct MockApi {
    pub base_url: String,
    uploads: Arc<Mutex<Vec<RecordedUpload>>>,
    workflows: Arc<Mutex<Vec<RecordedWorkflow>>>,
}

impl MockApi {
    pub async fn start(upload_reply: (u16, &str), workflow_reply: (u16, &str)) -> Self {
        Self::start_with_workflow_delay(upload_reply, workflow_reply, Duration::ZERO).await
    }

    /// Like [`MockApi::start`], but the workflow endpoint waits `delay` before replying.
    pub async fn start_with_workflow_delay(
        upload_reply: (u16, &str),
        workflow_reply: (u16, &str),
        delay: Duration,
    ) -> Self {
        let uploads = Arc::new(Mutex::new(Vec::new()));
        let workflows = Arc::new(Mutex::new(Vec::new()));

        let state = MockState {
            upload_reply: (upload_reply.0, upload_reply.1.to_string()),
            workflow_reply: (workflow_reply.0, workflow_reply.1.to_string()),
            workflow_delay: delay,
            uploads: uploads.clone(),
            workflows: workflows.clone(),
        };

        let app = Router::new()
            .route("/v1/files/upload", post(upload_handler))
            .route("/v1/workflows/run", post(workflow_handler))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            // Trailing slash on purpose: the client must strip it.
            base_url: format!("http://{}/v1/", addr),
            uploads,
            workflows,
        }
    }

    pub fn uploads(&self) -> Vec<RecordedUpload> {
        self.uploads.lock().unwrap().clone()
    }

    pub fn workflows(&self) -> Vec<RecordedWorkflow> {
        self.workflows.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.uploads().len() + self.workflows().len()
    }
}

fn header_value(headers: &HeaderMap, name: header::HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

async fn upload_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, String) {
    let mut recorded = RecordedUpload {
        authorization: header_value(&headers, header::AUTHORIZATION),
        fields: HashMap::new(),
        file_field: None,
        file_name: None,
        file_content_type: None,
        file_bytes: Vec::new(),
    };

    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        if field.file_name().is_some() {
            recorded.file_field = Some(name);
            recorded.file_name = field.file_name().map(|s| s.to_string());
            recorded.file_content_type = field.content_type().map(|s| s.to_string());
            recorded.file_bytes = field.bytes().await.unwrap().to_vec();
        } else {
            let value = field.text().await.unwrap();
            recorded.fields.insert(name, value);
        }
    }

    state.uploads.lock().unwrap().push(recorded);

    let (status, body) = state.upload_reply;
    (StatusCode::from_u16(status).unwrap(), body)
}

async fn workflow_handler(
    State(state): State<MockState>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    state.workflows.lock().unwrap().push(RecordedWorkflow {
        authorization: header_value(&headers, header::AUTHORIZATION),
        content_type: header_value(&headers, header::CONTENT_TYPE),
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });

    if !state.workflow_delay.is_zero() {
        tokio::time::sleep(state.workflow_delay).await;
    }

    let (status, body) = state.workflow_reply;
    (StatusCode::from_u16(status).unwrap(), body)
}

/// Temporary file with the given suffix and content.
pub fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("clip")
        .suffix(suffix)
        .tempfile()
        .unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

/// Empty working directory, so no stray `.env` is picked up by the binary.
pub fn empty_workdir() -> TempDir {
    tempfile::tempdir().unwrap()
}
