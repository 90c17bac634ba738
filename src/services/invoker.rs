use crate::config::InvokerConfig;
use crate::error::InvokerError;
use crate::models::{
    ResponseMode, UploadRequest, UploadResponse, UploadResult, WorkflowRequest, WorkflowResult,
    WorkflowRunBody,
};
use crate::utils::mime::{file_name, guess_mime_type};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Client for the two workflow API calls: file upload and workflow run.
///
/// Holds no per-call state; every call builds its own request from the
/// immutable configuration.
pub struct WorkflowInvoker {
    client: Client,
    config: InvokerConfig,
}

impl WorkflowInvoker {
    pub fn new(config: InvokerConfig) -> Result<Self, InvokerError> {
        let client = Client::builder().build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: InvokerConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &InvokerConfig {
        &self.config
    }

    /// Upload a local file as multipart form data.
    ///
    /// Always returns a result value; I/O and network faults become
    /// [`UploadResult::UploadError`].
    pub async fn upload_file(&self, file_path: &str, user: &str) -> UploadResult {
        let request = UploadRequest {
            file_path: file_path.to_string(),
            user: user.to_string(),
            mime_type: guess_mime_type(file_path),
        };

        tracing::info!(
            "📤 Uploading {} ({}) as user '{}'...",
            request.file_path,
            request.mime_type,
            request.user
        );

        match self.send_upload(&request).await {
            Ok(file_id) => {
                tracing::info!("✅ File uploaded, id: {}", file_id);
                UploadResult::Uploaded { file_id }
            }
            Err(InvokerError::RemoteRejected { status, body }) => {
                tracing::error!("❌ Upload failed with status {}: {}", status, body);
                UploadResult::UploadFailed {
                    http_status: status,
                    body,
                }
            }
            Err(e) => {
                tracing::error!("❌ Upload error: {}", e);
                UploadResult::UploadError {
                    cause: e.to_string(),
                }
            }
        }
    }

    async fn send_upload(&self, request: &UploadRequest) -> Result<String, InvokerError> {
        // Whole-file read; the handle is closed before the request goes out.
        let bytes = tokio::fs::read(&request.file_path).await?;

        let part = Part::bytes(bytes)
            .file_name(file_name(&request.file_path))
            .mime_str(&request.mime_type)?;
        let form = Form::new()
            .part("file", part)
            .text("user", request.user.clone())
            .text("type", self.config.upload_type.clone());

        let response = self
            .client
            .post(self.config.upload_url())
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::CREATED {
            return Err(InvokerError::RemoteRejected {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: UploadResponse = serde_json::from_str(&body)?;
        parsed.id.filter(|id| !id.is_empty()).ok_or_else(|| {
            InvokerError::MalformedResponse(format!("upload response has no id: {}", body))
        })
    }

    /// Run the configured workflow with a previously uploaded file as input.
    pub async fn run_workflow(
        &self,
        file_id: &str,
        user: &str,
        response_mode: ResponseMode,
    ) -> WorkflowResult {
        let request = WorkflowRequest {
            file_id: file_id.to_string(),
            user: user.to_string(),
            response_mode,
        };

        tracing::info!(
            "⚙️  Running workflow with file {} ({} mode)...",
            request.file_id,
            request.response_mode
        );

        match self.send_workflow(&request).await {
            Ok(payload) => {
                tracing::info!("✅ Workflow finished");
                WorkflowResult::WorkflowSucceeded { payload }
            }
            Err(InvokerError::RemoteRejected { status, body }) => {
                tracing::error!("❌ Workflow failed with status {}: {}", status, body);
                WorkflowResult::WorkflowFailed {
                    http_status: status,
                    body,
                }
            }
            Err(e) => {
                tracing::error!("❌ Workflow error: {}", e);
                WorkflowResult::WorkflowError {
                    cause: e.to_string(),
                }
            }
        }
    }

    async fn send_workflow(&self, request: &WorkflowRequest) -> Result<Value, InvokerError> {
        let body = WorkflowRunBody::new(
            request,
            &self.config.workflow_input,
            &self.config.file_type,
        );

        let response = self
            .client
            .post(self.config.workflow_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            return Err(InvokerError::RemoteRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        match serde_json::from_str::<Value>(&text) {
            Ok(payload) => Ok(payload),
            // Streaming responses are event-stream text, not a single JSON document.
            Err(_) if request.response_mode == ResponseMode::Streaming => Ok(Value::String(text)),
            Err(e) => Err(e.into()),
        }
    }
}
