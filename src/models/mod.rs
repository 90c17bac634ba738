use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Delivery mode for workflow results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    #[default]
    Blocking,
    Streaming,
}

impl ResponseMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseMode::Blocking => "blocking",
            ResponseMode::Streaming => "streaming",
        }
    }
}

impl fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "blocking" => Ok(ResponseMode::Blocking),
            "streaming" => Ok(ResponseMode::Streaming),
            other => Err(format!("unknown response mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub file_path: String,
    pub user: String,
    pub mime_type: String,
}

/// Outcome of the multipart upload call
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    Uploaded { file_id: String },
    UploadFailed { http_status: u16, body: String },
    UploadError { cause: String },
}

impl UploadResult {
    pub fn file_id(&self) -> Option<&str> {
        match self {
            UploadResult::Uploaded { file_id } => Some(file_id.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for UploadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadResult::Uploaded { file_id } => write!(f, "uploaded (id: {})", file_id),
            UploadResult::UploadFailed { http_status, body } => {
                write!(f, "upload failed with status {}: {}", http_status, body)
            }
            UploadResult::UploadError { cause } => write!(f, "upload error: {}", cause),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowRequest {
    pub file_id: String,
    pub user: String,
    pub response_mode: ResponseMode,
}

/// Outcome of the workflow run call
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowResult {
    WorkflowSucceeded { payload: Value },
    WorkflowFailed { http_status: u16, body: String },
    WorkflowError { cause: String },
}

impl WorkflowResult {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowResult::WorkflowSucceeded { .. })
    }
}

impl fmt::Display for WorkflowResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowResult::WorkflowSucceeded { payload } => {
                let pretty = serde_json::to_string_pretty(payload).map_err(|_| fmt::Error)?;
                f.write_str(&pretty)
            }
            WorkflowResult::WorkflowFailed { http_status, body } => {
                write!(f, "workflow failed with status {}: {}", http_status, body)
            }
            WorkflowResult::WorkflowError { cause } => write!(f, "workflow error: {}", cause),
        }
    }
}

/// Success body of `POST /files/upload`. Only `id` is read.
#[derive(Debug, Deserialize)]
pub struct UploadResponse {
    pub id: Option<String>,
}

/// One entry of a file-list workflow input
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FileInput {
    pub transfer_method: String,
    pub upload_file_id: String,
    #[serde(rename = "type")]
    pub file_type: String,
}

impl FileInput {
    pub fn local_file(upload_file_id: &str, file_type: &str) -> Self {
        Self {
            transfer_method: "local_file".to_string(),
            upload_file_id: upload_file_id.to_string(),
            file_type: file_type.to_string(),
        }
    }
}

/// JSON body of `POST /workflows/run`
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowRunBody {
    pub inputs: BTreeMap<String, Vec<FileInput>>,
    pub response_mode: ResponseMode,
    pub user: String,
}

impl WorkflowRunBody {
    pub fn new(request: &WorkflowRequest, input_name: &str, file_type: &str) -> Self {
        let mut inputs = BTreeMap::new();
        inputs.insert(
            input_name.to_string(),
            vec![FileInput::local_file(&request.file_id, file_type)],
        );
        Self {
            inputs,
            response_mode: request.response_mode,
            user: request.user.clone(),
        }
    }
}
