use crate::error::InvokerError;
use crate::models::ResponseMode;
use std::env;
use std::fmt;

pub const API_KEY_VAR: &str = "DIFY_API_KEY";
pub const BASE_URL_VAR: &str = "DIFY_BASE_URL";

/// Configuration for the workflow invoker.
///
/// Loaded once at startup and passed by value into [`crate::services::invoker::WorkflowInvoker`].
#[derive(Clone)]
pub struct InvokerConfig {
    /// Bearer token for the workflow API (required)
    pub api_key: String,

    /// API root, without trailing slash (required)
    pub base_url: String,

    /// User identifier sent with both calls (default: "user")
    pub user: String,

    /// `type` form field sent on upload (default: "MP4")
    pub upload_type: String,

    /// Classification tag for the file input of the workflow (default: "video")
    pub file_type: String,

    /// Workflow input variable that receives the uploaded file (default: "orig_mail")
    pub workflow_input: String,

    /// Response mode for workflow runs (default: blocking)
    pub response_mode: ResponseMode,
}

impl fmt::Debug for InvokerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvokerConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("user", &self.user)
            .field("upload_type", &self.upload_type)
            .field("file_type", &self.file_type)
            .field("workflow_input", &self.workflow_input)
            .field("response_mode", &self.response_mode)
            .finish()
    }
}

impl InvokerConfig {
    pub const DEFAULT_USER: &'static str = "user";
    pub const DEFAULT_UPLOAD_TYPE: &'static str = "MP4";
    pub const DEFAULT_FILE_TYPE: &'static str = "video";
    pub const DEFAULT_WORKFLOW_INPUT: &'static str = "orig_mail";

    /// Build a config with defaults for every optional field.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: normalize_base_url(&base_url.into()),
            user: Self::DEFAULT_USER.to_string(),
            upload_type: Self::DEFAULT_UPLOAD_TYPE.to_string(),
            file_type: Self::DEFAULT_FILE_TYPE.to_string(),
            workflow_input: Self::DEFAULT_WORKFLOW_INPUT.to_string(),
            response_mode: ResponseMode::Blocking,
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, InvokerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset. Every missing required
    /// variable is reported in one error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvokerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_key = read(API_KEY_VAR);
        let base_url = read(BASE_URL_VAR)
            .map(|v| normalize_base_url(&v))
            .filter(|v| !v.is_empty());

        let (api_key, base_url) = match (api_key, base_url) {
            (Some(key), Some(url)) => (key, url),
            (key, url) => {
                let mut missing = Vec::new();
                if key.is_none() {
                    missing.push(API_KEY_VAR);
                }
                if url.is_none() {
                    missing.push(BASE_URL_VAR);
                }
                return Err(InvokerError::ConfigurationMissing(missing.join(", ")));
            }
        };

        let response_mode = match read("DIFY_RESPONSE_MODE") {
            Some(v) => v.parse().unwrap_or_else(|_| {
                tracing::warn!("Unknown DIFY_RESPONSE_MODE '{}', using blocking", v);
                ResponseMode::Blocking
            }),
            None => ResponseMode::Blocking,
        };

        Ok(Self {
            api_key,
            base_url,
            user: read("DIFY_USER_ID").unwrap_or_else(|| Self::DEFAULT_USER.to_string()),
            upload_type: read("DIFY_UPLOAD_TYPE")
                .unwrap_or_else(|| Self::DEFAULT_UPLOAD_TYPE.to_string()),
            file_type: read("DIFY_FILE_TYPE").unwrap_or_else(|| Self::DEFAULT_FILE_TYPE.to_string()),
            workflow_input: read("DIFY_WORKFLOW_INPUT")
                .unwrap_or_else(|| Self::DEFAULT_WORKFLOW_INPUT.to_string()),
            response_mode,
        })
    }

    pub fn upload_url(&self) -> String {
        format!("{}/files/upload", self.base_url)
    }

    pub fn workflow_url(&self) -> String {
        format!("{}/workflows/run", self.base_url)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
