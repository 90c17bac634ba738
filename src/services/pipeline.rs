use crate::models::{UploadResult, WorkflowResult};
use crate::services::invoker::WorkflowInvoker;
use std::fmt;

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_UPLOAD_FAILED: i32 = 2;
pub const EXIT_WORKFLOW_FAILED: i32 = 3;

/// Final state of one upload-then-run sequence
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineOutcome {
    /// Upload succeeded and the workflow was invoked
    Completed(WorkflowResult),
    /// Upload did not yield a file id; the workflow was never called
    UploadAborted(UploadResult),
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineOutcome::Completed(result) if result.is_success())
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineOutcome::Completed(result) if result.is_success() => EXIT_SUCCESS,
            PipelineOutcome::Completed(_) => EXIT_WORKFLOW_FAILED,
            PipelineOutcome::UploadAborted(_) => EXIT_UPLOAD_FAILED,
        }
    }
}

impl fmt::Display for PipelineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineOutcome::Completed(result) => write!(f, "Result: {}", result),
            PipelineOutcome::UploadAborted(upload) => {
                write!(f, "Upload failed, workflow not run: {}", upload)
            }
        }
    }
}

/// Upload `file_path`, then run the workflow on it with the same user.
pub async fn run_pipeline(
    invoker: &WorkflowInvoker,
    file_path: &str,
    user: &str,
) -> PipelineOutcome {
    let upload = invoker.upload_file(file_path, user).await;

    let file_id = match upload.file_id() {
        Some(id) => id.to_string(),
        None => {
            tracing::warn!("🛑 Skipping workflow run: {}", upload);
            return PipelineOutcome::UploadAborted(upload);
        }
    };

    let response_mode = invoker.config().response_mode;
    let result = invoker.run_workflow(&file_id, user, response_mode).await;
    PipelineOutcome::Completed(result)
}
