pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use config::InvokerConfig;
pub use error::InvokerError;
pub use services::invoker::WorkflowInvoker;
pub use services::pipeline::{PipelineOutcome, run_pipeline};
