use clap::Parser;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workflow_invoker::models::ResponseMode;
use workflow_invoker::{InvokerConfig, WorkflowInvoker, run_pipeline};

const DEFAULT_FILE_PATH: &str = "example_video.mp4";

/// Required configuration is absent; no network call was made
const EXIT_CONFIG_MISSING: i32 = 1;
/// The HTTP client could not be built
const EXIT_CLIENT_SETUP: i32 = 4;

/// Upload a video file and run the configured workflow on it
#[derive(Parser, Debug)]
#[command(name = "workflow-invoker", version)]
struct Args {
    /// File to upload
    #[arg(default_value = DEFAULT_FILE_PATH)]
    file: String,

    /// User identifier (overrides DIFY_USER_ID)
    #[arg(long)]
    user: Option<String>,

    /// blocking or streaming (overrides DIFY_RESPONSE_MODE)
    #[arg(long)]
    response_mode: Option<ResponseMode>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Logs go to stderr; stdout carries the result.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workflow_invoker=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = match InvokerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Written directly so a narrow RUST_LOG cannot hide it.
            eprintln!("{}", e);
            error!("❌ {}", e);
            info!("Set DIFY_API_KEY and DIFY_BASE_URL in the environment or a .env file.");
            std::process::exit(EXIT_CONFIG_MISSING);
        }
    };

    if let Some(user) = args.user {
        config.user = user;
    }
    if let Some(mode) = args.response_mode {
        config.response_mode = mode;
    }

    info!("🚀 Workflow endpoint: {}", config.workflow_url());

    let user = config.user.clone();
    let invoker = match WorkflowInvoker::new(config) {
        Ok(invoker) => invoker,
        Err(e) => {
            eprintln!("{}", e);
            error!("❌ Failed to build HTTP client: {}", e);
            std::process::exit(EXIT_CLIENT_SETUP);
        }
    };
    let outcome = run_pipeline(&invoker, &args.file, &user).await;

    println!("{}", outcome);
    std::process::exit(outcome.exit_code());
}
