use crate::event_handler::HandlerDeps;
use event_handler::function_handler;
use lambda_runtime::{run, service_fn, tracing, Error};
use shared::{adapters::S3FeedbackStore, core::UuidGenerator};

mod config;
mod event_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let s3_client = aws_sdk_s3::Client::new(&aws_config);
    let config = config::Config::load()?;
    tracing::info!(
        "Loaded configuration: bucket={}, thresholds={:?}, failure_mode={:?}",
        config.feedback_upload_bucket,
        config.thresholds(),
        config.batch_failure_mode
    );

    let handler_deps = HandlerDeps {
        thresholds: config.thresholds(),
        failure_mode: config.batch_failure_mode,
        feedback_store: S3FeedbackStore::new(config.feedback_upload_bucket, s3_client),
        id_generator: UuidGenerator,
    };

    run(service_fn(|event| function_handler(&handler_deps, event))).await
}
