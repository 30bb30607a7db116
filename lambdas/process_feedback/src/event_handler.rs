use crate::config::BatchFailureMode;
use aws_lambda_events::{
    event::sqs::SqsEvent,
    sqs::{BatchItemFailure, SqsMessage},
};
use lambda_runtime::{tracing, Error, LambdaEvent};
use serde::Serialize;
use shared::{
    core::{FeedbackStore, IdGenerator},
    error::FeedbackError,
    feedback::{classify, decode_record_body, ResponseMessage, Thresholds},
};

pub(crate) struct HandlerDeps<S: FeedbackStore, I: IdGenerator> {
    pub feedback_store: S,
    pub id_generator: I,
    pub thresholds: Thresholds,
    pub failure_mode: BatchFailureMode,
}

/// Serializes as `{"statusCode": 200}`. `batchItemFailures`, which SQS reads for
/// partial batch responses, is only emitted when some record failed; fail-fast
/// mode returns failures as an error instead, so it never appears there.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedbackResponse {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub batch_item_failures: Vec<BatchItemFailure>,
}

#[derive(Debug)]
pub(crate) struct StoredFeedback {
    pub key: String,
    pub response: ResponseMessage,
}

#[tracing::instrument(skip(deps, event))]
pub(crate) async fn function_handler<S: FeedbackStore, I: IdGenerator>(
    deps: &HandlerDeps<S, I>,
    event: LambdaEvent<SqsEvent>,
) -> Result<FeedbackResponse, Error> {
    let records = event.payload.records;
    tracing::info!("Received {} feedback records", records.len());

    let mut batch_item_failures = vec![];
    for message in records {
        let message_id = message.message_id.clone().unwrap_or_default();

        match process_message(deps, message).await {
            Ok(stored) => {
                tracing::info!(
                    "Stored feedback for message {} as {} ({})",
                    message_id,
                    stored.key,
                    stored.response.kind()
                );
            }
            Err(e) => match deps.failure_mode {
                BatchFailureMode::FailFast => {
                    tracing::error!(
                        decode_error = e.is_decode(),
                        "Failed to process message {}, aborting batch: {}",
                        message_id,
                        e
                    );
                    return Err(Error::from(e));
                }
                BatchFailureMode::ReportItemFailures => {
                    tracing::error!(
                        decode_error = e.is_decode(),
                        "Failed to process message {}: {}",
                        message_id,
                        e
                    );
                    let mut failure_item = BatchItemFailure::default();
                    failure_item.item_identifier = message_id;
                    batch_item_failures.push(failure_item);
                }
            },
        }
    }

    Ok(FeedbackResponse {
        status_code: 200,
        batch_item_failures,
    })
}

#[tracing::instrument(skip(deps, message), fields(message_id = ?message.message_id))]
async fn process_message<S: FeedbackStore, I: IdGenerator>(
    deps: &HandlerDeps<S, I>,
    message: SqsMessage,
) -> Result<StoredFeedback, FeedbackError> {
    let body = message.body.ok_or(FeedbackError::MissingBody)?;
    let decoded = decode_record_body(&body)?;
    tracing::debug!(
        "Decoded notification {:?} ({:?})",
        decoded.notification_id,
        decoded.subject
    );

    let response = classify(&decoded.payload, &deps.thresholds);
    // The response is not delivered anywhere yet; only the raw payload is stored.
    tracing::info!(
        "Feedback for {} at {}: {}",
        decoded.payload.name,
        decoded.payload.price,
        response
    );

    let key = deps.id_generator.generate_id();
    deps.feedback_store
        .put_feedback(&key, decoded.to_json_bytes()?)
        .await
        .map_err(FeedbackError::Store)?;

    Ok(StoredFeedback { key, response })
}
