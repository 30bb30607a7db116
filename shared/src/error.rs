use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("SQS record has no body")]
    MissingBody,

    #[error("invalid notification envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("invalid feedback payload: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("failed to store feedback: {0}")]
    Store(String),
}

impl FeedbackError {
    /// True for failures caused by the record content rather than the store.
    pub fn is_decode(&self) -> bool {
        !matches!(self, FeedbackError::Store(_))
    }
}
