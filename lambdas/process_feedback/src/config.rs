use figment::providers::Env;
use figment::Figment;
use serde::{Deserialize, Serialize};
use shared::feedback::Thresholds;

/// What a failing record does to the rest of its batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum BatchFailureMode {
    /// The first failure fails the whole invocation and SQS redelivers the batch.
    #[default]
    FailFast,
    /// Failures are reported per message through `batchItemFailures`.
    ReportItemFailures,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Config {
    pub feedback_upload_bucket: String,
    pub price_upper_limit: Option<i64>,
    pub price_lower_limit: Option<i64>,
    #[serde(default)]
    pub batch_failure_mode: BatchFailureMode,
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::raw().only(&[
                "FEEDBACK_UPLOAD_BUCKET",
                "PRICE_UPPER_LIMIT",
                "PRICE_LOWER_LIMIT",
                "BATCH_FAILURE_MODE",
            ]))
            .extract()
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            price_upper_limit: self.price_upper_limit,
            price_lower_limit: self.price_lower_limit,
        }
    }
}
