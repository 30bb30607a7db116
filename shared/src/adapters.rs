use crate::core::FeedbackStore;
use async_trait::async_trait;
use aws_sdk_s3::{primitives::ByteStream, Client};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug)]
pub struct S3FeedbackStore {
    bucket: String,
    s3_client: Client,
}

impl S3FeedbackStore {
    pub fn new(bucket: String, s3_client: Client) -> Self {
        Self { bucket, s3_client }
    }
}

#[async_trait]
impl FeedbackStore for S3FeedbackStore {
    async fn put_feedback(&self, key: &str, body: Vec<u8>) -> Result<(), String> {
        self.s3_client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(JSON_CONTENT_TYPE)
            .body(ByteStream::from(body))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| format!("Error putting object {} into {}: {:?}", key, self.bucket, e))
    }
}
