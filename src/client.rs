//! Defines the AWS-backed implementations of the capability traits.

use crate::capability::{DetectedLabel, LabelDetector, MetadataStore, ObjectStore};
use crate::error::HandlerError;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_rekognition::types::{Image, S3Object};
use aws_sdk_s3::primitives::ByteStream;
use std::env;

/// Load the shared SDK configuration, honoring an explicit
/// `AWS_ENDPOINT_URL` override (used with localstack-style stand-ins).
pub async fn sdk_config() -> SdkConfig {
    let endpoint_url_var = env::var("AWS_ENDPOINT_URL");
    if let Ok(endpoint_url) = endpoint_url_var {
        aws_config::from_env()
            .endpoint_url(
                if endpoint_url.starts_with("http://") || endpoint_url.starts_with("https://") {
                    endpoint_url
                } else {
                    format!("https://{}", endpoint_url)
                },
            )
            .region("us-east-1") // should be OK since the endpoint was overridden
            .load()
            .await
    } else {
        aws_config::from_env().load().await
    }
}

/// Object storage backed by S3.
pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

impl ObjectStore for S3ObjectStore {
    async fn fetch(&self, bucket: &str, key: &str) -> Result<Vec<u8>, HandlerError> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    HandlerError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    HandlerError::CapabilityError(format!(
                        "failed to fetch object {:?} from bucket {:?}: {}",
                        key, bucket, service_error
                    ))
                }
            })?;
        let bytes = response.body.collect().await.map_err(|e| {
            HandlerError::CapabilityError(format!(
                "failed to read the body of object {:?} from bucket {:?}: {}",
                key, bucket, e
            ))
        })?;
        Ok(bytes.into_bytes().to_vec())
    }

    async fn store(
        &self,
        bucket: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), HandlerError> {
        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                HandlerError::PersistenceError(format!(
                    "failed to store object {:?} in bucket {:?}: {}",
                    key,
                    bucket,
                    e.into_service_error()
                ))
            })?;
        Ok(())
    }
}

/// Label detection backed by Rekognition. The image is passed by
/// reference; Rekognition reads it from S3 itself.
pub struct RekognitionDetector {
    client: aws_sdk_rekognition::Client,
}

impl RekognitionDetector {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_rekognition::Client::new(config),
        }
    }
}

impl LabelDetector for RekognitionDetector {
    async fn detect_labels(
        &self,
        bucket: &str,
        key: &str,
        max_labels: i32,
    ) -> Result<Vec<DetectedLabel>, HandlerError> {
        let response = self
            .client
            .detect_labels()
            .image(
                Image::builder()
                    .s3_object(S3Object::builder().bucket(bucket).name(key).build())
                    .build(),
            )
            .max_labels(max_labels)
            .send()
            .await
            .map_err(|e| {
                HandlerError::CapabilityError(format!(
                    "label detection failed for object {:?} in bucket {:?}: {}",
                    key,
                    bucket,
                    e.into_service_error()
                ))
            })?;
        Ok(response
            .labels()
            .unwrap_or_default()
            .iter()
            .filter_map(|label| {
                label.name().map(|name| DetectedLabel {
                    name: name.to_string(),
                    confidence: label.confidence().unwrap_or_default(),
                })
            })
            .collect())
    }
}

/// Metadata records backed by a DynamoDB table.
pub struct DynamoMetadataStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoMetadataStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_dynamodb::Client::new(config),
        }
    }
}

impl MetadataStore for DynamoMetadataStore {
    async fn put_labels(
        &self,
        table: &str,
        key: &str,
        labels: &[String],
    ) -> Result<(), HandlerError> {
        let mut request = self
            .client
            .put_item()
            .table_name(table)
            .item("ImageKey", AttributeValue::S(key.to_string()));
        // DynamoDB rejects empty string sets; a zero-label detection
        // still replaces the record, just without a Labels attribute.
        if !labels.is_empty() {
            request = request.item("Labels", AttributeValue::Ss(labels.to_vec()));
        }
        request.send().await.map_err(|e| {
            HandlerError::PersistenceError(format!(
                "failed to store the label record for {:?} in table {:?}: {}",
                key,
                table,
                e.into_service_error()
            ))
        })?;
        Ok(())
    }
}
