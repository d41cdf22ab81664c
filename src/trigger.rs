//! Defines a _trigger_, the input for a handler invocation. The
//! trigger is built from the records inside an S3 creation event.

use crate::error::HandlerError;
use aws_lambda_events::event::s3::S3Event;

/// A normalized reference to a stored object, extracted from one
/// event record. Pure lookup key; handlers never mutate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRef {
    pub bucket: String,
    pub key: String,
}

impl ObjectRef {
    /// Decodes every record of an S3 event into object references.
    /// Batched notifications are iterated explicitly rather than
    /// truncated to the first record. Fails with
    /// [`HandlerError::MalformedNotification`] when the event carries
    /// no records or a record lacks the bucket name or object key.
    pub fn decode_all(event: &S3Event) -> Result<Vec<Self>, HandlerError> {
        if event.records.is_empty() {
            return Err(HandlerError::MalformedNotification(String::from(
                "event contains no records",
            )));
        }
        event
            .records
            .iter()
            .map(|record| {
                let bucket = record.s3.bucket.name.clone().ok_or_else(|| {
                    HandlerError::MalformedNotification(String::from(
                        "record is missing the bucket name",
                    ))
                })?;
                // S3 delivers keys URL-encoded; prefer the decoded form.
                let key = record
                    .s3
                    .object
                    .url_decoded_key
                    .clone()
                    .or_else(|| record.s3.object.key.clone())
                    .ok_or_else(|| {
                        HandlerError::MalformedNotification(String::from(
                            "record is missing the object key",
                        ))
                    })?;
                Ok(ObjectRef { bucket, key })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A creation notification as S3 actually delivers it.
    fn creation_event(bucket: &str, key: &str) -> S3Event {
        serde_json::from_value(serde_json::json!({
            "Records": [
                {
                    "eventVersion": "2.1",
                    "eventSource": "aws:s3",
                    "awsRegion": "us-east-1",
                    "eventTime": "2024-05-01T02:40:55.849Z",
                    "eventName": "ObjectCreated:Put",
                    "userIdentity": {"principalId": "AWS:EXAMPLE"},
                    "requestParameters": {"sourceIPAddress": "127.0.0.1"},
                    "responseElements": {
                        "x-amz-request-id": "C3D13FE58DE4C810",
                        "x-amz-id-2": "FMyUVURIY8/IgAtTv8xRjskZQpcIZ9KG4V5Wp6S7S/JRWeUWerMUE5JgHvANOjpD"
                    },
                    "s3": {
                        "s3SchemaVersion": "1.0",
                        "configurationId": "testConfigRule",
                        "bucket": {
                            "name": bucket,
                            "ownerIdentity": {"principalId": "EXAMPLE"},
                            "arn": format!("arn:aws:s3:::{}", bucket)
                        },
                        "object": {
                            "key": key,
                            "size": 1024,
                            "eTag": "d41d8cd98f00b204e9800998ecf8427e",
                            "sequencer": "0055AED6DCD90281E5"
                        }
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn decodes_bucket_and_key() {
        let event = creation_event("photos", "cat.jpg");
        let refs = ObjectRef::decode_all(&event).unwrap();
        assert_eq!(
            refs,
            vec![ObjectRef {
                bucket: String::from("photos"),
                key: String::from("cat.jpg"),
            }]
        );
    }

    #[test]
    fn decodes_every_record_of_a_batch() {
        let mut event = creation_event("photos", "a.jpg");
        let mut second = creation_event("photos", "b.jpg");
        event.records.append(&mut second.records);
        let refs = ObjectRef::decode_all(&event).unwrap();
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].key, "b.jpg");
    }

    #[test]
    fn prefers_the_url_decoded_key() {
        let mut event = creation_event("photos", "my+cat.jpg");
        event.records[0].s3.object.url_decoded_key = Some(String::from("my cat.jpg"));
        let refs = ObjectRef::decode_all(&event).unwrap();
        assert_eq!(refs[0].key, "my cat.jpg");
    }

    #[test]
    fn rejects_an_empty_event() {
        let mut event = creation_event("photos", "cat.jpg");
        event.records.clear();
        assert!(matches!(
            ObjectRef::decode_all(&event),
            Err(HandlerError::MalformedNotification(_))
        ));
    }

    #[test]
    fn rejects_a_record_without_bucket() {
        let mut event = creation_event("photos", "cat.jpg");
        event.records[0].s3.bucket.name = None;
        assert!(matches!(
            ObjectRef::decode_all(&event),
            Err(HandlerError::MalformedNotification(_))
        ));
    }

    #[test]
    fn rejects_a_record_without_key() {
        let mut event = creation_event("photos", "cat.jpg");
        event.records[0].s3.object.key = None;
        assert!(matches!(
            ObjectRef::decode_all(&event),
            Err(HandlerError::MalformedNotification(_))
        ));
    }
}
