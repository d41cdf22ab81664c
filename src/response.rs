//! Defines the result returned to the invoking substrate. It is never
//! persisted; only the status code matters for the substrate's
//! retry and dead-letter decisions.

use serde::Serialize;

/// Per-invocation outcome. Serialized with the field names the
/// substrate expects (`statusCode`, `body`).
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

impl Response {
    /// A successful invocation with a human-readable summary.
    pub fn ok(body: String) -> Self {
        Self {
            status_code: 200,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_substrate_field_names() {
        let response = Response::ok(String::from("done"));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"statusCode": 200, "body": "done"})
        );
    }
}
