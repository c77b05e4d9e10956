use std::collections::HashMap;

use serde::{Deserialize, Serialize};

// inbound body of the generate endpoint; prompt is optional here so a
// missing field is reported as INVALID_PROMPT rather than a parse failure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerationRequest {
    pub prompt: Option<String>,
    pub language: Option<String>,
    pub framework: Option<String>,
    pub context: Option<String>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub id: String,
    pub code: String,
    pub language: String,
    pub explanation: String,
    pub suggestions: Vec<String>,
    pub timestamp: i64
}

/// Body forwarded to the upstream code generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamPayload {
    pub prompt: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framework: Option<String>,
    pub context: String
}

// every field is optional from our side, anything else the upstream
// sends (files, requestId...) is ignored
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UpstreamReply {
    pub id: Option<String>,
    pub code: Option<String>,
    pub language: Option<String>,
    pub explanation: Option<String>,
    pub timestamp: Option<i64>
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImproveRequest {
    pub code: String,
    pub instructions: String,
    pub language: Option<String>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainRequest {
    pub code: String,
    pub language: Option<String>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestsRequest {
    pub code: String,
    pub language: Option<String>,
    pub framework: Option<String>
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefactorRequest {
    pub code: String,
    pub refactor_type: String,
    pub language: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct TemplateRequest {
    pub template: String,
    #[serde(default)]
    pub variables: HashMap<String, String>
}

#[cfg(test)]
mod tests {

    use super::*;
    use serde_json::json;

    #[test]
    fn test_framework_omitted_when_absent() {

        let payload = UpstreamPayload {
            prompt: "sort a list".to_string(),
            language: "typescript".to_string(),
            framework: None,
            context: "playground".to_string()
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value, json!({
            "prompt": "sort a list",
            "language": "typescript",
            "context": "playground"
        }));

    }

    #[test]
    fn test_upstream_reply_ignores_unknown_fields() {

        let reply: UpstreamReply = serde_json::from_value(json!({
            "id": "req_1",
            "code": "fn main() {}",
            "files": [{"path": "main.rs", "content": "fn main() {}"}],
            "timestamp": 1700000000000i64
        })).unwrap();

        assert_eq!(reply.id.as_deref(), Some("req_1"));
        assert_eq!(reply.explanation, None);
        assert_eq!(reply.timestamp, Some(1_700_000_000_000));

    }

    #[test]
    fn test_refactor_request_uses_camel_case() {

        let request: RefactorRequest = serde_json::from_value(json!({
            "code": "let x = 1",
            "refactorType": "use const"
        })).unwrap();

        assert_eq!(request.refactor_type, "use const");
        assert!(request.language.is_none());

    }

}
