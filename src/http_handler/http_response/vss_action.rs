use crate::http_handler::http_response::response_common::SerdeJSONBodyHTTPResponseType;

/// The VSS server's JSON envelope, shared by the signal, metadata and
/// authorize endpoints: `{action, requestId, path?, value?, tokens?,
/// timestamp?, error?}`. `requestId` and `value` arrive as strings or
/// numbers depending on server version, so both stay loosely typed.
#[derive(serde::Deserialize, Debug)]
pub(crate) struct VssActionResponse {
    action: String,
    #[serde(rename = "requestId")]
    request_id: Option<serde_json::Value>,
    path: Option<String>,
    value: Option<serde_json::Value>,
    tokens: Option<serde_json::Value>,
    timestamp: Option<serde_json::Value>,
    error: Option<serde_json::Value>,
}

impl SerdeJSONBodyHTTPResponseType for VssActionResponse {}

impl VssActionResponse {
    pub(crate) fn action(&self) -> &str { self.action.as_str() }
    pub(crate) fn request_id(&self) -> Option<&serde_json::Value> { self.request_id.as_ref() }
    pub(crate) fn path(&self) -> Option<&str> { self.path.as_deref() }
    pub(crate) fn value(&self) -> Option<&serde_json::Value> { self.value.as_ref() }
    pub(crate) fn tokens(&self) -> Option<&serde_json::Value> { self.tokens.as_ref() }
    pub(crate) fn timestamp(&self) -> Option<&serde_json::Value> { self.timestamp.as_ref() }
    pub(crate) fn error(&self) -> Option<&serde_json::Value> { self.error.as_ref() }

    /// One-line summary for the activity log.
    pub(crate) fn summary(&self) -> String {
        let mut line = format!("action {}", self.action);
        if let Some(path) = &self.path {
            line.push_str(&format!(" {path}"));
        }
        if let Some(value) = &self.value {
            line.push_str(&format!(" = {value}"));
        }
        if let Some(err) = &self.error {
            line.push_str(&format!(" ({err})"));
        }
        line
    }
}
