use super::super::http_response::vss_action::VssActionResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for signal metadata, `GET metadata/<path>`.
#[derive(Debug)]
pub(crate) struct MetadataGetRequest {
    pub(crate) signal: String,
}

impl NoBodyHTTPRequestType for MetadataGetRequest {}

impl HTTPRequestType for MetadataGetRequest {
    type Response = VssActionResponse;
    fn endpoint(&self) -> String { format!("metadata/{}", self.signal) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
