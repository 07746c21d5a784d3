use super::super::http_response::vss_action::VssActionResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for the authorize endpoint. The compact token travels as a
/// query parameter, replacing the resource path entirely.
#[derive(Debug)]
pub(crate) struct AuthorizeRequest {
    pub(crate) token: String,
}

impl NoBodyHTTPRequestType for AuthorizeRequest {}

impl HTTPRequestType for AuthorizeRequest {
    type Response = VssActionResponse;
    fn endpoint(&self) -> String { format!("authorize?token={}", self.token) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Post }
}
