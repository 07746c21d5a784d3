use super::super::http_response::vss_action::VssActionResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for reading a signal value, `GET signals/<path>`.
/// Dotted and slashed signal paths are both accepted by the server.
#[derive(Debug)]
pub(crate) struct SignalGetRequest {
    pub(crate) signal: String,
}

impl NoBodyHTTPRequestType for SignalGetRequest {}

impl HTTPRequestType for SignalGetRequest {
    type Response = VssActionResponse;
    fn endpoint(&self) -> String { format!("signals/{}", self.signal) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Get }
}
