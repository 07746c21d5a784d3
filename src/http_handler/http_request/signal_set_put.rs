use super::super::http_response::vss_action::VssActionResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Request type for writing a signal value, `PUT signals/<path>?value=<v>`.
/// An empty value is legal and clears nothing server-side; the server echoes
/// it back in the `set` acknowledgement.
#[derive(Debug)]
pub(crate) struct SignalSetRequest {
    pub(crate) signal: String,
    pub(crate) value: String,
}

impl NoBodyHTTPRequestType for SignalSetRequest {}

impl HTTPRequestType for SignalSetRequest {
    type Response = VssActionResponse;
    fn endpoint(&self) -> String { format!("signals/{}?value={}", self.signal, self.value) }
    fn request_method(&self) -> HTTPRequestMethod { HTTPRequestMethod::Put }
}
