use super::super::http_response::raw_body::RawBodyResponse;
use super::request_common::{HTTPRequestMethod, HTTPRequestType, NoBodyHTTPRequestType};

/// Free-form request against an arbitrary resource path below the doc root,
/// with the method picked by the operator. The response stays raw so the
/// workbench can log and render any outcome.
#[derive(Debug)]
pub(crate) struct ResourceRequest {
    pub(crate) path: String,
    pub(crate) method: HTTPRequestMethod,
}

impl NoBodyHTTPRequestType for ResourceRequest {}

impl HTTPRequestType for ResourceRequest {
    type Response = RawBodyResponse;
    fn endpoint(&self) -> String { self.path.clone() }
    fn request_method(&self) -> HTTPRequestMethod { self.method }
}
