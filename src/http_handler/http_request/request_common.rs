use super::super::common::HTTPError;
use super::super::http_client::HTTPClient;
use super::super::http_response::response_common::{HTTPResponseType, ResponseError};
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub(crate) enum HTTPRequestMethod {
    Get,
    Post,
    Put,
    /// The VISS custom verb; carried on the wire as the literal method `SET`.
    Set,
}

impl From<HTTPRequestMethod> for reqwest::Method {
    fn from(value: HTTPRequestMethod) -> Self {
        match value {
            HTTPRequestMethod::Get => reqwest::Method::GET,
            HTTPRequestMethod::Post => reqwest::Method::POST,
            HTTPRequestMethod::Put => reqwest::Method::PUT,
            HTTPRequestMethod::Set => reqwest::Method::from_bytes(b"SET").unwrap(),
        }
    }
}

#[derive(Debug, Display)]
pub(crate) enum RequestError {
    /// The configured server fields did not assemble into a usable URL.
    InvalidUrl,
}

impl std::error::Error for RequestError {}

pub(crate) trait HTTPRequestType {
    type Response: HTTPResponseType;
    fn endpoint(&self) -> String;
    fn request_method(&self) -> HTTPRequestMethod;
}

/// All workbench requests carry an empty body; parameters travel in the path
/// or the query string.
pub(crate) trait NoBodyHTTPRequestType: HTTPRequestType {
    async fn send_request(
        &self,
        client: &HTTPClient,
    ) -> Result<<Self::Response as HTTPResponseType>::ParsedResponseType, HTTPError> {
        let url = client.url_for(&self.endpoint());
        let response = client
            .client()
            .request(self.request_method().into(), url)
            .send()
            .await
            .map_err(|err| {
                if err.is_builder() {
                    HTTPError::HTTPRequestError(RequestError::InvalidUrl)
                } else {
                    HTTPError::HTTPResponseError(ResponseError::from(err))
                }
            })?;
        <Self::Response as HTTPResponseType>::read_response(response)
            .await
            .map_err(HTTPError::HTTPResponseError)
    }
}
