use super::http_request::request_common::RequestError;
use super::http_response::response_common::ResponseError;
use strum_macros::Display;

#[derive(Debug, Display)]
pub(crate) enum HTTPError {
    HTTPRequestError(RequestError),
    HTTPResponseError(ResponseError),
}

impl std::error::Error for HTTPError {}

impl HTTPError {
    /// The HTTP status carried by this error, if the server answered at all.
    pub(crate) fn status(&self) -> Option<u16> {
        match self {
            Self::HTTPResponseError(ResponseError::BadStatus { status, .. }) => Some(*status),
            _ => None,
        }
    }

    /// A short human-readable description for the activity log.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::HTTPRequestError(RequestError::InvalidUrl) => {
                String::from("could not build a valid request URL")
            }
            Self::HTTPResponseError(err) => err.message(),
        }
    }
}
