use strum_macros::Display;

/// Placeholder for log entries when the server sent nothing usable back.
pub(crate) const NO_RESPONSE_MSG: &str = "no response, check server status";

pub(crate) trait JSONBodyHTTPResponseType: HTTPResponseType {
    async fn parse_json_body(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>
    where Self::ParsedResponseType: for<'de> serde::Deserialize<'de> {
        Ok(response.json::<Self::ParsedResponseType>().await?)
    }
}

pub(crate) trait SerdeJSONBodyHTTPResponseType {}

impl<T> JSONBodyHTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
}

impl<T> HTTPResponseType for T
where
    T: SerdeJSONBodyHTTPResponseType,
    for<'de> T: serde::Deserialize<'de>,
{
    type ParsedResponseType = T;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let resp = Self::unwrap_return_code(response).await?;
        Self::parse_json_body(resp).await
    }
}

pub(crate) trait HTTPResponseType {
    type ParsedResponseType;
    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError>;

    async fn unwrap_return_code(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ResponseError> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            Err(ResponseError::BadStatus { status, body })
        }
    }
}

#[derive(Debug, Display)]
pub(crate) enum ResponseError {
    /// The server could not be reached at all.
    NoConnection,
    /// The client-side timeout elapsed before a response arrived.
    Timeout,
    /// The server answered with a non-success status.
    BadStatus { status: u16, body: String },
    /// The body could not be decoded into the expected shape.
    Malformed,
    Unknown,
}

impl std::error::Error for ResponseError {}

impl ResponseError {
    /// A short human-readable description for the activity log.
    pub(crate) fn message(&self) -> String {
        match self {
            Self::NoConnection => String::from(NO_RESPONSE_MSG),
            Self::Timeout => String::from("request timed out"),
            Self::BadStatus { body, .. } if body.is_empty() => String::from(NO_RESPONSE_MSG),
            Self::BadStatus { body, .. } => body.clone(),
            Self::Malformed => String::from("response body was not valid JSON"),
            Self::Unknown => String::from("request failed"),
        }
    }
}

impl From<reqwest::Error> for ResponseError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            ResponseError::Timeout
        } else if value.is_connect() {
            ResponseError::NoConnection
        } else if value.is_decode() {
            ResponseError::Malformed
        } else {
            ResponseError::Unknown
        }
    }
}
