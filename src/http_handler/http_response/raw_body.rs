use super::response_common::{HTTPResponseType, ResponseError};

/// Status plus unparsed body of a completed request, regardless of outcome.
///
/// The free-form workbench dispatch wants every terminal state in hand: a
/// non-200 here is data for the activity log, not an error.
#[derive(Debug)]
pub(crate) struct RawExchange {
    status: u16,
    body: String,
}

impl RawExchange {
    pub(crate) fn status(&self) -> u16 { self.status }
    pub(crate) fn body(&self) -> &str { self.body.as_str() }
    pub(crate) fn is_success(&self) -> bool { self.status == 200 }
}

pub(crate) struct RawBodyResponse;

impl HTTPResponseType for RawBodyResponse {
    type ParsedResponseType = RawExchange;

    async fn read_response(
        response: reqwest::Response,
    ) -> Result<Self::ParsedResponseType, ResponseError> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(RawExchange { status, body })
    }
}
