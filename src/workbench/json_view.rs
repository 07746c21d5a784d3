use strum_macros::Display;

#[derive(Debug, Display)]
pub(crate) enum RenderError {
    /// The body was not well-formed JSON.
    Malformed,
}

impl std::error::Error for RenderError {}

/// Formats a JSON response body for the viewer with two-space indentation.
/// The caller keeps the raw body, so a malformed payload loses nothing.
pub(crate) fn render(body: &str) -> Result<String, RenderError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|_| RenderError::Malformed)?;
    serde_json::to_string_pretty(&value).map_err(|_| RenderError::Malformed)
}
