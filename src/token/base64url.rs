use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Encodes into the compact-token alphabet: no `=` padding, `-` and `_`
/// instead of `+` and `/`.
pub(crate) fn encode(data: &[u8]) -> String { URL_SAFE_NO_PAD.encode(data) }

pub(crate) fn decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(data)
}
