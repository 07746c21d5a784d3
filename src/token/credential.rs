use super::signer::{SignError, SignerMode, TokenSigner};

/// Operator credentials plus the token signed from them.
///
/// Every mutation re-signs synchronously before returning, so the readable
/// token always matches the fields it was produced from. A failed re-sign
/// keeps the previous token untouched.
pub(crate) struct Credential {
    token_payload: String,
    key_material: String,
    mode: SignerMode,
    token: Option<String>,
}

impl Credential {
    pub(crate) fn new(mode: SignerMode) -> Self {
        Self {
            token_payload: String::new(),
            key_material: String::new(),
            mode,
            token: None,
        }
    }

    pub(crate) fn mode(&self) -> SignerMode { self.mode }

    /// The current compact token, if any credential change has signed one.
    pub(crate) fn token(&self) -> Option<&str> { self.token.as_deref() }

    pub(crate) fn set_payload(&mut self, payload: &str) -> Result<&str, SignError> {
        self.token_payload = payload.to_string();
        self.resign()
    }

    pub(crate) fn set_key_material(&mut self, key_material: &str) -> Result<&str, SignError> {
        self.key_material = key_material.to_string();
        self.resign()
    }

    pub(crate) fn set_mode(&mut self, mode: SignerMode) -> Result<&str, SignError> {
        self.mode = mode;
        self.resign()
    }

    fn resign(&mut self) -> Result<&str, SignError> {
        let signer = TokenSigner::from_key_material(self.mode, &self.key_material)?;
        let token = signer.sign_compact(&self.token_payload)?;
        Ok(self.token.insert(token).as_str())
    }
}
