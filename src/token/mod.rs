pub(crate) mod base64url;
mod credential;
mod signer;
#[cfg(test)]
mod tests;

pub(crate) use credential::Credential;
pub(crate) use signer::{SignError, SignerMode, TokenSigner};
