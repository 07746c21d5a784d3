use hmac::{Hmac, Mac};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::{Pkcs1v15Sign, RsaPrivateKey};
use sha2::{Digest, Sha256};
use strum_macros::{Display, EnumString};

use super::base64url;

type HmacSha256 = Hmac<Sha256>;

/// Selects which signing algorithm a [`Credential`](super::Credential) uses.
/// Asymmetric expects an RSA private key PEM as key material, symmetric a
/// shared secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(ascii_case_insensitive)]
pub(crate) enum SignerMode {
    #[strum(serialize = "RS256")]
    Asymmetric,
    #[strum(serialize = "HS256")]
    Symmetric,
}

/// A ready-to-sign key parsed from operator-supplied key material.
pub(crate) enum TokenSigner {
    Asymmetric(Box<RsaPrivateKey>),
    Symmetric(Vec<u8>),
}

#[derive(Debug, Display)]
pub(crate) enum SignError {
    /// Key material is neither a PKCS#8 nor a PKCS#1 RSA private key PEM.
    BadPrivateKey,
    /// The RSA signing operation itself failed.
    Signature,
    /// The shared secret was rejected by the MAC implementation.
    BadSecret,
}

impl std::error::Error for SignError {}

impl TokenSigner {
    /// Parses operator key material for the given mode. Symmetric secrets are
    /// taken verbatim, including the empty secret.
    pub(crate) fn from_key_material(mode: SignerMode, key_material: &str) -> Result<Self, SignError> {
        match mode {
            SignerMode::Asymmetric => {
                let key = RsaPrivateKey::from_pkcs8_pem(key_material)
                    .or_else(|_| RsaPrivateKey::from_pkcs1_pem(key_material))
                    .map_err(|_| SignError::BadPrivateKey)?;
                Ok(Self::Asymmetric(Box::new(key)))
            }
            SignerMode::Symmetric => Ok(Self::Symmetric(key_material.as_bytes().to_vec())),
        }
    }

    /// The `alg` value advertised in the token header.
    pub(crate) fn alg(&self) -> &'static str {
        match self {
            Self::Asymmetric(_) => "RS256",
            Self::Symmetric(_) => "HS256",
        }
    }

    /// Produces the compact serialization
    /// `base64url(header).base64url(payload).base64url(signature)`.
    pub(crate) fn sign_compact(&self, payload: &str) -> Result<String, SignError> {
        let header = serde_json::json!({"alg": self.alg(), "typ": "JWT"});
        let signing_input = format!(
            "{}.{}",
            base64url::encode(header.to_string().as_bytes()),
            base64url::encode(payload.as_bytes())
        );
        let signature = self.sign(signing_input.as_bytes())?;
        Ok(format!("{signing_input}.{}", base64url::encode(&signature)))
    }

    fn sign(&self, signing_input: &[u8]) -> Result<Vec<u8>, SignError> {
        match self {
            Self::Asymmetric(key) => {
                let digest = Sha256::digest(signing_input);
                key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest).map_err(|_| SignError::Signature)
            }
            Self::Symmetric(secret) => {
                let mut mac =
                    HmacSha256::new_from_slice(secret).map_err(|_| SignError::BadSecret)?;
                mac.update(signing_input);
                Ok(mac.finalize().into_bytes().to_vec())
            }
        }
    }
}
