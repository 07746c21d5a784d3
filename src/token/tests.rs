use super::base64url;
use super::{Credential, SignerMode, TokenSigner};
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

const TEST_PAYLOAD: &str = r#"{"sub":"restbench","admin":true}"#;
const TEST_SECRET: &str = "shared-bench-secret";

fn generated_key() -> RsaPrivateKey {
    let mut rng = rand::thread_rng();
    RsaPrivateKey::new(&mut rng, 2048).expect("rsa key generation")
}

#[test]
fn rs256_token_verifies_with_public_key() {
    let key = generated_key();
    let pem = key.to_pkcs8_pem(LineEnding::LF).expect("pem encode");

    let mut cred = Credential::new(SignerMode::Asymmetric);
    cred.set_key_material(&pem).expect("key material accepted");
    let token = cred.set_payload(TEST_PAYLOAD).expect("signing succeeds").to_string();

    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);

    let header = base64url::decode(parts[0]).expect("header decodes");
    let header: serde_json::Value = serde_json::from_slice(&header).expect("header is json");
    assert_eq!(header["alg"], "RS256");
    assert_eq!(header["typ"], "JWT");

    let payload = base64url::decode(parts[1]).expect("payload decodes");
    assert_eq!(payload, TEST_PAYLOAD.as_bytes());

    let signing_input = format!("{}.{}", parts[0], parts[1]);
    let digest = Sha256::digest(signing_input.as_bytes());
    let signature = base64url::decode(parts[2]).expect("signature decodes");
    RsaPublicKey::from(&key)
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
        .expect("signature verifies with the public key");
}

#[test]
fn hs256_signing_is_deterministic() {
    let mut first = Credential::new(SignerMode::Symmetric);
    first.set_key_material(TEST_SECRET).unwrap();
    let token_a = first.set_payload(TEST_PAYLOAD).unwrap().to_string();

    let mut second = Credential::new(SignerMode::Symmetric);
    second.set_key_material(TEST_SECRET).unwrap();
    let token_b = second.set_payload(TEST_PAYLOAD).unwrap().to_string();

    assert_eq!(token_a, token_b);
    assert_eq!(first.token(), Some(token_a.as_str()));
}

#[test]
fn hs256_header_advertises_algorithm() {
    let signer = TokenSigner::from_key_material(SignerMode::Symmetric, TEST_SECRET).unwrap();
    let token = signer.sign_compact(TEST_PAYLOAD).unwrap();
    let header = base64url::decode(token.split('.').next().unwrap()).unwrap();
    let header: serde_json::Value = serde_json::from_slice(&header).unwrap();
    assert_eq!(header["alg"], "HS256");
}

#[test]
fn base64url_round_trips_printable_ascii() {
    let payload: String = (0x20u8..=0x7e).map(char::from).collect();
    let encoded = base64url::encode(payload.as_bytes());
    assert!(!encoded.contains('='));
    assert!(!encoded.contains('+'));
    assert!(!encoded.contains('/'));
    assert_eq!(base64url::decode(&encoded).unwrap(), payload.as_bytes());
}

#[test]
fn bad_key_material_keeps_prior_token() {
    let mut cred = Credential::new(SignerMode::Symmetric);
    cred.set_key_material(TEST_SECRET).unwrap();
    let before = cred.set_payload(TEST_PAYLOAD).unwrap().to_string();

    // "shared-bench-secret" is not a PEM, so the mode switch must fail.
    cred.set_mode(SignerMode::Asymmetric).unwrap_err();
    assert_eq!(cred.token(), Some(before.as_str()));
}

#[test]
fn empty_secret_still_signs() {
    let mut cred = Credential::new(SignerMode::Symmetric);
    cred.set_key_material("").unwrap();
    let token = cred.set_payload(TEST_PAYLOAD).unwrap();
    assert_eq!(token.split('.').count(), 3);
}
