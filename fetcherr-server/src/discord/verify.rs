//! Ed25519 verification of inbound interaction requests.

use ed25519_dalek::{PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, Signature, Verifier, VerifyingKey};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

#[derive(Debug, Error)]
pub enum SignatureError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),
    #[error("{0} is not valid hex")]
    InvalidEncoding(&'static str),
    #[error("expected {expected} bytes for {what}, got {actual}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("public key is not a valid ed25519 point")]
    InvalidKey,
    #[error("signature does not match request")]
    Mismatch,
}

/// Checks that requests were signed by the application's key.
#[derive(Debug, Clone)]
pub struct SignatureVerifier {
    key: VerifyingKey,
}

impl SignatureVerifier {
    pub fn from_hex(public_key: &str) -> Result<Self, SignatureError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            decode_fixed(public_key.trim(), "public key")?;
        let key = VerifyingKey::from_bytes(&bytes)
            .map_err(|_| SignatureError::InvalidKey)?;
        Ok(Self { key })
    }

    pub fn from_key(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// The signed message is the timestamp header followed by the raw body.
    pub fn verify(
        &self,
        signature_hex: &str,
        timestamp: &str,
        body: &[u8],
    ) -> Result<(), SignatureError> {
        let bytes: [u8; SIGNATURE_LENGTH] =
            decode_fixed(signature_hex, "signature")?;
        let signature = Signature::from_bytes(&bytes);

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key
            .verify(&message, &signature)
            .map_err(|_| SignatureError::Mismatch)
    }
}

fn decode_fixed<const N: usize>(
    raw: &str,
    what: &'static str,
) -> Result<[u8; N], SignatureError> {
    let bytes =
        hex::decode(raw).map_err(|_| SignatureError::InvalidEncoding(what))?;
    let actual = bytes.len();
    bytes
        .try_into()
        .map_err(|_| SignatureError::InvalidLength {
            what,
            expected: N,
            actual,
        })
}
