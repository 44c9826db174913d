//! Signing envelope for recovery tokens.
//!
//! A sealed token is the encoded token immediately followed by
//! a signature over those bytes, base64 encoded for transport.
//! There is no separator; the split relies on the token knowing
//! its own encoded length.
use crate::{constants::PROTOCOL_VERSION, Error, RecoveryToken, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dar_signer::{BoxedSigner, BoxedVerifier, Signer};

/// Signing key and trusted unseal keys for a party.
#[derive(Clone, Default)]
pub struct TokenEnvelope {
    signing_key: Option<BoxedSigner>,
    unseal_keys: Vec<BoxedVerifier>,
}

impl TokenEnvelope {
    /// Create an envelope.
    ///
    /// Unseal keys are tried in order so the newest key
    /// should come first.
    pub fn new(
        signing_key: Option<BoxedSigner>,
        unseal_keys: Vec<BoxedVerifier>,
    ) -> Self {
        Self {
            signing_key,
            unseal_keys,
        }
    }

    /// Set the signing key.
    pub fn with_signing_key(mut self, signing_key: BoxedSigner) -> Self {
        self.signing_key = Some(signing_key);
        self
    }

    /// Append an unseal key.
    pub fn with_unseal_key(mut self, unseal_key: BoxedVerifier) -> Self {
        self.unseal_keys.push(unseal_key);
        self
    }

    /// Signing key, if configured.
    pub fn signing_key(&self) -> Option<&BoxedSigner> {
        self.signing_key.as_ref()
    }

    /// Ordered unseal keys.
    pub fn unseal_keys(&self) -> &[BoxedVerifier] {
        &self.unseal_keys
    }

    /// Sign and base64 encode a token.
    pub fn seal(&self, token: &RecoveryToken) -> Result<String> {
        let signer = self.signing_key.as_ref().ok_or(Error::NoSigningKey)?;
        seal(token, signer.as_ref())
    }

    /// Verify a decoded sealed token with the unseal keys.
    pub fn unseal(&self, token_and_signature: &[u8]) -> Result<RecoveryToken> {
        unseal(token_and_signature, &self.unseal_keys)
    }

    /// Decode and verify a base64 sealed token with the unseal keys.
    pub fn unseal_base64(&self, sealed: &str) -> Result<RecoveryToken> {
        unseal_base64(sealed, &self.unseal_keys)
    }
}

/// Encode a token and append a signature over the encoded bytes.
pub fn sign(
    token: &RecoveryToken,
    signer: &dyn Signer,
) -> Result<Vec<u8>> {
    let mut buffer = token.to_bytes()?;
    let signature = signer.sign(&buffer)?;
    buffer.extend_from_slice(&signature);
    Ok(buffer)
}

/// Sign a token and base64 encode the token and signature.
pub fn seal(token: &RecoveryToken, signer: &dyn Signer) -> Result<String> {
    let buffer = sign(token, signer)?;
    tracing::debug!(
        token_id = %token.token_id(),
        token_type = %token.token_type(),
        issuer = %token.issuer(),
        "envelope::seal",
    );
    Ok(STANDARD.encode(buffer))
}

/// Parse a sealed token and verify the signature.
///
/// The version is checked before any signature verification.
/// Keys are tried in order and the token is returned for the
/// first key that verifies; failure does not reveal which
/// keys were tried.
pub fn unseal(
    token_and_signature: &[u8],
    unseal_keys: &[BoxedVerifier],
) -> Result<RecoveryToken> {
    let token = RecoveryToken::parse(token_and_signature)?;
    if token.version() != PROTOCOL_VERSION {
        return Err(Error::VersionMismatch {
            expected: PROTOCOL_VERSION,
            found: token.version(),
        });
    }

    let (token_bytes, signature) =
        token_and_signature.split_at(token.num_bytes());

    if unseal_keys
        .iter()
        .any(|key| key.verify(token_bytes, signature))
    {
        tracing::debug!(
            token_id = %token.token_id(),
            token_type = %token.token_type(),
            issuer = %token.issuer(),
            "envelope::unseal",
        );
        return Ok(token);
    }

    tracing::warn!(
        token_id = %token.token_id(),
        issuer = %token.issuer(),
        "envelope::unseal invalid signature",
    );
    Err(Error::InvalidSignature)
}

/// Decode a base64 sealed token then [unseal] it.
pub fn unseal_base64(
    sealed: &str,
    unseal_keys: &[BoxedVerifier],
) -> Result<RecoveryToken> {
    let buffer = STANDARD.decode(sealed)?;
    unseal(&buffer, unseal_keys)
}
