use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dar_token::{
    constants::{MAX_FIELD_LENGTH, PROTOCOL_VERSION, TOKEN_ID_LENGTH},
    envelope,
    issuer::{countersigned_token_issuer, recovery_token_issuer},
    signer::{BoxedSigner, Scheme},
    Error, RecoveryToken, TokenEnvelope, TokenType,
};
use pretty_assertions::assert_eq;

const ISSUER: &str = "https://issuer.example";
const AUDIENCE: &str = "https://recovery.example";

fn mock_token() -> Result<RecoveryToken> {
    Ok(RecoveryToken::build(ISSUER, AUDIENCE, TokenType::Recovery)?)
}

fn mock_envelope(scheme: Scheme) -> (BoxedSigner, TokenEnvelope) {
    let signer = scheme.random_signer();
    let envelope = TokenEnvelope::default()
        .with_signing_key(signer.clone())
        .with_unseal_key(signer.verifying_key());
    (signer, envelope)
}

#[test]
fn envelope_end_to_end() -> Result<()> {
    for scheme in [Scheme::Ecdsa, Scheme::Ed25519] {
        let (_, envelope) = mock_envelope(scheme);
        let token = mock_token()?;
        let sealed = envelope.seal(&token)?;

        let unsealed = envelope.unseal_base64(&sealed)?;
        assert_eq!(ISSUER, unsealed.issuer());
        assert_eq!(AUDIENCE, unsealed.audience());
        assert_eq!(TokenType::Recovery, unsealed.token_type());
        assert_eq!(TOKEN_ID_LENGTH, unsealed.token_id().as_ref().len());
        assert_eq!(token, unsealed);

        let (_, unrelated) = mock_envelope(scheme);
        let result = unrelated.unseal_base64(&sealed);
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }
    Ok(())
}

#[test]
fn envelope_seal_with_payload() -> Result<()> {
    let (_, envelope) = mock_envelope(Scheme::Ed25519);
    let mut token = mock_token()?;
    token.set_data(b"encrypted payload".to_vec())?;
    let sealed = envelope.seal(&token)?;
    let unsealed = envelope.unseal_base64(&sealed)?;
    assert_eq!(b"encrypted payload".as_slice(), unsealed.data());
    Ok(())
}

#[test]
fn envelope_sealed_is_standard_base64() -> Result<()> {
    let (signer, envelope) = mock_envelope(Scheme::Ecdsa);
    let token = mock_token()?;
    let sealed = envelope.seal(&token)?;
    let decoded = STANDARD.decode(&sealed)?;
    assert_eq!(token.to_bytes()?, decoded[..token.num_bytes()]);

    let unsealed =
        envelope::unseal(&decoded, &[signer.verifying_key()])?;
    assert_eq!(token, unsealed);
    Ok(())
}

#[test]
fn envelope_version_resigned() -> Result<()> {
    let (signer, envelope) = mock_envelope(Scheme::Ed25519);
    let token = mock_token()?;

    // Change the version and produce a valid signature for
    // the altered bytes.
    let mut bytes = token.to_bytes()?;
    bytes[0] = PROTOCOL_VERSION + 1;
    let signature = signer.sign(&bytes)?;
    bytes.extend_from_slice(&signature);

    let result = envelope.unseal(&bytes);
    if let Err(Error::VersionMismatch { expected, found }) = result {
        assert_eq!(PROTOCOL_VERSION, expected);
        assert_eq!(PROTOCOL_VERSION + 1, found);
        Ok(())
    } else {
        panic!("expecting version mismatch error");
    }
}

#[test]
fn envelope_version_tampered() -> Result<()> {
    let (_, envelope) = mock_envelope(Scheme::Ecdsa);
    let token = mock_token()?;
    let sealed = envelope.seal(&token)?;

    let mut bytes = STANDARD.decode(&sealed)?;
    bytes[0] = 0x7f;
    let result = envelope.unseal(&bytes);
    assert!(matches!(
        result,
        Err(Error::VersionMismatch {
            expected: PROTOCOL_VERSION,
            found: 0x7f,
        })
    ));
    Ok(())
}

#[test]
fn envelope_signature_bit_flips() -> Result<()> {
    let (_, envelope) = mock_envelope(Scheme::Ed25519);
    let token = mock_token()?;
    let sealed = envelope.seal(&token)?;
    let bytes = STANDARD.decode(&sealed)?;

    for index in token.num_bytes()..bytes.len() {
        for bit in 0..8 {
            let mut tampered = bytes.clone();
            tampered[index] ^= 1 << bit;
            let result = envelope.unseal(&tampered);
            assert!(
                matches!(result, Err(Error::InvalidSignature)),
                "flip of bit {} in byte {} should fail",
                bit,
                index
            );
        }
    }
    Ok(())
}

#[test]
fn envelope_token_bit_flips() -> Result<()> {
    let (_, envelope) = mock_envelope(Scheme::Ecdsa);
    let token = mock_token()?;
    let sealed = envelope.seal(&token)?;
    let bytes = STANDARD.decode(&sealed)?;

    for index in 0..token.num_bytes() {
        let mut tampered = bytes.clone();
        tampered[index] ^= 0x01;
        assert!(envelope.unseal(&tampered).is_err());
    }
    Ok(())
}

#[test]
fn envelope_truncated() -> Result<()> {
    let (_, envelope) = mock_envelope(Scheme::Ecdsa);
    let token = mock_token()?;
    let sealed = envelope.seal(&token)?;
    let bytes = STANDARD.decode(&sealed)?;

    for length in 0..token.num_bytes() {
        let result = envelope.unseal(&bytes[..length]);
        assert!(
            matches!(result, Err(Error::MalformedToken(_))),
            "prefix of {} bytes should be malformed",
            length
        );
    }

    // Token intact but the signature is cut short
    for length in token.num_bytes()..bytes.len() {
        let result = envelope.unseal(&bytes[..length]);
        assert!(matches!(result, Err(Error::InvalidSignature)));
    }
    Ok(())
}

#[test]
fn envelope_multiple_unseal_keys() -> Result<()> {
    let old = Scheme::Ecdsa.random_signer();
    let current = Scheme::Ed25519.random_signer();
    let token = mock_token()?;
    let sealed = envelope::seal(&token, current.as_ref())?;

    let envelope = TokenEnvelope::new(
        None,
        vec![old.verifying_key(), current.verifying_key()],
    );
    assert_eq!(token, envelope.unseal_base64(&sealed)?);

    let only_old = TokenEnvelope::new(None, vec![old.verifying_key()]);
    assert!(matches!(
        only_old.unseal_base64(&sealed),
        Err(Error::InvalidSignature)
    ));
    Ok(())
}

#[test]
fn envelope_no_signing_key() -> Result<()> {
    let signer = Scheme::Ed25519.random_signer();
    let envelope = TokenEnvelope::new(None, vec![signer.verifying_key()]);
    let result = envelope.seal(&mock_token()?);
    if let Err(Error::NoSigningKey) = result {
        Ok(())
    } else {
        panic!("expecting no signing key error");
    }
}

#[test]
fn envelope_countersigned_type_mismatch() -> Result<()> {
    let (_, envelope) = mock_envelope(Scheme::Ed25519);
    let recovery = mock_token()?;
    let sealed = envelope.seal(&recovery)?;
    let bytes = STANDARD.decode(&sealed)?;

    assert_eq!(ISSUER, recovery_token_issuer(&bytes)?);
    let result = countersigned_token_issuer(&bytes);
    assert!(matches!(
        result,
        Err(Error::TokenTypeMismatch {
            expected: TokenType::Countersigned,
            found: TokenType::Recovery,
        })
    ));
    Ok(())
}

#[test]
fn envelope_base64_hint() -> Result<()> {
    let (_, envelope) = mock_envelope(Scheme::Ecdsa);
    let sealed = envelope.seal(&mock_token()?)?;
    let result = envelope.unseal(sealed.as_bytes());
    assert!(matches!(result, Err(Error::Base64Input)));
    Ok(())
}

#[test]
fn envelope_maximum_field_lengths() -> Result<()> {
    for scheme in [Scheme::Ecdsa, Scheme::Ed25519] {
        let (_, envelope) = mock_envelope(scheme);
        let token = RecoveryToken::builder(TokenType::Recovery)
            .issuer("i".repeat(MAX_FIELD_LENGTH))
            .audience(AUDIENCE)
            .data(vec![0x5a; MAX_FIELD_LENGTH])
            .build()?;
        let sealed = envelope.seal(&token)?;
        let unsealed = envelope.unseal_base64(&sealed)?;
        assert_eq!(token, unsealed);
        assert_eq!(token.num_bytes(), unsealed.num_bytes());
    }
    Ok(())
}
