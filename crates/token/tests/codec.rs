use anyhow::Result;
use dar_token::{
    constants::{MAX_FIELD_LENGTH, PROTOCOL_VERSION, TOKEN_ID_LENGTH},
    Error, RecoveryToken, TokenId, TokenType, UtcDateTime,
};
use pretty_assertions::assert_eq;
use url::Url;

fn mock_token() -> Result<RecoveryToken> {
    Ok(RecoveryToken::builder(TokenType::Recovery)
        .issuer("https://issuer.example")
        .audience("https://recovery.example")
        .options(0b0000_0001)
        .data(b"ciphertext".to_vec())
        .binding_data(vec![1, 2, 3])
        .build()?)
}

#[test]
fn codec_round_trip() -> Result<()> {
    let token = mock_token()?;
    let bytes = token.to_bytes()?;
    let decoded = RecoveryToken::parse(&bytes)?;
    assert_eq!(token, decoded);
    assert_eq!(PROTOCOL_VERSION, decoded.version());
    assert_eq!(1, decoded.options());
    assert_eq!(b"ciphertext".as_slice(), decoded.data());
    assert_eq!(&[1u8, 2, 3], decoded.binding_data());
    Ok(())
}

#[test]
fn codec_length_consistency() -> Result<()> {
    let mut token = mock_token()?;
    assert_eq!(token.to_bytes()?.len(), token.num_bytes());

    token.set_data(vec![0xaa; 1024])?;
    assert_eq!(token.to_bytes()?.len(), token.num_bytes());

    let decoded = RecoveryToken::parse(&token.to_bytes()?)?;
    assert_eq!(token.num_bytes(), decoded.num_bytes());
    Ok(())
}

#[test]
fn codec_trailing_bytes_ignored() -> Result<()> {
    let token = mock_token()?;
    let mut bytes = token.to_bytes()?;
    bytes.extend_from_slice(&[0x30; 71]);
    let decoded = RecoveryToken::parse(&bytes)?;
    assert_eq!(token, decoded);
    Ok(())
}

#[test]
fn codec_truncated_prefixes() -> Result<()> {
    let token = mock_token()?;
    let bytes = token.to_bytes()?;
    for length in 0..bytes.len() {
        let result = RecoveryToken::parse(&bytes[..length]);
        assert!(
            matches!(result, Err(Error::MalformedToken(_))),
            "prefix of {} bytes should be malformed",
            length
        );
    }
    Ok(())
}

#[test]
fn codec_base64_input() -> Result<()> {
    let result = RecoveryToken::parse(b"AAFhYmNkZWZnaGlqa2xtbm9w");
    if let Err(Error::Base64Input) = result {
        Ok(())
    } else {
        panic!("expecting base64 input error");
    }
}

#[test]
fn codec_issued_time() -> Result<()> {
    let issued_at = UtcDateTime::parse_rfc3339("2024-02-29T23:59:59+02:00")?;
    let token = RecoveryToken::builder(TokenType::Countersigned)
        .issuer("https://recovery.example")
        .audience("https://issuer.example")
        .issued_at(issued_at)
        .build()?;
    assert_eq!("2024-02-29T21:59:59Z", token.issued_time());
    assert_eq!(issued_at, token.issued_at()?);
    Ok(())
}

#[test]
fn codec_token_id() -> Result<()> {
    let token = mock_token()?;
    assert_eq!(TOKEN_ID_LENGTH, token.token_id().as_ref().len());

    let hex = token.token_id().to_string();
    assert_eq!(TOKEN_ID_LENGTH * 2, hex.len());
    let parsed: TokenId = hex.parse()?;
    assert_eq!(token.token_id(), &parsed);
    Ok(())
}

#[test]
fn codec_state_url() -> Result<()> {
    let token = mock_token()?;
    let endpoint = Url::parse("https://recovery.example/recover?lang=en")?;
    let url = token.state_url(&endpoint);
    let expected = format!(
        "https://recovery.example/recover?lang=en&token_id={}",
        token.token_id()
    );
    assert_eq!(expected, url.as_str());
    Ok(())
}

#[test]
fn codec_maximum_field_lengths() -> Result<()> {
    let token = RecoveryToken::builder(TokenType::Recovery)
        .issuer("i".repeat(MAX_FIELD_LENGTH))
        .audience("https://recovery.example")
        .data(vec![0x5a; MAX_FIELD_LENGTH])
        .build()?;
    assert!(token.binding_data().is_empty());

    let bytes = token.to_bytes()?;
    assert_eq!(bytes.len(), token.num_bytes());
    assert_eq!(&[0xffu8, 0xff], &bytes[19..21]);

    let decoded = RecoveryToken::parse(&bytes)?;
    assert_eq!(token, decoded);
    assert_eq!(MAX_FIELD_LENGTH, decoded.issuer().len());
    assert_eq!(MAX_FIELD_LENGTH, decoded.data().len());
    Ok(())
}
