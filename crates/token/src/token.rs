//! Recovery token type, builder and parser.
use crate::{
    cipher::PayloadCipher,
    constants::{
        MAX_FIELD_LENGTH, PROTOCOL_VERSION, TOKEN_ID_LENGTH, TOKEN_ID_PARAM,
    },
    encoding::{self, v1::token::wire_length},
    Error, Result, TokenId, UtcDateTime,
};
use std::fmt;
use url::Url;

/// Kind of recovery token.
///
/// The type determines whether the issuer and audience
/// refer to an account provider or a recovery provider.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum TokenType {
    /// Token issued by an account provider and redeemed
    /// at a recovery provider.
    Recovery = 0,
    /// Token issued by a recovery provider back to the
    /// account provider.
    Countersigned = 1,
}

impl TryFrom<u8> for TokenType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Recovery),
            1 => Ok(Self::Countersigned),
            _ => Err(Error::UnknownTokenType(value)),
        }
    }
}

impl From<TokenType> for u8 {
    fn from(value: TokenType) -> Self {
        value as u8
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recovery => write!(f, "recovery"),
            Self::Countersigned => write!(f, "countersigned"),
        }
    }
}

/// Delegated account recovery token.
///
/// A value of this type is either produced by [TokenBuilder]
/// or validated by [RecoveryToken::parse]; fields are only
/// exposed through accessors so the version and identity of
/// a token cannot change after construction.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RecoveryToken {
    pub(crate) version: u8,
    pub(crate) token_type: TokenType,
    pub(crate) token_id: TokenId,
    pub(crate) options: u8,
    pub(crate) issuer: String,
    pub(crate) audience: String,
    pub(crate) issued_time: String,
    pub(crate) data: Vec<u8>,
    pub(crate) binding_data: Vec<u8>,
}

impl RecoveryToken {
    /// Build a new token with a random identifier issued now.
    pub fn build(
        issuer: impl Into<String>,
        audience: impl Into<String>,
        token_type: TokenType,
    ) -> Result<Self> {
        Self::builder(token_type)
            .issuer(issuer)
            .audience(audience)
            .build()
    }

    /// Builder for a token.
    pub fn builder(token_type: TokenType) -> TokenBuilder {
        TokenBuilder::new(token_type)
    }

    /// Parse a token from the start of a buffer.
    ///
    /// Bytes after the token are ignored so a sealed token
    /// (token followed by a signature) can be parsed; use
    /// [RecoveryToken::num_bytes] to find where the token ends.
    pub fn parse(buffer: &[u8]) -> Result<Self> {
        encoding::v1::token::decode_token(buffer).map_err(|e| {
            if looks_base64(buffer) {
                Error::Base64Input
            } else {
                Error::MalformedToken(e.to_string())
            }
        })
    }

    /// Encode this token to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        encoding::encode(self)
    }

    /// Number of bytes in the encoding of this token.
    pub fn num_bytes(&self) -> usize {
        wire_length(self)
    }

    /// Protocol version.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// Token type.
    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    /// Token identifier.
    pub fn token_id(&self) -> &TokenId {
        &self.token_id
    }

    /// Options bit flags.
    pub fn options(&self) -> u8 {
        self.options
    }

    /// Origin of the party that issued the token.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Origin of the party the token is intended for.
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Issued time as it appears in the token.
    pub fn issued_time(&self) -> &str {
        &self.issued_time
    }

    /// Parse the issued time.
    pub fn issued_at(&self) -> Result<UtcDateTime> {
        UtcDateTime::parse_rfc3339(&self.issued_time)
    }

    /// Opaque payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Set the opaque payload.
    pub fn set_data(&mut self, data: Vec<u8>) -> Result<()> {
        check_length("data", data.len())?;
        self.data = data;
        Ok(())
    }

    /// Opaque binding data.
    pub fn binding_data(&self) -> &[u8] {
        &self.binding_data
    }

    /// Set the opaque binding data.
    pub fn set_binding_data(&mut self, binding_data: Vec<u8>) -> Result<()> {
        check_length("binding_data", binding_data.len())?;
        self.binding_data = binding_data;
        Ok(())
    }

    /// Decrypt the payload with a cipher.
    pub fn decrypt_data(&self, cipher: &dyn PayloadCipher) -> Result<Vec<u8>> {
        cipher.decrypt(&self.data)
    }

    /// URL for a recovery provider endpoint with the token
    /// identifier in the query string.
    pub fn state_url(&self, recover_account: &Url) -> Url {
        let mut url = recover_account.clone();
        url.query_pairs_mut()
            .append_pair(TOKEN_ID_PARAM, &self.token_id.to_hex());
        url
    }

    /// Placeholder used as the target when decoding.
    pub(crate) fn empty() -> Self {
        Self {
            version: PROTOCOL_VERSION,
            token_type: TokenType::Recovery,
            token_id: TokenId::from([0; TOKEN_ID_LENGTH]),
            options: 0,
            issuer: String::new(),
            audience: String::new(),
            issued_time: String::new(),
            data: Vec::new(),
            binding_data: Vec::new(),
        }
    }
}

/// Builds recovery tokens.
#[derive(Debug, Clone)]
pub struct TokenBuilder {
    token_type: TokenType,
    issuer: String,
    audience: String,
    options: u8,
    issued_at: Option<UtcDateTime>,
    data: Vec<u8>,
    binding_data: Vec<u8>,
}

impl TokenBuilder {
    /// Create a builder for a token type.
    pub fn new(token_type: TokenType) -> Self {
        Self {
            token_type,
            issuer: String::new(),
            audience: String::new(),
            options: 0,
            issued_at: None,
            data: Vec::new(),
            binding_data: Vec::new(),
        }
    }

    /// Set the issuer origin.
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }

    /// Set the audience origin.
    pub fn audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// Set the options bit flags.
    pub fn options(mut self, options: u8) -> Self {
        self.options = options;
        self
    }

    /// Use an explicit issued time instead of now.
    pub fn issued_at(mut self, issued_at: UtcDateTime) -> Self {
        self.issued_at = Some(issued_at);
        self
    }

    /// Set the opaque payload.
    pub fn data(mut self, data: Vec<u8>) -> Self {
        self.data = data;
        self
    }

    /// Set the opaque binding data.
    pub fn binding_data(mut self, binding_data: Vec<u8>) -> Self {
        self.binding_data = binding_data;
        self
    }

    /// Build the token with a fresh random identifier.
    pub fn build(self) -> Result<RecoveryToken> {
        let issued_at = match self.issued_at {
            Some(issued_at) => issued_at,
            None => UtcDateTime::now()?,
        };
        let issued_time = issued_at.to_rfc3339()?;

        check_length("issuer", self.issuer.len())?;
        check_length("audience", self.audience.len())?;
        check_length("issued_time", issued_time.len())?;
        check_length("data", self.data.len())?;
        check_length("binding_data", self.binding_data.len())?;

        Ok(RecoveryToken {
            version: PROTOCOL_VERSION,
            token_type: self.token_type,
            token_id: TokenId::random(),
            options: self.options,
            issuer: self.issuer,
            audience: self.audience,
            issued_time,
            data: self.data,
            binding_data: self.binding_data,
        })
    }
}

fn check_length(field: &'static str, length: usize) -> Result<()> {
    if length > MAX_FIELD_LENGTH {
        return Err(Error::FieldTooLong {
            field,
            length,
            maximum: MAX_FIELD_LENGTH,
        });
    }
    Ok(())
}

/// Determine if a buffer that failed to decode is probably
/// still base64 encoded.
fn looks_base64(buffer: &[u8]) -> bool {
    !buffer.is_empty()
        && buffer.iter().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(b, b'+' | b'/' | b'=' | b'-' | b'_')
        })
}
