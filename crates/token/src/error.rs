use crate::TokenType;
use thiserror::Error;

/// Errors generated by the token library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when bytes cannot be decoded as a token.
    #[error("malformed token: {0}")]
    MalformedToken(String),

    /// Error generated when decoding fails and the input only
    /// contains base64 characters.
    #[error("malformed token, input looks base64 encoded and should be decoded first")]
    Base64Input,

    /// Error generated when a token type tag is not recognized.
    #[error("unknown token type {0}")]
    UnknownTokenType(u8),

    /// Error generated when a token declares an unsupported version.
    #[error("token version must be {expected} but got {found}")]
    VersionMismatch {
        /// Supported protocol version.
        expected: u8,
        /// Version declared by the token.
        found: u8,
    },

    /// Error generated when no unseal key verifies a token signature.
    #[error("recovery token signature was invalid")]
    InvalidSignature,

    /// Error generated when a token has a different type than
    /// the calling flow expects.
    #[error("expected {expected} token but got {found}")]
    TokenTypeMismatch {
        /// Token type expected by the caller.
        expected: TokenType,
        /// Token type declared by the token.
        found: TokenType,
    },

    /// Error generated when sealing without a signing key.
    #[error("signing key must be set to seal a token")]
    NoSigningKey,

    /// Error generated when a variable length field does not
    /// fit in the length prefix.
    #[error("token field {field} has {length} bytes, maximum is {maximum}")]
    FieldTooLong {
        /// Name of the field.
        field: &'static str,
        /// Length of the value.
        length: usize,
        /// Maximum length for the field.
        maximum: usize,
    },

    /// Error generated by a payload cipher.
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    /// Error generated when a provider registry does not
    /// know an origin.
    #[error("unknown provider {0}")]
    UnknownProvider(String),

    /// Error generated by input/output.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Error generated decoding base64.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    /// Error generated by the signer library.
    #[error(transparent)]
    Signer(#[from] dar_signer::Error),

    /// Error generated parsing a date time.
    #[error(transparent)]
    TimeParse(#[from] time::error::Parse),

    /// Error generated formatting a date time.
    #[error(transparent)]
    TimeFormat(#[from] time::error::Format),

    /// Error generated when a date time component is out of range.
    #[error(transparent)]
    TimeComponent(#[from] time::error::ComponentRange),

    /// Error generated parsing a URL.
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),

    /// Error generated decoding hex.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}
