use std::path::PathBuf;
use thiserror::Error;

/// Errors generated by the provider library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when a token was not issued by the
    /// expected provider.
    #[error("token issuer must be {expected} but got {found}")]
    IssuerMismatch {
        /// Expected issuer origin.
        expected: String,
        /// Issuer origin declared by the token.
        found: String,
    },

    /// Error generated when a token is intended for another provider.
    #[error("token audience must be {expected} but got {found}")]
    AudienceMismatch {
        /// Origin of this provider.
        expected: String,
        /// Audience origin declared by the token.
        found: String,
    },

    /// Error generated when a token was issued too long ago.
    #[error("token issued at {0} is stale")]
    StaleToken(String),

    /// Error generated when the issued time of a token
    /// cannot be parsed.
    #[error("token issued time {0} is invalid")]
    InvalidIssuedTime(String),

    /// Error generated when a sealed token exceeds the maximum size.
    #[error("token has {size} bytes which exceeds the maximum of {maximum}")]
    TokenTooLarge {
        /// Size of the decoded token and signature.
        size: usize,
        /// Maximum size accepted.
        maximum: usize,
    },

    /// Error generated when a provider has no URL configured
    /// for an endpoint.
    #[error("provider has no {0} endpoint")]
    MissingEndpoint(&'static str),

    /// Error generated when a configured origin is not a
    /// scheme, host and port tuple.
    #[error("origin {0} is not a valid provider origin")]
    InvalidOrigin(String),

    /// Error generated when a path is not a file.
    #[error("path {0} is not a file")]
    NotFile(PathBuf),

    /// Error generated by the token library.
    #[error(transparent)]
    Token(#[from] dar_token::Error),

    /// Error generated by the signer library.
    #[error(transparent)]
    Signer(#[from] dar_signer::Error),

    /// Error generated decoding base64.
    #[error(transparent)]
    Base64(#[from] base64::DecodeError),

    /// Error generated parsing TOML.
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Error generated parsing a URL.
    #[error(transparent)]
    UrlParse(#[from] url::ParseError),

    /// Error generated by input/output.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
