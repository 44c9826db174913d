use crate::{constants::TOKEN_ID_LENGTH, Error, Result};
use rand::Rng;
use std::{fmt, str::FromStr};

/// Token identifier.
///
/// String encoding is the 16 bytes hex-encoded.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub struct TokenId([u8; TOKEN_ID_LENGTH]);

impl TokenId {
    /// Create a random token identifier.
    pub fn random() -> Self {
        let mut rng = crate::csprng();
        Self(rng.gen())
    }

    /// Hex encoding of the identifier.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for TokenId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; TOKEN_ID_LENGTH]> for TokenId {
    fn from(value: [u8; TOKEN_ID_LENGTH]) -> Self {
        Self(value)
    }
}

impl From<TokenId> for [u8; TOKEN_ID_LENGTH] {
    fn from(value: TokenId) -> Self {
        value.0
    }
}

impl FromStr for TokenId {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for TokenId {
    type Error = Error;

    fn try_from(value: &[u8]) -> Result<Self> {
        let buffer: [u8; TOKEN_ID_LENGTH] = value.try_into().map_err(|_| {
            Error::MalformedToken(format!(
                "token id must be {} bytes but got {}",
                TOKEN_ID_LENGTH,
                value.len()
            ))
        })?;
        Ok(Self(buffer))
    }
}
