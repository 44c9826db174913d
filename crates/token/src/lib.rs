//! Delegated account recovery tokens.
//!
//! A [RecoveryToken] is issued by an account provider and handed
//! to a recovery provider, which later returns a countersigned
//! token wrapping the original. Tokens are encoded to a compact
//! length prefixed binary format and sealed with a signature
//! using the [envelope] functions.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cipher;
pub mod constants;
mod date_time;
pub(crate) mod encoding;
pub mod envelope;
mod error;
pub mod issuer;
mod token;
mod token_id;

pub use cipher::{BoxedCipher, PayloadCipher};
pub use date_time::UtcDateTime;
pub use envelope::{seal, unseal, unseal_base64, TokenEnvelope};
pub use error::Error;
pub use issuer::{Issuer, ProviderRegistry};
pub use token::{RecoveryToken, TokenBuilder, TokenType};
pub use token_id::TokenId;

pub use dar_signer as signer;

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;

use rand::{rngs::OsRng, CryptoRng, Rng};

/// Exposes the default cryptographically secure RNG.
pub fn csprng() -> impl CryptoRng + Rng {
    OsRng
}
