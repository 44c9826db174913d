//! Account provider and recovery provider flows for
//! delegated account recovery.
//!
//! An [AccountProvider] issues sealed recovery tokens that a
//! [RecoveryProvider] validates and stores. To recover an account
//! the recovery provider countersigns the stored token and the
//! account provider validates the countersigned token before
//! decrypting the payload.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod account;
mod config;
mod error;
mod record;
mod recovery;
mod registry;

pub use account::AccountProvider;
pub use config::ProviderConfig;
pub use error::Error;
pub use record::ProviderRecord;
pub use recovery::RecoveryProvider;
pub use registry::MemoryRegistry;

pub use dar_signer as signer;
pub use dar_token as token;

use dar_token::{RecoveryToken, UtcDateTime};

/// Result type for the library.
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Reject a decoded sealed token larger than the maximum size.
pub(crate) fn check_token_size(size: usize, maximum: usize) -> Result<()> {
    if size > maximum {
        return Err(Error::TokenTooLarge { size, maximum });
    }
    Ok(())
}

/// Reject a token issued more than `clock_skew` seconds ago.
pub(crate) fn check_issued_time(
    token: &RecoveryToken,
    clock_skew: i64,
) -> Result<()> {
    let issued_at = token.issued_at().map_err(|_| {
        Error::InvalidIssuedTime(token.issued_time().to_owned())
    })?;
    let now = UtcDateTime::now()?;
    if issued_at.is_older_than(clock_skew, &now) {
        tracing::warn!(
            token_id = %token.token_id(),
            issued_time = %token.issued_time(),
            "provider::stale_token",
        );
        return Err(Error::StaleToken(token.issued_time().to_owned()));
    }
    Ok(())
}
