//! Resolve the declared issuer of a token.
//!
//! Resolution parses the token without verifying the signature;
//! callers that need authenticity must unseal the token with the
//! keys of the provider returned from the registry.
use crate::{Error, RecoveryToken, Result, TokenType};

/// Registry of trusted providers keyed by origin.
///
/// Implementations should return [Error::UnknownProvider] when
/// an origin is not known.
pub trait ProviderRegistry {
    /// Provider record for an account provider.
    type AccountProvider;
    /// Provider record for a recovery provider.
    type RecoveryProvider;

    /// Find the account provider for an origin.
    fn lookup_account_provider(
        &self,
        origin: &str,
    ) -> Result<Self::AccountProvider>;

    /// Find the recovery provider for an origin.
    fn lookup_recovery_provider(
        &self,
        origin: &str,
    ) -> Result<Self::RecoveryProvider>;
}

/// Provider that issued a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issuer<A, R> {
    /// Account provider that issued a recovery token.
    Account(A),
    /// Recovery provider that issued a countersigned token.
    Recovery(R),
}

/// Parse a token and return the issuer when the token type
/// matches the expected type.
pub fn resolve_issuer(
    token_and_signature: &[u8],
    expected: TokenType,
) -> Result<String> {
    let token = RecoveryToken::parse(token_and_signature)?;
    if token.token_type() != expected {
        return Err(Error::TokenTypeMismatch {
            expected,
            found: token.token_type(),
        });
    }
    Ok(token.issuer().to_owned())
}

/// Issuer of a recovery token.
pub fn recovery_token_issuer(token_and_signature: &[u8]) -> Result<String> {
    resolve_issuer(token_and_signature, TokenType::Recovery)
}

/// Issuer of a countersigned token.
pub fn countersigned_token_issuer(
    token_and_signature: &[u8],
) -> Result<String> {
    resolve_issuer(token_and_signature, TokenType::Countersigned)
}

/// Resolve the issuer and look up the provider in a registry.
///
/// Recovery tokens are issued by account providers and
/// countersigned tokens by recovery providers.
pub fn lookup_issuer<G: ProviderRegistry>(
    token_and_signature: &[u8],
    expected: TokenType,
    registry: &G,
) -> Result<Issuer<G::AccountProvider, G::RecoveryProvider>> {
    let origin = resolve_issuer(token_and_signature, expected)?;
    tracing::debug!(
        issuer = %origin,
        token_type = %expected,
        "issuer::lookup",
    );
    match expected {
        TokenType::Recovery => Ok(Issuer::Account(
            registry.lookup_account_provider(&origin)?,
        )),
        TokenType::Countersigned => Ok(Issuer::Recovery(
            registry.lookup_recovery_provider(&origin)?,
        )),
    }
}

/// Account provider that issued a recovery token.
pub fn account_provider_issuer<G: ProviderRegistry>(
    token_and_signature: &[u8],
    registry: &G,
) -> Result<G::AccountProvider> {
    let origin = recovery_token_issuer(token_and_signature)?;
    registry.lookup_account_provider(&origin)
}

/// Recovery provider that issued a countersigned token.
pub fn recovery_provider_issuer<G: ProviderRegistry>(
    token_and_signature: &[u8],
    registry: &G,
) -> Result<G::RecoveryProvider> {
    let origin = countersigned_token_issuer(token_and_signature)?;
    registry.lookup_recovery_provider(&origin)
}
