use crate::{
    check_issued_time, check_token_size, Error, ProviderRecord, Result,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dar_token::{
    constants::CLOCK_SKEW,
    issuer::{account_provider_issuer, recovery_token_issuer},
    unseal, ProviderRegistry, RecoveryToken, TokenEnvelope, TokenType,
};
use url::Url;

/// Provider that stores recovery tokens and countersigns
/// them when an account owner asks to recover.
pub struct RecoveryProvider {
    record: ProviderRecord,
    envelope: TokenEnvelope,
    clock_skew: i64,
}

impl RecoveryProvider {
    /// Create a recovery provider from the record it publishes
    /// and the envelope that holds its signing key.
    pub fn new(record: ProviderRecord, envelope: TokenEnvelope) -> Self {
        Self {
            record,
            envelope,
            clock_skew: CLOCK_SKEW,
        }
    }

    /// Set the maximum age in seconds of a recovery token.
    pub fn with_clock_skew(mut self, clock_skew: i64) -> Self {
        self.clock_skew = clock_skew;
        self
    }

    /// Origin of this provider.
    pub fn origin(&self) -> &str {
        self.record.origin()
    }

    /// Record published for this provider.
    pub fn record(&self) -> &ProviderRecord {
        &self.record
    }

    /// Envelope used to seal countersigned tokens.
    pub fn envelope(&self) -> &TokenEnvelope {
        &self.envelope
    }

    /// Validate a sealed recovery token sent by an account provider.
    pub fn validate_recovery_token<G>(
        &self,
        sealed: &str,
        registry: &G,
    ) -> Result<RecoveryToken>
    where
        G: ProviderRegistry<AccountProvider = ProviderRecord>,
    {
        let bytes = STANDARD.decode(sealed)?;
        check_token_size(bytes.len(), self.record.token_max_size())?;

        let provider = account_provider_issuer(&bytes, registry)?;
        let token = unseal(&bytes, provider.unseal_keys())?;
        if token.issuer() != provider.origin() {
            return Err(Error::IssuerMismatch {
                expected: provider.origin().to_owned(),
                found: token.issuer().to_owned(),
            });
        }
        if token.audience() != self.origin() {
            return Err(Error::AudienceMismatch {
                expected: self.origin().to_owned(),
                found: token.audience().to_owned(),
            });
        }
        check_issued_time(&token, self.clock_skew)?;

        tracing::debug!(
            token_id = %token.token_id(),
            account_provider = %provider.origin(),
            "recovery_provider::validate_recovery_token",
        );
        Ok(token)
    }

    /// Countersign a stored recovery token for the account
    /// provider that issued it.
    ///
    /// The countersigned token carries the original sealed token
    /// bytes as its payload.
    pub fn countersign_token(
        &self,
        sealed: &str,
        binding_data: Vec<u8>,
        options: u8,
    ) -> Result<String> {
        let bytes = STANDARD.decode(sealed)?;
        let audience = recovery_token_issuer(&bytes)?;
        let token = RecoveryToken::builder(TokenType::Countersigned)
            .issuer(self.origin())
            .audience(audience)
            .options(options)
            .data(bytes)
            .binding_data(binding_data)
            .build()?;
        let countersigned = self.envelope.seal(&token)?;
        tracing::debug!(
            token_id = %token.token_id(),
            audience = %token.audience(),
            "recovery_provider::countersign_token",
        );
        Ok(countersigned)
    }

    /// URL that starts account recovery for a token.
    pub fn state_url(&self, token: &RecoveryToken) -> Result<Url> {
        let endpoint = self
            .record
            .recover_account()
            .ok_or(Error::MissingEndpoint("recover_account"))?;
        Ok(token.state_url(endpoint))
    }
}
