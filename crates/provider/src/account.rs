use crate::{
    check_issued_time, check_token_size, Error, ProviderRecord, Result,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use dar_token::{
    constants::CLOCK_SKEW, issuer::recovery_provider_issuer, unseal,
    BoxedCipher, ProviderRegistry, RecoveryToken, TokenEnvelope, TokenType,
};

/// Provider that holds an account and issues recovery tokens for it.
pub struct AccountProvider {
    origin: String,
    envelope: TokenEnvelope,
    cipher: BoxedCipher,
    clock_skew: i64,
}

impl AccountProvider {
    /// Create an account provider.
    ///
    /// The envelope must have a signing key to generate tokens
    /// and must trust that key to validate countersigned tokens.
    pub fn new(
        origin: impl Into<String>,
        envelope: TokenEnvelope,
        cipher: BoxedCipher,
    ) -> Self {
        Self {
            origin: origin.into(),
            envelope,
            cipher,
            clock_skew: CLOCK_SKEW,
        }
    }

    /// Set the maximum age in seconds of a countersigned token.
    pub fn with_clock_skew(mut self, clock_skew: i64) -> Self {
        self.clock_skew = clock_skew;
        self
    }

    /// Origin of this provider.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Envelope used to seal and unseal tokens.
    pub fn envelope(&self) -> &TokenEnvelope {
        &self.envelope
    }

    /// Encrypt a payload and seal it in a recovery token for
    /// a recovery provider.
    pub fn generate_recovery_token(
        &self,
        data: &[u8],
        audience: &str,
        options: u8,
    ) -> Result<(RecoveryToken, String)> {
        let ciphertext = self.cipher.encrypt(data)?;
        let token = RecoveryToken::builder(TokenType::Recovery)
            .issuer(self.origin.clone())
            .audience(audience)
            .options(options)
            .data(ciphertext)
            .build()?;
        let sealed = self.envelope.seal(&token)?;
        tracing::debug!(
            token_id = %token.token_id(),
            audience = %audience,
            "account_provider::generate_recovery_token",
        );
        Ok((token, sealed))
    }

    /// Validate a countersigned token and return the recovery
    /// token it wraps.
    ///
    /// The countersigned token must be signed by the recovery
    /// provider that issued it and the wrapped recovery token
    /// must have been issued by this provider to that recovery
    /// provider.
    ///
    /// The recovery provider's `token_max_size` applies to the
    /// wrapped recovery token, which is the artifact it accepted,
    /// rather than the larger countersigned token.
    pub fn validate_countersigned_token<G>(
        &self,
        sealed: &str,
        registry: &G,
    ) -> Result<RecoveryToken>
    where
        G: ProviderRegistry<RecoveryProvider = ProviderRecord>,
    {
        let bytes = STANDARD.decode(sealed)?;
        let provider = recovery_provider_issuer(&bytes, registry)?;

        let countersigned = unseal(&bytes, provider.unseal_keys())?;
        check_token_size(
            countersigned.data().len(),
            provider.token_max_size(),
        )?;
        if countersigned.issuer() != provider.origin() {
            return Err(Error::IssuerMismatch {
                expected: provider.origin().to_owned(),
                found: countersigned.issuer().to_owned(),
            });
        }
        if countersigned.audience() != self.origin {
            return Err(Error::AudienceMismatch {
                expected: self.origin.clone(),
                found: countersigned.audience().to_owned(),
            });
        }
        check_issued_time(&countersigned, self.clock_skew)?;

        let recovery = self.envelope.unseal(countersigned.data())?;
        if recovery.token_type() != TokenType::Recovery {
            return Err(dar_token::Error::TokenTypeMismatch {
                expected: TokenType::Recovery,
                found: recovery.token_type(),
            }
            .into());
        }
        if recovery.issuer() != self.origin {
            return Err(Error::IssuerMismatch {
                expected: self.origin.clone(),
                found: recovery.issuer().to_owned(),
            });
        }
        if recovery.audience() != countersigned.issuer() {
            return Err(Error::IssuerMismatch {
                expected: recovery.audience().to_owned(),
                found: countersigned.issuer().to_owned(),
            });
        }

        tracing::debug!(
            token_id = %recovery.token_id(),
            recovery_provider = %provider.origin(),
            "account_provider::validate_countersigned_token",
        );
        Ok(recovery)
    }

    /// Decrypt the payload of a validated recovery token.
    pub fn decrypt_payload(&self, token: &RecoveryToken) -> Result<Vec<u8>> {
        Ok(token.decrypt_data(self.cipher.as_ref())?)
    }
}
