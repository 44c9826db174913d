//! Provider configuration.
use crate::{
    AccountProvider, Error, ProviderRecord, RecoveryProvider, Result,
};
use dar_signer::{BoxedSigner, BoxedVerifier, Scheme};
use dar_token::{
    constants::{CLOCK_SKEW, DEFAULT_TOKEN_MAX_SIZE},
    BoxedCipher, TokenEnvelope,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Configuration for a provider loaded from TOML.
///
/// ```toml
/// origin = "https://issuer.example"
/// scheme = "ed25519"
/// signing_key = "<hex private key>"
/// unseal_keys = ["<hex public key>"]
/// recover_account = "https://issuer.example/recover"
/// ```
#[derive(Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Origin of the provider.
    pub origin: Url,

    /// Signature scheme for the keys.
    pub scheme: Scheme,

    /// Hex encoded private key used to seal tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key: Option<String>,

    /// Hex encoded public keys used to unseal tokens.
    ///
    /// When empty the public key of the signing key is used.
    #[serde(default)]
    pub unseal_keys: Vec<String>,

    /// Endpoint used to start account recovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recover_account: Option<Url>,

    /// Endpoint that receives recovery tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save_token: Option<Url>,

    /// Maximum size of a decoded sealed token.
    #[serde(default = "default_token_max_size")]
    pub token_max_size: usize,

    /// Maximum age in seconds of a received token.
    #[serde(default = "default_clock_skew")]
    pub clock_skew: i64,

    /// Path the file was loaded from.
    #[serde(skip)]
    file: Option<PathBuf>,
}

fn default_token_max_size() -> usize {
    DEFAULT_TOKEN_MAX_SIZE
}

fn default_clock_skew() -> i64 {
    CLOCK_SKEW
}

impl ProviderConfig {
    /// Create a configuration for an origin.
    pub fn new(origin: Url, scheme: Scheme) -> Self {
        Self {
            origin,
            scheme,
            signing_key: None,
            unseal_keys: Vec::new(),
            recover_account: None,
            save_token: None,
            token_max_size: DEFAULT_TOKEN_MAX_SIZE,
            clock_skew: CLOCK_SKEW,
            file: None,
        }
    }

    /// Load a provider config from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().is_file() {
            return Err(Error::NotFile(path.as_ref().to_path_buf()));
        }

        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut config: ProviderConfig = toml::from_str(&contents)?;
        config.file = Some(path.as_ref().canonicalize()?);

        // Fail early on bad origins and key material
        config.origin()?;
        config.signing_key()?;
        config.unseal_keys()?;

        tracing::debug!(
            origin = %config.origin,
            scheme = %config.scheme,
            "provider_config::load",
        );
        Ok(config)
    }

    /// Path the configuration was loaded from.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// Serialized origin without a path.
    pub fn origin(&self) -> Result<String> {
        let origin = self.origin.origin();
        if !origin.is_tuple() {
            return Err(Error::InvalidOrigin(self.origin.to_string()));
        }
        Ok(origin.ascii_serialization())
    }

    /// Parse the signing key.
    pub fn signing_key(&self) -> Result<Option<BoxedSigner>> {
        Ok(match &self.signing_key {
            Some(value) => Some(self.scheme.signer_from_hex(value)?),
            None => None,
        })
    }

    /// Parse the unseal keys.
    pub fn unseal_keys(&self) -> Result<Vec<BoxedVerifier>> {
        if self.unseal_keys.is_empty() {
            return Ok(self
                .signing_key()?
                .map(|signer| vec![signer.verifying_key()])
                .unwrap_or_default());
        }
        let mut keys = Vec::with_capacity(self.unseal_keys.len());
        for value in &self.unseal_keys {
            keys.push(self.scheme.verifier_from_hex(value)?);
        }
        Ok(keys)
    }

    /// Envelope with the configured keys.
    pub fn envelope(&self) -> Result<TokenEnvelope> {
        Ok(TokenEnvelope::new(self.signing_key()?, self.unseal_keys()?))
    }

    /// Record other parties use to verify tokens issued by
    /// this provider.
    pub fn record(&self) -> Result<ProviderRecord> {
        let mut record =
            ProviderRecord::new(self.origin()?, self.unseal_keys()?)
                .with_token_max_size(self.token_max_size);
        if let Some(url) = &self.recover_account {
            record = record.with_recover_account(url.clone());
        }
        if let Some(url) = &self.save_token {
            record = record.with_save_token(url.clone());
        }
        Ok(record)
    }

    /// Account provider for this configuration.
    pub fn account_provider(
        &self,
        cipher: BoxedCipher,
    ) -> Result<AccountProvider> {
        Ok(AccountProvider::new(self.origin()?, self.envelope()?, cipher)
            .with_clock_skew(self.clock_skew))
    }

    /// Recovery provider for this configuration.
    pub fn recovery_provider(&self) -> Result<RecoveryProvider> {
        Ok(RecoveryProvider::new(self.record()?, self.envelope()?)
            .with_clock_skew(self.clock_skew))
    }
}
