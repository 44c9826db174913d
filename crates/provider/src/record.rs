use dar_signer::BoxedVerifier;
use dar_token::constants::DEFAULT_TOKEN_MAX_SIZE;
use std::fmt;
use url::Url;

/// Public description of a provider.
///
/// Records are what a registry hands out for an origin; they
/// carry the keys used to unseal tokens the provider issued.
#[derive(Clone)]
pub struct ProviderRecord {
    origin: String,
    unseal_keys: Vec<BoxedVerifier>,
    recover_account: Option<Url>,
    save_token: Option<Url>,
    token_max_size: usize,
}

impl ProviderRecord {
    /// Create a provider record.
    pub fn new(
        origin: impl Into<String>,
        unseal_keys: Vec<BoxedVerifier>,
    ) -> Self {
        Self {
            origin: origin.into(),
            unseal_keys,
            recover_account: None,
            save_token: None,
            token_max_size: DEFAULT_TOKEN_MAX_SIZE,
        }
    }

    /// Set the endpoint used to start account recovery.
    pub fn with_recover_account(mut self, url: Url) -> Self {
        self.recover_account = Some(url);
        self
    }

    /// Set the endpoint that receives recovery tokens.
    pub fn with_save_token(mut self, url: Url) -> Self {
        self.save_token = Some(url);
        self
    }

    /// Set the maximum size of a decoded sealed token.
    pub fn with_token_max_size(mut self, token_max_size: usize) -> Self {
        self.token_max_size = token_max_size;
        self
    }

    /// Provider origin.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Keys that verify tokens issued by this provider.
    pub fn unseal_keys(&self) -> &[BoxedVerifier] {
        &self.unseal_keys
    }

    /// Endpoint used to start account recovery.
    pub fn recover_account(&self) -> Option<&Url> {
        self.recover_account.as_ref()
    }

    /// Endpoint that receives recovery tokens.
    pub fn save_token(&self) -> Option<&Url> {
        self.save_token.as_ref()
    }

    /// Maximum size of a decoded sealed token.
    pub fn token_max_size(&self) -> usize {
        self.token_max_size
    }
}

impl fmt::Debug for ProviderRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRecord")
            .field("origin", &self.origin)
            .field("unseal_keys", &self.unseal_keys.len())
            .field("recover_account", &self.recover_account)
            .field("save_token", &self.save_token)
            .field("token_max_size", &self.token_max_size)
            .finish()
    }
}
