use crate::ProviderRecord;
use dar_token::{Error, ProviderRegistry};
use std::collections::HashMap;

/// Provider registry held in memory.
///
/// Account providers and recovery providers are kept apart
/// so an origin can act in both roles with different records.
#[derive(Debug, Default, Clone)]
pub struct MemoryRegistry {
    account_providers: HashMap<String, ProviderRecord>,
    recovery_providers: HashMap<String, ProviderRecord>,
}

impl MemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an account provider.
    ///
    /// Returns the previous record for the origin.
    pub fn insert_account_provider(
        &mut self,
        record: ProviderRecord,
    ) -> Option<ProviderRecord> {
        self.account_providers
            .insert(record.origin().to_owned(), record)
    }

    /// Add a recovery provider.
    ///
    /// Returns the previous record for the origin.
    pub fn insert_recovery_provider(
        &mut self,
        record: ProviderRecord,
    ) -> Option<ProviderRecord> {
        self.recovery_providers
            .insert(record.origin().to_owned(), record)
    }

    /// Remove an account provider.
    pub fn remove_account_provider(
        &mut self,
        origin: &str,
    ) -> Option<ProviderRecord> {
        self.account_providers.remove(origin)
    }

    /// Remove a recovery provider.
    pub fn remove_recovery_provider(
        &mut self,
        origin: &str,
    ) -> Option<ProviderRecord> {
        self.recovery_providers.remove(origin)
    }
}

impl ProviderRegistry for MemoryRegistry {
    type AccountProvider = ProviderRecord;
    type RecoveryProvider = ProviderRecord;

    fn lookup_account_provider(
        &self,
        origin: &str,
    ) -> Result<ProviderRecord, Error> {
        self.account_providers
            .get(origin)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(origin.to_owned()))
    }

    fn lookup_recovery_provider(
        &self,
        origin: &str,
    ) -> Result<ProviderRecord, Error> {
        self.recovery_providers
            .get(origin)
            .cloned()
            .ok_or_else(|| Error::UnknownProvider(origin.to_owned()))
    }
}
