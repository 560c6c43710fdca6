//! Contract handle resolution and caching
//!
//! Derived addresses are external, immutable facts about the chain:
//! contracts are not redeployed at the same address in practice, so
//! entries are memoized for the life of the process with no TTL and no
//! invalidation beyond explicit clears.

use alloy::primitives::Address;
use alloy::providers::DynProvider;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use crate::client::executor::read_call;
use crate::client::prober::{VaultKind, VaultTypeClient};
use crate::contracts::abi::{ISuperVault, ISymVault, ISymbioticByzVault};
use crate::error::{Error, Result};

/// Cached derivation results for a single vault address
///
/// Fields populate incrementally as resolution steps succeed; a failed
/// step caches nothing.
#[derive(Debug, Clone, Default)]
pub struct VaultCacheEntry {
    pub kind: Option<VaultKind>,
    pub sym_vault: Option<Address>,
    pub delegator: Option<Address>,
    pub burner: Option<Address>,
}

/// Resolves and memoizes the contract addresses hanging off a vault
///
/// Keys are binary addresses, so the same vault reached through
/// differently-cased hex strings lands on one entry. Concurrent
/// first-time resolutions of the same address are not coordinated: both
/// may probe the chain, and the last writer wins with an identical value.
#[derive(Clone)]
pub struct ContractProvider {
    provider: DynProvider,
    prober: VaultTypeClient,
    cache: Arc<DashMap<Address, VaultCacheEntry>>,
}

impl ContractProvider {
    pub fn new(provider: DynProvider) -> Self {
        let prober = VaultTypeClient::new(provider.clone());
        Self {
            provider,
            prober,
            cache: Arc::new(DashMap::new()),
        }
    }

    /// The underlying prober, for callers that want probe reports
    pub fn prober(&self) -> &VaultTypeClient {
        &self.prober
    }

    /// Immutable snapshot of the cache entry for `vault`, if any
    pub fn cached(&self, vault: Address) -> Option<VaultCacheEntry> {
        self.cache.get(&vault).map(|entry| entry.value().clone())
    }

    /// Classification for `vault`, probing the chain on first use
    ///
    /// Successful classifications are cached; a miss is not, so a later
    /// call may retry the probes.
    pub async fn vault_kind(&self, vault: Address) -> Option<VaultKind> {
        if let Some(entry) = self.cache.get(&vault) {
            if let Some(kind) = entry.kind {
                return Some(kind);
            }
        }

        let kind = self.prober.classify(vault).await?;
        debug!(%vault, %kind, "classified vault");
        self.cache.entry(vault).or_default().kind = Some(kind);
        Some(kind)
    }

    /// Whether `vault` is a SuperVault
    ///
    /// Errors with `UnrecognizedVault` when no variant matches, since the
    /// derivation chain needs a definite answer.
    pub async fn is_supervault(&self, vault: Address) -> Result<bool> {
        match self.vault_kind(vault).await {
            Some(kind) => Ok(kind == VaultKind::SuperVault),
            None => Err(Error::UnrecognizedVault(vault.to_string())),
        }
    }

    /// Address of the underlying Symbiotic core vault
    ///
    /// SuperVaults hop through their Symbiotic-side vault first; plain
    /// vaults expose the reference directly.
    pub async fn sym_vault(&self, vault: Address) -> Result<Address> {
        if let Some(cached) = self.cached(vault).and_then(|entry| entry.sym_vault) {
            return Ok(cached);
        }

        let address = if self.is_supervault(vault).await? {
            let supervault = ISuperVault::new(vault, self.provider.clone());
            let pair = read_call("underlyingVaults", supervault.underlyingVaults()).await?;
            let sym_side = ISymbioticByzVault::new(pair.symbioticVault, self.provider.clone());
            read_call("symVault", sym_side.symVault()).await?
        } else {
            let handle = ISymbioticByzVault::new(vault, self.provider.clone());
            read_call("symVault", handle.symVault()).await?
        };

        debug!(%vault, sym_vault = %address, "resolved underlying sym vault");
        self.cache.entry(vault).or_default().sym_vault = Some(address);
        Ok(address)
    }

    /// Address of the vault's delegator contract
    pub async fn delegator(&self, vault: Address) -> Result<Address> {
        if let Some(cached) = self.cached(vault).and_then(|entry| entry.delegator) {
            return Ok(cached);
        }

        let sym_vault = self.sym_vault(vault).await?;
        let handle = ISymVault::new(sym_vault, self.provider.clone());
        let address = read_call("delegator", handle.delegator()).await?;

        self.cache.entry(vault).or_default().delegator = Some(address);
        Ok(address)
    }

    /// Address of the vault's burner contract
    pub async fn burner(&self, vault: Address) -> Result<Address> {
        if let Some(cached) = self.cached(vault).and_then(|entry| entry.burner) {
            return Ok(cached);
        }

        let sym_vault = self.sym_vault(vault).await?;
        let handle = ISymVault::new(sym_vault, self.provider.clone());
        let address = read_call("burner", handle.burner()).await?;

        self.cache.entry(vault).or_default().burner = Some(address);
        Ok(address)
    }

    /// Address of the vault's slasher contract (read through the sym
    /// vault on every call, not cached)
    pub async fn slasher(&self, vault: Address) -> Result<Address> {
        let sym_vault = self.sym_vault(vault).await?;
        let handle = ISymVault::new(sym_vault, self.provider.clone());
        read_call("slasher", handle.slasher()).await
    }

    /// Drop the entry for `vault`, or every entry when `None`
    ///
    /// No concurrency guard: a resolution in flight during a clear may
    /// repopulate the entry immediately.
    pub fn clear_cache(&self, vault: Option<Address>) {
        match vault {
            Some(address) => {
                self.cache.remove(&address);
            }
            None => self.cache.clear(),
        }
    }

    /// Number of cached entries
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, U256};
    use alloy::providers::mock::Asserter;
    use alloy::providers::{Provider, ProviderBuilder};
    use alloy::sol_types::SolValue;

    fn mocked(asserter: &Asserter) -> DynProvider {
        ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased()
    }

    fn encoded_address(byte: u8) -> Bytes {
        Bytes::from(Address::repeat_byte(byte).abi_encode())
    }

    #[tokio::test]
    async fn test_sym_vault_resolution_is_cached() {
        let asserter = Asserter::new();
        let provider = ContractProvider::new(mocked(&asserter));
        let vault = Address::repeat_byte(0x01);
        let sym_core = Address::repeat_byte(0xaa);

        // First resolution: one probe read plus one derivation read.
        asserter.push_success(&encoded_address(0xaa));
        asserter.push_success(&encoded_address(0xaa));

        assert_eq!(provider.sym_vault(vault).await.unwrap(), sym_core);

        // Second resolution: the mock queue is empty, so any network read
        // would fail. Full cache hit expected.
        assert_eq!(provider.sym_vault(vault).await.unwrap(), sym_core);
        assert_eq!(provider.cache_len(), 1);
    }

    #[tokio::test]
    async fn test_delegator_and_burner_derive_through_sym_vault() {
        let asserter = Asserter::new();
        let provider = ContractProvider::new(mocked(&asserter));
        let vault = Address::repeat_byte(0x01);

        asserter.push_success(&encoded_address(0xaa)); // probe
        asserter.push_success(&encoded_address(0xaa)); // symVault()
        asserter.push_success(&encoded_address(0xbb)); // delegator()
        asserter.push_success(&encoded_address(0xcc)); // burner()

        assert_eq!(
            provider.delegator(vault).await.unwrap(),
            Address::repeat_byte(0xbb)
        );
        assert_eq!(
            provider.burner(vault).await.unwrap(),
            Address::repeat_byte(0xcc)
        );

        // Both served from cache now.
        assert_eq!(
            provider.delegator(vault).await.unwrap(),
            Address::repeat_byte(0xbb)
        );
        assert_eq!(
            provider.burner(vault).await.unwrap(),
            Address::repeat_byte(0xcc)
        );
    }

    #[tokio::test]
    async fn test_supervault_resolution_hops_through_sym_side() {
        let asserter = Asserter::new();
        let provider = ContractProvider::new(mocked(&asserter));
        let vault = Address::repeat_byte(0x01);

        // Probes: symVault reverts, both EigenLayer probes revert, then
        // the distribution ratio matches.
        for _ in 0..3 {
            asserter.push_failure_msg("execution reverted".to_string());
        }
        asserter.push_success(&Bytes::from(
            vec![U256::from(50u64), U256::from(50u64)].abi_encode(),
        ));
        // underlyingVaults() pair, then the sym side's symVault()
        asserter.push_success(&Bytes::from(
            (Address::repeat_byte(0x77), Address::repeat_byte(0x88)).abi_encode(),
        ));
        asserter.push_success(&encoded_address(0xaa));

        assert_eq!(
            provider.sym_vault(vault).await.unwrap(),
            Address::repeat_byte(0xaa)
        );
        assert_eq!(
            provider.cached(vault).unwrap().kind,
            Some(VaultKind::SuperVault)
        );
    }

    #[tokio::test]
    async fn test_unrecognized_vault_errors() {
        let asserter = Asserter::new();
        let provider = ContractProvider::new(mocked(&asserter));

        for _ in 0..4 {
            asserter.push_failure_msg("execution reverted".to_string());
        }

        let err = provider
            .sym_vault(Address::repeat_byte(0x01))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedVault(_)));
        // A classification miss caches nothing.
        assert_eq!(provider.cache_len(), 0);
    }

    #[tokio::test]
    async fn test_failed_derivation_caches_no_partial_state() {
        let asserter = Asserter::new();
        let provider = ContractProvider::new(mocked(&asserter));
        let vault = Address::repeat_byte(0x01);

        // Probe succeeds, derivation read fails.
        asserter.push_success(&encoded_address(0xaa));
        asserter.push_failure_msg("execution reverted: not initialized".to_string());

        assert!(provider.sym_vault(vault).await.is_err());

        let entry = provider.cached(vault).unwrap();
        assert_eq!(entry.kind, Some(VaultKind::Symbiotic));
        assert_eq!(entry.sym_vault, None);
    }

    #[tokio::test]
    async fn test_clearing_one_entry_leaves_others() {
        let asserter = Asserter::new();
        let provider = ContractProvider::new(mocked(&asserter));
        let vault_a = Address::repeat_byte(0x01);
        let vault_b = Address::repeat_byte(0x02);

        asserter.push_success(&encoded_address(0xaa));
        asserter.push_success(&encoded_address(0xaa));
        asserter.push_success(&encoded_address(0xbb));
        asserter.push_success(&encoded_address(0xbb));

        provider.sym_vault(vault_a).await.unwrap();
        provider.sym_vault(vault_b).await.unwrap();
        assert_eq!(provider.cache_len(), 2);

        provider.clear_cache(Some(vault_a));
        assert_eq!(provider.cache_len(), 1);

        // B still resolves from cache with an empty mock queue.
        assert_eq!(
            provider.sym_vault(vault_b).await.unwrap(),
            Address::repeat_byte(0xbb)
        );
    }

    #[tokio::test]
    async fn test_clear_all() {
        let asserter = Asserter::new();
        let provider = ContractProvider::new(mocked(&asserter));

        asserter.push_success(&encoded_address(0xaa));
        asserter.push_success(&encoded_address(0xaa));
        provider.sym_vault(Address::repeat_byte(0x01)).await.unwrap();

        provider.clear_cache(None);
        assert_eq!(provider.cache_len(), 0);
    }
}
