//! Vault operations common to all variants
//!
//! Every write goes through the simulate-then-send executor; every read
//! is a single uncached round trip (address resolution is the only layer
//! that memoizes).

pub mod delegation;
pub mod factory;
pub mod params;
pub mod roles;

use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;

use crate::client::executor::{read_call, write_call, PendingTx, TxOptions};
use crate::client::SymbioticClient;
use crate::contracts::abi::{IByzVault, ISuperVault, ISymVault};
use crate::error::Result;
use crate::metadata::ipfs::MetadataStore;
use crate::metadata::VaultMetadata;

/// Epoch bookkeeping snapshot of the underlying Symbiotic vault
#[derive(Debug, Clone)]
pub struct EpochInfo {
    pub current_epoch: U256,
    /// Epoch length in seconds
    pub epoch_duration: u64,
    /// Unix timestamp the current epoch started at
    pub current_epoch_start: u64,
}

impl SymbioticClient {
    pub(crate) fn vault_handle(
        &self,
        vault: Address,
    ) -> IByzVault::IByzVaultInstance<DynProvider> {
        IByzVault::new(vault, self.provider().clone())
    }

    fn sym_handle(&self, sym_vault: Address) -> ISymVault::ISymVaultInstance<DynProvider> {
        ISymVault::new(sym_vault, self.provider().clone())
    }

    // --- reads ---

    /// Underlying asset (collateral token) of the vault
    pub async fn asset(&self, vault: Address) -> Result<Address> {
        read_call("asset", self.vault_handle(vault).asset()).await
    }

    pub async fn total_assets(&self, vault: Address) -> Result<U256> {
        read_call("totalAssets", self.vault_handle(vault).totalAssets()).await
    }

    pub async fn total_supply(&self, vault: Address) -> Result<U256> {
        read_call("totalSupply", self.vault_handle(vault).totalSupply()).await
    }

    /// Share balance of `account`
    pub async fn balance_of(&self, vault: Address, account: Address) -> Result<U256> {
        read_call("balanceOf", self.vault_handle(vault).balanceOf(account)).await
    }

    pub async fn convert_to_shares(&self, vault: Address, assets: U256) -> Result<U256> {
        read_call(
            "convertToShares",
            self.vault_handle(vault).convertToShares(assets),
        )
        .await
    }

    pub async fn convert_to_assets(&self, vault: Address, shares: U256) -> Result<U256> {
        read_call(
            "convertToAssets",
            self.vault_handle(vault).convertToAssets(shares),
        )
        .await
    }

    pub async fn is_deposit_limit(&self, vault: Address) -> Result<bool> {
        read_call("isDepositLimit", self.vault_handle(vault).isDepositLimit()).await
    }

    pub async fn deposit_limit(&self, vault: Address) -> Result<U256> {
        read_call("depositLimit", self.vault_handle(vault).depositLimit()).await
    }

    pub async fn is_deposit_whitelist(&self, vault: Address) -> Result<bool> {
        read_call(
            "isDepositWhitelist",
            self.vault_handle(vault).isDepositWhitelist(),
        )
        .await
    }

    pub async fn is_whitelisted_depositor(
        &self,
        vault: Address,
        account: Address,
    ) -> Result<bool> {
        read_call(
            "isWhitelistedDepositor",
            self.vault_handle(vault).isWhitelistedDepositor(account),
        )
        .await
    }

    /// On-chain metadata URI of the vault
    pub async fn metadata_uri(&self, vault: Address) -> Result<String> {
        read_call("metadataURI", self.vault_handle(vault).metadataURI()).await
    }

    /// Epoch accounting of the underlying Symbiotic vault
    ///
    /// Fails for EigenLayer-family vaults, which have no sym vault.
    pub async fn epoch_info(&self, vault: Address) -> Result<EpochInfo> {
        let sym_vault = self.contracts().sym_vault(vault).await?;
        let handle = self.sym_handle(sym_vault);

        let current_epoch = read_call("currentEpoch", handle.currentEpoch()).await?;
        let epoch_duration = read_call("epochDuration", handle.epochDuration()).await?;
        let current_epoch_start =
            read_call("currentEpochStart", handle.currentEpochStart()).await?;

        Ok(EpochInfo {
            current_epoch,
            epoch_duration: epoch_duration.to::<u64>(),
            current_epoch_start: current_epoch_start.to::<u64>(),
        })
    }

    /// Stake currently active in the underlying Symbiotic vault
    pub async fn active_stake(&self, vault: Address) -> Result<U256> {
        let sym_vault = self.contracts().sym_vault(vault).await?;
        read_call("activeStake", self.sym_handle(sym_vault).activeStake()).await
    }

    /// Allocation ratio of a SuperVault across its underlying vaults
    pub async fn distribution_ratio(&self, vault: Address) -> Result<Vec<U256>> {
        let handle = ISuperVault::new(vault, self.provider().clone());
        read_call("distributionRatio", handle.distributionRatio()).await
    }

    // --- writes ---

    /// Deposit `assets` into the vault, minting shares to `receiver`
    pub async fn deposit(
        &self,
        vault: Address,
        assets: U256,
        receiver: Address,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.deposit);
        write_call(
            "deposit",
            self.vault_handle(vault).deposit(assets, receiver),
            &opts,
        )
        .await
    }

    /// Withdraw `assets` from the vault, burning `owner`'s shares
    pub async fn withdraw(
        &self,
        vault: Address,
        assets: U256,
        receiver: Address,
        owner: Address,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.withdraw);
        write_call(
            "withdraw",
            self.vault_handle(vault).withdraw(assets, receiver, owner),
            &opts,
        )
        .await
    }

    /// Redeem `shares` for assets
    pub async fn redeem(
        &self,
        vault: Address,
        shares: U256,
        receiver: Address,
        owner: Address,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.redeem);
        write_call(
            "redeem",
            self.vault_handle(vault).redeem(shares, receiver, owner),
            &opts,
        )
        .await
    }

    pub async fn set_deposit_limit(
        &self,
        vault: Address,
        limit: U256,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.limit_admin);
        write_call(
            "setDepositLimit",
            self.vault_handle(vault).setDepositLimit(limit),
            &opts,
        )
        .await
    }

    pub async fn set_deposit_whitelist(
        &self,
        vault: Address,
        status: bool,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.limit_admin);
        write_call(
            "setDepositWhitelist",
            self.vault_handle(vault).setDepositWhitelist(status),
            &opts,
        )
        .await
    }

    pub async fn set_whitelisted_depositor(
        &self,
        vault: Address,
        account: Address,
        status: bool,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.limit_admin);
        write_call(
            "setWhitelistedDepositor",
            self.vault_handle(vault).setWhitelistedDepositor(account, status),
            &opts,
        )
        .await
    }

    /// Update a SuperVault's allocation ratio
    pub async fn set_distribution_ratio(
        &self,
        vault: Address,
        ratio: Vec<U256>,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.limit_admin);
        let handle = ISuperVault::new(vault, self.provider().clone());
        write_call(
            "setDistributionRatio",
            handle.setDistributionRatio(ratio),
            &opts,
        )
        .await
    }

    /// Set the vault's metadata URI directly
    pub async fn set_metadata_uri(
        &self,
        vault: Address,
        uri: &str,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.metadata);
        write_call(
            "setMetadataURI",
            self.vault_handle(vault).setMetadataURI(uri.to_string()),
            &opts,
        )
        .await
    }

    /// Validate, store and set vault metadata in one step
    ///
    /// Validation runs before any network interaction; storage uses IPFS
    /// when credentials are configured and a data URI otherwise. Returns
    /// the stored URI alongside the pending transaction.
    pub async fn set_metadata(
        &self,
        vault: Address,
        metadata: &VaultMetadata,
        opts: TxOptions,
    ) -> Result<(String, PendingTx)> {
        let store = MetadataStore::new(self.config().ipfs.clone());
        let uri = store.store(metadata).await?;
        let pending = self.set_metadata_uri(vault, &uri, opts).await?;
        Ok((uri, pending))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Bytes;
    use alloy::providers::mock::Asserter;
    use alloy::providers::{Provider, ProviderBuilder};
    use alloy::sol_types::SolValue;

    use crate::config::ClientConfig;

    fn mocked_client(asserter: &Asserter) -> SymbioticClient {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased();
        SymbioticClient::with_provider(provider, None, ClientConfig::default())
    }

    #[tokio::test]
    async fn test_metadata_uri_read() {
        let asserter = Asserter::new();
        let client = mocked_client(&asserter);

        asserter.push_success(&Bytes::from("ipfs://QmExample".to_string().abi_encode()));

        let uri = client
            .metadata_uri(Address::repeat_byte(0x01))
            .await
            .unwrap();
        assert_eq!(uri, "ipfs://QmExample");
    }

    #[tokio::test]
    async fn test_epoch_info_uses_resolved_sym_vault() {
        let asserter = Asserter::new();
        let client = mocked_client(&asserter);
        let vault = Address::repeat_byte(0x01);

        // Resolution: probe + symVault read
        asserter.push_success(&Bytes::from(Address::repeat_byte(0xaa).abi_encode()));
        asserter.push_success(&Bytes::from(Address::repeat_byte(0xaa).abi_encode()));
        // Epoch reads
        asserter.push_success(&Bytes::from(U256::from(12u64).abi_encode()));
        asserter.push_success(&Bytes::from(
            alloy::primitives::aliases::U48::from(604_800u64).abi_encode(),
        ));
        asserter.push_success(&Bytes::from(
            alloy::primitives::aliases::U48::from(1_700_000_000u64).abi_encode(),
        ));

        let info = client.epoch_info(vault).await.unwrap();
        assert_eq!(info.current_epoch, U256::from(12u64));
        assert_eq!(info.epoch_duration, 604_800);
        assert_eq!(info.current_epoch_start, 1_700_000_000);
    }
}
