//! Vault factory entry points
//!
//! Creation calls format the Rust-side parameter structs into the
//! factory's nested ABI tuples, simulate, submit, then wait for the
//! receipt to recover the new vault's address from the creation event.

use alloy::consensus::TxReceipt as _;
use alloy::primitives::{Address, TxHash};
use alloy::providers::DynProvider;
use tracing::info;

use crate::client::executor::{write_call, PendingTx, TxOptions};
use crate::client::SymbioticClient;
use crate::contracts::abi::IVaultFactory;
use crate::error::{Error, Result};
use crate::vault::params::{EigenVaultConfig, SuperVaultConfig, SymVaultConfig};

/// Outcome of a vault creation call
#[derive(Debug, Clone)]
pub struct CreatedVault {
    pub vault: Address,
    pub tx_hash: TxHash,
}

impl SymbioticClient {
    fn factory_handle(&self) -> Result<IVaultFactory::IVaultFactoryInstance<DynProvider>> {
        let factory = self.config().require_factory()?;
        Ok(IVaultFactory::new(factory, self.provider().clone()))
    }

    /// Deploy a Symbiotic-family vault
    pub async fn create_sym_vault(
        &self,
        params: &SymVaultConfig,
        opts: TxOptions,
    ) -> Result<CreatedVault> {
        let opts = opts.or_gas_limit(self.config().gas.create_vault);
        let factory = self.factory_handle()?;
        let call = factory.createSymVault(params.to_abi());
        let pending = write_call("createSymVault", call, &opts).await?;
        self.created_vault(pending).await
    }

    /// Deploy an EigenLayer-family vault
    pub async fn create_eigen_vault(
        &self,
        params: &EigenVaultConfig,
        opts: TxOptions,
    ) -> Result<CreatedVault> {
        let opts = opts.or_gas_limit(self.config().gas.create_vault);
        let factory = self.factory_handle()?;
        let call = factory.createEigenVault(params.to_abi());
        let pending = write_call("createEigenVault", call, &opts).await?;
        self.created_vault(pending).await
    }

    /// Deploy a composite SuperVault
    pub async fn create_super_vault(
        &self,
        params: &SuperVaultConfig,
        opts: TxOptions,
    ) -> Result<CreatedVault> {
        let opts = opts.or_gas_limit(self.config().gas.create_vault);
        let factory = self.factory_handle()?;
        let call = factory.createSuperVault(params.to_abi());
        let pending = write_call("createSuperVault", call, &opts).await?;
        self.created_vault(pending).await
    }

    async fn created_vault(&self, pending: PendingTx) -> Result<CreatedVault> {
        let tx_hash = pending.tx_hash();
        let receipt = pending.confirmed().await?;

        for log in receipt.inner.logs() {
            if let Ok(decoded) = log.log_decode::<IVaultFactory::VaultCreated>() {
                let vault = decoded.inner.data.vault;
                info!(%vault, %tx_hash, "vault created");
                return Ok(CreatedVault { vault, tx_hash });
            }
        }

        Err(Error::MissingEvent("VaultCreated".to_string()))
    }
}
