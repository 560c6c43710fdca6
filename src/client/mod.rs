//! Top-level SDK client

pub mod executor;
pub mod prober;
pub mod provider;

pub use executor::{PendingTx, TxOptions};
pub use prober::{ProbeOutcome, VaultKind, VaultTypeClient};
pub use provider::{ContractProvider, VaultCacheEntry};

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use tracing::info;

use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Client for the vault factory and the vault contract families
///
/// Wraps a transaction-signing provider plus the classification and
/// address-resolution cache. Cheap to clone; clones share the cache.
#[derive(Clone)]
pub struct SymbioticClient {
    provider: DynProvider,
    contracts: ContractProvider,
    signer: Option<Address>,
    config: ClientConfig,
}

impl SymbioticClient {
    /// Connect using the given configuration
    ///
    /// A signing wallet is attached when a private key is configured;
    /// without one the client is read-only and writes fail at submission.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        let url: url::Url = config
            .rpc
            .endpoint
            .parse()
            .map_err(|e| Error::Config(format!("invalid RPC endpoint: {e}")))?;

        let (provider, signer) = match config.wallet.signer()? {
            Some(key) => {
                let address = key.address();
                let wallet = EthereumWallet::from(key);
                let provider = ProviderBuilder::new()
                    .wallet(wallet)
                    .connect_http(url)
                    .erased();
                (provider, Some(address))
            }
            None => (ProviderBuilder::new().connect_http(url).erased(), None),
        };

        info!(endpoint = %config.rpc.endpoint, signer = ?signer, "connected");
        Ok(Self::with_provider(provider, signer, config))
    }

    /// Build a client over an existing provider (tests, custom transports)
    pub fn with_provider(
        provider: DynProvider,
        signer: Option<Address>,
        config: ClientConfig,
    ) -> Self {
        let contracts = ContractProvider::new(provider.clone());
        Self {
            provider,
            contracts,
            signer,
            config,
        }
    }

    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// The classification and address-resolution cache
    pub fn contracts(&self) -> &ContractProvider {
        &self.contracts
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Address of the configured signer, if any
    pub fn signer(&self) -> Option<Address> {
        self.signer
    }

    /// Classification for a vault address (cached after the first probe)
    pub async fn vault_kind(&self, vault: Address) -> Option<VaultKind> {
        self.contracts.vault_kind(vault).await
    }
}
