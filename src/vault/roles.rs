//! Role-based access control operations
//!
//! Role identifiers come from the configured role table, so callers can
//! use names (`"limit_manager"`) instead of raw bytes32 values.

use alloy::primitives::{Address, B256};

use crate::client::executor::{read_call, write_call, PendingTx, TxOptions};
use crate::client::SymbioticClient;
use crate::error::{Error, Result};

impl SymbioticClient {
    /// Resolve a role name through the configured role table
    pub fn role_id(&self, name: &str) -> Result<B256> {
        self.config()
            .roles
            .resolve(name)
            .ok_or_else(|| Error::Config(format!("unknown role: {name}")))
    }

    pub async fn has_role(&self, vault: Address, role: B256, account: Address) -> Result<bool> {
        read_call("hasRole", self.vault_handle(vault).hasRole(role, account)).await
    }

    /// Check a role by its configured name
    pub async fn has_role_named(
        &self,
        vault: Address,
        role: &str,
        account: Address,
    ) -> Result<bool> {
        let role = self.role_id(role)?;
        self.has_role(vault, role, account).await
    }

    pub async fn grant_role(
        &self,
        vault: Address,
        role: B256,
        account: Address,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.role_admin);
        write_call(
            "grantRole",
            self.vault_handle(vault).grantRole(role, account),
            &opts,
        )
        .await
    }

    pub async fn revoke_role(
        &self,
        vault: Address,
        role: B256,
        account: Address,
        opts: TxOptions,
    ) -> Result<PendingTx> {
        let opts = opts.or_gas_limit(self.config().gas.role_admin);
        write_call(
            "revokeRole",
            self.vault_handle(vault).revokeRole(role, account),
            &opts,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::providers::{mock::Asserter, Provider, ProviderBuilder};

    use crate::config::ClientConfig;

    fn mocked_client(asserter: &Asserter) -> SymbioticClient {
        let provider = ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_mocked_client(asserter.clone())
            .erased();
        SymbioticClient::with_provider(provider, None, ClientConfig::default())
    }

    #[test]
    fn test_role_id_resolution() {
        let asserter = Asserter::new();
        let client = mocked_client(&asserter);

        assert_eq!(
            client.role_id("limit_manager").unwrap(),
            client.config().roles.limit_manager
        );
        assert!(client.role_id("no_such_role").is_err());
    }
}
