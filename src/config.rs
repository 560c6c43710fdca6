//! Configuration loading and validation
//!
//! Role identifiers and per-operation gas limits are part of the
//! configuration object handed to the client constructor, so deployments
//! with non-standard role tables or gas schedules can override them in
//! `config.toml` without touching code.

use alloy::primitives::{keccak256, Address, B256};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub contracts: ContractsConfig,
    #[serde(default)]
    pub wallet: WalletConfig,
    #[serde(default)]
    pub gas: GasConfig,
    #[serde(default)]
    pub roles: RoleTable,
    #[serde(default)]
    pub ipfs: IpfsConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            rpc: RpcConfig::default(),
            contracts: ContractsConfig::default(),
            wallet: WalletConfig::default(),
            gas: GasConfig::default(),
            roles: RoleTable::default(),
            ipfs: IpfsConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RpcConfig {
    #[serde(default = "default_rpc_endpoint")]
    pub endpoint: String,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            endpoint: default_rpc_endpoint(),
        }
    }
}

/// Addresses of the pre-deployed entry-point contracts
#[derive(Debug, Clone, Deserialize)]
pub struct ContractsConfig {
    /// Vault factory address
    #[serde(default)]
    pub factory: Address,
}

impl Default for ContractsConfig {
    fn default() -> Self {
        Self {
            factory: Address::ZERO,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WalletConfig {
    /// Hex-encoded private key; leave unset for a read-only client
    #[serde(default)]
    pub private_key: Option<String>,
}

impl WalletConfig {
    /// Parse the configured private key into a local signer, if present
    pub fn signer(&self) -> crate::error::Result<Option<PrivateKeySigner>> {
        match self.private_key.as_deref() {
            None | Some("") => Ok(None),
            Some(key) => key
                .parse::<PrivateKeySigner>()
                .map(Some)
                .map_err(|e| crate::error::Error::Config(format!("invalid private key: {e}"))),
        }
    }
}

/// Default gas limits per operation, applied when the caller does not set
/// an explicit limit in `TxOptions`
#[derive(Debug, Clone, Deserialize)]
pub struct GasConfig {
    #[serde(default = "default_gas_create_vault")]
    pub create_vault: u64,
    #[serde(default = "default_gas_deposit")]
    pub deposit: u64,
    #[serde(default = "default_gas_withdraw")]
    pub withdraw: u64,
    #[serde(default = "default_gas_redeem")]
    pub redeem: u64,
    #[serde(default = "default_gas_role_admin")]
    pub role_admin: u64,
    #[serde(default = "default_gas_limit_admin")]
    pub limit_admin: u64,
    #[serde(default = "default_gas_metadata")]
    pub metadata: u64,
}

impl Default for GasConfig {
    fn default() -> Self {
        Self {
            create_vault: default_gas_create_vault(),
            deposit: default_gas_deposit(),
            withdraw: default_gas_withdraw(),
            redeem: default_gas_redeem(),
            role_admin: default_gas_role_admin(),
            limit_admin: default_gas_limit_admin(),
            metadata: default_gas_metadata(),
        }
    }
}

/// Named role identifiers used by the vaults' access control
///
/// Defaults follow the deployed contracts: the zero hash for the admin
/// role, keccak of the upper-snake role name for everything else.
#[derive(Debug, Clone, Deserialize)]
pub struct RoleTable {
    #[serde(default = "default_admin_role")]
    pub default_admin: B256,
    #[serde(default = "default_version_manager_role")]
    pub version_manager: B256,
    #[serde(default = "default_whitelist_manager_role")]
    pub whitelist_manager: B256,
    #[serde(default = "default_limit_manager_role")]
    pub limit_manager: B256,
    #[serde(default = "default_curator_fee_claimer_role")]
    pub curator_fee_claimer: B256,
    #[serde(default = "default_curator_fee_claimer_admin_role")]
    pub curator_fee_claimer_admin: B256,
}

impl Default for RoleTable {
    fn default() -> Self {
        Self {
            default_admin: default_admin_role(),
            version_manager: default_version_manager_role(),
            whitelist_manager: default_whitelist_manager_role(),
            limit_manager: default_limit_manager_role(),
            curator_fee_claimer: default_curator_fee_claimer_role(),
            curator_fee_claimer_admin: default_curator_fee_claimer_admin_role(),
        }
    }
}

impl RoleTable {
    /// Look up a role identifier by name
    pub fn resolve(&self, name: &str) -> Option<B256> {
        match name.to_ascii_lowercase().as_str() {
            "default_admin" | "admin" => Some(self.default_admin),
            "version_manager" => Some(self.version_manager),
            "whitelist_manager" => Some(self.whitelist_manager),
            "limit_manager" => Some(self.limit_manager),
            "curator_fee_claimer" => Some(self.curator_fee_claimer),
            "curator_fee_claimer_admin" => Some(self.curator_fee_claimer_admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IpfsConfig {
    /// Pinning service API endpoint
    #[serde(default = "default_ipfs_api_url")]
    pub api_url: String,
    /// Gateway used to turn ipfs:// URIs into fetchable URLs
    #[serde(default = "default_ipfs_gateway")]
    pub gateway: String,
    /// Bearer token for the pinning service; unset means data-URI fallback
    #[serde(default)]
    pub jwt: Option<String>,
}

impl Default for IpfsConfig {
    fn default() -> Self {
        Self {
            api_url: default_ipfs_api_url(),
            gateway: default_ipfs_gateway(),
            jwt: None,
        }
    }
}

impl IpfsConfig {
    pub fn is_configured(&self) -> bool {
        self.jwt.as_deref().is_some_and(|jwt| !jwt.is_empty())
    }
}

// Default value functions
fn default_rpc_endpoint() -> String {
    std::env::var("RPC_ENDPOINT").unwrap_or_else(|_| "http://127.0.0.1:8545".into())
}

fn default_gas_create_vault() -> u64 {
    3_000_000
}

fn default_gas_deposit() -> u64 {
    500_000
}

fn default_gas_withdraw() -> u64 {
    650_000
}

fn default_gas_redeem() -> u64 {
    650_000
}

fn default_gas_role_admin() -> u64 {
    120_000
}

fn default_gas_limit_admin() -> u64 {
    120_000
}

fn default_gas_metadata() -> u64 {
    200_000
}

fn default_admin_role() -> B256 {
    B256::ZERO
}

fn role_id(name: &str) -> B256 {
    keccak256(name.as_bytes())
}

fn default_version_manager_role() -> B256 {
    role_id("VERSION_MANAGER_ROLE")
}

fn default_whitelist_manager_role() -> B256 {
    role_id("WHITELIST_MANAGER_ROLE")
}

fn default_limit_manager_role() -> B256 {
    role_id("LIMIT_MANAGER_ROLE")
}

fn default_curator_fee_claimer_role() -> B256 {
    role_id("CURATOR_FEE_CLAIMER_ROLE")
}

fn default_curator_fee_claimer_admin_role() -> B256 {
    role_id("CURATOR_FEE_CLAIMER_ADMIN_ROLE")
}

fn default_ipfs_api_url() -> String {
    "https://api.pinata.cloud".into()
}

fn default_ipfs_gateway() -> String {
    "https://gateway.pinata.cloud/ipfs".into()
}

impl ClientConfig {
    /// Load configuration from file and environment variables
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let settings = config::Config::builder()
            // Start with defaults
            .set_default("rpc.endpoint", default_rpc_endpoint())?
            // Load from file if exists
            .add_source(config::File::from(path).required(false))
            // Override with environment variables (prefix VAULT_SDK_)
            .add_source(
                config::Environment::with_prefix("VAULT_SDK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let config: ClientConfig = settings
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if self.rpc.endpoint.is_empty() {
            anyhow::bail!("rpc.endpoint must not be empty");
        }

        let scheme_ok = ["http://", "https://", "ws://", "wss://"]
            .iter()
            .any(|scheme| self.rpc.endpoint.starts_with(scheme));
        if !scheme_ok {
            anyhow::bail!("rpc.endpoint must be an http(s) or ws(s) URL");
        }

        if let Some(key) = self.wallet.private_key.as_deref() {
            if !key.is_empty() && self.wallet.signer().is_err() {
                anyhow::bail!("wallet.private_key is not a valid hex private key");
            }
        }

        Ok(())
    }

    /// Validate that the factory address is configured (required for
    /// vault creation, not for read-only use)
    pub fn require_factory(&self) -> crate::error::Result<Address> {
        if self.contracts.factory == Address::ZERO {
            return Err(crate::error::Error::Config(
                "contracts.factory is not configured".into(),
            ));
        }
        Ok(self.contracts.factory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_role_table_defaults() {
        let roles = RoleTable::default();
        assert_eq!(roles.default_admin, B256::ZERO);
        assert_eq!(
            roles.limit_manager,
            keccak256("LIMIT_MANAGER_ROLE".as_bytes())
        );
        assert_ne!(roles.limit_manager, roles.whitelist_manager);
    }

    #[test]
    fn test_role_table_resolve() {
        let roles = RoleTable::default();
        assert_eq!(roles.resolve("admin"), Some(roles.default_admin));
        assert_eq!(roles.resolve("LIMIT_MANAGER"), Some(roles.limit_manager));
        assert_eq!(roles.resolve("nonexistent"), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(
            file,
            r#"
[rpc]
endpoint = "https://eth.example.org"

[contracts]
factory = "0x0000000000000000000000000000000000000001"

[gas]
deposit = 750000
"#
        )
        .unwrap();

        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.rpc.endpoint, "https://eth.example.org");
        assert_eq!(
            config.contracts.factory,
            "0x0000000000000000000000000000000000000001"
                .parse::<Address>()
                .unwrap()
        );
        assert_eq!(config.gas.deposit, 750_000);
        // Untouched sections keep their defaults
        assert_eq!(config.gas.create_vault, 3_000_000);
        assert!(!config.ipfs.is_configured());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let mut file = tempfile::NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[rpc]\nendpoint = \"ftp://nope\"").unwrap();
        assert!(ClientConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_signer_is_read_only() {
        let config = ClientConfig::default();
        assert!(config.wallet.signer().unwrap().is_none());
    }
}
