//! Vault creation parameters
//!
//! Rust-side structures mirrored into the factory's nested ABI tuples.
//! Optional role holders fall back to the role manager, matching the
//! factory's own convention for unset slots.

use alloy::primitives::{aliases::U48, Address, U256};
use serde::{Deserialize, Serialize};

use crate::contracts::abi::IVaultFactory;
use crate::vault::delegation::{DelegatorType, SlasherType};

/// Role assignments for a new vault
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleAssignments {
    /// Holder of the admin role; also the fallback for unset slots
    pub role_manager: Address,
    #[serde(default)]
    pub version_manager: Option<Address>,
    #[serde(default)]
    pub whitelist_manager: Option<Address>,
    #[serde(default)]
    pub limit_manager: Option<Address>,
    #[serde(default)]
    pub curator_fee_claimer: Option<Address>,
}

impl RoleAssignments {
    fn to_abi(&self) -> IVaultFactory::RoleParams {
        IVaultFactory::RoleParams {
            roleManager: self.role_manager,
            versionManager: self.version_manager.unwrap_or(self.role_manager),
            whitelistManager: self.whitelist_manager.unwrap_or(self.role_manager),
            limitManager: self.limit_manager.unwrap_or(self.role_manager),
            curatorFeeClaimer: self.curator_fee_claimer.unwrap_or(self.role_manager),
        }
    }
}

/// Curator fee settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CuratorFees {
    /// Fee in basis points
    pub fee_bps: u16,
    pub receiver: Address,
}

impl CuratorFees {
    fn to_abi(&self) -> IVaultFactory::FeeParams {
        IVaultFactory::FeeParams {
            curatorFee: self.fee_bps,
            curatorFeeReceiver: self.receiver,
        }
    }
}

/// Deposit limit and whitelist settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepositLimits {
    #[serde(default)]
    pub is_deposit_limit: bool,
    #[serde(default)]
    pub deposit_limit: U256,
    /// Private vaults only accept whitelisted depositors
    #[serde(default)]
    pub is_private_vault: bool,
}

impl DepositLimits {
    fn to_abi(&self) -> IVaultFactory::LimitParams {
        IVaultFactory::LimitParams {
            isDepositLimit: self.is_deposit_limit,
            depositLimit: self.deposit_limit,
            isPrivateVault: self.is_private_vault,
        }
    }
}

/// Share token settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareToken {
    /// Underlying collateral token
    pub asset: Address,
    pub name: String,
    pub symbol: String,
}

impl ShareToken {
    fn to_abi(&self) -> IVaultFactory::TokenParams {
        IVaultFactory::TokenParams {
            asset: self.asset,
            name: self.name.clone(),
            symbol: self.symbol.clone(),
        }
    }
}

/// Parameters common to every vault variant
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseVaultConfig {
    pub roles: RoleAssignments,
    #[serde(default)]
    pub fees: CuratorFees,
    #[serde(default)]
    pub limits: DepositLimits,
    pub token: ShareToken,
    #[serde(default)]
    pub metadata_uri: String,
}

impl BaseVaultConfig {
    fn to_abi(&self) -> IVaultFactory::BaseParams {
        IVaultFactory::BaseParams {
            roles: self.roles.to_abi(),
            fees: self.fees.to_abi(),
            limits: self.limits.to_abi(),
            token: self.token.to_abi(),
            metadataURI: self.metadata_uri.clone(),
        }
    }
}

/// Delegation settings for Symbiotic-family vaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DelegationConfig {
    pub delegator_type: DelegatorType,
    /// Required for operator-specific delegator types
    #[serde(default)]
    pub operator: Option<Address>,
    /// Required for network-specific delegator types
    #[serde(default)]
    pub network: Option<Address>,
}

impl Default for DelegationConfig {
    fn default() -> Self {
        Self {
            delegator_type: DelegatorType::NetworkRestake,
            operator: None,
            network: None,
        }
    }
}

impl DelegationConfig {
    fn to_abi(&self) -> IVaultFactory::DelegationParams {
        IVaultFactory::DelegationParams {
            delegatorType: self.delegator_type.type_id(),
            operator: self.operator.unwrap_or(Address::ZERO),
            network: self.network.unwrap_or(Address::ZERO),
        }
    }
}

/// Slasher settings for Symbiotic-family vaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlasherConfig {
    pub slasher_type: SlasherType,
    /// Veto window in seconds; ignored for instant slashers
    #[serde(default)]
    pub veto_duration_secs: u64,
    #[serde(default)]
    pub resolver_set_epochs_delay: U256,
}

impl Default for SlasherConfig {
    fn default() -> Self {
        Self {
            slasher_type: SlasherType::Instant,
            veto_duration_secs: 0,
            resolver_set_epochs_delay: U256::ZERO,
        }
    }
}

impl SlasherConfig {
    fn to_abi(&self) -> IVaultFactory::SlasherParams {
        IVaultFactory::SlasherParams {
            slasherType: self.slasher_type.type_id(),
            vetoDuration: U48::from(self.veto_duration_secs),
            resolverSetEpochsDelay: self.resolver_set_epochs_delay,
        }
    }
}

/// Burner router settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BurnerConfig {
    pub owner: Address,
    /// Receiver-change delay in seconds
    #[serde(default)]
    pub delay_secs: u64,
}

impl BurnerConfig {
    fn to_abi(&self) -> IVaultFactory::BurnerParams {
        IVaultFactory::BurnerParams {
            owner: self.owner,
            delay: U48::from(self.delay_secs),
        }
    }
}

/// Full parameter set for a Symbiotic-family vault
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SymVaultConfig {
    pub base: BaseVaultConfig,
    pub epoch_duration_secs: u64,
    #[serde(default)]
    pub delegation: DelegationConfig,
    #[serde(default)]
    pub slasher: SlasherConfig,
    #[serde(default)]
    pub burner: BurnerConfig,
}

impl SymVaultConfig {
    pub(crate) fn to_abi(&self) -> IVaultFactory::SymVaultParams {
        IVaultFactory::SymVaultParams {
            base: self.base.to_abi(),
            epochDuration: U48::from(self.epoch_duration_secs),
            delegation: self.delegation.to_abi(),
            slasher: self.slasher.to_abi(),
            burner: self.burner.to_abi(),
        }
    }
}

/// Full parameter set for an EigenLayer-family vault
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EigenVaultConfig {
    pub base: BaseVaultConfig,
    /// Operator the vault delegates its stake to
    pub operator: Address,
}

impl EigenVaultConfig {
    pub(crate) fn to_abi(&self) -> IVaultFactory::EigenVaultParams {
        IVaultFactory::EigenVaultParams {
            base: self.base.to_abi(),
            operator: self.operator,
        }
    }
}

/// Full parameter set for a composite SuperVault
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuperVaultConfig {
    pub base: BaseVaultConfig,
    pub epoch_duration_secs: u64,
    #[serde(default)]
    pub delegation: DelegationConfig,
    #[serde(default)]
    pub slasher: SlasherConfig,
    #[serde(default)]
    pub burner: BurnerConfig,
    /// Operator for the EigenLayer side
    pub eigen_operator: Address,
    /// Share of deposits routed to the Symbiotic side, in basis points
    pub sym_ratio_bps: u64,
}

impl SuperVaultConfig {
    pub(crate) fn to_abi(&self) -> IVaultFactory::SuperVaultParams {
        IVaultFactory::SuperVaultParams {
            base: self.base.to_abi(),
            epochDuration: U48::from(self.epoch_duration_secs),
            delegation: self.delegation.to_abi(),
            slasher: self.slasher.to_abi(),
            burner: self.burner.to_abi(),
            eigenOperator: self.eigen_operator,
            symRatio: U256::from(self.sym_ratio_bps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> BaseVaultConfig {
        BaseVaultConfig {
            roles: RoleAssignments {
                role_manager: Address::repeat_byte(0x01),
                limit_manager: Some(Address::repeat_byte(0x02)),
                ..Default::default()
            },
            fees: CuratorFees {
                fee_bps: 250,
                receiver: Address::repeat_byte(0x03),
            },
            limits: DepositLimits {
                is_deposit_limit: true,
                deposit_limit: U256::from(1_000_000u64),
                is_private_vault: false,
            },
            token: ShareToken {
                asset: Address::repeat_byte(0x04),
                name: "Wrapped Stake".to_string(),
                symbol: "wSTK".to_string(),
            },
            metadata_uri: "ipfs://QmExample".to_string(),
        }
    }

    #[test]
    fn test_unset_role_slots_fall_back_to_role_manager() {
        let abi = base_config().to_abi();
        assert_eq!(abi.roles.roleManager, Address::repeat_byte(0x01));
        assert_eq!(abi.roles.limitManager, Address::repeat_byte(0x02));
        // Unset slots inherit the role manager
        assert_eq!(abi.roles.versionManager, Address::repeat_byte(0x01));
        assert_eq!(abi.roles.whitelistManager, Address::repeat_byte(0x01));
    }

    #[test]
    fn test_sym_vault_params_nest_correctly() {
        let config = SymVaultConfig {
            base: base_config(),
            epoch_duration_secs: 7 * 24 * 3600,
            delegation: DelegationConfig {
                delegator_type: DelegatorType::OperatorSpecific,
                operator: Some(Address::repeat_byte(0x05)),
                network: None,
            },
            slasher: SlasherConfig {
                slasher_type: SlasherType::Veto,
                veto_duration_secs: 3 * 24 * 3600,
                resolver_set_epochs_delay: U256::from(3u64),
            },
            burner: BurnerConfig {
                owner: Address::repeat_byte(0x06),
                delay_secs: 1800,
            },
        };

        let abi = config.to_abi();
        assert_eq!(abi.epochDuration, U48::from(7 * 24 * 3600u64));
        assert_eq!(abi.delegation.delegatorType, 2);
        assert_eq!(abi.delegation.operator, Address::repeat_byte(0x05));
        assert_eq!(abi.delegation.network, Address::ZERO);
        assert_eq!(abi.slasher.slasherType, 1);
        assert_eq!(abi.slasher.vetoDuration, U48::from(3 * 24 * 3600u64));
        assert_eq!(abi.burner.owner, Address::repeat_byte(0x06));
        assert_eq!(abi.base.fees.curatorFee, 250);
        assert_eq!(abi.base.token.symbol, "wSTK");
    }

    #[test]
    fn test_super_vault_ratio_passthrough() {
        let config = SuperVaultConfig {
            base: base_config(),
            epoch_duration_secs: 3600,
            eigen_operator: Address::repeat_byte(0x07),
            sym_ratio_bps: 6000,
            ..Default::default()
        };

        let abi = config.to_abi();
        assert_eq!(abi.symRatio, U256::from(6000u64));
        assert_eq!(abi.eigenOperator, Address::repeat_byte(0x07));
        // Defaults: network-restake delegation, instant slashing
        assert_eq!(abi.delegation.delegatorType, 0);
        assert_eq!(abi.slasher.slasherType, 0);
    }
}
