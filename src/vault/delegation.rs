//! Delegator, burner and slasher queries
//!
//! These sub-contracts are reachable only through address derivation on
//! the underlying sym vault; the resolver cache keeps the hops cheap.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::client::executor::read_call;
use crate::client::SymbioticClient;
use crate::contracts::abi::{IBurnerRouter, IDelegator, ISlasher};
use crate::error::{Error, Result};

/// Known delegator contract variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelegatorType {
    NetworkRestake,
    FullRestake,
    OperatorSpecific,
    OperatorNetworkSpecific,
}

impl DelegatorType {
    pub fn from_type_id(id: u64) -> Option<Self> {
        match id {
            0 => Some(DelegatorType::NetworkRestake),
            1 => Some(DelegatorType::FullRestake),
            2 => Some(DelegatorType::OperatorSpecific),
            3 => Some(DelegatorType::OperatorNetworkSpecific),
            _ => None,
        }
    }

    pub fn type_id(self) -> u64 {
        match self {
            DelegatorType::NetworkRestake => 0,
            DelegatorType::FullRestake => 1,
            DelegatorType::OperatorSpecific => 2,
            DelegatorType::OperatorNetworkSpecific => 3,
        }
    }

    /// Whether this delegator pins a single operator
    pub fn has_operator(self) -> bool {
        matches!(
            self,
            DelegatorType::OperatorSpecific | DelegatorType::OperatorNetworkSpecific
        )
    }

    /// Whether this delegator pins a single network
    pub fn has_network(self) -> bool {
        matches!(self, DelegatorType::OperatorNetworkSpecific)
    }
}

/// Known slasher contract variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlasherType {
    Instant,
    Veto,
}

impl SlasherType {
    pub fn from_type_id(id: u64) -> Option<Self> {
        match id {
            0 => Some(SlasherType::Instant),
            1 => Some(SlasherType::Veto),
            _ => None,
        }
    }

    pub fn type_id(self) -> u64 {
        match self {
            SlasherType::Instant => 0,
            SlasherType::Veto => 1,
        }
    }
}

/// Slashing parameters read off a slasher contract
#[derive(Debug, Clone)]
pub struct SlasherInfo {
    /// `None` for type ids this SDK does not know
    pub slasher_type: Option<SlasherType>,
    /// Veto window in seconds; zero for instant slashers
    pub veto_duration: u64,
    /// Epochs a resolver change is delayed by; zero for instant slashers
    pub resolver_set_epochs_delay: U256,
}

impl SymbioticClient {
    /// Variant of the vault's delegator contract
    pub async fn delegator_type(&self, vault: Address) -> Result<DelegatorType> {
        let delegator = self.contracts().delegator(vault).await?;
        let handle = IDelegator::new(delegator, self.provider().clone());
        let id = read_call("TYPE", handle.TYPE()).await?;
        DelegatorType::from_type_id(id).ok_or_else(|| Error::CallFailed {
            method: "TYPE".to_string(),
            message: format!("unknown delegator type {id}"),
        })
    }

    /// Operator pinned by the delegator, for operator-specific variants
    ///
    /// Returns `None` for variants that delegate across many operators.
    pub async fn delegator_operator(&self, vault: Address) -> Result<Option<Address>> {
        let kind = self.delegator_type(vault).await?;
        if !kind.has_operator() {
            return Ok(None);
        }
        let delegator = self.contracts().delegator(vault).await?;
        let handle = IDelegator::new(delegator, self.provider().clone());
        Ok(Some(read_call("operator", handle.operator()).await?))
    }

    /// Network pinned by the delegator, for network-specific variants
    pub async fn delegator_network(&self, vault: Address) -> Result<Option<Address>> {
        let kind = self.delegator_type(vault).await?;
        if !kind.has_network() {
            return Ok(None);
        }
        let delegator = self.contracts().delegator(vault).await?;
        let handle = IDelegator::new(delegator, self.provider().clone());
        Ok(Some(read_call("network", handle.network()).await?))
    }

    /// Owner of the vault's burner router
    pub async fn burner_owner(&self, vault: Address) -> Result<Address> {
        let burner = self.contracts().burner(vault).await?;
        let handle = IBurnerRouter::new(burner, self.provider().clone());
        read_call("owner", handle.owner()).await
    }

    /// Slashing parameters of the vault's slasher contract
    pub async fn slasher_info(&self, vault: Address) -> Result<SlasherInfo> {
        let slasher = self.contracts().slasher(vault).await?;
        let handle = ISlasher::new(slasher, self.provider().clone());
        let type_id = read_call("TYPE", handle.TYPE()).await?;
        let slasher_type = SlasherType::from_type_id(type_id);

        match slasher_type {
            Some(SlasherType::Veto) => {
                let veto = read_call("vetoDuration", handle.vetoDuration()).await?;
                let delay =
                    read_call("resolverSetEpochsDelay", handle.resolverSetEpochsDelay()).await?;
                Ok(SlasherInfo {
                    slasher_type,
                    veto_duration: veto.to::<u64>(),
                    resolver_set_epochs_delay: delay,
                })
            }
            _ => Ok(SlasherInfo {
                slasher_type,
                veto_duration: 0,
                resolver_set_epochs_delay: U256::ZERO,
            }),
        }
    }
}
