//! Symbiotic Vault SDK
//!
//! Client SDK for Symbiotic restaking vaults, EigenLayer strategy vaults
//! and composite SuperVaults: capability-probing classification of
//! unknown vault addresses, derivation and caching of dependent contract
//! addresses, and uniform read/write call execution with pre-flight
//! simulation and error normalization.

pub mod cli;
pub mod client;
pub mod config;
pub mod contracts;
pub mod error;
pub mod metadata;
pub mod vault;

// Re-export commonly used types
pub use client::{
    ContractProvider, PendingTx, ProbeOutcome, SymbioticClient, TxOptions, VaultCacheEntry,
    VaultKind, VaultTypeClient,
};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use metadata::VaultMetadata;
pub use vault::delegation::{DelegatorType, SlasherInfo, SlasherType};
pub use vault::factory::CreatedVault;
pub use vault::params::{
    BaseVaultConfig, BurnerConfig, CuratorFees, DelegationConfig, DepositLimits,
    EigenVaultConfig, RoleAssignments, ShareToken, SlasherConfig, SuperVaultConfig,
    SymVaultConfig,
};
pub use vault::EpochInfo;
