//! Vault variant probing
//!
//! The vault families share no discoverable type tag, so an unknown
//! address is classified by attempting variant-specific reads and
//! observing which succeed. Probes run in a fixed order, first match
//! wins, and a single failure is conclusive for that branch.

use alloy::primitives::Address;
use alloy::providers::DynProvider;
use std::fmt;
use tracing::debug;

use crate::contracts::abi::{IEigenByzVault, ISuperVault, ISymbioticByzVault};

/// Vault variant tag derived from probing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VaultKind {
    Symbiotic,
    EigenLayer,
    SuperVault,
}

impl fmt::Display for VaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaultKind::Symbiotic => write!(f, "symbiotic"),
            VaultKind::EigenLayer => write!(f, "eigenlayer"),
            VaultKind::SuperVault => write!(f, "supervault"),
        }
    }
}

/// Outcome of a single probe
///
/// A failed probe cannot tell "the contract lacks this selector" apart
/// from "the selector exists but the call reverted for another reason";
/// the failure detail is retained so callers can at least see what came
/// back instead of silently treating both the same.
#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Matched,
    /// The probe call failed, or its result failed validation
    Rejected(String),
}

impl ProbeOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, ProbeOutcome::Matched)
    }
}

/// Capability prober classifying unknown addresses into vault variants
#[derive(Clone)]
pub struct VaultTypeClient {
    provider: DynProvider,
}

impl VaultTypeClient {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }

    /// Classify `vault`, returning `None` when no variant matches
    ///
    /// `None` is an ordinary outcome, not an error; callers that require
    /// a definite type must surface "not a recognized vault" themselves.
    pub async fn classify(&self, vault: Address) -> Option<VaultKind> {
        self.classify_with_report(vault).await.0
    }

    /// Classify `vault` and report each attempted probe's outcome, in
    /// probe order
    pub async fn classify_with_report(
        &self,
        vault: Address,
    ) -> (Option<VaultKind>, Vec<(VaultKind, ProbeOutcome)>) {
        let mut report = Vec::with_capacity(3);

        let outcome = self.probe_symbiotic(vault).await;
        let matched = outcome.is_match();
        report.push((VaultKind::Symbiotic, outcome));
        if matched {
            return (Some(VaultKind::Symbiotic), report);
        }

        let outcome = self.probe_eigenlayer(vault).await;
        let matched = outcome.is_match();
        report.push((VaultKind::EigenLayer, outcome));
        if matched {
            return (Some(VaultKind::EigenLayer), report);
        }

        let outcome = self.probe_supervault(vault).await;
        let matched = outcome.is_match();
        report.push((VaultKind::SuperVault, outcome));
        if matched {
            return (Some(VaultKind::SuperVault), report);
        }

        debug!(%vault, ?report, "no vault variant matched");
        (None, report)
    }

    async fn probe_symbiotic(&self, vault: Address) -> ProbeOutcome {
        let handle = ISymbioticByzVault::new(vault, self.provider.clone());
        match handle.symVault().call().await {
            Ok(_) => ProbeOutcome::Matched,
            Err(err) => ProbeOutcome::Rejected(err.to_string()),
        }
    }

    async fn probe_eigenlayer(&self, vault: Address) -> ProbeOutcome {
        let handle = IEigenByzVault::new(vault, self.provider.clone());
        if handle.delegationOperator().call().await.is_ok() {
            return ProbeOutcome::Matched;
        }
        // Older EigenLayer vaults expose the strategy but not the
        // delegation operator; try that before giving up on the branch.
        match handle.eigenStrategy().call().await {
            Ok(_) => ProbeOutcome::Matched,
            Err(err) => ProbeOutcome::Rejected(err.to_string()),
        }
    }

    async fn probe_supervault(&self, vault: Address) -> ProbeOutcome {
        let handle = ISuperVault::new(vault, self.provider.clone());
        match handle.distributionRatio().call().await {
            Ok(ratio) if !ratio.is_empty() => ProbeOutcome::Matched,
            Ok(_) => ProbeOutcome::Rejected("distribution ratio is empty".to_string()),
            Err(err) => ProbeOutcome::Rejected(err.to_string()),
        }
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
    async fn test_symbiotic_probe_runs_first() {
        let asserter = Asserter::new();
        let prober = VaultTypeClient::new(mocked(&asserter));

        // One queued response: the symVault() probe. Nothing else is
        // consumed, proving later probes were never attempted.
        asserter.push_success(&encoded_address(0xaa));

        let (kind, report) = prober
            .classify_with_report(Address::repeat_byte(0x01))
            .await;
        assert_eq!(kind, Some(VaultKind::Symbiotic));
        assert_eq!(report.len(), 1);
        assert!(report[0].1.is_match());
    }

    #[tokio::test]
    async fn test_eigenlayer_matched_on_first_probe() {
        let asserter = Asserter::new();
        let prober = VaultTypeClient::new(mocked(&asserter));

        asserter.push_failure_msg("execution reverted".to_string());
        asserter.push_success(&encoded_address(0xbb));

        let kind = prober.classify(Address::repeat_byte(0x01)).await;
        assert_eq!(kind, Some(VaultKind::EigenLayer));
    }

    #[tokio::test]
    async fn test_eigenlayer_matched_on_strategy_fallback() {
        let asserter = Asserter::new();
        let prober = VaultTypeClient::new(mocked(&asserter));

        asserter.push_failure_msg("execution reverted".to_string());
        asserter.push_failure_msg("execution reverted".to_string());
        asserter.push_success(&encoded_address(0xcc));

        let kind = prober.classify(Address::repeat_byte(0x01)).await;
        assert_eq!(kind, Some(VaultKind::EigenLayer));
    }

    #[tokio::test]
    async fn test_supervault_requires_nonempty_ratio() {
        let asserter = Asserter::new();
        let prober = VaultTypeClient::new(mocked(&asserter));

        // symVault, delegationOperator, eigenStrategy all revert
        for _ in 0..3 {
            asserter.push_failure_msg("execution reverted".to_string());
        }
        asserter.push_success(&Bytes::from(
            vec![U256::from(60u64), U256::from(40u64)].abi_encode(),
        ));

        let kind = prober.classify(Address::repeat_byte(0x01)).await;
        assert_eq!(kind, Some(VaultKind::SuperVault));
    }

    #[tokio::test]
    async fn test_empty_ratio_is_not_a_supervault() {
        let asserter = Asserter::new();
        let prober = VaultTypeClient::new(mocked(&asserter));

        for _ in 0..3 {
            asserter.push_failure_msg("execution reverted".to_string());
        }
        asserter.push_success(&Bytes::from(Vec::<U256>::new().abi_encode()));

        let (kind, report) = prober
            .classify_with_report(Address::repeat_byte(0x01))
            .await;
        assert_eq!(kind, None);
        match &report[2].1 {
            ProbeOutcome::Rejected(reason) => assert!(reason.contains("empty")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unrecognized_when_all_probes_fail() {
        let asserter = Asserter::new();
        let prober = VaultTypeClient::new(mocked(&asserter));

        for _ in 0..4 {
            asserter.push_failure_msg("execution reverted".to_string());
        }

        let (kind, report) = prober
            .classify_with_report(Address::repeat_byte(0x01))
            .await;
        assert_eq!(kind, None);
        assert_eq!(report.len(), 3);
    }

    // A genuinely Symbiotic vault whose probe reverts for an unrelated
    // runtime reason is indistinguishable from a non-Symbiotic contract;
    // the report keeps the revert detail but the classification is lost.
    #[tokio::test]
    async fn test_runtime_revert_is_misclassified_as_mismatch() {
        let asserter = Asserter::new();
        let prober = VaultTypeClient::new(mocked(&asserter));

        asserter.push_failure_msg("execution reverted: vault paused".to_string());
        for _ in 0..3 {
            asserter.push_failure_msg("execution reverted".to_string());
        }

        let (kind, report) = prober
            .classify_with_report(Address::repeat_byte(0x01))
            .await;
        assert_eq!(kind, None);
        match &report[0].1 {
            ProbeOutcome::Rejected(reason) => assert!(reason.contains("vault paused")),
            other => panic!("unexpected outcome: {other:?}"),
        }
    }
}
