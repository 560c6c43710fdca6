//! Read/write call execution
//!
//! Reads go straight through. State-changing calls are dry-run via
//! `eth_call` first with the exact same calldata; a failing simulation
//! aborts before any transaction is submitted, so no gas is spent on a
//! call that is certain to revert.

use alloy::contract::{CallBuilder, CallDecoder};
use alloy::network::Ethereum;
use alloy::primitives::{TxHash, U256};
use alloy::providers::{PendingTransactionBuilder, Provider};
use alloy::rpc::types::TransactionReceipt;
use tracing::{debug, warn};

use crate::contracts::revert::normalize_call_error;
use crate::error::{Error, Result};

/// Transaction-shaping options
///
/// All fields are optional; unset fields are left to the provider's fee
/// estimation. Options are excluded from the pre-flight simulation and
/// applied to the real submission only.
#[derive(Debug, Clone, Default)]
pub struct TxOptions {
    pub gas_limit: Option<u64>,
    pub gas_price: Option<u128>,
    pub max_fee_per_gas: Option<u128>,
    pub max_priority_fee_per_gas: Option<u128>,
    pub value: Option<U256>,
    pub nonce: Option<u64>,
}

impl TxOptions {
    /// Fall back to a per-operation default gas limit when the caller did
    /// not set one
    pub(crate) fn or_gas_limit(mut self, default_limit: u64) -> Self {
        if self.gas_limit.is_none() {
            self.gas_limit = Some(default_limit);
        }
        self
    }

    fn apply<P, D>(&self, mut call: CallBuilder<P, D, Ethereum>) -> CallBuilder<P, D, Ethereum>
    where
        P: Provider,
        D: CallDecoder,
    {
        if let Some(gas) = self.gas_limit {
            call = call.gas(gas);
        }
        if let Some(price) = self.gas_price {
            call = call.gas_price(price);
        }
        if let Some(max_fee) = self.max_fee_per_gas {
            call = call.max_fee_per_gas(max_fee);
        }
        if let Some(priority) = self.max_priority_fee_per_gas {
            call = call.max_priority_fee_per_gas(priority);
        }
        if let Some(value) = self.value {
            call = call.value(value);
        }
        if let Some(nonce) = self.nonce {
            call = call.nonce(nonce);
        }
        call
    }
}

/// Execute a read-only call, normalizing any failure
pub(crate) async fn read_call<P, D>(
    method: &'static str,
    call: CallBuilder<P, D, Ethereum>,
) -> Result<D::CallOutput>
where
    P: Provider,
    D: CallDecoder + Unpin,
{
    debug!(method, "contract read");
    call.call()
        .await
        .map_err(|err| normalize_call_error(method, err))
}

/// Simulate a state-changing call, then submit it
///
/// The simulation runs without the transaction-shaping options; if it
/// fails, the error is raised and nothing is submitted.
pub(crate) async fn write_call<P, D>(
    method: &'static str,
    call: CallBuilder<P, D, Ethereum>,
    opts: &TxOptions,
) -> Result<PendingTx>
where
    P: Provider,
    D: CallDecoder + Unpin,
{
    debug!(method, "simulating before send");
    if let Err(err) = call.call().await {
        warn!(method, "simulation rejected, transaction not submitted");
        return Err(normalize_call_error(method, err));
    }

    let call = opts.apply(call);
    let pending = call
        .send()
        .await
        .map_err(|err| normalize_call_error(method, err))?;

    debug!(method, tx_hash = %pending.tx_hash(), "transaction submitted");
    Ok(PendingTx {
        method,
        inner: pending,
    })
}

/// Handle to a submitted transaction awaiting confirmation
pub struct PendingTx {
    method: &'static str,
    inner: PendingTransactionBuilder<Ethereum>,
}

impl PendingTx {
    /// Hash of the submitted transaction
    pub fn tx_hash(&self) -> TxHash {
        *self.inner.tx_hash()
    }

    /// Name of the contract method that produced this transaction
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Wait for the transaction to be mined and return its receipt
    pub async fn confirmed(self) -> Result<TransactionReceipt> {
        self.inner
            .get_receipt()
            .await
            .map_err(|err| Error::Confirmation(format!("{}: {}", self.method, err)))
    }
}

impl std::fmt::Debug for PendingTx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingTx")
            .field("method", &self.method)
            .field("tx_hash", &self.tx_hash())
            .finish()
    }
}
