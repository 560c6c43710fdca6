//! Revert decoding and error normalization
//!
//! The execution environment reports failures in several incompatible
//! shapes: decoded custom errors, `Error(string)` revert reasons, raw
//! ABI-encoded error data and plain transport messages. Everything is
//! folded into the two `Error` variants callers actually match on.

use alloy::contract::Error as ContractError;
use alloy::primitives::{keccak256, Bytes};
use alloy::sol_types::{Panic, Revert, SolError, SolInterface};
use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::contracts::abi::IVaultErrors;
use crate::error::Error;

lazy_static! {
    /// Error selectors of contracts outside the vault families (token and
    /// access-control libraries) that we recognize but do not fully decode.
    static ref KNOWN_ERROR_SELECTORS: HashMap<[u8; 4], &'static str> = {
        let entries: &[(&str, &str)] = &[
            (
                "OwnableUnauthorizedAccount(address)",
                "caller is not the owner",
            ),
            (
                "AccessControlUnauthorizedAccount(address,bytes32)",
                "caller is missing a required role",
            ),
            ("SafeERC20FailedOperation(address)", "token transfer failed"),
            (
                "ERC20InsufficientBalance(address,uint256,uint256)",
                "insufficient token balance",
            ),
            (
                "ERC20InsufficientAllowance(address,uint256,uint256)",
                "insufficient token allowance",
            ),
            (
                "ERC4626ExceededMaxDeposit(address,uint256,uint256)",
                "deposit exceeds the vault limit",
            ),
            (
                "ERC4626ExceededMaxWithdraw(address,uint256,uint256)",
                "withdrawal exceeds the available balance",
            ),
            (
                "ERC4626ExceededMaxRedeem(address,uint256,uint256)",
                "redemption exceeds the available shares",
            ),
        ];
        entries
            .iter()
            .map(|(signature, message)| (error_selector(signature), *message))
            .collect()
    };
}

/// First four bytes of keccak256 over the error signature
pub fn error_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Normalize a failed contract call into the SDK error shape
///
/// Checked in order, first match wins: declared custom error, revert
/// reason string, known raw selector, then the transport's own message.
pub fn normalize_call_error(method: &str, err: ContractError) -> Error {
    if let Some(data) = revert_data(&err) {
        if let Some(message) = normalize_revert_data(&data) {
            return Error::ContractRevert(message);
        }
    }

    Error::CallFailed {
        method: method.to_string(),
        message: call_error_message(&err),
    }
}

/// Decode raw revert data into a display message, if it is recognizable
pub fn normalize_revert_data(data: &[u8]) -> Option<String> {
    if let Ok(decoded) = IVaultErrors::IVaultErrorsErrors::abi_decode(data) {
        return Some(describe_custom_error(&decoded));
    }

    if let Ok(revert) = Revert::abi_decode(data) {
        return Some(revert.reason);
    }

    if let Ok(panic) = Panic::abi_decode(data) {
        return Some(format!("panic: {}", panic.code));
    }

    if data.len() >= 4 {
        let selector = [data[0], data[1], data[2], data[3]];
        if let Some(message) = KNOWN_ERROR_SELECTORS.get(&selector) {
            return Some((*message).to_string());
        }
    }

    None
}

/// Render a decoded custom error as `Name(arg1, arg2, ...)`
///
/// Addresses render as checksummed hex, integers as decimal text.
fn describe_custom_error(err: &IVaultErrors::IVaultErrorsErrors) -> String {
    use IVaultErrors::IVaultErrorsErrors as E;
    match err {
        E::NotAuthorized(e) => format!("NotAuthorized({})", e.account),
        E::DepositLimitReached(e) => {
            format!("DepositLimitReached({}, {})", e.limit, e.requested)
        }
        E::NotWhitelistedDepositor(e) => format!("NotWhitelistedDepositor({})", e.account),
        E::InvalidEpochDuration(e) => format!("InvalidEpochDuration({})", e.duration),
        E::InvalidDistributionRatio(e) => format!("InvalidDistributionRatio({})", e.ratio),
        E::VaultNotInitialized(e) => format!("VaultNotInitialized({})", e.vault),
        E::ZeroAddress(_) => "ZeroAddress()".to_string(),
        E::ZeroShares(_) => "ZeroShares()".to_string(),
    }
}

fn revert_data(err: &ContractError) -> Option<Bytes> {
    match err {
        ContractError::TransportError(transport) => transport
            .as_error_resp()
            .and_then(|payload| payload.as_revert_data()),
        _ => None,
    }
}

fn call_error_message(err: &ContractError) -> String {
    let message = match err {
        ContractError::TransportError(transport) => match transport.as_error_resp() {
            Some(payload) => payload.message.to_string(),
            None => transport.to_string(),
        },
        other => other.to_string(),
    };

    if message.trim().is_empty() {
        "Unknown error".to_string()
    } else {
        message
    }
}
