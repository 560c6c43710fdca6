//! Contract ABI surface and revert decoding

pub mod abi;
pub mod revert;
