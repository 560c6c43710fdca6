//! CLI support for the vaultctl binary

pub mod commands;
