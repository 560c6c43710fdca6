//! CLI command implementations
//!
//! Thin glue over the SDK; every command builds a client, runs one or a
//! few SDK calls and prints the result.

use alloy::primitives::{Address, U256};
use anyhow::{Context, Result};
use tracing::info;

use crate::client::{SymbioticClient, TxOptions, VaultKind};
use crate::config::ClientConfig;
use crate::metadata::VaultMetadata;

fn parse_address(raw: &str) -> Result<Address> {
    raw.parse::<Address>()
        .with_context(|| format!("invalid address: {raw}"))
}

fn parse_amount(raw: &str) -> Result<U256> {
    raw.parse::<U256>()
        .with_context(|| format!("invalid amount: {raw}"))
}

/// Probe a vault address and print its variant
pub async fn classify(config: &ClientConfig, vault: &str) -> Result<()> {
    let client = SymbioticClient::connect(config.clone())?;
    let vault = parse_address(vault)?;

    let (kind, report) = client.contracts().prober().classify_with_report(vault).await;
    for (candidate, outcome) in &report {
        println!("  probe {candidate}: {outcome:?}");
    }
    match kind {
        Some(kind) => println!("{vault}: {kind}"),
        None => println!("{vault}: not a recognized vault"),
    }
    Ok(())
}

/// Resolve and print a vault's dependent contract addresses
pub async fn resolve(config: &ClientConfig, vault: &str) -> Result<()> {
    let client = SymbioticClient::connect(config.clone())?;
    let vault = parse_address(vault)?;

    let kind = client
        .vault_kind(vault)
        .await
        .context("not a recognized vault")?;
    println!("kind:      {kind}");

    if kind == VaultKind::EigenLayer {
        println!("(EigenLayer vaults have no sym-side sub-contracts)");
        return Ok(());
    }

    println!("sym vault: {}", client.contracts().sym_vault(vault).await?);
    println!("delegator: {}", client.contracts().delegator(vault).await?);
    println!("burner:    {}", client.contracts().burner(vault).await?);
    println!("slasher:   {}", client.contracts().slasher(vault).await?);
    Ok(())
}

/// Print a vault overview
pub async fn info(config: &ClientConfig, vault: &str) -> Result<()> {
    let client = SymbioticClient::connect(config.clone())?;
    let vault = parse_address(vault)?;

    let kind = client
        .vault_kind(vault)
        .await
        .context("not a recognized vault")?;

    println!("kind:          {kind}");
    println!("asset:         {}", client.asset(vault).await?);
    println!("total assets:  {}", client.total_assets(vault).await?);
    println!("total supply:  {}", client.total_supply(vault).await?);

    if client.is_deposit_limit(vault).await? {
        println!("deposit limit: {}", client.deposit_limit(vault).await?);
    } else {
        println!("deposit limit: none");
    }
    println!(
        "whitelist:     {}",
        client.is_deposit_whitelist(vault).await?
    );

    let uri = client.metadata_uri(vault).await?;
    if !uri.is_empty() {
        println!("metadata URI:  {uri}");
    }

    if kind != VaultKind::EigenLayer {
        let epochs = client.epoch_info(vault).await?;
        println!(
            "epoch:         {} ({}s each, current started at {})",
            epochs.current_epoch, epochs.epoch_duration, epochs.current_epoch_start
        );
        println!("active stake:  {}", client.active_stake(vault).await?);

        let delegator_type = client.delegator_type(vault).await?;
        println!("delegator:     {delegator_type:?}");
        if let Some(operator) = client.delegator_operator(vault).await? {
            println!("operator:      {operator}");
        }
        if let Some(network) = client.delegator_network(vault).await? {
            println!("network:       {network}");
        }

        let slasher = client.slasher_info(vault).await?;
        println!("slasher:       {:?}", slasher.slasher_type);
        if slasher.veto_duration > 0 {
            println!("veto window:   {}s", slasher.veto_duration);
        }
    }

    Ok(())
}

/// Deposit assets into a vault
pub async fn deposit(
    config: &ClientConfig,
    vault: &str,
    amount: &str,
    receiver: Option<&str>,
) -> Result<()> {
    let client = SymbioticClient::connect(config.clone())?;
    let vault = parse_address(vault)?;
    let amount = parse_amount(amount)?;
    let receiver = match receiver {
        Some(raw) => parse_address(raw)?,
        None => client
            .signer()
            .context("no receiver given and no signer configured")?,
    };

    info!(%vault, %amount, %receiver, "depositing");
    let pending = client
        .deposit(vault, amount, receiver, TxOptions::default())
        .await?;
    println!("submitted: {}", pending.tx_hash());

    let receipt = pending.confirmed().await?;
    println!(
        "confirmed in block {}",
        receipt.block_number.unwrap_or_default()
    );
    Ok(())
}

/// Withdraw assets from a vault
pub async fn withdraw(
    config: &ClientConfig,
    vault: &str,
    amount: &str,
    receiver: Option<&str>,
) -> Result<()> {
    let client = SymbioticClient::connect(config.clone())?;
    let vault = parse_address(vault)?;
    let amount = parse_amount(amount)?;
    let owner = client.signer().context("withdraw requires a signer")?;
    let receiver = match receiver {
        Some(raw) => parse_address(raw)?,
        None => owner,
    };

    info!(%vault, %amount, %receiver, "withdrawing");
    let pending = client
        .withdraw(vault, amount, receiver, owner, TxOptions::default())
        .await?;
    println!("submitted: {}", pending.tx_hash());

    let receipt = pending.confirmed().await?;
    println!(
        "confirmed in block {}",
        receipt.block_number.unwrap_or_default()
    );
    Ok(())
}

/// Validate, store and set vault metadata from a JSON file
pub async fn set_metadata(config: &ClientConfig, vault: &str, file: &str) -> Result<()> {
    let client = SymbioticClient::connect(config.clone())?;
    let vault = parse_address(vault)?;

    let raw = std::fs::read_to_string(file).with_context(|| format!("reading {file}"))?;
    let metadata: VaultMetadata =
        serde_json::from_str(&raw).with_context(|| format!("parsing {file}"))?;

    let (uri, pending) = client
        .set_metadata(vault, &metadata, TxOptions::default())
        .await?;
    println!("stored:    {uri}");
    println!("submitted: {}", pending.tx_hash());
    pending.confirmed().await?;
    println!("confirmed");
    Ok(())
}

/// Show current configuration (secrets masked)
pub fn show_config(config: &ClientConfig) -> Result<()> {
    println!("rpc.endpoint:      {}", config.rpc.endpoint);
    println!("contracts.factory: {}", config.contracts.factory);
    println!(
        "wallet:            {}",
        if config.wallet.private_key.as_deref().is_some_and(|k| !k.is_empty()) {
            "configured (masked)"
        } else {
            "not configured (read-only)"
        }
    );
    println!(
        "ipfs:              {}",
        if config.ipfs.is_configured() {
            "pinning configured (token masked)"
        } else {
            "data-URI fallback"
        }
    );
    println!("gas.create_vault:  {}", config.gas.create_vault);
    println!("gas.deposit:       {}", config.gas.deposit);
    println!("gas.withdraw:      {}", config.gas.withdraw);
    Ok(())
}
