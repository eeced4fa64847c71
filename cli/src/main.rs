// Copyright (c) 2026 Strongroom Labs. MIT License.
// See LICENSE for details.

//! # Strongroom CLI
//!
//! Entry point for the `strongroom` binary. Parses arguments,
//! initializes logging, loads the world snapshot from the data
//! directory, runs one vault operation (or report), and writes the
//! world back atomically.
//!
//! Stdout carries the formatted reports; all diagnostics go to stderr
//! via `tracing` so the reports stay pipeable.

mod amount;
mod cli;
mod logging;
mod report;
mod world;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::{Path, PathBuf};

use strongroom_ledger::address::Address;
use strongroom_ledger::keys::Keypair;
use strongroom_ledger::store::Store;
use strongroom_vault::shares::amount_for_shares;
use strongroom_vault::state::vault_state_address;

use cli::{Commands, StrongroomCli, WalletCommands};
use logging::LogFormat;
use world::World;

fn main() -> Result<()> {
    let cli = StrongroomCli::parse();
    logging::init_logging("strongroom=info,strongroom_vault=info", LogFormat::Pretty);

    let data_dir = expand_home(&cli.data_dir);
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory: {}", data_dir.display()))?;
    let wallet_path = cli
        .wallet
        .map(|p| expand_home(&p))
        .unwrap_or_else(|| data_dir.join("wallet.json"));

    match cli.command {
        Commands::Wallet(WalletCommands::New { force }) => wallet_new(&wallet_path, force),
        Commands::Wallet(WalletCommands::Address) => {
            wallet_address(&open_store(&data_dir)?, &wallet_path)
        }
        Commands::Airdrop { amount } => airdrop(&open_store(&data_dir)?, &wallet_path, &amount),
        Commands::Register => register(&open_store(&data_dir)?, &wallet_path),
        Commands::Join { vault } => join(&open_store(&data_dir)?, &wallet_path, &vault),
        Commands::Fund { amount } => fund(&open_store(&data_dir)?, &wallet_path, &amount),
        Commands::Deposit { vault, amount } => {
            deposit(&open_store(&data_dir)?, &wallet_path, &vault, &amount)
        }
        Commands::Withdraw { vault } => withdraw(&open_store(&data_dir)?, &wallet_path, &vault),
        Commands::Transfer { to, amount } => {
            transfer(&open_store(&data_dir)?, &wallet_path, &to, &amount)
        }
        Commands::Settings {
            lock_days,
            min_deposit,
        } => settings(&open_store(&data_dir)?, &wallet_path, lock_days, min_deposit),
        Commands::Status { vault } => status(&open_store(&data_dir)?, &wallet_path, vault),
        Commands::Position { vault } => position(&open_store(&data_dir)?, &wallet_path, &vault),
        Commands::Depositors { vault } => depositors(&open_store(&data_dir)?, &wallet_path, vault),
    }
}

// ---------------------------------------------------------------------------
// Plumbing
// ---------------------------------------------------------------------------

/// Expand a leading `~` to `$HOME`, leaving other paths untouched.
fn expand_home(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(stripped);
        }
    }
    path.to_path_buf()
}

fn open_store(data_dir: &Path) -> Result<Store> {
    let path = data_dir.join("store");
    Store::open(&path).with_context(|| format!("failed to open store at {}", path.display()))
}

fn load_wallet(path: &Path) -> Result<Keypair> {
    Keypair::read_from_file(path).with_context(|| {
        format!(
            "failed to load wallet from {} (run `strongroom wallet new` first?)",
            path.display()
        )
    })
}

fn parse_address(s: &str) -> Result<Address> {
    s.parse::<Address>()
        .with_context(|| format!("invalid address: {}", s))
}

fn now() -> i64 {
    Utc::now().timestamp()
}

// ---------------------------------------------------------------------------
// Wallet & Faucet
// ---------------------------------------------------------------------------

fn wallet_new(wallet_path: &Path, force: bool) -> Result<()> {
    if wallet_path.exists() && !force {
        bail!(
            "wallet already exists at {} (use --force to overwrite)",
            wallet_path.display()
        );
    }

    let keypair = Keypair::generate();
    keypair.write_to_file(wallet_path)?;
    tracing::info!(path = %wallet_path.display(), "wallet written");

    report::title("WALLET CREATED");
    report::kv("Address", keypair.address());
    report::kv("Public key", keypair.verifying_key_hex());
    report::kv("File", wallet_path.display());
    report::heavy_rule();
    Ok(())
}

fn wallet_address(store: &Store, wallet_path: &Path) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let world = World::load(store)?;
    let addr = keypair.address();

    report::title("MY ACCOUNT");
    report::kv("Address", addr);
    report::kv("Balance", report::grains_and_strg(world.coins.balance_of(&addr)));
    report::heavy_rule();
    Ok(())
}

fn airdrop(store: &Store, wallet_path: &Path, amount: &str) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let grains = amount::parse_strg(amount)?;

    let mut world = World::load(store)?;
    let addr = keypair.address();
    let balance = world.coins.credit(&addr, grains)?;
    world.save(store)?;
    tracing::info!(address = %addr, grains, "airdrop credited");

    report::title("AIRDROP");
    report::kv("Address", addr);
    report::kv("Credited", report::strg(grains));
    report::kv("New balance", report::grains_and_strg(balance));
    report::heavy_rule();
    Ok(())
}

// ---------------------------------------------------------------------------
// Owner Operations
// ---------------------------------------------------------------------------

fn register(store: &Store, wallet_path: &Path) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let owner = keypair.address();

    let mut world = World::load(store)?;
    let vault = world.engine.register(&mut world.shares, owner)?;
    world.save(store)?;
    tracing::info!(owner = %owner, "vault registered");

    report::title("VAULT REGISTRATION");
    report::kv("Owner", vault.owner);
    report::kv("Vault account", vault.coin_account());
    report::kv("Share mint", vault.share_mint);
    report::light_rule();
    report::kv("Balance", report::grains_and_strg(vault.balance));
    report::kv("Lock period", report::lock_window(vault.lock_period));
    report::kv("Min deposit", report::strg(vault.min_deposit));
    report::heavy_rule();
    Ok(())
}

fn fund(store: &Store, wallet_path: &Path, amount: &str) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let owner = keypair.address();
    let grains = amount::parse_strg(amount)?;

    let mut world = World::load(store)?;
    let balance = world.engine.deposit(&mut world.coins, owner, grains)?;
    world.save(store)?;
    tracing::info!(owner = %owner, grains, "owner deposit");

    report::title("OWNER DEPOSIT");
    report::kv("Owner", owner);
    report::kv("Deposited", report::strg(grains));
    report::kv("Vault balance", report::grains_and_strg(balance));
    report::heavy_rule();
    Ok(())
}

fn transfer(store: &Store, wallet_path: &Path, to: &str, amount: &str) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let owner = keypair.address();
    let destination = parse_address(to)?;
    let grains = amount::parse_strg(amount)?;

    let mut world = World::load(store)?;
    let balance = world
        .engine
        .admin_transfer(&mut world.coins, owner, owner, destination, grains)?;
    world.save(store)?;
    tracing::info!(owner = %owner, to = %destination, grains, "admin transfer");

    report::title("ADMIN TRANSFER");
    report::kv("From vault", vault_state_address(&owner));
    report::kv("To", destination);
    report::kv("Amount", report::strg(grains));
    report::kv("Vault balance", report::grains_and_strg(balance));
    report::heavy_rule();
    Ok(())
}

fn settings(
    store: &Store,
    wallet_path: &Path,
    lock_days: Option<u32>,
    min_deposit: Option<String>,
) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let owner = keypair.address();
    let mut world = World::load(store)?;

    let current = world
        .engine
        .vault(&owner)
        .context("no vault registered for this wallet")?
        .clone();

    if lock_days.is_none() && min_deposit.is_none() {
        report::title("VAULT SETTINGS");
        report::kv("Owner", owner);
        report::kv("Lock period", report::lock_window(current.lock_period));
        report::kv("Min deposit", report::strg(current.min_deposit));
        report::heavy_rule();
        return Ok(());
    }

    let new_lock = match lock_days {
        Some(days) => i64::from(days) * strongroom_vault::params::SECS_PER_DAY,
        None => current.lock_period,
    };
    let new_min = match min_deposit {
        Some(s) => amount::parse_strg(&s)?,
        None => current.min_deposit,
    };

    let updated = world.engine.update_settings(owner, owner, new_lock, new_min)?;
    world.save(store)?;
    tracing::info!(owner = %owner, lock_period = updated.lock_period, min_deposit = updated.min_deposit, "settings updated");

    report::title("VAULT SETTINGS UPDATED");
    report::kv("Owner", owner);
    report::kv("Lock period", report::lock_window(updated.lock_period));
    report::kv("Min deposit", report::strg(updated.min_deposit));
    report::heavy_rule();
    Ok(())
}

// ---------------------------------------------------------------------------
// Depositor Operations
// ---------------------------------------------------------------------------

fn join(store: &Store, wallet_path: &Path, vault: &str) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let depositor = keypair.address();
    let vault_owner = parse_address(vault)?;

    let mut world = World::load(store)?;
    let position = world.engine.register_depositor(depositor, vault_owner)?;
    world.save(store)?;
    tracing::info!(depositor = %depositor, vault_owner = %vault_owner, "depositor registered");

    report::title("DEPOSITOR REGISTRATION");
    report::kv("Depositor", position.depositor);
    report::kv("Vault owner", position.vault_owner);
    report::kv("Locked", report::strg(position.locked_amount));
    report::heavy_rule();
    Ok(())
}

fn deposit(store: &Store, wallet_path: &Path, vault: &str, amount: &str) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let depositor = keypair.address();
    let vault_owner = parse_address(vault)?;
    let grains = amount::parse_strg(amount)?;

    let mut world = World::load(store)?;
    let receipt = world.engine.deposit_by_depositor(
        &mut world.coins,
        &mut world.shares,
        depositor,
        vault_owner,
        grains,
        now(),
    )?;
    world.save(store)?;
    tracing::info!(
        depositor = %depositor,
        vault_owner = %vault_owner,
        grains,
        shares = receipt.shares_minted,
        "depositor deposit"
    );

    report::title("DEPOSIT");
    report::kv("Depositor", depositor);
    report::kv("Deposited", report::strg(grains));
    report::kv("Shares minted", receipt.shares_minted);
    report::kv("Total locked", report::grains_and_strg(receipt.locked_amount));
    report::kv("Unlocks at", report::timestamp(receipt.unlock_time));
    report::kv("Vault balance", report::grains_and_strg(receipt.vault_balance));
    report::heavy_rule();
    Ok(())
}

fn withdraw(store: &Store, wallet_path: &Path, vault: &str) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let depositor = keypair.address();
    let vault_owner = parse_address(vault)?;

    let mut world = World::load(store)?;
    let receipt = world.engine.withdraw(
        &mut world.coins,
        &mut world.shares,
        depositor,
        vault_owner,
        now(),
    )?;
    world.save(store)?;
    tracing::info!(
        depositor = %depositor,
        vault_owner = %vault_owner,
        grains = receipt.amount,
        shares = receipt.shares_burned,
        "withdrawal"
    );

    report::title("WITHDRAWAL");
    report::kv("Depositor", depositor);
    report::kv("Paid out", report::grains_and_strg(receipt.amount));
    report::kv("Shares burned", receipt.shares_burned);
    report::kv("Wallet balance", report::grains_and_strg(world.coins.balance_of(&depositor)));
    report::kv("Vault balance", report::grains_and_strg(receipt.vault_balance));
    report::heavy_rule();
    Ok(())
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

fn status(store: &Store, wallet_path: &Path, vault: Option<String>) -> Result<()> {
    let world = World::load(store)?;
    let owner = match vault {
        Some(s) => parse_address(&s)?,
        None => load_wallet(wallet_path)?.address(),
    };
    let vault = world
        .engine
        .vault(&owner)
        .context("vault not found for this owner")?;

    report::title("VAULT STATE");
    report::kv("Owner", vault.owner);
    report::kv("Vault account", vault.coin_account());
    report::kv("Share mint", vault.share_mint);
    report::light_rule();
    report::kv("Balance", report::grains_and_strg(vault.balance));
    report::kv("Holdings", report::grains_and_strg(world.coins.balance_of(&vault.coin_account())));
    report::kv("Share supply", world.shares.total_supply(&vault.share_mint));
    report::kv("Share price", report::strg(strongroom_vault::params::SHARE_PRICE_GRAINS));
    report::light_rule();
    report::kv("Lock period", report::lock_window(vault.lock_period));
    report::kv("Min deposit", report::strg(vault.min_deposit));
    report::kv("Depositors", world.engine.positions_for(&owner).count());
    report::heavy_rule();
    Ok(())
}

fn position(store: &Store, wallet_path: &Path, vault: &str) -> Result<()> {
    let keypair = load_wallet(wallet_path)?;
    let depositor = keypair.address();
    let vault_owner = parse_address(vault)?;

    let world = World::load(store)?;
    let vault = world
        .engine
        .vault(&vault_owner)
        .context("vault not found for this owner")?;
    let position = world
        .engine
        .position(&depositor, &vault_owner)
        .context("no position in this vault (run `strongroom join` first?)")?;

    let now = now();
    let share_balance = world.shares.balance_of(&vault.share_mint, &depositor);

    report::title("MY POSITION");
    report::kv("Depositor", position.depositor);
    report::kv("Vault owner", position.vault_owner);
    report::kv("Status", position.status(now));
    report::kv("Locked", report::grains_and_strg(position.locked_amount));
    report::light_rule();
    if position.locked_amount > 0 {
        report::kv("Deposited at", report::timestamp(position.deposit_time));
        report::kv("Unlocks at", report::timestamp(position.unlock_time));
        report::kv(
            "Time left",
            report::lock_window(strongroom_vault::lock::remaining(now, position.unlock_time)),
        );
        report::light_rule();
    }
    report::kv("Shares", share_balance);
    match amount_for_shares(share_balance) {
        Some(value) => report::kv("Share value", report::strg(value)),
        None => report::kv("Share value", "overflow"),
    }
    report::heavy_rule();
    Ok(())
}

fn depositors(store: &Store, wallet_path: &Path, vault: Option<String>) -> Result<()> {
    let world = World::load(store)?;
    let owner = match vault {
        Some(s) => parse_address(&s)?,
        None => load_wallet(wallet_path)?.address(),
    };
    world
        .engine
        .vault(&owner)
        .context("vault not found for this owner")?;

    let now = now();
    let mut positions: Vec<_> = world.engine.positions_for(&owner).collect();
    positions.sort_by_key(|p| p.depositor);

    report::title("VAULT DEPOSITORS");
    report::kv("Vault owner", owner);
    report::kv("Registered", positions.len());
    report::light_rule();
    let mut total_locked: u64 = 0;
    for (i, p) in positions.iter().enumerate() {
        println!(
            "{:>3}. {}  {}  {}",
            i + 1,
            p.depositor,
            report::strg(p.locked_amount),
            p.status(now)
        );
        total_locked = total_locked.saturating_add(p.locked_amount);
    }
    if !positions.is_empty() {
        report::light_rule();
    }
    report::kv("Total locked", report::grains_and_strg(total_locked));
    report::heavy_rule();
    Ok(())
}
