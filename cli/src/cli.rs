//! # CLI Interface
//!
//! Defines the command-line argument structure for `strongroom` using
//! `clap` derive. One subcommand per vault operation, plus wallet
//! management, the faucet, and the read-only reports.
//!
//! Addresses and STRG amounts are taken as strings and parsed in the
//! command handlers, where failures can be reported with context.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strongroom, a pooled custody ledger.
///
/// An owner opens a vault that accepts STRG from registered depositors,
/// time-locks each deposit, and issues vault shares at a fixed rate of
/// 0.1 STRG per share. All state lives in a local data directory.
#[derive(Parser, Debug)]
#[command(
    name = "strongroom",
    about = "Strongroom pooled custody vault CLI",
    version,
    propagate_version = true
)]
pub struct StrongroomCli {
    /// Data directory holding the ledger store.
    ///
    /// Created on first use if it does not exist.
    #[arg(long, short = 'd', env = "STRONGROOM_DATA_DIR", default_value = "~/.strongroom", global = true)]
    pub data_dir: PathBuf,

    /// Path to the signer's wallet keypair file.
    ///
    /// Defaults to `wallet.json` inside the data directory.
    #[arg(long, short = 'w', env = "STRONGROOM_WALLET", global = true)]
    pub wallet: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `strongroom` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the local wallet keypair.
    #[command(subcommand)]
    Wallet(WalletCommands),

    /// Credit the wallet with STRG from the local faucet.
    Airdrop {
        /// Amount in STRG, e.g. `5` or `2.5`.
        amount: String,
    },

    /// Register a vault owned by the wallet.
    Register,

    /// Register the wallet as a depositor in a vault.
    Join {
        /// Address of the vault owner.
        vault: String,
    },

    /// Owner-funded deposit into the wallet's own vault (mints nothing).
    Fund {
        /// Amount in STRG.
        amount: String,
    },

    /// Deposit into a vault as a registered depositor.
    ///
    /// Locks the grains for the vault's lock period and mints shares at
    /// the fixed rate. The amount must be a multiple of 0.1 STRG.
    Deposit {
        /// Address of the vault owner.
        vault: String,
        /// Amount in STRG, a multiple of 0.1.
        amount: String,
    },

    /// Withdraw the wallet's entire unlocked position from a vault.
    Withdraw {
        /// Address of the vault owner.
        vault: String,
    },

    /// Owner-only transfer of vault funds to any destination.
    Transfer {
        /// Destination address.
        to: String,
        /// Amount in STRG.
        amount: String,
    },

    /// Show or update the vault's lock period and minimum deposit.
    ///
    /// With no flags, prints the current settings.
    Settings {
        /// New lock period in whole days.
        #[arg(long)]
        lock_days: Option<u32>,
        /// New minimum deposit in STRG.
        #[arg(long)]
        min_deposit: Option<String>,
    },

    /// Report a vault's state: balance, settings, share supply.
    Status {
        /// Address of the vault owner. Defaults to the wallet.
        vault: Option<String>,
    },

    /// Report the wallet's position in a vault: locked amount, lock
    /// window, share balance.
    Position {
        /// Address of the vault owner.
        vault: String,
    },

    /// List every depositor position registered in a vault.
    Depositors {
        /// Address of the vault owner. Defaults to the wallet.
        vault: Option<String>,
    },
}

/// Wallet management subcommands.
#[derive(Subcommand, Debug)]
pub enum WalletCommands {
    /// Generate a new wallet keypair file.
    New {
        /// Overwrite an existing wallet file.
        #[arg(long)]
        force: bool,
    },
    /// Print the wallet's address and grain balance.
    Address,
}
