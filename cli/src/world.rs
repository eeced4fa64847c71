//! # World State
//!
//! The CLI's unit of persistence: the coin ledger, the share book, and
//! the vault engine, loaded as one snapshot at command start and written
//! back in one atomic batch after a mutating command. A crash between
//! commands therefore never observes a half-applied operation.

use serde::{Deserialize, Serialize};

use strongroom_ledger::store::{Store, StoreError};
use strongroom_ledger::{CoinLedger, ShareBook};
use strongroom_vault::VaultEngine;

/// Tree holding the world snapshot.
const WORLD_TREE: &str = "world";
/// Key for the serialized world state.
const STATE_KEY: &[u8] = b"state";
/// Key for the on-disk format version.
const VERSION_KEY: &[u8] = b"format_version";
/// Bump when the serialized layout changes incompatibly.
const FORMAT_VERSION: u32 = 1;

/// Everything the CLI persists.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct World {
    /// Grain balances for every account.
    pub coins: CoinLedger,
    /// Share mints and holder balances.
    pub shares: ShareBook,
    /// Vault and position records.
    pub engine: VaultEngine,
}

impl World {
    /// Load the world from the store, or start fresh if none exists.
    ///
    /// Refuses to load a snapshot written by an incompatible format
    /// version rather than misdecoding it.
    pub fn load(store: &Store) -> Result<Self, StoreError> {
        if let Some(version) = store.get::<u32>(WORLD_TREE, VERSION_KEY)? {
            if version != FORMAT_VERSION {
                return Err(StoreError::Codec(format!(
                    "store format version {} is not supported (expected {})",
                    version, FORMAT_VERSION
                )));
            }
        }
        Ok(store.get(WORLD_TREE, STATE_KEY)?.unwrap_or_default())
    }

    /// Write the world back atomically and flush to disk.
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        store.put_batch(
            WORLD_TREE,
            vec![
                (STATE_KEY.to_vec(), Store::encode(self)?),
                (VERSION_KEY.to_vec(), Store::encode(&FORMAT_VERSION)?),
            ],
        )?;
        store.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strongroom_ledger::address::Address;

    fn addr(fill: u8) -> Address {
        Address::from_bytes([fill; 32])
    }

    #[test]
    fn fresh_store_loads_empty_world() {
        let store = Store::temporary().unwrap();
        let world = World::load(&store).unwrap();
        assert_eq!(world.engine.vault_count(), 0);
        assert_eq!(world.coins.total_issued(), 0);
    }

    #[test]
    fn world_roundtrips_through_the_store() {
        let store = Store::temporary().unwrap();

        let mut world = World::load(&store).unwrap();
        let owner = addr(1);
        world.coins.credit(&owner, 5_000_000_000).unwrap();
        world.engine.register(&mut world.shares, owner).unwrap();
        world
            .engine
            .deposit(&mut world.coins, owner, 1_000_000_000)
            .unwrap();
        world.save(&store).unwrap();

        let restored = World::load(&store).unwrap();
        assert_eq!(restored.engine.vault_count(), 1);
        assert_eq!(
            restored.engine.vault(&owner).unwrap().balance,
            1_000_000_000
        );
        assert_eq!(restored.coins.total_issued(), 5_000_000_000);
    }

    #[test]
    fn unknown_format_version_rejected() {
        let store = Store::temporary().unwrap();
        store.put(WORLD_TREE, VERSION_KEY, &99u32).unwrap();
        assert!(matches!(World::load(&store), Err(StoreError::Codec(_))));
    }
}
