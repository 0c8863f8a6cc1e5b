//! Deterministic stand-ins for the external surfaces (price pool, source
//! ledger, name service) plus helpers for building a throwaway store.

use crate::{
    ens::NameResolver,
    ledger::{Entrant, LedgerError, RoundLedger},
    oracle::{OracleError, PoolReserves, PriceSource},
    state::Adb,
};
use anyhow::Context;
use bearcave_types::Address;
use commonware_runtime::{buffer::PoolRef, Clock, Metrics, Spawner, Storage};
use commonware_storage::{adb, translator::EightCap};
use commonware_utils::{NZUsize, NZU64};
use std::collections::HashMap;

const TEST_BUFFER_POOL_PAGES: usize = 1024;
const TEST_BUFFER_POOL_PAGE_SIZE: usize = 1024;
const TEST_MMR_ITEMS_PER_BLOB: u64 = 1024;
const TEST_MMR_WRITE_BUFFER: usize = 1024;
const TEST_LOG_ITEMS_PER_SECTION: u64 = 1024;
const TEST_LOG_WRITE_BUFFER: usize = 1024;
const TEST_LOCATIONS_ITEMS_PER_BLOB: u64 = 1024;

/// Deterministic test address derived from a seed byte.
pub fn test_address(seed: u8) -> Address {
    Address::new([seed; 20])
}

/// Price source backed by fixed pool reserves and a fixed LOOKS quote.
#[derive(Clone, Copy, Debug)]
pub struct FixedOracle {
    /// ETH side of the reference pool, in wei.
    pub eth_reserve: u128,
    /// USD side of the reference pool, in 6-decimal units.
    pub usd_reserve: u128,
    /// Time-weighted LOOKS price, in wei per whole token.
    pub looks_twap: u128,
    /// When set, every query fails.
    pub fail: bool,
}

impl FixedOracle {
    /// Reserves priced so one wei converts to `rate` USD wei. Backed by a
    /// 100 ETH pool so typical test amounts stay far from the reserves.
    pub fn usd_per_eth(rate: u128) -> Self {
        let eth_reserve = 100 * 1_000_000_000_000_000_000u128;
        Self {
            eth_reserve,
            usd_reserve: rate * eth_reserve / 10u128.pow(12),
            looks_twap: 0,
            fail: false,
        }
    }

    /// An oracle whose every query errors, for exercising fatal paths.
    pub fn failing() -> Self {
        Self {
            eth_reserve: 0,
            usd_reserve: 0,
            looks_twap: 0,
            fail: true,
        }
    }
}

impl PriceSource for FixedOracle {
    async fn pool_reserves(&self) -> Result<PoolReserves, OracleError> {
        if self.fail {
            return Err(OracleError::Query("scripted failure".into()));
        }
        Ok(PoolReserves {
            eth: self.eth_reserve,
            usd: self.usd_reserve,
        })
    }

    async fn looks_twap(&self) -> Result<u128, OracleError> {
        if self.fail {
            return Err(OracleError::Query("scripted failure".into()));
        }
        Ok(self.looks_twap)
    }
}

/// Ledger answering entrant queries from a pre-seeded script. Querying an
/// unscripted round errors, which doubles as a check that reveals only
/// query the rounds they settle.
#[derive(Debug, Default)]
pub struct ScriptedLedger {
    rounds: HashMap<(u64, u64), Vec<Entrant>>,
}

impl ScriptedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&mut self, cave_id: u64, round_id: u64, entrants: Vec<Entrant>) {
        self.rounds.insert((cave_id, round_id), entrants);
    }

    /// Script a round where every listed address entered and exactly the
    /// flagged one lost.
    pub fn script_loss(&mut self, cave_id: u64, round_id: u64, players: &[Address], loser: Address) {
        let entrants = players
            .iter()
            .map(|&address| Entrant {
                address,
                is_loser: address == loser,
            })
            .collect();
        self.script(cave_id, round_id, entrants);
    }
}

impl RoundLedger for ScriptedLedger {
    async fn round_entrants(
        &self,
        cave_id: u64,
        round_id: u64,
    ) -> Result<Vec<Entrant>, LedgerError> {
        self.rounds
            .get(&(cave_id, round_id))
            .cloned()
            .ok_or_else(|| {
                LedgerError::Query(format!("no script for round {round_id} of cave {cave_id}"))
            })
    }
}

/// Name service answering from a fixed table; unlisted addresses resolve
/// to no name.
#[derive(Debug, Default)]
pub struct StaticNames {
    names: HashMap<Address, String>,
}

impl StaticNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn assign(&mut self, address: Address, name: &str) {
        self.names.insert(address, name.to_string());
    }
}

impl NameResolver for StaticNames {
    async fn resolve(&self, address: &Address) -> Result<Option<String>, String> {
        Ok(self.names.get(address).cloned())
    }
}

/// Creates a throwaway entity database for testing.
pub async fn create_adb_result<E: Spawner + Metrics + Storage + Clock>(
    context: &E,
) -> anyhow::Result<Adb<E, EightCap>> {
    let buffer_pool = PoolRef::new(
        NZUsize!(TEST_BUFFER_POOL_PAGES),
        NZUsize!(TEST_BUFFER_POOL_PAGE_SIZE),
    );

    Adb::init(
        context.with_label("state"),
        adb::any::variable::Config {
            mmr_journal_partition: String::from("state-mmr-journal"),
            mmr_metadata_partition: String::from("state-mmr-metadata"),
            mmr_items_per_blob: NZU64!(TEST_MMR_ITEMS_PER_BLOB),
            mmr_write_buffer: NZUsize!(TEST_MMR_WRITE_BUFFER),
            log_journal_partition: String::from("state-log-journal"),
            log_items_per_section: NZU64!(TEST_LOG_ITEMS_PER_SECTION),
            log_write_buffer: NZUsize!(TEST_LOG_WRITE_BUFFER),
            log_compression: None,
            log_codec_config: (),
            locations_journal_partition: String::from("state-locations-journal"),
            locations_items_per_blob: NZU64!(TEST_LOCATIONS_ITEMS_PER_BLOB),
            translator: EightCap,
            thread_pool: None,
            buffer_pool,
        },
    )
    .await
    .context("failed to initialize state ADB")
}

pub async fn create_adb<E: Spawner + Metrics + Storage + Clock>(context: &E) -> Adb<E, EightCap> {
    create_adb_result(context)
        .await
        .expect("failed to initialize test database")
}
