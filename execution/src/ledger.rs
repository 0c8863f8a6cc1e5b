use bearcave_types::Address;
use std::future::Future;

/// One entrant as reported by the authoritative ledger query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entrant {
    pub address: Address,
    pub is_loser: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("round entrant query failed: {0}")]
    Query(String),
}

/// Point-in-time query surface of the source ledger. Consulted exactly
/// once per round, at reveal time, for the authoritative entrant list and
/// loser designation; a failure fails the reveal event outright.
pub trait RoundLedger {
    fn round_entrants(
        &self,
        cave_id: u64,
        round_id: u64,
    ) -> impl Future<Output = Result<Vec<Entrant>, LedgerError>>;
}
