use crate::{
    ens::NameResolver, error::IntegrityError, ledger::RoundLedger, oracle::PriceSource,
    state::State,
};
use bearcave_types::{Event, Key, Value};
use std::collections::BTreeMap;

mod daily;
mod handlers;
mod loaders;

/// A buffered view over the entity store for exactly one inbound event.
///
/// Handlers read through the pending overlay and stage every mutation in
/// it; the caller commits the overlay to the store only after the handler
/// succeeds. A failed handler therefore leaves the store untouched, which
/// is what makes the log safe to replay after a reorganization.
pub struct Layer<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> {
    state: &'a S,
    oracle: &'a P,
    ledger: &'a L,
    names: &'a N,
    pending: BTreeMap<Key, Value>,
}

impl<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> Layer<'a, S, P, L, N> {
    pub fn new(state: &'a S, oracle: &'a P, ledger: &'a L, names: &'a N) -> Self {
        Self {
            state,
            oracle,
            ledger,
            names,
            pending: BTreeMap::new(),
        }
    }

    fn stage(&mut self, key: Key, value: Value) {
        self.pending.insert(key, value);
    }

    /// Apply one event's full fan-out of aggregate mutations. Any error is
    /// a fatal integrity violation for this event and discards the overlay.
    pub async fn apply(&mut self, event: &Event) -> Result<(), IntegrityError> {
        match event {
            Event::CaveAdded {
                cave_id,
                enter_amount,
                currency,
                round_duration,
                players_per_round,
                protocol_fee_bp,
            } => {
                self.handle_cave_added(
                    *cave_id,
                    *enter_amount,
                    *currency,
                    *round_duration,
                    *players_per_round,
                    *protocol_fee_bp,
                )
                .await
            }
            Event::CaveRemoved { cave_id } => self.handle_cave_removed(*cave_id).await,
            Event::RoundsEntered {
                cave_id,
                starting_round_id,
                number_of_rounds,
                player,
                gas_used,
                gas_price,
                timestamp,
            } => {
                self.handle_rounds_entered(
                    *cave_id,
                    *starting_round_id,
                    *number_of_rounds,
                    *player,
                    *gas_used,
                    *gas_price,
                    *timestamp,
                )
                .await
            }
            Event::RoundStatusUpdated {
                cave_id,
                round_id,
                status,
                timestamp,
            } => {
                self.handle_round_status_updated(*cave_id, *round_id, *status, *timestamp)
                    .await
            }
            Event::PrizesClaimed {
                player,
                gas_used,
                gas_price,
            } => {
                self.handle_prizes_claimed(*player, *gas_used, *gas_price)
                    .await
            }
        }
    }

    pub fn commit(self) -> Vec<(Key, Value)> {
        self.pending.into_iter().collect()
    }
}

impl<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> State
    for Layer<'a, S, P, L, N>
{
    async fn get(&self, key: &Key) -> Option<Value> {
        match self.pending.get(key) {
            Some(value) => Some(value.clone()),
            None => self.state.get(key).await,
        }
    }

    async fn insert(&mut self, key: Key, value: Value) {
        self.pending.insert(key, value);
    }
}
