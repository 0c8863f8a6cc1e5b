use super::super::*;
use bearcave_types::{Cave, Currency, BASIS_POINT_DIVISOR, MAX_ROUND_ENTRANTS};

impl<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> Layer<'a, S, P, L, N> {
    /// Register a configuration under which rounds can be offered. The
    /// per-winner prize and per-round fee are derived here once and reused
    /// verbatim by every resolution, so a misconfigured cave is rejected
    /// before it can taint any aggregate.
    pub(in crate::layer) async fn handle_cave_added(
        &mut self,
        cave_id: u64,
        enter_amount: u128,
        currency: Currency,
        round_duration: u64,
        players_per_round: u32,
        protocol_fee_bp: u16,
    ) -> Result<(), IntegrityError> {
        // The upper bound keeps every filled round within the entrant list
        // the round codec can decode.
        if players_per_round < 2 || players_per_round as usize > MAX_ROUND_ENTRANTS {
            return Err(IntegrityError::InvalidPartySize {
                cave: cave_id,
                players: players_per_round,
            });
        }
        if u128::from(protocol_fee_bp) > BASIS_POINT_DIVISOR {
            return Err(IntegrityError::InvalidFeeRate {
                cave: cave_id,
                fee_bp: protocol_fee_bp,
            });
        }
        if self.get(&Key::Cave(cave_id)).await.is_some() {
            return Err(IntegrityError::CaveAlreadyExists(cave_id));
        }

        let cave = Cave::new(
            enter_amount,
            currency,
            round_duration,
            players_per_round,
            protocol_fee_bp,
        );
        self.stage(Key::Cave(cave_id), Value::Cave(cave));
        Ok(())
    }

    /// Deactivation, not deletion. The cave's identity and lifetime totals
    /// stay queryable and its in-flight rounds still resolve.
    pub(in crate::layer) async fn handle_cave_removed(
        &mut self,
        cave_id: u64,
    ) -> Result<(), IntegrityError> {
        let mut cave = self.cave(cave_id).await?;
        cave.is_active = false;
        self.stage(Key::Cave(cave_id), Value::Cave(cave));
        Ok(())
    }
}
