use super::Layer;
use crate::{ens::NameResolver, ledger::RoundLedger, oracle::PriceSource, state::State};
use bearcave_types::{
    day_bucket, Address, Game, GameDailyData, Key, Player, PlayerDailyData, Value,
};
use tracing::warn;

/// UTC-day bucket maintenance. A bucket is seeded once per day, inheriting
/// cumulative totals from the most recent prior bucket, then accumulated
/// into for every resolution that lands on the same day.
impl<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> Layer<'a, S, P, L, N> {
    /// Fold one resolved round's outcome into the player's bucket for the
    /// resolution day. Must run before `last_played_timestamp` is advanced,
    /// since that timestamp anchors the cumulative carry.
    pub(in crate::layer) async fn record_player_day(
        &mut self,
        address: Address,
        player: &Player,
        timestamp: u64,
        eth_pnl: i128,
        looks_pnl: i128,
        usd_pnl: i128,
    ) {
        let day = day_bucket(timestamp);
        let key = Key::PlayerDay {
            player: address,
            day,
        };
        let mut data = match self.get(&key).await {
            Some(Value::PlayerDay(data)) => data,
            _ => self.seed_player_day(address, player, day).await,
        };

        data.eth_pnl = data.eth_pnl.saturating_add(eth_pnl);
        data.looks_pnl = data.looks_pnl.saturating_add(looks_pnl);
        data.usd_pnl = data.usd_pnl.saturating_add(usd_pnl);
        data.rounds_played += 1;
        data.cumulated_eth_pnl = data.cumulated_eth_pnl.saturating_add(eth_pnl);
        data.cumulated_looks_pnl = data.cumulated_looks_pnl.saturating_add(looks_pnl);
        data.cumulated_usd_pnl = data.cumulated_usd_pnl.saturating_add(usd_pnl);
        data.cumulated_rounds_played += 1;

        self.stage(key, Value::PlayerDay(data));
    }

    async fn seed_player_day(
        &self,
        address: Address,
        player: &Player,
        day: u64,
    ) -> PlayerDailyData {
        let mut data = PlayerDailyData::new(day);
        let Some(last_played) = player.last_played_timestamp else {
            return data;
        };

        let prior_day = day_bucket(last_played);
        match self
            .get(&Key::PlayerDay {
                player: address,
                day: prior_day,
            })
            .await
        {
            Some(Value::PlayerDay(prior)) => {
                data.cumulated_eth_pnl = prior.cumulated_eth_pnl;
                data.cumulated_looks_pnl = prior.cumulated_looks_pnl;
                data.cumulated_usd_pnl = prior.cumulated_usd_pnl;
                data.cumulated_rounds_played = prior.cumulated_rounds_played;
            }
            _ => warn!(
                player = %address,
                prior_day,
                "prior daily bucket missing, cumulative totals restart from zero"
            ),
        }
        data
    }

    /// Fold one resolved round's fee take and volume into the protocol
    /// bucket for the resolution day. Must run before the Game singleton's
    /// `last_resolved_timestamp` is advanced.
    pub(in crate::layer) async fn record_game_day(
        &mut self,
        game: &Game,
        timestamp: u64,
        eth_earned: u128,
        looks_earned: u128,
        usd_earned: u128,
        usd_volume: u128,
    ) {
        let day = day_bucket(timestamp);
        let key = Key::GameDay(day);
        let mut data = match self.get(&key).await {
            Some(Value::GameDay(data)) => data,
            _ => self.seed_game_day(game, day).await,
        };

        data.eth_earned = data.eth_earned.saturating_add(eth_earned);
        data.looks_earned = data.looks_earned.saturating_add(looks_earned);
        data.usd_earned = data.usd_earned.saturating_add(usd_earned);
        data.usd_volume = data.usd_volume.saturating_add(usd_volume);
        data.rounds_played += 1;
        data.cumulated_eth_earned = data.cumulated_eth_earned.saturating_add(eth_earned);
        data.cumulated_looks_earned = data.cumulated_looks_earned.saturating_add(looks_earned);
        data.cumulated_usd_earned = data.cumulated_usd_earned.saturating_add(usd_earned);
        data.cumulated_rounds_played += 1;

        self.stage(key, Value::GameDay(data));
    }

    async fn seed_game_day(&self, game: &Game, day: u64) -> GameDailyData {
        let mut data = GameDailyData::new(day);
        let Some(last_resolved) = game.last_resolved_timestamp else {
            return data;
        };

        let prior_day = day_bucket(last_resolved);
        match self.get(&Key::GameDay(prior_day)).await {
            Some(Value::GameDay(prior)) => {
                data.cumulated_eth_earned = prior.cumulated_eth_earned;
                data.cumulated_looks_earned = prior.cumulated_looks_earned;
                data.cumulated_usd_earned = prior.cumulated_usd_earned;
                data.cumulated_rounds_played = prior.cumulated_rounds_played;
            }
            _ => warn!(
                prior_day,
                "prior protocol daily bucket missing, cumulative totals restart from zero"
            ),
        }
        data
    }
}
