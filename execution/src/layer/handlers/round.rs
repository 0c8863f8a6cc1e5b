use super::super::*;
use crate::oracle::to_usd;
use bearcave_types::{
    Address, Currency, RoundStatus, STATUS_CANCELLED, STATUS_DRAWING, STATUS_DRAWN, STATUS_OPEN,
    STATUS_REVEALED,
};
use tracing::warn;

impl<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> Layer<'a, S, P, L, N> {
    /// Lifecycle fan-out. The drawing phases carry no accounting meaning
    /// and are skipped; an unrecognized code is logged and skipped rather
    /// than aborting, since newer source contracts may add phases.
    pub(in crate::layer) async fn handle_round_status_updated(
        &mut self,
        cave_id: u64,
        round_id: u64,
        status: u8,
        timestamp: u64,
    ) -> Result<(), IntegrityError> {
        match status {
            STATUS_OPEN => self.open_round(cave_id, round_id, timestamp).await,
            STATUS_REVEALED => self.reveal_round(cave_id, round_id, timestamp).await,
            STATUS_CANCELLED => self.cancel_round(cave_id, round_id, timestamp).await,
            STATUS_DRAWING | STATUS_DRAWN => Ok(()),
            code => {
                warn!(
                    cave = cave_id,
                    round = round_id,
                    code,
                    "ignoring unknown round status code"
                );
                Ok(())
            }
        }
    }

    /// The open signal may precede any entry, so it is the one status
    /// transition allowed to create the round.
    async fn open_round(
        &mut self,
        cave_id: u64,
        round_id: u64,
        timestamp: u64,
    ) -> Result<(), IntegrityError> {
        let mut round = self.round_or_create(cave_id, round_id).await?;
        if round.status.is_terminal() {
            return Err(IntegrityError::TerminalRound {
                cave: cave_id,
                round: round_id,
                status: round.status,
            });
        }

        round.opened_timestamp = timestamp;
        self.stage(
            Key::Round {
                cave: cave_id,
                round: round_id,
            },
            Value::Round(round),
        );
        Ok(())
    }

    /// Settle a round: the authoritative entrant list is queried once, the
    /// single loser's stake is redistributed to the winners at the cave's
    /// fixed prize, and every aggregate level absorbs the outcome.
    async fn reveal_round(
        &mut self,
        cave_id: u64,
        round_id: u64,
        timestamp: u64,
    ) -> Result<(), IntegrityError> {
        let cave = self.cave(cave_id).await?;
        let mut round = self.round(cave_id, round_id).await?;
        if round.status.is_terminal() {
            return Err(IntegrityError::TerminalRound {
                cave: cave_id,
                round: round_id,
                status: round.status,
            });
        }

        let entrants = self.ledger.round_entrants(cave_id, round_id).await?;
        let prize_in_usd = to_usd(self.oracle, cave.prize_amount, cave.currency).await?;

        let mut loser: Option<Address> = None;
        let mut volume_in_usd: u128 = 0;
        for entrant in &entrants {
            let record = self.player_round(entrant.address, cave_id, round_id).await?;
            let mut player = self.player(entrant.address).await?;

            let (eth_delta, looks_delta, usd_delta);
            if entrant.is_loser {
                if loser.replace(entrant.address).is_some() {
                    return Err(IntegrityError::MultipleLosers {
                        cave: cave_id,
                        round: round_id,
                    });
                }
                player.rounds_lost_count += 1;
                player.usd_lost = player.usd_lost.saturating_add(record.usd_wagered);
                player.usd_pnl = player.usd_pnl.saturating_sub(record.usd_wagered as i128);
                match cave.currency {
                    Currency::Eth => {
                        player.eth_lost = player.eth_lost.saturating_add(cave.enter_amount);
                        eth_delta = -(cave.enter_amount as i128);
                        looks_delta = 0;
                    }
                    Currency::Looks => {
                        player.looks_lost = player.looks_lost.saturating_add(cave.enter_amount);
                        eth_delta = 0;
                        looks_delta = -(cave.enter_amount as i128);
                    }
                }
                usd_delta = -(record.usd_wagered as i128);
            } else {
                player.rounds_won_count += 1;
                player.usd_won = player.usd_won.saturating_add(prize_in_usd);
                player.usd_pnl = player.usd_pnl.saturating_add(prize_in_usd as i128);
                match cave.currency {
                    Currency::Eth => {
                        player.eth_won = player.eth_won.saturating_add(cave.prize_amount);
                        eth_delta = cave.prize_amount as i128;
                        looks_delta = 0;
                    }
                    Currency::Looks => {
                        player.looks_won = player.looks_won.saturating_add(cave.prize_amount);
                        eth_delta = 0;
                        looks_delta = cave.prize_amount as i128;
                    }
                }
                usd_delta = prize_in_usd as i128;
            }

            self.record_player_day(
                entrant.address,
                &player,
                timestamp,
                eth_delta,
                looks_delta,
                usd_delta,
            )
            .await;
            player.last_played_timestamp = Some(timestamp);
            self.stage(Key::Player(entrant.address), Value::Player(player));

            volume_in_usd = volume_in_usd.saturating_add(record.usd_wagered);
        }
        let Some(loser) = loser else {
            return Err(IntegrityError::NoLoser {
                cave: cave_id,
                round: round_id,
                entrants: entrants.len(),
            });
        };

        round.status = RoundStatus::Revealed;
        round.loser = Some(loser);
        round.closed_timestamp = Some(timestamp);
        self.stage(
            Key::Round {
                cave: cave_id,
                round: round_id,
            },
            Value::Round(round),
        );

        let fee_in_usd = to_usd(self.oracle, cave.fee_amount, cave.currency).await?;
        let (fee_in_eth, fee_in_looks) = match cave.currency {
            Currency::Eth => (cave.fee_amount, 0),
            Currency::Looks => (0, cave.fee_amount),
        };

        let mut game = self.game().await;
        game.eth_earned = game.eth_earned.saturating_add(fee_in_eth);
        game.looks_earned = game.looks_earned.saturating_add(fee_in_looks);
        game.usd_earned = game.usd_earned.saturating_add(fee_in_usd);
        game.usd_volume = game.usd_volume.saturating_add(volume_in_usd);
        game.rounds_played += 1;
        self.record_game_day(
            &game,
            timestamp,
            fee_in_eth,
            fee_in_looks,
            fee_in_usd,
            volume_in_usd,
        )
        .await;
        game.last_resolved_timestamp = Some(timestamp);
        self.stage(Key::Game, Value::Game(game));
        Ok(())
    }

    /// Unwind a round that never completed: every recorded wager backs out
    /// of the lifetime totals and the round is sealed. Daily buckets and
    /// the Game singleton only ever see resolved rounds, so they have
    /// nothing to unwind.
    async fn cancel_round(
        &mut self,
        cave_id: u64,
        round_id: u64,
        timestamp: u64,
    ) -> Result<(), IntegrityError> {
        let cave = self.cave(cave_id).await?;
        let mut round = self.round(cave_id, round_id).await?;
        if round.status.is_terminal() {
            return Err(IntegrityError::TerminalRound {
                cave: cave_id,
                round: round_id,
                status: round.status,
            });
        }

        for address in round.entrants.clone() {
            let record = self.player_round(address, cave_id, round_id).await?;
            let mut player = self.player(address).await?;

            player.usd_wagered = player
                .usd_wagered
                .checked_sub(record.usd_wagered)
                .ok_or(IntegrityError::AmountUnderflow(address))?;
            match cave.currency {
                Currency::Eth => {
                    player.eth_wagered = player
                        .eth_wagered
                        .checked_sub(cave.enter_amount)
                        .ok_or(IntegrityError::AmountUnderflow(address))?;
                }
                Currency::Looks => {
                    player.looks_wagered = player
                        .looks_wagered
                        .checked_sub(cave.enter_amount)
                        .ok_or(IntegrityError::AmountUnderflow(address))?;
                }
            }
            self.stage(Key::Player(address), Value::Player(player));
        }

        round.status = RoundStatus::Cancelled;
        round.closed_timestamp = Some(timestamp);
        self.stage(
            Key::Round {
                cave: cave_id,
                round: round_id,
            },
            Value::Round(round),
        );
        Ok(())
    }
}
