use super::super::*;
use crate::oracle::{eth_to_usd, to_usd};
use bearcave_types::{Address, Cave, Currency, PlayerRound};

impl<'a, S: State, P: PriceSource, L: RoundLedger, N: NameResolver> Layer<'a, S, P, L, N> {
    /// One transaction buying seats in a contiguous range of rounds. The
    /// stake, its USD valuation, and the transaction's gas cost are all
    /// attributed to every round in the range.
    pub(in crate::layer) async fn handle_rounds_entered(
        &mut self,
        cave_id: u64,
        starting_round_id: u64,
        number_of_rounds: u64,
        player: Address,
        gas_used: u64,
        gas_price: u128,
        timestamp: u64,
    ) -> Result<(), IntegrityError> {
        let cave = self.cave(cave_id).await?;

        let fee_in_eth = u128::from(gas_used)
            .checked_mul(gas_price)
            .ok_or(IntegrityError::AmountOverflow("gas fee"))?;
        let fee_in_usd = eth_to_usd(self.oracle, fee_in_eth).await?;
        let stake_in_usd = to_usd(self.oracle, cave.enter_amount, cave.currency).await?;

        let end = starting_round_id
            .checked_add(number_of_rounds)
            .ok_or(IntegrityError::AmountOverflow("round range"))?;
        for round_id in starting_round_id..end {
            self.enter_round(
                &cave,
                cave_id,
                round_id,
                player,
                fee_in_eth,
                fee_in_usd,
                stake_in_usd,
                timestamp,
            )
            .await?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn enter_round(
        &mut self,
        cave: &Cave,
        cave_id: u64,
        round_id: u64,
        address: Address,
        fee_in_eth: u128,
        fee_in_usd: u128,
        stake_in_usd: u128,
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

        self.create_player_round(
            address,
            cave_id,
            round_id,
            PlayerRound {
                usd_wagered: stake_in_usd,
                fees_paid_in_eth: fee_in_eth,
                fees_paid_in_usd: fee_in_usd,
                entered_timestamp: timestamp,
                gems_earned: 0,
            },
        )
        .await?;

        let mut player = self.player_or_create(address).await;
        self.refresh_player_name(address, &mut player).await;
        player.fees_paid_in_eth = player.fees_paid_in_eth.saturating_add(fee_in_eth);
        player.fees_paid_in_usd = player.fees_paid_in_usd.saturating_add(fee_in_usd);
        player.usd_wagered = player.usd_wagered.saturating_add(stake_in_usd);
        match cave.currency {
            Currency::Eth => {
                player.eth_wagered = player.eth_wagered.saturating_add(cave.enter_amount);
            }
            Currency::Looks => {
                player.looks_wagered = player.looks_wagered.saturating_add(cave.enter_amount);
            }
        }
        player.rounds_entered_count += 1;
        self.stage(Key::Player(address), Value::Player(player));

        round.entrants.push(address);
        self.stage(
            Key::Round {
                cave: cave_id,
                round: round_id,
            },
            Value::Round(round),
        );
        Ok(())
    }

    /// Claims move funds the aggregates already credited at reveal time, so
    /// only the gas cost of the claim transaction is new information.
    pub(in crate::layer) async fn handle_prizes_claimed(
        &mut self,
        player: Address,
        gas_used: u64,
        gas_price: u128,
    ) -> Result<(), IntegrityError> {
        let mut record = self.player(player).await?;

        let fee_in_eth = u128::from(gas_used)
            .checked_mul(gas_price)
            .ok_or(IntegrityError::AmountOverflow("gas fee"))?;
        let fee_in_usd = eth_to_usd(self.oracle, fee_in_eth).await?;

        record.fees_paid_in_eth = record.fees_paid_in_eth.saturating_add(fee_in_eth);
        record.fees_paid_in_usd = record.fees_paid_in_usd.saturating_add(fee_in_usd);
        self.stage(Key::Player(player), Value::Player(record));
        Ok(())
    }
}
