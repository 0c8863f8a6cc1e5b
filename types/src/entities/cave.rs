use crate::{Currency, BASIS_POINT_DIVISOR};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

/// A wagering configuration: a fixed stake, a settlement currency, and the
/// number of players a round seats. The prize and fee splits are derived
/// once at creation and never change, so rounds that outlive a `CaveRemoved`
/// still resolve against the same math.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cave {
    pub enter_amount: u128,
    pub currency: Currency,
    pub round_duration: u64,
    pub players_per_round: u32,
    pub protocol_fee_bp: u16,
    /// `enter_amount * (10000 - fee_bp) / 10000 / (players_per_round - 1)`.
    pub prize_amount: u128,
    /// `enter_amount * fee_bp / 10000`.
    pub fee_amount: u128,
    pub is_active: bool,
    pub rounds_count: u64,
    pub maintenance_cost: u128,
}

impl Cave {
    /// Derive a cave from its creation parameters. Callers must have
    /// validated `players_per_round >= 2` and `protocol_fee_bp <= 10000`.
    pub fn new(
        enter_amount: u128,
        currency: Currency,
        round_duration: u64,
        players_per_round: u32,
        protocol_fee_bp: u16,
    ) -> Self {
        let fee_bp = protocol_fee_bp as u128;
        let prize_amount = enter_amount * (BASIS_POINT_DIVISOR - fee_bp)
            / BASIS_POINT_DIVISOR
            / (players_per_round as u128 - 1);
        let fee_amount = enter_amount * fee_bp / BASIS_POINT_DIVISOR;

        Self {
            enter_amount,
            currency,
            round_duration,
            players_per_round,
            protocol_fee_bp,
            prize_amount,
            fee_amount,
            is_active: true,
            rounds_count: 0,
            maintenance_cost: 0,
        }
    }
}

impl Write for Cave {
    fn write(&self, writer: &mut impl BufMut) {
        self.enter_amount.write(writer);
        self.currency.write(writer);
        self.round_duration.write(writer);
        self.players_per_round.write(writer);
        self.protocol_fee_bp.write(writer);
        self.prize_amount.write(writer);
        self.fee_amount.write(writer);
        self.is_active.write(writer);
        self.rounds_count.write(writer);
        self.maintenance_cost.write(writer);
    }
}

impl Read for Cave {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            enter_amount: u128::read(reader)?,
            currency: Currency::read(reader)?,
            round_duration: u64::read(reader)?,
            players_per_round: u32::read(reader)?,
            protocol_fee_bp: u16::read(reader)?,
            prize_amount: u128::read(reader)?,
            fee_amount: u128::read(reader)?,
            is_active: bool::read(reader)?,
            rounds_count: u64::read(reader)?,
            maintenance_cost: u128::read(reader)?,
        })
    }
}

impl EncodeSize for Cave {
    fn encode_size(&self) -> usize {
        self.enter_amount.encode_size()
            + self.currency.encode_size()
            + self.round_duration.encode_size()
            + self.players_per_round.encode_size()
            + self.protocol_fee_bp.encode_size()
            + self.prize_amount.encode_size()
            + self.fee_amount.encode_size()
            + self.is_active.encode_size()
            + self.rounds_count.encode_size()
            + self.maintenance_cost.encode_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prize_and_fee_derivation() {
        let cave = Cave::new(10_000_000, Currency::Eth, 600, 2, 50);
        assert_eq!(cave.prize_amount, 9_950_000);
        assert_eq!(cave.fee_amount, 50_000);
    }

    #[test]
    fn test_fee_prize_conservation() {
        // fee + prize * (n - 1) == enter * (n - 1) whenever the basis-point
        // split divides evenly.
        for (enter, players, fee_bp) in [
            (10_000_000u128, 2u32, 50u16),
            (1_000_000_000_000_000_000, 10, 250),
            (5_000_000_000_000_000, 3, 0),
        ] {
            let cave = Cave::new(enter, Currency::Looks, 600, players, fee_bp);
            let winners = (players - 1) as u128;
            // The loser's stake covers every winner's prize plus the fee,
            // up to basis-point truncation dust.
            let distributed = cave.fee_amount + cave.prize_amount * winners;
            assert!(distributed <= enter);
            assert!(enter - distributed < BASIS_POINT_DIVISOR * winners);
        }
    }

    #[test]
    fn test_zero_fee_cave() {
        let cave = Cave::new(9_000_000, Currency::Eth, 600, 4, 0);
        assert_eq!(cave.fee_amount, 0);
        assert_eq!(cave.prize_amount, 3_000_000);
    }
}
