use crate::{Address, Currency};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

/// Wire codes carried by `RoundStatusUpdated`, matching the source
/// contract's round status enum. Codes strictly between `OPEN` and
/// `REVEALED` belong to the drawing phase and carry no accounting
/// consequences.
pub const STATUS_OPEN: u8 = 1;
pub const STATUS_DRAWING: u8 = 2;
pub const STATUS_DRAWN: u8 = 3;
pub const STATUS_REVEALED: u8 = 4;
pub const STATUS_CANCELLED: u8 = 5;

/// Inbound domain events, delivered one at a time in source-log order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A new wagering configuration was registered.
    /// Binary: [0] [caveId:u64] [enterAmount:u128] [currency:u8] [roundDuration:u64]
    /// [playersPerRound:u32] [protocolFeeBp:u16]
    CaveAdded {
        cave_id: u64,
        enter_amount: u128,
        currency: Currency,
        round_duration: u64,
        players_per_round: u32,
        protocol_fee_bp: u16,
    },

    /// A cave was deactivated; in-flight rounds keep resolving against its
    /// stored parameters.
    /// Binary: [1] [caveId:u64]
    CaveRemoved { cave_id: u64 },

    /// One player wagered into `number_of_rounds` sequential rounds starting
    /// at `starting_round_id`, paying gas once for the whole transaction.
    /// Binary: [2] [caveId:u64] [startingRoundId:u64] [numberOfRounds:u64]
    /// [player:20] [gasUsed:u64] [gasPrice:u128] [timestamp:u64]
    RoundsEntered {
        cave_id: u64,
        starting_round_id: u64,
        number_of_rounds: u64,
        player: Address,
        gas_used: u64,
        gas_price: u128,
        timestamp: u64,
    },

    /// A round moved through its on-chain lifecycle; `status` carries the
    /// raw wire code (see the `STATUS_*` constants).
    /// Binary: [3] [caveId:u64] [roundId:u64] [status:u8] [timestamp:u64]
    RoundStatusUpdated {
        cave_id: u64,
        round_id: u64,
        status: u8,
        timestamp: u64,
    },

    /// A player claimed accumulated prizes, paying gas for the claim
    /// transaction. Claiming moves no wagered/won/lost totals.
    /// Binary: [4] [player:20] [gasUsed:u64] [gasPrice:u128]
    PrizesClaimed {
        player: Address,
        gas_used: u64,
        gas_price: u128,
    },
}

impl Write for Event {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::CaveAdded {
                cave_id,
                enter_amount,
                currency,
                round_duration,
                players_per_round,
                protocol_fee_bp,
            } => {
                0u8.write(writer);
                cave_id.write(writer);
                enter_amount.write(writer);
                currency.write(writer);
                round_duration.write(writer);
                players_per_round.write(writer);
                protocol_fee_bp.write(writer);
            }
            Self::CaveRemoved { cave_id } => {
                1u8.write(writer);
                cave_id.write(writer);
            }
            Self::RoundsEntered {
                cave_id,
                starting_round_id,
                number_of_rounds,
                player,
                gas_used,
                gas_price,
                timestamp,
            } => {
                2u8.write(writer);
                cave_id.write(writer);
                starting_round_id.write(writer);
                number_of_rounds.write(writer);
                player.write(writer);
                gas_used.write(writer);
                gas_price.write(writer);
                timestamp.write(writer);
            }
            Self::RoundStatusUpdated {
                cave_id,
                round_id,
                status,
                timestamp,
            } => {
                3u8.write(writer);
                cave_id.write(writer);
                round_id.write(writer);
                status.write(writer);
                timestamp.write(writer);
            }
            Self::PrizesClaimed {
                player,
                gas_used,
                gas_price,
            } => {
                4u8.write(writer);
                player.write(writer);
                gas_used.write(writer);
                gas_price.write(writer);
            }
        }
    }
}

impl Read for Event {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let event = match u8::read(reader)? {
            0 => Self::CaveAdded {
                cave_id: u64::read(reader)?,
                enter_amount: u128::read(reader)?,
                currency: Currency::read(reader)?,
                round_duration: u64::read(reader)?,
                players_per_round: u32::read(reader)?,
                protocol_fee_bp: u16::read(reader)?,
            },
            1 => Self::CaveRemoved {
                cave_id: u64::read(reader)?,
            },
            2 => Self::RoundsEntered {
                cave_id: u64::read(reader)?,
                starting_round_id: u64::read(reader)?,
                number_of_rounds: u64::read(reader)?,
                player: Address::read(reader)?,
                gas_used: u64::read(reader)?,
                gas_price: u128::read(reader)?,
                timestamp: u64::read(reader)?,
            },
            3 => Self::RoundStatusUpdated {
                cave_id: u64::read(reader)?,
                round_id: u64::read(reader)?,
                status: u8::read(reader)?,
                timestamp: u64::read(reader)?,
            },
            4 => Self::PrizesClaimed {
                player: Address::read(reader)?,
                gas_used: u64::read(reader)?,
                gas_price: u128::read(reader)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(event)
    }
}

impl EncodeSize for Event {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::CaveAdded { .. } => 8 + 16 + 1 + 8 + 4 + 2,
                Self::CaveRemoved { .. } => 8,
                Self::RoundsEntered { .. } => 8 + 8 + 8 + Address::LENGTH + 8 + 16 + 8,
                Self::RoundStatusUpdated { .. } => 8 + 8 + 1 + 8,
                Self::PrizesClaimed { .. } => Address::LENGTH + 8 + 16,
            }
    }
}
