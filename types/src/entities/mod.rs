mod cave;
mod daily;
mod game;
mod player;
mod round;

pub use cave::Cave;
pub use daily::{GameDailyData, PlayerDailyData};
pub use game::Game;
pub use player::{Player, PlayerRound};
pub use round::{Round, RoundStatus};

use crate::Address;
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, FixedSize, Read, ReadExt, Write};

/// Addressing for every persisted entity. Keys are encoded and hashed to
/// locate records in the backing store, so the encoding must be stable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Cave(u64),
    Round { cave: u64, round: u64 },
    Player(Address),
    PlayerRound { player: Address, cave: u64, round: u64 },
    PlayerDay { player: Address, day: u64 },
    Game,
    GameDay(u64),
}

impl Write for Key {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Cave(cave) => {
                0u8.write(writer);
                cave.write(writer);
            }
            Self::Round { cave, round } => {
                1u8.write(writer);
                cave.write(writer);
                round.write(writer);
            }
            Self::Player(player) => {
                2u8.write(writer);
                player.write(writer);
            }
            Self::PlayerRound {
                player,
                cave,
                round,
            } => {
                3u8.write(writer);
                player.write(writer);
                cave.write(writer);
                round.write(writer);
            }
            Self::PlayerDay { player, day } => {
                4u8.write(writer);
                player.write(writer);
                day.write(writer);
            }
            Self::Game => 5u8.write(writer),
            Self::GameDay(day) => {
                6u8.write(writer);
                day.write(writer);
            }
        }
    }
}

impl Read for Key {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let key = match u8::read(reader)? {
            0 => Self::Cave(u64::read(reader)?),
            1 => Self::Round {
                cave: u64::read(reader)?,
                round: u64::read(reader)?,
            },
            2 => Self::Player(Address::read(reader)?),
            3 => Self::PlayerRound {
                player: Address::read(reader)?,
                cave: u64::read(reader)?,
                round: u64::read(reader)?,
            },
            4 => Self::PlayerDay {
                player: Address::read(reader)?,
                day: u64::read(reader)?,
            },
            5 => Self::Game,
            6 => Self::GameDay(u64::read(reader)?),
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(key)
    }
}

impl EncodeSize for Key {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Cave(_) => 8,
                Self::Round { .. } => 8 + 8,
                Self::Player(_) => Address::LENGTH,
                Self::PlayerRound { .. } => Address::LENGTH + 8 + 8,
                Self::PlayerDay { .. } => Address::LENGTH + 8,
                Self::Game => 0,
                Self::GameDay(_) => 8,
            }
    }
}

/// Every value the store can hold. `Checkpoint` is pipeline metadata (the
/// sequence number of the next event to apply), not an entity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::large_enum_variant)]
pub enum Value {
    Cave(Cave),
    Round(Round),
    Player(Player),
    PlayerRound(PlayerRound),
    PlayerDay(PlayerDailyData),
    Game(Game),
    GameDay(GameDailyData),
    Checkpoint { next: u64 },
}

impl Write for Value {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Cave(cave) => {
                0u8.write(writer);
                cave.write(writer);
            }
            Self::Round(round) => {
                1u8.write(writer);
                round.write(writer);
            }
            Self::Player(player) => {
                2u8.write(writer);
                player.write(writer);
            }
            Self::PlayerRound(player_round) => {
                3u8.write(writer);
                player_round.write(writer);
            }
            Self::PlayerDay(data) => {
                4u8.write(writer);
                data.write(writer);
            }
            Self::Game(game) => {
                5u8.write(writer);
                game.write(writer);
            }
            Self::GameDay(data) => {
                6u8.write(writer);
                data.write(writer);
            }
            Self::Checkpoint { next } => {
                7u8.write(writer);
                next.write(writer);
            }
        }
    }
}

impl Read for Value {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = match u8::read(reader)? {
            0 => Self::Cave(Cave::read(reader)?),
            1 => Self::Round(Round::read(reader)?),
            2 => Self::Player(Player::read(reader)?),
            3 => Self::PlayerRound(PlayerRound::read(reader)?),
            4 => Self::PlayerDay(PlayerDailyData::read(reader)?),
            5 => Self::Game(Game::read(reader)?),
            6 => Self::GameDay(GameDailyData::read(reader)?),
            7 => Self::Checkpoint {
                next: u64::read(reader)?,
            },
            i => return Err(Error::InvalidEnum(i)),
        };

        Ok(value)
    }
}

impl EncodeSize for Value {
    fn encode_size(&self) -> usize {
        u8::SIZE
            + match self {
                Self::Cave(cave) => cave.encode_size(),
                Self::Round(round) => round.encode_size(),
                Self::Player(player) => player.encode_size(),
                Self::PlayerRound(player_round) => player_round.encode_size(),
                Self::PlayerDay(data) => data.encode_size(),
                Self::Game(game) => game.encode_size(),
                Self::GameDay(data) => data.encode_size(),
                Self::Checkpoint { .. } => 8,
            }
    }
}
