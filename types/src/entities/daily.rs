use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

/// One player's aggregate for one UTC day: that day's deltas plus running
/// cumulative totals carried forward from the most recent prior day with
/// activity. Buckets are created at most once and accumulated into, never
/// overwritten.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayerDailyData {
    pub day: u64,

    pub eth_pnl: i128,
    pub looks_pnl: i128,
    pub usd_pnl: i128,
    pub rounds_played: u64,

    pub cumulated_eth_pnl: i128,
    pub cumulated_looks_pnl: i128,
    pub cumulated_usd_pnl: i128,
    pub cumulated_rounds_played: u64,
}

impl PlayerDailyData {
    pub fn new(day: u64) -> Self {
        Self {
            day,
            eth_pnl: 0,
            looks_pnl: 0,
            usd_pnl: 0,
            rounds_played: 0,
            cumulated_eth_pnl: 0,
            cumulated_looks_pnl: 0,
            cumulated_usd_pnl: 0,
            cumulated_rounds_played: 0,
        }
    }
}

impl Write for PlayerDailyData {
    fn write(&self, writer: &mut impl BufMut) {
        self.day.write(writer);
        self.eth_pnl.write(writer);
        self.looks_pnl.write(writer);
        self.usd_pnl.write(writer);
        self.rounds_played.write(writer);
        self.cumulated_eth_pnl.write(writer);
        self.cumulated_looks_pnl.write(writer);
        self.cumulated_usd_pnl.write(writer);
        self.cumulated_rounds_played.write(writer);
    }
}

impl Read for PlayerDailyData {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            day: u64::read(reader)?,
            eth_pnl: i128::read(reader)?,
            looks_pnl: i128::read(reader)?,
            usd_pnl: i128::read(reader)?,
            rounds_played: u64::read(reader)?,
            cumulated_eth_pnl: i128::read(reader)?,
            cumulated_looks_pnl: i128::read(reader)?,
            cumulated_usd_pnl: i128::read(reader)?,
            cumulated_rounds_played: u64::read(reader)?,
        })
    }
}

impl EncodeSize for PlayerDailyData {
    fn encode_size(&self) -> usize {
        self.day.encode_size()
            + self.eth_pnl.encode_size()
            + self.looks_pnl.encode_size()
            + self.usd_pnl.encode_size()
            + self.rounds_played.encode_size()
            + self.cumulated_eth_pnl.encode_size()
            + self.cumulated_looks_pnl.encode_size()
            + self.cumulated_usd_pnl.encode_size()
            + self.cumulated_rounds_played.encode_size()
    }
}

/// Protocol-wide aggregate for one UTC day, mutated whenever any round
/// resolves. Cumulative earned/rounds fields carry forward like the player
/// buckets; daily volume has no cumulative twin (the lifetime figure lives
/// on the Game singleton).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameDailyData {
    pub day: u64,

    pub eth_earned: u128,
    pub looks_earned: u128,
    pub usd_earned: u128,
    pub usd_volume: u128,
    pub rounds_played: u64,

    pub cumulated_eth_earned: u128,
    pub cumulated_looks_earned: u128,
    pub cumulated_usd_earned: u128,
    pub cumulated_rounds_played: u64,
}

impl GameDailyData {
    pub fn new(day: u64) -> Self {
        Self {
            day,
            eth_earned: 0,
            looks_earned: 0,
            usd_earned: 0,
            usd_volume: 0,
            rounds_played: 0,
            cumulated_eth_earned: 0,
            cumulated_looks_earned: 0,
            cumulated_usd_earned: 0,
            cumulated_rounds_played: 0,
        }
    }
}

impl Write for GameDailyData {
    fn write(&self, writer: &mut impl BufMut) {
        self.day.write(writer);
        self.eth_earned.write(writer);
        self.looks_earned.write(writer);
        self.usd_earned.write(writer);
        self.usd_volume.write(writer);
        self.rounds_played.write(writer);
        self.cumulated_eth_earned.write(writer);
        self.cumulated_looks_earned.write(writer);
        self.cumulated_usd_earned.write(writer);
        self.cumulated_rounds_played.write(writer);
    }
}

impl Read for GameDailyData {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            day: u64::read(reader)?,
            eth_earned: u128::read(reader)?,
            looks_earned: u128::read(reader)?,
            usd_earned: u128::read(reader)?,
            usd_volume: u128::read(reader)?,
            rounds_played: u64::read(reader)?,
            cumulated_eth_earned: u128::read(reader)?,
            cumulated_looks_earned: u128::read(reader)?,
            cumulated_usd_earned: u128::read(reader)?,
            cumulated_rounds_played: u64::read(reader)?,
        })
    }
}

impl EncodeSize for GameDailyData {
    fn encode_size(&self) -> usize {
        self.day.encode_size()
            + self.eth_earned.encode_size()
            + self.looks_earned.encode_size()
            + self.usd_earned.encode_size()
            + self.usd_volume.encode_size()
            + self.rounds_played.encode_size()
            + self.cumulated_eth_earned.encode_size()
            + self.cumulated_looks_earned.encode_size()
            + self.cumulated_usd_earned.encode_size()
            + self.cumulated_rounds_played.encode_size()
    }
}
