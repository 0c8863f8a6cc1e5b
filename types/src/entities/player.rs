use crate::{read_string, string_encode_size, write_string, MAX_NAME_LENGTH};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

/// Lifetime figures for one address. Created lazily on first entry and
/// never deleted. All native totals are in 18-decimal smallest units of
/// their currency; USD totals are in the 18-decimal accounting unit.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Player {
    /// Reverse-resolved display name; purely cosmetic and may lag reality.
    pub ens_name: Option<String>,

    /// Gas fees are always settled in the chain's native currency,
    /// regardless of the cave's settlement currency.
    pub fees_paid_in_eth: u128,
    pub fees_paid_in_usd: u128,

    pub looks_wagered: u128,
    pub looks_won: u128,
    pub looks_lost: u128,

    pub eth_wagered: u128,
    pub eth_won: u128,
    pub eth_lost: u128,

    /// won - lost in USD terms, independent of gas fees.
    pub usd_pnl: i128,
    pub usd_wagered: u128,
    pub usd_won: u128,
    pub usd_lost: u128,

    pub rounds_entered_count: u64,
    pub rounds_won_count: u64,
    pub rounds_lost_count: u64,

    /// Timestamp of the last round settled (revealed) for this player;
    /// anchors the daily cumulative carry-forward.
    pub last_played_timestamp: Option<u64>,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Write for Player {
    fn write(&self, writer: &mut impl BufMut) {
        match &self.ens_name {
            Some(name) => {
                true.write(writer);
                write_string(name, writer);
            }
            None => false.write(writer),
        }
        self.fees_paid_in_eth.write(writer);
        self.fees_paid_in_usd.write(writer);
        self.looks_wagered.write(writer);
        self.looks_won.write(writer);
        self.looks_lost.write(writer);
        self.eth_wagered.write(writer);
        self.eth_won.write(writer);
        self.eth_lost.write(writer);
        self.usd_pnl.write(writer);
        self.usd_wagered.write(writer);
        self.usd_won.write(writer);
        self.usd_lost.write(writer);
        self.rounds_entered_count.write(writer);
        self.rounds_won_count.write(writer);
        self.rounds_lost_count.write(writer);
        self.last_played_timestamp.write(writer);
    }
}

impl Read for Player {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let ens_name = if bool::read(reader)? {
            Some(read_string(reader, MAX_NAME_LENGTH)?)
        } else {
            None
        };
        Ok(Self {
            ens_name,
            fees_paid_in_eth: u128::read(reader)?,
            fees_paid_in_usd: u128::read(reader)?,
            looks_wagered: u128::read(reader)?,
            looks_won: u128::read(reader)?,
            looks_lost: u128::read(reader)?,
            eth_wagered: u128::read(reader)?,
            eth_won: u128::read(reader)?,
            eth_lost: u128::read(reader)?,
            usd_pnl: i128::read(reader)?,
            usd_wagered: u128::read(reader)?,
            usd_won: u128::read(reader)?,
            usd_lost: u128::read(reader)?,
            rounds_entered_count: u64::read(reader)?,
            rounds_won_count: u64::read(reader)?,
            rounds_lost_count: u64::read(reader)?,
            last_played_timestamp: Option::<u64>::read(reader)?,
        })
    }
}

impl EncodeSize for Player {
    fn encode_size(&self) -> usize {
        let name_size = match &self.ens_name {
            Some(name) => string_encode_size(name),
            None => 0,
        };
        1 + name_size
            + self.fees_paid_in_eth.encode_size()
            + self.fees_paid_in_usd.encode_size()
            + self.looks_wagered.encode_size()
            + self.looks_won.encode_size()
            + self.looks_lost.encode_size()
            + self.eth_wagered.encode_size()
            + self.eth_won.encode_size()
            + self.eth_lost.encode_size()
            + self.usd_pnl.encode_size()
            + self.usd_wagered.encode_size()
            + self.usd_won.encode_size()
            + self.usd_lost.encode_size()
            + self.rounds_entered_count.encode_size()
            + self.rounds_won_count.encode_size()
            + self.rounds_lost_count.encode_size()
            + self.last_played_timestamp.encode_size()
    }
}

/// One player's participation in one specific round, written exactly once
/// at entry time. The entry-time USD figure recorded here is the basis used
/// on loss and on cancellation; it is never re-priced.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct PlayerRound {
    pub usd_wagered: u128,
    pub fees_paid_in_eth: u128,
    pub fees_paid_in_usd: u128,
    pub entered_timestamp: u64,
    pub gems_earned: u128,
}

impl Write for PlayerRound {
    fn write(&self, writer: &mut impl BufMut) {
        self.usd_wagered.write(writer);
        self.fees_paid_in_eth.write(writer);
        self.fees_paid_in_usd.write(writer);
        self.entered_timestamp.write(writer);
        self.gems_earned.write(writer);
    }
}

impl Read for PlayerRound {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            usd_wagered: u128::read(reader)?,
            fees_paid_in_eth: u128::read(reader)?,
            fees_paid_in_usd: u128::read(reader)?,
            entered_timestamp: u64::read(reader)?,
            gems_earned: u128::read(reader)?,
        })
    }
}

impl EncodeSize for PlayerRound {
    fn encode_size(&self) -> usize {
        self.usd_wagered.encode_size()
            + self.fees_paid_in_eth.encode_size()
            + self.fees_paid_in_usd.encode_size()
            + self.entered_timestamp.encode_size()
            + self.gems_earned.encode_size()
    }
}
