use crate::{Address, MAX_ROUND_ENTRANTS};
use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, RangeCfg, Read, ReadExt, Write};

/// Lifecycle of a round. Transitions are one-directional: OPEN may move to
/// REVEALED or CANCELLED, both terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    Open,
    Revealed,
    Cancelled,
}

impl RoundStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Open)
    }
}

impl Write for RoundStatus {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Open => 0u8.write(writer),
            Self::Revealed => 1u8.write(writer),
            Self::Cancelled => 2u8.write(writer),
        }
    }
}

impl Read for RoundStatus {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(reader)? {
            0 => Ok(Self::Open),
            1 => Ok(Self::Revealed),
            2 => Ok(Self::Cancelled),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for RoundStatus {
    fn encode_size(&self) -> usize {
        1
    }
}

/// One instance of play under a cave. The entrant list is appended in entry
/// order so a cancellation can unwind entry-time effects without consulting
/// the ledger (the authoritative entrant/loser query exists only for
/// reveals).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    pub status: RoundStatus,
    pub entrants: Vec<Address>,
    /// Zero until the explicit "opened" signal arrives; a round created
    /// lazily by an entry has not seen that signal yet.
    pub opened_timestamp: u64,
    pub closed_timestamp: Option<u64>,
    /// Set exactly once, when the round is revealed.
    pub loser: Option<Address>,
}

impl Round {
    pub fn new() -> Self {
        Self {
            status: RoundStatus::Open,
            entrants: Vec::new(),
            opened_timestamp: 0,
            closed_timestamp: None,
            loser: None,
        }
    }

    pub fn players_count(&self) -> u64 {
        self.entrants.len() as u64
    }
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for Round {
    fn write(&self, writer: &mut impl BufMut) {
        self.status.write(writer);
        self.entrants.write(writer);
        self.opened_timestamp.write(writer);
        self.closed_timestamp.write(writer);
        self.loser.write(writer);
    }
}

impl Read for Round {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            status: RoundStatus::read(reader)?,
            entrants: Vec::<Address>::read_cfg(
                reader,
                &(RangeCfg::from(0..=MAX_ROUND_ENTRANTS), ()),
            )?,
            opened_timestamp: u64::read(reader)?,
            closed_timestamp: Option::<u64>::read(reader)?,
            loser: Option::<Address>::read(reader)?,
        })
    }
}

impl EncodeSize for Round {
    fn encode_size(&self) -> usize {
        self.status.encode_size()
            + self.entrants.encode_size()
            + self.opened_timestamp.encode_size()
            + self.closed_timestamp.encode_size()
            + self.loser.encode_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::{DecodeExt, Encode};

    #[test]
    fn test_round_codec_roundtrip() {
        let mut round = Round::new();
        round.entrants.push(Address::new([1u8; Address::LENGTH]));
        round.entrants.push(Address::new([2u8; Address::LENGTH]));
        round.status = RoundStatus::Revealed;
        round.opened_timestamp = 1_700_000_000;
        round.closed_timestamp = Some(1_700_000_600);
        round.loser = Some(Address::new([1u8; Address::LENGTH]));

        let decoded = Round::decode(round.encode().as_ref()).expect("round decode failed");
        assert_eq!(round, decoded);
        assert_eq!(decoded.players_count(), 2);
    }

    #[test]
    fn test_round_codec_at_entrant_capacity() {
        // The largest party size the registry accepts must still decode.
        let mut round = Round::new();
        for i in 0..MAX_ROUND_ENTRANTS {
            let mut bytes = [0u8; Address::LENGTH];
            bytes[..2].copy_from_slice(&(i as u16).to_be_bytes());
            round.entrants.push(Address::new(bytes));
        }

        let decoded = Round::decode(round.encode().as_ref()).expect("full round decode failed");
        assert_eq!(round, decoded);
        assert_eq!(decoded.players_count(), MAX_ROUND_ENTRANTS as u64);
    }

    #[test]
    fn test_terminal_states() {
        assert!(!RoundStatus::Open.is_terminal());
        assert!(RoundStatus::Revealed.is_terminal());
        assert!(RoundStatus::Cancelled.is_terminal());
    }
}
