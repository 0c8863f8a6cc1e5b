use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

/// The protocol-wide running aggregate, mutated only when a round resolves.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Game {
    pub eth_earned: u128,
    pub looks_earned: u128,
    pub usd_earned: u128,
    pub usd_volume: u128,
    pub rounds_played: u64,
    /// Timestamp of the last resolved round; anchors the protocol daily
    /// bucket's cumulative carry-forward.
    pub last_resolved_timestamp: Option<u64>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Write for Game {
    fn write(&self, writer: &mut impl BufMut) {
        self.eth_earned.write(writer);
        self.looks_earned.write(writer);
        self.usd_earned.write(writer);
        self.usd_volume.write(writer);
        self.rounds_played.write(writer);
        self.last_resolved_timestamp.write(writer);
    }
}

impl Read for Game {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        Ok(Self {
            eth_earned: u128::read(reader)?,
            looks_earned: u128::read(reader)?,
            usd_earned: u128::read(reader)?,
            usd_volume: u128::read(reader)?,
            rounds_played: u64::read(reader)?,
            last_resolved_timestamp: Option::<u64>::read(reader)?,
        })
    }
}

impl EncodeSize for Game {
    fn encode_size(&self) -> usize {
        self.eth_earned.encode_size()
            + self.looks_earned.encode_size()
            + self.usd_earned.encode_size()
            + self.usd_volume.encode_size()
            + self.rounds_played.encode_size()
            + self.last_resolved_timestamp.encode_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::{DecodeExt, Encode};

    #[test]
    fn test_game_codec_roundtrip() {
        let mut game = Game::new();
        game.eth_earned = 50_000;
        game.usd_volume = 20_000_000_000;
        game.rounds_played = 9;
        game.last_resolved_timestamp = Some(1_700_000_600);

        let decoded = Game::decode(game.encode().as_ref()).expect("game decode failed");
        assert_eq!(game, decoded);
    }
}
