use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, ReadExt, Write};

/// Settlement currency of a cave. Both are 18-decimal fixed-point units;
/// ETH is the chain's native asset and LOOKS the protocol token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Currency {
    Eth,
    Looks,
}

impl Write for Currency {
    fn write(&self, writer: &mut impl BufMut) {
        match self {
            Self::Eth => 0u8.write(writer),
            Self::Looks => 1u8.write(writer),
        }
    }
}

impl Read for Currency {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        match u8::read(reader)? {
            0 => Ok(Self::Eth),
            1 => Ok(Self::Looks),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl EncodeSize for Currency {
    fn encode_size(&self) -> usize {
        1
    }
}
