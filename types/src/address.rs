use bytes::{Buf, BufMut};
use commonware_codec::{EncodeSize, Error, Read, Write};
use std::fmt;

/// A 20-byte account address as emitted by the source ledger.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; Self::LENGTH]);

impl Address {
    pub const LENGTH: usize = 20;

    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }
}

impl From<[u8; Address::LENGTH]> for Address {
    fn from(bytes: [u8; Address::LENGTH]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Write for Address {
    fn write(&self, writer: &mut impl BufMut) {
        writer.put_slice(&self.0);
    }
}

impl Read for Address {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        if reader.remaining() < Self::LENGTH {
            return Err(Error::EndOfBuffer);
        }
        let mut bytes = [0u8; Self::LENGTH];
        reader.copy_to_slice(&mut bytes);
        Ok(Self(bytes))
    }
}

impl EncodeSize for Address {
    fn encode_size(&self) -> usize {
        Self::LENGTH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use commonware_codec::{DecodeExt, Encode};

    #[test]
    fn test_address_codec_roundtrip() {
        let mut bytes = [0u8; Address::LENGTH];
        bytes[0] = 0xab;
        bytes[19] = 0x01;
        let address = Address::new(bytes);
        let decoded = Address::decode(address.encode().as_ref()).expect("address decode failed");
        assert_eq!(address, decoded);
    }

    #[test]
    fn test_address_display() {
        let mut bytes = [0u8; Address::LENGTH];
        bytes[0] = 0xde;
        bytes[1] = 0xad;
        let address = Address::new(bytes);
        assert!(address.to_string().starts_with("0xdead"));
        assert_eq!(address.to_string().len(), 2 + 2 * Address::LENGTH);
    }
}
