use rgb::RGB8;

use crate::OpenRgbResult;
use crate::protocol::{DeserFromBuf, ReceivedMessage, SerToBuf, WriteMessage};

/// An LED color, aliased to the [rgb] crate's [RGB8] type.
///
/// On the wire a color is four bytes: R, G, B and a zero pad byte.
pub type Color = RGB8;

impl DeserFromBuf for Color {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        let r = buf.read_u8()?;
        let g = buf.read_u8()?;
        let b = buf.read_u8()?;
        buf.read_u8()?; // pad byte
        Ok(Color { r, g, b })
    }
}

impl SerToBuf for Color {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        buf.write_u8(self.r);
        buf.write_u8(self.g);
        buf.write_u8(self.b);
        buf.write_u8(0);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PROTOCOL_VERSION;

    #[test]
    fn wire_form() -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(PROTOCOL_VERSION);
        buf.write_value(&Color::new(0xAA, 0xBB, 0xCC))?;
        assert_eq!(buf.bytes(), &[0xAA, 0xBB, 0xCC, 0x00]);
        Ok(())
    }

    #[test]
    fn decode_skips_pad() -> OpenRgbResult<()> {
        let mut msg = ReceivedMessage::new(&[1, 2, 3, 0xFF, 9], PROTOCOL_VERSION);
        assert_eq!(msg.read_value::<Color>()?, Color::new(1, 2, 3));
        assert_eq!(msg.remaining(), 1);
        Ok(())
    }
}
