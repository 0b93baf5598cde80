use crate::{OpenRgbError, OpenRgbResult};
use crate::protocol::{DeserFromBuf, ReceivedMessage, SerToBuf, WriteMessage};

// Strings travel as `u16` length (including the NUL) + bytes + `0x00`.

impl DeserFromBuf for String {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        let len = buf.read_u16()? as usize;
        let bytes = buf.read_bytes(len)?;
        match bytes.split_last() {
            Some((0, body)) => String::from_utf8(body.to_vec())
                .map_err(|e| OpenRgbError::Protocol(format!("string is not UTF-8: {e}"))),
            _ => Err(OpenRgbError::Protocol(format!(
                "{len}-byte string is missing its NUL terminator"
            ))),
        }
    }
}

impl SerToBuf for String {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        self.as_str().serialize(buf)
    }
}

impl SerToBuf for &str {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        let len = u16::try_from(self.len() + 1).map_err(|_| {
            OpenRgbError::Protocol(format!("{}-byte string is too long to encode", self.len()))
        })?;
        buf.write_u16(len);
        buf.write_value(&RawString(self))
    }
}

/// A string serialized without the leading length, as bytes + `0x00`.
///
/// The client-name announcement and the profile operations send names this
/// way, the server takes the whole body as the string.
pub(crate) struct RawString<'a>(pub &'a str);

impl SerToBuf for RawString<'_> {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        buf.write_bytes(self.0.as_bytes());
        buf.write_u8(b'\0');
        Ok(())
    }
}
