use crate::{OpenRgbError, OpenRgbResult};

/// Deserialize a value from a received byte buffer.
pub(crate) trait DeserFromBuf {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self>
    where
        Self: Sized;
}

/// Cursor over the body of a received message.
///
/// Tagged with the negotiated protocol version, since the wire layout of
/// several records depends on it. All integers are little-endian.
pub(crate) struct ReceivedMessage<'a> {
    protocol_version: u32,
    buf: &'a [u8],
    pos: usize,
}

impl std::fmt::Display for ReceivedMessage<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ReceivedMessage (protocol: {}, offset: {}): {:?}",
            self.protocol_version,
            self.pos,
            &self.buf[self.pos..]
        )
    }
}

impl<'a> ReceivedMessage<'a> {
    pub fn new(buf: &'a [u8], protocol_version: u32) -> Self {
        Self {
            protocol_version,
            buf,
            pos: 0,
        }
    }

    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }

    /// Offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Consumes the next `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> OpenRgbResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(OpenRgbError::Protocol(format!(
                "need {} more bytes, {} available",
                n,
                self.remaining()
            )));
        }
        let bytes = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    pub fn read_u8(&mut self) -> OpenRgbResult<u8> {
        Ok(self.read_bytes(1)?[0])
    }

    pub fn read_u16(&mut self) -> OpenRgbResult<u16> {
        let b = self.read_bytes(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    pub fn read_u32(&mut self) -> OpenRgbResult<u32> {
        let b = self.read_bytes(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    pub fn read_i32(&mut self) -> OpenRgbResult<i32> {
        Ok(self.read_u32()? as i32)
    }

    pub fn read_value<T: DeserFromBuf>(&mut self) -> OpenRgbResult<T> {
        T::deserialize(self)
    }

    /// Reads the next `n` values of type `T`.
    ///
    /// For a `u16`-count-prefixed list, read a `Vec<T>` instead.
    pub fn read_n_values<T: DeserFromBuf>(&mut self, n: usize) -> OpenRgbResult<Vec<T>> {
        let mut values = Vec::with_capacity(n);
        for _ in 0..n {
            values.push(T::deserialize(self)?);
        }
        Ok(values)
    }

    /// Advances the cursor to an absolute offset, discarding unread bytes.
    ///
    /// Size-prefixed records use this to skip trailing fields appended by
    /// newer servers. Rewinding is a malformed record: the declared size ends
    /// before the fields it is supposed to cover.
    pub fn skip_to(&mut self, pos: usize) -> OpenRgbResult<()> {
        if pos < self.pos {
            return Err(OpenRgbError::Protocol(format!(
                "record size ends at offset {pos} but {} bytes were consumed",
                self.pos
            )));
        }
        if pos > self.buf.len() {
            return Err(OpenRgbError::Protocol(format!(
                "record size ends at offset {pos} beyond the {}-byte message",
                self.buf.len()
            )));
        }
        self.pos = pos;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::PROTOCOL_VERSION;

    #[test]
    fn read_ints() -> OpenRgbResult<()> {
        let mut msg = ReceivedMessage::new(&[1, 2, 3, 4, 5, 6, 7], PROTOCOL_VERSION);
        assert_eq!(msg.read_u8()?, 1);
        assert_eq!(msg.read_u16()?, u16::from_le_bytes([2, 3]));
        assert_eq!(msg.read_u32()?, u32::from_le_bytes([4, 5, 6, 7]));
        assert_eq!(msg.remaining(), 0);
        assert!(msg.read_u8().is_err());
        Ok(())
    }

    #[test]
    fn read_i32_sign() -> OpenRgbResult<()> {
        let bytes = (-7_i32).to_le_bytes();
        let mut msg = ReceivedMessage::new(&bytes, PROTOCOL_VERSION);
        assert_eq!(msg.read_i32()?, -7);
        Ok(())
    }

    #[test]
    fn read_past_end_fails() {
        let mut msg = ReceivedMessage::new(&[0, 1], PROTOCOL_VERSION);
        assert!(msg.read_u32().is_err());
        // a failed read consumes nothing
        assert_eq!(msg.remaining(), 2);
    }

    #[test]
    fn skip_to_bounds() -> OpenRgbResult<()> {
        let mut msg = ReceivedMessage::new(&[0; 8], PROTOCOL_VERSION);
        msg.read_u32()?;
        assert!(msg.skip_to(2).is_err()); // behind the cursor
        assert!(msg.skip_to(9).is_err()); // beyond the buffer
        msg.skip_to(7)?;
        assert_eq!(msg.remaining(), 1);
        Ok(())
    }
}
