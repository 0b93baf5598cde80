use crate::{OpenRgbError, OpenRgbResult};
use crate::protocol::{DeserFromBuf, ReceivedMessage, SerToBuf, WriteMessage};

// Collections travel as a `u16` element count followed by the elements.

impl<T: DeserFromBuf> DeserFromBuf for Vec<T> {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        let count = buf.read_u16()? as usize;
        buf.read_n_values(count)
    }
}

impl<T: SerToBuf> SerToBuf for &[T] {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        let count = u16::try_from(self.len()).map_err(|_| {
            OpenRgbError::Protocol(format!("{}-element list is too long to encode", self.len()))
        })?;
        buf.write_u16(count);
        for item in self.iter() {
            item.serialize(buf)?;
        }
        Ok(())
    }
}

impl<T: SerToBuf> SerToBuf for Vec<T> {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        self.as_slice().serialize(buf)
    }
}

#[cfg(test)]
mod tests {
    use crate::PROTOCOL_VERSION;
    use crate::protocol::{ReceivedMessage, WriteMessage};

    #[test]
    fn round_trip() -> crate::OpenRgbResult<()> {
        let values = vec![3_u32, 1, 4, 1, 5];
        let mut buf = WriteMessage::new(PROTOCOL_VERSION);
        buf.write_value(&values)?;
        let mut msg = buf.as_received();
        assert_eq!(msg.read_value::<Vec<u32>>()?, values);
        Ok(())
    }

    #[test]
    fn count_prefix() -> crate::OpenRgbResult<()> {
        let mut buf = WriteMessage::new(PROTOCOL_VERSION);
        buf.write_value(&[7_u8, 8, 9].as_slice())?;
        assert_eq!(buf.bytes(), &[3, 0, 7, 8, 9]);
        Ok(())
    }

    #[test]
    fn truncated_list_fails() {
        let mut msg = ReceivedMessage::new(&[4, 0, 1, 2], PROTOCOL_VERSION);
        assert!(msg.read_value::<Vec<u8>>().is_err());
    }
}
