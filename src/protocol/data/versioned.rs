use crate::OpenRgbResult;
use crate::protocol::{DeserFromBuf, ReceivedMessage, SerToBuf, WriteMessage};

/// A field that only exists on the wire from protocol version `MIN` onwards.
///
/// Decoding with an older negotiated version yields [`Versioned::Absent`] and
/// consumes no bytes; encoding an absent value writes none. This keeps record
/// sizes exact under version gating.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Versioned<const MIN: u32, T> {
    /// The negotiated version carries this field.
    Present(T),

    /// The negotiated version predates this field.
    Absent,
}

impl<const MIN: u32, T> Versioned<MIN, T> {
    /// Wraps `value` if `negotiated` is new enough, [`Versioned::Absent`]
    /// otherwise.
    pub fn new(value: T, negotiated: u32) -> Self {
        if negotiated >= MIN {
            Self::Present(value)
        } else {
            Self::Absent
        }
    }

    /// Returns the value if the field is present.
    pub fn get(&self) -> Option<&T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent => None,
        }
    }

    /// Replaces the value; a no-op when the field is absent.
    pub fn replace(&mut self, value: T) {
        if let Self::Present(slot) = self {
            *slot = value;
        }
    }
}

impl<const MIN: u32, T> From<Versioned<MIN, T>> for Option<T> {
    fn from(value: Versioned<MIN, T>) -> Self {
        match value {
            Versioned::Present(v) => Some(v),
            Versioned::Absent => None,
        }
    }
}

impl<const MIN: u32, T: DeserFromBuf> DeserFromBuf for Versioned<MIN, T> {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        if buf.protocol_version() < MIN {
            return Ok(Self::Absent);
        }
        Ok(Self::Present(T::deserialize(buf)?))
    }
}

impl<const MIN: u32, T: SerToBuf> SerToBuf for Versioned<MIN, T> {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        if buf.protocol_version() < MIN {
            return Ok(());
        }
        match self {
            // absent values stay absent even at a newer version, they came
            // from a decode that never saw the field
            Self::Absent => Ok(()),
            Self::Present(value) => value.serialize(buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::WriteMessage;

    #[test]
    fn absent_below_minimum_version() -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(2);
        buf.write_u32(99);
        let mut msg = buf.as_received();
        assert_eq!(msg.read_value::<Versioned<3, u32>>()?, Versioned::Absent);
        // nothing consumed
        assert_eq!(msg.read_u32()?, 99);
        Ok(())
    }

    #[test]
    fn present_at_minimum_version() -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(3);
        buf.write_u32(99);
        let mut msg = buf.as_received();
        assert_eq!(
            msg.read_value::<Versioned<3, u32>>()?,
            Versioned::Present(99)
        );
        Ok(())
    }

    #[test]
    fn encode_matches_version() -> OpenRgbResult<()> {
        let value = Versioned::<3, u32>::Present(7);
        let mut old = WriteMessage::new(2);
        old.write_value(&value)?;
        assert_eq!(old.len(), 0);
        let mut new = WriteMessage::new(3);
        new.write_value(&value)?;
        assert_eq!(new.len(), 4);
        Ok(())
    }

    #[test]
    fn replace_skips_absent() {
        let mut absent = Versioned::<3, u32>::Absent;
        absent.replace(1);
        assert_eq!(absent.get(), None);
        let mut present = Versioned::<3, u32>::Present(1);
        present.replace(2);
        assert_eq!(present.get(), Some(&2));
    }
}
