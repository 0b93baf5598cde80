use crate::OpenRgbResult;
use crate::protocol::{DeserFromBuf, ReceivedMessage, SerToBuf, WriteMessage};

// Tuples are field concatenation, the building block for composite bodies
// like `(zone_index, colors)`.

macro_rules! impl_tuple {
    ($($idx:tt $t:ident),+) => {
        impl<$($t: DeserFromBuf),+> DeserFromBuf for ($($t,)+) {
            fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
                Ok(($($t::deserialize(buf)?,)+))
            }
        }

        impl<$($t: SerToBuf),+> SerToBuf for ($($t,)+) {
            fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
                $(self.$idx.serialize(buf)?;)+
                Ok(())
            }
        }
    }
}

impl_tuple!(0 A);
impl_tuple!(0 A, 1 B);
impl_tuple!(0 A, 1 B, 2 C);
impl_tuple!(0 A, 1 B, 2 C, 3 D);
