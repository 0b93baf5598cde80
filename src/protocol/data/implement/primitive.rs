use flagset::FlagSet;

use crate::OpenRgbResult;
use crate::protocol::{DeserFromBuf, ReceivedMessage, SerToBuf, WriteMessage};

impl DeserFromBuf for () {
    fn deserialize(_buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        Ok(())
    }
}

impl SerToBuf for () {
    fn serialize(&self, _buf: &mut WriteMessage) -> OpenRgbResult<()> {
        Ok(())
    }
}

macro_rules! impl_int {
    ($int:ty, $read:ident, $write:ident) => {
        impl DeserFromBuf for $int {
            fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
                buf.$read()
            }
        }

        impl SerToBuf for $int {
            fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
                buf.$write(*self);
                Ok(())
            }
        }
    };
}

impl_int!(u8, read_u8, write_u8);
impl_int!(u16, read_u16, write_u16);
impl_int!(u32, read_u32, write_u32);
impl_int!(i32, read_i32, write_i32);

impl<T> DeserFromBuf for FlagSet<T>
where
    T: flagset::Flags<Type = u32>,
{
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        let raw = buf.read_u32()?;
        FlagSet::<T>::new(raw).map_err(|e| {
            crate::OpenRgbError::Protocol(format!(
                "invalid {} bits {raw:#010x}: {e}",
                std::any::type_name::<T>()
            ))
        })
    }
}

impl<T> SerToBuf for FlagSet<T>
where
    T: flagset::Flags<Type = u32>,
{
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        buf.write_u32(self.bits());
        Ok(())
    }
}
