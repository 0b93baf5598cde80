//! Typed records of the OpenRGB wire protocol.
//!
//! See the [OpenRGB SDK documentation](https://gitlab.com/CalcProgrammer1/OpenRGB/-/wikis/OpenRGB-SDK-Documentation)
//! for the wire layout these types mirror.

mod color;
mod device;
mod device_type;
mod implement;
mod led;
mod mode;
mod versioned;
mod zone;

pub use color::*;
pub use device::*;
pub use device_type::*;
pub(crate) use implement::*;
pub use led::*;
pub use mode::*;
pub use versioned::*;
pub use zone::*;

/// Declares a C-style enum that travels as a `u32` on the wire and implements:
///
/// * `TryFrom<u32>` (unknown values are a protocol error)
/// * `From<$enum> for u32`
/// * `DeserFromBuf` / `SerToBuf`
#[macro_export]
#[doc(hidden)]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value
            ),+
        }

        impl TryFrom<u32> for $name {
            type Error = $crate::OpenRgbError;

            fn try_from(raw: u32) -> ::core::result::Result<Self, Self::Error> {
                match raw {
                    $( $value => Ok(Self::$variant), )+
                    _ => Err($crate::OpenRgbError::Protocol(format!(
                        concat!("unknown ", stringify!($name), " value {}"),
                        raw
                    ))),
                }
            }
        }

        impl From<$name> for u32 {
            fn from(value: $name) -> Self {
                value as u32
            }
        }

        impl $crate::protocol::DeserFromBuf for $name {
            fn deserialize(
                buf: &mut $crate::protocol::ReceivedMessage<'_>,
            ) -> $crate::OpenRgbResult<Self> {
                Self::try_from(buf.read_u32()?)
            }
        }

        impl $crate::protocol::SerToBuf for $name {
            fn serialize(
                &self,
                buf: &mut $crate::protocol::WriteMessage,
            ) -> $crate::OpenRgbResult<()> {
                buf.write_u32(*self as u32);
                Ok(())
            }
        }
    };
}
