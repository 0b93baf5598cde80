use crate::OpenRgbResult;
use crate::protocol::{DeserFromBuf, ReceivedMessage};

/// A single addressable LED.
///
/// The device and LED indices are filled in by the device request that
/// produced the value; any later successful device-list request invalidates
/// them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Led {
    name: String,
    /// Device-internal identifier, opaque to the client.
    value: u32,
    device_index: u32,
    index: u32,
}

impl Led {
    /// Name of this LED.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the device this LED belongs to.
    pub fn device_index(&self) -> u32 {
        self.device_index
    }

    /// Index of this LED within its device.
    pub fn index(&self) -> u32 {
        self.index
    }

    pub(crate) fn set_location(&mut self, device_index: u32, index: u32) {
        self.device_index = device_index;
        self.index = index;
    }
}

impl DeserFromBuf for Led {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        Ok(Led {
            name: buf.read_value()?,
            value: buf.read_value()?,
            device_index: u32::MAX,
            index: u32::MAX,
        })
    }
}
