use array2d::Array2D;

use crate::{OpenRgbError, OpenRgbResult};
use crate::protocol::{DeserFromBuf, ReceivedMessage};
use crate::wire_enum;

wire_enum! {
    /// Layout of a [`Zone`].
    pub enum ZoneType {
        /// A single LED.
        Single = 0,
        /// A strip of LEDs.
        Linear = 1,
        /// A two-dimensional grid of LEDs.
        Matrix = 2,
    }
}

/// A contiguous range of LEDs on a device with shared layout semantics.
///
/// The device and zone indices are filled in by the device request that
/// produced the value; any later successful device-list request invalidates
/// them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Zone {
    device_index: u32,
    index: u32,
    name: String,
    zone_type: ZoneType,
    leds_min: u32,
    leds_max: u32,
    leds_count: u32,
    matrix: Option<Array2D<u32>>,
}

impl Zone {
    /// Name of this zone.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the device this zone belongs to.
    pub fn device_index(&self) -> u32 {
        self.device_index
    }

    /// Index of this zone within its device.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Layout of this zone.
    pub fn zone_type(&self) -> ZoneType {
        self.zone_type
    }

    /// Minimum LED count if the zone is resizable.
    pub fn leds_min(&self) -> u32 {
        self.leds_min
    }

    /// Maximum LED count if the zone is resizable.
    pub fn leds_max(&self) -> u32 {
        self.leds_max
    }

    /// Current LED count.
    pub fn leds_count(&self) -> u32 {
        self.leds_count
    }

    /// Cell-to-LED map for [`ZoneType::Matrix`] zones.
    ///
    /// Each cell holds the device LED index at that position, or `u32::MAX`
    /// for an empty cell.
    pub fn matrix(&self) -> Option<&Array2D<u32>> {
        self.matrix.as_ref()
    }

    pub(crate) fn set_location(&mut self, device_index: u32, index: u32) {
        self.device_index = device_index;
        self.index = index;
    }
}

impl DeserFromBuf for Zone {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        let name = buf.read_value()?;
        let zone_type = buf.read_value()?;
        let leds_min = buf.read_value()?;
        let leds_max = buf.read_value()?;
        let leds_count = buf.read_value()?;
        // u16 byte length of the matrix block; zero for non-matrix zones
        let matrix_len = buf.read_u16()? as usize;
        let matrix = match matrix_len {
            0 => None,
            _ => {
                let height = buf.read_u32()? as usize;
                let width = buf.read_u32()? as usize;
                let cells = buf.read_n_values::<u32>(height * width)?;
                Some(
                    Array2D::from_row_major(&cells, height, width).map_err(|e| {
                        OpenRgbError::Protocol(format!("bad {height}x{width} zone matrix: {e}"))
                    })?,
                )
            }
        };

        Ok(Self {
            device_index: u32::MAX,
            index: u32::MAX,
            name,
            zone_type,
            leds_min,
            leds_max,
            leds_count,
            matrix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::WriteMessage;

    #[test]
    fn decode_linear() -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(3);
        buf.push_value(&"Fan 1")?
            .push_value(&ZoneType::Linear)?
            .push_value(&3_u32)? // leds_min
            .push_value(&18_u32)? // leds_max
            .push_value(&15_u32)? // leds_count
            .push_value(&0_u16)?; // no matrix
        let mut msg = buf.as_received();
        let zone = msg.read_value::<Zone>()?;
        assert_eq!(zone.name(), "Fan 1");
        assert_eq!(zone.zone_type(), ZoneType::Linear);
        assert_eq!(zone.leds_min(), 3);
        assert_eq!(zone.leds_max(), 18);
        assert_eq!(zone.leds_count(), 15);
        assert!(zone.matrix().is_none());
        assert_eq!(msg.remaining(), 0);
        Ok(())
    }

    #[test]
    fn decode_matrix() -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(3);
        buf.push_value(&"Keys")?
            .push_value(&ZoneType::Matrix)?
            .push_value(&6_u32)?
            .push_value(&6_u32)?
            .push_value(&6_u32)?
            .push_value(&32_u16)? // matrix block: (2 + 2*3) u32s
            .push_value(&2_u32)? // height
            .push_value(&3_u32)?; // width
        for cell in [0_u32, 1, 2, 3, u32::MAX, 5] {
            buf.write_u32(cell);
        }
        let mut msg = buf.as_received();
        let zone = msg.read_value::<Zone>()?;
        let matrix = zone.matrix().expect("matrix zone");
        assert_eq!(matrix.num_rows(), 2);
        assert_eq!(matrix.num_columns(), 3);
        assert_eq!(matrix[(0, 1)], 1);
        assert_eq!(matrix[(1, 1)], u32::MAX);
        Ok(())
    }

    #[test]
    fn truncated_matrix_fails() -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(3);
        buf.push_value(&"Keys")?
            .push_value(&ZoneType::Matrix)?
            .push_value(&6_u32)?
            .push_value(&6_u32)?
            .push_value(&6_u32)?
            .push_value(&32_u16)?
            .push_value(&2_u32)?
            .push_value(&3_u32)?
            .push_value(&0_u32)?; // only one of six cells
        let mut msg = buf.as_received();
        assert!(msg.read_value::<Zone>().is_err());
        Ok(())
    }
}
