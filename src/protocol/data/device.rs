use crate::OpenRgbResult;
use crate::protocol::data::{Color, DeviceType, Led, Mode, Versioned, Zone};
use crate::protocol::{DeserFromBuf, ReceivedMessage};

/// An RGB device as reported by the server.
///
/// Produced by the device requests; the client keeps no copy. The index (and
/// the indices on the contained zones, LEDs and modes) identify the device in
/// later commands and are invalidated by any later successful device-list
/// request. The vendor field exists on the wire from protocol version 1
/// onwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Device {
    index: u32,
    device_type: DeviceType,
    name: String,
    vendor: Versioned<1, String>,
    description: String,
    version: String,
    serial: String,
    location: String,
    active_mode: i32,
    modes: Vec<Mode>,
    zones: Vec<Zone>,
    leds: Vec<Led>,
    colors: Vec<Color>,
}

impl Device {
    /// Index of this device on the server.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Kind of hardware.
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// Name of this device.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Vendor, when the negotiated protocol version carries it.
    pub fn vendor(&self) -> Option<&str> {
        self.vendor.get().map(String::as_str)
    }

    /// Description of this device.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Firmware version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Serial number.
    pub fn serial(&self) -> &str {
        &self.serial
    }

    /// Location, typically a USB or HID path.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The currently active mode.
    pub fn active_mode(&self) -> Option<&Mode> {
        usize::try_from(self.active_mode)
            .ok()
            .and_then(|i| self.modes.get(i))
    }

    /// Modes this device supports.
    pub fn modes(&self) -> &[Mode] {
        &self.modes
    }

    /// First mode with the given name, if any.
    pub fn mode_named(&self, name: &str) -> Option<&Mode> {
        self.modes.iter().find(|m| m.name() == name)
    }

    /// Zones of this device, in LED order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// LEDs of this device. Each zone's LEDs occupy a contiguous sub-range,
    /// in zone order.
    pub fn leds(&self) -> &[Led] {
        &self.leds
    }

    /// Current LED colors, parallel to [`Self::leds`].
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Stamps this device and everything in it with its server-side index.
    pub(crate) fn finalize(&mut self, index: u32) {
        self.index = index;
        for (i, mode) in self.modes.iter_mut().enumerate() {
            mode.set_location(index, i as u32);
        }
        for (i, zone) in self.zones.iter_mut().enumerate() {
            zone.set_location(index, i as u32);
        }
        for (i, led) in self.leds.iter_mut().enumerate() {
            led.set_location(index, i as u32);
        }
    }
}

impl DeserFromBuf for Device {
    fn deserialize(buf: &mut ReceivedMessage<'_>) -> OpenRgbResult<Self> {
        let start = buf.position();
        // covers the whole record including the size field itself
        let data_size = buf.read_u32()? as usize;
        let device_type = buf.read_value()?;
        let name = buf.read_value()?;
        let vendor = buf.read_value()?;
        let description = buf.read_value()?;
        let version = buf.read_value()?;
        let serial = buf.read_value()?;
        let location = buf.read_value()?;
        let num_modes = buf.read_u16()? as usize;
        let active_mode = buf.read_i32()?;
        let modes = buf.read_n_values(num_modes)?;
        let zones = buf.read_value()?;
        let leds = buf.read_value()?;
        let colors = buf.read_value()?;
        // newer servers append fields this version does not know
        buf.skip_to(start + data_size)?;

        Ok(Self {
            index: u32::MAX,
            device_type,
            name,
            vendor,
            description,
            version,
            serial,
            location,
            active_mode,
            modes,
            zones,
            leds,
            colors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::WriteMessage;
    use crate::protocol::data::ZoneType;

    use crate::protocol::data::ColorMode;

    /// Serializes a minimal two-LED device record at the given version,
    /// padded with `trailing` unknown bytes inside the declared size.
    fn device_record(version: u32, trailing: usize) -> OpenRgbResult<WriteMessage> {
        let mut body = WriteMessage::new(version);
        body.push_value(&DeviceType::Keyboard)?
            .push_value(&"Board")?
            .push_value(&Versioned::<1, _>::new("Vendor Inc".to_string(), version))?
            .push_value(&"A keyboard")?
            .push_value(&"1.0")?
            .push_value(&"SN-1")?
            .push_value(&"USB: /dev/bus/001")?
            .push_value(&1_u16)? // mode count
            .push_value(&0_i32)?; // active mode
        // one bare "Direct" mode
        body.push_value(&"Direct")?
            .push_value(&0_i32)?
            .push_value(&(1_u32 << 5))? // HasPerLedColor
            .push_value(&0_u32)? // speed_min
            .push_value(&0_u32)?; // speed_max
        if version >= 3 {
            body.write_u32(0); // brightness_min
            body.write_u32(0); // brightness_max
            body.write_u32(0); // brightness
        }
        body.push_value(&0_u32)? // colors_min
            .push_value(&0_u32)? // colors_max
            .push_value(&0_u32)? // speed
            .push_value(&0_u32)? // direction
            .push_value(&ColorMode::PerLed)?
            .push_value(&0_u16)?; // mode colors
        // one linear zone holding both LEDs
        body.push_value(&1_u16)?
            .push_value(&"Main")?
            .push_value(&ZoneType::Linear)?
            .push_value(&2_u32)?
            .push_value(&2_u32)?
            .push_value(&2_u32)?
            .push_value(&0_u16)?;
        // LEDs and colors
        body.push_value(&2_u16)?
            .push_value(&"LED 0")?
            .push_value(&0_u32)?
            .push_value(&"LED 1")?
            .push_value(&0_u32)?
            .push_value(&vec![Color::new(1, 2, 3); 2])?;
        for _ in 0..trailing {
            body.write_u8(0xEE);
        }

        let mut record = WriteMessage::new(version);
        record.write_u32(body.len() as u32 + 4);
        record.write_bytes(body.bytes());
        Ok(record)
    }

    #[test]
    fn decode_at_version_3() -> OpenRgbResult<()> {
        let record = device_record(3, 0)?;
        let mut msg = record.as_received();
        let mut device = msg.read_value::<Device>()?;
        device.finalize(4);

        assert_eq!(device.index(), 4);
        assert_eq!(device.device_type(), DeviceType::Keyboard);
        assert_eq!(device.name(), "Board");
        assert_eq!(device.vendor(), Some("Vendor Inc"));
        assert_eq!(device.location(), "USB: /dev/bus/001");
        assert_eq!(device.modes().len(), 1);
        assert_eq!(device.active_mode().map(Mode::name), Some("Direct"));
        assert_eq!(device.zones().len(), 1);
        assert_eq!(device.leds().len(), 2);
        assert_eq!(device.colors(), &[Color::new(1, 2, 3); 2]);
        assert_eq!(msg.remaining(), 0);
        Ok(())
    }

    #[test]
    fn decode_without_vendor_below_version_1() -> OpenRgbResult<()> {
        let record = device_record(0, 0)?;
        let mut msg = record.as_received();
        let device = msg.read_value::<Device>()?;
        assert_eq!(device.vendor(), None);
        assert_eq!(device.name(), "Board");
        Ok(())
    }

    #[test]
    fn finalize_stamps_indices() -> OpenRgbResult<()> {
        let record = device_record(3, 0)?;
        let mut device = record.as_received().read_value::<Device>()?;
        device.finalize(7);
        assert_eq!(device.modes()[0].device_index(), 7);
        assert_eq!(device.modes()[0].index(), 0);
        assert_eq!(device.zones()[0].device_index(), 7);
        assert_eq!(device.leds()[1].device_index(), 7);
        assert_eq!(device.leds()[1].index(), 1);
        Ok(())
    }

    #[test]
    fn unknown_trailing_bytes_are_skipped() -> OpenRgbResult<()> {
        let record = device_record(3, 9)?;
        let mut msg = record.as_received();
        let device = msg.read_value::<Device>()?;
        assert_eq!(device.name(), "Board");
        assert_eq!(msg.remaining(), 0);
        Ok(())
    }

    #[test]
    fn undersized_record_fails() -> OpenRgbResult<()> {
        let good = device_record(3, 0)?;
        let mut bytes = good.bytes().to_vec();
        // declare a size smaller than the fields actually consume
        bytes[0..4].copy_from_slice(&8_u32.to_le_bytes());
        let mut msg = ReceivedMessage::new(&bytes, 3);
        assert!(msg.read_value::<Device>().is_err());
        Ok(())
    }

    #[test]
    fn mode_lookup_by_name() -> OpenRgbResult<()> {
        let record = device_record(3, 0)?;
        let mut device = record.as_received().read_value::<Device>()?;
        device.finalize(0);
        assert!(device.mode_named("Direct").is_some());
        assert!(device.mode_named("direct").is_none());
        Ok(())
    }
}
