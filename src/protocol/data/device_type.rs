use crate::wire_enum;

wire_enum! {
    /// Kind of hardware a [device](crate::Device) is.
    pub enum DeviceType {
        /// Motherboard.
        Motherboard = 0,
        /// DRAM module.
        Dram = 1,
        /// Graphics card.
        Gpu = 2,
        /// CPU or case cooler.
        Cooler = 3,
        /// LED strip.
        LedStrip = 4,
        /// Keyboard.
        Keyboard = 5,
        /// Mouse.
        Mouse = 6,
        /// Mouse mat.
        MouseMat = 7,
        /// Headset.
        Headset = 8,
        /// Headset stand.
        HeadsetStand = 9,
        /// Gamepad.
        Gamepad = 10,
        /// Standalone light.
        Light = 11,
        /// Speaker.
        Speaker = 12,
        /// Virtual device.
        Virtual = 13,
        /// Anything the server could not classify.
        Unknown = 14,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PROTOCOL_VERSION;
    use crate::protocol::WriteMessage;

    #[test]
    fn wire_round_trip() -> crate::OpenRgbResult<()> {
        let mut buf = WriteMessage::new(PROTOCOL_VERSION);
        buf.write_value(&DeviceType::Cooler)?;
        let mut msg = buf.as_received();
        assert_eq!(msg.read_value::<DeviceType>()?, DeviceType::Cooler);
        Ok(())
    }

    #[test]
    fn out_of_range_fails() {
        assert!(DeviceType::try_from(15).is_err());
    }
}
