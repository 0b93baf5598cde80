use crate::wire_enum;

wire_enum! {
    /// Message type codes of the OpenRGB protocol.
    ///
    /// Requests that expect a reply share their code with it. See the
    /// [OpenRGB SDK documentation](https://gitlab.com/CalcProgrammer1/OpenRGB/-/wikis/OpenRGB-SDK-Documentation#packet-ids)
    /// for the full table.
    pub(crate) enum PacketId {
        /// Request the number of devices.
        RequestControllerCount = 0,

        /// Request one device record.
        RequestControllerData = 1,

        /// Exchange protocol versions with the server.
        RequestProtocolVersion = 40,

        /// Announce this client's display name.
        SetClientName = 50,

        /// Unsolicited notification that the server's device list changed.
        /// Carries no body.
        DeviceListUpdated = 100,

        /// Request the profile name list. (Protocol 2)
        RequestProfileList = 150,

        /// Save the current state as a named profile. (Protocol 2)
        RequestSaveProfile = 151,

        /// Apply a named profile. (Protocol 2)
        RequestLoadProfile = 152,

        /// Remove a named profile. (Protocol 2)
        RequestDeleteProfile = 153,

        /// Resize a zone.
        ResizeZone = 1000,

        /// Set all LEDs of a device.
        UpdateLeds = 1050,

        /// Set the LEDs of one zone.
        UpdateZoneLeds = 1051,

        /// Set one LED.
        UpdateSingleLed = 1052,

        /// Switch a device to its direct-control mode.
        SetCustomMode = 1100,

        /// Change a device's active mode.
        UpdateMode = 1101,

        /// Persist a mode on the device. (Protocol 3)
        SaveMode = 1102,
    }
}
