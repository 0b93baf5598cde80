//! Typed client API over the protocol session.

mod device_list;

pub use device_list::DeviceList;

use std::fmt::Debug;
use std::time::Duration;

use tokio::net::ToSocketAddrs;

use crate::protocol::data::{Color, Device, Led, Mode, Zone};
use crate::protocol::{DEFAULT_ADDR, DEFAULT_CLIENT_NAME, Session, UpdateStatus};
use crate::{OpenRgbError, OpenRgbResult};

/// Client for an OpenRGB SDK server.
///
/// A client starts disconnected; [`connect_to`](Self::connect_to) brings it
/// up and [`disconnect`](Self::disconnect) (or any fatal receive failure)
/// tears it down again. Reconnecting after a failure is the caller's job.
/// Operations on a disconnected client return
/// [`NotConnected`](crate::OpenRgbError::NotConnected) without touching the
/// network.
///
/// All operations serialize on an internal lock: one request is in flight at
/// a time.
///
/// # Example
///
/// ```no_run
/// use openrgb_client::{OpenRgbClient, OpenRgbResult};
///
/// #[tokio::main]
/// async fn main() -> OpenRgbResult<()> {
///     // connect to the default server at localhost
///     let client = OpenRgbClient::connect().await?;
///     for device in client.get_device_list().await?.iter() {
///         println!("{}: {}", device.index(), device.name());
///     }
///     client.disconnect().await;
///     Ok(())
/// }
/// ```
pub struct OpenRgbClient {
    session: Session,
}

impl Default for OpenRgbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenRgbClient {
    /// Creates a disconnected client.
    pub fn new() -> Self {
        Self {
            session: Session::new(),
        }
    }

    /// Connects a new client to the default server at
    /// [`DEFAULT_ADDR`](crate::DEFAULT_ADDR), announcing
    /// [`DEFAULT_CLIENT_NAME`](crate::DEFAULT_CLIENT_NAME).
    pub async fn connect() -> OpenRgbResult<Self> {
        let client = Self::new();
        client.connect_to(DEFAULT_ADDR, DEFAULT_CLIENT_NAME).await?;
        Ok(client)
    }

    /// Connects to the server at `addr` and announces `name`.
    ///
    /// Performs the version handshake; the version spoken afterwards is the
    /// minimum of [`PROTOCOL_VERSION`](crate::PROTOCOL_VERSION) and the
    /// server's. Servers predating version negotiation are rejected with
    /// [`VersionNotSupported`](crate::OpenRgbError::VersionNotSupported).
    ///
    /// # Arguments
    /// * `addr` - a socket address, e.g. a `(host, port)` tuple
    /// * `name` - display name shown in the server's client list
    pub async fn connect_to(
        &self,
        addr: impl ToSocketAddrs + Debug,
        name: &str,
    ) -> OpenRgbResult<()> {
        self.session.connect(addr, name).await
    }

    /// Closes the connection. Idempotent; returns whether a live connection
    /// was actually torn down.
    pub async fn disconnect(&self) -> bool {
        self.session.disconnect().await
    }

    /// Whether the session currently has a live connection.
    pub async fn is_connected(&self) -> bool {
        self.session.is_connected().await
    }

    /// Protocol version negotiated with the server, while connected.
    pub async fn negotiated_version(&self) -> Option<u32> {
        self.session.negotiated_version().await
    }

    /// Changes the receive timeout from its 500 ms default. Only valid while
    /// connected.
    pub async fn set_timeout(&self, timeout: Duration) -> OpenRgbResult<()> {
        self.session.set_timeout(timeout).await
    }

    /// Number of devices the server exposes.
    pub async fn device_count(&self) -> OpenRgbResult<u32> {
        self.session.controller_count().await
    }

    /// Fetches one device record.
    pub async fn get_device(&self, device_index: u32) -> OpenRgbResult<Device> {
        self.session.controller_data(device_index).await
    }

    /// Fetches all devices.
    ///
    /// If the server reports a device-list change while the enumeration is
    /// running, the partial result is discarded and the enumeration starts
    /// over, so the returned list is a consistent snapshot. Indices stored on
    /// previously returned devices are invalidated by this call.
    pub async fn get_device_list(&self) -> OpenRgbResult<DeviceList> {
        self.session.device_list().await.map(DeviceList::new)
    }

    /// Reports whether the device list changed since it was last fetched,
    /// without blocking.
    ///
    /// Cheap to poll: once a change has been observed this answers from
    /// memory, and otherwise it only peeks the socket for a pending
    /// notification.
    pub async fn check_for_device_updates(&self) -> OpenRgbResult<UpdateStatus> {
        self.session.check_for_device_updates().await
    }

    /// Sets every LED of `device` to `color`.
    pub async fn set_device_color(&self, device: &Device, color: Color) -> OpenRgbResult<()> {
        let colors = vec![color; device.leds().len()];
        self.session.update_leds(device.index(), &colors).await
    }

    /// Sets all LEDs of `device`, one color per LED.
    pub async fn set_device_colors(&self, device: &Device, colors: &[Color]) -> OpenRgbResult<()> {
        if colors.len() != device.leds().len() {
            return Err(OpenRgbError::InvalidCommand(format!(
                "device {} has {} LEDs, got {} colors",
                device.name(),
                device.leds().len(),
                colors.len()
            )));
        }
        self.session.update_leds(device.index(), colors).await
    }

    /// Sets every LED of `zone` to `color`.
    pub async fn set_zone_color(&self, zone: &Zone, color: Color) -> OpenRgbResult<()> {
        let colors = vec![color; zone.leds_count() as usize];
        self.session
            .update_zone_leds(zone.device_index(), zone.index(), &colors)
            .await
    }

    /// Sets all LEDs of `zone`, one color per LED.
    pub async fn set_zone_colors(&self, zone: &Zone, colors: &[Color]) -> OpenRgbResult<()> {
        if colors.len() != zone.leds_count() as usize {
            return Err(OpenRgbError::InvalidCommand(format!(
                "zone {} has {} LEDs, got {} colors",
                zone.name(),
                zone.leds_count(),
                colors.len()
            )));
        }
        self.session
            .update_zone_leds(zone.device_index(), zone.index(), colors)
            .await
    }

    /// Sets a single LED to `color`.
    pub async fn set_led_color(&self, led: &Led, color: Color) -> OpenRgbResult<()> {
        self.session
            .update_single_led(led.device_index(), led.index(), color)
            .await
    }

    /// Resizes a resizable zone to `new_size` LEDs.
    pub async fn set_zone_size(&self, zone: &Zone, new_size: u32) -> OpenRgbResult<()> {
        self.session
            .resize_zone(zone.device_index(), zone.index(), new_size)
            .await
    }

    /// Switches `device` to its direct-control mode.
    pub async fn switch_to_custom_mode(&self, device: &Device) -> OpenRgbResult<()> {
        self.session.set_custom_mode(device.index()).await
    }

    /// Makes `mode` the active mode of its device, including any parameter
    /// changes made to it.
    pub async fn change_mode(&self, mode: &Mode) -> OpenRgbResult<()> {
        self.session
            .update_mode(mode.device_index(), mode.index(), mode)
            .await
    }

    /// Persists `mode` on its device. Requires protocol version 3.
    pub async fn save_mode(&self, mode: &Mode) -> OpenRgbResult<()> {
        self.session
            .save_mode(mode.device_index(), mode.index(), mode)
            .await
    }

    /// Names of the profiles stored on the server. Requires protocol
    /// version 2.
    pub async fn get_profiles(&self) -> OpenRgbResult<Vec<String>> {
        self.session.profile_list().await
    }

    /// Saves the current state of all devices as profile `name`. Requires
    /// protocol version 2.
    pub async fn save_profile(&self, name: impl AsRef<str>) -> OpenRgbResult<()> {
        self.session.save_profile(name.as_ref()).await
    }

    /// Applies the saved profile `name`. Requires protocol version 2.
    pub async fn load_profile(&self, name: impl AsRef<str>) -> OpenRgbResult<()> {
        self.session.load_profile(name.as_ref()).await
    }

    /// Removes the saved profile `name`. Requires protocol version 2.
    pub async fn delete_profile(&self, name: impl AsRef<str>) -> OpenRgbResult<()> {
        self.session.delete_profile(name.as_ref()).await
    }
}
