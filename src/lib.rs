//! Client library for the [OpenRGB](https://gitlab.com/CalcProgrammer1/OpenRGB/-/blob/master/Documentation/OpenRGBSDK.md) SDK server.
//!
//! This client is async and requires a [tokio](https://tokio.rs) runtime to
//! run.
//!
//! # Example
//!
//! ```no_run
//! use openrgb_client::{Color, OpenRgbClient, OpenRgbResult};
//!
//! #[tokio::main]
//! async fn main() -> OpenRgbResult<()> {
//!     // connect to the default server at localhost
//!     let client = OpenRgbClient::connect().await?;
//!     let devices = client.get_device_list().await?;
//!     for device in &devices {
//!         client.set_device_color(device, Color::new(0, 255, 0)).await?;
//!     }
//!     Ok(())
//! }
//! ```
//!
//! [`OpenRgbClient`] is the entry point: it enumerates [`Device`]s and pushes
//! color, mode and profile updates to the server. Devices (and the zones,
//! LEDs and modes inside them) are plain snapshots owned by the caller;
//! [`OpenRgbClient::check_for_device_updates`] tells when they have gone
//! stale.

#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

#[doc(inline)]
pub use {
    client::*,
    error::{OpenRgbError, OpenRgbResult},
    protocol::data::{
        Color, ColorMode, Device, DeviceType, Direction, Led, Mode, ModeFlag, Versioned, Zone,
        ZoneType,
    },
    protocol::{
        DEFAULT_ADDR, DEFAULT_CLIENT_NAME, DEFAULT_TIMEOUT, PROTOCOL_VERSION, UpdateStatus,
    },
};

mod client;
mod error;
pub(crate) mod protocol;
