//! Wire-level session with an OpenRGB server: codec, framed stream and the
//! request/reply state machine.

use std::fmt::Debug;
use std::net::Ipv4Addr;
use std::time::Duration;

use tokio::net::ToSocketAddrs;
use tokio::sync::Mutex;

use crate::protocol::data::{Color, Device, Mode, RawString};
use crate::{OpenRgbError, OpenRgbResult};

pub mod data;
mod deserialize;
mod packet;
mod serialize;
mod stream;

pub(crate) use {deserialize::*, packet::*, serialize::*, stream::*};

/// Protocol version implemented by this client.
///
/// The version actually spoken on a connection is the minimum of this and
/// the server's version.
pub const PROTOCOL_VERSION: u32 = 3;

/// Default OpenRGB server address.
pub const DEFAULT_ADDR: (Ipv4Addr, u16) = (Ipv4Addr::LOCALHOST, 6742);

/// Client name announced to the server when none is given.
pub const DEFAULT_CLIENT_NAME: &str = "openrgb-client";

/// Receive timeout installed right after connecting.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(500);

/// Device index used by messages that do not target a device.
const NO_DEVICE_ID: u32 = 0;

/// Device-list freshness, as reported by
/// [`OpenRgbClient::check_for_device_updates`](crate::OpenRgbClient::check_for_device_updates).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateStatus {
    /// No device-list change observed since the last device-list request.
    UpToDate,

    /// The server's device list changed; devices held by the caller are
    /// stale, along with every index stored on them.
    OutOfDate,
}

/// A connection-oriented session with one OpenRGB server.
///
/// Created disconnected; [`connect`](Self::connect) brings it up and any
/// fatal receive failure tears it down. All access is serialized through one
/// lock, which is what limits the session to a single outstanding request
/// and keeps the freshness probe's socket access exclusive.
pub(crate) struct Session {
    state: Mutex<SessionState>,
}

#[derive(Default)]
struct SessionState {
    stream: Option<ProtocolStream>,

    /// The freshness bit: set on connect and on every observed
    /// `DeviceListUpdated`, cleared only at the start of a device-list sweep.
    list_stale: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(SessionState::default()),
        }
    }

    /// Connects, negotiates the protocol version and announces `name`.
    ///
    /// Any failure mid-handshake closes the socket before returning, leaving
    /// the session disconnected.
    pub async fn connect(&self, addr: impl ToSocketAddrs + Debug, name: &str) -> OpenRgbResult<()> {
        let mut state = self.state.lock().await;
        if state.stream.is_some() {
            return Err(OpenRgbError::AlreadyConnected);
        }

        tracing::debug!("connecting to OpenRGB server at {addr:?}");
        let addr_string = format!("{addr:?}");
        let stream = ProtocolStream::connect(addr)
            .await
            .map_err(|source| OpenRgbError::Connection {
                addr: addr_string,
                source,
            })?;

        // handshake on a scratch state: every early return below drops the
        // socket, reverting to disconnected
        let mut pending = SessionState {
            stream: Some(stream),
            list_stale: false,
        };
        let server: u32 = pending
            .request(
                NO_DEVICE_ID,
                PacketId::RequestProtocolVersion,
                &PROTOCOL_VERSION,
            )
            .await?;
        if server == 0 {
            return Err(OpenRgbError::VersionNotSupported { server });
        }
        let negotiated = PROTOCOL_VERSION.min(server);
        pending.stream()?.set_protocol_version(negotiated);
        pending
            .write_packet(NO_DEVICE_ID, PacketId::SetClientName, &RawString(name))
            .await?;

        tracing::debug!("connected as {name:?}, negotiated protocol version {negotiated}");
        *state = SessionState {
            stream: pending.stream.take(),
            // the device list has never been fetched on this connection
            list_stale: true,
        };
        Ok(())
    }

    /// Closes the connection. Idempotent; returns whether a live connection
    /// was actually torn down.
    pub async fn disconnect(&self) -> bool {
        let torn_down = self.state.lock().await.stream.take().is_some();
        if torn_down {
            tracing::debug!("disconnected from OpenRGB server");
        }
        torn_down
    }

    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.stream.is_some()
    }

    /// Protocol version negotiated with the server, while connected.
    pub async fn negotiated_version(&self) -> Option<u32> {
        self.state
            .lock()
            .await
            .stream
            .as_ref()
            .map(ProtocolStream::protocol_version)
    }

    /// Changes the receive timeout. Only valid while connected.
    pub async fn set_timeout(&self, timeout: Duration) -> OpenRgbResult<()> {
        self.state.lock().await.stream()?.set_timeout(timeout);
        Ok(())
    }

    pub async fn controller_count(&self) -> OpenRgbResult<u32> {
        let mut state = self.state.lock().await;
        let result = state
            .request(NO_DEVICE_ID, PacketId::RequestControllerCount, &())
            .await;
        state.reap(result)
    }

    pub async fn controller_data(&self, device_index: u32) -> OpenRgbResult<Device> {
        let mut state = self.state.lock().await;
        let result = state.fetch_device(device_index).await;
        state.reap(result)
    }

    /// Fetches the full device list, restarting the sweep as long as
    /// device-list-changed notifications interleave with it.
    pub async fn device_list(&self) -> OpenRgbResult<Vec<Device>> {
        let mut state = self.state.lock().await;
        let result = state.sweep_device_list().await;
        state.reap(result)
    }

    /// Reports device-list freshness without blocking.
    ///
    /// Outcomes that desynchronize the inbound stream (`ConnectionClosed`,
    /// `UnexpectedMessage`) close the socket: there is no way to resume a
    /// session once stray bytes have been consumed.
    pub async fn check_for_device_updates(&self) -> OpenRgbResult<UpdateStatus> {
        let mut state = self.state.lock().await;
        state.stream()?;
        if state.list_stale {
            return Ok(UpdateStatus::OutOfDate);
        }
        let result = state.probe_for_updates().await;
        let result = state.reap(result);
        if matches!(result, Err(OpenRgbError::UnexpectedMessage { .. })) {
            tracing::debug!("closing compromised session after freshness probe");
            state.stream = None;
        }
        result
    }

    pub async fn update_leds(&self, device_index: u32, colors: &[Color]) -> OpenRgbResult<()> {
        self.write(device_index, PacketId::UpdateLeds, &SizedPacket(colors))
            .await
    }

    pub async fn update_zone_leds(
        &self,
        device_index: u32,
        zone_index: u32,
        colors: &[Color],
    ) -> OpenRgbResult<()> {
        self.write(
            device_index,
            PacketId::UpdateZoneLeds,
            &SizedPacket((zone_index, colors)),
        )
        .await
    }

    pub async fn update_single_led(
        &self,
        device_index: u32,
        led_index: u32,
        color: Color,
    ) -> OpenRgbResult<()> {
        self.write(device_index, PacketId::UpdateSingleLed, &(led_index, color))
            .await
    }

    pub async fn resize_zone(
        &self,
        device_index: u32,
        zone_index: u32,
        new_size: u32,
    ) -> OpenRgbResult<()> {
        self.write(device_index, PacketId::ResizeZone, &(zone_index, new_size))
            .await
    }

    pub async fn set_custom_mode(&self, device_index: u32) -> OpenRgbResult<()> {
        self.write(device_index, PacketId::SetCustomMode, &()).await
    }

    pub async fn update_mode(
        &self,
        device_index: u32,
        mode_index: u32,
        mode: &Mode,
    ) -> OpenRgbResult<()> {
        self.write(
            device_index,
            PacketId::UpdateMode,
            &SizedPacket((mode_index, mode)),
        )
        .await
    }

    pub async fn save_mode(
        &self,
        device_index: u32,
        mode_index: u32,
        mode: &Mode,
    ) -> OpenRgbResult<()> {
        let mut state = self.state.lock().await;
        state.require_version(3, "save mode")?;
        state
            .write_packet(
                device_index,
                PacketId::SaveMode,
                &SizedPacket((mode_index, mode)),
            )
            .await
    }

    pub async fn profile_list(&self) -> OpenRgbResult<Vec<String>> {
        let mut state = self.state.lock().await;
        state.require_version(2, "profile list")?;
        let result = state
            .request::<_, (u32, Vec<String>)>(NO_DEVICE_ID, PacketId::RequestProfileList, &())
            .await
            .map(|(_size, names)| names);
        state.reap(result)
    }

    pub async fn save_profile(&self, name: &str) -> OpenRgbResult<()> {
        self.profile_op(PacketId::RequestSaveProfile, name).await
    }

    pub async fn load_profile(&self, name: &str) -> OpenRgbResult<()> {
        self.profile_op(PacketId::RequestLoadProfile, name).await
    }

    pub async fn delete_profile(&self, name: &str) -> OpenRgbResult<()> {
        self.profile_op(PacketId::RequestDeleteProfile, name).await
    }

    async fn profile_op(&self, packet: PacketId, name: &str) -> OpenRgbResult<()> {
        let mut state = self.state.lock().await;
        state.require_version(2, "profile operations")?;
        state
            .write_packet(NO_DEVICE_ID, packet, &RawString(name))
            .await
    }

    /// Fire-and-forget send: success as soon as the frame is written.
    async fn write<T: SerToBuf>(
        &self,
        device_index: u32,
        packet: PacketId,
        body: &T,
    ) -> OpenRgbResult<()> {
        self.state
            .lock()
            .await
            .write_packet(device_index, packet, body)
            .await
    }
}

impl SessionState {
    fn stream(&mut self) -> OpenRgbResult<&mut ProtocolStream> {
        self.stream.as_mut().ok_or(OpenRgbError::NotConnected)
    }

    /// Closes the socket when `result` shows the inbound stream is unusable:
    /// after a timeout its position is unknown, after a close it is gone.
    fn reap<T>(&mut self, result: OpenRgbResult<T>) -> OpenRgbResult<T> {
        if matches!(
            result,
            Err(OpenRgbError::NoReply { .. } | OpenRgbError::ConnectionClosed)
        ) {
            tracing::debug!("closing session after fatal receive failure");
            self.stream = None;
        }
        result
    }

    fn require_version(&mut self, min: u32, operation: &'static str) -> OpenRgbResult<()> {
        let negotiated = self.stream()?.protocol_version();
        if negotiated < min {
            return Err(OpenRgbError::UnsupportedOperation {
                operation,
                negotiated,
                min,
            });
        }
        Ok(())
    }

    async fn write_packet<T: SerToBuf>(
        &mut self,
        device_index: u32,
        packet: PacketId,
        body: &T,
    ) -> OpenRgbResult<()> {
        self.stream()?.write_packet(device_index, packet, body).await
    }

    async fn request<I: SerToBuf, O: DeserFromBuf>(
        &mut self,
        device_index: u32,
        packet: PacketId,
        body: &I,
    ) -> OpenRgbResult<O> {
        self.write_packet(device_index, packet, body).await?;
        self.await_reply(device_index, packet).await
    }

    /// Reads frames until the expected reply arrives.
    ///
    /// The server may emit a device-list-changed notification before it gets
    /// to a request, so those are consumed here (recording them in the
    /// freshness bit) rather than failing the exchange. Anything else in the
    /// reply's place is an invalid reply.
    async fn await_reply<T: DeserFromBuf>(
        &mut self,
        device_index: u32,
        expected: PacketId,
    ) -> OpenRgbResult<T> {
        loop {
            let header = self.stream()?.read_header().await?;
            if header.packet_id == u32::from(PacketId::DeviceListUpdated) {
                tracing::trace!("device list changed while awaiting {expected:?}");
                self.list_stale = true;
                continue;
            }
            if header.packet_id != u32::from(expected) || header.device_index != device_index {
                return Err(OpenRgbError::InvalidReply {
                    expected: expected.into(),
                    device_index,
                    got: header.packet_id,
                    got_device_index: header.device_index,
                });
            }
            let stream = self.stream()?;
            let body = stream.read_body(header.body_size as usize).await?;
            let mut msg = ReceivedMessage::new(&body, stream.protocol_version());
            tracing::trace!("received reply {expected:?}: {msg}");
            return T::deserialize(&mut msg);
        }
    }

    async fn fetch_device(&mut self, device_index: u32) -> OpenRgbResult<Device> {
        let version = self.stream()?.protocol_version();
        let mut device: Device = self
            .request(device_index, PacketId::RequestControllerData, &version)
            .await?;
        device.finalize(device_index);
        Ok(device)
    }

    /// One-at-a-time device enumeration with the restart rule: a device-list
    /// change observed anywhere in the sweep means records already in hand
    /// may predate the change, so the accumulated list is discarded and the
    /// sweep starts over. Terminates once a full pass ends with the
    /// freshness bit still clear.
    async fn sweep_device_list(&mut self) -> OpenRgbResult<Vec<Device>> {
        loop {
            self.list_stale = false;
            let count = self
                .request::<_, u32>(NO_DEVICE_ID, PacketId::RequestControllerCount, &())
                .await?;
            let mut devices = Vec::with_capacity(count as usize);
            for device_index in 0..count {
                if self.list_stale {
                    break;
                }
                devices.push(self.fetch_device(device_index).await?);
            }
            if !self.list_stale {
                tracing::debug!("device list sweep finished with {count} devices");
                return Ok(devices);
            }
            tracing::debug!("device list changed mid-sweep, restarting");
        }
    }

    /// Non-blocking half of the freshness check: peek the socket for a
    /// pending notification frame.
    async fn probe_for_updates(&mut self) -> OpenRgbResult<UpdateStatus> {
        let Some(header) = self.stream()?.peek_header().await? else {
            return Ok(UpdateStatus::UpToDate);
        };
        if header.packet_id == u32::from(PacketId::DeviceListUpdated) {
            self.list_stale = true;
            return Ok(UpdateStatus::OutOfDate);
        }
        // the header bytes are consumed and nothing can resynchronize the
        // stream behind them
        Err(OpenRgbError::UnexpectedMessage {
            packet_id: header.packet_id,
        })
    }
}
