use std::io::ErrorKind;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};

use crate::protocol::{DEFAULT_TIMEOUT, PROTOCOL_VERSION, PacketId, SerToBuf, WriteMessage};
use crate::{OpenRgbError, OpenRgbResult};

/// The fixed 16-byte frame header: `"ORGB"` magic, then device index, packet
/// id and body size as little-endian `u32`s.
///
/// The packet id is kept raw: replies with ids unknown to this client must
/// surface as invalid replies, not decode errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MessageHeader {
    pub device_index: u32,
    pub packet_id: u32,
    pub body_size: u32,
}

impl MessageHeader {
    pub const SIZE: usize = 16;
    pub const MAGIC: [u8; 4] = *b"ORGB";

    pub fn parse(bytes: &[u8; Self::SIZE]) -> OpenRgbResult<Self> {
        if bytes[..4] != Self::MAGIC {
            return Err(OpenRgbError::Protocol(format!(
                "bad magic {:?}, expected \"ORGB\"",
                &bytes[..4]
            )));
        }
        let word = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Ok(Self {
            device_index: word(4),
            packet_id: word(8),
            body_size: word(12),
        })
    }

    pub fn encode(&self) -> [u8; Self::SIZE] {
        let mut bytes = [0; Self::SIZE];
        bytes[..4].copy_from_slice(&Self::MAGIC);
        bytes[4..8].copy_from_slice(&self.device_index.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.packet_id.to_le_bytes());
        bytes[12..].copy_from_slice(&self.body_size.to_le_bytes());
        bytes
    }
}

/// Wrapper for bodies that lead with a `u32` data size covering the body
/// including the size field itself.
pub(crate) struct SizedPacket<T: SerToBuf>(pub T);

impl<T: SerToBuf> SerToBuf for SizedPacket<T> {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        let mut inner = WriteMessage::new(buf.protocol_version());
        self.0.serialize(&mut inner)?;
        buf.write_u32(inner.len() as u32 + size_of::<u32>() as u32);
        buf.write_bytes(inner.bytes());
        Ok(())
    }
}

/// A TCP connection to the server, framing messages and tagging them with the
/// negotiated protocol version.
///
/// Reads are bounded by the receive timeout; writes only block on socket
/// backpressure. [`Self::peek_header`] is the one non-blocking entry point.
pub(crate) struct ProtocolStream {
    stream: TcpStream,
    protocol_version: u32,
    timeout: Duration,
}

impl ProtocolStream {
    pub async fn connect<A: ToSocketAddrs>(addr: A) -> std::io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self {
            stream,
            protocol_version: PROTOCOL_VERSION,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }

    pub fn set_protocol_version(&mut self, version: u32) {
        self.protocol_version = version;
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// Serializes `body` and sends it as one frame.
    pub async fn write_packet<T: SerToBuf>(
        &mut self,
        device_index: u32,
        packet: PacketId,
        body: &T,
    ) -> OpenRgbResult<()> {
        let mut buf = WriteMessage::new(self.protocol_version);
        body.serialize(&mut buf)?;
        let header = MessageHeader {
            device_index,
            packet_id: packet.into(),
            body_size: buf.len() as u32,
        };
        let mut frame = Vec::with_capacity(MessageHeader::SIZE + buf.len());
        frame.extend_from_slice(&header.encode());
        frame.extend_from_slice(buf.bytes());
        tracing::trace!("sending packet {packet:?} for device {device_index}: {buf}");
        self.stream
            .write_all(&frame)
            .await
            .map_err(|source| OpenRgbError::Send { source })
    }

    /// Reads the next frame header, blocking up to the receive timeout.
    pub async fn read_header(&mut self) -> OpenRgbResult<MessageHeader> {
        let mut bytes = [0; MessageHeader::SIZE];
        self.read_exact_timed(&mut bytes).await?;
        MessageHeader::parse(&bytes)
    }

    /// Reads a body of `len` bytes, blocking up to the receive timeout.
    pub async fn read_body(&mut self, len: usize) -> OpenRgbResult<Vec<u8>> {
        let mut buf = vec![0; len];
        self.read_exact_timed(&mut buf).await?;
        Ok(buf)
    }

    /// Probes for a pending frame header without blocking.
    ///
    /// Returns `None` when no bytes are waiting. Consumed bytes are never put
    /// back: a partially received header means a frame is in flight, so its
    /// remainder is completed with an ordinary timed read.
    pub async fn peek_header(&mut self) -> OpenRgbResult<Option<MessageHeader>> {
        let mut bytes = [0; MessageHeader::SIZE];
        let mut filled = 0;
        while filled < MessageHeader::SIZE {
            match self.stream.try_read(&mut bytes[filled..]) {
                Ok(0) => return Err(OpenRgbError::ConnectionClosed),
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::WouldBlock => {
                    if filled == 0 {
                        return Ok(None);
                    }
                    self.read_exact_timed(&mut bytes[filled..]).await?;
                    filled = MessageHeader::SIZE;
                }
                Err(source) => return Err(OpenRgbError::Receive { source }),
            }
        }
        MessageHeader::parse(&bytes).map(Some)
    }

    async fn read_exact_timed(&mut self, buf: &mut [u8]) -> OpenRgbResult<()> {
        match tokio::time::timeout(self.timeout, self.stream.read_exact(buf)).await {
            Err(_) => Err(OpenRgbError::NoReply { after: self.timeout }),
            Ok(Err(e)) if e.kind() == ErrorKind::UnexpectedEof => {
                Err(OpenRgbError::ConnectionClosed)
            }
            Ok(Err(source)) => Err(OpenRgbError::Receive { source }),
            Ok(Ok(_)) => Ok(()),
        }
    }
}
