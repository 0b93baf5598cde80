use std::time::Duration;

use thiserror::Error;

/// Type alias for `Result<T, OpenRgbError>`.
pub type OpenRgbResult<T> = std::result::Result<T, OpenRgbError>;

/// Errors returned by the [client](crate::OpenRgbClient).
///
/// Variants fall into three groups: caller mistakes ([`NotConnected`],
/// [`AlreadyConnected`], [`InvalidCommand`]), connection failures (everything
/// carrying an [`std::io::Error`], plus [`ConnectionClosed`], [`NoReply`] and
/// [`InvalidReply`]) and malformed wire data ([`Protocol`]). After a
/// connection failure the session is unhealthy: disconnect and reconnect.
///
/// OS-level detail rides along as the error source; use
/// [`std::error::Error::source`] or match on the variant to get at the
/// underlying [`std::io::Error`].
///
/// [`NotConnected`]: OpenRgbError::NotConnected
/// [`AlreadyConnected`]: OpenRgbError::AlreadyConnected
/// [`InvalidCommand`]: OpenRgbError::InvalidCommand
/// [`ConnectionClosed`]: OpenRgbError::ConnectionClosed
/// [`NoReply`]: OpenRgbError::NoReply
/// [`InvalidReply`]: OpenRgbError::InvalidReply
/// [`Protocol`]: OpenRgbError::Protocol
#[derive(Error, Debug)]
pub enum OpenRgbError {
    /// Operation requires a connected session.
    #[error("not connected to an OpenRGB server")]
    NotConnected,

    /// `connect` was called on a session that already has a live connection.
    #[error("already connected to an OpenRGB server")]
    AlreadyConnected,

    /// Failed resolving or connecting to the OpenRGB server.
    #[error("failed connecting to OpenRGB server at {addr}")]
    Connection {
        /// Server address as passed to `connect`.
        addr: String,

        /// OS-level resolution or connect error.
        #[source]
        source: std::io::Error,
    },

    /// The server speaks a protocol version this client cannot use.
    ///
    /// Version 0 servers predate version negotiation and are rejected.
    #[error("server protocol version {server} is not supported")]
    VersionNotSupported {
        /// Version advertised by the server.
        server: u32,
    },

    /// Failed writing a request to the socket.
    #[error("failed sending request to OpenRGB server")]
    Send {
        /// OS-level write error.
        #[source]
        source: std::io::Error,
    },

    /// Failed reading a reply from the socket.
    #[error("failed receiving reply from OpenRGB server")]
    Receive {
        /// OS-level read error.
        #[source]
        source: std::io::Error,
    },

    /// The server closed the connection.
    #[error("OpenRGB server closed the connection")]
    ConnectionClosed,

    /// No reply arrived within the receive timeout.
    ///
    /// The inbound stream is at an unknown position afterwards, so the
    /// session closes its socket before returning this.
    #[error("no reply from OpenRGB server within {after:?}")]
    NoReply {
        /// The receive timeout that elapsed.
        after: Duration,
    },

    /// The server replied with a different message than the request called
    /// for.
    #[error("invalid reply: expected packet {expected} for device {device_index}, got packet {got} for device {got_device_index}")]
    InvalidReply {
        /// Packet id the request expects back.
        expected: u32,

        /// Device index the request was sent for.
        device_index: u32,

        /// Packet id found in the reply header.
        got: u32,

        /// Device index found in the reply header.
        got_device_index: u32,
    },

    /// Unsolicited non-notification traffic arrived while no request was in
    /// flight.
    ///
    /// The probe that saw it has consumed the frame header with no way to
    /// resynchronize, so the session closes its socket before returning this.
    #[error("unexpected message {packet_id} while no request was in flight")]
    UnexpectedMessage {
        /// Packet id of the offending frame.
        packet_id: u32,
    },

    /// Malformed data on the wire.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Operation needs a newer protocol version than was negotiated.
    #[error("{operation} requires protocol version {min}, negotiated version is {negotiated}")]
    UnsupportedOperation {
        /// Name of the operation.
        operation: &'static str,

        /// Version negotiated with the server.
        negotiated: u32,

        /// Minimum version the operation needs.
        min: u32,
    },

    /// A command was given invalid parameters.
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}
