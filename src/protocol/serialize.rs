use crate::OpenRgbResult;

/// Serialize a value into an outgoing byte buffer.
pub(crate) trait SerToBuf {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()>;
}

impl<T: SerToBuf> SerToBuf for &T {
    fn serialize(&self, buf: &mut WriteMessage) -> OpenRgbResult<()> {
        (*self).serialize(buf)
    }
}

/// Body of a message being built, little-endian, tagged with the negotiated
/// protocol version so version-gated fields know whether to appear.
pub(crate) struct WriteMessage {
    protocol_version: u32,
    buf: Vec<u8>,
}

impl std::fmt::Display for WriteMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WriteMessage (protocol: {}, len: {}): {:?}",
            self.protocol_version,
            self.buf.len(),
            &self.buf[..]
        )
    }
}

impl WriteMessage {
    pub fn new(protocol_version: u32) -> Self {
        Self {
            protocol_version,
            buf: Vec::new(),
        }
    }

    pub fn protocol_version(&self) -> u32 {
        self.protocol_version
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_value<T: SerToBuf>(&mut self, value: &T) -> OpenRgbResult<()> {
        value.serialize(self)
    }

    /// Chaining variant of [`Self::write_value`].
    pub fn push_value<T: SerToBuf>(&mut self, value: &T) -> OpenRgbResult<&mut Self> {
        self.write_value(value)?;
        Ok(self)
    }

    #[cfg(test)]
    pub fn as_received(&self) -> crate::protocol::ReceivedMessage<'_> {
        crate::protocol::ReceivedMessage::new(&self.buf, self.protocol_version)
    }
}
