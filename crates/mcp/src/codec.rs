// Newline-delimited framing for the stdio transport

use crate::protocol::JsonRpcError;
use bytes::BytesMut;
use tokio_util::codec::{AnyDelimiterCodec, AnyDelimiterCodecError, Decoder, Encoder};

/// Largest message accepted on stdin.
pub const MAX_MESSAGE_BYTES: usize = 4 * 1024 * 1024;

/// One frame read from the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Frame {
    /// A UTF-8 line, trailing `\r` removed.
    Message(String),
    /// A line that cannot be a JSON-RPC message: not UTF-8, or too long.
    Rejected(JsonRpcError),
}

/// Splits on `\n` and turns per-line failures into [`Frame::Rejected`]
/// items, so a bad line never ends the stream. Only I/O errors do.
#[derive(Debug, Clone)]
pub struct MessageCodec {
    inner: AnyDelimiterCodec,
    max_length: usize,
}

impl MessageCodec {
    pub fn new() -> Self {
        Self::with_max_length(MAX_MESSAGE_BYTES)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            inner: AnyDelimiterCodec::new_with_max_length(b"\n".to_vec(), b"\n".to_vec(), max_length),
            max_length,
        }
    }

    fn frame(
        &self,
        decoded: Result<Option<bytes::Bytes>, AnyDelimiterCodecError>,
    ) -> Result<Option<Frame>, AnyDelimiterCodecError> {
        match decoded {
            Ok(Some(chunk)) => Ok(Some(match std::str::from_utf8(&chunk) {
                Ok(line) => Frame::Message(line.trim_end_matches('\r').to_string()),
                Err(e) => Frame::Rejected(JsonRpcError::parse_error(format!(
                    "Parse error: message is not valid UTF-8: {}",
                    e
                ))),
            })),
            Ok(None) => Ok(None),
            // The inner codec discards the rest of the line on its own.
            Err(AnyDelimiterCodecError::MaxChunkLengthExceeded) => {
                Ok(Some(Frame::Rejected(JsonRpcError::parse_error(format!(
                    "Parse error: message exceeds {} bytes",
                    self.max_length
                )))))
            }
            Err(e) => Err(e),
        }
    }
}

impl Default for MessageCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for MessageCodec {
    type Item = Frame;
    type Error = AnyDelimiterCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, Self::Error> {
        let decoded = self.inner.decode(src);
        self.frame(decoded)
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Frame>, Self::Error> {
        let decoded = self.inner.decode_eof(src);
        self.frame(decoded)
    }
}

impl Encoder<String> for MessageCodec {
    type Error = AnyDelimiterCodecError;

    fn encode(&mut self, item: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        self.inner.encode(item, dst)
    }
}
