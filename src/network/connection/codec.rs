//! Newline-delimited text codec with lossy decoding.
//!
//! Clients are not required to speak clean UTF-8: a stray Latin-1 byte is
//! replaced with U+FFFD and the line is still delivered. Only an overlong
//! line or a transport failure ends the stream.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder, LinesCodecError};

/// Line codec that splits on `\n`, trims a trailing `\r`, and never rejects
/// a line for its encoding.
#[derive(Debug, Clone)]
pub struct LossyLinesCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length, excluding the terminator
    max_len: usize,
}

impl LossyLinesCodec {
    /// Codec with no practical length limit, for the outbound side.
    pub fn new() -> Self {
        Self::with_max_len(usize::MAX)
    }

    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
        }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Default for LossyLinesCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_lossy(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

impl Decoder for LossyLinesCodec {
    type Item = String;
    type Error = LinesCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>, LinesCodecError> {
        // Look for newline starting from where we left off
        if let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') {
            let newline = self.next_index + offset;
            self.next_index = 0;

            if newline > self.max_len {
                return Err(LinesCodecError::MaxLineLengthExceeded);
            }

            let line = src.split_to(newline + 1);
            Ok(Some(decode_lossy(&line[..newline])))
        } else {
            self.next_index = src.len();

            // Partial line already over the limit
            if src.len() > self.max_len {
                return Err(LinesCodecError::MaxLineLengthExceeded);
            }

            Ok(None)
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>, LinesCodecError> {
        if let Some(line) = self.decode(src)? {
            return Ok(Some(line));
        }
        if src.is_empty() {
            return Ok(None);
        }

        // Unterminated final line
        self.next_index = 0;
        let rest = src.split_to(src.len());
        Ok(Some(decode_lossy(&rest)))
    }
}

impl<T: AsRef<str>> Encoder<T> for LossyLinesCodec {
    type Error = LinesCodecError;

    fn encode(&mut self, line: T, dst: &mut BytesMut) -> Result<(), LinesCodecError> {
        let line = line.as_ref();
        dst.reserve(line.len() + 1);
        dst.put(line.as_bytes());
        dst.put_u8(b'\n');
        Ok(())
    }
}
