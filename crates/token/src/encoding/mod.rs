//! Binary encoding implementation.
pub(crate) mod v1;

use crate::Result;
use binary_stream::{BinaryWriter, Encodable, Endian, Options};
use std::io::{Cursor, Error, ErrorKind};

/// Maximum buffer size allowed when reading.
///
/// No field can exceed the 16-bit length prefix.
const MAX_BUFFER_SIZE: usize = u16::MAX as usize;

/// Standard encoding options.
///
/// Tokens are encoded big-endian.
pub fn encoding_options() -> Options {
    Options {
        endian: Endian::Big,
        max_buffer_size: Some(MAX_BUFFER_SIZE),
    }
}

/// Encode to a binary buffer.
pub fn encode(encodable: &impl Encodable) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    {
        let mut stream = Cursor::new(&mut buffer);
        let mut writer = BinaryWriter::new(&mut stream, encoding_options());
        encodable.encode(&mut writer)?;
    }
    Ok(buffer)
}

pub(crate) fn encoding_error(
    e: impl std::error::Error + Send + Sync + 'static,
) -> Error {
    Error::new(ErrorKind::Other, e)
}
