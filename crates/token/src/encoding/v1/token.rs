//! Wire format for recovery tokens.
//!
//! Fields are written in a fixed order, big-endian:
//!
//! | field        | encoding                    |
//! |--------------|-----------------------------|
//! | version      | u8                          |
//! | token_type   | u8                          |
//! | token_id     | 16 bytes                    |
//! | options      | u8                          |
//! | issuer       | u16 length + UTF-8          |
//! | audience     | u16 length + UTF-8          |
//! | issued_time  | u16 length + UTF-8          |
//! | data         | u16 length + bytes          |
//! | binding_data | u16 length + bytes          |
//!
//! Every variable length field carries its own length so the
//! end of a token is known without an external delimiter.
use crate::{
    constants::TOKEN_ID_LENGTH,
    encoding::{encoding_error, encoding_options},
    RecoveryToken, TokenId, TokenType,
};
use binary_stream::{BinaryReader, BinaryWriter, Decodable, Encodable};
use std::io::{Cursor, Error, ErrorKind, Read, Result, Seek, SeekFrom, Write};

/// Bytes for the version, token type, token id and options.
const FIXED_LENGTH: usize = 1 + 1 + TOKEN_ID_LENGTH + 1;

/// Bytes for a length prefix.
const LENGTH_PREFIX: usize = 2;

/// Number of bytes the encoding of a token occupies.
pub(crate) fn wire_length(token: &RecoveryToken) -> usize {
    FIXED_LENGTH
        + [
            token.issuer.len(),
            token.audience.len(),
            token.issued_time.len(),
            token.data.len(),
            token.binding_data.len(),
        ]
        .iter()
        .map(|length| LENGTH_PREFIX + length)
        .sum::<usize>()
}

/// Decode a token from the start of a buffer.
pub(crate) fn decode_token(buffer: &[u8]) -> Result<RecoveryToken> {
    let mut stream = Cursor::new(buffer);
    let mut reader = BinaryReader::new(&mut stream, encoding_options());
    let mut token = RecoveryToken::empty();
    token.decode(&mut reader)?;
    Ok(token)
}

impl Encodable for RecoveryToken {
    fn encode<W: Write + Seek>(
        &self,
        writer: &mut BinaryWriter<W>,
    ) -> Result<()> {
        writer.write_u8(self.version)?;
        writer.write_u8(u8::from(self.token_type))?;
        writer.write_bytes(self.token_id.as_ref())?;
        writer.write_u8(self.options)?;
        write_field(writer, "issuer", self.issuer.as_bytes())?;
        write_field(writer, "audience", self.audience.as_bytes())?;
        write_field(writer, "issued_time", self.issued_time.as_bytes())?;
        write_field(writer, "data", &self.data)?;
        write_field(writer, "binding_data", &self.binding_data)?;
        Ok(())
    }
}

impl Decodable for RecoveryToken {
    fn decode<R: Read + Seek>(
        &mut self,
        reader: &mut BinaryReader<R>,
    ) -> Result<()> {
        let version = reader.read_u8()?;
        let token_type =
            TokenType::try_from(reader.read_u8()?).map_err(encoding_error)?;
        let token_id: [u8; TOKEN_ID_LENGTH] = reader
            .read_bytes(TOKEN_ID_LENGTH)?
            .as_slice()
            .try_into()
            .map_err(encoding_error)?;
        let options = reader.read_u8()?;
        let issuer = read_string(reader, "issuer")?;
        let audience = read_string(reader, "audience")?;
        let issued_time = read_string(reader, "issued_time")?;
        let data = read_field(reader, "data")?;
        let binding_data = read_field(reader, "binding_data")?;

        self.version = version;
        self.token_type = token_type;
        self.token_id = TokenId::from(token_id);
        self.options = options;
        self.issuer = issuer;
        self.audience = audience;
        self.issued_time = issued_time;
        self.data = data;
        self.binding_data = binding_data;
        Ok(())
    }
}

/// Write a length prefixed field.
fn write_field<W: Write + Seek>(
    writer: &mut BinaryWriter<W>,
    field: &str,
    value: &[u8],
) -> Result<()> {
    let length = u16::try_from(value.len()).map_err(|_| {
        Error::new(
            ErrorKind::InvalidInput,
            format!("{} has {} bytes which exceeds u16", field, value.len()),
        )
    })?;
    writer.write_u16(length)?;
    writer.write_bytes(value)?;
    Ok(())
}

/// Read a length prefixed field.
///
/// The declared length is checked against the remaining
/// bytes in the stream before any read.
fn read_field<R: Read + Seek>(
    reader: &mut BinaryReader<R>,
    field: &str,
) -> Result<Vec<u8>> {
    let length = reader.read_u16()? as u64;
    let position = reader.stream_position()?;
    let end = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(position))?;
    let remaining = end.saturating_sub(position);
    if length > remaining {
        return Err(Error::new(
            ErrorKind::UnexpectedEof,
            format!(
                "{} length {} overruns the {} remaining bytes",
                field, length, remaining
            ),
        ));
    }
    reader.read_bytes(length as usize)
}

/// Read a length prefixed UTF-8 field.
fn read_string<R: Read + Seek>(
    reader: &mut BinaryReader<R>,
    field: &str,
) -> Result<String> {
    let bytes = read_field(reader, field)?;
    String::from_utf8(bytes).map_err(encoding_error)
}
