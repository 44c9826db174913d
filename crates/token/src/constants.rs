//! Constants for the recovery token protocol.

/// Single supported protocol version.
///
/// Tokens declaring any other version are rejected before
/// signature verification.
pub const PROTOCOL_VERSION: u8 = 0;

/// Number of bytes in a token identifier.
pub const TOKEN_ID_LENGTH: usize = 16;

/// Allowed age in seconds of an issued time before a token
/// is considered stale.
pub const CLOCK_SKEW: i64 = 5 * 60;

/// Default maximum size of a decoded sealed token accepted
/// by a recovery provider.
pub const DEFAULT_TOKEN_MAX_SIZE: usize = 8192;

/// Maximum length of a variable length field.
///
/// Each field is prefixed with a 16-bit length.
pub const MAX_FIELD_LENGTH: usize = u16::MAX as usize;

/// Query string parameter for the token identifier in a state URL.
pub const TOKEN_ID_PARAM: &str = "token_id";
