use thiserror::Error;

/// Errors generated by the signer library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error generated when key bytes have the wrong length
    /// for a signature scheme.
    #[error("expected key of {expected} bytes but got {length}")]
    KeyLength {
        /// Expected key length.
        expected: usize,
        /// Length of the supplied buffer.
        length: usize,
    },

    /// Error generated by the ECDSA library.
    #[error(transparent)]
    Ecdsa(#[from] k256::ecdsa::Error),

    /// Error generated by the Ed25519 library.
    #[error("ed25519: {0}")]
    Ed25519(ed25519_dalek::SignatureError),

    /// Error generated decoding hex key material.
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
}
