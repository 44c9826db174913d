use crate::Result;

/// Boxed payload cipher.
pub type BoxedCipher = Box<dyn PayloadCipher + Send + Sync + 'static>;

/// Cipher for the opaque payload carried in the `data` field.
///
/// The plaintext schema belongs to the account provider; tokens
/// only ever carry the ciphertext. Implementations should report
/// failures as [crate::Error::DecryptionFailed].
pub trait PayloadCipher {
    /// Encrypt a payload.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypt a payload.
    fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>>;
}
