//! Traits and types for signing and verifying recovery tokens.
//!
//! Signatures are treated as opaque byte strings so callers
//! never need to know the signature length in advance.
#![deny(missing_docs)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod error;

pub use error::Error;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for the signer library.
pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Boxed signer.
pub type BoxedSigner = Box<dyn Signer + Send + Sync + 'static>;

/// Boxed verifier.
pub type BoxedVerifier = Box<dyn Verifier + Send + Sync + 'static>;

impl Clone for BoxedSigner {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl Clone for BoxedVerifier {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

/// Supported signature schemes.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// ECDSA over secp256k1 with SHA-256 and DER signatures.
    Ecdsa,
    /// Ed25519 signatures.
    Ed25519,
}

impl Scheme {
    /// Generate a random signing key for this scheme.
    pub fn random_signer(&self) -> BoxedSigner {
        let signer: BoxedSigner = match self {
            Self::Ecdsa => Box::new(ecdsa::SingleParty::new_random()),
            Self::Ed25519 => Box::new(ed25519::SingleParty::new_random()),
        };
        signer
    }

    /// Parse a hex encoded private key for this scheme.
    pub fn signer_from_hex(&self, value: &str) -> Result<BoxedSigner> {
        let bytes = hex::decode(value.trim_start_matches("0x"))?;
        let signer: BoxedSigner = match self {
            Self::Ecdsa => {
                Box::new(ecdsa::SingleParty::try_from(bytes.as_slice())?)
            }
            Self::Ed25519 => {
                Box::new(ed25519::SingleParty::try_from(bytes.as_slice())?)
            }
        };
        Ok(signer)
    }

    /// Parse a hex encoded public key for this scheme.
    ///
    /// ECDSA keys are SEC1 encoded (compressed or uncompressed),
    /// Ed25519 keys are the 32 byte compressed point.
    pub fn verifier_from_hex(&self, value: &str) -> Result<BoxedVerifier> {
        let bytes = hex::decode(value.trim_start_matches("0x"))?;
        match self {
            Self::Ecdsa => ecdsa::verifying_key(&bytes),
            Self::Ed25519 => ed25519::verifying_key(&bytes),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ecdsa => write!(f, "ecdsa"),
            Self::Ed25519 => write!(f, "ed25519"),
        }
    }
}

/// Trait for implementations that can sign a message.
pub trait Signer {
    /// Signature scheme for this signer.
    fn scheme(&self) -> Scheme;

    /// Sign a message and return the encoded signature bytes.
    fn sign(&self, message: &[u8]) -> Result<Vec<u8>>;

    /// Get the verifying key for this signer.
    fn verifying_key(&self) -> BoxedVerifier;

    /// Clone a boxed version of this signer.
    fn clone_boxed(&self) -> BoxedSigner;

    /// Get the bytes for this signing key.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Trait for public keys that can verify a signature.
pub trait Verifier {
    /// Signature scheme for this verifier.
    fn scheme(&self) -> Scheme;

    /// Determine if a signature is valid for a message.
    ///
    /// Signature bytes that cannot be parsed for the scheme
    /// do not verify.
    fn verify(&self, message: &[u8], signature: &[u8]) -> bool;

    /// Clone a boxed version of this verifier.
    fn clone_boxed(&self) -> BoxedVerifier;

    /// Get the encoded bytes for this public key.
    fn to_bytes(&self) -> Vec<u8>;
}

/// ECDSA signer using the Secp256k1 curve from the k256 library.
pub mod ecdsa {
    use rand::rngs::OsRng;

    pub use k256::ecdsa::{Signature, SigningKey, VerifyingKey};

    use super::{BoxedSigner, BoxedVerifier, Scheme, Signer, Verifier};
    use crate::Result;

    /// Parse a SEC1 encoded verifying key.
    pub(crate) fn verifying_key(bytes: &[u8]) -> Result<BoxedVerifier> {
        Ok(Box::new(VerifyingKey::from_sec1_bytes(bytes)?))
    }

    /// Signer for a single party key.
    #[derive(Clone)]
    pub struct SingleParty(pub SigningKey);

    impl SingleParty {
        /// Generate a new random single party signing key.
        pub fn new_random() -> SingleParty {
            let mut csprng = OsRng {};
            let signing_key = SigningKey::random(&mut csprng);
            SingleParty(signing_key)
        }
    }

    impl Signer for SingleParty {
        fn scheme(&self) -> Scheme {
            Scheme::Ecdsa
        }

        fn clone_boxed(&self) -> BoxedSigner {
            Box::new(self.clone())
        }

        fn to_bytes(&self) -> Vec<u8> {
            self.0.to_bytes().as_slice().to_vec()
        }

        fn verifying_key(&self) -> BoxedVerifier {
            Box::new(*self.0.verifying_key())
        }

        fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
            let signature: Signature =
                k256::ecdsa::signature::Signer::try_sign(&self.0, message)?;
            Ok(signature.to_der().as_bytes().to_vec())
        }
    }

    impl Verifier for VerifyingKey {
        fn scheme(&self) -> Scheme {
            Scheme::Ecdsa
        }

        fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
            let Ok(signature) = Signature::from_der(signature) else {
                return false;
            };
            k256::ecdsa::signature::Verifier::verify(
                self, message, &signature,
            )
            .is_ok()
        }

        fn clone_boxed(&self) -> BoxedVerifier {
            Box::new(*self)
        }

        fn to_bytes(&self) -> Vec<u8> {
            self.to_encoded_point(true).as_bytes().to_vec()
        }
    }

    impl TryFrom<[u8; 32]> for SingleParty {
        type Error = crate::Error;
        fn try_from(
            value: [u8; 32],
        ) -> std::result::Result<Self, Self::Error> {
            (&value).try_into()
        }
    }

    impl<'a> TryFrom<&'a [u8; 32]> for SingleParty {
        type Error = crate::Error;
        fn try_from(
            value: &'a [u8; 32],
        ) -> std::result::Result<Self, Self::Error> {
            Ok(Self(SigningKey::from_bytes(value.into())?))
        }
    }

    impl TryFrom<&[u8]> for SingleParty {
        type Error = crate::Error;
        fn try_from(value: &[u8]) -> std::result::Result<Self, Self::Error> {
            let value: [u8; 32] =
                value.try_into().map_err(|_| crate::Error::KeyLength {
                    expected: 32,
                    length: value.len(),
                })?;
            value.try_into()
        }
    }
}

/// ED25519 signer using the ed25519-dalek library.
pub mod ed25519 {
    pub use ed25519_dalek::{
        Signature, Signer as Ed25519Signer, SigningKey, VerifyingKey,
        PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
    };
    use rand::rngs::OsRng;

    use super::{BoxedSigner, BoxedVerifier, Scheme, Signer, Verifier};
    use crate::{Error, Result};

    /// Parse a compressed Ed25519 verifying key.
    pub(crate) fn verifying_key(bytes: &[u8]) -> Result<BoxedVerifier> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| Error::KeyLength {
                expected: PUBLIC_KEY_LENGTH,
                length: bytes.len(),
            })?;
        let key =
            VerifyingKey::from_bytes(&bytes).map_err(Error::Ed25519)?;
        Ok(Box::new(key))
    }

    /// Signer for a single party key.
    pub struct SingleParty(pub SigningKey);

    /// Clone this signer.
    impl Clone for SingleParty {
        fn clone(&self) -> Self {
            Self(SigningKey::from_bytes(&self.0.to_bytes()))
        }
    }

    impl SingleParty {
        /// Generate a new random single party signing key.
        pub fn new_random() -> SingleParty {
            let mut csprng = OsRng {};
            let signing_key = SigningKey::generate(&mut csprng);
            SingleParty(signing_key)
        }
    }

    impl Signer for SingleParty {
        fn scheme(&self) -> Scheme {
            Scheme::Ed25519
        }

        fn clone_boxed(&self) -> BoxedSigner {
            Box::new(self.clone())
        }

        fn to_bytes(&self) -> Vec<u8> {
            self.0.to_bytes().as_slice().to_vec()
        }

        fn verifying_key(&self) -> BoxedVerifier {
            Box::new(self.0.verifying_key())
        }

        fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
            let signature: Signature = self.0.sign(message);
            Ok(signature.to_bytes().to_vec())
        }
    }

    impl Verifier for VerifyingKey {
        fn scheme(&self) -> Scheme {
            Scheme::Ed25519
        }

        fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
            let Ok(signature) = Signature::from_slice(signature) else {
                return false;
            };
            self.verify_strict(message, &signature).is_ok()
        }

        fn clone_boxed(&self) -> BoxedVerifier {
            Box::new(*self)
        }

        fn to_bytes(&self) -> Vec<u8> {
            VerifyingKey::to_bytes(self).to_vec()
        }
    }

    impl TryFrom<[u8; SECRET_KEY_LENGTH]> for SingleParty {
        type Error = crate::Error;
        fn try_from(
            value: [u8; SECRET_KEY_LENGTH],
        ) -> std::result::Result<Self, Self::Error> {
            (&value).try_into()
        }
    }

    impl<'a> TryFrom<&'a [u8; SECRET_KEY_LENGTH]> for SingleParty {
        type Error = crate::Error;
        fn try_from(
            value: &'a [u8; SECRET_KEY_LENGTH],
        ) -> std::result::Result<Self, Self::Error> {
            Ok(Self(SigningKey::from_bytes(value)))
        }
    }

    impl TryFrom<&[u8]> for SingleParty {
        type Error = crate::Error;
        fn try_from(value: &[u8]) -> std::result::Result<Self, Self::Error> {
            let value: [u8; SECRET_KEY_LENGTH] =
                value.try_into().map_err(|_| Error::KeyLength {
                    expected: SECRET_KEY_LENGTH,
                    length: value.len(),
                })?;
            value.try_into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn ecdsa_sign_verify() -> Result<()> {
        let signer = ecdsa::SingleParty::new_random();
        let message = b"recovery-token";
        let signature = signer.sign(message)?;
        let verifier = signer.verifying_key();
        assert!(verifier.verify(message, &signature));
        assert!(!verifier.verify(b"other", &signature));
        assert!(!verifier.verify(message, &[0u8; 8]));
        Ok(())
    }

    #[test]
    fn ed25519_sign_verify() -> Result<()> {
        let signer = ed25519::SingleParty::new_random();
        let message = b"recovery-token";
        let signature = signer.sign(message)?;
        assert_eq!(64, signature.len());
        let verifier = signer.verifying_key();
        assert!(verifier.verify(message, &signature));
        assert!(!verifier.verify(message, &signature[..63]));
        Ok(())
    }

    #[test]
    fn hex_key_material() -> Result<()> {
        for scheme in [Scheme::Ecdsa, Scheme::Ed25519] {
            let signer = scheme.random_signer();
            let private_hex = hex::encode(signer.to_bytes());
            let public_hex = hex::encode(signer.verifying_key().to_bytes());

            let signer = scheme.signer_from_hex(&private_hex)?;
            let verifier = scheme.verifier_from_hex(&public_hex)?;
            assert_eq!(scheme, signer.scheme());
            assert_eq!(scheme, verifier.scheme());

            let signature = signer.sign(b"message")?;
            assert!(verifier.verify(b"message", &signature));
        }
        Ok(())
    }

    #[test]
    fn key_length_error() {
        let result = Scheme::Ed25519.signer_from_hex("ff");
        assert!(matches!(
            result,
            Err(Error::KeyLength {
                expected: 32,
                length: 1
            })
        ));
    }

    #[test]
    fn cross_scheme_does_not_verify() -> Result<()> {
        let ecdsa = Scheme::Ecdsa.random_signer();
        let ed25519 = Scheme::Ed25519.random_signer();
        let signature = ecdsa.sign(b"message")?;
        assert!(!ed25519.verifying_key().verify(b"message", &signature));
        Ok(())
    }
}
