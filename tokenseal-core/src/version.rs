//! The versioned capability contract implemented by protocol backends.
//!
//! Each protocol version is a unit type implementing [`Version`] plus the
//! capability traits for the purposes it supports: [`LocalVersion`] for
//! authenticated encryption, [`PublicVersion`] for signatures. Dispatch is
//! entirely by type parameter; there is no runtime version registry, so the
//! set of versions an application can use is checked by the compiler.

use crate::PasetoError;

/// A PASETO protocol version: fixed algorithm suite, fixed wire lengths.
pub trait Version: Sized + 'static {
    /// Version identifier, e.g. `"v1"`.
    const HEADER: &'static str;
    /// Complete local-mode token prefix, e.g. `"v1.local."`.
    const LOCAL_HEADER: &'static str;
    /// Complete public-mode token prefix, e.g. `"v1.public."`.
    const PUBLIC_HEADER: &'static str;

    /// Nonce material drawn per local-mode encryption.
    const LOCAL_NONCE_LEN: usize;
    /// Symmetric key length for local mode.
    const LOCAL_KEY_LEN: usize;

    /// Symmetric key for local-mode tokens.
    type LocalKey;
    /// Verification half of a public-mode key pair.
    type PublicKey;
    /// Signing half of a public-mode key pair.
    type SecretKey;
}

/// Authenticated-encryption capability (the `local` purpose).
pub trait LocalVersion: Version {
    /// Encrypt `message`, returning the wire payload
    /// `nonce || ciphertext || tag`.
    ///
    /// `nonce_material` must be exactly [`Version::LOCAL_NONCE_LEN`] bytes of
    /// generator output; whether it is used directly or run through a
    /// payload-dependent derivation is version-specific.
    fn encrypt(
        key: &Self::LocalKey,
        nonce_material: &[u8],
        message: &[u8],
        footer: &[u8],
    ) -> Result<Vec<u8>, PasetoError>;

    /// Authenticate and decrypt a wire payload in place, returning the
    /// cleartext slice.
    ///
    /// The tag is verified in constant time before any decryption; on
    /// [`PasetoError::AuthenticationFailed`] no plaintext or nonce escapes.
    fn decrypt<'a>(
        key: &Self::LocalKey,
        payload: &'a mut [u8],
        footer: &[u8],
    ) -> Result<&'a [u8], PasetoError>;
}

/// Signature capability (the `public` purpose).
pub trait PublicVersion: Version {
    /// Sign `message`, returning the wire payload `message || signature`.
    fn sign(
        key: &Self::SecretKey,
        message: &[u8],
        footer: &[u8],
    ) -> Result<Vec<u8>, PasetoError>;

    /// Verify a wire payload, returning the message slice.
    ///
    /// Any failure, including a payload too short to contain a signature, is
    /// the single opaque [`PasetoError::SignatureInvalid`].
    fn verify<'a>(
        key: &Self::PublicKey,
        payload: &'a [u8],
        footer: &[u8],
    ) -> Result<&'a [u8], PasetoError>;

    /// Generate a fresh signing key pair.
    fn generate_key_pair() -> Result<KeyPair<Self>, PasetoError>;
}

/// A freshly generated signing key pair.
///
/// Generated per call and handed to the caller; the engine never caches or
/// persists key material.
pub struct KeyPair<V: Version> {
    pub secret: V::SecretKey,
    pub public: V::PublicKey,
}
