//! Version-independent PASETO engine.
//!
//! PASETO tokens are strings of the form `version.purpose.payload` with an
//! optional fourth `footer` section. This crate implements everything that is
//! common to all protocol versions: the wire framing, unpadded base64url
//! encoding, the pre-authentication encoding that binds the sections into one
//! authenticated message, the nonce-generation contract, and the [`Paseto`]
//! facade that drives a version backend.
//!
//! The cryptography itself lives in the per-version crates (`tokenseal-v1`,
//! `tokenseal-v2`), which implement the [`version::LocalVersion`] and
//! [`version::PublicVersion`] traits defined here.

pub mod base64;
pub mod encoding;
pub mod nonce;
pub mod pae;
pub mod token;
pub mod version;

mod paseto;

pub use encoding::{Payload, TokenWithFooter};
pub use nonce::{FixedNonceGenerator, NonceGenerator, RandomNonceGenerator};
pub use paseto::Paseto;
pub use token::{extract_footer, extract_footer_as};
pub use version::KeyPair;

/// Error returned by all PASETO operations that can fail.
///
/// Cryptographic verification failures are deliberately coarse: a failed tag
/// check is always [`AuthenticationFailed`](PasetoError::AuthenticationFailed)
/// and a failed signature check is always
/// [`SignatureInvalid`](PasetoError::SignatureInvalid), with no sub-reason
/// that could act as an oracle. Framing errors are more specific since they
/// carry no secret-dependent information.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PasetoError {
    /// The token did not consist of 3 or 4 dot-separated sections.
    #[error("token does not have a valid section structure")]
    MalformedToken,
    /// A section was not valid unpadded base64url.
    #[error("section is not valid base64url")]
    MalformedEncoding,
    /// The token's `version.purpose.` prefix did not match the operation.
    ///
    /// This is a fast-path usability check. The header is also bound into the
    /// pre-authentication encoding, so a forged header is rejected
    /// cryptographically regardless.
    #[error("token header {found:?} does not match expected {expected:?}")]
    InvalidHeader {
        found: String,
        expected: &'static str,
    },
    /// The decoded footer did not equal the footer the caller expected.
    ///
    /// Advisory only: footer authenticity is guaranteed by the
    /// pre-authentication encoding, not by this comparison.
    #[error("token footer does not match the expected footer")]
    InvalidFooter,
    /// Local-mode tag verification failed. No plaintext is ever returned.
    #[error("token could not be authenticated")]
    AuthenticationFailed,
    /// Public-mode signature verification failed.
    #[error("token signature could not be verified")]
    SignatureInvalid,
    /// A pre-authentication encoding piece exceeded a 64-bit length.
    #[error("pre-authentication encoding input exceeds 64-bit lengths")]
    EncodingOverflow,
    /// Key material had the wrong size for this version and purpose.
    #[error("key material is {actual} bytes, expected {expected}")]
    KeyLength { expected: usize, actual: usize },
    /// Key material had the right size but could not be decoded.
    #[error("could not decode key material")]
    InvalidKey,
    /// A nonce generator returned material of the wrong length.
    #[error("nonce material is {actual} bytes, expected {expected}")]
    NonceLength { expected: usize, actual: usize },
    /// The entropy source failed.
    #[error("entropy source failure")]
    RandomFailure,
    /// The payload encoding provider failed to encode or decode.
    #[error("payload could not be processed")]
    Payload(#[source] Box<dyn std::error::Error + Send + Sync>),
}
