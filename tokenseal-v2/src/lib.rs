//! PASETO v2: the recommended suite.
//!
//! Local mode is XChaCha20-Poly1305 with a payload-derived nonce — even if
//! the nonce generator repeats itself, two different payloads never share a
//! cipher nonce. Public mode is Ed25519 with deterministic 64-byte
//! signatures.
//!
//! ```
//! use tokenseal_v2::{LocalKey, Paseto};
//!
//! let paseto = Paseto::new();
//! let key = LocalKey::random()?;
//!
//! let token = paseto.encrypt(&"hello".to_string(), &key, None)?;
//! assert!(token.starts_with("v2.local."));
//!
//! let message: String = paseto.decrypt(&token, &key, None)?;
//! assert_eq!(message, "hello");
//!
//! // signing
//! let pair = paseto.generate_key_pair()?;
//! let token = paseto.sign(&"hello".to_string(), &pair.secret, None)?;
//! let message: String = paseto.verify(&token, &pair.public, None)?;
//! assert_eq!(message, "hello");
//! # Ok::<(), tokenseal_v2::PasetoError>(())
//! ```

#![forbid(unsafe_code)]

/// Low level implementation primitives.
pub mod core;

pub use tokenseal_core::PasetoError;

pub use crate::core::{LocalKey, PublicKey, SecretKey, V2};

/// Operation facade bound to v2.
pub type Paseto = tokenseal_core::Paseto<V2>;

/// A v2 (Ed25519) signing key pair.
pub type KeyPair = tokenseal_core::KeyPair<V2>;
