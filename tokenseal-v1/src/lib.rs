//! PASETO v1: the compatibility suite.
//!
//! Local mode splits the symmetric key with HKDF-SHA-384 into independent
//! encryption and authentication keys, encrypts with AES-256-CTR, and
//! authenticates with a truncated HMAC-SHA-384 tag. Public mode signs with
//! RSA-PSS over SHA-384 (2048-bit modulus). Prefer v2 unless a deployment is
//! restricted to NIST-blessed primitives.
//!
//! ```
//! use tokenseal_v1::{LocalKey, Paseto};
//!
//! let paseto = Paseto::new();
//! let key = LocalKey::random()?;
//!
//! let token = paseto.encrypt(&"hello".to_string(), &key, Some("kid:gandalf0"))?;
//! assert!(token.starts_with("v1.local."));
//!
//! let message: String = paseto.decrypt(&token, &key, Some("kid:gandalf0"))?;
//! assert_eq!(message, "hello");
//! # Ok::<(), tokenseal_v1::PasetoError>(())
//! ```

#![forbid(unsafe_code)]

/// Low level implementation primitives.
pub mod core;

pub use tokenseal_core::PasetoError;

pub use crate::core::{LocalKey, PublicKey, SecretKey, V1};

/// Operation facade bound to v1.
pub type Paseto = tokenseal_core::Paseto<V1>;

/// A v1 (RSA) signing key pair.
pub type KeyPair = tokenseal_core::KeyPair<V1>;
