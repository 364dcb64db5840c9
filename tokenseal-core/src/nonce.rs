//! Nonce-generation contract.
//!
//! Local-mode encryption draws its per-token nonce material through an
//! injected [`NonceGenerator`] so that the entropy source can be swapped:
//! secure randomness in production, a fixed buffer when reproducing published
//! test vectors. Implementations must be stateless or internally
//! synchronized; the engine treats [`NonceGenerator::generate`] as a single
//! atomic operation and never calls it more than once per encryption.

use crate::PasetoError;

pub trait NonceGenerator: Send + Sync {
    /// Produce `len` bytes of nonce material.
    fn generate(&self, len: usize) -> Result<Vec<u8>, PasetoError>;
}

/// Draws fresh bytes from the operating system on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomNonceGenerator;

impl NonceGenerator for RandomNonceGenerator {
    fn generate(&self, len: usize) -> Result<Vec<u8>, PasetoError> {
        let mut bytes = vec![0; len];
        getrandom::fill(&mut bytes).map_err(|_| PasetoError::RandomFailure)?;
        Ok(bytes)
    }
}

/// Returns a pre-supplied buffer on every call.
///
/// Only for conformance testing against published vectors. Reusing a fixed
/// nonce across different payloads under the same key forfeits the protocol's
/// security guarantees in v1; v2 limits the damage via payload-derived
/// nonces, but a fixed generator is still never appropriate in production.
#[derive(Clone, Debug)]
pub struct FixedNonceGenerator {
    bytes: Vec<u8>,
}

impl FixedNonceGenerator {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

impl NonceGenerator for FixedNonceGenerator {
    fn generate(&self, len: usize) -> Result<Vec<u8>, PasetoError> {
        if self.bytes.len() != len {
            return Err(PasetoError::NonceLength {
                expected: len,
                actual: self.bytes.len(),
            });
        }
        Ok(self.bytes.clone())
    }
}
