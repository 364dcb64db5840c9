mod local;
mod public;

use tokenseal_core::version::Version;
use tokenseal_core::PasetoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub struct V2;

/// 32-byte symmetric key for `v2.local` tokens. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LocalKey([u8; 32]);

/// Ed25519 signing key for `v2.public` tokens.
#[derive(Clone)]
pub struct SecretKey(pub(crate) ed25519_dalek::SigningKey);

/// Ed25519 verification key for `v2.public` tokens.
#[derive(Clone)]
pub struct PublicKey(pub(crate) ed25519_dalek::VerifyingKey);

impl Version for V2 {
    const HEADER: &'static str = "v2";
    const LOCAL_HEADER: &'static str = "v2.local.";
    const PUBLIC_HEADER: &'static str = "v2.public.";

    const LOCAL_NONCE_LEN: usize = 24;
    const LOCAL_KEY_LEN: usize = 32;

    type LocalKey = LocalKey;
    type PublicKey = PublicKey;
    type SecretKey = SecretKey;
}

impl LocalKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PasetoError> {
        bytes
            .try_into()
            .map(LocalKey)
            .map_err(|_| PasetoError::KeyLength {
                expected: V2::LOCAL_KEY_LEN,
                actual: bytes.len(),
            })
    }

    pub fn from_raw_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Generate a random local key.
    pub fn random() -> Result<Self, PasetoError> {
        let mut bytes = [0; 32];
        getrandom::fill(&mut bytes).map_err(|_| PasetoError::RandomFailure)?;
        Ok(Self(bytes))
    }
}
