mod local;
mod public;

use tokenseal_core::version::Version;
use tokenseal_core::PasetoError;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub struct V1;

/// 32-byte symmetric key for `v1.local` tokens. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct LocalKey([u8; 32]);

/// RSA-PSS signing key for `v1.public` tokens.
#[derive(Clone)]
pub struct SecretKey(pub(crate) rsa::pss::SigningKey<sha2::Sha384>);

/// RSA-PSS verification key for `v1.public` tokens.
#[derive(Clone)]
pub struct PublicKey(pub(crate) rsa::pss::VerifyingKey<sha2::Sha384>);

impl Version for V1 {
    const HEADER: &'static str = "v1";
    const LOCAL_HEADER: &'static str = "v1.local.";
    const PUBLIC_HEADER: &'static str = "v1.public.";

    const LOCAL_NONCE_LEN: usize = 16;
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
                expected: V1::LOCAL_KEY_LEN,
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
