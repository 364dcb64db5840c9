use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use tokenseal_core::pae::pre_auth_encode;
use tokenseal_core::version::{KeyPair, PublicVersion, Version};
use tokenseal_core::PasetoError;

use super::{PublicKey, SecretKey, V2};

const SIGNATURE_LEN: usize = 64;
const KEY_LEN: usize = 32;

impl SecretKey {
    /// Decode a 32-byte Ed25519 seed.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PasetoError> {
        let seed: &[u8; KEY_LEN] = bytes.try_into().map_err(|_| PasetoError::KeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        Ok(Self(SigningKey::from_bytes(seed)))
    }

    pub fn to_bytes(&self) -> [u8; KEY_LEN] {
        self.0.to_bytes()
    }

    /// Derive the associated verification key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }
}

impl PublicKey {
    /// Decode a 32-byte Ed25519 public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PasetoError> {
        let bytes: &[u8; KEY_LEN] = bytes.try_into().map_err(|_| PasetoError::KeyLength {
            expected: KEY_LEN,
            actual: bytes.len(),
        })?;
        VerifyingKey::from_bytes(bytes)
            .map(Self)
            .map_err(|_| PasetoError::InvalidKey)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        self.0.as_bytes()
    }
}

impl PublicVersion for V2 {
    fn sign(key: &SecretKey, message: &[u8], footer: &[u8]) -> Result<Vec<u8>, PasetoError> {
        let signature = key.0.sign(&preauth_public(message, footer)?);

        let mut payload = Vec::with_capacity(message.len() + SIGNATURE_LEN);
        payload.extend_from_slice(message);
        payload.extend_from_slice(&signature.to_bytes());
        Ok(payload)
    }

    fn verify<'a>(
        key: &PublicKey,
        payload: &'a [u8],
        footer: &[u8],
    ) -> Result<&'a [u8], PasetoError> {
        // a payload too short to hold a signature is just an invalid signature
        let (message, tag) = payload
            .split_last_chunk::<SIGNATURE_LEN>()
            .ok_or(PasetoError::SignatureInvalid)?;
        let signature = Signature::from_bytes(tag);

        key.0
            .verify(&preauth_public(message, footer)?, &signature)
            .map_err(|_| PasetoError::SignatureInvalid)?;

        Ok(message)
    }

    fn generate_key_pair() -> Result<KeyPair<V2>, PasetoError> {
        let mut seed = [0; KEY_LEN];
        getrandom::fill(&mut seed).map_err(|_| PasetoError::RandomFailure)?;

        let secret = SecretKey(SigningKey::from_bytes(&seed));
        let public = secret.public_key();
        Ok(KeyPair { secret, public })
    }
}

fn preauth_public(message: &[u8], footer: &[u8]) -> Result<Vec<u8>, PasetoError> {
    let mut pae = Vec::new();
    pre_auth_encode(
        [&[V2::PUBLIC_HEADER.as_bytes()], &[message], &[footer]],
        &mut pae,
    )?;
    Ok(pae)
}
