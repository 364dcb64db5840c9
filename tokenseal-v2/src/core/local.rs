use blake2::Blake2bMac;
use chacha20poly1305::aead::AeadInPlace;
use chacha20poly1305::{KeyInit, XChaCha20Poly1305};
use digest::consts::U24;
use digest::Mac;
use tokenseal_core::pae::pre_auth_encode;
use tokenseal_core::version::{LocalVersion, Version};
use tokenseal_core::PasetoError;

use super::{LocalKey, V2};

const NONCE_LEN: usize = V2::LOCAL_NONCE_LEN;
const TAG_LEN: usize = 16;

/// Derive the cipher nonce from generator output and the payload.
///
/// The generator output is the MAC key, not the nonce itself, so a repeated
/// random draw still produces distinct nonces for distinct payloads.
fn derive_nonce(nonce_material: &[u8], message: &[u8]) -> Result<[u8; NONCE_LEN], PasetoError> {
    let mut mac: Blake2bMac<U24> =
        Mac::new_from_slice(nonce_material).map_err(|_| PasetoError::NonceLength {
            expected: NONCE_LEN,
            actual: nonce_material.len(),
        })?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}

impl LocalVersion for V2 {
    fn encrypt(
        key: &LocalKey,
        nonce_material: &[u8],
        message: &[u8],
        footer: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        if nonce_material.len() != NONCE_LEN {
            return Err(PasetoError::NonceLength {
                expected: NONCE_LEN,
                actual: nonce_material.len(),
            });
        }
        let nonce = derive_nonce(nonce_material, message)?;

        let mut aad = Vec::new();
        pre_auth_encode(
            [&[V2::LOCAL_HEADER.as_bytes()], &[&nonce], &[footer]],
            &mut aad,
        )?;

        let mut payload = Vec::with_capacity(NONCE_LEN + message.len() + TAG_LEN);
        payload.extend_from_slice(&nonce);
        payload.extend_from_slice(message);

        let tag = XChaCha20Poly1305::new((&key.0).into())
            .encrypt_in_place_detached((&nonce).into(), &aad, &mut payload[NONCE_LEN..])
            .map_err(|_| PasetoError::EncodingOverflow)?;
        payload.extend_from_slice(&tag);

        Ok(payload)
    }

    fn decrypt<'a>(
        key: &LocalKey,
        payload: &'a mut [u8],
        footer: &[u8],
    ) -> Result<&'a [u8], PasetoError> {
        let (rest, tag) = payload
            .split_last_chunk_mut::<TAG_LEN>()
            .ok_or(PasetoError::AuthenticationFailed)?;
        let (nonce, ciphertext) = rest
            .split_first_chunk_mut::<NONCE_LEN>()
            .ok_or(PasetoError::AuthenticationFailed)?;
        let nonce: &[u8; NONCE_LEN] = nonce;

        let mut aad = Vec::new();
        pre_auth_encode([&[V2::LOCAL_HEADER.as_bytes()], &[nonce], &[footer]], &mut aad)?;

        XChaCha20Poly1305::new((&key.0).into())
            .decrypt_in_place_detached(nonce.into(), &aad, ciphertext, (&*tag).into())
            .map_err(|_| PasetoError::AuthenticationFailed)?;

        Ok(ciphertext)
    }
}
