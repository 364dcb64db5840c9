use cipher::{KeyIvInit, StreamCipher};
use generic_array::typenum::U32;
use generic_array::GenericArray;
use hmac::Mac;
use tokenseal_core::pae::{pre_auth_encode, WriteBytes};
use tokenseal_core::version::{LocalVersion, Version};
use tokenseal_core::PasetoError;

use super::{LocalKey, V1};

type Cipher = ctr::Ctr64BE<aes::Aes256>;
type HmacSha384 = hmac::Hmac<sha2::Sha384>;

const NONCE_LEN: usize = V1::LOCAL_NONCE_LEN;
const TAG_LEN: usize = 32;

impl LocalKey {
    /// Derive the per-call cipher and MAC, both bound to the nonce.
    fn keys(&self, nonce: &[u8; NONCE_LEN]) -> (Cipher, HmacSha384) {
        let ek = kdf(&self.0, nonce, b"paseto-encryption-key");
        let ak = kdf(&self.0, nonce, b"paseto-auth-key-for-aead");

        let cipher = Cipher::new(&ek, nonce.into());
        let mac = HmacSha384::new_from_slice(&ak).expect("hmac accepts any key length");
        (cipher, mac)
    }
}

impl LocalVersion for V1 {
    fn encrypt(
        key: &LocalKey,
        nonce_material: &[u8],
        message: &[u8],
        footer: &[u8],
    ) -> Result<Vec<u8>, PasetoError> {
        let nonce: &[u8; NONCE_LEN] =
            nonce_material
                .try_into()
                .map_err(|_| PasetoError::NonceLength {
                    expected: NONCE_LEN,
                    actual: nonce_material.len(),
                })?;

        let (mut cipher, mut mac) = key.keys(nonce);

        let mut payload = Vec::with_capacity(NONCE_LEN + message.len() + TAG_LEN);
        payload.extend_from_slice(nonce);
        payload.extend_from_slice(message);
        cipher.apply_keystream(&mut payload[NONCE_LEN..]);

        preauth_local(&mut mac, nonce, &payload[NONCE_LEN..], footer)?;
        let tag = mac.finalize().into_bytes();
        payload.extend_from_slice(&tag[..TAG_LEN]);

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

        let (mut cipher, mut mac) = key.keys(nonce);

        // ciphertext is never touched unless the tag matches
        preauth_local(&mut mac, nonce, ciphertext, footer)?;
        mac.verify_truncated_left(&tag[..])
            .map_err(|_| PasetoError::AuthenticationFailed)?;

        cipher.apply_keystream(ciphertext);
        Ok(ciphertext)
    }
}

fn kdf(key: &[u8; 32], salt: &[u8; NONCE_LEN], info: &'static [u8]) -> GenericArray<u8, U32> {
    let mut output = GenericArray::<u8, U32>::default();
    hkdf::Hkdf::<sha2::Sha384>::new(Some(salt), key)
        .expand(info, &mut output)
        .expect("32 bytes is a valid hkdf-sha384 output length");
    output
}

fn preauth_local(
    mac: &mut HmacSha384,
    nonce: &[u8],
    ciphertext: &[u8],
    footer: &[u8],
) -> Result<(), PasetoError> {
    struct Context<'a>(&'a mut HmacSha384);
    impl WriteBytes for Context<'_> {
        fn write(&mut self, slice: &[u8]) {
            self.0.update(slice);
        }
    }

    pre_auth_encode(
        [
            &[V1::LOCAL_HEADER.as_bytes()],
            &[nonce],
            &[ciphertext],
            &[footer],
        ],
        Context(mac),
    )
}
