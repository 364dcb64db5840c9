use rand_core::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey};
use rsa::pkcs8::spki::{DecodePublicKey, EncodePublicKey};
use rsa::pss::Signature;
use rsa::signature::{DigestVerifier, Keypair, RandomizedDigestSigner};
use rsa::traits::PublicKeyParts;
use sha2::{Digest, Sha384};
use tokenseal_core::pae::{pre_auth_encode, WriteBytes};
use tokenseal_core::version::{KeyPair, PublicVersion, Version};
use tokenseal_core::PasetoError;

use super::{PublicKey, SecretKey, V1};

const MODULUS_BITS: usize = 2048;
const SIGNATURE_LEN: usize = MODULUS_BITS / 8;

impl SecretKey {
    /// Decode a PKCS#1 DER encoded RSA private key.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PasetoError> {
        let key =
            rsa::RsaPrivateKey::from_pkcs1_der(bytes).map_err(|_| PasetoError::InvalidKey)?;
        check_modulus(key.n().bits())?;
        Ok(Self(rsa::pss::SigningKey::new(key)))
    }

    pub fn to_der(&self) -> Vec<u8> {
        self.0
            .to_pkcs1_der()
            .expect("encoding to pkcs1 der should succeed")
            .as_bytes()
            .to_vec()
    }

    /// Derive the associated verification key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.verifying_key())
    }
}

impl PublicKey {
    /// Decode an SPKI DER encoded RSA public key.
    pub fn from_der(bytes: &[u8]) -> Result<Self, PasetoError> {
        let key =
            rsa::RsaPublicKey::from_public_key_der(bytes).map_err(|_| PasetoError::InvalidKey)?;
        check_modulus(key.n().bits())?;
        Ok(Self(rsa::pss::VerifyingKey::new(key)))
    }

    pub fn to_der(&self) -> Vec<u8> {
        self.0
            .to_public_key_der()
            .expect("encoding to spki der should succeed")
            .into_vec()
    }
}

fn check_modulus(bits: usize) -> Result<(), PasetoError> {
    if bits != MODULUS_BITS {
        return Err(PasetoError::KeyLength {
            expected: SIGNATURE_LEN,
            actual: bits.div_ceil(8),
        });
    }
    Ok(())
}

impl PublicVersion for V1 {
    fn sign(key: &SecretKey, message: &[u8], footer: &[u8]) -> Result<Vec<u8>, PasetoError> {
        let digest = preauth_public(message, footer)?;
        // PSS salting makes this signature probabilistic
        let signature: Box<[u8]> = key
            .0
            .try_sign_digest_with_rng(&mut OsRng, digest)
            .map_err(|_| PasetoError::RandomFailure)?
            .into();

        let mut payload = Vec::with_capacity(message.len() + SIGNATURE_LEN);
        payload.extend_from_slice(message);
        payload.extend_from_slice(&signature);
        Ok(payload)
    }

    fn verify<'a>(
        key: &PublicKey,
        payload: &'a [u8],
        footer: &[u8],
    ) -> Result<&'a [u8], PasetoError> {
        let (message, tag) = payload
            .split_last_chunk::<SIGNATURE_LEN>()
            .ok_or(PasetoError::SignatureInvalid)?;

        let signature =
            Signature::try_from(&tag[..]).map_err(|_| PasetoError::SignatureInvalid)?;
        let digest = preauth_public(message, footer)?;
        DigestVerifier::<Sha384, Signature>::verify_digest(&key.0, digest, &signature)
            .map_err(|_| PasetoError::SignatureInvalid)?;

        Ok(message)
    }

    fn generate_key_pair() -> Result<KeyPair<V1>, PasetoError> {
        let signing_key = rsa::pss::SigningKey::<Sha384>::random(&mut OsRng, MODULUS_BITS)
            .map_err(|_| PasetoError::RandomFailure)?;
        let public = PublicKey(signing_key.verifying_key());
        Ok(KeyPair {
            secret: SecretKey(signing_key),
            public,
        })
    }
}

fn preauth_public(message: &[u8], footer: &[u8]) -> Result<Sha384, PasetoError> {
    struct Context(Sha384);
    impl WriteBytes for Context {
        fn write(&mut self, slice: &[u8]) {
            self.0.update(slice);
        }
    }

    let mut ctx = Context(Sha384::new());
    pre_auth_encode(
        [&[V1::PUBLIC_HEADER.as_bytes()], &[message], &[footer]],
        &mut ctx,
    )?;
    Ok(ctx.0)
}
