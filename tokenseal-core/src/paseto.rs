//! The operation facade binding a version backend to the framing layer.

use std::marker::PhantomData;

use crate::encoding::{Payload, TokenWithFooter};
use crate::nonce::{NonceGenerator, RandomNonceGenerator};
use crate::version::{KeyPair, LocalVersion, PublicVersion, Version};
use crate::{base64, token, PasetoError};

/// PASETO operations for one protocol version.
///
/// The version is a type parameter, so a `Paseto<V1>` can only ever produce
/// and accept v1 tokens; there is no runtime algorithm negotiation. Local
/// (encrypt/decrypt) and public (sign/verify) operations are available when
/// the version implements the corresponding capability trait.
///
/// The only injected collaborator is the [`NonceGenerator`], which defaults
/// to the secure-random strategy and only needs replacing to reproduce
/// published test vectors.
pub struct Paseto<V> {
    nonce_generator: Box<dyn NonceGenerator>,
    _version: PhantomData<V>,
}

impl<V: Version> Paseto<V> {
    pub fn new() -> Self {
        Self::with_nonce_generator(Box::new(RandomNonceGenerator))
    }

    pub fn with_nonce_generator(nonce_generator: Box<dyn NonceGenerator>) -> Self {
        Self {
            nonce_generator,
            _version: PhantomData,
        }
    }

    fn encode_message<M: Payload>(message: &M) -> Result<Vec<u8>, PasetoError> {
        let mut bytes = Vec::new();
        message
            .encode(&mut bytes)
            .map_err(|e| PasetoError::Payload(e.into()))?;
        Ok(bytes)
    }

    fn encode_footer<F: Payload>(footer: &F) -> Result<String, PasetoError> {
        let mut bytes = Vec::new();
        footer
            .encode(&mut bytes)
            .map_err(|e| PasetoError::Payload(e.into()))?;
        String::from_utf8(bytes).map_err(|e| PasetoError::Payload(e.into()))
    }
}

impl<V: Version> Default for Paseto<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: LocalVersion> Paseto<V> {
    /// Encrypt `message` into a `local` token, authenticating (but not
    /// encrypting) the optional footer.
    pub fn encrypt<M: Payload>(
        &self,
        message: &M,
        key: &V::LocalKey,
        footer: Option<&str>,
    ) -> Result<String, PasetoError> {
        let message = Self::encode_message(message)?;
        let nonce = self.nonce_generator.generate(V::LOCAL_NONCE_LEN)?;
        if nonce.len() != V::LOCAL_NONCE_LEN {
            return Err(PasetoError::NonceLength {
                expected: V::LOCAL_NONCE_LEN,
                actual: nonce.len(),
            });
        }
        let footer = footer.unwrap_or("").as_bytes();
        let payload = V::encrypt(key, &nonce, &message, footer)?;
        Ok(token::join(V::LOCAL_HEADER, &payload, footer))
    }

    /// Encrypt with a typed footer, encoded through the same provider
    /// contract as the payload.
    pub fn encrypt_with_footer<M: Payload, F: Payload>(
        &self,
        message: &M,
        key: &V::LocalKey,
        footer: &F,
    ) -> Result<String, PasetoError> {
        let footer = Self::encode_footer(footer)?;
        self.encrypt(message, key, Some(&footer))
    }

    /// Authenticate and decrypt a `local` token.
    ///
    /// `footer` is the caller's expected footer for the advisory equality
    /// check; pass `None` to skip it. Rejection points, in order: section
    /// structure, header prefix, footer mismatch, base64, authentication.
    pub fn decrypt<M: Payload>(
        &self,
        token: &str,
        key: &V::LocalKey,
        footer: Option<&str>,
    ) -> Result<M, PasetoError> {
        let split = token::split(token)?;
        token::check_header(&split, V::LOCAL_HEADER)?;
        let footer = token::decode_footer(&split, footer)?;
        let mut payload = base64::decode(split.payload)?;
        let cleartext = V::decrypt(key, &mut payload, &footer)?;
        M::decode(cleartext).map_err(PasetoError::Payload)
    }

    /// Decrypt, also returning the decoded footer.
    pub fn decrypt_with_footer<M: Payload, F: Payload>(
        &self,
        token: &str,
        key: &V::LocalKey,
    ) -> Result<TokenWithFooter<M, F>, PasetoError> {
        let message = self.decrypt(token, key, None)?;
        let footer = token::extract_footer_as(token)?;
        Ok(TokenWithFooter { message, footer })
    }
}

impl<V: PublicVersion> Paseto<V> {
    /// Sign `message` into a `public` token; the message stays readable.
    pub fn sign<M: Payload>(
        &self,
        message: &M,
        key: &V::SecretKey,
        footer: Option<&str>,
    ) -> Result<String, PasetoError> {
        let message = Self::encode_message(message)?;
        let footer = footer.unwrap_or("").as_bytes();
        let payload = V::sign(key, &message, footer)?;
        Ok(token::join(V::PUBLIC_HEADER, &payload, footer))
    }

    /// Sign with a typed footer.
    pub fn sign_with_footer<M: Payload, F: Payload>(
        &self,
        message: &M,
        key: &V::SecretKey,
        footer: &F,
    ) -> Result<String, PasetoError> {
        let footer = Self::encode_footer(footer)?;
        self.sign(message, key, Some(&footer))
    }

    /// Verify a `public` token and return its message.
    pub fn verify<M: Payload>(
        &self,
        token: &str,
        key: &V::PublicKey,
        footer: Option<&str>,
    ) -> Result<M, PasetoError> {
        let split = token::split(token)?;
        token::check_header(&split, V::PUBLIC_HEADER)?;
        let footer = token::decode_footer(&split, footer)?;
        let payload = base64::decode(split.payload)?;
        let message = V::verify(key, &payload, &footer)?;
        M::decode(message).map_err(PasetoError::Payload)
    }

    /// Verify, also returning the decoded footer.
    pub fn verify_with_footer<M: Payload, F: Payload>(
        &self,
        token: &str,
        key: &V::PublicKey,
    ) -> Result<TokenWithFooter<M, F>, PasetoError> {
        let message = self.verify(token, key, None)?;
        let footer = token::extract_footer_as(token)?;
        Ok(TokenWithFooter { message, footer })
    }

    /// Generate a fresh signing key pair for this version.
    pub fn generate_key_pair(&self) -> Result<KeyPair<V>, PasetoError> {
        V::generate_key_pair()
    }
}
