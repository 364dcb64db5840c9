//! The payload encoding contract.
//!
//! Turning an application object into token bytes and back is the job of an
//! external encoding provider, not of this engine. The provider must be
//! canonical and deterministic: two encodes of the same value produce the
//! same bytes, since token equality across implementations depends on it.
//! JSON via serde is supplied by the `tokenseal-json` crate; raw strings and
//! byte vectors are supported here for callers that bring their own format.

use std::error::Error;
use std::io;

/// A value that can be carried as a token payload or typed footer.
pub trait Payload: Sized {
    /// Encode into the canonical byte representation.
    fn encode(&self, writer: impl io::Write) -> io::Result<()>;

    /// Decode from the canonical byte representation.
    fn decode(bytes: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

impl Payload for String {
    fn encode(&self, mut writer: impl io::Write) -> io::Result<()> {
        writer.write_all(self.as_bytes())
    }

    fn decode(bytes: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(std::str::from_utf8(bytes)?.to_owned())
    }
}

impl Payload for Vec<u8> {
    fn encode(&self, mut writer: impl io::Write) -> io::Result<()> {
        writer.write_all(self)
    }

    fn decode(bytes: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(bytes.to_owned())
    }
}

/// A decoded payload together with the token's decoded footer, for callers
/// who want both without re-parsing the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithFooter<M, F> {
    pub message: M,
    pub footer: Option<F>,
}
