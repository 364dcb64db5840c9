//! JSON payload encoding for tokenseal, the standard PASETO payload format.
//!
//! [`Json`] adapts any serde type to the engine's [`Payload`] contract. The
//! encoding must be canonical for cross-implementation token equality:
//! serde_json emits struct fields in declaration order, so keep field order
//! stable in types whose tokens are compared byte-for-byte (conformance
//! vectors, cache keys).
//!
//! When using a JSON *footer*, be aware of the usual risks of parsing
//! attacker-supplied JSON before authentication: decode into a known struct
//! layout, not an arbitrary key-value map.

#![forbid(unsafe_code)]

use std::error::Error;
use std::io;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokenseal_core::Payload;

/// Wrapper implementing [`Payload`] for any serde round-trippable type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize + DeserializeOwned> Payload for Json<T> {
    fn encode(&self, writer: impl io::Write) -> io::Result<()> {
        serde_json::to_writer(writer, &self.0).map_err(io::Error::from)
    }

    fn decode(bytes: &[u8]) -> Result<Self, Box<dyn Error + Send + Sync>> {
        serde_json::from_slice(bytes).map(Self).map_err(Into::into)
    }
}
