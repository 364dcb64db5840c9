//! Unpadded base64url, as mandated for every PASETO section.
//!
//! <https://github.com/paseto-standard/paseto-spec/blob/master/docs/01-Protocol-Versions/Common.md#base64-encoding>

use base64ct::{Base64UrlUnpadded, Encoding};

use crate::PasetoError;

pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Decode a base64url section.
///
/// Tokens on the wire are unpadded, but padded input from sloppy producers is
/// tolerated by stripping trailing `=` before decoding. Invalid alphabet
/// bytes, non-canonical trailing bits, and impossible lengths all fail with
/// [`PasetoError::MalformedEncoding`].
pub fn decode(s: &str) -> Result<Vec<u8>, PasetoError> {
    let s = s.trim_end_matches('=');
    Base64UrlUnpadded::decode_vec(s).map_err(|_| PasetoError::MalformedEncoding)
}
