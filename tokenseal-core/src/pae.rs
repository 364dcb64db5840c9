//! Pre-authentication encoding.
//!
//! PAE turns an ordered list of byte strings into a single unambiguous byte
//! string: `LE64(count) || LE64(len(piece)) || piece || ...`. Every
//! cryptographic operation in the protocol authenticates or signs a PAE
//! encoding, never a bare concatenation, so header/payload/footer boundaries
//! cannot be shifted by an attacker.
//!
//! The encoding is streamed into a [`WriteBytes`] sink so callers can feed it
//! straight into a MAC or hash context without an intermediate allocation.
//! Each piece is itself a list of fragments, which lets callers pass a header
//! and its sub-strings without concatenating them first; fragment boundaries
//! do not affect the output.

use crate::PasetoError;

/// Byte sink for streamed encodings.
pub trait WriteBytes {
    fn write(&mut self, slice: &[u8]);
}

impl WriteBytes for Vec<u8> {
    fn write(&mut self, slice: &[u8]) {
        self.extend_from_slice(slice);
    }
}

impl<W: WriteBytes + ?Sized> WriteBytes for &mut W {
    fn write(&mut self, slice: &[u8]) {
        (**self).write(slice);
    }
}

/// Encode a fixed-arity list of pieces into `out`.
pub fn pre_auth_encode<const N: usize>(
    pieces: [&[&[u8]]; N],
    out: impl WriteBytes,
) -> Result<(), PasetoError> {
    encode_slice(&pieces, out)
}

/// Encode a runtime-sized list of pieces into `out`.
///
/// A piece whose total fragment length does not fit in an unsigned 64-bit
/// integer is rejected with [`PasetoError::EncodingOverflow`]. Unreachable on
/// any real input, but defined rather than undefined.
pub fn encode_slice(pieces: &[&[&[u8]]], mut out: impl WriteBytes) -> Result<(), PasetoError> {
    let count = u64::try_from(pieces.len()).map_err(|_| PasetoError::EncodingOverflow)?;
    out.write(&count.to_le_bytes());
    for piece in pieces {
        let mut len: u64 = 0;
        for fragment in *piece {
            let fragment_len =
                u64::try_from(fragment.len()).map_err(|_| PasetoError::EncodingOverflow)?;
            len = len
                .checked_add(fragment_len)
                .ok_or(PasetoError::EncodingOverflow)?;
        }
        out.write(&len.to_le_bytes());
        for fragment in *piece {
            out.write(fragment);
        }
    }
    Ok(())
}
