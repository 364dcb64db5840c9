//! Token framing: splitting, joining, and the advisory header/footer checks.

use crate::{base64, PasetoError};

/// A token split into its sections. Borrowed, nothing decoded yet.
#[derive(Debug, PartialEq, Eq)]
pub struct SplitToken<'a> {
    pub version: &'a str,
    pub purpose: &'a str,
    pub payload: &'a str,
    /// `None` when the token has three sections. An absent footer and an
    /// unparsable token are distinct outcomes: the latter is an error from
    /// [`split`], never a sentinel value.
    pub footer: Option<&'a str>,
}

/// Split a token into its 3 or 4 dot-separated sections.
///
/// Any other section count means the string cannot be a PASETO and fails with
/// [`PasetoError::MalformedToken`].
pub fn split(token: &str) -> Result<SplitToken<'_>, PasetoError> {
    let sections: Vec<&str> = token.split('.').collect();
    match sections[..] {
        [version, purpose, payload] => Ok(SplitToken {
            version,
            purpose,
            payload,
            footer: None,
        }),
        [version, purpose, payload, footer] => Ok(SplitToken {
            version,
            purpose,
            payload,
            footer: Some(footer),
        }),
        _ => Err(PasetoError::MalformedToken),
    }
}

/// Assemble a token string from a header literal and raw section bytes.
///
/// An empty footer is treated as absent, matching what [`split`] produces for
/// a three-section token.
pub fn join(header: &str, payload: &[u8], footer: &[u8]) -> String {
    let mut token = String::with_capacity(header.len() + (payload.len() + footer.len()) * 4 / 3 + 1);
    token.push_str(header);
    token.push_str(&base64::encode(payload));
    if !footer.is_empty() {
        token.push('.');
        token.push_str(&base64::encode(footer));
    }
    token
}

/// Require the token's `version.purpose.` prefix to equal `expected`.
///
/// A fast-path rejection before any cryptographic work; the header is also
/// bound into the pre-authentication encoding, so this check is an
/// error-reporting aid, not a security boundary.
pub fn check_header(split: &SplitToken<'_>, expected: &'static str) -> Result<(), PasetoError> {
    let found = format!("{}.{}.", split.version, split.purpose);
    if found != expected {
        return Err(PasetoError::InvalidHeader { found, expected });
    }
    Ok(())
}

/// Decode the footer section and, if the caller supplied a non-empty
/// `expected` footer, require byte-for-byte equality.
///
/// The equality check is advisory: it exists for early, clear error
/// reporting. Footer authenticity is enforced by the pre-authentication
/// encoding during decryption/verification regardless. An absent or empty
/// `expected` skips the comparison, so callers pinning a footer for
/// security-relevant dispatch must pass the expected value explicitly.
pub fn decode_footer(
    split: &SplitToken<'_>,
    expected: Option<&str>,
) -> Result<Vec<u8>, PasetoError> {
    let footer = match split.footer {
        Some(section) => base64::decode(section)?,
        None => Vec::new(),
    };
    if let Some(expected) = expected {
        if !expected.is_empty() && footer != expected.as_bytes() {
            return Err(PasetoError::InvalidFooter);
        }
    }
    Ok(footer)
}

/// Decode a token's footer without performing any cryptographic checks.
///
/// Returns `None` for a three-section token. The result is unauthenticated
/// until the token itself has been decrypted or verified.
pub fn extract_footer(token: &str) -> Result<Option<String>, PasetoError> {
    let split = split(token)?;
    match split.footer {
        Some(section) => {
            let bytes = base64::decode(section)?;
            let footer =
                String::from_utf8(bytes).map_err(|_| PasetoError::MalformedEncoding)?;
            Ok(Some(footer))
        }
        None => Ok(None),
    }
}

/// [`extract_footer`], decoding into a typed shape via [`crate::Payload`].
pub fn extract_footer_as<F: crate::Payload>(token: &str) -> Result<Option<F>, PasetoError> {
    let split = split(token)?;
    match split.footer {
        Some(section) => {
            let bytes = base64::decode(section)?;
            F::decode(&bytes).map(Some).map_err(PasetoError::Payload)
        }
        None => Ok(None),
    }
}
