use super::checksum::xor_fold;
use crate::utils::error::{FramingError, NmeaError};

/// The parts of a sentence that passed [`check`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame<'a> {
    /// Everything strictly between `$` and `*`.
    pub body: &'a str,
    pub checksum: u8,
}

impl<'a> Frame<'a> {
    /// Talker + sentence type code, e.g. `GPGGA`.
    pub fn code(&self) -> &'a str {
        self.body.split(',').next().unwrap_or_default()
    }
}

/// Returns true when the sentence is well framed and its checksum matches.
pub fn validate(sentence: &str) -> bool {
    check(sentence).is_ok()
}

/// Like [`validate`] but reports why a sentence was rejected.
pub fn check(sentence: &str) -> Result<(), NmeaError> {
    split_frame(sentence).map(|_| ())
}

/// Checks frame shape and checksum, returning the payload on success.
///
/// Delimiter search and checksum computation run over the same slice, so a
/// stray `*` inside the payload is rejected rather than silently truncating it.
pub fn split_frame(sentence: &str) -> Result<Frame<'_>, NmeaError> {
    let inner = sentence
        .strip_prefix('$')
        .ok_or(FramingError::MissingStart)?;
    let inner = inner
        .strip_suffix("\r\n")
        .ok_or(FramingError::MissingTerminator)?;

    let star = inner
        .find('*')
        .ok_or(FramingError::MissingChecksumDelimiter)?;
    let (body, declared) = (&inner[..star], &inner[star + 1..]);

    if declared.contains('*') {
        return Err(FramingError::MultipleChecksumDelimiters.into());
    }

    let declared = parse_checksum(declared)?;
    let computed = xor_fold(body.as_bytes());
    if declared != computed {
        return Err(NmeaError::ChecksumMismatch { declared, computed });
    }

    Ok(Frame { body, checksum: declared })
}

fn parse_checksum(digits: &str) -> Result<u8, FramingError> {
    if digits.len() != 2 {
        return Err(FramingError::MalformedChecksum(digits.to_string()));
    }
    match hex::decode(digits) {
        Ok(bytes) if bytes.len() == 1 => Ok(bytes[0]),
        _ => Err(FramingError::MalformedChecksum(digits.to_string())),
    }
}
