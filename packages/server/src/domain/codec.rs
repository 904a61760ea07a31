//! Payload-level binary codec for question answers.
//!
//! Select payload: `[n, bits...]` where `bits` is `ceil(n / 8)` bytes and the
//! most significant bit of byte `k` is option `8k`.
//!
//! Text payload: `[n, utf8...]` with exactly `n` text bytes.

use super::{
    censor::{censor, fit_to_length},
    error::CodecError,
};

pub const MAX_OPTIONS: usize = 255;
pub const MAX_TEXT_BYTES: usize = 255;

/// Encode selection flags as a select payload.
pub fn encode_selections<I>(selections: I) -> Result<Vec<u8>, CodecError>
where
    I: ExactSizeIterator<Item = bool>,
{
    let count = selections.len();
    if count > MAX_OPTIONS {
        return Err(CodecError::TooManyOptions(count));
    }

    let mut payload = vec![0u8; 1 + count.div_ceil(8)];
    payload[0] = count as u8;
    for (i, selected) in selections.enumerate() {
        if selected {
            payload[1 + i / 8] |= 0x80 >> (i % 8);
        }
    }
    Ok(payload)
}

/// Decode a select payload into one flag per option.
pub fn decode_selections(payload: &[u8]) -> Result<Vec<bool>, CodecError> {
    let Some((&count, bits)) = payload.split_first() else {
        return Err(CodecError::TooFewBytes);
    };
    let count = usize::from(count);
    let expected = count.div_ceil(8);
    if bits.len() != expected {
        return Err(CodecError::InvalidPayloadLength {
            expected: 1 + expected,
            actual: payload.len(),
        });
    }

    Ok((0..count)
        .map(|i| bits[i / 8] & (0x80 >> (i % 8)) != 0)
        .collect())
}

/// Reject more than one selected flag.
pub fn ensure_single_selection(selections: impl IntoIterator<Item = bool>) -> Result<(), CodecError> {
    let selected = selections.into_iter().filter(|s| *s).count();
    if selected > 1 {
        return Err(CodecError::MultipleSelected(selected));
    }
    Ok(())
}

/// Encode free text, censored and held at its raw byte length.
pub fn encode_text(text: &str) -> Result<Vec<u8>, CodecError> {
    let len = text.len();
    if len > MAX_TEXT_BYTES {
        return Err(CodecError::TextTooLong(len));
    }

    let censored = fit_to_length(censor(text), len);
    let mut payload = Vec::with_capacity(1 + len);
    payload.push(len as u8);
    payload.extend_from_slice(censored.as_bytes());
    Ok(payload)
}

/// Decode a text payload.
///
/// The result is censored and normalized back to the declared length, so
/// `decode_text(p)?.len() == p[0]` always holds.
pub fn decode_text(payload: &[u8]) -> Result<String, CodecError> {
    let Some((&len, bytes)) = payload.split_first() else {
        return Err(CodecError::TooFewBytes);
    };
    let len = usize::from(len);
    if bytes.len() != len {
        return Err(CodecError::InvalidPayloadLength {
            expected: 1 + len,
            actual: payload.len(),
        });
    }

    let raw = String::from_utf8_lossy(bytes);
    Ok(fit_to_length(censor(&raw), len))
}
