use thiserror::Error;

use crate::time::TimestampMs;

/// Digit alphabet shared by all bases up to 62.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid digit `{0}`")]
    InvalidDigit(char),
    #[error("decoded value does not fit into 64 bits")]
    Overflow,
}

/// Encodes a non-negative integer in positional notation for `base` 2..=62.
///
/// Zero encodes as the empty string, not `"0"`; [`from_base`] treats the
/// empty string as zero in return.
pub fn to_base(mut num: u64, base: u64) -> String {
    debug_assert!(base >= 2);
    debug_assert!(base <= ALPHABET.len() as u64);

    let mut digits = Vec::new();
    while num > 0 {
        digits.push(ALPHABET[(num % base) as usize] as char);
        num /= base;
    }
    digits.iter().rev().collect()
}

/// Decodes a [`to_base`]-encoded string, failing on the first byte that is
/// not a digit of `base` or as soon as the value no longer fits into a
/// `u64`.
pub fn from_base(text: &str, base: u64) -> Result<u64, DecodeError> {
    debug_assert!(base >= 2);
    debug_assert!(base <= ALPHABET.len() as u64);

    text.bytes().try_fold(0u64, |num, byte| {
        let digit = digit_value(byte)
            .filter(|d| *d < base)
            .ok_or(DecodeError::InvalidDigit(byte as char))?;
        num.checked_mul(base)
            .and_then(|num| num.checked_add(digit))
            .ok_or(DecodeError::Overflow)
    })
}

/// Current epoch time in milliseconds as a short base-62 token.
///
/// Two calls within the same millisecond return the same token; callers
/// needing uniqueness must disambiguate themselves.
pub fn base62_time() -> String {
    let ms = TimestampMs::now().into_milliseconds();
    to_base(u64::try_from(ms).unwrap_or_default(), 62)
}

fn digit_value(byte: u8) -> Option<u64> {
    ALPHABET.iter().position(|d| *d == byte).map(|p| p as u64)
}
