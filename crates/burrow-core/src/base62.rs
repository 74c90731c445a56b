//! Fixed-width base62 encoding.
//!
//! Allocated short codes always have the same length for a given width, so
//! values are reduced modulo `62^width` and left-padded with the zero digit
//! instead of being encoded at their natural length.

pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Widest encoding whose code space still fits in a `u128`.
pub const MAX_WIDTH: usize = 21;

/// Number of distinct codes of the given width, or `None` if it overflows `u128`.
pub fn capacity(width: usize) -> Option<u128> {
    62_u128.checked_pow(u32::try_from(width).ok()?)
}

/// Encodes `value` as exactly `width` base62 digits.
///
/// Values outside the code space are reduced modulo `62^width`.
///
/// # Panics
///
/// Panics if `width` is greater than [`MAX_WIDTH`].
pub fn encode_fixed(value: u128, width: usize) -> String {
    assert!(
        width <= MAX_WIDTH,
        "base62 width {width} exceeds maximum of {MAX_WIDTH}"
    );

    let mut remaining = match capacity(width) {
        Some(space) => value % space,
        None => value,
    };

    let mut digits = vec![ALPHABET[0]; width];
    for slot in digits.iter_mut().rev() {
        *slot = ALPHABET[(remaining % 62) as usize];
        remaining /= 62;
    }

    // Every byte comes from the ASCII alphabet.
    digits.into_iter().map(char::from).collect()
}
