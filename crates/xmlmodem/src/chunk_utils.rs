//! Helpers for exercising chunked feeding in tests and fuzzing.

use alloc::vec::Vec;

/// Splits `payload` into `parts` chunks of approximately equal size.
///
/// Chunks are cut at raw byte offsets — deliberately, since the parser
/// accepts splits in the middle of a multi-byte character.
///
/// # Panics
///
/// Panics if `parts` is zero.
///
/// # Examples
///
/// ```
/// use xmlmodem::produce_chunks;
///
/// let chunks = produce_chunks(b"<a>hi</a>", 4);
/// assert_eq!(chunks, [&b"<a>"[..], b"hi<", b"/a>"]);
/// ```
#[must_use]
pub fn produce_chunks(payload: &[u8], parts: usize) -> Vec<&[u8]> {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts).max(1);
    payload.chunks(chunk_size).collect()
}

/// Every two-way split of `payload`, from `("", payload)` to `(payload, "")`.
///
/// Feeding both halves of every split must produce the same notifications as
/// feeding `payload` whole; the exhaustive chunking tests iterate exactly
/// this.
pub fn split_points(payload: &[u8]) -> impl Iterator<Item = (&[u8], &[u8])> {
    (0..=payload.len()).map(move |i| payload.split_at(i))
}
