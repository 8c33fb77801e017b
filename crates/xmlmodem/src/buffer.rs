use alloc::{collections::VecDeque, string::String};

/// Unread input, kept as a ring of UTF-8 bytes so that chunks may be split at
/// arbitrary byte offsets — including in the middle of a multi-byte scalar.
///
/// Chunks are validated on entry: `push_bytes` admits nothing until the whole
/// chunk has been checked, so a rejected chunk leaves the ring untouched. A
/// code point whose bytes are split across two chunks is held in `carry`
/// until the remaining bytes arrive; the ring itself only ever contains whole
/// scalars.
#[derive(Debug, Default)]
pub(crate) struct ChunkBuffer {
    data: VecDeque<u8>,
    carry: [u8; 4],
    carry_len: u8,
}

/// Expected encoded length for a UTF-8 lead byte that `core::str::from_utf8`
/// has already classified as the valid start of an incomplete sequence.
fn utf8_expected_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        _ => 4,
    }
}

impl ChunkBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Validates `bytes` as a continuation of the stream and appends them.
    ///
    /// On failure returns the offset within `bytes` of the offending byte and
    /// leaves the buffer unmodified. A valid but incomplete trailing sequence
    /// is not an error; its bytes are carried until the next push.
    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) -> Result<(), usize> {
        // Phase one: complete (or extend) the carried code point.
        let carry_len = self.carry_len as usize;
        let mut completed: Option<([u8; 4], usize)> = None;
        let mut consumed = 0;
        if carry_len > 0 {
            let expected = utf8_expected_len(self.carry[0]);
            let take = (expected - carry_len).min(bytes.len());
            let mut tmp = self.carry;
            tmp[carry_len..carry_len + take].copy_from_slice(&bytes[..take]);
            match core::str::from_utf8(&tmp[..carry_len + take]) {
                Ok(_) => completed = Some((tmp, expected)),
                Err(e) if e.error_len().is_none() => {
                    // Still incomplete; the entire chunk fits in the carry.
                    self.carry = tmp;
                    self.carry_len = (carry_len + take) as u8;
                    return Ok(());
                }
                Err(e) => return Err(e.valid_up_to().saturating_sub(carry_len)),
            }
            consumed = take;
        }

        // Phase two: validate the rest of the chunk.
        let rest = &bytes[consumed..];
        let (valid, tail) = match core::str::from_utf8(rest) {
            Ok(_) => (rest, &[][..]),
            Err(e) if e.error_len().is_none() => rest.split_at(e.valid_up_to()),
            Err(e) => return Err(consumed + e.valid_up_to()),
        };

        // Only now is anything admitted.
        if let Some((tmp, len)) = completed {
            self.data.extend(&tmp[..len]);
            self.carry_len = 0;
        }
        self.data.reserve(valid.len());
        self.data.extend(valid);
        self.carry[..tail.len()].copy_from_slice(tail);
        self.carry_len = tail.len() as u8;
        Ok(())
    }

    /// Decodes the next scalar without consuming it.
    pub(crate) fn peek(&self) -> Option<char> {
        if self.data.is_empty() {
            return None;
        }
        let (front, _) = self.data.as_slices();
        let (ch, _) = bstr::decode_utf8(front);
        if let Some(c) = ch {
            return Some(c);
        }
        // The scalar straddles the ring's internal seam; assemble up to four
        // bytes on the stack and decode from there.
        let mut tmp = [0u8; 4];
        let mut len = 0;
        for (slot, b) in tmp.iter_mut().zip(self.data.iter()) {
            *slot = *b;
            len += 1;
        }
        let (ch, _) = bstr::decode_utf8(&tmp[..len]);
        ch
    }

    /// Decodes and consumes the next scalar.
    pub(crate) fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        for _ in 0..ch.len_utf8() {
            self.data.pop_front();
        }
        Some(ch)
    }

    /// Copies consecutive characters satisfying `predicate` into `dst`,
    /// returning how many were copied. ASCII runs on the contiguous front
    /// slice are drained in bulk; everything else falls back to per-scalar
    /// decoding.
    pub(crate) fn copy_while<F>(&mut self, dst: &mut String, predicate: F) -> usize
    where
        F: Fn(char) -> bool,
    {
        let mut copied = 0;
        loop {
            let prefix = {
                let (front, _) = self.data.as_slices();
                let mut prefix = 0;
                while prefix < front.len() {
                    let b = front[prefix];
                    if b < 0x80 && predicate(b as char) {
                        prefix += 1;
                    } else {
                        break;
                    }
                }
                prefix
            };
            if prefix > 0 {
                dst.reserve(prefix);
                for b in self.data.drain(..prefix) {
                    dst.push(b as char);
                }
                copied += prefix;
                continue;
            }
            match self.peek() {
                Some(c) if !c.is_ascii() && predicate(c) => {
                    dst.push(c);
                    for _ in 0..c.len_utf8() {
                        self.data.pop_front();
                    }
                    copied += 1;
                }
                _ => break,
            }
        }
        copied
    }
}
