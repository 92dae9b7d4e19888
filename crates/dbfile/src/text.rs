use std::borrow::Cow;
use std::fmt;

/// A text field stored in exactly `W` bytes on disk.
///
/// The field keeps raw bytes, not a `String`: whatever a file holds before
/// the first NUL is carried through a load/rewrite cycle unchanged, valid
/// UTF-8 or not. Text is only decoded (lossily) for display.
///
/// [`FixedText::from_text`] builds a field from user input and truncates
/// silently:
///
/// - text past the first `\0` is dropped (it could not survive decoding),
/// - text longer than [`FixedText::CAPACITY`] is cut at the last UTF-8
///   character boundary that fits, so the encoded field always ends in NUL.
///
/// Truncation is part of the format, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FixedText<const W: usize> {
    bytes: Vec<u8>,
}

impl<const W: usize> FixedText<W> {
    /// Maximum number of text bytes kept by [`from_text`](Self::from_text).
    pub const CAPACITY: usize = W - 1;

    /// Builds a field from arbitrary text, truncating to [`Self::CAPACITY`] bytes.
    pub fn from_text(text: &str) -> Self {
        let text = match text.find('\0') {
            Some(nul) => &text[..nul],
            None => text,
        };
        let mut end = text.len().min(Self::CAPACITY);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            bytes: text.as_bytes()[..end].to_vec(),
        }
    }

    /// Takes a raw field as stored: the bytes up to the first NUL, at most `W`.
    ///
    /// Bytes are kept verbatim so that re-encoding reproduces the field.
    pub fn from_field(field: &[u8]) -> Self {
        let field = &field[..field.len().min(W)];
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        Self {
            bytes: field[..end].to_vec(),
        }
    }

    /// Copies the bytes into `dst` and NUL-fills the remainder.
    ///
    /// `dst` must be exactly `W` bytes.
    pub fn encode_into(&self, dst: &mut [u8]) {
        debug_assert_eq!(dst.len(), W);
        dst[..self.bytes.len()].copy_from_slice(&self.bytes);
        dst[self.bytes.len()..].fill(0);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The field as text; invalid UTF-8 shows as U+FFFD.
    pub fn to_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<const W: usize> fmt::Display for FixedText<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str_lossy())
    }
}

impl<const W: usize> AsRef<[u8]> for FixedText<W> {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl<const W: usize> From<&str> for FixedText<W> {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Small = FixedText<8>;

    #[test]
    fn short_text_is_kept() {
        let t = Small::from_text("abc");
        assert_eq!(t.to_str_lossy(), "abc");
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn long_text_is_truncated_to_capacity() {
        let t = Small::from_text("abcdefghijkl");
        assert_eq!(Small::CAPACITY, 7);
        assert_eq!(t.to_str_lossy(), "abcdefg");
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // "aaaaaa" is 6 bytes, 'é' is 2 bytes -> would end at byte 8 > 7
        let t = Small::from_text("aaaaaaé");
        assert_eq!(t.to_str_lossy(), "aaaaaa");
    }

    #[test]
    fn interior_nul_ends_the_text() {
        let t = Small::from_text("ab\0cd");
        assert_eq!(t.as_bytes(), b"ab");
    }

    #[test]
    fn encode_pads_with_nul() {
        let t = Small::from_text("hi");
        let mut field = [0xffu8; 8];
        t.encode_into(&mut field);
        assert_eq!(&field, b"hi\0\0\0\0\0\0");
    }

    #[test]
    fn text_field_still_ends_in_nul() {
        let t = Small::from_text("12345678");
        let mut field = [0xffu8; 8];
        t.encode_into(&mut field);
        assert_eq!(field[7], 0);
    }

    #[test]
    fn from_field_stops_at_first_nul() {
        let t = Small::from_field(b"bob\0junk");
        assert_eq!(t.as_bytes(), b"bob");
    }

    #[test]
    fn from_field_without_nul_keeps_every_byte() {
        let t = Small::from_field(b"ABCDEFGH");
        assert_eq!(t.as_bytes(), b"ABCDEFGH");

        let mut field = [0u8; 8];
        t.encode_into(&mut field);
        assert_eq!(&field, b"ABCDEFGH");
    }

    #[test]
    fn invalid_utf8_is_kept_raw_and_shown_lossily() {
        let t = FixedText::<16>::from_field(&[b'o', 0xe9, b'k', 0]);
        assert_eq!(t.as_bytes(), &[b'o', 0xe9, b'k']);
        assert_eq!(t.to_str_lossy(), "o\u{fffd}k");
        assert_eq!(t.to_string(), "o\u{fffd}k");

        let mut field = [0xffu8; 16];
        t.encode_into(&mut field);
        assert_eq!(&field[..4], &[b'o', 0xe9, b'k', 0]);
    }
}
