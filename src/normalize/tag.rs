//! Byte-level helpers for recognising the small HTML subset found in READMEs.
//!
//! All matching is ASCII case-insensitive on tag and attribute names. Offsets
//! are byte offsets into the text being scanned; every offset returned sits on
//! an ASCII byte, so slicing the source `&str` with it is always valid.

use memchr::{memchr, memchr2};

/// Check whether `needle` occurs at `pos`, ignoring ASCII case.
#[inline]
pub fn matches_at(bytes: &[u8], pos: usize, needle: &[u8]) -> bool {
    bytes
        .get(pos..pos + needle.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(needle))
}

/// Find the first occurrence of `needle` at or after `from`, ignoring ASCII case.
///
/// `needle` must start with `<`; the scan jumps between `<` bytes with memchr.
pub fn find_ignore_case(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    debug_assert_eq!(needle.first(), Some(&b'<'));
    let mut pos = from;
    while pos < bytes.len() {
        let at = pos + memchr(b'<', &bytes[pos..])?;
        if matches_at(bytes, at, needle) {
            return Some(at);
        }
        pos = at + 1;
    }
    None
}

/// Offset of the first `>` at or after `from`.
#[inline]
pub fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    memchr(b'>', bytes.get(from..)?).map(|offset| from + offset)
}

/// Whether the byte at `pos` ends a tag name: `>`, `/`, or whitespace.
///
/// Keeps `<pre>` from being read as `<p>` and `<h10>` from being read as `<h1>`.
#[inline]
pub fn is_name_boundary(bytes: &[u8], pos: usize) -> bool {
    matches!(
        bytes.get(pos),
        Some(b'>' | b'/' | b' ' | b'\t' | b'\n' | b'\r' | b'\x0c')
    )
}

/// Read a quoted attribute value starting at the quote byte `pos`.
///
/// Either quote character may open or close the value, and the value must be
/// non-empty. Returns the value's byte range (quotes excluded).
pub fn quoted_value(bytes: &[u8], pos: usize) -> Option<(usize, usize)> {
    if !matches!(bytes.get(pos), Some(b'"' | b'\'')) {
        return None;
    }
    let start = pos + 1;
    let end = start + memchr2(b'"', b'\'', bytes.get(start..)?)?;
    (end > start).then_some((start, end))
}

/// A `name=` attribute value located inside an opening tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attr {
    /// Start of the value (after the opening quote).
    pub value_start: usize,
    /// End of the value (the closing quote).
    pub value_end: usize,
    /// Offset just past the `>` that closes the tag.
    pub tag_end: usize,
}

/// Locate the URL-bearing attribute (`src=`, `href=`) of an opening tag.
///
/// `body_start` is the first byte after the tag name. Candidate attributes
/// must begin before the first `>`; the last candidate whose quoted value is
/// followed by a closing `>` wins. The returned `tag_end` is the first `>`
/// after that value, so a value containing `>` does not end the tag early.
pub fn url_attr(bytes: &[u8], body_start: usize, name: &[u8]) -> Option<Attr> {
    let head_end = find_tag_end(bytes, body_start)?;
    (body_start..head_end)
        .rev()
        .filter(|&pos| matches_at(bytes, pos, name))
        .find_map(|pos| {
            let (value_start, value_end) = quoted_value(bytes, pos + name.len())?;
            let close = find_tag_end(bytes, value_end + 1)?;
            Some(Attr {
                value_start,
                value_end,
                tag_end: close + 1,
            })
        })
}

/// First non-empty quoted value of `name` inside `tag`, matched case-sensitively.
pub fn first_attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let bytes = tag.as_bytes();
    tag.match_indices(name).find_map(|(pos, _)| {
        let (start, end) = quoted_value(bytes, pos + name.len())?;
        Some(&tag[start..end])
    })
}

/// Skip ASCII whitespace starting at `pos`.
#[inline]
pub fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}
