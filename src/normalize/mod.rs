//! HTML-to-Markdown normalizer for README descriptions.
//!
//! Package descriptions mix Markdown with hand-written HTML (centered logos,
//! badge rows, `<h1 align="center">` titles). This module rewrites the common
//! constructs into their Markdown equivalents so that a plain Markdown renderer
//! can display them.
//!
//! The rewrite is a fixed sequence of passes. Each pass is a global, ASCII
//! case-insensitive substitution over the output of the previous pass; there
//! is no DOM and no error path. Text the passes do not recognise is copied
//! through unchanged.
//!
//! 1. HTML comments are removed.
//! 2. `<img src=...>` becomes `![alt](src)`.
//! 3. `<a href=...>text</a>` becomes `[text](href)`.
//! 4. `<h1>`..`<h6>` become ATX headings.
//! 5. `<br>` becomes a newline, `<p>`/`</p>` become blank lines.
//! 6. `<div>` and `<span>` wrappers are dropped, content kept.
//! 7. Runs of three or more newlines collapse to a single blank line.
//!
//! Tag names must end at `>`, `/` or whitespace, so `<pre>`, `<picture>` and
//! `<divider>` are not taken for `<p>` or `<div>`.
//!
//! # Example
//! ```
//! let md = lensmark::normalize("<h2 align=\"center\">Usage</h2>\n<br/>Run it.");
//! assert_eq!(md, "## Usage\n\nRun it.");
//! ```

pub mod tag;

use std::borrow::Cow;

use memchr::{memchr, memmem};

use tag::{find_ignore_case, find_tag_end, first_attr_value, is_name_boundary, matches_at};

/// A rewrite rule tried at every `<` byte.
///
/// Returns the offset just past the matched construct and its replacement.
type Rule = fn(&str, usize) -> Option<(usize, String)>;

/// Rewrite passes in application order. Later passes see the output of
/// earlier ones, so links inside headings are already Markdown when the
/// heading pass runs.
const PASSES: &[Rule] = &[
    strip_comment,
    image,
    anchor,
    heading::<1>,
    heading::<2>,
    heading::<3>,
    heading::<4>,
    heading::<5>,
    heading::<6>,
    line_break,
    paragraph_open,
    paragraph_close,
    div_open,
    div_close,
    span_open,
    span_close,
];

/// Normalize raw README text into Markdown.
///
/// Total over all inputs: empty input yields an empty string and unrecognised
/// or malformed HTML passes through as text.
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let text = PASSES
        .iter()
        .fold(Cow::Borrowed(raw), |text, rule| rewrite(text, *rule));
    let text = collapse_blank_runs(text);

    log::trace!("normalized {} bytes into {} bytes", raw.len(), text.len());
    text.into_owned()
}

/// Apply `rule` at every `<` of `input`, left to right, never overlapping.
///
/// Scanning resumes after the end of each match, as a global regex
/// replacement would. Returns the input untouched when nothing matched.
fn rewrite(input: Cow<'_, str>, rule: Rule) -> Cow<'_, str> {
    let rewritten = {
        let text: &str = &input;
        let bytes = text.as_bytes();
        let mut out = String::new();
        let mut copied = 0;
        let mut pos = 0;
        let mut changed = false;

        while let Some(offset) = memchr(b'<', &bytes[pos..]) {
            let at = pos + offset;
            match rule(text, at) {
                Some((end, replacement)) => {
                    if !changed {
                        out.reserve(text.len());
                        changed = true;
                    }
                    out.push_str(&text[copied..at]);
                    out.push_str(&replacement);
                    copied = end;
                    pos = end;
                }
                None => pos = at + 1,
            }
        }

        if changed {
            out.push_str(&text[copied..]);
            Some(out)
        } else {
            None
        }
    };

    match rewritten {
        Some(out) => Cow::Owned(out),
        None => input,
    }
}

/// `<!-- ... -->`, shortest match. Unterminated comments are left alone.
fn strip_comment(text: &str, at: usize) -> Option<(usize, String)> {
    let bytes = text.as_bytes();
    if !bytes[at..].starts_with(b"<!--") {
        return None;
    }
    let close = at + 4 + memmem::find(&bytes[at + 4..], b"-->")?;
    Some((close + 3, String::new()))
}

/// `<img ... src="X" ...>` to `![alt](X)`.
fn image(text: &str, at: usize) -> Option<(usize, String)> {
    let bytes = text.as_bytes();
    if !matches_at(bytes, at, b"<img") || !bytes.get(at + 4)?.is_ascii_whitespace() {
        return None;
    }
    let attr = tag::url_attr(bytes, at + 5, b"src=")?;
    let src = &text[attr.value_start..attr.value_end];
    let alt = first_attr_value(&text[at..attr.tag_end], "alt=").unwrap_or("Image");
    Some((attr.tag_end, format!("![{alt}]({src})")))
}

/// `<a ... href="X" ...>TEXT</a>` to `[TEXT](X)`.
fn anchor(text: &str, at: usize) -> Option<(usize, String)> {
    let bytes = text.as_bytes();
    if !matches_at(bytes, at, b"<a") || !bytes.get(at + 2)?.is_ascii_whitespace() {
        return None;
    }
    let attr = tag::url_attr(bytes, at + 3, b"href=")?;
    let close = find_ignore_case(bytes, attr.tag_end, b"</a>")?;
    let href = &text[attr.value_start..attr.value_end];
    let label = &text[attr.tag_end..close];
    Some((close + 4, format!("[{label}]({href})")))
}

/// `<hN ...>INNER</hN>` to `N` hashes, the inner text, and a blank line.
fn heading<const LEVEL: usize>(text: &str, at: usize) -> Option<(usize, String)> {
    let bytes = text.as_bytes();
    let digit = b'0' + LEVEL as u8;
    let open = [b'<', b'h', digit];
    if !matches_at(bytes, at, &open) || !is_name_boundary(bytes, at + 3) {
        return None;
    }
    let inner_start = find_tag_end(bytes, at + 3)? + 1;
    let close_tag = [b'<', b'/', b'h', digit, b'>'];
    let close = find_ignore_case(bytes, inner_start, &close_tag)?;

    let inner = &text[inner_start..close];
    let mut out = String::with_capacity(LEVEL + inner.len() + 3);
    out.extend(std::iter::repeat_n('#', LEVEL));
    out.push(' ');
    out.push_str(inner);
    out.push_str("\n\n");
    Some((close + close_tag.len(), out))
}

/// `<br>`, `<br/>` and `<br />` to a newline.
fn line_break(text: &str, at: usize) -> Option<(usize, String)> {
    let bytes = text.as_bytes();
    if !matches_at(bytes, at, b"<br") {
        return None;
    }
    let mut pos = tag::skip_whitespace(bytes, at + 3);
    if bytes.get(pos) == Some(&b'/') {
        pos += 1;
    }
    (bytes.get(pos) == Some(&b'>')).then(|| (pos + 1, "\n".to_string()))
}

fn paragraph_open(text: &str, at: usize) -> Option<(usize, String)> {
    open_tag(text, at, b"<p").map(|end| (end, "\n\n".to_string()))
}

fn paragraph_close(text: &str, at: usize) -> Option<(usize, String)> {
    close_tag(text, at, b"</p>").map(|end| (end, "\n\n".to_string()))
}

fn div_open(text: &str, at: usize) -> Option<(usize, String)> {
    open_tag(text, at, b"<div").map(|end| (end, String::new()))
}

fn div_close(text: &str, at: usize) -> Option<(usize, String)> {
    close_tag(text, at, b"</div>").map(|end| (end, String::new()))
}

fn span_open(text: &str, at: usize) -> Option<(usize, String)> {
    open_tag(text, at, b"<span").map(|end| (end, String::new()))
}

fn span_close(text: &str, at: usize) -> Option<(usize, String)> {
    close_tag(text, at, b"</span>").map(|end| (end, String::new()))
}

/// Match an opening tag with any attributes; returns the offset past its `>`.
fn open_tag(text: &str, at: usize, name: &[u8]) -> Option<usize> {
    let bytes = text.as_bytes();
    if !matches_at(bytes, at, name) || !is_name_boundary(bytes, at + name.len()) {
        return None;
    }
    find_tag_end(bytes, at + name.len()).map(|end| end + 1)
}

fn close_tag(text: &str, at: usize, tag: &[u8]) -> Option<usize> {
    matches_at(text.as_bytes(), at, tag).then_some(at + tag.len())
}

/// Collapse every run of three or more `\n` into exactly two.
fn collapse_blank_runs(input: Cow<'_, str>) -> Cow<'_, str> {
    if memmem::find(input.as_bytes(), b"\n\n\n").is_none() {
        return input;
    }

    let mut out = String::with_capacity(input.len());
    let mut run = 0;
    for ch in input.chars() {
        if ch == '\n' {
            run += 1;
            if run <= 2 {
                out.push('\n');
            }
        } else {
            run = 0;
            out.push(ch);
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(rule: Rule, input: &str) -> String {
        rewrite(Cow::Borrowed(input), rule).into_owned()
    }

    #[test]
    fn rewrite_borrows_when_nothing_matches() {
        let out = rewrite(Cow::Borrowed("a < b and <em>c</em>"), image);
        assert!(matches!(out, Cow::Borrowed(_)));
    }

    #[test]
    fn rewrite_handles_match_at_start_and_end() {
        assert_eq!(apply(div_open, "<div>x<div align=\"c\">"), "x");
    }

    #[test]
    fn comment_rule() {
        assert_eq!(apply(strip_comment, "a<!-- x -->b<!--\ny\n-->c"), "abc");
        assert_eq!(apply(strip_comment, "a<!-- open"), "a<!-- open");
        assert_eq!(apply(strip_comment, "<!---->"), "");
    }

    #[test]
    fn heading_levels_are_independent() {
        assert_eq!(apply(heading::<2>, "<h2>A</h2>"), "## A\n\n");
        assert_eq!(apply(heading::<1>, "<h2>A</h2>"), "<h2>A</h2>");
        assert_eq!(apply(heading::<1>, "<h10>A</h10>"), "<h10>A</h10>");
    }

    #[test]
    fn heading_needs_closing_tag() {
        assert_eq!(apply(heading::<3>, "<h3>open"), "<h3>open");
    }

    #[test]
    fn line_break_variants() {
        assert_eq!(apply(line_break, "a<br>b<BR/>c<br />d"), "a\nb\nc\nd");
        assert_eq!(apply(line_break, "<bra>"), "<bra>");
    }

    #[test]
    fn paragraph_rule_skips_other_p_tags() {
        assert_eq!(apply(paragraph_open, "<pre><p class=\"x\">"), "<pre>\n\n");
        assert_eq!(apply(paragraph_close, "</P>"), "\n\n");
    }

    #[test]
    fn collapse_keeps_single_blank_line() {
        assert_eq!(collapse_blank_runs(Cow::Borrowed("a\n\n\n\nb\n\nc\nd")), "a\n\nb\n\nc\nd");
        assert!(matches!(collapse_blank_runs(Cow::Borrowed("a\n\nb")), Cow::Borrowed(_)));
    }
}
