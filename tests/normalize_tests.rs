//! HTML-to-Markdown normalizer tests.
//!
//! One section per rewrite pass, then interactions between passes.

use lensmark::normalize;

// === Comments ===

#[test]
fn comment_removed() {
    assert_eq!(normalize("a<!-- tocstop -->b"), "ab");
}

#[test]
fn multiline_comment_removed_non_greedy() {
    let input = "<!-- one\nline -->keep<!-- two -->";
    assert_eq!(normalize(input), "keep");
}

#[test]
fn unterminated_comment_passes_through() {
    assert_eq!(normalize("text <!-- open"), "text <!-- open");
}

// === Images ===

#[test]
fn image_alt_after_src() {
    assert_eq!(normalize("<img src=\"y.png\" alt=\"X\">"), "![X](y.png)");
}

#[test]
fn image_alt_before_src() {
    assert_eq!(normalize("<img alt=\"X\" src=\"y.png\">"), "![X](y.png)");
}

#[test]
fn image_without_alt_defaults() {
    assert_eq!(normalize("<img src='logo.svg' width=\"100\"/>"), "![Image](logo.svg)");
}

#[test]
fn image_uppercase_tag() {
    assert_eq!(normalize("<IMG SRC=\"a.png\">"), "![Image](a.png)");
}

#[test]
fn image_attributes_across_lines() {
    let input = "<img\n  src=\"https://x/logo.png\"\n  alt=\"Logo\"\n/>";
    assert_eq!(normalize(input), "![Logo](https://x/logo.png)");
}

#[test]
fn image_without_src_untouched() {
    assert_eq!(normalize("<img alt=\"x\">"), "<img alt=\"x\">");
}

#[test]
fn image_empty_alt_defaults() {
    assert_eq!(normalize("<img alt=\"\" src=\"a.png\">"), "![Image](a.png)");
}

// === Links ===

#[test]
fn link_simple() {
    assert_eq!(
        normalize("see <a href=\"http://x\">docs</a>."),
        "see [docs](http://x)."
    );
}

#[test]
fn link_wrapping_image() {
    let input = "<a href=\"https://ci\"><img src=\"badge.svg\" alt=\"CI\"></a>";
    assert_eq!(normalize(input), "[![CI](badge.svg)](https://ci)");
}

#[test]
fn link_text_spans_lines() {
    let input = "<a target=\"_blank\" href='u'>\nmulti\nline\n</A>";
    assert_eq!(normalize(input), "[\nmulti\nline\n](u)");
}

#[test]
fn link_without_close_untouched() {
    assert_eq!(normalize("<a href=\"u\">open"), "<a href=\"u\">open");
}

#[test]
fn abbr_is_not_a_link() {
    assert_eq!(normalize("<abbr href=\"u\">x</a>"), "<abbr href=\"u\">x</a>");
}

// === Headings ===

#[test]
fn heading_levels() {
    assert_eq!(normalize("<h1>A</h1>"), "# A\n\n");
    assert_eq!(normalize("<h3 id=\"x\">C</h3>"), "### C\n\n");
    assert_eq!(normalize("<H6>F</H6>"), "###### F\n\n");
}

#[test]
fn heading_keeps_inner_markup() {
    assert_eq!(
        normalize("<h1 align=\"center\"><img src=\"l.png\"> Name</h1>"),
        "# ![Image](l.png) Name\n\n"
    );
}

#[test]
fn heading_without_close_untouched() {
    assert_eq!(normalize("<h2>open"), "<h2>open");
}

// === Breaks and paragraphs ===

#[test]
fn breaks() {
    assert_eq!(normalize("a<br>b<br/>c<br />d"), "a\nb\nc\nd");
}

#[test]
fn paragraphs_become_blank_lines() {
    assert_eq!(normalize("<p>one</p><p>two</p>"), "\n\none\n\ntwo\n\n");
}

#[test]
fn pre_is_not_a_paragraph() {
    assert_eq!(normalize("<pre>code</pre>"), "<pre>code</pre>");
}

#[test]
fn longer_tag_names_are_not_paragraphs_or_wrappers() {
    let input = "<picture><source srcset=\"a.png\"></picture><divider>x</divider>";
    assert_eq!(normalize(input), input);
}

// === Wrappers ===

#[test]
fn div_and_span_removed() {
    assert_eq!(
        normalize("<div align=\"center\"><span class=\"x\">hi</span></div>"),
        "hi"
    );
}

#[test]
fn unknown_tags_pass_through() {
    assert_eq!(normalize("<details><summary>x</summary></details>"), "<details><summary>x</summary></details>");
}

// === Blank-line collapse ===

#[test]
fn blank_runs_collapse() {
    assert_eq!(normalize("a\n\n\n\n\nb"), "a\n\nb");
    assert_eq!(normalize("a\n\nb"), "a\n\nb");
}

#[test]
fn collapse_after_rewrites() {
    assert_eq!(normalize("<h1>T</h1>\n<p>x</p>"), "# T\n\nx\n\n");
}

// === Totality ===

#[test]
fn empty_input() {
    assert_eq!(normalize(""), "");
}

#[test]
fn stray_angle_brackets() {
    assert_eq!(normalize("a < b > c <"), "a < b > c <");
}

#[test]
fn non_ascii_text_preserved() {
    assert_eq!(normalize("<p>Grüße 🌍</p>"), "\n\nGrüße 🌍\n\n");
}

#[test]
fn idempotent_on_markdown() {
    let input = "# Title\n\nSome `code` and [link](u).\n\n\n\n| a |\n|---|\n";
    let once = normalize(input);
    assert_eq!(normalize(&once), once);
}

// === Full scenario ===

#[test]
fn readme_scenario() {
    let input = "<h1>Title</h1>\n<p>Hello <a href=\"http://x\">link</a></p>\n\n\n|A|B|\n|-|-|\n|1|2|\n\nDone.";
    assert_eq!(
        normalize(input),
        "# Title\n\nHello [link](http://x)\n\n|A|B|\n|-|-|\n|1|2|\n\nDone."
    );
}
