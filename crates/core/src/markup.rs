//! Lightweight markdown-to-HTML rendering for generated study content.
//!
//! Only the subset the completion templates ask for is supported: headers,
//! bold, italic, inline code, simple list items, paragraphs, line breaks and
//! horizontal rules. Rules are applied in a fixed order; reordering them
//! changes the output (bold must run before italic, headers before line
//! breaks).

use std::sync::LazyLock;

use regex::Regex;

static H3_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### (.*)$").expect("valid regex"));
static H2_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^## (.*)$").expect("valid regex"));
static H1_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^# (.*)$").expect("valid regex"));
static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));
static ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.*?)\*").expect("valid regex"));
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`(.*?)`").expect("valid regex"));
static BULLET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^- (.*)$").expect("valid regex"));
static NUMBERED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\d+\. (.*)$").expect("valid regex"));

/// Render revision content to an HTML fragment.
///
/// The result is always wrapped in a single `<p>` block (paragraph breaks
/// become `</p><p>`). Empty input renders to an empty string. HTML special
/// characters in the source are escaped first, so the only tags in the
/// output are the ones produced here.
pub fn render_markup(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let html = escape_html(&content.replace("\r\n", "\n"));

    let html = H3_RE.replace_all(&html, "<h3>${1}</h3>");
    let html = H2_RE.replace_all(&html, "<h2>${1}</h2>");
    let html = H1_RE.replace_all(&html, "<h1>${1}</h1>");

    let html = BOLD_RE.replace_all(&html, "<strong>${1}</strong>");
    let html = ITALIC_RE.replace_all(&html, "<em>${1}</em>");
    let html = CODE_RE.replace_all(&html, "<code>${1}</code>");

    let html = BULLET_RE.replace_all(&html, "<li>${1}</li>");
    let html = NUMBERED_RE.replace_all(&html, "<li>${1}</li>");

    let html = html.replace("\n\n", "</p><p>").replace('\n', "<br/>");
    let html = html.replace("---", "<hr/>");

    format!("<p>{html}</p>")
}

/// Escape the characters that would otherwise open tags or entities.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_then_bold_paragraph() {
        let html = render_markup("# Title\n**bold** text");
        assert_eq!(html, "<p><h1>Title</h1><br/><strong>bold</strong> text</p>");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert_eq!(render_markup(""), "");
    }

    #[test]
    fn header_levels() {
        let html = render_markup("### Three\n## Two\n# One");
        assert_eq!(html, "<p><h3>Three</h3><br/><h2>Two</h2><br/><h1>One</h1></p>");
    }

    #[test]
    fn hash_without_space_is_not_a_header() {
        assert_eq!(render_markup("#hashtag"), "<p>#hashtag</p>");
    }

    #[test]
    fn italic_and_code() {
        let html = render_markup("an *important* `x^2` term");
        assert_eq!(html, "<p>an <em>important</em> <code>x^2</code> term</p>");
    }

    #[test]
    fn bold_runs_before_italic() {
        let html = render_markup("**a** and *b*");
        assert_eq!(html, "<p><strong>a</strong> and <em>b</em></p>");
    }

    #[test]
    fn list_items() {
        let html = render_markup("- first\n- second\n1. one\n12. twelve");
        assert_eq!(
            html,
            "<p><li>first</li><br/><li>second</li><br/><li>one</li><br/><li>twelve</li></p>"
        );
    }

    #[test]
    fn paragraphs_and_rules() {
        let html = render_markup("Recto\n---\nVerso\n\nNext");
        assert_eq!(html, "<p>Recto<br/><hr/><br/>Verso</p><p>Next</p>");
    }

    #[test]
    fn crlf_is_normalised() {
        let html = render_markup("# Title\r\nbody");
        assert_eq!(html, "<p><h1>Title</h1><br/>body</p>");
    }

    #[test]
    fn raw_html_is_escaped() {
        let html = render_markup("<script>alert(1)</script> & more");
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt; &amp; more</p>");
    }
}
