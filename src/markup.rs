//! Pattern based scanning of converter generated HTML.
//!
//! The Markdown converter emits a narrow, predictable shape for headings and
//! fenced code blocks. Everything that inspects that HTML by pattern lives
//! here, so the rest of the pipeline only sees [`HeadingMatch`] values and
//! the [`replace_code_blocks`] callback.

use std::sync::LazyLock;

use regex::Regex;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?si)<h([1-6])\b[^>]*>(.*?)</h[1-6]>").expect("heading pattern is valid")
});

static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<code class="language-([^"]+)">(.*?)</code>"#)
        .expect("code block pattern is valid")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static PRE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?pre\b[^>]*>").expect("pre tag pattern is valid"));

/// A heading tag found in converted HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
    pub level: u8,
    /// Inner HTML between the opening and closing tag.
    pub inner: String,
    /// The complete matched fragment, tags included.
    pub raw: String,
}

/// Finds all heading tags of level 1 to 6 in document order.
pub fn find_headings(html: &str) -> Vec<HeadingMatch> {
    HEADING
        .captures_iter(html)
        .filter_map(|caps| {
            let level = caps.get(1)?.as_str().parse().ok()?;
            Some(HeadingMatch {
                level,
                inner: caps.get(2)?.as_str().to_string(),
                raw: caps.get(0)?.as_str().to_string(),
            })
        })
        .collect()
}

/// Replaces the content of every `<code class="language-X">` element.
///
/// The callback receives the language name and the entity decoded code
/// text, and returns the markup to place between the code tags. The tags
/// themselves are kept.
///
/// # Errors
///
/// Returns the first error produced by the callback.
pub fn replace_code_blocks<E>(
    html: &str,
    mut render: impl FnMut(&str, &str) -> Result<String, E>,
) -> Result<String, E> {
    let mut result = String::with_capacity(html.len());
    let mut last_end = 0;

    for caps in CODE_BLOCK.captures_iter(html) {
        let (Some(language), Some(code)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        let decoded = decode_entities(code.as_str());
        let highlighted = render(language.as_str(), &decoded)?;

        result.push_str(&html[last_end..code.start()]);
        result.push_str(&highlighted);
        last_end = code.end();
    }

    result.push_str(&html[last_end..]);
    Ok(result)
}

/// Removes `<pre>` wrappers a highlighter may add around its output; the
/// converter's own `<pre><code>` wrapper is kept around the result.
pub fn strip_pre_tags(html: &str) -> String {
    PRE_TAG.replace_all(html, "").into_owned()
}

/// Text content of an HTML fragment: tags removed, entities decoded.
pub fn plain_text(html: &str) -> String {
    decode_entities(&TAG.replace_all(html, ""))
}

/// Decodes HTML entities the converter emits in text and code.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}
