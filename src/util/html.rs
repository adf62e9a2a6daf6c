//! Markup helpers

/// Escape HTML special characters in text and attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render ` name="value"` when `value` is non-empty, nothing otherwise.
pub fn attribute(name: &str, value: &str) -> String {
    if value.is_empty() {
        String::new()
    } else {
        format!(" {}=\"{}\"", name, escape_html(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_ampersand_first() {
        assert_eq!(escape_html("a & <b>"), "a &amp; &lt;b&gt;");
        assert_eq!(escape_html("\"x\" 'y'"), "&quot;x&quot; &#39;y&#39;");
    }

    #[test]
    fn empty_attribute_is_omitted() {
        assert_eq!(attribute("title", ""), "");
        assert_eq!(attribute("href", "/a?b&c"), " href=\"/a?b&amp;c\"");
    }
}
