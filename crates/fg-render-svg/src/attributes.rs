//! SVG attribute handling with XML escaping.

use std::fmt::Write;

/// Ordered collection of SVG attributes.
#[derive(Debug, Clone, Default)]
pub struct Attributes {
    attrs: Vec<(String, String)>,
}

impl Attributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a string attribute.
    #[must_use]
    pub fn set(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs.push((name.to_string(), value.into()));
        self
    }

    /// Add a numeric attribute, formatted compactly.
    #[must_use]
    pub fn num(self, name: &str, value: f32) -> Self {
        let formatted = fmt_number(value);
        self.set(name, formatted)
    }

    /// Add a data-* attribute.
    #[must_use]
    pub fn data(self, name: &str, value: &str) -> Self {
        let qualified = format!("data-{name}");
        self.set(&qualified, value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Write attributes as ` name="value"` pairs, escaping values.
    pub fn write_to(&self, out: &mut String) {
        for (name, value) in &self.attrs {
            let _ = write!(out, " {name}=\"{}\"", escape_xml(value));
        }
    }
}

/// Format a coordinate with up to two decimals, trimming whole numbers.
#[must_use]
pub fn fmt_number(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

/// Escape text for use in XML attribute values and text nodes.
#[must_use]
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_escaped_pairs() {
        let mut out = String::new();
        Attributes::new()
            .set("fill", "#333")
            .set("aria-label", "A \"major\" <chord>")
            .write_to(&mut out);
        assert_eq!(
            out,
            " fill=\"#333\" aria-label=\"A &quot;major&quot; &lt;chord&gt;\""
        );
    }

    #[test]
    fn numbers_are_compact() {
        assert_eq!(fmt_number(50.0), "50");
        assert_eq!(fmt_number(35.5), "35.50");
        assert_eq!(fmt_number(-0.25), "-0.25");
    }

    #[test]
    fn data_attributes_are_prefixed() {
        let mut out = String::new();
        Attributes::new().data("markers", "6").write_to(&mut out);
        assert_eq!(out, " data-markers=\"6\"");
    }
}
