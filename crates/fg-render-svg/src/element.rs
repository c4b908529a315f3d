//! Primitive SVG elements used by the fretboard renderer.

use crate::attributes::{Attributes, escape_xml};

/// A single SVG element: a tag, its attributes, and optional text content.
#[derive(Debug, Clone)]
pub struct Element {
    tag: &'static str,
    attrs: Attributes,
    text: Option<String>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Attributes::new(),
            text: None,
        }
    }

    /// A line segment from (x1, y1) to (x2, y2).
    #[must_use]
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self::new("line")
            .num("x1", x1)
            .num("y1", y1)
            .num("x2", x2)
            .num("y2", y2)
    }

    /// A circle centered at (cx, cy) with radius r.
    #[must_use]
    pub fn circle(cx: f32, cy: f32, r: f32) -> Self {
        Self::new("circle").num("cx", cx).num("cy", cy).num("r", r)
    }

    /// A text node anchored at (x, y).
    #[must_use]
    pub fn text(x: f32, y: f32, content: impl Into<String>) -> Self {
        let mut element = Self::new("text").num("x", x).num("y", y);
        element.text = Some(content.into());
        element
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attrs = self.attrs.set(name, value);
        self
    }

    #[must_use]
    pub fn num(mut self, name: &str, value: f32) -> Self {
        self.attrs = self.attrs.num(name, value);
        self
    }

    /// Write the element as `<tag attrs/>` or `<tag attrs>text</tag>`.
    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        self.attrs.write_to(out);
        match &self.text {
            Some(text) => {
                out.push('>');
                out.push_str(&escape_xml(text));
                out.push_str("</");
                out.push_str(self.tag);
                out.push('>');
            }
            None => out.push_str("/>"),
        }
    }
}
