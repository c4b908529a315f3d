//! SVG document root with viewBox, accessibility, and child elements.

use std::fmt::Write;

use crate::attributes::{Attributes, escape_xml, fmt_number};
use crate::element::Element;

/// Builder for a complete SVG document.
#[derive(Debug, Clone, Default)]
pub struct SvgDocument {
    attrs: Attributes,
    viewbox: Option<(f32, f32, f32, f32)>,
    width: Option<String>,
    height: Option<String>,
    title: Option<String>,
    desc: Option<String>,
    children: Vec<Element>,
}

impl SvgDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn viewbox(mut self, x: f32, y: f32, width: f32, height: f32) -> Self {
        self.viewbox = Some((x, y, width, height));
        self
    }

    /// Fixed pixel dimensions.
    #[must_use]
    pub fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = Some(fmt_number(width));
        self.height = Some(fmt_number(height));
        self
    }

    /// Scale to the container (width/height 100%).
    #[must_use]
    pub fn responsive(mut self) -> Self {
        self.width = Some(String::from("100%"));
        self.height = Some(String::from("100%"));
        self
    }

    /// Accessibility title and description; also sets `role="img"`.
    #[must_use]
    pub fn accessible(mut self, title: impl Into<String>, desc: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.desc = Some(desc.into());
        self.attrs = self.attrs.set("role", "img");
        self
    }

    /// Add a data-* attribute to the root element.
    #[must_use]
    pub fn data(mut self, name: &str, value: &str) -> Self {
        self.attrs = self.attrs.data(name, value);
        self
    }

    #[must_use]
    pub fn child(mut self, element: Element) -> Self {
        self.children.push(element);
        self
    }

    /// Render the document to an SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(1024);
        out.push_str("<svg xmlns=\"http://www.w3.org/2000/svg\"");
        if let Some((x, y, w, h)) = self.viewbox {
            let _ = write!(
                out,
                " viewBox=\"{} {} {} {}\"",
                fmt_number(x),
                fmt_number(y),
                fmt_number(w),
                fmt_number(h)
            );
        }
        if let Some(width) = &self.width {
            let _ = write!(out, " width=\"{width}\"");
        }
        if let Some(height) = &self.height {
            let _ = write!(out, " height=\"{height}\"");
        }
        self.attrs.write_to(&mut out);
        out.push('>');

        if let Some(title) = &self.title {
            let _ = write!(out, "<title>{}</title>", escape_xml(title));
        }
        if let Some(desc) = &self.desc {
            let _ = write!(out, "<desc>{}</desc>", escape_xml(desc));
        }

        for child in &self.children {
            out.push('\n');
            child.write_to(&mut out);
        }
        out.push_str("\n</svg>\n");
        out
    }
}
