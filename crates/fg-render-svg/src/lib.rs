#![forbid(unsafe_code)]

//! SVG rendering surface for fretboard layouts.
//!
//! Paints the geometry description produced by `fg-layout` without making
//! any layout decisions of its own: every coordinate comes from the
//! [`FretboardLayout`], and this crate only chooses strokes, fills, and
//! fonts from the active [`Theme`].

mod attributes;
mod document;
mod element;
mod theme;

pub use attributes::{Attributes, escape_xml, fmt_number};
pub use document::SvgDocument;
pub use element::Element;
pub use theme::{ParseThemePresetError, Theme, ThemePreset};

use fg_core::{Diagram, StringTable};
use fg_layout::{
    FretboardConfig, FretboardLayout, LabelKind, LineKind, MarkerKind, layout_fretboard,
};

const STRING_STROKE: f32 = 2.0;
const FRET_STROKE: f32 = 1.0;
const NUT_STROKE: f32 = 4.0;
const DOT_STROKE: f32 = 2.0;
const RING_STROKE: f32 = 3.0;

/// Configuration for SVG rendering.
#[derive(Debug, Clone)]
pub struct SvgRenderConfig {
    pub theme: ThemePreset,
    /// Accessible document title, e.g. the chord variation name.
    pub title: Option<String>,
    /// Scale to the container instead of fixed pixel dimensions.
    pub responsive: bool,
    pub font_family: String,
    pub label_font_size: f32,
    pub number_font_size: f32,
    pub cross_font_size: f32,
}

impl Default for SvgRenderConfig {
    fn default() -> Self {
        Self {
            theme: ThemePreset::Default,
            title: None,
            responsive: false,
            font_family: String::from("system-ui, -apple-system, sans-serif"),
            label_font_size: 12.0,
            number_font_size: 10.0,
            cross_font_size: 16.0,
        }
    }
}

/// Parse-free entry point: lay out a diagram and paint it in one call.
#[must_use]
pub fn render_diagram_svg(
    diagram: &Diagram,
    table: &StringTable,
    fretboard: &FretboardConfig,
    config: &SvgRenderConfig,
) -> String {
    let layout = layout_fretboard(diagram, table, fretboard);
    render_svg(&layout, config)
}

/// Paint a computed layout as an SVG document string.
#[must_use]
pub fn render_svg(layout: &FretboardLayout, config: &SvgRenderConfig) -> String {
    let theme = Theme::preset(config.theme);
    let width = layout.bounds.width;
    let height = layout.bounds.height;

    let title = config.title.as_deref().unwrap_or("Chord diagram");
    let desc = format!(
        "Chord fingering diagram with {} fretted, {} open, and {} muted strings",
        layout.stats.fretted, layout.stats.open, layout.stats.muted
    );

    let mut doc = SvgDocument::new()
        .viewbox(0.0, 0.0, width, height)
        .accessible(title, desc)
        .data("positions", &layout.markers.len().to_string())
        .data("theme", config.theme.as_str());

    doc = if config.responsive {
        doc.responsive()
    } else {
        doc.sized(width, height)
    };

    doc = doc.child(
        Element::new("rect")
            .num("x", 0.0)
            .num("y", 0.0)
            .num("width", width)
            .num("height", height)
            .attr("fill", theme.background),
    );

    for line in &layout.lines {
        let (stroke, stroke_width) = match line.kind {
            LineKind::Nut => (theme.nut, NUT_STROKE),
            LineKind::Fret => (theme.fret_line, FRET_STROKE),
            LineKind::String => (theme.string_line, STRING_STROKE),
        };
        doc = doc.child(
            Element::line(line.from.x, line.from.y, line.to.x, line.to.y)
                .attr("stroke", stroke)
                .num("stroke-width", stroke_width),
        );
    }

    for label in &layout.labels {
        let (fill, size, weight) = match label.kind {
            LabelKind::StringName => (theme.label, config.label_font_size, Some("600")),
            LabelKind::FretNumber => (theme.fret_number, config.number_font_size, None),
        };
        let mut text = Element::text(label.at.x, label.at.y, label.text.clone())
            .attr("fill", fill)
            .num("font-size", size)
            .attr("font-family", config.font_family.clone())
            .attr("text-anchor", "middle")
            .attr("dominant-baseline", "middle");
        if let Some(weight) = weight {
            text = text.attr("font-weight", weight);
        }
        doc = doc.child(text);
    }

    for marker in &layout.markers {
        doc = doc.child(match marker.kind {
            MarkerKind::Dot { root } => Element::circle(marker.at.x, marker.at.y, marker.radius)
                .attr("fill", if root { theme.dot_root } else { theme.dot })
                .attr("stroke", theme.dot_stroke)
                .num("stroke-width", DOT_STROKE),
            MarkerKind::Ring => Element::circle(marker.at.x, marker.at.y, marker.radius)
                .attr("fill", "none")
                .attr("stroke", theme.open_ring)
                .num("stroke-width", RING_STROKE),
            MarkerKind::Cross => Element::text(marker.at.x, marker.at.y, "\u{00d7}")
                .attr("fill", theme.mute_cross)
                .num("font-size", config.cross_font_size)
                .attr("font-family", config.font_family.clone())
                .attr("font-weight", "bold")
                .attr("text-anchor", "middle")
                .attr("dominant-baseline", "middle"),
        });
    }

    doc.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fg_parser::parse;
    use proptest::prelude::*;

    fn render(notation: &str, config: &SvgRenderConfig) -> String {
        render_diagram_svg(
            &parse(notation).diagram,
            &StringTable::standard_guitar(),
            &FretboardConfig::default(),
            config,
        )
    }

    #[test]
    fn emits_a_complete_document() {
        let svg = render("e0,b1,g0,d2,a3,Ex", &SvgRenderConfig::default());
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("viewBox=\"0 0 490 230\""));
        assert!(svg.contains("<line"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("\u{00d7}"));
        assert!(svg.contains("data-positions=\"6\""));
    }

    #[test]
    fn nut_is_thicker_than_fret_wires() {
        let svg = render("e0", &SvgRenderConfig::default());
        assert!(svg.contains("stroke-width=\"4\""));
        assert!(svg.contains("stroke-width=\"1\""));
    }

    #[test]
    fn root_dot_uses_the_accent_color() {
        let theme = Theme::default();
        let with_root = render("E3", &SvgRenderConfig::default());
        assert!(with_root.contains(theme.dot_root));

        let without_root = render("a3", &SvgRenderConfig::default());
        assert!(without_root.contains(theme.dot));
        assert!(!without_root.contains(&format!("fill=\"{}\"", theme.dot_root)));
    }

    #[test]
    fn open_ring_is_unfilled() {
        let svg = render("e0", &SvgRenderConfig::default());
        assert!(svg.contains("fill=\"none\""));
        assert!(svg.contains(Theme::default().open_ring));
    }

    #[test]
    fn identical_diagrams_differ_only_in_title() {
        let base = SvgRenderConfig::default();
        let named = SvgRenderConfig {
            title: Some("C Major (open)".to_string()),
            ..SvgRenderConfig::default()
        };
        let a = render("E3,A2,D0,G0,B0,e0", &base);
        let b = render("E3,A2,D0,G0,B0,e0", &named);

        let strip_title = |svg: &str| {
            let start = svg.find("<title>").expect("title open");
            let end = svg.find("</title>").expect("title close") + "</title>".len();
            format!("{}{}", &svg[..start], &svg[end..])
        };
        assert_ne!(a, b);
        assert_eq!(strip_title(&a), strip_title(&b));
    }

    #[test]
    fn title_text_is_escaped() {
        let config = SvgRenderConfig {
            title: Some("A <7> & \"sus\"".to_string()),
            ..SvgRenderConfig::default()
        };
        let svg = render("a0", &config);
        assert!(svg.contains("<title>A &lt;7&gt; &amp; &quot;sus&quot;</title>"));
        assert!(!svg.contains("<title>A <7>"));
    }

    #[test]
    fn dark_theme_changes_the_palette() {
        let config = SvgRenderConfig {
            theme: ThemePreset::Dark,
            ..SvgRenderConfig::default()
        };
        let svg = render("e0", &config);
        assert!(svg.contains("data-theme=\"dark\""));
        assert!(svg.contains(Theme::preset(ThemePreset::Dark).background));
    }

    #[test]
    fn responsive_sizing_is_opt_in() {
        let fixed = render("e0", &SvgRenderConfig::default());
        assert!(fixed.contains("width=\"490\""));

        let config = SvgRenderConfig {
            responsive: true,
            ..SvgRenderConfig::default()
        };
        let fluid = render("e0", &config);
        assert!(fluid.contains("width=\"100%\""));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_render_is_total_and_well_formed(input in ".{0,96}") {
            let svg = render(&input, &SvgRenderConfig::default());
            prop_assert!(svg.starts_with("<svg"));
            prop_assert!(svg.trim_end().ends_with("</svg>"));
        }
    }
}
