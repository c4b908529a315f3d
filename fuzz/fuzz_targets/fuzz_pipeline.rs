#![no_main]

use fg_core::StringTable;
use fg_layout::{FretboardConfig, layout_fretboard};
use fg_render_svg::{SvgRenderConfig, render_svg};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(notation) = std::str::from_utf8(data) else {
        return;
    };
    let parsed = fg_parser::parse(notation);
    let table = StringTable::standard_guitar();
    let layout = layout_fretboard(&parsed.diagram, &table, &FretboardConfig::default());
    for marker in &layout.markers {
        assert!(marker.at.x.is_finite());
        assert!(marker.at.y.is_finite());
    }
    let svg = render_svg(&layout, &SvgRenderConfig::default());
    assert!(svg.starts_with("<svg"));
});
