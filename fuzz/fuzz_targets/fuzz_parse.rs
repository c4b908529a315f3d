#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(notation) = std::str::from_utf8(data) {
        let first = fg_parser::parse(notation);
        let second = fg_parser::parse(notation);
        assert_eq!(first.diagram, second.diagram);
        assert!(first.diagram.len() <= 6);
    }
});
