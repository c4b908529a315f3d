#![forbid(unsafe_code)]

//! Parser for chord-diagram position notation.
//!
//! The notation is a comma-separated list of `<mnemonic><fret-spec>` tokens,
//! e.g. `"e0,b1,g0,d2,a3,Ex"`. The mnemonic names a string of the
//! instrument; the fret spec is `x`/`X` for a muted string, `0` for an open
//! string, or a positive decimal fret number. An uppercase mnemonic paired
//! with a fret above the nut marks the chord root.
//!
//! Diagram notation is hand-authored content, so the parser is lenient by
//! design: unrecognized tokens are dropped, malformed fret specs fall back
//! to open, and a re-mentioned string keeps its last occurrence. Every
//! recovery is reported as a [`ParseWarning`]; [`parse_strict`] promotes
//! them to an error for callers that want rejection instead.

use fg_core::{
    Diagram, Fret, FretPosition, NotationError, ParseWarning, ParseWarningCode, StringTable,
};
use serde::Serialize;
use serde_json::json;

/// Outcome of a lenient parse: the diagram that could be recovered plus
/// every warning collected along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    pub diagram: Diagram,
    pub warnings: Vec<ParseWarning>,
}

impl ParseResult {
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Parse notation against the standard six-string guitar table.
#[must_use]
pub fn parse(notation: &str) -> ParseResult {
    parse_with_table(notation, &StringTable::standard_guitar())
}

/// Parse notation against an explicit string table.
///
/// Never fails; see the crate docs for the recovery policy. Tokens are
/// trimmed of surrounding whitespace, and empty tokens (stray separators)
/// are skipped without a warning.
#[must_use]
pub fn parse_with_table(notation: &str, table: &StringTable) -> ParseResult {
    let mut diagram = Diagram::new();
    let mut warnings = Vec::new();

    for (index, raw) in notation.split(',').enumerate() {
        let token = raw.trim();
        let mut chars = token.chars();
        let Some(mnemonic) = chars.next() else {
            continue;
        };
        let fret_spec = chars.as_str();

        let Some(string) = table.resolve(mnemonic) else {
            warnings.push(ParseWarning::new(
                ParseWarningCode::UnknownString,
                format!("unknown string mnemonic `{mnemonic}` in token `{token}`; token dropped"),
                index,
            ));
            continue;
        };

        let fret = match parse_fret_spec(fret_spec) {
            Some(fret) => fret,
            None => {
                warnings.push(ParseWarning::new(
                    ParseWarningCode::InvalidFretSpec,
                    format!(
                        "fret spec `{fret_spec}` in token `{token}` is not a fret number; \
                         treating the string as open"
                    ),
                    index,
                ));
                Fret::Open
            }
        };

        let root = mnemonic.is_ascii_uppercase();
        if diagram.insert(FretPosition::new(string, fret, root)) {
            warnings.push(ParseWarning::new(
                ParseWarningCode::DuplicateString,
                format!("string `{mnemonic}` appears more than once; keeping the last occurrence"),
                index,
            ));
        }
    }

    ParseResult { diagram, warnings }
}

/// Strict entry point: any recovery the lenient parser performed becomes an
/// error carrying the collected warnings.
pub fn parse_strict(notation: &str, table: &StringTable) -> Result<Diagram, NotationError> {
    let result = parse_with_table(notation, table);
    if result.warnings.is_empty() {
        Ok(result.diagram)
    } else {
        Err(NotationError {
            warnings: result.warnings,
        })
    }
}

/// `x`/`X` mutes the string; a run of decimal digits gives the fret, with 0
/// meaning open. Anything else (including a digit run that overflows) is a
/// recoverable error.
fn parse_fret_spec(spec: &str) -> Option<Fret> {
    if spec.eq_ignore_ascii_case("x") {
        return Some(Fret::Muted);
    }
    if spec.is_empty() || !spec.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match spec.parse::<u32>() {
        Ok(0) => Some(Fret::Open),
        Ok(n) => Some(Fret::Fretted(n)),
        Err(_) => None,
    }
}

/// Summarize a parse for tooling and logs as a JSON object.
#[must_use]
pub fn parse_evidence_json(parsed: &ParseResult) -> String {
    let mut fretted = 0_usize;
    let mut open = 0_usize;
    let mut muted = 0_usize;
    let mut roots = 0_usize;
    for position in parsed.diagram.positions() {
        match position.fret {
            Fret::Fretted(_) => fretted += 1,
            Fret::Open => open += 1,
            Fret::Muted => muted += 1,
        }
        if position.is_root {
            roots += 1;
        }
    }

    json!({
        "position_count": parsed.diagram.len(),
        "fretted": fretted,
        "open": open,
        "muted": muted,
        "roots": roots,
        "warning_count": parsed.warnings.len(),
        "warnings": parsed
            .warnings
            .iter()
            .map(|w| json!({ "code": w.code.as_str(), "message": w.message, "token": w.token }))
            .collect::<Vec<_>>(),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fg_core::StringId;
    use proptest::prelude::*;

    fn position(result: &ParseResult, string: u8) -> FretPosition {
        *result
            .diagram
            .position_for(StringId(string))
            .unwrap_or_else(|| panic!("no position for string {string}"))
    }

    #[test]
    fn parses_a_full_six_string_shape() {
        let result = parse("e0,b1,g0,d2,a3,Ex");
        assert!(result.warnings.is_empty());
        assert_eq!(result.diagram.len(), 6);

        assert_eq!(position(&result, 5).fret, Fret::Open);
        assert_eq!(position(&result, 4).fret, Fret::Fretted(1));
        assert!(!position(&result, 4).is_root);
        assert_eq!(position(&result, 3).fret, Fret::Open);
        assert_eq!(position(&result, 2).fret, Fret::Fretted(2));
        assert!(!position(&result, 2).is_root);
        assert_eq!(position(&result, 1).fret, Fret::Fretted(3));
        assert!(!position(&result, 1).is_root);
        assert_eq!(position(&result, 0).fret, Fret::Muted);
    }

    #[test]
    fn uppercase_mnemonic_with_positive_fret_marks_root() {
        let result = parse("E3,A2,D0,G0,B0,e0");
        assert!(result.warnings.is_empty());

        let low = position(&result, 0);
        assert_eq!(low.fret, Fret::Fretted(3));
        assert!(low.is_root);

        // Uppercase alone is not sufficient: fret 0 stays a plain open string.
        assert_eq!(position(&result, 2).fret, Fret::Open);
        assert!(!position(&result, 2).is_root);
        assert!(!position(&result, 4).is_root);

        let result = parse("E0");
        assert!(!position(&result, 0).is_root);
    }

    #[test]
    fn lowercase_mnemonic_never_marks_root() {
        let result = parse("a3");
        let pos = position(&result, 1);
        assert_eq!(pos.fret, Fret::Fretted(3));
        assert!(!pos.is_root);
    }

    #[test]
    fn shared_letter_is_resolved_by_exact_case() {
        let result = parse("e5,E7");
        assert_eq!(position(&result, 5).fret, Fret::Fretted(5));
        assert!(!position(&result, 5).is_root);
        assert_eq!(position(&result, 0).fret, Fret::Fretted(7));
        assert!(position(&result, 0).is_root);
    }

    #[test]
    fn unknown_mnemonic_is_dropped_with_warning() {
        let with_junk = parse("e0,z5,b1");
        let clean = parse("e0,b1");
        assert_eq!(with_junk.diagram, clean.diagram);
        assert_eq!(with_junk.warnings.len(), 1);
        assert_eq!(with_junk.warnings[0].code, ParseWarningCode::UnknownString);
        assert_eq!(with_junk.warnings[0].token, 1);
    }

    #[test]
    fn malformed_fret_spec_falls_back_to_open() {
        let result = parse("eA");
        let pos = position(&result, 5);
        assert_eq!(pos.fret, Fret::Open);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, ParseWarningCode::InvalidFretSpec);
    }

    #[test]
    fn empty_fret_spec_falls_back_to_open() {
        let result = parse("b");
        assert_eq!(position(&result, 4).fret, Fret::Open);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn overflowing_fret_spec_falls_back_to_open() {
        let result = parse("e99999999999999999999");
        assert_eq!(position(&result, 5).fret, Fret::Open);
        assert_eq!(result.warnings[0].code, ParseWarningCode::InvalidFretSpec);
    }

    #[test]
    fn duplicate_string_keeps_last_occurrence() {
        let result = parse("e0,e5");
        assert_eq!(result.diagram.len(), 1);
        assert_eq!(position(&result, 5).fret, Fret::Fretted(5));
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].code, ParseWarningCode::DuplicateString);
    }

    #[test]
    fn stray_separators_are_skipped_silently() {
        let result = parse("e0,,b1,");
        assert_eq!(result.diagram, parse("e0,b1").diagram);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn whitespace_around_tokens_is_trimmed() {
        let result = parse(" e0 , b1 ,\tg0 ");
        assert!(result.warnings.is_empty());
        assert_eq!(result.diagram.len(), 3);
        assert_eq!(position(&result, 3).fret, Fret::Open);
    }

    #[test]
    fn muted_accepts_either_case() {
        let result = parse("ex,EX");
        assert_eq!(position(&result, 5).fret, Fret::Muted);
        assert_eq!(position(&result, 0).fret, Fret::Muted);
        assert!(!position(&result, 0).is_root);
    }

    #[test]
    fn empty_input_yields_empty_diagram() {
        let result = parse("");
        assert!(result.diagram.is_empty());
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn strict_mode_rejects_recovered_notation() {
        let table = StringTable::standard_guitar();
        assert!(parse_strict("e0,b1", &table).is_ok());

        let err = parse_strict("e0,z5", &table).expect_err("strict parse should fail");
        assert_eq!(err.warnings.len(), 1);
        assert_eq!(err.warnings[0].code, ParseWarningCode::UnknownString);
        assert!(err.to_string().contains("1 warning"));
    }

    #[test]
    fn evidence_json_summarizes_counts() {
        let result = parse("E3,a2,d0,gx,z9");
        let evidence = parse_evidence_json(&result);
        assert!(evidence.contains("\"position_count\":4"));
        assert!(evidence.contains("\"fretted\":2"));
        assert!(evidence.contains("\"open\":1"));
        assert!(evidence.contains("\"muted\":1"));
        assert!(evidence.contains("\"roots\":1"));
        assert!(evidence.contains("diagram/warn/unknown-string"));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_parse_is_total(input in ".{0,256}") {
            let result = parse(&input);
            prop_assert!(result.diagram.len() <= 6);
        }

        #[test]
        fn prop_parse_is_idempotent(input in ".{0,256}") {
            let first = parse(&input);
            let second = parse(&input);
            prop_assert_eq!(first.diagram.clone(), second.diagram);
            prop_assert_eq!(first.warnings, second.warnings);
        }

        #[test]
        fn prop_diagram_round_trips_through_json(input in "[eEaAdDgGbBxz0-9, ]{0,64}") {
            let result = parse(&input);
            let encoded = serde_json::to_string(&result.diagram).expect("serialize diagram");
            let decoded: Diagram = serde_json::from_str(&encoded).expect("deserialize diagram");
            prop_assert_eq!(decoded, result.diagram);
        }

        #[test]
        fn prop_at_most_one_position_per_string(input in "[eEaAdDgGbBx0-9,]{0,64}") {
            let result = parse(&input);
            for (i, a) in result.diagram.positions().iter().enumerate() {
                for b in &result.diagram.positions()[i + 1..] {
                    prop_assert_ne!(a.string, b.string);
                }
            }
        }
    }
}
