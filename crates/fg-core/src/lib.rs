#![forbid(unsafe_code)]

//! Core types shared across the FretGrid workspace: the string-mnemonic
//! table, fret positions, parsed diagrams, and the chord-catalog boundary
//! types.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of one instrument string, counted from the lowest-pitched string.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord, Default,
)]
pub struct StringId(pub u8);

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Which end of the pitch range sits on the top row of a rendered diagram.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Lowest-pitched string on the top row (reference rendering order).
    #[default]
    LowOnTop,
    /// Lowest-pitched string on the bottom row.
    LowOnBottom,
}

/// One mnemonic entry of a [`StringTable`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StringEntry {
    pub mnemonic: char,
    pub id: StringId,
}

/// Closed mapping from single-character mnemonics to string indices, plus
/// the display orientation of the rows.
///
/// Mnemonic identity is case-insensitive except where two entries share a
/// letter and differ only in case (the standard guitar `E`/`e` pair); those
/// resolve by exact match. Case also carries the root flag during parsing,
/// so `A3` and `a3` name the same string but only the former marks a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    entries: Vec<StringEntry>,
    orientation: Orientation,
    exact: FxHashMap<char, StringId>,
}

impl StringTable {
    /// Build a table from mnemonics ordered low pitch to high pitch.
    #[must_use]
    pub fn new(mnemonics: &[char], orientation: Orientation) -> Self {
        let entries: Vec<StringEntry> = mnemonics
            .iter()
            .enumerate()
            .map(|(index, &mnemonic)| StringEntry {
                mnemonic,
                id: StringId(index as u8),
            })
            .collect();
        let mut exact = FxHashMap::default();
        for entry in &entries {
            exact.entry(entry.mnemonic).or_insert(entry.id);
        }
        Self {
            entries,
            orientation,
            exact,
        }
    }

    /// The standard six-string guitar: `E A D G B e`, low `E` first.
    #[must_use]
    pub fn standard_guitar() -> Self {
        Self::new(&['E', 'A', 'D', 'G', 'B', 'e'], Orientation::LowOnTop)
    }

    #[must_use]
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[must_use]
    pub fn entries(&self) -> &[StringEntry] {
        &self.entries
    }

    /// Resolve a mnemonic to its string. Exact case wins; otherwise the
    /// first case-insensitive match in table order is used.
    #[must_use]
    pub fn resolve(&self, mnemonic: char) -> Option<StringId> {
        if let Some(id) = self.exact.get(&mnemonic) {
            return Some(*id);
        }
        self.entries
            .iter()
            .find(|entry| entry.mnemonic.eq_ignore_ascii_case(&mnemonic))
            .map(|entry| entry.id)
    }

    /// Canonical mnemonic for a string.
    #[must_use]
    pub fn mnemonic(&self, id: StringId) -> Option<char> {
        self.entries
            .iter()
            .find(|entry| entry.id == id)
            .map(|entry| entry.mnemonic)
    }

    /// Display row of a string under this table's orientation, top row 0.
    #[must_use]
    pub fn row(&self, id: StringId) -> Option<usize> {
        let index = self.entries.iter().position(|entry| entry.id == id)?;
        Some(match self.orientation {
            Orientation::LowOnTop => index,
            Orientation::LowOnBottom => self.entries.len() - 1 - index,
        })
    }
}

impl Default for StringTable {
    fn default() -> Self {
        Self::standard_guitar()
    }
}

/// Played state of one string.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Fret {
    /// String is not played.
    Muted,
    /// Played unfretted (fret 0).
    Open,
    /// Played at the given fret, always at least 1.
    Fretted(u32),
}

impl Fret {
    #[must_use]
    pub const fn is_sounding(self) -> bool {
        !matches!(self, Self::Muted)
    }

    /// Fret number for sounding strings; muted strings carry none.
    #[must_use]
    pub const fn number(self) -> Option<u32> {
        match self {
            Self::Muted => None,
            Self::Open => Some(0),
            Self::Fretted(n) => Some(n),
        }
    }
}

/// One string's state within a diagram, with the root flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    pub string: StringId,
    pub fret: Fret,
    pub is_root: bool,
}

impl FretPosition {
    /// Build a position. The root flag is kept only where it is
    /// representable: a fretted note above the nut. Open and muted strings
    /// are never roots in this model.
    #[must_use]
    pub fn new(string: StringId, fret: Fret, root: bool) -> Self {
        Self {
            string,
            fret,
            is_root: root && matches!(fret, Fret::Fretted(_)),
        }
    }
}

/// Ordered set of fret positions, at most one per string.
///
/// Positions keep the order of their first appearance; inserting a string
/// again overwrites the earlier value in place (last write wins).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct Diagram {
    positions: Vec<FretPosition>,
}

impl Diagram {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
        }
    }

    /// Insert a position, returning true when an earlier position for the
    /// same string was overwritten.
    pub fn insert(&mut self, position: FretPosition) -> bool {
        if let Some(slot) = self
            .positions
            .iter_mut()
            .find(|p| p.string == position.string)
        {
            *slot = position;
            true
        } else {
            self.positions.push(position);
            false
        }
    }

    #[must_use]
    pub fn position_for(&self, string: StringId) -> Option<&FretPosition> {
        self.positions.iter().find(|p| p.string == string)
    }

    #[must_use]
    pub fn positions(&self) -> &[FretPosition] {
        &self.positions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Warning categories produced by the lenient notation parser.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum ParseWarningCode {
    /// Token mnemonic not present in the string table; token dropped.
    #[default]
    UnknownString,
    /// Fret spec neither `x`/`X` nor decimal digits; coerced to open.
    InvalidFretSpec,
    /// String mentioned more than once; last occurrence kept.
    DuplicateString,
}

impl ParseWarningCode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::UnknownString => "diagram/warn/unknown-string",
            Self::InvalidFretSpec => "diagram/warn/invalid-fret-spec",
            Self::DuplicateString => "diagram/warn/duplicate-string",
        }
    }
}

/// A single recovery the parser performed on malformed notation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ParseWarning {
    pub code: ParseWarningCode,
    pub message: String,
    /// Zero-based index of the offending token in the notation string.
    pub token: usize,
}

impl ParseWarning {
    #[must_use]
    pub fn new(code: ParseWarningCode, message: impl Into<String>, token: usize) -> Self {
        Self {
            code,
            message: message.into(),
            token,
        }
    }
}

/// Error returned by the strict parsing entry point when the lenient parser
/// had to recover. Carries every recovery that was performed.
#[derive(Debug, Clone, Serialize, Deserialize, Error, PartialEq, Eq)]
#[error("notation produced {} warning(s)", .warnings.len())]
pub struct NotationError {
    pub warnings: Vec<ParseWarning>,
}

/// One fingering of a chord. The notation string is the durable source of
/// truth; parsed positions are a derived, disposable view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChordVariation {
    pub name: String,
    /// Diagram notation, e.g. `"e0,b1,g0,d2,a3,Ex"`.
    pub diagram: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty_level: Option<u8>,
}

/// Chord quality as served by the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChordQuality {
    pub name: String,
    pub display_name: String,
}

/// A chord with every catalogued fingering for one root and quality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    pub key: String,
    pub quality: String,
    pub representation: String,
    pub variations: Vec<ChordVariation>,
}

/// Envelope wrapping every catalog endpoint response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Catalog health-check payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: u64,
    pub version: String,
}
