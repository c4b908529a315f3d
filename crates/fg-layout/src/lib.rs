#![forbid(unsafe_code)]

//! Fretboard layout engine: maps a parsed [`Diagram`] onto renderable 2-D
//! coordinates for a fixed-size stringed-instrument diagram.
//!
//! The layout is a pure function of its inputs and never fails on a
//! structurally valid diagram. A fretted position beyond the configured
//! window keeps its computed coordinate (possibly past the right edge of
//! the grid); the boundary is reported through [`LayoutStats`] rather than
//! by clipping or rejecting the position.

use fg_core::{Diagram, Fret, StringTable};
use serde::Serialize;
use tracing::{debug, trace};

/// Default number of frets in the display window.
pub const DEFAULT_FRETS: u32 = 12;

/// Conventional inlay frets labeled beneath the grid.
const NUMBERED_FRETS: &[u32] = &[3, 5, 7, 9, 12, 15, 17, 19, 21, 24];

const DOT_RADIUS: f32 = 10.0;
const RING_RADIUS: f32 = 8.0;
const CROSS_RADIUS: f32 = 8.0;

/// A point in diagram space, origin at the top-left of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct LayoutPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct LayoutRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutRect {
    #[must_use]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    #[must_use]
    pub fn contains(self, point: LayoutPoint) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Grid-line role; the rendering surface picks stroke treatment from this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LineKind {
    /// The fret-0 boundary, drawn thicker than ordinary fret wires.
    Nut,
    /// An ordinary fret separator.
    Fret,
    /// A string line.
    String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridLine {
    pub from: LayoutPoint,
    pub to: LayoutPoint,
    pub kind: LineKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LabelKind {
    /// A string's mnemonic, left of the nut.
    StringName,
    /// An inlay fret number beneath the grid.
    FretNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub text: String,
    pub at: LayoutPoint,
    pub kind: LabelKind,
}

/// Marker primitive for one parsed position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum MarkerKind {
    /// Filled dot for a fretted note; `root` selects the accent styling.
    Dot { root: bool },
    /// Unfilled ring for an open string.
    Ring,
    /// Glyph (drawn as an ×) for a muted string.
    Cross,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    pub at: LayoutPoint,
    pub radius: f32,
    pub kind: MarkerKind,
}

/// Spacing constants for the grid. Defaults match the reference rendering.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FretboardSpacing {
    /// Vertical distance between adjacent string lines.
    pub string_spacing: f32,
    /// Horizontal distance between adjacent fret wires.
    pub fret_spacing: f32,
    /// Left/right canvas margin; the nut sits at `h_margin`.
    pub h_margin: f32,
    /// Top/bottom canvas margin.
    pub v_margin: f32,
    /// X position of the string-label gutter.
    pub label_gutter: f32,
    /// Distance of the fret-number row above the bottom edge.
    pub number_row: f32,
}

impl Default for FretboardSpacing {
    fn default() -> Self {
        Self {
            string_spacing: 25.0,
            fret_spacing: 30.0,
            h_margin: 50.0,
            v_margin: 40.0,
            label_gutter: 25.0,
            number_row: 15.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FretboardConfig {
    /// Number of frets shown in the window; values below 1 are clamped.
    pub frets: u32,
    pub spacing: FretboardSpacing,
}

impl Default for FretboardConfig {
    fn default() -> Self {
        Self {
            frets: DEFAULT_FRETS,
            spacing: FretboardSpacing::default(),
        }
    }
}

impl FretboardConfig {
    #[must_use]
    pub fn with_frets(frets: u32) -> Self {
        Self {
            frets,
            ..Self::default()
        }
    }
}

/// Marker counts gathered while laying out one diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct LayoutStats {
    pub fretted: usize,
    pub open: usize,
    pub muted: usize,
    pub roots: usize,
    /// Fretted positions whose fret number exceeds the window. Their
    /// geometry is still computed and may land past the grid edge.
    pub beyond_window: usize,
}

/// Complete geometry description for one fretboard diagram, sufficient to
/// paint without further decision-making by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FretboardLayout {
    pub bounds: LayoutRect,
    pub lines: Vec<GridLine>,
    pub labels: Vec<TextLabel>,
    pub markers: Vec<Marker>,
    pub stats: LayoutStats,
}

/// Compute the full geometry description for one diagram.
#[must_use]
pub fn layout_fretboard(
    diagram: &Diagram,
    table: &StringTable,
    config: &FretboardConfig,
) -> FretboardLayout {
    let frets = config.frets.max(1);
    let s = config.spacing;
    let string_count = table.len();

    let width = s.fret_spacing * (frets as f32 + 1.0) + 2.0 * s.h_margin;
    let height = s.string_spacing * string_count as f32 + 2.0 * s.v_margin;
    let grid_top = s.v_margin;
    let grid_bottom = height - s.v_margin;
    let grid_left = s.h_margin;
    let grid_right = width - s.h_margin;

    let mut lines = Vec::with_capacity(frets as usize + 1 + string_count);
    for i in 0..=frets {
        let x = s.h_margin + i as f32 * s.fret_spacing;
        lines.push(GridLine {
            from: LayoutPoint { x, y: grid_top },
            to: LayoutPoint { x, y: grid_bottom },
            kind: if i == 0 { LineKind::Nut } else { LineKind::Fret },
        });
    }

    let mut labels = Vec::with_capacity(string_count + NUMBERED_FRETS.len());
    for entry in table.entries() {
        let Some(row) = table.row(entry.id) else {
            continue;
        };
        let y = string_y(row, s);
        lines.push(GridLine {
            from: LayoutPoint { x: grid_left, y },
            to: LayoutPoint { x: grid_right, y },
            kind: LineKind::String,
        });
        labels.push(TextLabel {
            text: entry.mnemonic.to_string(),
            at: LayoutPoint {
                x: s.label_gutter,
                y,
            },
            kind: LabelKind::StringName,
        });
    }

    for &n in NUMBERED_FRETS {
        if n > frets {
            continue;
        }
        labels.push(TextLabel {
            text: n.to_string(),
            at: LayoutPoint {
                x: fret_slot_x(n, s),
                y: height - s.number_row,
            },
            kind: LabelKind::FretNumber,
        });
    }

    let mut markers = Vec::with_capacity(diagram.len());
    let mut stats = LayoutStats::default();
    for position in diagram.positions() {
        let Some(row) = table.row(position.string) else {
            trace!(
                "Position names string {} outside the table; skipped",
                position.string
            );
            continue;
        };
        let y = string_y(row, s);
        let (fret_column, radius, kind) = match position.fret {
            Fret::Muted => {
                stats.muted += 1;
                (0, CROSS_RADIUS, MarkerKind::Cross)
            }
            Fret::Open => {
                stats.open += 1;
                (0, RING_RADIUS, MarkerKind::Ring)
            }
            Fret::Fretted(n) => {
                stats.fretted += 1;
                if position.is_root {
                    stats.roots += 1;
                }
                if n > frets {
                    stats.beyond_window += 1;
                }
                (
                    n,
                    DOT_RADIUS,
                    MarkerKind::Dot {
                        root: position.is_root,
                    },
                )
            }
        };
        markers.push(Marker {
            at: LayoutPoint {
                x: fret_slot_x(fret_column, s),
                y,
            },
            radius,
            kind,
        });
    }

    debug!(
        "Layout: bounds={width}x{height}, markers={}, beyond_window={}",
        markers.len(),
        stats.beyond_window
    );

    FretboardLayout {
        bounds: LayoutRect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        },
        lines,
        labels,
        markers,
        stats,
    }
}

/// Midpoint x of a fret slot: fret `n` sits between wires `n - 1` and `n`.
/// Fret 0 is the column left of the nut, shared by open and muted markers.
fn fret_slot_x(fret: u32, s: FretboardSpacing) -> f32 {
    s.h_margin + (fret as f32 - 0.5) * s.fret_spacing
}

fn string_y(row: usize, s: FretboardSpacing) -> f32 {
    s.v_margin + (row as f32 + 1.0) * s.string_spacing
}
