//! Text rendering of a preview grid.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use anyhow::{Context, Result};

use crate::grid::{GRID_SIZE, Grid};
use crate::pad::{CellSize, pad_lines};
use crate::segment::{Segment, SegmentId};

/// Joins cells within a stitched line.
pub const CELL_SEPARATOR: &str = "  ";
/// Left margin of every printed line.
pub const MARGIN: &str = "  ";

/// Draws `lines` inside a single-line box, indented by [`MARGIN`].
///
/// The box is sized to the widest line.
pub fn boxed_header(lines: &[String]) -> String {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let rule = "─".repeat(inner);
    let mut out = String::new();
    let _ = writeln!(out, "{MARGIN}┌{rule}┐");
    for line in lines {
        let pad = inner - 2 - line.chars().count();
        let _ = writeln!(out, "{MARGIN}│  {line}{}│", " ".repeat(pad));
    }
    let _ = writeln!(out, "{MARGIN}└{rule}┘");
    out
}

/// Label for one grid cell, e.g. `[ seg  8 ]`.
pub fn cell_label(id: SegmentId) -> String {
    format!("[ seg {:>2} ]", id.get())
}

/// Pads every segment to `size`.
pub fn pad_all(
    segments: &BTreeMap<SegmentId, Segment>,
    size: CellSize,
) -> BTreeMap<SegmentId, Vec<String>> {
    segments
        .iter()
        .map(|(&id, seg)| (id, pad_lines(&seg.lines, size)))
        .collect()
}

/// Joins line `line_idx` of each cell in a grid row.
fn stitch_line(cells: &[&Vec<String>; GRID_SIZE], line_idx: usize) -> String {
    cells
        .iter()
        .map(|c| c[line_idx].as_str())
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

/// Renders the full preview: header, then per grid row a label line, the
/// stitched cell lines, and a blank line.
///
/// # Errors
/// Returns an error if the grid references a segment missing from `segments`.
pub fn render_preview(
    grid: &Grid,
    segments: &BTreeMap<SegmentId, Segment>,
    size: CellSize,
) -> Result<String> {
    let padded = pad_all(segments, size);
    let lookup = |id: SegmentId| {
        padded
            .get(&id)
            .with_context(|| format!("segment {id} not loaded"))
    };

    let mut out = String::from("\n");
    out.push_str(&boxed_header(&[
        "MAP PREVIEW".to_string(),
        format!("Layout: 3×3 grid  │  Segment {} = center", grid.center()),
    ]));
    out.push('\n');

    for row in grid.rows() {
        let cells = [lookup(row[0])?, lookup(row[1])?, lookup(row[2])?];

        let labels: Vec<String> = row.iter().map(|&id| cell_label(id)).collect();
        let _ = writeln!(out, "{MARGIN}{}", labels.join(CELL_SEPARATOR));

        for line_idx in 0..size.height {
            let _ = writeln!(out, "{MARGIN}{}", stitch_line(&cells, line_idx));
        }
        out.push('\n');
    }

    Ok(out)
}
