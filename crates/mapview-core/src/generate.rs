//! Symmetric map generation.
//!
//! Five segments (A, B, C, D and the center) are composed into a mirrored
//! 3x3 layout:
//!
//! ```text
//! [ A        ]  [ D        ]  [ flipH(A)  ]
//! [ B        ]  [ center   ]  [ flipH(B)  ]
//! [ flipV(C) ]  [ flipV(D) ]  [ flipHV(C) ]
//! ```
//!
//! Shared walls are merged by stripping borders according to grid position,
//! then tunnels are cut through the outer left and right walls.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::grid::others;
use crate::mirror::{flip_both, flip_horizontal, flip_vertical};
use crate::pad::{CellSize, pad_lines};
use crate::render::{MARGIN, boxed_header};
use crate::segment::{ParseMode, Segment, SegmentId, load_segment_with};

/// File name used when no output path is given.
pub const DEFAULT_OUTPUT_NAME: &str = "generated-map.txt";

/// Segments chosen for one generated map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Picks {
    pub a: SegmentId,
    pub b: SegmentId,
    pub c: SegmentId,
    pub d: SegmentId,
    pub center: SegmentId,
}

impl Picks {
    /// Chooses four distinct non-center segments at random.
    pub fn choose<R: Rng + ?Sized>(center: SegmentId, rng: &mut R) -> Self {
        let mut pool = others(center);
        pool.shuffle(rng);
        Self {
            a: pool[0],
            b: pool[1],
            c: pool[2],
            d: pool[3],
            center,
        }
    }

    pub fn ids(&self) -> [SegmentId; 5] {
        [self.a, self.b, self.c, self.d, self.center]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedMap {
    pub picks: Picks,
    pub lines: Vec<String>,
}

/// Drops the walls a tile shares with its neighbours.
///
/// Row 0 keeps only its top wall, row 2 only its bottom wall, row 1 neither.
/// Columns work the same way for left and right.
pub fn strip_borders(lines: &[String], row: usize, col: usize) -> Vec<String> {
    let keep_top = row == 0;
    let keep_bottom = row == 2;
    let keep_left = col == 0;
    let keep_right = col == 2;

    let mut rows: &[String] = lines;
    if !keep_bottom {
        rows = rows.split_last().map_or(rows, |(_, rest)| rest);
    }
    if !keep_top {
        rows = rows.split_first().map_or(rows, |(_, rest)| rest);
    }

    rows.iter()
        .map(|line| {
            let mut chars: Vec<char> = line.chars().collect();
            if !keep_right {
                chars.pop();
            }
            if !keep_left && !chars.is_empty() {
                chars.remove(0);
            }
            chars.into_iter().collect()
        })
        .collect()
}

/// Tile size that fits every segment without truncation.
fn tile_size<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> CellSize {
    segments
        .into_iter()
        .fold(CellSize { width: 0, height: 0 }, |acc, seg| CellSize {
            width: seg
                .lines
                .iter()
                .map(|l| l.chars().count())
                .max()
                .unwrap_or(0)
                .max(acc.width),
            height: seg.lines.len().max(acc.height),
        })
}

/// Replaces the first and last character of three rows with spaces.
fn cut_tunnels(lines: &mut [String]) {
    let Some(last) = lines.len().checked_sub(1) else {
        return;
    };
    let gap = last / 4;
    for row in [gap, last / 2, last - gap] {
        let mut chars: Vec<char> = lines[row].chars().collect();
        if let Some(first) = chars.first_mut() {
            *first = ' ';
        }
        if let Some(end) = chars.last_mut() {
            *end = ' ';
        }
        lines[row] = chars.into_iter().collect();
    }
}

/// Builds the merged map text from already loaded segments.
///
/// # Errors
/// Returns an error if a picked segment is missing or the merged map is too
/// narrow to hold walls.
pub fn compose(picks: Picks, segments: &BTreeMap<SegmentId, Segment>) -> Result<Vec<String>> {
    let fetch = |id: SegmentId| {
        segments
            .get(&id)
            .with_context(|| format!("segment {id} not loaded"))
    };
    let raw = picks.ids().map(fetch);
    let [a, b, c, d, center] = raw;
    let (a, b, c, d, center) = (a?, b?, c?, d?, center?);

    let size = tile_size([a, b, c, d, center]);
    let [a, b, c, d, center] = [a, b, c, d, center].map(|seg| pad_lines(&seg.lines, size));

    let layout = [
        [a.clone(), d.clone(), flip_horizontal(&a)],
        [b.clone(), center, flip_horizontal(&b)],
        [flip_vertical(&c), flip_vertical(&d), flip_both(&c)],
    ];

    let mut lines = Vec::new();
    for (r, row) in layout.iter().enumerate() {
        let stripped: Vec<Vec<String>> = row
            .iter()
            .enumerate()
            .map(|(col, tile)| strip_borders(tile, r, col))
            .collect();
        let row_height = stripped[0].len();
        for line_idx in 0..row_height {
            lines.push(
                stripped
                    .iter()
                    .map(|tile| tile[line_idx].as_str())
                    .collect::<String>(),
            );
        }
    }

    let width = lines.first().map_or(0, |l| l.chars().count());
    if width < 2 {
        bail!("merged map is {width} characters wide; segments are too small");
    }

    let filler = format!("┃{}┃", ".".repeat(width - 2));
    let insert_at = lines.len() - 1;
    lines.insert(insert_at, filler);

    cut_tunnels(&mut lines);
    Ok(lines)
}

/// Picks segments, loads them in map mode, and composes the map.
///
/// # Errors
/// Returns an error if a picked segment cannot be loaded or the map cannot be composed.
pub fn generate<R: Rng + ?Sized>(
    dir: &Path,
    center: SegmentId,
    rng: &mut R,
) -> Result<GeneratedMap> {
    let picks = Picks::choose(center, rng);
    tracing::debug!(?picks, "picked segments");

    let mut segments = BTreeMap::new();
    for id in picks.ids() {
        let seg = load_segment_with(dir, id, ParseMode::Map)?;
        segments.insert(id, seg);
    }

    let lines = compose(picks, &segments)?;
    Ok(GeneratedMap { picks, lines })
}

/// Text report printed after generation: header, picks, layout and the map.
pub fn render_report(map: &GeneratedMap) -> String {
    let Picks {
        a,
        b,
        c,
        d,
        center,
    } = map.picks;

    let mut out = String::from("\n");
    out.push_str(&boxed_header(&[
        "GENERATED SYMMETRIC MAP".to_string(),
        "5 unique segments · borders merged".to_string(),
    ]));
    out.push('\n');
    let _ = writeln!(
        out,
        "{MARGIN}Segments: A={a}  B={b}  C={c}  D={d}  center={center}"
    );
    out.push('\n');
    let _ = writeln!(out, "{MARGIN}Layout:");
    let _ = writeln!(out, "{MARGIN}  [ seg-{a} ]  [ seg-{d} ]  [ seg-{a}H ]");
    let _ = writeln!(out, "{MARGIN}  [ seg-{b} ]  [ seg-{center} ]  [ seg-{b}H ]");
    let _ = writeln!(out, "{MARGIN}  [ seg-{c}V]  [ seg-{d}V]  [ seg-{c}HV]");
    out.push('\n');
    for line in &map.lines {
        let _ = writeln!(out, "{MARGIN}{line}");
    }
    out.push('\n');
    out
}

/// Writes the map to `path`, one line per row with a trailing newline.
///
/// Writes through a temp file and rename so a failed write leaves no partial map.
///
/// # Errors
/// Returns an error if the parent directory cannot be created or the file cannot be written.
pub fn save(map: &GeneratedMap, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut content = map.lines.join("\n");
    content.push('\n');

    let tmp_path = path.with_extension("txt.tmp");
    fs::write(&tmp_path, content)
        .with_context(|| format!("Failed to write map to {}", tmp_path.display()))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                tmp_path.display(),
                path.display()
            )
        });
    }

    tracing::info!(path = %path.display(), rows = map.lines.len(), "saved generated map");
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tempfile::tempdir;

    use super::*;

    fn id(n: u8) -> SegmentId {
        SegmentId::new(n).unwrap()
    }

    fn lines(src: &[&str]) -> Vec<String> {
        src.iter().map(|s| (*s).to_string()).collect()
    }

    /// 5x4 walled room, identical for every id.
    const ROOM: &str = "┏━━━┓\n┃...┃\n┃...┃\n┗━━━┛\n";

    fn rooms() -> BTreeMap<SegmentId, Segment> {
        SegmentId::all()
            .map(|sid| (sid, Segment::from_map_text(sid, ROOM)))
            .collect()
    }

    #[test]
    fn test_picks_are_distinct_and_exclude_center() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..100 {
            let picks = Picks::choose(id(8), &mut rng);
            let mut ids = picks.ids().to_vec();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 5);
            assert_eq!(picks.center, id(8));
            assert!(![picks.a, picks.b, picks.c, picks.d].contains(&id(8)));
        }
    }

    #[test]
    fn test_strip_borders_by_position() {
        let tile = lines(&["abc", "def", "ghi"]);
        assert_eq!(strip_borders(&tile, 0, 0), lines(&["ab", "de"]));
        assert_eq!(strip_borders(&tile, 1, 1), lines(&["e"]));
        assert_eq!(strip_borders(&tile, 2, 2), lines(&["ef", "hi"]));
        assert_eq!(strip_borders(&tile, 0, 2), lines(&["bc", "ef"]));
    }

    #[test]
    fn test_strip_borders_empty_tile() {
        assert!(strip_borders(&[], 1, 1).is_empty());
        assert_eq!(strip_borders(&lines(&["", "", ""]), 1, 1), lines(&[""]));
    }

    #[test]
    fn test_cut_tunnels_rows() {
        let mut map = vec!["┃..┃".to_string(); 9];
        cut_tunnels(&mut map);
        // last = 8, gap = 2 -> rows 2, 4, 6
        for (i, line) in map.iter().enumerate() {
            if [2, 4, 6].contains(&i) {
                assert_eq!(line, " .. ");
            } else {
                assert_eq!(line, "┃..┃");
            }
        }
    }

    #[test]
    fn test_compose_dimensions_and_walls() {
        let segments = rooms();
        let picks = Picks::choose(id(8), &mut StdRng::seed_from_u64(1));

        let map = compose(picks, &segments).unwrap();

        // Widths: 4 + 3 + 4 = 11. Heights: 3 + 2 + 3 = 8, plus one filler row.
        assert_eq!(map.len(), 9);
        assert!(map.iter().all(|l| l.chars().count() == 11));
        assert_eq!(map[0], "┏━━━━━━━━━┓");
        assert_eq!(map[8], "┗━━━━━━━━━┛");
        assert_eq!(map[7], "┃.........┃");
        // Tunnels at rows 2, 4, 6.
        for row in [2, 4, 6] {
            assert!(map[row].starts_with(' ') && map[row].ends_with(' '));
        }
        assert!(map[1].starts_with('┃'));
    }

    #[test]
    fn test_compose_pads_uneven_segments() {
        let mut segments = rooms();
        segments.insert(id(8), Segment::from_map_text(id(8), "┏━━━━━┓\n"));
        let picks = Picks {
            a: id(1),
            b: id(2),
            c: id(3),
            d: id(4),
            center: id(8),
        };

        let map = compose(picks, &segments).unwrap();

        // Tile width 7 -> 6 + 5 + 6.
        assert!(map.iter().all(|l| l.chars().count() == 17));
    }

    #[test]
    fn test_compose_rejects_tiny_segments() {
        let segments: BTreeMap<SegmentId, Segment> = SegmentId::all()
            .map(|sid| (sid, Segment::from_map_text(sid, "x\n")))
            .collect();
        let picks = Picks::choose(id(8), &mut StdRng::seed_from_u64(2));

        assert!(compose(picks, &segments).is_err());
    }

    #[test]
    fn test_generate_and_save() {
        let dir = tempdir().unwrap();
        for sid in SegmentId::all() {
            fs::write(dir.path().join(sid.file_name()), format!("; tile {sid}\n{ROOM}")).unwrap();
        }

        let map = generate(dir.path(), id(8), &mut StdRng::seed_from_u64(3)).unwrap();
        let report = render_report(&map);
        assert!(report.contains("GENERATED SYMMETRIC MAP"));
        assert!(report.contains("center=8"));

        let out = dir.path().join("out").join(DEFAULT_OUTPUT_NAME);
        save(&map, &out).unwrap();
        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written, format!("{}\n", map.lines.join("\n")));
    }

    #[test]
    fn test_save_failure_removes_temp_file() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("taken");
        fs::create_dir(&out).unwrap();
        fs::write(out.join("keep.txt"), "x").unwrap();
        let map = GeneratedMap {
            picks: Picks::choose(id(8), &mut StdRng::seed_from_u64(6)),
            lines: lines(&["┃..┃"]),
        };

        assert!(save(&map, &out).is_err());
        assert!(!out.with_extension("txt.tmp").exists());
        assert!(out.is_dir());
    }

    #[test]
    fn test_generate_missing_segment() {
        let dir = tempdir().unwrap();
        let err = generate(dir.path(), id(8), &mut StdRng::seed_from_u64(4)).unwrap_err();
        assert!(err.downcast_ref::<crate::segment::SegmentLoadError>().is_some());
    }
}
