//! Normalizes segment text to a fixed cell size.

/// Cell dimensions in characters (width) and lines (height).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    pub width: usize,
    pub height: usize,
}

impl Default for CellSize {
    fn default() -> Self {
        Self {
            width: 9,
            height: 10,
        }
    }
}

/// Pads or truncates a single line to exactly `width` characters.
///
/// Width counts Unicode scalar values, so box-drawing glyphs count as one.
pub fn fit_line(line: &str, width: usize) -> String {
    let mut out: String = line.chars().take(width).collect();
    let len = out.chars().count();
    out.extend(std::iter::repeat_n(' ', width - len));
    out
}

/// Returns exactly `size.height` lines, each exactly `size.width` characters.
///
/// Extra lines are dropped, missing lines are filled with spaces.
pub fn pad_lines<S: AsRef<str>>(lines: &[S], size: CellSize) -> Vec<String> {
    let mut padded: Vec<String> = lines
        .iter()
        .take(size.height)
        .map(|l| fit_line(l.as_ref(), size.width))
        .collect();
    padded.resize_with(size.height, || " ".repeat(size.width));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_shape(lines: &[String], size: CellSize) {
        assert_eq!(lines.len(), size.height);
        for l in lines {
            assert_eq!(l.chars().count(), size.width, "line {l:?}");
        }
    }

    #[test]
    fn test_pad_empty_input() {
        let size = CellSize::default();
        let out = pad_lines::<&str>(&[], size);
        assert_shape(&out, size);
        assert!(out.iter().all(|l| l == "         "));
    }

    #[test]
    fn test_pad_short_lines() {
        let size = CellSize {
            width: 4,
            height: 2,
        };
        let out = pad_lines(&["ab"], size);
        assert_eq!(out, vec!["ab  ", "    "]);
    }

    #[test]
    fn test_truncate_long_line() {
        let size = CellSize::default();
        let out = pad_lines(&["abcdefghijkl"], size);
        assert_eq!(out[0], "abcdefghi");
        assert_shape(&out, size);
    }

    #[test]
    fn test_drop_extra_lines() {
        let size = CellSize {
            width: 1,
            height: 2,
        };
        let out = pad_lines(&["a", "b", "c"], size);
        assert_eq!(out, vec!["a", "b"]);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let size = CellSize {
            width: 3,
            height: 1,
        };
        let out = pad_lines(&["┏━━━━┓"], size);
        assert_eq!(out, vec!["┏━━"]);

        let out = pad_lines(&["┃"], size);
        assert_eq!(out, vec!["┃  "]);
    }

    #[test]
    fn test_zero_size() {
        let size = CellSize {
            width: 0,
            height: 0,
        };
        assert!(pad_lines(&["abc"], size).is_empty());
    }
}
