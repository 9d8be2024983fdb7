//! Mirroring of segments drawn with heavy box-drawing glyphs.

/// Glyph seen in a left-right mirror. Glyphs without a counterpart map to themselves.
pub fn mirror_horizontal(ch: char) -> char {
    match ch {
        '┏' => '┓',
        '┓' => '┏',
        '┗' => '┛',
        '┛' => '┗',
        '┣' => '┫',
        '┫' => '┣',
        other => other,
    }
}

/// Glyph seen in a top-bottom mirror.
pub fn mirror_vertical(ch: char) -> char {
    match ch {
        '┏' => '┗',
        '┗' => '┏',
        '┓' => '┛',
        '┛' => '┓',
        '┳' => '┻',
        '┻' => '┳',
        other => other,
    }
}

/// Reverses each line and swaps glyphs left for right.
pub fn flip_horizontal(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.chars().rev().map(mirror_horizontal).collect())
        .collect()
}

/// Reverses line order and swaps glyphs top for bottom.
pub fn flip_vertical(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .rev()
        .map(|line| line.chars().map(mirror_vertical).collect())
        .collect()
}

pub fn flip_both(lines: &[String]) -> Vec<String> {
    flip_vertical(&flip_horizontal(lines))
}
