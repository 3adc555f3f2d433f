//! Palette-indexed pixel-grid sprites.
//!
//! Grids are `&'static str` rows where each byte is a cell code and `' '` is
//! transparent. Grids are built in `const` context, so a ragged table fails
//! the build instead of drawing garbage.

pub mod tables;

/// Cell code to colour mapping.
pub type Palette = &'static [(u8, u32)];

/// A rectangular grid of single-byte cell codes.
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    rows: &'static [&'static str],
    width: usize,
}

impl Sprite {
    /// Build a sprite, asserting every row has the same width.
    pub const fn new(rows: &'static [&'static str]) -> Self {
        assert!(!rows.is_empty(), "sprite needs at least one row");
        let width = rows[0].len();
        assert!(width > 0, "sprite rows must not be empty");
        let mut i = 1;
        while i < rows.len() {
            assert!(rows[i].len() == width, "sprite rows must all be the same width");
            i += 1;
        }
        Self { rows, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &'static [u8]> + '_ {
        self.rows.iter().map(|r| r.as_bytes())
    }
}

/// Look up the colour for a cell code. Transparent and unmapped codes yield `None`.
pub fn lookup(palette: Palette, code: u8) -> Option<u32> {
    if code == b' ' {
        return None;
    }
    palette.iter().find(|(c, _)| *c == code).map(|&(_, color)| color)
}
