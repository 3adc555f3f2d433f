use super::{Palette, Sprite};
use crate::palette as pal;

pub const BALL: Sprite = Sprite::new(&["RYG", "BRR", "YGB"]);
pub const BALL_PALETTE: Palette = &[
    (b'R', pal::BALL_RED),
    (b'G', pal::BALL_GREEN),
    (b'B', pal::BALL_BLUE),
    (b'Y', pal::BALL_YELLOW),
];

pub const BONE: Sprite = Sprite::new(&[" OO OO ", "OXXXXXO", " OO OO "]);
pub const BONE_PALETTE: Palette = &[(b'O', pal::BONE_SHADOW), (b'X', pal::BONE_MAIN)];

pub const CARROT: Sprite = Sprite::new(&["  G  ", " OOO ", " OOO ", "  O  ", "  O  "]);
pub const CARROT_PALETTE: Palette = &[(b'O', pal::CARROT_BODY), (b'G', pal::CARROT_GREEN)];

pub const BELL: Sprite = Sprite::new(&["  X  ", " OOO ", "OOOOO", "O O O"]);
pub const BELL_PALETTE: Palette = &[(b'O', pal::BELL_MAIN), (b'X', pal::BELL_DARK)];

pub const BEE: Sprite = Sprite::new(&[" W W ", " BYB ", " YBY ", "  B  "]);
pub const BEE_PALETTE: Palette = &[
    (b'Y', pal::BEE_YELLOW),
    (b'B', pal::BEE_BLACK),
    (b'W', pal::BEE_WING),
];

pub const HEART: Sprite = Sprite::new(&[" O O ", "OOOOO", "OOOOO", " OOO ", "  O  "]);
pub const HEART_PALETTE: Palette = &[(b'O', pal::HEART)];

/// Red cylinder on a wider grey base.
pub const BUTTON: Sprite = Sprite::new(&[
    "      RRRR      ",
    "    RRRRRRRR    ",
    "   RRRWWRRWWR   ",
    "   RRRWWWWWWR   ",
    "   RRRRWWWRRR   ",
    "   dddddddddd   ",
    "   dddddddddd   ",
    "  gggggggggggg  ",
    " bbbbbbbbbbbbbb ",
    " bbbbbbbbbbbbbb ",
    "  bbbbbbbbbbbb  ",
]);

/// Cap shifted down one cell, one row of side depth.
pub const BUTTON_PRESSED: Sprite = Sprite::new(&[
    "                ",
    "      RRRR      ",
    "    RRRRRRRR    ",
    "   RRRWWRRWWR   ",
    "   RRRWWWWWWR   ",
    "   RRRRWWWRRR   ",
    "   dddddddddd   ",
    "  gggggggggggg  ",
    " bbbbbbbbbbbbbb ",
    " bbbbbbbbbbbbbb ",
    "  bbbbbbbbbbbb  ",
]);

pub const BUTTON_PALETTE: Palette = &[
    (b'R', pal::BUTTON_RED_TOP),
    (b'd', pal::BUTTON_RED_SIDE),
    (b'g', pal::BUTTON_GREY_TOP),
    (b'b', pal::BUTTON_GREY_SIDE),
    (b'W', pal::BUTTON_PAW),
];

pub const WOOF: Sprite = Sprite::new(&[
    "X   X XXX XXX XXX X",
    "X   X X X X X X   X",
    "X X X X X X X XX  X",
    "XX XX X X X X X    ",
    "X   X XXX XXX X   X",
]);
pub const WOOF_PALETTE: Palette = &[(b'X', pal::BLACK_INK)];
