//! Colours used across the yard, packed as `0xRRGGBBAA` like the GPU instance data.

/// Pack 8-bit channels into `0xRRGGBBAA`.
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    (r as u32) << 24 | (g as u32) << 16 | (b as u32) << 8 | a as u32
}

/// Opaque colour from a `0xRRGGBB` literal.
pub const fn hex(rgb: u32) -> u32 {
    rgb << 8 | 0xFF
}

/// Scale the alpha channel by `alpha` in `[0, 1]`.
pub fn fade(color: u32, alpha: f32) -> u32 {
    let a = (color & 0xFF) as f32 * alpha.clamp(0.0, 1.0);
    (color & 0xFFFF_FF00) | a.round() as u32
}

/// Split into `[r, g, b, a]` bytes.
pub const fn channels(color: u32) -> [u8; 4] {
    [
        (color >> 24) as u8,
        (color >> 16) as u8,
        (color >> 8) as u8,
        color as u8,
    ]
}

// Dog
pub const DOG_WHITE: u32 = hex(0xFFFFFF);
pub const DOG_HIGHLIGHT: u32 = hex(0xF0F0F0);
pub const EAR_INNER_1: u32 = hex(0xEEEEEE);
pub const EAR_INNER_2: u32 = hex(0xF0F0F0);
pub const EAR_INNER_3: u32 = hex(0xF5F5F5);
pub const SHADOW_DEEP: u32 = hex(0xEEEEEE);
pub const SHADOW_MID: u32 = hex(0xF5F5F5);
pub const SHADOW_LIGHT: u32 = hex(0xF8F8F8);
pub const NOSE_CORE: u32 = hex(0x000000);
pub const NOSE_EDGE: u32 = hex(0x333333);
pub const NAIL: u32 = hex(0x000000);
pub const BLACK_INK: u32 = hex(0x222222);
pub const BLACK_FADE: u32 = rgba(34, 34, 34, 77);
pub const DOG_GROUND_SHADOW: u32 = rgba(100, 130, 80, 77);

// Sky / terrain
pub const SKY_TOP: u32 = hex(0xC8E6FF);
pub const SKY_BOTTOM: u32 = hex(0xEAF6FF);
pub const SKY_SPECKLE: u32 = rgba(255, 255, 255, 13);
pub const GRASS_BASE: u32 = hex(0x9CCC65);
pub const GRASS_TUFT: u32 = hex(0x8BC34A);
pub const HILL_DARK: u32 = hex(0x82B366);
pub const HILL_MID: u32 = hex(0x9CCC65);
pub const HILL_TOP: u32 = hex(0xC5E1A5);

// Toys
pub const TOY_SHADOW: u32 = rgba(0, 0, 0, 38);
pub const BALL_RED: u32 = hex(0xFF4444);
pub const BALL_BLUE: u32 = hex(0x4444FF);
pub const BALL_YELLOW: u32 = hex(0xFFFF44);
pub const BALL_GREEN: u32 = hex(0x44FF44);
pub const BALL_CELL_EDGE: u32 = rgba(0, 0, 0, 26);
pub const BALL_OUTLINE: u32 = rgba(0, 0, 0, 77);
pub const FRISBEE_MAIN: u32 = hex(0xE91E63);
pub const FRISBEE_DARK: u32 = hex(0x880E4F);
pub const FRISBEE_LIGHT: u32 = hex(0xF48FB1);
pub const BONE_MAIN: u32 = hex(0xF5F5F5);
pub const BONE_SHADOW: u32 = hex(0xE0E0E0);
pub const CARROT_BODY: u32 = hex(0xFF9800);
pub const CARROT_GREEN: u32 = hex(0x4CAF50);
pub const BELL_MAIN: u32 = hex(0xFFD700);
pub const BELL_DARK: u32 = hex(0xFF6F00);
pub const BEE_YELLOW: u32 = hex(0xFFEB3B);
pub const BEE_BLACK: u32 = hex(0x212121);
pub const BEE_WING: u32 = hex(0xE3F2FD);
pub const BUTTON_RED_TOP: u32 = hex(0xC0392B);
pub const BUTTON_RED_SIDE: u32 = hex(0x922B21);
pub const BUTTON_GREY_TOP: u32 = hex(0xBDC3C7);
pub const BUTTON_GREY_SIDE: u32 = hex(0x7F8C8D);
pub const BUTTON_PAW: u32 = hex(0xFFFFFF);

// Effects
pub const HEART: u32 = hex(0xFF69B4);
pub const FIREWORK_COLORS: [u32; 6] = [
    hex(0xFF5252),
    hex(0xFFEB3B),
    hex(0x69F0AE),
    hex(0x40C4FF),
    hex(0xE040FB),
    hex(0xFFFFFF),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_opaque() {
        assert_eq!(hex(0x123456), 0x123456FF);
        assert_eq!(channels(hex(0x123456)), [0x12, 0x34, 0x56, 0xFF]);
    }

    #[test]
    fn fade_scales_alpha_only() {
        assert_eq!(fade(0xAABBCCFF, 0.0), 0xAABBCC00);
        assert_eq!(fade(0xAABBCCFF, 1.0), 0xAABBCCFF);
        assert_eq!(fade(0xAABBCCFF, 2.0), 0xAABBCCFF);
        assert_eq!(channels(fade(0xAABBCCFF, 0.5))[3], 128);
    }
}
