//! Procedural yard backdrop: sky gradient, rolling hills, grass with tufts.
//!
//! Terrain is a pure function of pixel coordinates so a regenerated backdrop
//! matches the previous one at the same size. Only the faint sky speckle
//! uses the RNG.

use crate::paint::{Canvas, Painter, Surface};
use crate::palette;
use crate::viewport::horizon_y;

/// Column width of the hill silhouette.
const HILL_STEP: usize = 4;
/// Grid spacing of grass tufts.
const TUFT_GRID: usize = 5;
/// Tufts whose noise value is at or below this are skipped.
const TUFT_THRESHOLD: f64 = 0.4;
/// Row spacing of the sky speckle streaks.
const SPECKLE_STEP: usize = 10;

/// Render a backdrop at exactly the logical viewport size.
pub fn generate(width: f32, height: f32, rng: &mut fastrand::Rng) -> Canvas {
    let mut canvas = Canvas::new(width.ceil() as u32, height.ceil() as u32);
    paint(&mut canvas, width, height, rng);
    log::debug!("Backdrop regenerated at {}x{}", canvas.width(), canvas.height());
    canvas
}

fn paint<S: Surface + ?Sized>(surface: &mut S, w: f32, h: f32, rng: &mut fastrand::Rng) {
    let horizon = horizon_y(h);
    let mut p = Painter::new(surface);

    // Sky gradient, one row at a time.
    let rows = horizon.ceil() as usize;
    for y in 0..rows {
        let t = y as f32 / horizon.max(1.0);
        p.fill_rect(0.0, y as f32, w, 1.0, mix(palette::SKY_TOP, palette::SKY_BOTTOM, t));
    }

    for y in (0..rows).step_by(SPECKLE_STEP) {
        if rng.f32() > 0.5 {
            let x = rng.f32() * w;
            let len = rng.f32() * 200.0 + 50.0;
            p.fill_rect(x, y as f32, len, 8.0, palette::SKY_SPECKLE);
        }
    }

    // Hills: two layered sinusoids, quantised to 4px steps.
    let step = HILL_STEP as f32;
    for x in (0..w.ceil() as usize).step_by(HILL_STEP) {
        let xf = x as f32;
        let ridge = (xf * 0.002 + 0.5).sin();
        let n1 = ridge * 50.0;
        let n2 = (xf * 0.005).cos() * 20.0;
        let hill_h = (((n1 + n2).abs() + 30.0) / 4.0).floor() * 4.0;
        let hill_y = horizon - hill_h * 0.6;
        p.fill_rect(xf, hill_y, step, horizon - hill_y + 20.0, palette::HILL_DARK);

        let top_layer = (((xf * 0.01).sin() * 10.0 + 10.0) / 4.0).floor() * 4.0;
        if top_layer > 0.0 {
            p.fill_rect(xf, hill_y, step, top_layer, palette::HILL_MID);
        }
        if ridge > 0.5 {
            p.fill_rect(xf, hill_y, step, 4.0, palette::fade(palette::HILL_TOP, 0.8));
        }
    }

    p.fill_rect(0.0, horizon, w, h - horizon, palette::GRASS_BASE);

    // Grass tufts, seeded by coordinates.
    let mut y = horizon.floor() as i64;
    while (y as f32) < h {
        let row_offset = ((y as usize % (TUFT_GRID * 3)) * 2) as i64;
        let mut x: i64 = -20;
        while (x as f32) < w {
            let val = tuft_noise(x + row_offset, y);
            if val > TUFT_THRESHOLD {
                let tuft_h = 4.0 + val as f32 * 3.5;
                let alpha = 0.2 + val as f32 * 0.3;
                p.fill_rect(
                    (x + row_offset) as f32,
                    y as f32 - tuft_h / 2.0,
                    2.0,
                    tuft_h,
                    palette::fade(palette::GRASS_TUFT, alpha),
                );
            }
            x += TUFT_GRID as i64;
        }
        y += TUFT_GRID as i64;
    }
}

/// Classic shader hash: fractional part of a large-amplitude sine.
/// Signed, in `(-1, 1)`.
fn tuft_noise(x: i64, y: i64) -> f64 {
    ((x as f64 * 12.9898 + y as f64 * 78.233).sin() * 43758.5453).fract()
}

/// Linear blend between two opaque colours.
fn mix(a: u32, b: u32, t: f32) -> u32 {
    let [ar, ag, ab, _] = palette::channels(a);
    let [br, bg, bb, _] = palette::channels(b);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t.clamp(0.0, 1.0)).round() as u8;
    palette::rgba(lerp(ar, br), lerp(ag, bg), lerp(ab, bb), 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_matches_logical_size() {
        let mut rng = fastrand::Rng::with_seed(1);
        let bg = generate(320.5, 200.0, &mut rng);
        assert_eq!((bg.width(), bg.height()), (321, 200));
    }

    #[test]
    fn terrain_is_reproducible_across_seeds() {
        let a = generate(240.0, 180.0, &mut fastrand::Rng::with_seed(1));
        let b = generate(240.0, 180.0, &mut fastrand::Rng::with_seed(99));
        let first_grass_row = horizon_y(180.0).ceil() as u32;
        for y in first_grass_row..180 {
            for x in 0..240 {
                assert_eq!(a.pixel(x, y), b.pixel(x, y), "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn everything_is_opaque() {
        let bg = generate(64.0, 64.0, &mut fastrand::Rng::with_seed(3));
        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(bg.pixel(x, y)[3], 255);
            }
        }
    }

    #[test]
    fn sky_starts_at_top_colour() {
        // Speckles are faint; the top-left pixel stays within a few steps of SKY_TOP.
        let bg = generate(64.0, 100.0, &mut fastrand::Rng::with_seed(5));
        let [r, g, b, _] = bg.pixel(0, 0);
        let [er, eg, eb, _] = palette::channels(palette::SKY_TOP);
        assert!((r as i32 - er as i32).abs() <= 8);
        assert!((g as i32 - eg as i32).abs() <= 8);
        assert!((b as i32 - eb as i32).abs() <= 8);
    }

    #[test]
    fn noise_is_pure() {
        assert_eq!(tuft_noise(15, 240), tuft_noise(15, 240));
        assert!(tuft_noise(3, 7).abs() < 1.0);
    }

    #[test]
    fn mix_endpoints() {
        assert_eq!(mix(palette::SKY_TOP, palette::SKY_BOTTOM, 0.0), palette::SKY_TOP);
        assert_eq!(mix(palette::SKY_TOP, palette::SKY_BOTTOM, 1.0), palette::SKY_BOTTOM);
    }
}
