//! Raster painting: a `Surface` seam plus a canvas-style `Painter`.
//!
//! Everything the yard draws ends up as filled quads. The painter merges
//! same-colour cells along each row into a single quad, which keeps the dog
//! (thousands of logical cells) to a few hundred instances per frame.

pub mod canvas;

pub use canvas::Canvas;

use glam::{Affine2, Vec2};

use crate::palette;
use crate::sprite::{self, Palette, Sprite};

/// Sub-pixel overlap added to merged runs so neighbouring runs never show seams.
const SEAM_OVERLAP: f32 = 0.5;
/// Horizontal strips used to approximate an ellipse.
const ELLIPSE_STRIPS: usize = 8;

/// A parallelogram: `origin + u * axis_x + v * axis_y` for `u, v` in `[0, 1]`.
///
/// Any affine transform of an axis-aligned rectangle is exactly a quad.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quad {
    pub origin: Vec2,
    pub axis_x: Vec2,
    pub axis_y: Vec2,
}

impl Quad {
    pub fn rect(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            axis_x: Vec2::new(w, 0.0),
            axis_y: Vec2::new(0.0, h),
        }
    }

    pub fn transformed(self, t: &Affine2) -> Self {
        Self {
            origin: t.transform_point2(self.origin),
            axis_x: t.transform_vector2(self.axis_x),
            axis_y: t.transform_vector2(self.axis_y),
        }
    }

    /// Axis-aligned bounding box `(min, max)`.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let corners = [
            self.origin,
            self.origin + self.axis_x,
            self.origin + self.axis_y,
            self.origin + self.axis_x + self.axis_y,
        ];
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = min.min(*c);
            max = max.max(*c);
        }
        (min, max)
    }
}

/// Anything that can receive filled quads.
pub trait Surface {
    fn fill_quad(&mut self, quad: Quad, color: u32);
}

/// Canvas-style painter with a save/restore transform stack and global alpha.
pub struct Painter<'a, S: Surface + ?Sized> {
    surface: &'a mut S,
    transform: Affine2,
    alpha: f32,
    stack: Vec<(Affine2, f32)>,
}

impl<'a, S: Surface + ?Sized> Painter<'a, S> {
    pub fn new(surface: &'a mut S) -> Self {
        Self {
            surface,
            transform: Affine2::IDENTITY,
            alpha: 1.0,
            stack: Vec::with_capacity(8),
        }
    }

    pub fn save(&mut self) {
        self.stack.push((self.transform, self.alpha));
    }

    pub fn restore(&mut self) {
        if let Some((transform, alpha)) = self.stack.pop() {
            self.transform = transform;
            self.alpha = alpha;
        }
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = self.transform * Affine2::from_translation(Vec2::new(dx, dy));
    }

    pub fn rotate(&mut self, radians: f32) {
        self.transform = self.transform * Affine2::from_angle(radians);
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.transform = self.transform * Affine2::from_scale(Vec2::new(sx, sy));
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: u32) {
        let color = if self.alpha < 1.0 {
            palette::fade(color, self.alpha)
        } else {
            color
        };
        if color & 0xFF == 0 {
            return;
        }
        let quad = Quad::rect(x, y, w, h).transformed(&self.transform);
        self.surface.fill_quad(quad, color);
    }

    /// Outline made of four thin rects inside `(x, y, w, h)`.
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32, color: u32) {
        self.fill_rect(x, y, w, width, color);
        self.fill_rect(x, y + h - width, w, width, color);
        self.fill_rect(x, y + width, width, h - 2.0 * width, color);
        self.fill_rect(x + w - width, y + width, width, h - 2.0 * width, color);
    }

    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: u32) {
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let strip_h = 2.0 * ry / ELLIPSE_STRIPS as f32;
        for i in 0..ELLIPSE_STRIPS {
            let top = cy - ry + i as f32 * strip_h;
            let t = (top + strip_h * 0.5 - cy) / ry;
            let half_w = rx * (1.0 - t * t).max(0.0).sqrt();
            self.fill_rect(cx - half_w, top, 2.0 * half_w, strip_h, color);
        }
    }

    /// Draw a palette sprite centred on `(cx, cy)`, one cell = `cell` units.
    pub fn sprite(&mut self, sprite: &Sprite, palette: Palette, cx: f32, cy: f32, cell: f32) {
        let x = cx - sprite.width() as f32 * cell / 2.0;
        let y = cy - sprite.height() as f32 * cell / 2.0;

        for (row_index, row) in sprite.rows().enumerate() {
            let row_y = y + row_index as f32 * cell;
            for (start, end, code) in runs(row.iter().copied()) {
                if let Some(color) = sprite::lookup(palette, code) {
                    self.fill_rect(
                        x + start as f32 * cell,
                        row_y,
                        (end - start) as f32 * cell + SEAM_OVERLAP,
                        cell + SEAM_OVERLAP,
                        color,
                    );
                }
            }
        }
    }

    /// Procedural cell block: `w × h` cells at cell offset `(dx, dy)`, with the
    /// colour of each cell chosen by `shade(x, y)`. Runs are merged per row.
    pub fn cells<F>(&mut self, dx: f32, dy: f32, w: u32, h: u32, cell: f32, shade: F)
    where
        F: Fn(u32, u32) -> u32,
    {
        let x0 = dx * cell;
        let y0 = dy * cell;
        for iy in 0..h {
            for (start, end, color) in runs((0..w).map(|ix| shade(ix, iy))) {
                self.fill_rect(
                    x0 + start as f32 * cell,
                    y0 + iy as f32 * cell,
                    (end - start) as f32 * cell + SEAM_OVERLAP,
                    cell + SEAM_OVERLAP,
                    color,
                );
            }
        }
    }
}

/// Split a row into maximal runs of equal values: `(start, end_exclusive, value)`.
/// Lazy, so the per-frame draw path never allocates.
pub fn runs<I>(row: I) -> Runs<I::IntoIter>
where
    I: IntoIterator,
    I::Item: PartialEq + Copy,
{
    let mut iter = row.into_iter().enumerate();
    let pending = iter.next();
    Runs { iter, pending }
}

pub struct Runs<I: Iterator> {
    iter: std::iter::Enumerate<I>,
    /// First cell of the next run.
    pending: Option<(usize, I::Item)>,
}

impl<I> Iterator for Runs<I>
where
    I: Iterator,
    I::Item: PartialEq + Copy,
{
    type Item = (usize, usize, I::Item);

    fn next(&mut self) -> Option<Self::Item> {
        let (start, value) = self.pending.take()?;
        let mut end = start + 1;
        for (i, next) in self.iter.by_ref() {
            if next != value {
                self.pending = Some((i, next));
                return Some((start, i, value));
            }
            end = i + 1;
        }
        Some((start, end, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::tables;

    #[derive(Default)]
    struct Recorder(Vec<(Quad, u32)>);

    impl Surface for Recorder {
        fn fill_quad(&mut self, quad: Quad, color: u32) {
            self.0.push((quad, color));
        }
    }

    #[test]
    fn runs_merge_adjacent_values() {
        assert_eq!(
            runs("aab c".bytes()).collect::<Vec<_>>(),
            vec![(0, 2, b'a'), (2, 3, b'b'), (3, 4, b' '), (4, 5, b'c')]
        );
        assert!(runs(std::iter::empty::<u8>()).next().is_none());
        assert_eq!(runs([7u32; 5]).collect::<Vec<_>>(), vec![(0, 5, 7)]);
        assert_eq!(runs([1u8, 2]).collect::<Vec<_>>(), vec![(0, 1, 1), (1, 2, 2)]);
    }

    #[test]
    fn sprite_paints_one_quad_per_run() {
        let mut rec = Recorder::default();
        Painter::new(&mut rec).sprite(&tables::HEART, tables::HEART_PALETTE, 0.0, 0.0, 1.0);
        // " O O " -> 2, "OOOOO" -> 1, "OOOOO" -> 1, " OOO " -> 1, "  O  " -> 1
        assert_eq!(rec.0.len(), 6);
    }

    #[test]
    fn sprite_is_centred_on_anchor() {
        let mut rec = Recorder::default();
        Painter::new(&mut rec).sprite(&tables::HEART, tables::HEART_PALETTE, 100.0, 50.0, 2.0);
        // Row 1 is a full run, starting at the left edge of the 10x10 sprite.
        let (quad, _) = rec.0[2];
        assert_eq!(quad.origin, Vec2::new(95.0, 47.0));
    }

    #[test]
    fn solid_block_is_one_quad_per_row() {
        let mut rec = Recorder::default();
        Painter::new(&mut rec).cells(0.0, 0.0, 56, 52, 1.0, |_, _| palette::DOG_WHITE);
        assert_eq!(rec.0.len(), 52);
    }

    #[test]
    fn transforms_compose_like_a_canvas() {
        let mut rec = Recorder::default();
        let mut p = Painter::new(&mut rec);
        p.translate(10.0, 20.0);
        p.scale(-1.0, 1.0);
        p.fill_rect(1.0, 0.0, 2.0, 3.0, palette::BLACK_INK);
        let (quad, _) = rec.0[0];
        assert_eq!(quad.origin, Vec2::new(9.0, 20.0));
        assert_eq!(quad.axis_x, Vec2::new(-2.0, 0.0));
        assert_eq!(quad.axis_y, Vec2::new(0.0, 3.0));
    }

    #[test]
    fn restore_pops_transform_and_alpha() {
        let mut rec = Recorder::default();
        let mut p = Painter::new(&mut rec);
        p.save();
        p.translate(5.0, 5.0);
        p.set_alpha(0.5);
        p.restore();
        p.fill_rect(0.0, 0.0, 1.0, 1.0, palette::BLACK_INK);
        let (quad, color) = rec.0[0];
        assert_eq!(quad.origin, Vec2::ZERO);
        assert_eq!(color, palette::BLACK_INK);
    }

    #[test]
    fn fully_faded_fills_are_skipped() {
        let mut rec = Recorder::default();
        let mut p = Painter::new(&mut rec);
        p.set_alpha(0.0);
        p.fill_rect(0.0, 0.0, 4.0, 4.0, palette::HEART);
        assert!(rec.0.is_empty());
    }

    #[test]
    fn ellipse_stays_inside_its_box() {
        let mut rec = Recorder::default();
        Painter::new(&mut rec).fill_ellipse(0.0, 0.0, 30.0, 7.5, palette::TOY_SHADOW);
        assert_eq!(rec.0.len(), ELLIPSE_STRIPS);
        for (quad, _) in &rec.0 {
            let (min, max) = quad.bounds();
            assert!(min.x >= -30.0 && max.x <= 30.0);
            assert!(min.y >= -7.5 - 1e-4 && max.y <= 7.5 + 1e-4);
        }
    }
}
