use glam::Vec2;

use crate::paint::{Painter, Surface};
use crate::palette;
use crate::sprite::tables;
use crate::util::geom::{clamp, distance, rand_range};
use crate::viewport::horizon_y;

pub type ToyId = u32;

/// Id reserved for the Play Button.
pub const PLAY_BUTTON_ID: ToyId = 999;
/// Pointer-to-toy hit radius, shared by hover and click.
pub const HIT_RADIUS: f32 = 50.0;
/// Frames the Play Button stays visibly pressed (~160ms).
pub const PRESS_FRAMES: u32 = 10;

/// Interior padding of each placement zone.
const ZONE_PAD: f32 = 15.0;
/// Placement zones start this far below the horizon and end this far above the floor.
const ZONE_INSET: f32 = 40.0;
/// Play Button x, and its offset below the dog's home.
const BUTTON_X: f32 = 60.0;
const BUTTON_BELOW_HOME: f32 = 60.0;
/// Toys are only clamped once the viewport is wider than this.
const CLAMP_MIN_WIDTH: f32 = 300.0;
/// Horizontal keep-out at each screen edge.
const EDGE_MARGIN: f32 = 30.0;
/// Keep toys this far below the horizon and above the bottom edge.
const GRASS_MARGIN: f32 = 20.0;
/// Hovered toys draw this much bigger.
const HOVER_SCALE: f32 = 1.2;

/// The closed set of toys in the yard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToyKind {
    Ball,
    Frisbee,
    Bone,
    Carrot,
    Bell,
    Bee,
    /// Starts zoomies; never picked up.
    PlayButton,
}

impl ToyKind {
    pub const COLLECTIBLE: [ToyKind; 6] = [
        ToyKind::Ball,
        ToyKind::Frisbee,
        ToyKind::Bone,
        ToyKind::Carrot,
        ToyKind::Bell,
        ToyKind::Bee,
    ];

    pub fn is_collectible(self) -> bool {
        self != ToyKind::PlayButton
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Toy {
    pub id: ToyId,
    pub pos: Vec2,
    pub kind: ToyKind,
    /// Frames left in the press animation.
    pub pressed: u32,
}

impl Toy {
    pub fn new(id: ToyId, kind: ToyKind, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            kind,
            pressed: 0,
        }
    }
}

/// The toys lying in the yard, in collection order.
pub struct ToyBox {
    toys: Vec<Toy>,
    hovered: Option<ToyId>,
}

impl ToyBox {
    pub fn new() -> Self {
        Self {
            toys: Vec::with_capacity(ToyKind::COLLECTIBLE.len() + 1),
            hovered: None,
        }
    }

    pub fn len(&self) -> usize {
        self.toys.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toy> {
        self.toys.iter()
    }

    pub fn get(&self, id: ToyId) -> Option<&Toy> {
        self.toys.iter().find(|t| t.id == id)
    }

    pub fn contains(&self, id: ToyId) -> bool {
        self.get(id).is_some()
    }

    /// Scatter the six collectible toys over six zones of the grass, in random
    /// order. Does nothing unless the box is empty.
    pub fn layout(&mut self, width: f32, height: f32, rng: &mut fastrand::Rng) {
        if !self.toys.is_empty() {
            return;
        }

        let mut kinds = ToyKind::COLLECTIBLE;
        rng.shuffle(&mut kinds);

        let grass_top = horizon_y(height) + ZONE_INSET;
        let grass_bottom = height - ZONE_INSET;
        let row_h = (grass_bottom - grass_top) / 2.0;
        let pw = |pct: f32| width * pct;

        for (i, kind) in kinds.into_iter().enumerate() {
            let (min_x, mut max_x, min_y, mut max_y) = match i {
                0 => (pw(0.05), pw(0.25), grass_top, grass_top + row_h),
                1 => (pw(0.05), pw(0.25), grass_top + row_h, grass_bottom),
                2 => (pw(0.75), pw(0.95), grass_top, grass_top + row_h),
                3 => (pw(0.75), pw(0.95), grass_top + row_h, grass_bottom),
                4 => (pw(0.25), pw(0.50), grass_top + row_h * 0.5, grass_bottom),
                _ => (pw(0.50), pw(0.75), grass_top + row_h * 0.5, grass_bottom),
            };
            // Tiny viewports collapse zones; widen instead of failing.
            if max_x < min_x + ZONE_PAD {
                max_x = min_x + ZONE_PAD + 1.0;
            }
            if max_y < min_y + ZONE_PAD {
                max_y = min_y + ZONE_PAD + 1.0;
            }

            let pos = Vec2::new(
                rand_range(rng, min_x + ZONE_PAD, max_x - ZONE_PAD),
                rand_range(rng, min_y + ZONE_PAD, max_y - ZONE_PAD),
            );
            self.toys.push(Toy::new(i as ToyId, kind, pos));
        }
        log::info!("Laid out {} toys over {:.0}x{:.0}", self.toys.len(), width, height);
    }

    /// Append the Play Button below the dog's home unless it already exists.
    /// An existing button keeps its (rescaled) position.
    pub fn ensure_play_button(&mut self, home_y: f32) {
        if self.toys.iter().any(|t| t.kind == ToyKind::PlayButton) {
            return;
        }
        self.toys.push(Toy::new(
            PLAY_BUTTON_ID,
            ToyKind::PlayButton,
            Vec2::new(BUTTON_X, home_y + BUTTON_BELOW_HOME),
        ));
    }

    /// First toy in collection order within [`HIT_RADIUS`] of `point`.
    pub fn hit_test(&self, point: Vec2) -> Option<&Toy> {
        self.toys
            .iter()
            .find(|t| distance(point, t.pos) < HIT_RADIUS)
    }

    pub fn hover(&mut self, point: Vec2) {
        self.hovered = self.hit_test(point).map(|t| t.id);
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<ToyId> {
        self.hovered
    }

    /// Remove a toy from the yard, handing ownership to the caller.
    pub fn take(&mut self, id: ToyId) -> Option<Toy> {
        let index = self.toys.iter().position(|t| t.id == id)?;
        if self.hovered == Some(id) {
            self.hovered = None;
        }
        Some(self.toys.remove(index))
    }

    /// Put a toy (back) into the yard.
    pub fn put(&mut self, toy: Toy) {
        debug_assert!(!self.contains(toy.id), "toy {} already in the yard", toy.id);
        self.toys.push(toy);
    }

    pub fn press(&mut self, id: ToyId) {
        if let Some(t) = self.toys.iter_mut().find(|t| t.id == id) {
            t.pressed = PRESS_FRAMES;
        }
    }

    /// Count down press animations.
    pub fn tick(&mut self) {
        for t in &mut self.toys {
            t.pressed = t.pressed.saturating_sub(1);
        }
    }

    pub fn rescale(&mut self, ratio: Vec2) {
        for t in &mut self.toys {
            t.pos *= ratio;
        }
    }

    /// Keep toys on the visible grass after the viewport moved under them.
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        if width <= CLAMP_MIN_WIDTH {
            return;
        }
        let horizon = horizon_y(height);
        for t in &mut self.toys {
            t.pos.x = clamp(t.pos.x, EDGE_MARGIN, width - EDGE_MARGIN);
            t.pos.y = clamp(t.pos.y, horizon + GRASS_MARGIN, height - GRASS_MARGIN);
        }
    }

    pub fn draw<S: Surface + ?Sized>(&self, p: &mut Painter<'_, S>, scale: f32, now_ms: f64) {
        for t in &self.toys {
            let s = if self.hovered == Some(t.id) {
                scale * HOVER_SCALE
            } else {
                scale
            };
            p.fill_ellipse(t.pos.x, t.pos.y + 5.0, s * 1.5, s * 0.5, palette::TOY_SHADOW);

            let bob = match t.kind {
                ToyKind::PlayButton => 0.0,
                _ => ((now_ms + t.id as f64 * 100.0) / 400.0).sin() as f32 * 2.0,
            };
            draw_toy(p, t.kind, t.pos.x, t.pos.y + bob, s, t.pressed > 0);
        }
    }
}

impl Default for ToyBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw one toy centred on `(cx, cy)`.
pub fn draw_toy<S: Surface + ?Sized>(
    p: &mut Painter<'_, S>,
    kind: ToyKind,
    cx: f32,
    cy: f32,
    scale: f32,
    pressed: bool,
) {
    let px = scale * 1.5;
    match kind {
        ToyKind::Ball => {
            let x = cx - 1.5 * px;
            let y = cy - 1.5 * px;
            for (ri, row) in tables::BALL.rows().enumerate() {
                for (ci, &code) in row.iter().enumerate() {
                    let color = crate::sprite::lookup(tables::BALL_PALETTE, code)
                        .unwrap_or(palette::BALL_RED);
                    let (cell_x, cell_y) = (x + ci as f32 * px, y + ri as f32 * px);
                    p.fill_rect(cell_x, cell_y, px, px, color);
                    p.stroke_rect(cell_x, cell_y, px, px, 1.0, palette::BALL_CELL_EDGE);
                }
            }
            p.stroke_rect(x, y, px * 3.0, px * 3.0, 2.0, palette::BALL_OUTLINE);
        }
        ToyKind::Frisbee => {
            let width = px * 6.0;
            let x = cx - width / 2.0 + px * 1.5;
            let y = cy - px;
            p.fill_rect(x + px, y, px * 4.0, px, palette::FRISBEE_LIGHT);
            p.fill_rect(x, y + px, width, px, palette::FRISBEE_MAIN);
            p.fill_rect(x + px, y + px * 1.5, px * 4.0, px * 0.5, palette::FRISBEE_DARK);
        }
        ToyKind::Bone => p.sprite(&tables::BONE, tables::BONE_PALETTE, cx, cy, px),
        ToyKind::Carrot => p.sprite(&tables::CARROT, tables::CARROT_PALETTE, cx, cy, px),
        ToyKind::Bell => p.sprite(&tables::BELL, tables::BELL_PALETTE, cx, cy, px),
        ToyKind::Bee => p.sprite(&tables::BEE, tables::BEE_PALETTE, cx, cy, px),
        ToyKind::PlayButton => {
            let sprite = if pressed {
                &tables::BUTTON_PRESSED
            } else {
                &tables::BUTTON
            };
            p.sprite(sprite, tables::BUTTON_PALETTE, cx, cy, scale * 0.8);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn laid_out(seed: u64, w: f32, h: f32) -> ToyBox {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut toys = ToyBox::new();
        toys.layout(w, h, &mut rng);
        toys
    }

    #[test]
    fn layout_places_each_collectible_once() {
        let toys = laid_out(3, 1200.0, 800.0);
        assert_eq!(toys.len(), 6);
        let kinds: HashSet<_> = toys.iter().map(|t| t.kind).collect();
        assert_eq!(kinds.len(), 6);
        assert!(toys.iter().all(|t| t.kind.is_collectible()));
        let ids: HashSet<_> = toys.iter().map(|t| t.id).collect();
        assert_eq!(ids, (0..6).collect());
    }

    #[test]
    fn layout_respects_zones() {
        for seed in 0..50 {
            let (w, h) = (1000.0, 800.0);
            let toys = laid_out(seed, w, h);
            let grass_top = horizon_y(h) + ZONE_INSET;
            let grass_bottom = h - ZONE_INSET;
            for t in toys.iter() {
                assert!(t.pos.x >= w * 0.05 + ZONE_PAD && t.pos.x <= w * 0.95 - ZONE_PAD);
                assert!(t.pos.y >= grass_top + ZONE_PAD && t.pos.y <= grass_bottom - ZONE_PAD);
            }
            // Zone 0 is the top-left band.
            let first = toys.get(0).unwrap();
            assert!(first.pos.x <= w * 0.25 - ZONE_PAD);
        }
    }

    #[test]
    fn layout_only_runs_when_empty() {
        let mut rng = fastrand::Rng::with_seed(9);
        let mut toys = ToyBox::new();
        toys.layout(1000.0, 800.0, &mut rng);
        let before: Vec<Toy> = toys.iter().copied().collect();
        toys.layout(500.0, 400.0, &mut rng);
        let after: Vec<Toy> = toys.iter().copied().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn degenerate_viewport_still_lays_out() {
        let toys = laid_out(1, 20.0, 90.0);
        assert_eq!(toys.len(), 6);
        assert!(toys.iter().all(|t| t.pos.is_finite()));
    }

    #[test]
    fn play_button_is_added_once() {
        let mut toys = laid_out(2, 1000.0, 800.0);
        toys.ensure_play_button(650.0);
        toys.ensure_play_button(100.0);
        let buttons: Vec<_> = toys.iter().filter(|t| t.kind == ToyKind::PlayButton).collect();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].id, PLAY_BUTTON_ID);
        assert_eq!(buttons[0].pos, Vec2::new(60.0, 710.0));
        assert_eq!(toys.iter().last().unwrap().kind, ToyKind::PlayButton);
    }

    #[test]
    fn hit_test_uses_radius_and_collection_order() {
        let mut toys = ToyBox::new();
        toys.put(Toy::new(1, ToyKind::Ball, Vec2::new(100.0, 100.0)));
        toys.put(Toy::new(2, ToyKind::Bone, Vec2::new(110.0, 100.0)));

        // Closer to toy 2, but toy 1 comes first.
        assert_eq!(toys.hit_test(Vec2::new(112.0, 100.0)).map(|t| t.id), Some(1));
        assert_eq!(toys.hit_test(Vec2::new(149.9, 100.0)).map(|t| t.id), Some(1));
        assert_eq!(toys.hit_test(Vec2::new(159.9, 100.0)).map(|t| t.id), Some(2));
        assert!(toys.hit_test(Vec2::new(160.0, 100.0)).is_none());
    }

    #[test]
    fn hover_matches_click_radius() {
        let mut toys = ToyBox::new();
        toys.put(Toy::new(4, ToyKind::Bee, Vec2::new(0.0, 0.0)));
        toys.hover(Vec2::new(0.0, 49.0));
        assert_eq!(toys.hovered(), Some(4));
        toys.hover(Vec2::new(0.0, 50.0));
        assert_eq!(toys.hovered(), None);
    }

    #[test]
    fn take_and_put_move_ownership() {
        let mut toys = laid_out(4, 1000.0, 800.0);
        let held = toys.take(3).unwrap();
        assert!(!toys.contains(3));
        assert_eq!(toys.len(), 5);
        assert!(toys.take(3).is_none());
        toys.put(held);
        assert!(toys.contains(3));
        assert_eq!(toys.len(), 6);
    }

    #[test]
    fn press_counts_down_to_zero() {
        let mut toys = ToyBox::new();
        toys.ensure_play_button(500.0);
        toys.press(PLAY_BUTTON_ID);
        for _ in 0..PRESS_FRAMES + 5 {
            toys.tick();
        }
        assert_eq!(toys.get(PLAY_BUTTON_ID).unwrap().pressed, 0);
    }

    #[test]
    fn rescale_is_proportional() {
        let mut toys = ToyBox::new();
        toys.put(Toy::new(1, ToyKind::Ball, Vec2::new(100.0, 400.0)));
        toys.rescale(Vec2::new(0.5, 1.5));
        assert_eq!(toys.get(1).unwrap().pos, Vec2::new(50.0, 600.0));
    }

    #[test]
    fn clamp_keeps_toys_on_the_grass() {
        let mut toys = ToyBox::new();
        toys.put(Toy::new(1, ToyKind::Ball, Vec2::new(-50.0, 10.0)));
        toys.put(Toy::new(2, ToyKind::Bell, Vec2::new(5000.0, 5000.0)));
        toys.clamp_to(800.0, 600.0);
        assert_eq!(toys.get(1).unwrap().pos, Vec2::new(30.0, 260.0));
        assert_eq!(toys.get(2).unwrap().pos, Vec2::new(770.0, 580.0));
    }

    #[test]
    fn narrow_viewports_skip_clamping() {
        let mut toys = ToyBox::new();
        toys.put(Toy::new(1, ToyKind::Ball, Vec2::new(-50.0, 10.0)));
        toys.clamp_to(300.0, 600.0);
        assert_eq!(toys.get(1).unwrap().pos, Vec2::new(-50.0, 10.0));
    }
}
