use std::f32::consts::PI;

use super::{Dog, DogState, DOG_SIZE, MICRO};
use crate::input::Zone;
use crate::paint::{Painter, Surface};
use crate::palette as pal;
use crate::sprite::tables;
use crate::toy::draw_toy;

/// Cell size of the "WOOF!" lettering.
const WOOF_CELL: f32 = DOG_SIZE * 0.8;
/// Height of the lettering baseline above the paws, in dog pixels.
const WOOF_RISE: f32 = 28.0;

type Shade = fn(u32, u32) -> u32;

fn solid(color: u32) -> impl Fn(u32, u32) -> u32 {
    move |_, _| color
}

/// Micro-pixel block in dog-local cell coordinates.
fn mp<S: Surface + ?Sized>(
    p: &mut Painter<'_, S>,
    dx: f32,
    dy: f32,
    w: u32,
    h: u32,
    shade: impl Fn(u32, u32) -> u32,
) {
    p.cells(dx, dy, w, h, MICRO, shade);
}

const HEAD: Shade = |x, y| {
    if y > 44 && x < 10 {
        pal::SHADOW_LIGHT
    } else {
        pal::DOG_WHITE
    }
};

const EAR: Shade = |x, y| {
    if x > 4 && x < 12 && y > 4 {
        if y > 12 {
            pal::EAR_INNER_3
        } else if y > 8 {
            pal::EAR_INNER_2
        } else {
            pal::EAR_INNER_1
        }
    } else {
        pal::DOG_WHITE
    }
};

const NOSE: Shade = |x, y| {
    if (x as i32 - 6).abs() + (y as i32 - 5).abs() < 4 {
        pal::NOSE_CORE
    } else {
        pal::NOSE_EDGE
    }
};

const EYE: Shade = |x, y| {
    if (4..=6).contains(&x) && y <= 2 {
        pal::DOG_HIGHLIGHT
    } else {
        pal::BLACK_INK
    }
};

/// Paw with dark nails on the front-left corner.
fn paw(nail_x: u32, nail_y: u32) -> impl Fn(u32, u32) -> u32 {
    move |x, y| {
        if x < nail_x && y > nail_y {
            pal::NAIL
        } else {
            pal::DOG_WHITE
        }
    }
}

/// Leg pivoting at its hip, foot lifted on the back swing.
fn running_leg<S: Surface + ?Sized>(p: &mut Painter<'_, S>, lx: f32, ly: f32, angle: f32) {
    let lift = (-angle.sin()).max(0.0) * 10.0;
    p.save();
    p.translate(lx * MICRO, (ly - lift) * MICRO);
    p.rotate(angle * 0.5);
    p.translate(-lx * MICRO, -ly * MICRO);
    mp(p, lx, ly, 20, 28, paw(4, 24));
    p.restore();
}

impl Dog {
    /// Draw the dog at its position. `zone` is where it is being petted.
    pub fn draw<S: Surface + ?Sized>(&self, p: &mut Painter<'_, S>, zone: Zone, now_ms: f64) {
        let dir = if self.facing_right { 1.0 } else { -1.0 };
        let t = now_ms as f32;

        p.save();
        p.translate(self.pos.x, self.pos.y);
        p.scale(dir * self.scale_x, self.scale_y);

        p.fill_ellipse(0.0, 0.0, DOG_SIZE * 6.0, DOG_SIZE * 1.5, pal::DOG_GROUND_SHADOW);

        let (mut head_dy, mut tilt) = (0.0, 0.0);
        match zone {
            Zone::Head => {
                head_dy = (t / 200.0).sin() * 5.0 - 5.0;
                tilt = -0.1;
            }
            Zone::LeftEar => tilt = -0.15,
            Zone::RightEar => tilt = 0.15,
            Zone::Back => head_dy = 5.0,
            Zone::None => {}
        }

        if self.state().is_standing() {
            self.draw_standing(p, zone, head_dy, tilt);
        } else {
            self.draw_sitting(p, zone, head_dy, tilt, t);
            if self.state() == DogState::Celebrating && self.bark_timer > 0 {
                // Lettering never mirrors.
                p.scale(dir, 1.0);
                let cy = -WOOF_RISE * DOG_SIZE - tables::WOOF.height() as f32 * WOOF_CELL / 2.0;
                p.sprite(&tables::WOOF, tables::WOOF_PALETTE, 0.0, cy, WOOF_CELL);
            }
        }
        p.restore();
    }

    fn draw_standing<S: Surface + ?Sized>(
        &self,
        p: &mut Painter<'_, S>,
        zone: Zone,
        head_dy: f32,
        tilt: f32,
    ) {
        let legs = self.leg_phase;
        let by = -40.0;
        let wag = (legs * 0.8).sin() * 10.0;

        mp(p, -80.0, by - 10.0 + wag / 2.0, 24, 12, solid(pal::DOG_WHITE));
        mp(p, -48.0, by - 8.0, 80, 48, |_, y| {
            if y > 38 {
                pal::SHADOW_DEEP
            } else if y > 32 {
                pal::SHADOW_MID
            } else {
                pal::DOG_WHITE
            }
        });

        running_leg(p, -60.0, by + 32.0, (legs + PI).sin() * 0.8);
        running_leg(p, 20.0, by + 32.0, legs.sin() * 0.8);

        let bob = legs.sin().abs() * 4.0;
        self.draw_head(p, zone, 16.0, -80.0, tilt, head_dy - bob);

        mp(p, 14.0, by - 2.0, 6, 6, solid(pal::BLACK_INK));
        mp(p, 16.0, by + 4.0, 6, 6, solid(pal::BLACK_INK));
    }

    fn draw_sitting<S: Surface + ?Sized>(
        &self,
        p: &mut Painter<'_, S>,
        zone: Zone,
        head_dy: f32,
        tilt: f32,
        t: f32,
    ) {
        let happy = matches!(self.state(), DogState::Celebrating | DogState::Catching);
        let bounce = if happy { (t / 60.0).sin() * 2.0 } else { 0.0 };
        let by = -80.0 + bounce * 8.0;

        let tail_period = match (zone, happy) {
            (Zone::Back, _) => 30.0,
            (_, true) => 40.0,
            _ => 300.0,
        };
        let wag = (t / tail_period).sin() * 10.0;
        mp(p, -60.0 + wag, by + 50.0, 16, 28, solid(pal::DOG_WHITE));

        let body_dy = if zone == Zone::Back {
            (t / 50.0).sin() * 2.0
        } else {
            0.0
        };
        mp(p, -56.0, by + 60.0 + body_dy, 40, 36, |x, y| {
            if x < 8 {
                pal::SHADOW_DEEP
            } else if y > 28 {
                pal::SHADOW_MID
            } else {
                pal::DOG_WHITE
            }
        });
        mp(p, -64.0, by + 92.0, 24, 12, paw(4, 6));
        mp(p, -32.0, by + 20.0 + body_dy, 48, 76, |x, y| {
            if x < 12 {
                pal::SHADOW_DEEP
            } else if x < 20 {
                pal::SHADOW_MID
            } else if y > 60 {
                pal::SHADOW_LIGHT
            } else {
                pal::DOG_WHITE
            }
        });

        for fx in [-12.0, 16.0] {
            mp(p, fx, by + 56.0, 16, 40, solid(pal::DOG_WHITE));
            mp(p, fx - 4.0, by + 96.0, 20, 8, paw(4, 4));
        }

        mp(p, -28.0, by + 16.0, 48, 12, |_, y| {
            if !(2..=10).contains(&y) {
                pal::BLACK_FADE
            } else {
                pal::BLACK_INK
            }
        });

        self.draw_head(p, zone, -20.0, by - 32.0, tilt, head_dy);
    }

    fn draw_head<S: Surface + ?Sized>(
        &self,
        p: &mut Painter<'_, S>,
        zone: Zone,
        hx: f32,
        hy: f32,
        tilt: f32,
        dy: f32,
    ) {
        p.save();
        p.translate(0.0, dy * MICRO);
        p.rotate(tilt);

        mp(p, hx, hy, 56, 52, HEAD);

        for (ex, right) in [(hx + 4.0, false), (hx + 36.0, true)] {
            let petted = matches!((zone, right), (Zone::LeftEar, false) | (Zone::RightEar, true));
            let (h, drop) = if petted { (12, 8.0) } else { (20, 0.0) };
            mp(p, ex, hy - 20.0 + drop, 16, h, EAR);
        }

        mp(p, hx + 40.0, hy + 24.0, 24, 20, solid(pal::DOG_WHITE));
        mp(p, hx + 56.0, hy + 22.0, 12, 10, NOSE);
        mp(p, hx + 36.0, hy + 16.0, 8, 8, EYE);

        if zone == Zone::Head {
            // Happy squint.
            p.fill_rect(
                (hx + 36.0) * MICRO,
                (hy + 20.0) * MICRO - 1.5,
                8.0 * MICRO,
                3.0,
                pal::BLACK_INK,
            );
        }

        if let Some(toy) = self.held.filter(|_| self.shows_held_toy()) {
            let (x, y) = ((hx + 66.0) * MICRO, (hy + 30.0) * MICRO);
            draw_toy(p, toy.kind, x, y, DOG_SIZE, false);
        }
        p.restore();
    }

    fn shows_held_toy(&self) -> bool {
        match self.state() {
            DogState::Catching | DogState::Retrieving => true,
            DogState::Dropping => self.drop_progress < 0.5,
            _ => false,
        }
    }
}
