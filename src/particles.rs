use glam::Vec2;

use crate::paint::{Painter, Surface};
use crate::palette;
use crate::sprite::tables;

/// Maximum concurrent hearts.
const MAX_HEARTS: usize = 256;
/// Maximum concurrent firework sparks.
const MAX_FIREWORKS: usize = 2048;

/// Life lost by a heart each frame (~67 frames total).
const HEART_DECAY: f32 = 0.015;
/// Upward drift of a heart, px/frame.
const HEART_RISE: f32 = 1.0;
/// Heart sprite cell size relative to the yard scale.
const HEART_CELL: f32 = 0.8;

/// Waves in one firework show.
pub const SHOW_WAVES: u32 = 4;
/// Frames between waves (~0.5s).
const WAVE_INTERVAL: i32 = 30;
/// Burst centres per wave.
const BURSTS_PER_WAVE: usize = 5;
/// Sparks per burst.
const SPARKS_PER_BURST: usize = 25;
/// Bursts are kept inside the top band of the sky.
const BURST_BAND: f32 = 0.35;
/// Downward acceleration, px/frame².
const SPARK_GRAVITY: f32 = 0.04;
/// Horizontal velocity kept each frame.
const SPARK_DRAG: f32 = 0.98;

/// A heart floating up from the dog.
#[derive(Debug, Clone, Copy)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec2,
    /// Normalised remaining life, 1 → 0.
    pub life: f32,
}

/// A single firework spark.
#[derive(Debug, Clone, Copy)]
pub struct Spark {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub alpha: f32,
    /// Alpha lost per frame, fixed at spawn.
    pub decay: f32,
    pub size: f32,
}

/// Multi-wave firework sequencer.
#[derive(Debug, Clone, Copy, Default)]
pub struct FireworkShow {
    pub waves_left: u32,
    pub timer: i32,
}

impl FireworkShow {
    /// Queue a full show; the first wave fires on the next tick.
    pub fn start(&mut self) {
        self.waves_left = SHOW_WAVES;
        self.timer = 0;
    }

    /// Advance one frame. Returns true when a wave should spawn now.
    pub fn tick(&mut self) -> bool {
        if self.waves_left == 0 {
            return false;
        }
        self.timer -= 1;
        if self.timer > 0 {
            return false;
        }
        self.waves_left -= 1;
        self.timer = WAVE_INTERVAL;
        true
    }

    pub fn is_running(&self) -> bool {
        self.waves_left > 0
    }
}

/// Hearts and fireworks, each an unordered population.
pub struct ParticleSystem {
    hearts: Vec<Heart>,
    sparks: Vec<Spark>,
    show: FireworkShow,
    next_heart_id: u32,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            hearts: Vec::with_capacity(MAX_HEARTS),
            sparks: Vec::with_capacity(MAX_FIREWORKS),
            show: FireworkShow::default(),
            next_heart_id: 0,
        }
    }

    pub fn spawn_heart(&mut self, pos: Vec2) {
        if self.hearts.len() >= MAX_HEARTS {
            return;
        }
        self.hearts.push(Heart {
            id: self.next_heart_id,
            pos,
            life: 1.0,
        });
        self.next_heart_id = self.next_heart_id.wrapping_add(1);
    }

    pub fn start_show(&mut self) {
        log::info!("Fireworks!");
        self.show.start();
    }

    /// One frame: sequencer, spark integration, heart drift. Dead entries are
    /// gone when this returns.
    pub fn update(&mut self, width: f32, height: f32, rng: &mut fastrand::Rng) {
        if self.show.tick() {
            self.spawn_wave(width, height, rng);
        }

        let mut i = 0;
        while i < self.sparks.len() {
            let s = &mut self.sparks[i];
            s.pos += s.vel;
            s.vel.y += SPARK_GRAVITY;
            s.vel.x *= SPARK_DRAG;
            s.alpha -= s.decay;

            if s.alpha <= 0.0 {
                self.sparks.swap_remove(i);
            } else {
                i += 1;
            }
        }

        for h in &mut self.hearts {
            h.pos.y -= HEART_RISE;
            h.life -= HEART_DECAY;
        }
        self.hearts.retain(|h| h.life > 0.0);
    }

    fn spawn_wave(&mut self, width: f32, height: f32, rng: &mut fastrand::Rng) {
        for _ in 0..BURSTS_PER_WAVE {
            let center = Vec2::new(rng.f32() * width, rng.f32() * height * BURST_BAND);
            let color = palette::FIREWORK_COLORS[rng.usize(0..palette::FIREWORK_COLORS.len())];

            for _ in 0..SPARKS_PER_BURST {
                if self.sparks.len() >= MAX_FIREWORKS {
                    return;
                }
                let angle = rng.f32() * std::f32::consts::TAU;
                let speed = rng.f32() * 4.0 + 2.0;
                self.sparks.push(Spark {
                    pos: center,
                    vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                    color,
                    alpha: 1.0,
                    decay: rng.f32() * 0.005 + 0.005,
                    size: rng.f32() * 3.0 + 2.0,
                });
            }
        }
    }

    pub fn draw_fireworks<S: Surface + ?Sized>(&self, p: &mut Painter<'_, S>) {
        for s in &self.sparks {
            p.fill_rect(s.pos.x, s.pos.y, s.size, s.size, palette::fade(s.color, s.alpha));
        }
    }

    pub fn draw_hearts<S: Surface + ?Sized>(&self, p: &mut Painter<'_, S>, scale: f32) {
        for h in &self.hearts {
            p.save();
            p.set_alpha(h.life);
            p.sprite(&tables::HEART, tables::HEART_PALETTE, h.pos.x, h.pos.y, scale * HEART_CELL);
            p.restore();
        }
    }

    pub fn hearts(&self) -> &[Heart] {
        &self.hearts
    }

    pub fn sparks(&self) -> &[Spark] {
        &self.sparks
    }

    pub fn show(&self) -> &FireworkShow {
        &self.show
    }
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_fires_immediately_then_spaces_waves() {
        let mut show = FireworkShow::default();
        show.start();
        assert!(show.tick());
        assert_eq!(show.waves_left, SHOW_WAVES - 1);

        let mut frames_to_next = 0;
        while !show.tick() {
            frames_to_next += 1;
        }
        assert_eq!(frames_to_next, WAVE_INTERVAL - 1);
    }

    #[test]
    fn show_spawns_exactly_its_waves() {
        let mut show = FireworkShow::default();
        show.start();
        let waves = (0..1000).filter(|_| show.tick()).count();
        assert_eq!(waves as u32, SHOW_WAVES);
        assert!(!show.is_running());
    }

    #[test]
    fn restarting_a_show_resets_the_count() {
        let mut show = FireworkShow::default();
        show.start();
        show.tick();
        show.tick();
        show.start();
        assert_eq!(show.waves_left, SHOW_WAVES);
        assert_eq!(show.timer, 0);
    }

    #[test]
    fn wave_sparks_start_in_the_upper_band() {
        let mut rng = fastrand::Rng::with_seed(11);
        let mut ps = ParticleSystem::new();
        ps.spawn_wave(800.0, 600.0, &mut rng);
        assert_eq!(ps.sparks().len(), BURSTS_PER_WAVE * SPARKS_PER_BURST);
        for s in ps.sparks() {
            assert!(s.pos.y <= 600.0 * BURST_BAND);
            assert!((0.0..=800.0).contains(&s.pos.x));
            let speed = s.vel.length();
            assert!((2.0 - 1e-3..=6.0 + 1e-3).contains(&speed));
            assert!((0.005..=0.01).contains(&s.decay));
        }
    }

    #[test]
    fn no_dead_particles_survive_an_update() {
        let mut rng = fastrand::Rng::with_seed(5);
        let mut ps = ParticleSystem::new();
        ps.start_show();
        for frame in 0..400 {
            if frame % 7 == 0 {
                ps.spawn_heart(Vec2::new(100.0, 300.0));
            }
            ps.update(800.0, 600.0, &mut rng);
            assert!(ps.hearts().iter().all(|h| h.life > 0.0));
            assert!(ps.sparks().iter().all(|s| s.alpha > 0.0));
        }
    }

    #[test]
    fn hearts_rise_and_expire() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut ps = ParticleSystem::new();
        ps.spawn_heart(Vec2::new(10.0, 100.0));
        ps.update(100.0, 100.0, &mut rng);
        assert_eq!(ps.hearts()[0].pos.y, 99.0);
        assert!((ps.hearts()[0].life - (1.0 - HEART_DECAY)).abs() < 1e-6);

        for _ in 0..100 {
            ps.update(100.0, 100.0, &mut rng);
        }
        assert!(ps.hearts().is_empty());
    }

    #[test]
    fn sparks_fall_and_slow() {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut ps = ParticleSystem::new();
        ps.sparks.push(Spark {
            pos: Vec2::ZERO,
            vel: Vec2::new(10.0, 0.0),
            color: palette::HEART,
            alpha: 1.0,
            decay: 0.01,
            size: 2.0,
        });
        ps.update(100.0, 100.0, &mut rng);
        let s = ps.sparks()[0];
        assert_eq!(s.pos, Vec2::new(10.0, 0.0));
        assert!((s.vel.x - 9.8).abs() < 1e-5);
        assert!((s.vel.y - SPARK_GRAVITY).abs() < 1e-6);
        assert!((s.alpha - 0.99).abs() < 1e-6);
    }

    #[test]
    fn heart_population_is_capped() {
        let mut ps = ParticleSystem::new();
        for _ in 0..MAX_HEARTS + 10 {
            ps.spawn_heart(Vec2::ZERO);
        }
        assert_eq!(ps.hearts().len(), MAX_HEARTS);
    }
}
