//! Little pixel hearts drifting up off the score panel.

/// Seconds between new hearts.
const SPAWN_INTERVAL: f32 = 0.8;
/// Only the newest few are kept.
const MAX_HEARTS: usize = 5;
/// Seconds to float up and fade out.
const LIFETIME: f32 = 2.0;
/// Pixels risen over a lifetime.
const RISE: f32 = 50.0;
/// Extra scale reached at the end of a lifetime.
const GROWTH: f32 = 0.2;
/// Hearts start somewhere over the left part of the panel.
const MAX_LEFT: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatingHeart {
    /// Horizontal position as a fraction of the panel width.
    pub left: f32,
    /// Seconds since spawn.
    pub age: f32,
}

impl FloatingHeart {
    fn progress(&self) -> f32 {
        (self.age / LIFETIME).clamp(0.0, 1.0)
    }

    /// Pixels above the spawn point, eased out.
    pub fn rise(&self) -> f32 {
        let t = 1.0 - self.progress();
        RISE * (1.0 - t * t)
    }

    pub fn alpha(&self) -> f32 {
        1.0 - self.progress()
    }

    pub fn scale(&self) -> f32 {
        1.0 + GROWTH * self.progress()
    }
}

pub struct BadgeHearts {
    hearts: Vec<FloatingHeart>,
    clock: f32,
    rng: fastrand::Rng,
}

impl BadgeHearts {
    pub fn new(rng: fastrand::Rng) -> Self {
        Self {
            hearts: Vec::with_capacity(MAX_HEARTS + 1),
            clock: 0.0,
            rng,
        }
    }

    /// Age every heart by `dt` seconds and spawn on the interval.
    pub fn tick(&mut self, dt: f32) {
        for h in &mut self.hearts {
            h.age += dt;
        }

        self.clock += dt;
        while self.clock >= SPAWN_INTERVAL {
            self.clock -= SPAWN_INTERVAL;
            self.hearts.push(FloatingHeart {
                left: self.rng.f32() * MAX_LEFT,
                age: self.clock,
            });
            if self.hearts.len() > MAX_HEARTS {
                self.hearts.remove(0);
            }
        }
        self.hearts.retain(|h| h.age < LIFETIME);
    }

    pub fn hearts(&self) -> &[FloatingHeart] {
        &self.hearts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(hearts: &mut BadgeHearts, seconds: f32) {
        let frames = (seconds * 60.0).round() as usize;
        for _ in 0..frames {
            hearts.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn spawns_on_the_interval() {
        let mut hearts = BadgeHearts::new(fastrand::Rng::with_seed(3));
        run(&mut hearts, 0.5);
        assert!(hearts.hearts().is_empty());
        run(&mut hearts, 0.5);
        assert_eq!(hearts.hearts().len(), 1);
        assert!(hearts.hearts()[0].left < MAX_LEFT);
    }

    #[test]
    fn old_hearts_fade_away() {
        let mut hearts = BadgeHearts::new(fastrand::Rng::with_seed(3));
        run(&mut hearts, 30.0);
        // One spawn every 0.8s, each living 2s.
        assert!(hearts.hearts().len() <= 3);
        assert!(hearts.hearts().iter().all(|h| h.age < LIFETIME));
    }

    #[test]
    fn a_long_stall_keeps_only_the_newest() {
        let mut hearts = BadgeHearts::new(fastrand::Rng::with_seed(3));
        hearts.tick(0.0);
        hearts.tick(SPAWN_INTERVAL * 7.5);
        assert!(hearts.hearts().len() <= MAX_HEARTS);
    }

    #[test]
    fn rises_fades_and_grows() {
        let fresh = FloatingHeart { left: 0.0, age: 0.0 };
        assert_eq!(fresh.rise(), 0.0);
        assert_eq!(fresh.alpha(), 1.0);
        assert_eq!(fresh.scale(), 1.0);

        let done = FloatingHeart { left: 0.0, age: LIFETIME };
        assert_eq!(done.rise(), RISE);
        assert_eq!(done.alpha(), 0.0);
        assert!((done.scale() - (1.0 + GROWTH)).abs() < 1e-6);
    }
}
