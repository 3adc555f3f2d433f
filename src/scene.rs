//! The simulation context: everything the frame loop and the pointer handlers
//! touch, updated synchronously from a single thread.

use glam::Vec2;

use crate::background;
use crate::dog::{self, Dog, Target, Yard, DOG_SIZE};
use crate::input::{self, Zone};
use crate::paint::{Canvas, Painter, Surface};
use crate::particles::ParticleSystem;
use crate::score::{ScoreSink, StateSink};
use crate::toy::ToyBox;
use crate::util::geom::rand_range;
use crate::viewport::Viewport;

/// Hearts while petting float up from the head.
const PET_HEART_EVERY: u32 = 15;
const PET_HEART_RISE: f32 = 120.0;
const PET_HEART_JITTER: f32 = 20.0;
/// Continuous petting frames per point (~1s).
const PET_SCORE_FRAMES: u32 = 60;
const PET_REWARD: u32 = 1;

/// A toy yanked out of the dog's mouth lands this far ahead and below.
const FORCED_DROP_AHEAD: f32 = 20.0;
const FORCED_DROP_BELOW: f32 = 20.0;
const DROP_MARGIN: f32 = 50.0;

pub struct Scene {
    viewport: Viewport,
    dog: Dog,
    toys: ToyBox,
    particles: ParticleSystem,
    rng: fastrand::Rng,
    backdrop: Canvas,
    backdrop_dirty: bool,
    pointer: Option<Vec2>,
    zone: Zone,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_rng(fastrand::Rng::new())
    }

    pub fn with_rng(rng: fastrand::Rng) -> Self {
        Self {
            viewport: Viewport::new(),
            dog: Dog::new(),
            toys: ToyBox::new(),
            particles: ParticleSystem::new(),
            rng,
            backdrop: Canvas::new(1, 1),
            backdrop_dirty: false,
            pointer: None,
            zone: Zone::None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn dog(&self) -> &Dog {
        &self.dog
    }

    pub fn toys(&self) -> &ToyBox {
        &self.toys
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn zone(&self) -> Zone {
        self.zone
    }

    /// New logical size. Rescales every stored position by `new / old`,
    /// regenerates the backdrop, and performs first-time placement.
    pub fn resize(&mut self, width: f32, height: f32, device_pixel_ratio: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        if let Some(ratio) = self.viewport.resize(width, height, device_pixel_ratio) {
            log::debug!("rescaling yard by {:.3}x{:.3}", ratio.x, ratio.y);
            self.dog.rescale(ratio);
            self.toys.rescale(ratio);
        }

        self.backdrop = background::generate(width, height, &mut self.rng);
        self.backdrop_dirty = true;

        self.dog.place_home_once(height);
        self.toys.layout(width, height, &mut self.rng);
        self.toys.ensure_play_button(self.dog.home.y);
    }

    /// The backdrop, once per regeneration.
    pub fn take_backdrop(&mut self) -> Option<&Canvas> {
        if !self.backdrop_dirty {
            return None;
        }
        self.backdrop_dirty = false;
        Some(&self.backdrop)
    }

    /// One simulation frame: effects, petting, boundary clamp, state machine.
    pub fn update<K: ScoreSink + StateSink>(&mut self, now_ms: f64, sinks: &mut K) {
        let (width, height) = (self.viewport.width, self.viewport.height);

        self.particles.update(width, height, &mut self.rng);
        self.toys.tick();

        self.zone = self
            .pointer
            .map_or(Zone::None, |p| input::classify(&self.dog, p));
        self.pet(sinks);

        self.dog.clamp_to(width, height);
        self.toys.clamp_to(width, height);

        let mut yard = Yard {
            toys: &mut self.toys,
            particles: &mut self.particles,
            rng: &mut self.rng,
            width,
            height,
        };
        let step = self.dog.update(&mut yard, now_ms);
        if step.reward > 0 {
            self.reward(step.reward, sinks);
        }
        if let Some(state) = step.entered {
            sinks.set_dog_state(state);
        }
    }

    fn pet<K: ScoreSink>(&mut self, sinks: &mut K) {
        if !self.zone.is_active() {
            self.dog.petting_counter = 0;
            return;
        }
        self.dog.petting_counter += 1;
        if self.dog.petting_counter % PET_HEART_EVERY == 0 {
            let jitter = rand_range(&mut self.rng, -PET_HEART_JITTER, PET_HEART_JITTER);
            let pos = self.dog.pos + Vec2::new(jitter, -PET_HEART_RISE);
            self.particles.spawn_heart(pos);
        }
        if self.dog.petting_counter >= PET_SCORE_FRAMES {
            self.reward(PET_REWARD, sinks);
            self.dog.petting_counter = 0;
        }
    }

    fn reward<K: ScoreSink>(&mut self, amount: u32, sinks: &mut K) {
        let change = sinks.add_score(amount);
        if change.crossed_ten() {
            self.particles.start_show();
        }
    }

    /// Pointer pressed at a logical position. Clicks in the sky are ignored.
    pub fn pointer_down<K: StateSink>(&mut self, p: Vec2, sinks: &mut K) {
        if p.y <= self.viewport.horizon() {
            return;
        }
        let before = self.dog.state();

        if let Some(toy) = self.dog.release_toy(
            FORCED_DROP_AHEAD,
            FORCED_DROP_BELOW,
            DROP_MARGIN,
            self.viewport.width,
        ) {
            log::debug!("dropped toy {} on interrupt", toy.id);
            self.toys.put(toy);
            self.dog.dropped = false;
        }

        match self.toys.hit_test(p).copied() {
            Some(toy) if !toy.kind.is_collectible() => {
                self.toys.press(toy.id);
                let first =
                    dog::zoomies_spot(&mut self.rng, self.viewport.width, self.viewport.height);
                self.dog.start_zoomies(first);
            }
            Some(toy) => self.dog.fetch(Target::toy(&toy)),
            None => self.dog.fetch(Target::ground(p)),
        }

        if self.dog.state() != before {
            sinks.set_dog_state(self.dog.state());
        }
    }

    pub fn pointer_move(&mut self, p: Vec2) {
        self.pointer = Some(p);
        self.toys.hover(p);
        self.zone = input::classify(&self.dog, p);
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
        self.toys.clear_hover();
        self.zone = Zone::None;
    }

    /// Compose the frame above the backdrop: fireworks, toys, dog, hearts.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, now_ms: f64) {
        let mut p = Painter::new(surface);
        self.particles.draw_fireworks(&mut p);
        self.toys.draw(&mut p, DOG_SIZE, now_ms);
        self.dog.draw(&mut p, self.zone, now_ms);
        self.particles.draw_hearts(&mut p, DOG_SIZE);
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
