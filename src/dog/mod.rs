//! The dog: a singleton character driven by a small state machine.
//!
//! All mutation happens in [`Dog::update`] (one call per frame) or in the
//! pointer commands issued by the scene between frames.

mod behavior;
mod draw;
mod movement;

pub use behavior::{zoomies_spot, Step, Yard};

use glam::Vec2;

use crate::toy::{Toy, ToyId};
use crate::util::geom::clamp;
use crate::viewport::horizon_y;

/// Pixel scale of the dog (and of toys/hearts drawn next to it).
pub const DOG_SIZE: f32 = 5.0;
/// Sub-pixel cell used by the dog's procedural body.
pub const MICRO: f32 = DOG_SIZE / 6.0;

/// Frames spent playing with a freshly caught toy (~1s).
const PLAY_FRAMES: u32 = 60;
/// Frames the "WOOF!" stays up.
const BARK_FRAMES: u32 = 40;
/// Frames of zoomies (~5s).
pub const ZOOMIES_FRAMES: u32 = 300;

/// Dog's home, relative to the bottom-left of the first viewport.
const HOME_X: f32 = 100.0;
const HOME_ABOVE_FLOOR: f32 = 150.0;

/// How far the dog may wander past the sides and vertical edges.
const OVERSCAN_X: f32 = 100.0;
const OVERSCAN_BOTTOM: f32 = 50.0;
const ABOVE_HORIZON: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DogState {
    #[default]
    Idle,
    Chasing,
    Catching,
    /// Unreachable through the current transitions; kept with Catching's behaviour.
    Retrieving,
    Dropping,
    Celebrating,
    Zoomies,
}

impl DogState {
    pub fn label(self) -> &'static str {
        match self {
            DogState::Idle => "Idle",
            DogState::Chasing => "Chasing",
            DogState::Catching => "Catching",
            DogState::Retrieving => "Retrieving",
            DogState::Dropping => "Dropping",
            DogState::Celebrating => "Celebrating",
            DogState::Zoomies => "Zoomies",
        }
    }

    /// States drawn in the four-legged running pose.
    pub fn is_standing(self) -> bool {
        matches!(self, DogState::Chasing | DogState::Zoomies)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Ground,
    Toy(ToyId),
}

/// Where the dog is heading and what it expects to find there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub pos: Vec2,
    pub kind: TargetKind,
}

impl Target {
    pub fn ground(pos: Vec2) -> Self {
        Self {
            pos,
            kind: TargetKind::Ground,
        }
    }

    pub fn toy(toy: &Toy) -> Self {
        Self {
            pos: toy.pos,
            kind: TargetKind::Toy(toy.id),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Dog {
    state: DogState,
    pub pos: Vec2,
    pub home: Vec2,
    pub target: Target,
    /// Horizontal stretch, multiplied into the facing flip.
    pub scale_x: f32,
    /// Vertical squash used for idle breathing.
    pub scale_y: f32,
    pub facing_right: bool,
    pub leg_phase: f32,
    pub play_timer: u32,
    /// 0 → 1 while dropping a toy.
    pub drop_progress: f32,
    pub dropped: bool,
    pub bark_timer: u32,
    pub zoomies_timer: u32,
    pub idle_timer: u32,
    pub petting_counter: u32,
    /// The toy in the dog's mouth, absent from the yard while held.
    pub held: Option<Toy>,
    placed: bool,
}

impl Dog {
    pub fn new() -> Self {
        Self {
            state: DogState::Idle,
            pos: Vec2::ZERO,
            home: Vec2::ZERO,
            target: Target::ground(Vec2::ZERO),
            scale_x: 1.0,
            scale_y: 1.0,
            facing_right: true,
            leg_phase: 0.0,
            play_timer: 0,
            drop_progress: 0.0,
            dropped: false,
            bark_timer: 0,
            zoomies_timer: 0,
            idle_timer: 0,
            petting_counter: 0,
            held: None,
            placed: false,
        }
    }

    pub fn state(&self) -> DogState {
        self.state
    }

    /// Put the dog at home the first time the viewport gets a size.
    pub fn place_home_once(&mut self, height: f32) {
        if self.placed {
            return;
        }
        let floor = horizon_y(height) - ABOVE_HORIZON;
        self.home = Vec2::new(HOME_X, (height - HOME_ABOVE_FLOOR).max(floor));
        self.pos = self.home;
        self.target = Target::ground(self.home);
        self.facing_right = true;
        self.placed = true;
    }

    pub(crate) fn enter(&mut self, state: DogState) {
        if state == self.state {
            return;
        }
        log::debug!("dog: {} -> {}", self.state.label(), state.label());
        if state == DogState::Idle {
            self.idle_timer = 0;
        }
        self.state = state;
    }

    /// Run to `target`. Target position and kind change together.
    pub fn fetch(&mut self, target: Target) {
        self.target = target;
        self.enter(DogState::Chasing);
    }

    /// Start zoomies towards a first random spot.
    pub fn start_zoomies(&mut self, first: Vec2) {
        log::info!("Zoomies!");
        self.zoomies_timer = ZOOMIES_FRAMES;
        self.target = Target::ground(first);
        self.enter(DogState::Zoomies);
    }

    /// Spit out the held toy `offset` px ahead and `drop_y` px below the dog,
    /// kept at least `margin` from the sides.
    pub fn release_toy(&mut self, offset: f32, drop_y: f32, margin: f32, width: f32) -> Option<Toy> {
        let mut toy = self.held.take()?;
        let ahead = if self.facing_right { offset } else { -offset };
        toy.pos = Vec2::new(
            clamp(self.pos.x + ahead, margin, width - margin),
            self.pos.y + drop_y,
        );
        Some(toy)
    }

    pub fn rescale(&mut self, ratio: Vec2) {
        self.pos *= ratio;
        self.home *= ratio;
        self.target.pos *= ratio;
        if let Some(toy) = &mut self.held {
            toy.pos *= ratio;
        }
    }

    /// Pull the dog, its home and its target back into the yard after a resize.
    /// Home shares the dog's bounds so it always stays reachable.
    pub fn clamp_to(&mut self, width: f32, height: f32) {
        let horizon = horizon_y(height);
        for p in [&mut self.pos, &mut self.home] {
            p.x = clamp(p.x, -OVERSCAN_X, width + OVERSCAN_X);
            p.y = clamp(p.y, horizon - ABOVE_HORIZON, height + OVERSCAN_BOTTOM);
        }
        self.target.pos.x = clamp(self.target.pos.x, 0.0, width);
        self.target.pos.y = clamp(self.target.pos.y, horizon, height);
    }
}

impl Default for Dog {
    fn default() -> Self {
        Self::new()
    }
}
