use glam::Vec2;

use super::{Dog, DogState, Target, TargetKind, BARK_FRAMES, PLAY_FRAMES};
use crate::particles::ParticleSystem;
use crate::toy::ToyBox;
use crate::util::geom::{distance, rand_range};
use crate::viewport::horizon_y;

/// Score for dropping a fetched toy or finishing zoomies.
pub const FETCH_REWARD: u32 = 5;
pub const ZOOMIES_REWARD: u32 = 5;

const CHASE_SPEED: f32 = 0.8;
const CHASE_TOLERANCE: f32 = 2.0;
const ZOOMIES_SPEED: f32 = 1.5;
const HOMEWARD_SPEED: f32 = 1.2;
const ZOOMIES_TOLERANCE: f32 = 5.0;
/// Pick a new zoomies spot once this close to the current one.
const RETARGET_DISTANCE: f32 = 20.0;
const HOME_ARRIVAL: f32 = 10.0;

const PLAY_HEART_EVERY: u32 = 15;
const ZOOMIES_HEART_EVERY: u32 = 10;
/// Hearts while playing appear around the head.
const HEAD_HEART_RISE: f32 = 120.0;
const HEAD_HEART_JITTER: f32 = 20.0;
const ZOOMIES_HEART_RISE: f32 = 60.0;

const DROP_STEP: f32 = 0.03;
const DROP_MIDPOINT: f32 = 0.5;
const DROP_AHEAD: f32 = 45.0;
const DROP_BELOW: f32 = 10.0;
const DROP_MARGIN: f32 = 50.0;

/// Idle frames before the dog turns around (~5s).
const IDLE_TURN_FRAMES: u32 = 300;
const BREATH_PERIOD_MS: f64 = 400.0;
const BREATH_DEPTH: f32 = 0.03;

/// Zoomies stay this far inside the yard.
const ZOOMIES_SIDE_MARGIN: f32 = 50.0;
const ZOOMIES_FLOOR_MARGIN: f32 = 20.0;

/// What the dog's update borrows from the rest of the scene.
pub struct Yard<'a> {
    pub toys: &'a mut ToyBox,
    pub particles: &'a mut ParticleSystem,
    pub rng: &'a mut fastrand::Rng,
    pub width: f32,
    pub height: f32,
}

/// Side effects of one update that the scene forwards to its sinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Step {
    pub reward: u32,
    pub entered: Option<DogState>,
}

impl Dog {
    /// Advance the state machine by one frame.
    pub fn update(&mut self, yard: &mut Yard<'_>, now_ms: f64) -> Step {
        let before = self.state;
        let mut reward = 0;

        match self.state {
            DogState::Idle => {
                self.scale_y = 1.0 + (now_ms / BREATH_PERIOD_MS).sin() as f32 * BREATH_DEPTH;
                self.idle_timer += 1;
                if self.idle_timer > IDLE_TURN_FRAMES {
                    self.facing_right = !self.facing_right;
                    self.idle_timer = 0;
                }
            }
            DogState::Chasing => {
                if self.move_to(self.target.pos, CHASE_SPEED, CHASE_TOLERANCE) {
                    self.arrive(yard.toys);
                }
            }
            DogState::Catching | DogState::Retrieving => {
                if self.state == DogState::Catching && self.play_timer % PLAY_HEART_EVERY == 0 {
                    let jitter = rand_range(yard.rng, -HEAD_HEART_JITTER, HEAD_HEART_JITTER);
                    yard.particles
                        .spawn_heart(Vec2::new(self.pos.x + jitter, self.pos.y - HEAD_HEART_RISE));
                }
                self.play_timer = self.play_timer.saturating_sub(1);
                if self.play_timer == 0 {
                    self.drop_progress = 0.0;
                    self.dropped = false;
                    self.enter(DogState::Dropping);
                }
            }
            DogState::Dropping => {
                self.drop_progress += DROP_STEP;
                if self.drop_progress >= DROP_MIDPOINT && !self.dropped {
                    if let Some(toy) =
                        self.release_toy(DROP_AHEAD, DROP_BELOW, DROP_MARGIN, yard.width)
                    {
                        yard.toys.put(toy);
                    }
                    self.dropped = true;
                    reward += FETCH_REWARD;
                }
                if self.drop_progress >= 1.0 {
                    self.bark();
                }
            }
            DogState::Celebrating => {
                self.bark_timer = self.bark_timer.saturating_sub(1);
                if self.bark_timer == 0 {
                    self.enter(DogState::Idle);
                }
            }
            DogState::Zoomies => {
                self.zoomies_timer = self.zoomies_timer.saturating_sub(1);
                if self.zoomies_timer > 0 {
                    if self.zoomies_timer % ZOOMIES_HEART_EVERY == 0 {
                        yard.particles
                            .spawn_heart(Vec2::new(self.pos.x, self.pos.y - ZOOMIES_HEART_RISE));
                    }
                    if distance(self.pos, self.target.pos) < RETARGET_DISTANCE {
                        self.target = Target::ground(zoomies_spot(yard.rng, yard.width, yard.height));
                    }
                    self.move_to(self.target.pos, ZOOMIES_SPEED, ZOOMIES_TOLERANCE);
                } else if distance(self.pos, self.home) < HOME_ARRIVAL {
                    reward += ZOOMIES_REWARD;
                    self.bark();
                } else {
                    self.move_to(self.home, HOMEWARD_SPEED, ZOOMIES_TOLERANCE);
                }
            }
        }

        Step {
            reward,
            entered: (self.state != before).then_some(self.state),
        }
    }

    /// Reached the chase target: pick up a collectible toy or give up.
    fn arrive(&mut self, toys: &mut ToyBox) {
        let TargetKind::Toy(id) = self.target.kind else {
            self.enter(DogState::Idle);
            return;
        };
        match toys.get(id).map(|t| t.kind) {
            Some(kind) if kind.is_collectible() => {
                log::debug!("picked up {:?} #{}", kind, id);
                self.held = toys.take(id);
                self.play_timer = PLAY_FRAMES;
                self.enter(DogState::Catching);
            }
            _ => self.enter(DogState::Idle),
        }
    }

    fn bark(&mut self) {
        self.bark_timer = BARK_FRAMES;
        self.enter(DogState::Celebrating);
    }
}

/// Random zoomies destination inside the grass.
pub fn zoomies_spot(rng: &mut fastrand::Rng, width: f32, height: f32) -> Vec2 {
    let top = horizon_y(height) + ZOOMIES_FLOOR_MARGIN;
    let floor = height - ZOOMIES_FLOOR_MARGIN;
    Vec2::new(
        rng.f32() * (width - 2.0 * ZOOMIES_SIDE_MARGIN) + ZOOMIES_SIDE_MARGIN,
        rng.f32() * (floor - top) + top,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toy::{Toy, ToyKind};

    const W: f32 = 1000.0;
    const H: f32 = 800.0;

    struct Rig {
        dog: Dog,
        toys: ToyBox,
        particles: ParticleSystem,
        rng: fastrand::Rng,
    }

    impl Rig {
        fn new() -> Self {
            let mut dog = Dog::new();
            dog.place_home_once(H);
            Self {
                dog,
                toys: ToyBox::new(),
                particles: ParticleSystem::new(),
                rng: fastrand::Rng::with_seed(7),
            }
        }

        fn step(&mut self) -> Step {
            let mut yard = Yard {
                toys: &mut self.toys,
                particles: &mut self.particles,
                rng: &mut self.rng,
                width: W,
                height: H,
            };
            self.dog.update(&mut yard, 0.0)
        }

        fn run_until(&mut self, state: DogState, limit: usize) -> u32 {
            let mut reward = 0;
            for _ in 0..limit {
                reward += self.step().reward;
                if self.dog.state() == state {
                    return reward;
                }
            }
            panic!("never reached {:?}, stuck in {:?}", state, self.dog.state());
        }
    }

    #[test]
    fn ground_fetch_ends_idle_on_the_spot() {
        let mut rig = Rig::new();
        let spot = Vec2::new(600.0, 500.0);
        rig.dog.fetch(Target::ground(spot));
        rig.run_until(DogState::Idle, 500);
        assert_eq!(rig.dog.pos, spot);
    }

    #[test]
    fn toy_fetch_round_trip() {
        let mut rig = Rig::new();
        let toy = Toy::new(2, ToyKind::Carrot, Vec2::new(500.0, 600.0));
        rig.toys.put(toy);
        rig.dog.fetch(Target::toy(&toy));

        rig.run_until(DogState::Catching, 500);
        assert!(!rig.toys.contains(2));
        assert_eq!(rig.dog.held.map(|t| t.id), Some(2));
        assert_eq!(rig.dog.play_timer, PLAY_FRAMES);

        rig.run_until(DogState::Dropping, 100);
        assert!(rig.dog.held.is_some());

        let reward = rig.run_until(DogState::Celebrating, 100);
        assert_eq!(reward, FETCH_REWARD);
        assert!(rig.toys.contains(2));
        assert!(rig.dog.held.is_none());
        assert_eq!(rig.dog.bark_timer, BARK_FRAMES);

        rig.run_until(DogState::Idle, 100);
    }

    #[test]
    fn toy_lives_in_exactly_one_place() {
        let mut rig = Rig::new();
        let toy = Toy::new(5, ToyKind::Bell, Vec2::new(300.0, 700.0));
        rig.toys.put(toy);
        rig.dog.fetch(Target::toy(&toy));
        for _ in 0..400 {
            rig.step();
            let in_yard = rig.toys.contains(5);
            let held = rig.dog.held.map(|t| t.id) == Some(5);
            assert!(in_yard ^ held);
        }
    }

    #[test]
    fn drop_reward_is_paid_once_even_without_a_toy() {
        let mut rig = Rig::new();
        rig.dog.play_timer = 1;
        rig.dog.enter(DogState::Catching);
        let reward = rig.run_until(DogState::Celebrating, 100);
        assert_eq!(reward, FETCH_REWARD);
    }

    #[test]
    fn retrieving_hands_over_to_dropping_quietly() {
        let mut rig = Rig::new();
        rig.dog.held = Some(Toy::new(3, ToyKind::Bone, rig.dog.pos));
        rig.dog.play_timer = 20;
        rig.dog.drop_progress = 0.7;
        rig.dog.dropped = true;
        rig.dog.enter(DogState::Retrieving);

        rig.run_until(DogState::Dropping, 100);
        assert_eq!(rig.dog.play_timer, 0);
        assert_eq!(rig.dog.drop_progress, 0.0);
        assert!(!rig.dog.dropped);
        assert!(rig.dog.held.is_some());
        assert!(rig.particles.hearts().is_empty());
    }

    #[test]
    fn chasing_the_play_button_gives_up() {
        let mut rig = Rig::new();
        rig.toys.ensure_play_button(rig.dog.home.y);
        let button = *rig.toys.get(crate::toy::PLAY_BUTTON_ID).unwrap();
        rig.dog.fetch(Target::toy(&button));
        rig.run_until(DogState::Idle, 200);
        assert!(rig.toys.contains(button.id));
        assert!(rig.dog.held.is_none());
    }

    #[test]
    fn vanished_toy_target_gives_up() {
        let mut rig = Rig::new();
        let toy = Toy::new(1, ToyKind::Ball, Vec2::new(200.0, 600.0));
        rig.dog.fetch(Target::toy(&toy));
        rig.run_until(DogState::Idle, 200);
        assert!(rig.dog.held.is_none());
    }

    #[test]
    fn zoomies_end_at_home_with_a_reward() {
        let mut rig = Rig::new();
        let first = zoomies_spot(&mut rig.rng, W, H);
        rig.dog.start_zoomies(first);
        assert_eq!(rig.dog.zoomies_timer, super::super::ZOOMIES_FRAMES);

        let reward = rig.run_until(DogState::Celebrating, 2000);
        assert_eq!(reward, ZOOMIES_REWARD);
        assert_eq!(rig.dog.zoomies_timer, 0);
        assert!(distance(rig.dog.pos, rig.dog.home) < HOME_ARRIVAL);
        assert!(!rig.particles.hearts().is_empty());
    }

    #[test]
    fn zoomies_targets_stay_in_the_grass() {
        let mut rng = fastrand::Rng::with_seed(11);
        for _ in 0..500 {
            let p = zoomies_spot(&mut rng, W, H);
            assert!(p.x >= 50.0 && p.x <= W - 50.0);
            assert!(p.y >= horizon_y(H) + 20.0 && p.y <= H - 20.0);
        }
    }

    #[test]
    fn idle_turns_around_every_five_seconds() {
        let mut rig = Rig::new();
        let facing = rig.dog.facing_right;
        for _ in 0..IDLE_TURN_FRAMES {
            rig.step();
        }
        assert_eq!(rig.dog.facing_right, facing);
        rig.step();
        assert_eq!(rig.dog.facing_right, !facing);
        assert_eq!(rig.dog.idle_timer, 0);
    }

    #[test]
    fn step_reports_transitions() {
        let mut rig = Rig::new();
        assert_eq!(rig.step().entered, None);
        rig.dog.fetch(Target::ground(rig.dog.pos + Vec2::new(1.0, 0.0)));
        assert_eq!(rig.step().entered, Some(DogState::Idle));
    }

    #[test]
    fn catching_emits_hearts() {
        let mut rig = Rig::new();
        rig.dog.play_timer = PLAY_FRAMES;
        rig.dog.enter(DogState::Catching);
        for _ in 0..PLAY_FRAMES {
            rig.step();
        }
        assert_eq!(rig.particles.hearts().len(), 4);
    }
}
