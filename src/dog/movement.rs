use glam::Vec2;

use super::Dog;

/// Base run speed, px/frame.
pub(super) const BASE_SPEED: f32 = 9.0;
/// Vertical steps are damped so the dog reads as moving across the ground plane.
const VERTICAL_DAMPING: f32 = 0.7;
/// Leg phase advanced per frame at 1× speed.
const LEG_STEP: f32 = 0.3;
/// Facing only changes on a meaningful horizontal delta.
const TURN_THRESHOLD: f32 = 1.0;

impl Dog {
    /// One straight-line step toward `target`. Returns true on arrival, in
    /// which case the dog sits exactly on the target.
    pub(super) fn move_to(&mut self, target: Vec2, speed_mult: f32, tolerance: f32) -> bool {
        let delta = target - self.pos;
        let dist = delta.length();
        if delta.x.abs() > TURN_THRESHOLD {
            self.facing_right = delta.x > 0.0;
        }
        self.scale_y = 1.0;

        let speed = BASE_SPEED * speed_mult;
        if dist <= tolerance || dist < speed {
            self.pos = target;
            self.leg_phase = 0.0;
            return true;
        }

        let dir = delta / dist;
        self.pos.x += dir.x * speed;
        self.pos.y += dir.y * speed * VERTICAL_DAMPING;
        self.leg_phase += LEG_STEP * speed_mult;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_at_base_speed_with_damped_vertical() {
        let mut dog = Dog::new();
        dog.pos = Vec2::new(0.0, 0.0);
        let arrived = dog.move_to(Vec2::new(30.0, 40.0), 1.0, 2.0);
        assert!(!arrived);
        assert!((dog.pos.x - 9.0 * 0.6).abs() < 1e-4);
        assert!((dog.pos.y - 9.0 * 0.8 * 0.7).abs() < 1e-4);
        assert!((dog.leg_phase - 0.3).abs() < 1e-6);
    }

    #[test]
    fn snaps_when_closer_than_one_step() {
        let mut dog = Dog::new();
        dog.leg_phase = 4.0;
        let target = Vec2::new(5.0, 3.0);
        assert!(dog.move_to(target, 1.0, 2.0));
        assert_eq!(dog.pos, target);
        assert_eq!(dog.leg_phase, 0.0);
    }

    #[test]
    fn snaps_within_tolerance() {
        let mut dog = Dog::new();
        let target = Vec2::new(4.0, 0.0);
        assert!(dog.move_to(target, 0.1, 5.0));
        assert_eq!(dog.pos, target);
    }

    #[test]
    fn facing_follows_horizontal_delta() {
        let mut dog = Dog::new();
        dog.pos = Vec2::new(100.0, 0.0);
        dog.move_to(Vec2::new(0.0, 0.0), 1.0, 2.0);
        assert!(!dog.facing_right);
        // Straight down keeps the previous facing.
        dog.move_to(Vec2::new(dog.pos.x + 0.5, 200.0), 1.0, 2.0);
        assert!(!dog.facing_right);
    }

    #[test]
    fn always_arrives() {
        let mut dog = Dog::new();
        let target = Vec2::new(-317.0, 211.0);
        let mut frames = 0;
        while !dog.move_to(target, 0.8, 2.0) {
            frames += 1;
            assert!(frames < 1000);
        }
        assert_eq!(dog.pos, target);
    }
}
