use glam::Vec2;

/// Clamp `value` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics when the bounds cross (tiny
/// viewports can produce `min > max`); `min` wins in that case.
#[inline]
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Uniform sample in `[min, max)` from the shared RNG.
#[inline]
pub fn rand_range(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_inside_and_outside() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-3.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(12.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn clamp_crossed_bounds_prefers_min() {
        assert_eq!(clamp(5.0, 30.0, 20.0), 30.0);
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn rand_range_stays_in_range() {
        let mut rng = fastrand::Rng::with_seed(7);
        for _ in 0..1000 {
            let v = rand_range(&mut rng, 15.0, 40.0);
            assert!((15.0..40.0).contains(&v));
        }
    }
}
