//! Happiness score and the two narrow interfaces the presentation layer observes.

use crate::dog::DogState;

/// Score ceiling.
pub const MAX_SCORE: u32 = 99_999;

/// Result of one score mutation, post-clamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreChange {
    pub old: u32,
    pub new: u32,
}

impl ScoreChange {
    /// True when the score moved into a higher multiple of ten. Jumps that skip
    /// several multiples still count once.
    pub fn crossed_ten(&self) -> bool {
        self.new / 10 > self.old / 10
    }
}

/// Receives score increments from the simulation.
pub trait ScoreSink {
    /// Add `amount`, clamp to [`MAX_SCORE`], and report the change.
    fn add_score(&mut self, amount: u32) -> ScoreChange;
}

/// Receives dog state changes for display. The simulation keeps its own copy.
pub trait StateSink {
    fn set_dog_state(&mut self, state: DogState);
}

/// Monotonic, clamped score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Happiness {
    value: u32,
}

impl Happiness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn is_maxed(&self) -> bool {
        self.value >= MAX_SCORE
    }
}

impl ScoreSink for Happiness {
    fn add_score(&mut self, amount: u32) -> ScoreChange {
        let old = self.value;
        self.value = old.saturating_add(amount).min(MAX_SCORE);
        ScoreChange {
            old,
            new: self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_decreases_never_exceeds_max() {
        let mut rng = fastrand::Rng::with_seed(42);
        let mut score = Happiness::new();
        let mut last = 0;
        for _ in 0..20_000 {
            let amount = match rng.u8(0..4) {
                0 => 0,
                1 => 1,
                2 => 5,
                _ => rng.u32(0..5_000),
            };
            let change = score.add_score(amount);
            assert_eq!(change.old, last);
            assert!(change.new >= change.old);
            assert!(change.new <= MAX_SCORE);
            last = change.new;
        }
        assert!(score.is_maxed());
    }

    #[test]
    fn huge_additions_saturate() {
        let mut score = Happiness::new();
        assert_eq!(score.add_score(u32::MAX).new, MAX_SCORE);
        assert_eq!(score.add_score(u32::MAX).new, MAX_SCORE);
    }

    #[test]
    fn eight_plus_five_crosses_ten() {
        let mut score = Happiness::new();
        score.add_score(8);
        let change = score.add_score(5);
        assert_eq!(change, ScoreChange { old: 8, new: 13 });
        assert!(change.crossed_ten());
    }

    #[test]
    fn jump_of_exactly_ten_crosses_once() {
        assert!(ScoreChange { old: 5, new: 15 }.crossed_ten());
        assert!(ScoreChange { old: 9, new: 10 }.crossed_ten());
        assert!(!ScoreChange { old: 10, new: 19 }.crossed_ten());
        assert!(!ScoreChange { old: 20, new: 20 }.crossed_ten());
    }

    #[test]
    fn multi_boundary_jump_is_a_single_trigger() {
        // One ScoreChange, one bool: 3 -> 47 crosses 10, 20, 30, 40 but reports once.
        assert!(ScoreChange { old: 3, new: 47 }.crossed_ten());
    }

    #[test]
    fn clamped_at_max_does_not_cross() {
        let mut score = Happiness::new();
        score.add_score(99_995);
        let change = score.add_score(10);
        assert_eq!(change.new, MAX_SCORE);
        assert!(!change.crossed_ten());
    }
}
