//! Pointer → petting zone, in the dog's facing-corrected local frame.

use glam::Vec2;

use crate::dog::{Dog, DogState, MICRO};
use crate::util::geom::distance;

/// Beyond this screen distance from the dog nothing is being petted.
const REACH: f32 = 150.0;

/// Where on the dog the pointer rests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Zone {
    #[default]
    None,
    Head,
    LeftEar,
    RightEar,
    Back,
}

impl Zone {
    pub fn is_active(self) -> bool {
        self != Zone::None
    }
}

/// Classify `pointer` against the dog. Only an idle dog can be petted.
pub fn classify(dog: &Dog, pointer: Vec2) -> Zone {
    if dog.state() != DogState::Idle || distance(pointer, dog.pos) > REACH {
        return Zone::None;
    }
    let facing = if dog.facing_right { 1.0 } else { -1.0 };
    let d = pointer - dog.pos;
    let local = Vec2::new(d.x / facing, d.y) / MICRO;
    zone_at(local)
}

/// Zone boxes in dog cells, x forward, y up-is-negative.
fn zone_at(l: Vec2) -> Zone {
    if (-20.0..=36.0).contains(&l.x) && (-120.0..=-60.0).contains(&l.y) {
        if l.y >= -100.0 {
            Zone::Head
        } else if l.x < 0.0 {
            Zone::LeftEar
        } else if l.x > 16.0 {
            Zone::RightEar
        } else {
            Zone::Head
        }
    } else if (-60.0..=-20.0).contains(&l.x) && (-40.0..=50.0).contains(&l.y) {
        Zone::Back
    } else {
        Zone::None
    }
}
