use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::Grain;
use crate::geometry::Orientation;

/// Returns true if placing a part with `grain` in `orientation` keeps its texture aligned as required.
pub fn is_legal(grain: Grain, orientation: Orientation) -> bool {
    match grain {
        Grain::None => true,
        Grain::Length => orientation == Orientation::Normal,
        Grain::Width => orientation == Orientation::Rotated,
    }
}

/// The orientation dictated by the grain, `None` if either orientation is fine.
pub fn mandated_orientation(grain: Grain) -> Option<Orientation> {
    match grain {
        Grain::None => None,
        Grain::Length => Some(Orientation::Normal),
        Grain::Width => Some(Orientation::Rotated),
    }
}

/// Orientations which can only be used by violating the grain.
pub fn violating_orientations(grain: Grain) -> &'static [Orientation] {
    match grain {
        Grain::None => &[],
        Grain::Length => &[Orientation::Rotated],
        Grain::Width => &[Orientation::Normal],
    }
}

/// Whether a strategy may place a part against its grain after all legal orientations failed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum GrainFallback {
    Never,
    /// Always retried with grain ignored
    OnFailure,
    /// Retried with grain ignored with the given probability
    Probabilistic(f64),
}

impl GrainFallback {
    pub fn permits(&self, rng: &mut impl Rng) -> bool {
        match *self {
            GrainFallback::Never => false,
            GrainFallback::OnFailure => true,
            GrainFallback::Probabilistic(p) => rng.random_bool(p.clamp(0.0, 1.0)),
        }
    }
}
