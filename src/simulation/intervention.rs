//! Interventions applied to a colony from outside the tick loop.

use rand::Rng;
use rand::seq::index;
use serde::{Deserialize, Serialize};

use super::event_log::EventKind;
use super::mouse::Mouse;

/// An external change to the colony.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intervention {
    /// Keeps a uniformly random `floor(len * keep_fraction)` mice and removes
    /// the rest. Survivors keep their relative order. The fraction is clamped
    /// to [0, 1].
    Cull {
        /// Share of the colony that survives.
        keep_fraction: f64,
    },
    /// Returns every mouse to idle, dropping pending litters.
    EndPregnancies,
}

impl Intervention {
    /// Applies the intervention to `mice`, returning the new colony and the
    /// event describing what changed.
    pub fn apply<R: Rng>(self, mut mice: Vec<Mouse>, rng: &mut R) -> (Vec<Mouse>, EventKind) {
        match self {
            Intervention::Cull { keep_fraction } => {
                let len = mice.len();
                let keep = ((len as f64) * keep_fraction.clamp(0.0, 1.0)).floor() as usize;
                let keep = keep.min(len);

                let mut chosen = index::sample(rng, len, keep).into_vec();
                chosen.sort_unstable();

                let mut kept = Vec::with_capacity(keep);
                let mut next = chosen.into_iter().peekable();
                for (i, mouse) in mice.into_iter().enumerate() {
                    if next.peek() == Some(&i) {
                        next.next();
                        kept.push(mouse);
                    }
                }
                (kept, EventKind::Cull { removed: len - keep })
            }
            Intervention::EndPregnancies => {
                let mut ended = 0;
                for mouse in &mut mice {
                    if mouse.is_pregnant() {
                        mouse.end_pregnancy();
                        ended += 1;
                    }
                }
                (mice, EventKind::PregnanciesEnded { ended })
            }
        }
    }
}
