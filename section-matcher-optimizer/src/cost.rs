use core::num::NonZeroU32;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SCALE: u32 = 100;

/// Turns a positive preference into an edge cost. Stronger preferences are cheaper.
///
/// Zero preferences never get here, the network has no edge for them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CostFunction {
    /// `scale / preference`, rounded half up.
    Reciprocal { scale: u32 },
    /// `ceiling - preference`, never below zero.
    Linear { ceiling: u32 },
}

impl Default for CostFunction {
    fn default() -> Self {
        Self::Reciprocal {
            scale: DEFAULT_SCALE,
        }
    }
}

impl CostFunction {
    #[must_use]
    pub fn cost(self, preference: NonZeroU32) -> i64 {
        let preference = u64::from(preference.get());
        match self {
            Self::Reciprocal { scale } => {
                let cost = (2 * u64::from(scale) + preference) / (2 * preference);
                i64::try_from(cost).unwrap_or(i64::MAX)
            }
            Self::Linear { ceiling } => {
                i64::try_from(u64::from(ceiling).saturating_sub(preference)).unwrap_or(i64::MAX)
            }
        }
    }
}
