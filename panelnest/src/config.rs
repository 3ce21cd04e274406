use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::entities::SheetSize;

/// Configuration of a nesting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NestConfig {
    /// Stock sheet every material group is nested onto
    pub sheet_size: SheetSize,
    /// Only parts of this material type are nested. `None` or `"all"` disables the filter
    pub material_filter: Option<String>,
    /// Name of the placement strategy, see [`StrategyKind`](crate::opt::strategy::StrategyKind)
    pub strategy: String,
    /// Seed for the PRNG. If undefined, the randomized strategies run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
}

impl NestConfig {
    pub fn rng(&self) -> SmallRng {
        match self.prng_seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        }
    }
}

impl Default for NestConfig {
    fn default() -> Self {
        Self {
            sheet_size: SheetSize::STANDARD,
            material_filter: None,
            strategy: "rectangle".to_string(),
            prng_seed: Some(0),
        }
    }
}
