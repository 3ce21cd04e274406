use panelnest::entities::NestingOutput;
use serde::{Deserialize, Serialize};

use crate::config::CliConfig;
use crate::io::ext_repr::ExtNestingInstance;

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NestingOutputFile {
    #[serde(flatten)]
    pub instance: ExtNestingInstance,
    pub config: CliConfig,
    /// Seconds between program start and the end of the optimization
    pub run_time_sec: f64,
    #[serde(flatten)]
    pub output: NestingOutput,
}
