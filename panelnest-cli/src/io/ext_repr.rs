use panelnest::entities::PartSpec;
use serde::{Deserialize, Serialize};

/// External representation of a cutting list
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtNestingInstance {
    /// The name of the instance
    pub name: String,
    /// Parts to be cut
    pub parts: Vec<PartSpec>,
}
