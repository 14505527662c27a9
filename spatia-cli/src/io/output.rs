use serde::{Deserialize, Serialize};

use spatia_rs::io::ext_repr::{ExtInstance, ExtRelation};

use crate::config::SpatialConfig;

/// Everything written to the output folder after a run
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RelationOutput {
    pub instance: ExtInstance,
    pub relations: Vec<ExtRelation>,
    pub config: SpatialConfig,
    /// Time spent relating all pairs, in milliseconds
    pub run_time_ms: u64,
}
