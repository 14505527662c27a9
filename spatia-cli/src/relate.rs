use std::time::{Duration, Instant};

use anyhow::Result;
use itertools::Itertools;
use log::{debug, info};

use spatia_rs::context::SpatialContext;
use spatia_rs::geometry::bulk::relate_pairs;
use spatia_rs::geometry::{Relate, SpatialRelation};
use spatia_rs::io::export::export_relations;
use spatia_rs::io::ext_repr::ExtInstance;
use spatia_rs::io::import::{Importer, Instance};

use crate::config::SpatialConfig;
use crate::io::output::RelationOutput;

/// An instance with all its pairs related
pub struct RelationRun {
    pub ctx: SpatialContext,
    pub instance: Instance,
    pub relations: Vec<SpatialRelation>,
    pub run_time: Duration,
}

impl RelationRun {
    pub fn new(ext_instance: &ExtInstance, config: &SpatialConfig) -> Result<Self> {
        let ctx = SpatialContext::new(config.context)?;
        let importer = Importer::new(ctx, config.contains_short_circuit);
        let instance = importer.import_instance(ext_instance)?;
        info!(
            "[RUN] relating {} pairs among {} shapes",
            instance.pairs.len(),
            instance.shapes.len()
        );

        let start = Instant::now();
        let relations = match config.parallel {
            true => relate_pairs(&instance.shapes, &instance.pairs, &ctx)?,
            false => instance
                .pairs
                .iter()
                .map(|&(a, b)| instance.shapes[a].relate(&instance.shapes[b], &ctx))
                .collect_vec(),
        };
        let run_time = start.elapsed();
        debug!("[RUN] related all pairs in {run_time:?}");

        Ok(RelationRun {
            ctx,
            instance,
            relations,
            run_time,
        })
    }

    /// Number of pairs per relation, in the order of first occurrence
    pub fn histogram(&self) -> Vec<(SpatialRelation, usize)> {
        let counts = self.relations.iter().counts();
        self.relations
            .iter()
            .unique()
            .map(|r| (*r, counts[r]))
            .collect_vec()
    }

    pub fn output(&self, ext_instance: ExtInstance, config: SpatialConfig) -> RelationOutput {
        RelationOutput {
            instance: ext_instance,
            relations: export_relations(&self.instance.pairs, &self.relations),
            config,
            run_time_ms: self.run_time.as_millis() as u64,
        }
    }
}
