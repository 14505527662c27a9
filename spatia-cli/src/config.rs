use serde::{Deserialize, Serialize};

use spatia_rs::util::SpatialContextConfig;

use crate::io::svg_export::SvgDrawOptions;

/// Configuration for the command-line front end
#[derive(Debug, Serialize, Deserialize, Clone, Copy)]
pub struct SpatialConfig {
    /// Coordinate model, distance formula and world bounds
    pub context: SpatialContextConfig,
    /// Relate all pairs in parallel
    pub parallel: bool,
    /// Stop relating a collection's members at the first one containing the other shape
    pub contains_short_circuit: bool,
    /// Optional SVG drawing options. No SVG is written when absent.
    #[serde(default)]
    pub svg_draw_options: Option<SvgDrawOptions>,
}

impl Default for SpatialConfig {
    fn default() -> Self {
        Self {
            context: SpatialContextConfig::default(),
            parallel: true,
            contains_short_circuit: true,
            svg_draw_options: Some(SvgDrawOptions::default()),
        }
    }
}
