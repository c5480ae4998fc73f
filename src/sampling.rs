use bspack::approx_eq;
use serde::{Deserialize, Serialize};

/// How a source image has to be resampled to fill its quad in the atlas.
///
/// atlaspack doesn't rasterize anything itself; this is a hint for whatever
/// renderer draws the atlas, so that it can pick a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sampling {
    /// The quad is the same size as the source, so pixels can be copied.
    None,

    /// The quad is smaller than the source in at least one dimension.
    Down,

    /// The quad is larger than the source.
    Up,
}

impl Sampling {
    pub fn classify(source_size: (f64, f64), quad_size: (f64, f64)) -> Self {
        if approx_eq(source_size.0, quad_size.0) && approx_eq(source_size.1, quad_size.1) {
            Sampling::None
        } else if quad_size.0 < source_size.0 || quad_size.1 < source_size.1 {
            Sampling::Down
        } else {
            Sampling::Up
        }
    }
}
