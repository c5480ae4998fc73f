use bspack::Rect;
use serde::{Deserialize, Serialize};

/// Maps texture coordinates of a source image onto the region it was packed
/// into, so that meshes can sample the atlas instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvTransform {
    pub scale: (f64, f64),
    pub offset: (f64, f64),
}

impl UvTransform {
    pub fn for_rect(rect: Rect, atlas_size: (f64, f64)) -> Self {
        Self {
            scale: (rect.width / atlas_size.0, rect.height / atlas_size.1),
            offset: (rect.x / atlas_size.0, rect.y / atlas_size.1),
        }
    }

    pub fn apply(&self, uv: (f64, f64)) -> (f64, f64) {
        (
            uv.0 * self.scale.0 + self.offset.0,
            uv.1 * self.scale.1 + self.offset.1,
        )
    }
}
