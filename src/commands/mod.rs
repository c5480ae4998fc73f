mod fit;
mod pack;
mod remap;

pub use fit::*;
pub use pack::*;
pub use remap::*;
