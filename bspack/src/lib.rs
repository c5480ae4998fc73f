//! bspack is a small library for packing rectangles into a single,
//! fixed-size canvas. It was built for atlaspack, which combines many source
//! images into texture atlases.
//!
//! Packing works by recursively splitting the free space of the canvas into a
//! binary tree of rectangular regions. Items are placed largest first; each one
//! is settled into the first free region that can hold it, splitting that
//! region along the axis with the most leftover space.
//!
//! ## Example
//! ```
//! use bspack::{BspPacker, Size};
//!
//! // Anything implementing Sizable can be packed. Size is the simplest.
//! let my_items = vec![
//!     Size::new(128.0, 64.0),
//!     Size::new(64.0, 64.0),
//!     Size::new(1.0, 300.0),
//! ];
//!
//! // Construct a packer and configure it with your constraints
//! let packer = BspPacker::new((512.0, 512.0)).margin(2.0);
//!
//! // Either every item gets a place, or you get back the first item that
//! // didn't fit.
//! let placements = packer.pack(my_items).unwrap();
//! assert_eq!(placements.len(), 3);
//! ```

mod geometry;
mod packer;
mod types;

pub use geometry::*;
pub use packer::*;
pub use types::*;
