//! Layout calculation for tiled roll pages
//!
//! All geometry here uses a top-left origin with y growing downward, the
//! same convention the footer offsets are expressed in. Conversion to PDF
//! user space happens in `render`.

mod tiling;
mod types;

pub use tiling::*;
pub use types::*;
