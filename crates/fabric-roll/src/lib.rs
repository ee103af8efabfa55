pub mod constants;
mod environment;
pub mod footer;
mod generate;
mod io;
pub mod layout;
mod options;
pub mod raster;
pub mod render;
mod types;

pub use environment::verify_directories;
pub use generate::*;
pub use io::{AtomicWriter, OutputWriter, document_to_bytes, sibling_with_suffix};
pub use layout::{Rect, Tile, TileSet, compute_tile_set};
pub use options::*;
pub use types::*;
