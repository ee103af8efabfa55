//! Footer band handling
//!
//! 1. Locate the footer asset, falling back through known folders
//! 2. Load it (PDF page or raster), or synthesize a placeholder
//! 3. Composite it onto the tiled page and stamp the roll metadata

mod asset;
mod compose;
mod locate;
mod simple;

pub use asset::{FooterAsset, FooterSource};
pub use compose::{ComposeReport, TextOutcome, TextScheme, compose_footer, footer_height, place_fields};
pub use locate::{footer_search_paths, locate_footer};
pub use simple::generate_simple_footer;
