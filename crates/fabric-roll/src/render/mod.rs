//! PDF rendering for roll pages
//!
//! This module handles all lopdf-specific work:
//! - Building the tiled page around a shared image XObject
//! - Turning footer PDF pages into Form XObjects
//! - Appending content and resources to an existing page

mod page;
mod xobject;

pub use page::*;
pub(crate) use page::num;
pub use xobject::{copy_object_deep, create_page_xobject, page_box};
