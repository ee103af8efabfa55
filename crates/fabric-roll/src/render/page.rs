//! Tiled page rendering
//!
//! Builds a single-page document whose content draws one shared image
//! XObject at every tile rectangle, plus helpers for adding content to that
//! page afterwards.

use crate::layout::{Rect, TileSet};
use crate::raster::RasterXObject;
use crate::types::{Result, Template};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Resource name of the shared tile image
pub const TILE_XOBJECT_NAME: &str = "Tile";

/// A one-page document and the page it holds
#[derive(Debug)]
pub struct TiledPage {
    pub document: Document,
    pub page_id: ObjectId,
    pub template: Template,
    /// Number of image placements drawn
    pub tile_count: usize,
}

// =============================================================================
// Public API
// =============================================================================

/// Render a tile set onto a new page the size of `template`.
///
/// The raster is stored once and referenced by every tile. Truncated tiles
/// (clip policy) are drawn at full size inside a clipping rectangle so the
/// image is cut rather than squashed.
pub fn render_tiled_page(
    tile_set: &TileSet,
    template: Template,
    raster: &RasterXObject,
) -> Result<TiledPage> {
    let mut document = Document::with_version("1.7");
    let pages_tree_id = document.new_object_id();

    let image_id = document.add_object(raster.to_stream());
    let mut xobjects = Dictionary::new();
    xobjects.set(TILE_XOBJECT_NAME, Object::Reference(image_id));

    let mut content = String::new();
    for tile in &tile_set.tiles {
        content.push_str(&placement_command(tile_set, tile, template.height));
    }
    let content_id = document.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let page_id = document.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Page".to_vec())),
        ("Parent", Object::Reference(pages_tree_id)),
        ("MediaBox", media_box(template)),
        ("Resources", Object::Dictionary(resources)),
        ("Contents", Object::Reference(content_id)),
    ]));

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(vec![Object::Reference(page_id)])),
        ("Count", Object::Integer(1)),
    ]);
    document
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = document.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));
    document.trailer.set("Root", catalog_id);

    Ok(TiledPage {
        document,
        page_id,
        template,
        tile_count: tile_set.len(),
    })
}

/// Append a content stream to a page, after any existing content
pub fn append_page_content(doc: &mut Document, page_id: ObjectId, content: Vec<u8>) -> Result<()> {
    let stream_id = doc.add_object(Stream::new(Dictionary::new(), content));
    let page = doc.get_dictionary_mut(page_id)?;

    let contents = match page.get(b"Contents") {
        Ok(Object::Reference(existing)) => Object::Array(vec![
            Object::Reference(*existing),
            Object::Reference(stream_id),
        ]),
        Ok(Object::Array(existing)) => {
            let mut refs = existing.clone();
            refs.push(Object::Reference(stream_id));
            Object::Array(refs)
        }
        _ => Object::Reference(stream_id),
    };
    page.set("Contents", contents);
    Ok(())
}

/// Register a named resource (e.g. `XObject`, `Font`) on a page
pub fn add_page_resource(
    doc: &mut Document,
    page_id: ObjectId,
    category: &str,
    name: &str,
    value: Object,
) -> Result<()> {
    let shared_resources = match doc.get_dictionary(page_id)?.get(b"Resources") {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    };

    let resources = match shared_resources {
        Some(id) => doc.get_dictionary_mut(id)?,
        None => {
            let page = doc.get_dictionary_mut(page_id)?;
            if !page.has(b"Resources") {
                page.set("Resources", Dictionary::new());
            }
            page.get_mut(b"Resources")?.as_dict_mut()?
        }
    };

    if !resources.has(category.as_bytes()) {
        resources.set(category, Dictionary::new());
    }
    resources
        .get_mut(category.as_bytes())?
        .as_dict_mut()?
        .set(name, value);
    Ok(())
}

/// Add the built-in Helvetica font (WinAnsi encoded) and return its ID
pub fn add_helvetica(doc: &mut Document) -> ObjectId {
    doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
        ("Encoding", Object::Name(b"WinAnsiEncoding".to_vec())),
    ]))
}

/// MediaBox array for a template
pub fn media_box(template: Template) -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Real(template.width as f32),
        Object::Real(template.height as f32),
    ])
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Content stream command drawing the tile image into one tile rectangle.
fn placement_command(tile_set: &TileSet, tile: &Rect, page_height: f64) -> String {
    // The image always spans a full tile; its top edge sits at the tile's top
    let image_y = page_height - tile.y - tile_set.tile_height;

    if tile_set.is_truncated(tile) {
        format!(
            "q {} {} {} {} re W n {} 0 0 {} {} {} cm /{} Do Q\n",
            num(tile.x),
            num(tile.pdf_y(page_height)),
            num(tile.width),
            num(tile.height),
            num(tile_set.tile_width),
            num(tile_set.tile_height),
            num(tile.x),
            num(image_y),
            TILE_XOBJECT_NAME
        )
    } else {
        format!(
            "q {} 0 0 {} {} {} cm /{} Do Q\n",
            num(tile.width),
            num(tile.height),
            num(tile.x),
            num(image_y),
            TILE_XOBJECT_NAME
        )
    }
}

/// Format a coordinate for a content stream
pub(crate) fn num(value: f64) -> String {
    let formatted = format!("{:.4}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}
