//! Form XObject creation
//!
//! A footer PDF is embedded by copying its first page into the output
//! document as a Form XObject, which the compositor then places with a
//! scaling matrix.

use crate::layout::Rect;
use crate::types::{Result, RollError};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Maximum page tree depth searched for inherited attributes
const MAX_TREE_DEPTH: usize = 32;

/// Wrap a page of `source` as a Form XObject inside `output`.
///
/// The BBox is the page's MediaBox and the page resources (inherited ones
/// included) are copied along with everything they reference.
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
) -> Result<ObjectId> {
    let bounds = page_box(source, page_id)?;
    // Decoded and concatenated when the page has several content streams
    let content = source.get_page_content(page_id)?;

    let bbox = [bounds.x, bounds.y, bounds.right(), bounds.bottom()]
        .into_iter()
        .map(|v| Object::Real(v as f32))
        .collect();

    let mut form = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Form".to_vec())),
        ("FormType", Object::Integer(1)),
        ("BBox", Object::Array(bbox)),
    ]);

    let page = source.get_dictionary(page_id)?;
    if let Some(resources) = inherited(source, page, b"Resources") {
        let copied = copy_object_deep(output, source, resources)?;
        form.set("Resources", copied);
    }

    Ok(output.add_object(Stream::new(form, content)))
}

/// Copy `obj` from `source` into `output`, following references.
///
/// Every referenced object is copied at most once. `Parent` links are
/// dropped so a page's resources never pull in its page tree.
pub fn copy_object_deep(output: &mut Document, source: &Document, obj: &Object) -> Result<Object> {
    ObjectCopier {
        output,
        source,
        copied: HashMap::new(),
    }
    .copy(obj)
}

struct ObjectCopier<'a> {
    output: &'a mut Document,
    source: &'a Document,
    /// Source ID -> ID in `output`
    copied: HashMap<ObjectId, ObjectId>,
}

impl ObjectCopier<'_> {
    fn copy(&mut self, obj: &Object) -> Result<Object> {
        Ok(match obj {
            Object::Reference(id) => Object::Reference(self.copy_reference(*id)?),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(dict)?),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy(item))
                    .collect::<Result<Vec<_>>>()?,
            ),
            Object::Stream(stream) => {
                let dict = self.copy_dictionary(&stream.dict)?;
                let mut copy = Stream::new(dict, stream.content.clone());
                copy.allows_compression = stream.allows_compression;
                Object::Stream(copy)
            }
            other => other.clone(),
        })
    }

    fn copy_reference(&mut self, id: ObjectId) -> Result<ObjectId> {
        if let Some(&existing) = self.copied.get(&id) {
            return Ok(existing);
        }

        // Registered before recursing so reference cycles terminate
        let target = self.output.new_object_id();
        self.copied.insert(id, target);

        let source = self.source;
        let copy = self.copy(source.get_object(id)?)?;
        self.output.objects.insert(target, copy);
        Ok(target)
    }

    fn copy_dictionary(&mut self, dict: &Dictionary) -> Result<Dictionary> {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter().filter(|(key, _)| key.as_slice() != b"Parent") {
            copy.set(key.clone(), self.copy(value)?);
        }
        Ok(copy)
    }
}

/// Page MediaBox as a rectangle in PDF user space.
///
/// `y` is the lower edge and `bottom()` the upper one; the MediaBox may be
/// inherited from an ancestor in the page tree.
pub fn page_box(doc: &Document, page_id: ObjectId) -> Result<Rect> {
    let page = doc.get_dictionary(page_id)?;
    let media_box = inherited(doc, page, b"MediaBox")
        .and_then(|obj| obj.as_array().ok())
        .ok_or_else(|| RollError::Footer("page has no MediaBox".to_string()))?;

    let coords: Vec<f64> = media_box.iter().filter_map(as_number).collect();
    let &[x0, y0, x1, y1] = coords.as_slice() else {
        return Err(RollError::Footer(format!(
            "malformed MediaBox with {} numeric entries",
            coords.len()
        )));
    };

    let (left, lower) = (x0.min(x1), y0.min(y1));
    Ok(Rect::new(left, lower, x0.max(x1) - left, y0.max(y1) - lower))
}

/// Look up a page attribute, walking up the page tree for inheritable keys
fn inherited<'a>(doc: &'a Document, page: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    let mut node = page;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return match value {
                Object::Reference(id) => doc.get_object(*id).ok(),
                other => Some(other),
            };
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }
    None
}

fn as_number(obj: &Object) -> Option<f64> {
    match obj {
        Object::Integer(i) => Some(*i as f64),
        Object::Real(r) => Some(*r as f64),
        _ => None,
    }
}
