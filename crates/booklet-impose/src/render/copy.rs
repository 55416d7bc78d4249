//! Copying pages between documents
//!
//! Pages are moved into a block document unchanged: the page dictionary,
//! its content streams and everything they reference are deep copied.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};

/// Page attributes a page may inherit from its ancestors in the page tree
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guard against malformed page trees whose Parent chain loops
const MAX_TREE_DEPTH: usize = 64;

/// Maps source objects to their copies in one output document
#[derive(Debug, Default)]
pub struct CopyContext {
    /// Source object ID -> output object ID
    copied: HashMap<ObjectId, ObjectId>,
    /// Source pages outside the current block; references to them become null
    foreign_pages: HashSet<ObjectId>,
}

impl CopyContext {
    /// Create a context for copying `included` pages out of a document whose
    /// pages are `all_pages`.
    ///
    /// Output IDs for the included pages are reserved up front so links
    /// between pages of the same block survive the copy.
    pub fn new(output: &mut Document, all_pages: &[ObjectId], included: &[ObjectId]) -> Self {
        let mut copied = HashMap::new();
        for &page_id in included {
            copied
                .entry(page_id)
                .or_insert_with(|| output.new_object_id());
        }
        let foreign_pages = all_pages
            .iter()
            .filter(|id| !copied.contains_key(*id))
            .copied()
            .collect();
        Self {
            copied,
            foreign_pages,
        }
    }

    /// Output ID reserved for a source page
    pub fn page_id(&self, source_page: ObjectId) -> Option<ObjectId> {
        self.copied.get(&source_page).copied()
    }
}

// =============================================================================
// Page Copy
// =============================================================================

/// Copy a source page into `output` under `parent_id`.
///
/// Inherited attributes are resolved and written onto the copy, since the
/// copy hangs off a different page tree.
pub fn copy_page(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    parent_id: ObjectId,
    ctx: &mut CopyContext,
) -> Result<ObjectId> {
    let new_id = match ctx.page_id(page_id) {
        Some(id) => id,
        None => {
            let id = output.new_object_id();
            ctx.copied.insert(page_id, id);
            id
        }
    };

    let page_dict = source.get_dictionary(page_id)?;
    let mut new_dict = Dictionary::new();

    for (key, value) in page_dict.iter() {
        if key.as_slice() == b"Parent" {
            continue;
        }
        new_dict.set(key.clone(), copy_object_deep(output, source, value, ctx)?);
    }

    for key in INHERITABLE_KEYS {
        if new_dict.has(key) {
            continue;
        }
        if let Some(value) = inherited_attribute(source, page_dict, key) {
            new_dict.set(key.to_vec(), copy_object_deep(output, source, value, ctx)?);
        }
    }

    new_dict.set("Parent", Object::Reference(parent_id));
    output.objects.insert(new_id, Object::Dictionary(new_dict));
    Ok(new_id)
}

/// Look up `key` on a page or the nearest ancestor that defines it
fn inherited_attribute<'a>(
    doc: &'a Document,
    page_dict: &'a Dictionary,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page_dict;
    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return Some(value);
        }
        let parent_id = current.get(b"Parent").and_then(Object::as_reference).ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Each referenced object is copied once. Its output ID is reserved before
/// its contents are copied, so reference cycles terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    ctx: &mut CopyContext,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = ctx.copied.get(id) {
                return Ok(Object::Reference(new_id));
            }
            if ctx.foreign_pages.contains(id) {
                return Ok(Object::Null);
            }

            // Dangling references are treated as null
            let Ok(referenced) = source.get_object(*id) else {
                return Ok(Object::Null);
            };

            let new_id = output.new_object_id();
            ctx.copied.insert(*id, new_id);
            let copied = copy_object_deep(output, source, referenced, ctx)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => {
            let mut new_dict = Dictionary::new();
            for (key, value) in dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, ctx)?);
            }
            Ok(Object::Dictionary(new_dict))
        }
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, ctx))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => {
            let mut new_stream = stream.clone();
            let mut new_dict = Dictionary::new();
            for (key, value) in stream.dict.iter() {
                new_dict.set(key.clone(), copy_object_deep(output, source, value, ctx)?);
            }
            new_stream.dict = new_dict;
            new_stream.start_position = None;
            Ok(Object::Stream(new_stream))
        }
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

// =============================================================================
// Page Dimensions
// =============================================================================

/// Get page dimensions (width, height) in points from the effective MediaBox
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page_dict = doc.get_dictionary(page_id)?;

    let media_box = inherited_attribute(doc, page_dict, b"MediaBox").and_then(|obj| match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    });

    let Some(Ok(mb)) = media_box.map(Object::as_array) else {
        return Ok(DEFAULT_PAGE_DIMENSIONS);
    };

    let coords: Vec<f32> = mb.iter().filter_map(extract_number).collect();
    if coords.len() != 4 {
        return Ok(DEFAULT_PAGE_DIMENSIONS);
    }

    Ok(((coords[2] - coords[0]).abs(), (coords[3] - coords[1]).abs()))
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
