//! Block document assembly
//!
//! Turns an imposed slot sequence into a standalone PDF: real pages are
//! copied unchanged, blanks become empty pages of the source page size.

use super::copy::{CopyContext, copy_page};
use crate::layout::PageSlot;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Build the output document for one block.
///
/// `imposed` holds 0-based indices into `page_ids`, already in print order.
pub fn assemble_block(
    source: &Document,
    page_ids: &[ObjectId],
    imposed: &[PageSlot<usize>],
    dimensions: PageDimensions,
) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();

    let included: Vec<ObjectId> = imposed
        .iter()
        .filter_map(PageSlot::page)
        .map(|&index| source_page_id(page_ids, index))
        .collect::<Result<_>>()?;
    let mut ctx = CopyContext::new(&mut output, page_ids, &included);

    let mut page_refs = Vec::with_capacity(imposed.len());
    for slot in imposed {
        let page_id = match slot {
            PageSlot::Page(index) => copy_page(
                &mut output,
                source,
                source_page_id(page_ids, *index)?,
                pages_tree_id,
                &mut ctx,
            )?,
            PageSlot::Blank => create_blank_page(&mut output, dimensions, pages_tree_id),
        };
        page_refs.push(Object::Reference(page_id));
    }

    finalize_document(&mut output, pages_tree_id, page_refs);
    Ok(output)
}

fn source_page_id(page_ids: &[ObjectId], index: usize) -> Result<ObjectId> {
    page_ids.get(index).copied().ok_or_else(|| {
        ImposeError::Config(format!(
            "Page {} is out of range for a {}-page document",
            index + 1,
            page_ids.len()
        ))
    })
}

/// Create an empty page with the given size
fn create_blank_page(
    doc: &mut Document,
    dimensions: PageDimensions,
    parent_id: ObjectId,
) -> ObjectId {
    let content_stream = Stream::new(Dictionary::new(), Vec::new());
    let content_id = doc.add_object(content_stream);

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(dimensions.width_pt),
            Object::Real(dimensions.height_pt),
        ]),
    );
    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(Dictionary::new()));

    doc.add_object(page_dict)
}

/// Create pages tree and catalog, finalize document structure
fn finalize_document(output: &mut Document, pages_tree_id: ObjectId, page_refs: Vec<Object>) {
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);
}
