use crate::error::{Result, SplitError};
use crate::pdf::document::decode_pdf_string;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A top-level bookmark reduced to its title and zero-based start page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineEntry {
    pub title: String,
    pub page: u32,
}

/// Read the top-level outline items of a document.
///
/// Items without a title or whose destination does not lead to a page are
/// skipped. Fails with [`SplitError::NoOutline`] when the document has no
/// outline items at all and with [`SplitError::NoChapters`] when every item
/// was skipped.
pub fn extract_outline(doc: &Document) -> Result<Vec<OutlineEntry>> {
    let first_id = first_outline_item(doc).ok_or(SplitError::NoOutline)?;
    let page_map = build_page_map(doc);

    let mut entries = Vec::new();
    let mut seen = HashSet::new();
    let mut current_id = Some(first_id);

    while let Some(id) = current_id {
        if !seen.insert(id) {
            debug!(?id, "outline sibling chain loops, stopping");
            break;
        }

        // Get the item dictionary
        let dict = match doc.get_dictionary(id) {
            Ok(d) => d,
            Err(_) => {
                debug!(?id, "outline item is not a dictionary, stopping");
                break;
            }
        };

        match read_item(doc, dict, &page_map) {
            Some(entry) => entries.push(entry),
            None => debug!(?id, "skipping outline item without title or page"),
        }

        // Get next sibling; children are not chapters
        current_id = match dict.get(b"Next") {
            Ok(Object::Reference(r)) => Some(*r),
            _ => None,
        };
    }

    if entries.is_empty() {
        return Err(SplitError::NoChapters);
    }

    Ok(entries)
}

fn first_outline_item(doc: &Document) -> Option<ObjectId> {
    let catalog = doc.catalog().ok()?;
    let outlines = match catalog.get(b"Outlines").ok()? {
        Object::Reference(r) => doc.get_dictionary(*r).ok()?,
        Object::Dictionary(d) => d,
        _ => return None,
    };
    match outlines.get(b"First") {
        Ok(Object::Reference(r)) => Some(*r),
        _ => None,
    }
}

fn read_item(
    doc: &Document,
    dict: &Dictionary,
    page_map: &HashMap<ObjectId, u32>,
) -> Option<OutlineEntry> {
    // Get title, direct or indirect
    let title = match dict.get(b"Title") {
        Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
        Ok(Object::Reference(r)) => match doc.get_object(*r) {
            Ok(Object::String(bytes, _)) => decode_pdf_string(bytes),
            _ => return None,
        },
        _ => return None,
    };
    let title = title.trim();
    if title.is_empty() {
        return None;
    }

    // Get destination page
    let page = get_destination_page(doc, dict, page_map)?;

    Some(OutlineEntry {
        title: title.to_string(),
        page,
    })
}

fn get_destination_page(
    doc: &Document,
    dict: &Dictionary,
    page_map: &HashMap<ObjectId, u32>,
) -> Option<u32> {
    // Try Dest first (direct destination)
    if let Ok(dest) = dict.get(b"Dest") {
        return resolve_destination(doc, dest, page_map, 0);
    }

    // Try A (action), inline or referenced; only GoTo leads to a page
    let action = match dict.get(b"A").ok()? {
        Object::Reference(r) => doc.get_dictionary(*r).ok()?,
        Object::Dictionary(d) => d,
        _ => return None,
    };
    match action.get(b"S") {
        Ok(Object::Name(kind)) if kind == b"GoTo" => {
            resolve_destination(doc, action.get(b"D").ok()?, page_map, 0)
        }
        _ => None,
    }
}

// Indirections deeper than this are treated as broken.
const MAX_DEST_DEPTH: u32 = 16;

fn resolve_destination(
    doc: &Document,
    dest: &Object,
    page_map: &HashMap<ObjectId, u32>,
    depth: u32,
) -> Option<u32> {
    if depth > MAX_DEST_DEPTH {
        return None;
    }

    match dest {
        // Named destination - look up in Names/Dests
        Object::String(name, _) | Object::Name(name) => {
            resolve_named_destination(doc, name, page_map, depth + 1)
        }
        // Direct destination array: [page_ref, /XYZ, left, top, zoom] or similar
        Object::Array(arr) => match arr.first() {
            Some(Object::Reference(page_ref)) => page_map.get(page_ref).copied(),
            _ => None,
        },
        // A destination dictionary wraps the array under /D
        Object::Dictionary(d) => resolve_destination(doc, d.get(b"D").ok()?, page_map, depth + 1),
        // Reference to destination
        Object::Reference(r) => {
            let obj = doc.get_object(*r).ok()?;
            resolve_destination(doc, obj, page_map, depth + 1)
        }
        _ => None,
    }
}

fn resolve_named_destination(
    doc: &Document,
    name: &[u8],
    page_map: &HashMap<ObjectId, u32>,
    depth: u32,
) -> Option<u32> {
    let catalog = doc.catalog().ok()?;

    // Try Names/Dests name tree
    if let Ok(Object::Reference(names_ref)) = catalog.get(b"Names") {
        if let Ok(names_dict) = doc.get_dictionary(*names_ref) {
            if let Ok(Object::Reference(dests_ref)) = names_dict.get(b"Dests") {
                let mut visited = HashSet::new();
                if let Some(dest) = search_name_tree(doc, *dests_ref, name, &mut visited) {
                    return resolve_destination(doc, dest, page_map, depth);
                }
            }
        }
    }

    // Older style: /Dests dictionary in the catalog
    if let Ok(Object::Reference(dests_ref)) = catalog.get(b"Dests") {
        if let Ok(dests_dict) = doc.get_dictionary(*dests_ref) {
            if let Ok(dest) = dests_dict.get(name) {
                return resolve_destination(doc, dest, page_map, depth);
            }
        }
    }

    None
}

fn search_name_tree<'a>(
    doc: &'a Document,
    node_id: ObjectId,
    name: &[u8],
    visited: &mut HashSet<ObjectId>,
) -> Option<&'a Object> {
    if !visited.insert(node_id) {
        return None;
    }
    let dict = doc.get_dictionary(node_id).ok()?;

    // Check Names array (leaf node)
    if let Ok(Object::Array(names)) = dict.get(b"Names") {
        for chunk in names.chunks(2) {
            if let [Object::String(key, _), value] = chunk {
                if key == name {
                    return Some(value);
                }
            }
        }
    }

    // Check Kids array (intermediate node)
    if let Ok(Object::Array(kids)) = dict.get(b"Kids") {
        for kid in kids {
            if let Object::Reference(kid_ref) = kid {
                if let Some(found) = search_name_tree(doc, *kid_ref, name, visited) {
                    return Some(found);
                }
            }
        }
    }

    None
}

/// Page object id to zero-based page index.
fn build_page_map(doc: &Document) -> HashMap<ObjectId, u32> {
    doc.get_pages()
        .into_iter()
        .map(|(num, id)| (id, num - 1))
        .collect()
}
