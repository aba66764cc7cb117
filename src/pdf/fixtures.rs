//! In-memory PDFs for tests.

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use std::path::{Path, PathBuf};

/// Content stream of the fixture page at a zero-based index.
pub fn page_marker(index: u32) -> Vec<u8> {
    format!("% page {}\n", index).into_bytes()
}

#[derive(Clone)]
pub enum Dest {
    Page(u32),
    GoTo(u32),
    Named(u32),
    Broken,
}

#[derive(Clone)]
pub enum Title {
    Text(String),
    Utf16(String),
    Missing,
}

#[derive(Clone)]
struct Item {
    title: Title,
    dest: Dest,
    children: Vec<Item>,
}

enum OutlineShape {
    Items,
    Empty,
    Absent,
}

pub struct FixtureBuilder {
    pages: u32,
    items: Vec<Item>,
    shape: OutlineShape,
    cyclic: bool,
}

impl FixtureBuilder {
    pub fn new(pages: u32) -> Self {
        FixtureBuilder {
            pages,
            items: Vec::new(),
            shape: OutlineShape::Items,
            cyclic: false,
        }
    }

    pub fn chapter(self, title: &str, page: u32) -> Self {
        self.item(Title::Text(title.to_string()), Dest::Page(page))
    }

    pub fn item(mut self, title: Title, dest: Dest) -> Self {
        self.items.push(Item {
            title,
            dest,
            children: Vec::new(),
        });
        self
    }

    /// Nest a bookmark under the most recently added top-level item.
    pub fn sub_chapter(mut self, title: &str, page: u32) -> Self {
        if let Some(parent) = self.items.last_mut() {
            parent.children.push(Item {
                title: Title::Text(title.to_string()),
                dest: Dest::Page(page),
                children: Vec::new(),
            });
        }
        self
    }

    /// `/Outlines` present but without any item.
    pub fn empty_outline(mut self) -> Self {
        self.shape = OutlineShape::Empty;
        self
    }

    /// No `/Outlines` in the catalog.
    pub fn without_outline(mut self) -> Self {
        self.shape = OutlineShape::Absent;
        self
    }

    /// Point the last top-level item's `/Next` back at the first one.
    pub fn cyclic(mut self) -> Self {
        self.cyclic = true;
        self
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut page_ids = Vec::new();
        for index in 0..self.pages {
            let content_id = doc.add_object(Stream::new(Dictionary::new(), page_marker(index)));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
                "Contents" => content_id,
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::Reference(*id)).collect();
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => Object::Integer(self.pages as i64),
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        };

        let mut named = Vec::new();
        match self.shape {
            OutlineShape::Absent => {}
            OutlineShape::Empty => {
                let outlines_id = doc.add_object(dictionary! { "Type" => "Outlines" });
                catalog.set("Outlines", outlines_id);
            }
            OutlineShape::Items => {
                let outlines_id = doc.new_object_id();
                let (first, last) = add_items(
                    &mut doc,
                    &self.items,
                    outlines_id,
                    &page_ids,
                    &mut named,
                    self.cyclic,
                );
                let mut outlines = dictionary! { "Type" => "Outlines" };
                if let (Some(first), Some(last)) = (first, last) {
                    outlines.set("First", first);
                    outlines.set("Last", last);
                    outlines.set("Count", Object::Integer(self.items.len() as i64));
                }
                doc.objects.insert(outlines_id, Object::Dictionary(outlines));
                catalog.set("Outlines", outlines_id);
            }
        }

        if !named.is_empty() {
            let dests_id = doc.add_object(dictionary! { "Names" => named });
            let names_id = doc.add_object(dictionary! { "Dests" => dests_id });
            catalog.set("Names", names_id);
        }

        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", catalog_id);
        doc
    }

    /// Save as `book.pdf` inside `dir` and return the path.
    pub fn save_in(&self, dir: &Path) -> PathBuf {
        let path = dir.join("book.pdf");
        self.build().save(&path).unwrap();
        path
    }
}

fn add_items(
    doc: &mut Document,
    items: &[Item],
    parent: ObjectId,
    page_ids: &[ObjectId],
    named: &mut Vec<Object>,
    cyclic: bool,
) -> (Option<ObjectId>, Option<ObjectId>) {
    let ids: Vec<ObjectId> = items.iter().map(|_| doc.new_object_id()).collect();

    for (i, item) in items.iter().enumerate() {
        let mut dict = dictionary! { "Parent" => parent };

        match &item.title {
            Title::Text(text) => dict.set("Title", Object::string_literal(text.as_str())),
            Title::Utf16(text) => {
                let mut bytes = vec![0xFE, 0xFF];
                for unit in text.encode_utf16() {
                    bytes.extend_from_slice(&unit.to_be_bytes());
                }
                dict.set("Title", Object::String(bytes, StringFormat::Hexadecimal));
            }
            Title::Missing => {}
        }

        let page_ref = |page: u32| Object::Reference(page_ids[page as usize]);
        match &item.dest {
            Dest::Page(page) => dict.set("Dest", vec![page_ref(*page), "Fit".into()]),
            Dest::GoTo(page) => dict.set(
                "A",
                dictionary! {
                    "S" => "GoTo",
                    "D" => vec![page_ref(*page), "Fit".into()],
                },
            ),
            Dest::Named(page) => {
                let name = format!("dest-{}", named.len() / 2);
                named.push(Object::string_literal(name.as_str()));
                named.push(Object::Array(vec![page_ref(*page), "Fit".into()]));
                dict.set("Dest", Object::string_literal(name.as_str()));
            }
            Dest::Broken => dict.set("Dest", vec![Object::Reference((9999, 0)), "Fit".into()]),
        }

        if i > 0 {
            dict.set("Prev", ids[i - 1]);
        }
        if i + 1 < ids.len() {
            dict.set("Next", ids[i + 1]);
        } else if cyclic {
            dict.set("Next", ids[0]);
        }

        let (first, last) = add_items(doc, &item.children, ids[i], page_ids, named, false);
        if let (Some(first), Some(last)) = (first, last) {
            dict.set("First", first);
            dict.set("Last", last);
        }

        doc.objects.insert(ids[i], Object::Dictionary(dict));
    }

    (ids.first().copied(), ids.last().copied())
}
