use std::collections::BTreeMap;
use std::sync::LazyLock;

use scraper::Selector;

use crate::clean::{clean_text, collapse_whitespace};
use crate::dom::{attribute, element_text, static_selector, ParsedDocument};
use crate::{ArticleInfo, ContentModel, Image, TableExtractor, TableSettings};

static TITLE: LazyLock<Selector> = LazyLock::new(|| static_selector("title"));
static HEADINGS: LazyLock<Selector> = LazyLock::new(|| static_selector("h1, h2, h3"));
static PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| static_selector("p"));
static ANCHORS: LazyLock<Selector> = LazyLock::new(|| static_selector("a[href]"));
static META: LazyLock<Selector> = LazyLock::new(|| static_selector("meta"));
static IMAGES: LazyLock<Selector> = LazyLock::new(|| static_selector("img"));

/// Key used for meta tags that declare neither `name` nor `property`.
const UNKNOWN_META_KEY: &str = "unknown";

/// Builds a [`ContentModel`] from a parsed page in a single pass per field.
#[derive(Debug, Default)]
pub struct ContentExtractor {
    tables: TableExtractor,
}

impl ContentExtractor {
    pub fn new(table_settings: TableSettings) -> Self {
        Self {
            tables: TableExtractor::new(table_settings),
        }
    }

    pub fn extract(&self, doc: &ParsedDocument) -> ContentModel {
        ContentModel {
            full_text: clean_text(Some(&doc.visible_text())),
            article_info: extract_article_info(doc),
            tables: self.tables.extract_tables(doc),
            images: extract_images(doc),
        }
    }
}

pub fn extract_article_info(doc: &ParsedDocument) -> ArticleInfo {
    ArticleInfo {
        title: doc.select(&TITLE).next().map(element_text),
        headings: trimmed_texts(doc, &HEADINGS),
        paragraphs: trimmed_texts(doc, &PARAGRAPHS),
        links: doc
            .select(&ANCHORS)
            .filter_map(|a| attribute(a, "href"))
            .map(str::to_string)
            .collect(),
        metadata: extract_metadata(doc),
    }
}

/// `name`, else `property`, else `"unknown"` maps to `content`; later tags win.
pub fn extract_metadata(doc: &ParsedDocument) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    for meta in doc.select(&META) {
        let Some(content) = attribute(meta, "content").filter(|c| !c.is_empty()) else {
            continue;
        };
        let key = attribute(meta, "name")
            .or_else(|| attribute(meta, "property"))
            .unwrap_or(UNKNOWN_META_KEY);
        metadata.insert(key.to_string(), content.to_string());
    }
    metadata
}

pub fn extract_images(doc: &ParsedDocument) -> Vec<Image> {
    doc.select(&IMAGES)
        .filter_map(|img| {
            let src = attribute(img, "src").filter(|s| !s.is_empty())?;
            Some(Image {
                src: src.to_string(),
                alt: attribute(img, "alt").map(str::to_string),
                title: attribute(img, "title").map(str::to_string),
            })
        })
        .collect()
}

/// Text of each match with whitespace runs collapsed and ends trimmed.
fn trimmed_texts(doc: &ParsedDocument, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(|el| collapse_whitespace(&element_text(el)))
        .collect()
}
