use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Structured summary of one page, built once by [`crate::ContentExtractor`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentModel {
    pub full_text: String,
    pub article_info: ArticleInfo,
    pub tables: Vec<Table>,
    pub images: Vec<Image>,
}

/// Serialized as `article_info.json`; key order is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ArticleInfo {
    pub title: Option<String>,
    pub headings: Vec<String>,
    pub paragraphs: Vec<String>,
    pub links: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    /// 1-based position among every `table` element seen, including skipped ones.
    pub id: usize,
    pub header: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn sheet_name(&self) -> String {
        format!("Table_{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Image {
    pub src: String,
    pub alt: Option<String>,
    pub title: Option<String>,
}

/// Serialized as `metadata.json` next to the other artifacts of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    pub url: String,
    pub timestamp: String,
    pub tables_found: usize,
    pub images_found: usize,
    pub paragraphs_found: usize,
}

impl RunMetadata {
    pub fn new(model: &ContentModel, url: &str, timestamp: &str) -> Self {
        Self {
            url: url.to_string(),
            timestamp: timestamp.to_string(),
            tables_found: model.tables.len(),
            images_found: model.images.len(),
            paragraphs_found: model.article_info.paragraphs.len(),
        }
    }
}
