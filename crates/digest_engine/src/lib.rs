//! Digest engine: fetch a page, extract its content model, persist the artifacts.
mod clean;
mod decode;
mod dom;
mod extract;
mod fetch;
mod model;
mod output;
mod persist;
mod pipeline;
mod tables;
mod types;
mod workbook;

pub use clean::clean_text;
pub use decode::{decode_html, DecodedHtml};
pub use dom::{attribute, element_text, ParsedDocument};
pub use extract::{extract_article_info, extract_images, extract_metadata, ContentExtractor};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use model::{ArticleInfo, ContentModel, Image, RunMetadata, Table};
pub use output::{
    local_timestamp, Clock, OutputSettings, OutputWriter, ARTICLE_INFO_FILE, CLEAN_TEXT_FILE,
    METADATA_FILE, TABLES_FILE, TIMESTAMP_FORMAT,
};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::{Analyzer, AnalyzerSettings, RunError, RunReport};
pub use tables::{HeaderPolicy, TableExtractor, TableSettings};
pub use types::{FailureKind, FetchError, FetchMetadata, FetchOutput, ParseError, TableParseError};
pub use workbook::build_workbook;
