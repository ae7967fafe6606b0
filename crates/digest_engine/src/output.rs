use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use digest_logging::digest_info;

use crate::persist::{ensure_output_dir, AtomicFileWriter, PersistError};
use crate::workbook::build_workbook;
use crate::{ContentModel, RunMetadata};

pub const ARTICLE_INFO_FILE: &str = "article_info.json";
pub const CLEAN_TEXT_FILE: &str = "clean_text.txt";
pub const TABLES_FILE: &str = "tables.xlsx";
pub const METADATA_FILE: &str = "metadata.json";

/// Second-granularity run id, e.g. `20240131_235959`.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Produces the run directory name.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

pub fn local_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Clone)]
pub struct OutputSettings {
    pub root: PathBuf,
    pub clock: Clock,
}

impl OutputSettings {
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("output"),
            clock: Arc::new(local_timestamp),
        }
    }
}

impl fmt::Debug for OutputSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputSettings")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Writes the artifacts of one run under `root/<timestamp>/`.
///
/// Files already written stay on disk when a later one fails.
#[derive(Debug, Default)]
pub struct OutputWriter {
    settings: OutputSettings,
}

impl OutputWriter {
    pub fn new(settings: OutputSettings) -> Self {
        Self { settings }
    }

    pub fn persist(&self, model: &ContentModel, url: &str) -> Result<PathBuf, PersistError> {
        let timestamp = (self.settings.clock)();
        let dir = self.settings.root.join(&timestamp);
        ensure_output_dir(&dir)?;
        let writer = AtomicFileWriter::new(dir.clone());

        writer.write(
            ARTICLE_INFO_FILE,
            serde_json::to_string_pretty(&model.article_info)?,
        )?;
        writer.write(CLEAN_TEXT_FILE, &model.full_text)?;
        if !model.tables.is_empty() {
            writer.write(TABLES_FILE, build_workbook(&model.tables)?)?;
        }
        let metadata = RunMetadata::new(model, url, &timestamp);
        writer.write(METADATA_FILE, serde_json::to_string_pretty(&metadata)?)?;

        digest_info!("Results saved to {}", dir.display());
        Ok(dir)
    }
}
