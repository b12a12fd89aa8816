//! # Document Store
//!
//! Stateless gateway to the output directory: lists `*.txt` documents, reads
//! and writes them, and maps document names to file paths through the
//! configured filename templates.
//!
//! ```text
//! name "Acme"  ──template──▶  ./documents/Acme_Cover_Letter.txt
//!                             ./documents/Acme_Cover_Letter.pdf
//! ```

use chrono::{DateTime, Local};
use log::{debug, info};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::core::config::AppConfig;

/// Placeholder substituted with the document name in filename templates.
const NAME_PLACEHOLDER: &str = "{name}";

/// Extension of the documents shown in the listing.
const DOCUMENT_EXTENSION: &str = "txt";

/// One document in the listing. Built fresh from filesystem metadata on every
/// refresh; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// File name including extension (unique within one listing).
    pub name: String,
    pub path: PathBuf,
    pub modified_at: SystemTime,
}

impl DocumentRecord {
    /// Modification time as local `YYYY-MM-DD HH:MM:SS`.
    pub fn modified_label(&self) -> String {
        let dt: DateTime<Local> = self.modified_at.into();
        dt.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Result of preparing a named document for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedDocument {
    pub path: PathBuf,
    /// Existing file content, or empty when the file was just created.
    pub content: String,
    pub created: bool,
}

/// Filename templates plus the directory they resolve into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileLayout {
    output_dir: PathBuf,
    text_format: String,
    pdf_format: String,
}

impl FileLayout {
    pub fn new(
        output_dir: impl Into<PathBuf>,
        text_format: impl Into<String>,
        pdf_format: impl Into<String>,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            text_format: text_format.into(),
            pdf_format: pdf_format.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.output_directory.clone(),
            config.text_filename_format.clone(),
            config.pdf_filename_format.clone(),
        )
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn text_path(&self, name: &str) -> PathBuf {
        self.resolve(&self.text_format, name)
    }

    pub fn pdf_path(&self, name: &str) -> PathBuf {
        self.resolve(&self.pdf_format, name)
    }

    fn resolve(&self, format: &str, name: &str) -> PathBuf {
        let filename = format.replace(NAME_PLACEHOLDER, name);
        if self.output_dir.as_os_str().is_empty() {
            PathBuf::from(filename)
        } else {
            self.output_dir.join(filename)
        }
    }

    /// Recover the document name from a text file path.
    ///
    /// Strips the part of the text template that follows `{name}` (minus the
    /// file extension) from the file stem. Heuristic: when the stem doesn't
    /// end with that suffix, the whole stem is the name.
    pub fn logical_name(&self, path: &Path) -> String {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let Some((_, after)) = self.text_format.rsplit_once(NAME_PLACEHOLDER) else {
            return stem;
        };
        let suffix = match path.extension() {
            Some(ext) => {
                let dotted = format!(".{}", ext.to_string_lossy());
                after.strip_suffix(dotted.as_str()).unwrap_or(after)
            }
            None => after,
        };

        match stem.strip_suffix(suffix) {
            Some(name) if !suffix.is_empty() && !name.is_empty() => name.to_string(),
            _ => stem,
        }
    }
}

/// Filesystem access for documents. Holds only the layout, so it is cheap to
/// clone into background tasks.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    layout: FileLayout,
}

impl DocumentStore {
    pub fn new(layout: FileLayout) -> Self {
        Self { layout }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(FileLayout::from_config(config))
    }

    pub fn layout(&self) -> &FileLayout {
        &self.layout
    }

    /// List `*.txt` files in the output directory, newest first.
    ///
    /// Ties on modification time are broken by file name so the order is
    /// deterministic. Creates the directory if it doesn't exist yet.
    pub fn list(&self) -> io::Result<Vec<DocumentRecord>> {
        let dir = self.listing_dir();
        fs::create_dir_all(&dir)?;

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().is_none_or(|ext| ext != DOCUMENT_EXTENSION) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            records.push(DocumentRecord {
                name: entry.file_name().to_string_lossy().into_owned(),
                path,
                modified_at: metadata.modified()?,
            });
        }

        records.sort_by(|a, b| {
            b.modified_at
                .cmp(&a.modified_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        debug!("Listed {} documents in {}", records.len(), dir.display());
        Ok(records)
    }

    /// Resolve `name` to its text file and load it, creating an empty file if
    /// none exists yet.
    pub fn open_for_edit(&self, name: &str) -> io::Result<OpenedDocument> {
        let path = self.layout.text_path(name);
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            debug!("Opened existing document {}", path.display());
            Ok(OpenedDocument { path, content, created: false })
        } else {
            fs::File::create(&path)?;
            info!("Created empty document {}", path.display());
            Ok(OpenedDocument { path, content: String::new(), created: true })
        }
    }

    /// Overwrite the document at `path` with `content`.
    pub fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        fs::write(path, content)?;
        info!("Saved {} ({} bytes)", path.display(), content.len());
        Ok(())
    }

    fn listing_dir(&self) -> PathBuf {
        let dir = self.layout.output_dir();
        if dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            dir.to_path_buf()
        }
    }
}
