//! Used/unused classification of public files.
//!
//! A file counts as *used* when its base name appears literally in the raw
//! text of at least one JSON document under the data directory. This is a
//! heuristic: the documents are not parsed, so a name that happens to occur
//! inside an unrelated string still counts as a reference.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

use crate::storage::{human_size, scan_directory, StoredFile};

/// The only reference tag produced today: a hit inside a data document.
pub const REFERENCE_TYPE_DATA: &str = "data";

/// A JSON document that mentions a file by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Relative path of the document under the data directory.
    pub file: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Non-overlapping occurrences of the name in the document.
    pub count: usize,
}

/// A scanned file with its reference information.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedFile {
    #[serde(flatten)]
    pub file: StoredFile,
    pub is_used: bool,
    pub references: Vec<Reference>,
    pub total_references: usize,
    pub formatted_size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStats {
    pub files: usize,
    pub size: u64,
    pub formatted_size: String,
}

impl BucketStats {
    fn of<'a>(files: impl Iterator<Item = &'a AnalyzedFile>) -> Self {
        let (count, size) = files.fold((0, 0), |(n, s), f| (n + 1, s + f.file.size));
        Self {
            files: count,
            size,
            formatted_size: human_size(size),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnusedStats {
    #[serde(flatten)]
    pub bucket: BucketStats,
    /// Share of total bytes held by unused files, in percent (two decimals).
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageStats {
    pub total: BucketStats,
    pub used: BucketStats,
    pub unused: UnusedStats,
}

/// Full analysis result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageReport {
    pub stats: UsageStats,
    pub used_files: Vec<AnalyzedFile>,
    pub unused_files: Vec<AnalyzedFile>,
}

/// A data document loaded for reference counting.
#[derive(Debug, Clone)]
pub struct DataDocument {
    pub relative_path: String,
    pub content: String,
}

/// Load every readable `.json` file under `data_root`.
///
/// Symlinks are followed. Documents that cannot be read or are not valid
/// UTF-8 are skipped with a warning; they simply contribute no references.
pub fn load_documents(data_root: &Path) -> Vec<DataDocument> {
    let mut documents = Vec::new();

    for entry in WalkDir::new(data_root)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %data_root.display(), error = %e, "Skipping unreadable data entry");
                continue;
            }
        };
        let path = entry.path();
        let is_json = path
            .extension()
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if !entry.file_type().is_file() || !is_json {
            continue;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => documents.push(DataDocument {
                relative_path: relative_display(data_root, path),
                content,
            }),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Skipping unreadable data document");
            }
        }
    }

    documents
}

/// References to `file_name` across `documents`; documents without a hit
/// are omitted.
pub fn find_references(file_name: &str, documents: &[DataDocument]) -> Vec<Reference> {
    if file_name.is_empty() {
        return Vec::new();
    }
    documents
        .iter()
        .filter_map(|doc| {
            let count = doc.content.matches(file_name).count();
            (count > 0).then(|| Reference {
                file: doc.relative_path.clone(),
                kind: REFERENCE_TYPE_DATA,
                count,
            })
        })
        .collect()
}

/// Classify already scanned `files` against `documents`.
pub fn classify(files: Vec<StoredFile>, documents: &[DataDocument]) -> UsageReport {
    let (used_files, unused_files): (Vec<_>, Vec<_>) = files
        .into_iter()
        .map(|file| {
            let references = find_references(&file.name, documents);
            let total_references = references.iter().map(|r| r.count).sum();
            AnalyzedFile {
                is_used: total_references > 0,
                formatted_size: human_size(file.size),
                file,
                references,
                total_references,
            }
        })
        .partition(|f| f.is_used);

    let used = BucketStats::of(used_files.iter());
    let unused = BucketStats::of(unused_files.iter());
    let total = BucketStats::of(used_files.iter().chain(unused_files.iter()));
    let percentage = unused_percentage(unused.size, total.size);

    UsageReport {
        stats: UsageStats {
            total,
            used,
            unused: UnusedStats {
                bucket: unused,
                percentage,
            },
        },
        used_files,
        unused_files,
    }
}

/// Scan `storage_root` and classify every file against the JSON documents
/// under `data_root`. Never fails; unreadable entries are skipped.
pub fn analyze(storage_root: &Path, data_root: &Path) -> UsageReport {
    let files = scan_directory(storage_root);
    let documents = load_documents(data_root);
    tracing::debug!(
        files = files.len(),
        documents = documents.len(),
        "Analyzing file usage"
    );
    classify(files, &documents)
}

fn unused_percentage(unused: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = unused as f64 / total as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .map(PathBuf::from)
        .unwrap_or_else(|_| path.to_path_buf())
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
