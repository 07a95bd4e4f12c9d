//! Public file storage: scanning, classification, naming and path safety.
//!
//! Everything here works on the local filesystem synchronously; callers in
//! async contexts run it on the blocking pool.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::SystemTime;

use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Largest accepted upload (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Subdirectory of the public root that receives uploads.
pub const UPLOADS_DIR: &str = "uploads";

/// Extensions accepted by the upload endpoint.
pub const UPLOAD_ALLOWED_TYPES: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".pdf", ".doc", ".docx", ".xls", ".xlsx",
    ".mp4", ".webm", ".mp3",
];

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".svg", ".bmp", ".ico"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".txt"];
const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".avi", ".mov", ".wmv", ".flv", ".webm"];
const AUDIO_EXTENSIONS: &[&str] = &[".mp3", ".wav", ".ogg", ".m4a", ".flac"];

const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB", "TB"];

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

// ---------------------------------------------------------------------------
// File kinds
// ---------------------------------------------------------------------------

/// Coarse file category derived from the extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Document,
    Video,
    Audio,
    Other,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Image,
        FileKind::Document,
        FileKind::Video,
        FileKind::Audio,
        FileKind::Other,
    ];

    /// Classify by a lowercase, dot-prefixed extension (e.g. `".png"`).
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.to_ascii_lowercase();
        let ext = ext.as_str();
        if IMAGE_EXTENSIONS.contains(&ext) {
            Self::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext) {
            Self::Document
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Self::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            Self::Audio
        } else {
            Self::Other
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FileKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown file type '{s}'. Must be one of: all, image, document, video, audio, other"
                ))
            })
    }
}

/// Lowercase extension of `name` with its leading dot, or `""` when absent.
pub fn extension_of(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Scanning
// ---------------------------------------------------------------------------

/// One regular file found under a storage root.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    pub name: String,
    pub path: PathBuf,
    pub relative_path: String,
    pub url_path: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub kind: FileKind,
    pub extension: String,
    pub upload_date: Timestamp,
    pub modified_date: Timestamp,
}

/// Recursively list every regular file under `root`, ordered by relative path.
///
/// Directories are descended into but not recorded. Symlinks are followed,
/// so a linked file is listed under the link's path and a linked directory
/// is walked; link loops surface as unreadable entries. Entries that cannot
/// be read are logged and skipped; a missing root yields an empty list.
pub fn scan_directory(root: &Path) -> Vec<StoredFile> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .min_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "Skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                tracing::warn!(path = %entry.path().display(), error = %e, "Skipping file without metadata");
                continue;
            }
        };

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative_path = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        let name = entry.file_name().to_string_lossy().into_owned();
        let extension = extension_of(&name);
        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let created = metadata.created().unwrap_or(modified);

        files.push(StoredFile {
            kind: FileKind::from_extension(&extension),
            url_path: format!("/{relative_path}"),
            relative_path,
            path: entry.path().to_path_buf(),
            size: metadata.len(),
            extension,
            name,
            upload_date: Timestamp::from(created),
            modified_date: Timestamp::from(modified),
        });
    }

    files
}

// ---------------------------------------------------------------------------
// Size formatting
// ---------------------------------------------------------------------------

/// Render a byte count on a base-1024 scale (`Bytes`, `KB`, ... `TB`).
///
/// The mantissa is rounded to `decimals` places with trailing zeros
/// dropped, so 1536 renders as `"1.5 KB"`. Zero is always `"0 Bytes"`.
pub fn format_file_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rendered = format!("{value:.decimals$}");
    let trimmed = if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.')
    } else {
        rendered.as_str()
    };
    format!("{trimmed} {}", SIZE_UNITS[unit])
}

/// [`format_file_size`] with the default two decimals.
pub fn human_size(bytes: u64) -> String {
    format_file_size(bytes, 2)
}

// ---------------------------------------------------------------------------
// Naming
// ---------------------------------------------------------------------------

/// Lowercase the stem and collapse every run of non `[a-z0-9]` characters
/// into one hyphen, trimming hyphens at both ends.
pub fn sanitize_file_stem(stem: &str) -> String {
    let lowered = stem.to_lowercase();
    let cleaned = NON_ALPHANUMERIC.replace_all(&lowered, "-");
    let cleaned = cleaned.trim_matches('-');
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Pick a name for `original` that does not exist yet in `dir`.
///
/// `Family Photo.png` becomes `family-photo.png`, then `family-photo-1.png`,
/// `family-photo-2.png` and so on. The extension keeps its original case.
pub fn unique_filename(original: &str, dir: &Path) -> String {
    let base = Path::new(original)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let path = Path::new(&base);
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let clean = sanitize_file_stem(&stem);

    let mut candidate = format!("{clean}{ext}");
    let mut counter = 1u32;
    while dir.join(&candidate).exists() {
        candidate = format!("{clean}-{counter}{ext}");
        counter += 1;
    }
    candidate
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check an upload against an allow-list.
///
/// Entries starting with `.` are compared with the lowercase extension of
/// `file_name`; any other entry must appear inside `content_type`. An empty
/// allow-list accepts everything.
pub fn validate_file_type(file_name: &str, content_type: &str, allowed: &[&str]) -> bool {
    if allowed.is_empty() {
        return true;
    }
    let extension = extension_of(file_name);
    allowed.iter().any(|entry| {
        if entry.starts_with('.') {
            extension == entry.to_ascii_lowercase()
        } else {
            content_type.contains(entry)
        }
    })
}

/// Resolve a web path such as `/uploads/a.png` to a filesystem path inside
/// `root`.
///
/// `.` and `..` are resolved lexically; a path that climbs above `root`, or
/// carries a drive prefix, is rejected as forbidden. Symlinks inside the
/// root are not followed here.
pub fn resolve_within_root(root: &Path, url_path: &str) -> Result<PathBuf, CoreError> {
    let trimmed = url_path.trim_start_matches(['/', '\\']);
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();

    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(CoreError::Forbidden("Invalid file path".into()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(CoreError::Forbidden("Invalid file path".into()));
            }
        }
    }

    if parts.is_empty() {
        return Err(CoreError::Validation("No file path provided".into()));
    }

    let mut resolved = root.to_path_buf();
    resolved.extend(parts);
    Ok(resolved)
}

// ---------------------------------------------------------------------------
// Gallery listing
// ---------------------------------------------------------------------------

/// A scanned file annotated with its human-readable size.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedFile {
    #[serde(flatten)]
    pub file: StoredFile,
    pub formatted_size: String,
}

/// Per-kind file counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub image: usize,
    pub document: usize,
    pub video: usize,
    pub audio: usize,
    pub other: usize,
}

impl KindCounts {
    fn record(&mut self, kind: FileKind) {
        match kind {
            FileKind::Image => self.image += 1,
            FileKind::Document => self.document += 1,
            FileKind::Video => self.video += 1,
            FileKind::Audio => self.audio += 1,
            FileKind::Other => self.other += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingStats {
    pub total_files: usize,
    pub total_size: u64,
    pub formatted_total_size: String,
    pub by_type: KindCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileListing {
    pub files: Vec<ListedFile>,
    pub stats: ListingStats,
}

/// Filter `files` to `kind` (all kinds when `None`), newest modification
/// first, and tally the result.
pub fn file_listing(files: Vec<StoredFile>, kind: Option<FileKind>) -> FileListing {
    let mut files: Vec<StoredFile> = files
        .into_iter()
        .filter(|f| kind.is_none_or(|k| f.kind == k))
        .collect();
    files.sort_by(|a, b| b.modified_date.cmp(&a.modified_date));

    let mut by_type = KindCounts::default();
    let mut total_size = 0;
    for file in &files {
        by_type.record(file.kind);
        total_size += file.size;
    }

    FileListing {
        stats: ListingStats {
            total_files: files.len(),
            total_size,
            formatted_total_size: human_size(total_size),
            by_type,
        },
        files: files
            .into_iter()
            .map(|file| ListedFile {
                formatted_size: human_size(file.size),
                file,
            })
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_bytes() {
        assert_eq!(human_size(0), "0 Bytes");
    }

    #[test]
    fn one_and_a_half_kilobytes() {
        assert_eq!(human_size(1536), "1.5 KB");
    }

    #[test]
    fn sizes_across_units() {
        assert_eq!(human_size(1), "1 Bytes");
        assert_eq!(human_size(1023), "1023 Bytes");
        assert_eq!(human_size(1024), "1 KB");
        assert_eq!(human_size(1024 * 1024), "1 MB");
        assert_eq!(human_size(5 * 1024 * 1024 * 1024), "5 GB");
        assert_eq!(human_size(1_234_567), "1.18 MB");
    }

    #[test]
    fn sizes_cap_at_terabytes() {
        let two_pb = 2 * 1024u64.pow(5);
        assert_eq!(human_size(two_pb), "2048 TB");
    }

    #[test]
    fn decimals_are_respected() {
        assert_eq!(format_file_size(1_234_567, 0), "1 MB");
        assert_eq!(format_file_size(1_234_567, 4), "1.1774 MB");
    }

    #[test]
    fn kinds_from_extension() {
        assert_eq!(FileKind::from_extension(".jpg"), FileKind::Image);
        assert_eq!(FileKind::from_extension(".JPEG"), FileKind::Image);
        assert_eq!(FileKind::from_extension(".pptx"), FileKind::Document);
        assert_eq!(FileKind::from_extension(".mov"), FileKind::Video);
        assert_eq!(FileKind::from_extension(".flac"), FileKind::Audio);
        assert_eq!(FileKind::from_extension(".json"), FileKind::Other);
        assert_eq!(FileKind::from_extension(""), FileKind::Other);
    }

    #[test]
    fn kind_parsing() {
        assert_eq!("video".parse::<FileKind>().unwrap(), FileKind::Video);
        assert!("all".parse::<FileKind>().is_err());
    }

    #[test]
    fn extension_is_lowercased_with_dot() {
        assert_eq!(extension_of("Photo.PNG"), ".png");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of(".hidden"), "");
    }

    #[test]
    fn sanitize_collapses_runs() {
        assert_eq!(sanitize_file_stem("Family Photo"), "family-photo");
        assert_eq!(sanitize_file_stem("  Reuni__2024 (final)!! "), "reuni-2024-final");
        assert_eq!(sanitize_file_stem("***"), "file");
    }

    #[test]
    fn unique_filename_appends_counter() {
        let dir = tempfile::tempdir().unwrap();
        let first = unique_filename("Family Photo.png", dir.path());
        assert_eq!(first, "family-photo.png");
        std::fs::write(dir.path().join(&first), b"one").unwrap();

        let second = unique_filename("Family Photo.png", dir.path());
        assert_eq!(second, "family-photo-1.png");
        std::fs::write(dir.path().join(&second), b"two").unwrap();

        assert_eq!(
            unique_filename("Family Photo.png", dir.path()),
            "family-photo-2.png"
        );
    }

    #[test]
    fn unique_filename_drops_directories() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(unique_filename("../../etc/Passwd.txt", dir.path()), "passwd.txt");
    }

    #[test]
    fn file_type_validation() {
        assert!(validate_file_type("a.PNG", "image/png", UPLOAD_ALLOWED_TYPES));
        assert!(!validate_file_type("a.exe", "application/octet-stream", UPLOAD_ALLOWED_TYPES));
        assert!(validate_file_type("clip", "video/mp4", &["video/"]));
        assert!(validate_file_type("anything.bin", "", &[]));
    }

    #[test]
    fn resolve_inside_root() {
        let root = Path::new("/srv/public");
        assert_eq!(
            resolve_within_root(root, "/uploads/a.png").unwrap(),
            PathBuf::from("/srv/public/uploads/a.png")
        );
        assert_eq!(
            resolve_within_root(root, "uploads/./x/../b.png").unwrap(),
            PathBuf::from("/srv/public/uploads/b.png")
        );
    }

    #[test]
    fn resolve_rejects_escape() {
        let root = Path::new("/srv/public");
        assert!(matches!(
            resolve_within_root(root, "/../secret.txt"),
            Err(CoreError::Forbidden(_))
        ));
        assert!(matches!(
            resolve_within_root(root, "uploads/../../etc/passwd"),
            Err(CoreError::Forbidden(_))
        ));
        assert!(matches!(
            resolve_within_root(root, "/"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn scan_records_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("uploads/2024")).unwrap();
        std::fs::write(dir.path().join("logo.svg"), b"<svg/>").unwrap();
        std::fs::write(dir.path().join("uploads/2024/Minutes.PDF"), b"%PDF-1.4").unwrap();

        let files = scan_directory(dir.path());
        assert_eq!(files.len(), 2);

        let logo = &files[0];
        assert_eq!(logo.name, "logo.svg");
        assert_eq!(logo.url_path, "/logo.svg");
        assert_eq!(logo.kind, FileKind::Image);
        assert_eq!(logo.size, 6);

        let minutes = &files[1];
        assert_eq!(minutes.relative_path, "uploads/2024/Minutes.PDF");
        assert_eq!(minutes.url_path, "/uploads/2024/Minutes.PDF");
        assert_eq!(minutes.extension, ".pdf");
        assert_eq!(minutes.kind, FileKind::Document);
    }

    #[test]
    fn scan_of_missing_root_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_directory(&dir.path().join("nope")).is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn scan_follows_symlinks() {
        use std::os::unix::fs::symlink;

        let outside = tempfile::tempdir().unwrap();
        std::fs::write(outside.path().join("target.png"), b"linked").unwrap();
        std::fs::create_dir(outside.path().join("album")).unwrap();
        std::fs::write(outside.path().join("album/inner.jpg"), b"in").unwrap();

        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("real.png"), b"real").unwrap();
        symlink(outside.path().join("target.png"), dir.path().join("linked.png")).unwrap();
        symlink(outside.path().join("album"), dir.path().join("linkdir")).unwrap();

        let files = scan_directory(dir.path());
        let paths: Vec<&str> = files.iter().map(|f| f.relative_path.as_str()).collect();
        assert_eq!(paths, vec!["linkdir/inner.jpg", "linked.png", "real.png"]);

        let linked = &files[1];
        assert_eq!(linked.url_path, "/linked.png");
        assert_eq!(linked.size, 6);
        assert_eq!(linked.path, dir.path().join("linked.png"));
    }

    #[cfg(unix)]
    #[test]
    fn scan_skips_dangling_symlink() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ok.png"), b"x").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.png"), dir.path().join("dangling.png")).unwrap();

        let files = scan_directory(dir.path());
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "ok.png");
    }

    #[test]
    fn listing_filters_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.png"), vec![0u8; 1024]).unwrap();
        std::fs::write(dir.path().join("b.mp3"), vec![0u8; 512]).unwrap();
        std::fs::write(dir.path().join("c.jpg"), vec![0u8; 512]).unwrap();

        let all = file_listing(scan_directory(dir.path()), None);
        assert_eq!(all.stats.total_files, 3);
        assert_eq!(all.stats.total_size, 2048);
        assert_eq!(all.stats.formatted_total_size, "2 KB");
        assert_eq!(all.stats.by_type.image, 2);
        assert_eq!(all.stats.by_type.audio, 1);

        let images = file_listing(scan_directory(dir.path()), Some(FileKind::Image));
        assert_eq!(images.stats.total_files, 2);
        assert!(images.files.iter().all(|f| f.file.kind == FileKind::Image));
        assert_eq!(images.stats.by_type.audio, 0);
    }
}
