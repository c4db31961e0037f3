use crate::core::{FileKind, FileRecord};

/// A manifest entry with no tags.
pub fn record(target: &str) -> FileRecord {
    FileRecord::new(target)
}

/// A manifest entry tagged as the primary workflow file.
pub fn primary(target: &str) -> FileRecord {
    FileRecord::new(target).with_kind(FileKind::Primary)
}
