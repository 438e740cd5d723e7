use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::LibraryError;

/// Whether `path` is a directory, following symlinks. Stat errors, including
/// a missing path, count as "not a directory".
pub fn is_directory(path: &Path) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_dir(),
        Err(err) => {
            if err.kind() != ErrorKind::NotFound {
                debug!("Error checking directory {:?}: {}", path, err);
            }
            false
        }
    }
}

/// Joins single-segment names onto `root`. Returns `None` when a segment is
/// empty, `.`/`..`, absolute, or contains a separator.
pub fn library_path(root: &Path, parts: &[&str]) -> Option<PathBuf> {
    let mut out = PathBuf::from(root);
    for part in parts {
        if part.is_empty() || part.chars().any(std::path::is_separator) {
            return None;
        }
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => out.push(part),
            _ => return None,
        }
    }
    Some(out)
}

/// Names of the immediate children of `dir`, ordered by file name bytes.
pub fn list_dir(dir: &Path) -> Result<Vec<String>, LibraryError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(false)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => warn!("Skipping entry with non UTF-8 name {:?}", entry.path()),
        }
    }
    Ok(names)
}
