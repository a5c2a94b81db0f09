// src/output/paths.rs
//! Pure functions for artifact filenames and locations.
//!
//! No I/O happens here.

use crate::constants::{CREATION_FILENAME_EXTENSION, CREATION_FILENAME_PREFIX};
use crate::types::Namespace;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// A fresh, unique filename for a published creation.
pub fn creation_filename() -> String {
    format!(
        "{}{}.{}",
        CREATION_FILENAME_PREFIX,
        Uuid::new_v4(),
        CREATION_FILENAME_EXTENSION
    )
}

/// Whether `name` is a single safe path segment.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control())
}

/// Where an artifact lives on disk under `base_dir`.
pub fn artifact_path(base_dir: &Path, namespace: &Namespace, filename: &str) -> PathBuf {
    let mut path = base_dir.to_path_buf();
    for segment in namespace.as_str().split('/') {
        path.push(segment);
    }
    path.push(filename);
    path
}
