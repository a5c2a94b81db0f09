// src/output/mod.rs
//! Artifact publishing, with pure path planning kept apart from the I/O.

mod paths;
mod writer;

pub use paths::{artifact_path, creation_filename, is_safe_filename};
pub use writer::DirectoryArtifactStore;
