use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sheetpress_core::Candidate;

/// Reads each path into a candidate named after its file name. Classification
/// is left to the batch selector.
pub fn read_candidates(paths: &[impl AsRef<Path>]) -> Result<Vec<Candidate>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            Ok(Candidate::new(name, bytes))
        })
        .collect()
}
