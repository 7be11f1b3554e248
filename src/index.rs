//! Component 3 — write the binary catalog of produced archives.
//!
//! The index is a sequence of 4-byte big-endian words `(namespace<<16)|id`,
//! one per archive found under the output directory, terminated by an
//! all-ones sentinel. Ids are sorted ascending so the catalog is
//! reproducible across platforms.

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::BuildError;
use crate::report::Reporter;

/// End-of-catalog sentinel word.
const TERMINATOR: u32 = 0xffff_ffff;

/// Scan `out_dir` and write `out_dir/index`.
///
/// Any file whose name is a decimal integer counts as an archive; `.hash`
/// sidecars and a previous `index` fail that parse and are skipped.
pub fn build(out_dir: &Path, namespace: u16, reporter: &dyn Reporter) -> Result<(), BuildError> {
    let mut ids = Vec::new();
    for entry in WalkDir::new(out_dir) {
        let entry = entry.map_err(|e| BuildError::IndexWrite(e.into()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if let Ok(archive_id) = name.parse::<u32>() {
            ids.push(archive_id);
        }
    }
    ids.sort_unstable();

    let mut catalog = Vec::with_capacity((ids.len() + 1) * 4);
    for archive_id in ids {
        let word = (namespace as u32) << 16 | archive_id;
        catalog.extend_from_slice(&word.to_be_bytes());
    }
    catalog.extend_from_slice(&TERMINATOR.to_be_bytes());

    let index_file = out_dir.join("index");
    fs::write(&index_file, &catalog).map_err(BuildError::IndexWrite)?;

    reporter.lifecycle("Index file written");
    Ok(())
}
