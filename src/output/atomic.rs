//! Atomic file writes
//!
//! Output is written to a sibling `.tmp` file and renamed over the final path
//! once fully flushed, so an artifact under its final name is always complete.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::generation::{GeneratorError, GeneratorResult};

/// Temporary sibling path used while `path` is being written
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write a file through `write`, publishing it under `path` only on success
pub fn write_atomically<F>(path: &Path, write: F) -> GeneratorResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> GeneratorResult<()>,
{
    let tmp_path = temp_path_for(path);
    let file = File::create(&tmp_path).map_err(GeneratorError::io("create", &tmp_path))?;
    let mut writer = BufWriter::new(file);

    let outcome = write(&mut writer).and_then(|()| {
        writer.flush().map_err(GeneratorError::io("write", &tmp_path))
    });
    drop(writer);

    if let Err(error) = outcome {
        if let Err(cleanup) = fs::remove_file(&tmp_path) {
            warn!("Failed to remove partial file {}: {}", tmp_path.display(), cleanup);
        }
        return Err(error);
    }

    fs::rename(&tmp_path, path).map_err(GeneratorError::io("rename", path))?;
    debug!("Wrote {}", path.display());
    Ok(())
}
