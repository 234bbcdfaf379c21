//! Gzip post-pass over a completed output file

use flate2::write::GzEncoder;
use flate2::Compression;
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

use crate::generation::{GeneratorError, GeneratorResult};
use crate::output::write_atomically;

/// Path of the compressed copy of `path`
pub fn compressed_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".gz");
    path.with_file_name(name)
}

/// Gzip-compress a byte buffer
pub fn gzip_bytes(bytes: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes)?;
    encoder.finish()
}

/// Write a gzip copy next to `path`, keeping the original
#[instrument]
pub fn gzip_file(path: &Path) -> GeneratorResult<PathBuf> {
    let contents = fs::read(path).map_err(GeneratorError::io("read", path))?;
    let target = compressed_path(path);
    let compressed = gzip_bytes(&contents).map_err(GeneratorError::io("compress", path))?;

    write_atomically(&target, |writer| {
        writer.write_all(&compressed).map_err(GeneratorError::io("write", &target))
    })?;

    info!(
        "Compressed {} ({} bytes) to {} ({} bytes)",
        path.display(),
        contents.len(),
        target.display(),
        compressed.len()
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_compressed_path_appends_extension() {
        assert_eq!(
            compressed_path(Path::new("/out/clusters.json")),
            PathBuf::from("/out/clusters.json.gz")
        );
    }

    #[test]
    fn test_gzip_file_keeps_original_and_is_lossless() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clusters.csv");
        let contents = "id_e,id_a\nabc,DEF\n".repeat(50);
        fs::write(&path, &contents).unwrap();

        let target = gzip_file(&path).unwrap();
        assert_eq!(target, dir.path().join("clusters.csv.gz"));
        assert_eq!(fs::read_to_string(&path).unwrap(), contents);

        let mut decoded = String::new();
        GzDecoder::new(fs::File::open(&target).unwrap())
            .read_to_string(&mut decoded)
            .unwrap();
        assert_eq!(decoded, contents);
    }

    #[test]
    fn test_gzip_missing_file_reports_read() {
        let dir = TempDir::new().unwrap();
        let error = gzip_file(&dir.path().join("absent.csv")).unwrap_err();
        assert!(error.to_string().starts_with("Failed to read"));
    }
}
