//! Batch serialization
//!
//! Renders a batch either as CSV (one header derived from the first record,
//! one row per record) or as JSON lines (one self-describing object per line).

use std::io::{self, Write};
use std::path::Path;
use tracing::{info, instrument};

use crate::generation::{GeneratorError, GeneratorResult};
use crate::output::write_atomically;
use crate::profile::Profile;
use crate::types::FileType;

/// Base name of the primary output file
pub const PRIMARY_FILE_STEM: &str = "clusters";

/// Name of the primary output file for a file type
pub fn primary_file_name(file_type: FileType) -> String {
    format!("{}.{}", PRIMARY_FILE_STEM, file_type.extension())
}

/// Writes batches in one output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSerializer {
    file_type: FileType,
}

impl RecordSerializer {
    /// Create a serializer for the given file type
    pub fn new(file_type: FileType) -> Self {
        Self { file_type }
    }

    /// Output file type
    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    /// Check that the batch can be serialized and return its field names
    ///
    /// Every record must carry exactly the first record's fields in the same
    /// order, and the batch must not be empty.
    pub fn header(batch: &[Profile]) -> GeneratorResult<Vec<String>> {
        let first = batch.first().ok_or_else(|| {
            GeneratorError::invariant_violation("cannot serialize an empty batch")
        })?;

        if let Some((index, _)) = batch
            .iter()
            .enumerate()
            .find(|(_, profile)| !profile.has_same_shape(first))
        {
            return Err(GeneratorError::invariant_violation(format!(
                "record {} has fields that differ from the first record",
                index
            )));
        }

        Ok(first.keys().map(str::to_string).collect())
    }

    /// Serialize the batch into any writer
    ///
    /// `target` names the destination in I/O errors.
    pub fn write_to<W: Write>(
        &self,
        batch: &[Profile],
        writer: W,
        target: &Path,
    ) -> GeneratorResult<()> {
        let header = Self::header(batch)?;

        match self.file_type {
            FileType::Csv => Self::write_csv(&header, batch, writer, target),
            FileType::Json => Self::write_json_lines(batch, writer, target),
        }
    }

    /// Serialize the batch to a file, replacing it atomically
    #[instrument(skip(self, batch), fields(records = batch.len(), file_type = %self.file_type))]
    pub fn write_file(&self, batch: &[Profile], path: &Path) -> GeneratorResult<()> {
        // Reject bad batches before touching the filesystem
        Self::header(batch)?;

        write_atomically(path, |writer| self.write_to(batch, writer, path))?;

        info!("Wrote {} records to {}", batch.len(), path.display());
        Ok(())
    }

    fn write_csv<W: Write>(
        header: &[String],
        batch: &[Profile],
        writer: W,
        target: &Path,
    ) -> GeneratorResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        csv_writer.write_record(header).map_err(csv_failure(target))?;
        for profile in batch {
            csv_writer.write_record(profile.values()).map_err(csv_failure(target))?;
        }

        csv_writer.flush().map_err(GeneratorError::io("write", target))
    }

    fn write_json_lines<W: Write>(
        batch: &[Profile],
        mut writer: W,
        target: &Path,
    ) -> GeneratorResult<()> {
        for profile in batch {
            serde_json::to_writer(&mut writer, profile).map_err(json_failure(target))?;
            writer.write_all(b"\n").map_err(GeneratorError::io("write", target))?;
        }
        writer.flush().map_err(GeneratorError::io("write", target))
    }
}

/// Report I/O failures inside the csv writer against the target path
fn csv_failure(target: &Path) -> impl FnOnce(csv::Error) -> GeneratorError + '_ {
    move |error| {
        if !error.is_io_error() {
            return GeneratorError::CsvError(error);
        }
        match error.into_kind() {
            csv::ErrorKind::Io(source) => GeneratorError::io("write", target)(source),
            kind => GeneratorError::invariant_violation(format!("unexpected CSV error: {:?}", kind)),
        }
    }
}

/// Report I/O failures inside serde_json against the target path
fn json_failure(target: &Path) -> impl FnOnce(serde_json::Error) -> GeneratorError + '_ {
    move |error| {
        if error.is_io() {
            GeneratorError::io("write", target)(io::Error::from(error))
        } else {
            GeneratorError::SerializationError(error)
        }
    }
}
