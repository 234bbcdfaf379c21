//! Partner file derivation
//!
//! Each partner file holds a uniformly random sample, drawn without
//! replacement, of the primary file's records at a match rate drawn once per
//! file. Files are named after their match rate, so two partners that draw the
//! same rate share a name and the later one replaces the earlier.

use rand::seq::index;
use rand::Rng;
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::generation::{GeneratorError, GeneratorResult};
use crate::output::write_atomically;
use crate::types::FileType;

/// Lowest match rate, in percent
pub const MIN_MATCH_RATE: u32 = 23;
/// Highest match rate, in percent
pub const MAX_MATCH_RATE: u32 = 43;

/// Name of the partner file for a match rate
pub fn partner_file_name(match_rate: u32, file_type: FileType) -> String {
    format!("{}% match rate.{}", match_rate, file_type.extension())
}

/// Number of records a partner at `match_rate` percent receives
pub fn subset_size(match_rate: u32, total: usize) -> usize {
    total * match_rate as usize / 100
}

/// Records of a primary output file, as read back from disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinePool {
    header: Option<String>,
    records: Vec<String>,
}

impl LinePool {
    /// Split file text into header (CSV only) and record lines
    pub fn from_text(text: &str, file_type: FileType) -> Self {
        let mut lines = text.lines().map(str::to_string);
        let header = match file_type {
            FileType::Csv => lines.next(),
            FileType::Json => None,
        };
        Self { header, records: lines.collect() }
    }

    /// Read a completed primary file
    pub fn read(path: &Path, file_type: FileType) -> GeneratorResult<Self> {
        let text = fs::read_to_string(path).map_err(GeneratorError::io("read", path))?;
        Ok(Self::from_text(&text, file_type))
    }

    /// Header line carried into every partner file, if any
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    /// Record lines without terminators
    pub fn records(&self) -> &[String] {
        &self.records
    }

    /// Number of records in the pool
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the pool has no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of writing one partner file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartnerFile {
    /// Where the file was written
    pub path: PathBuf,
    /// Match rate in percent
    pub match_rate: u32,
    /// Number of records written
    pub records: usize,
    /// Whether a later partner with the same rate replaced this file
    pub overwritten: bool,
}

/// Draws partner subsets from a line pool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerSampler {
    file_type: FileType,
    match_rates: RangeInclusive<u32>,
}

impl PartnerSampler {
    /// Create a sampler drawing rates from the default 23-43% range
    pub fn new(file_type: FileType) -> Self {
        Self { file_type, match_rates: MIN_MATCH_RATE..=MAX_MATCH_RATE }
    }

    /// Range match rates are drawn from
    pub fn match_rates(&self) -> &RangeInclusive<u32> {
        &self.match_rates
    }

    /// Draw a match rate and the sampled records, in sampling order
    pub fn sample<'a, R: Rng + ?Sized>(
        &self,
        pool: &'a LinePool,
        rng: &mut R,
    ) -> (u32, Vec<&'a str>) {
        let match_rate = rng.gen_range(self.match_rates.clone());
        let amount = subset_size(match_rate, pool.len());

        let picked = index::sample(rng, pool.len(), amount)
            .into_iter()
            .map(|i| pool.records[i].as_str())
            .collect();

        (match_rate, picked)
    }

    /// Write `partners` partner files into `output_dir`
    #[instrument(skip(self, pool, rng), fields(pool_size = pool.len(), file_type = %self.file_type))]
    pub fn write_partners<R: Rng + ?Sized>(
        &self,
        pool: &LinePool,
        partners: usize,
        output_dir: &Path,
        rng: &mut R,
    ) -> GeneratorResult<Vec<PartnerFile>> {
        let mut written: Vec<PartnerFile> = Vec::with_capacity(partners);

        for partner in 0..partners {
            let (match_rate, lines) = self.sample(pool, rng);
            let path = output_dir.join(partner_file_name(match_rate, self.file_type));

            for earlier in written.iter_mut().filter(|earlier| earlier.path == path) {
                warn!(
                    "Partner {} drew {}% again, replacing {}",
                    partner + 1,
                    match_rate,
                    path.display()
                );
                earlier.overwritten = true;
            }

            self.write_lines(&path, pool.header(), &lines)?;
            debug!("Partner {} at {}%: {} records", partner + 1, match_rate, lines.len());

            written.push(PartnerFile {
                path,
                match_rate,
                records: lines.len(),
                overwritten: false,
            });
        }

        info!("Wrote {} partner files", written.len());
        Ok(written)
    }

    fn write_lines(&self, path: &Path, header: Option<&str>, lines: &[&str]) -> GeneratorResult<()> {
        write_atomically(path, |writer| {
            for line in header.into_iter().chain(lines.iter().copied()) {
                writer
                    .write_all(line.as_bytes())
                    .and_then(|()| writer.write_all(b"\n"))
                    .map_err(GeneratorError::io("write", path))?;
            }
            Ok(())
        })
    }
}
