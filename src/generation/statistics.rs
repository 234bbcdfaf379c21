//! Run statistics
//!
//! Collects what a generation run produced and renders the summary printed at
//! the end of a run.

use serde::Serialize;
use std::fmt::Write as _;
use std::path::PathBuf;
use std::time::Duration;

use crate::output::PartnerFile;
use crate::types::FileType;

/// Summary of a completed generation run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Output file type
    pub file_type: FileType,
    /// Number of profiles written to the primary file
    pub records_written: usize,
    /// Path of the primary file
    pub primary_path: PathBuf,
    /// Path of the gzip copy, when written
    pub compressed_path: Option<PathBuf>,
    /// Every partner file in the order it was written
    pub partner_files: Vec<PartnerFile>,
    /// Seed used, when the run was seeded
    pub seed: Option<u64>,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Create a summary for a freshly written primary file
    pub fn new(file_type: FileType, records_written: usize, primary_path: PathBuf) -> Self {
        Self {
            file_type,
            records_written,
            primary_path,
            compressed_path: None,
            partner_files: Vec::new(),
            seed: None,
            duration: Duration::ZERO,
        }
    }

    /// Set the run duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Partner files still on disk (not replaced by a later partner)
    pub fn live_partner_files(&self) -> impl Iterator<Item = &PartnerFile> {
        self.partner_files.iter().filter(|partner| !partner.overwritten)
    }

    /// Number of partner files replaced because their rate repeated
    pub fn overwritten_partner_count(&self) -> usize {
        self.partner_files.iter().filter(|partner| partner.overwritten).count()
    }

    /// Average match rate across all partner draws, in percent
    pub fn average_match_rate(&self) -> Option<f64> {
        if self.partner_files.is_empty() {
            return None;
        }
        let total: u32 = self.partner_files.iter().map(|partner| partner.match_rate).sum();
        Some(total as f64 / self.partner_files.len() as f64)
    }

    /// Profiles generated per second
    pub fn records_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.records_written as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }

    /// Human readable summary for the end of a run
    pub fn generate_summary_output(&self) -> String {
        let mut output = String::new();

        let _ = writeln!(output, "Generation Summary");
        let _ = writeln!(output, "==================");
        let _ = writeln!(
            output,
            "  Profiles Written: {} ({})",
            self.records_written, self.file_type
        );
        let _ = writeln!(output, "  Primary File: {}", self.primary_path.display());
        if let Some(path) = &self.compressed_path {
            let _ = writeln!(output, "  Compressed Copy: {}", path.display());
        }
        if let Some(seed) = self.seed {
            let _ = writeln!(output, "  Random Seed: {}", seed);
        }

        if self.partner_files.is_empty() {
            let _ = writeln!(output, "  Partner Files: none");
        } else {
            let _ = writeln!(output, "  Partner Files: {}", self.partner_files.len());
            for partner in &self.partner_files {
                let _ = writeln!(
                    output,
                    "    {:>2}% -> {} records  {}{}",
                    partner.match_rate,
                    partner.records,
                    partner.path.display(),
                    if partner.overwritten { "  (replaced by a later partner)" } else { "" }
                );
            }
            if let Some(average) = self.average_match_rate() {
                let _ = writeln!(output, "  Average Match Rate: {:.1}%", average);
            }
        }

        let _ = writeln!(
            output,
            "  Runtime: {:.2} seconds ({:.0} profiles/second)",
            self.duration.as_secs_f64(),
            self.records_per_second()
        );

        output
    }
}
