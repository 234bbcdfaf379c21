//! Generation orchestrator
//!
//! This module contains the GenerationOrchestrator, which owns the random
//! source of a run and drives generation, serialization, compression and
//! partner sampling in that order.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::generation::{BatchGenerator, GeneratorError, GeneratorResult, RunSummary};
use crate::output::{gzip_file, primary_file_name, LinePool, PartnerSampler, RecordSerializer};
use crate::profile::ProfileBuilder;
use crate::types::{FileType, GeneratorConfig};

/// Drives one complete generation run
#[derive(Debug)]
pub struct GenerationOrchestrator {
    /// Validated configuration
    config: GeneratorConfig,
    /// Output file type
    file_type: FileType,
    /// Record generator
    batch_generator: BatchGenerator,
    /// The single random source of the run
    rng: StdRng,
    /// Directory receiving every artifact
    output_dir: PathBuf,
}

impl GenerationOrchestrator {
    /// Validate the configuration and prepare a run
    ///
    /// Nothing is written to disk here, so configuration errors never leave
    /// output behind.
    #[instrument(skip(config), fields(count = config.count, partners = config.partners))]
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        config.validate()?;

        let file_type = config.get_file_type()?;
        let batch_generator = BatchGenerator::new(ProfileBuilder::from_config(&config)?);

        let rng = if let Some(seed) = config.seed {
            info!("Using deterministic seed: {}", seed);
            StdRng::seed_from_u64(seed)
        } else {
            debug!("Using entropy-based random seed");
            StdRng::from_entropy()
        };

        let output_dir = PathBuf::from(&config.output_dir);
        if output_dir.exists() && !output_dir.is_dir() {
            return Err(GeneratorError::configuration_error(format!(
                "output directory '{}' exists and is not a directory",
                output_dir.display()
            )));
        }

        Ok(Self { config, file_type, batch_generator, rng, output_dir })
    }

    /// Configuration of this run
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Directory receiving every artifact
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the primary output file
    pub fn primary_path(&self) -> PathBuf {
        self.output_dir.join(primary_file_name(self.file_type))
    }

    /// Run generation to completion
    ///
    /// The primary file is fully written and closed before it is read back for
    /// compression and partner sampling.
    #[instrument(skip(self), fields(file_type = %self.file_type, output_dir = %self.output_dir.display()))]
    pub fn run(&mut self) -> GeneratorResult<RunSummary> {
        let start_time = Instant::now();

        fs::create_dir_all(&self.output_dir)
            .map_err(GeneratorError::io("create directory", &self.output_dir))?;

        let batch = self.batch_generator.generate(self.config.count, &mut self.rng);

        let primary_path = self.primary_path();
        RecordSerializer::new(self.file_type).write_file(&batch, &primary_path)?;
        let mut summary = RunSummary::new(self.file_type, batch.len(), primary_path.clone());
        summary.seed = self.config.seed;
        drop(batch);

        if self.config.gzip {
            summary.compressed_path = Some(gzip_file(&primary_path)?);
        }

        if self.config.partners > 0 {
            let pool = LinePool::read(&primary_path, self.file_type)?;
            summary.partner_files = PartnerSampler::new(self.file_type).write_partners(
                &pool,
                self.config.partners,
                &self.output_dir,
                &mut self.rng,
            )?;
        }

        summary.set_duration(start_time.elapsed());
        info!(
            "Generation completed: {} profiles, {} partner files in {:.2} seconds",
            summary.records_written,
            summary.partner_files.len(),
            summary.duration.as_secs_f64()
        );

        Ok(summary)
    }
}
