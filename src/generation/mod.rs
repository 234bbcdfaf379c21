//! Generation orchestration and control
//!
//! This module contains the run orchestrator, the batch generator, run
//! statistics, logging setup and error handling.
//!
//! # Overview
//!
//! - **GenerationOrchestrator**: owns the random source and runs every stage in order
//! - **BatchGenerator**: materializes a batch of profiles
//! - **RunSummary**: what a run wrote, printed at the end of the run
//! - **LoggingConfig**: tracing subscriber setup
//! - **GeneratorError**: error handling for every stage
//!
//! # Usage Example
//!
//! ```rust,no_run
//! use identity_profile_generator::generation::*;
//! use identity_profile_generator::types::*;
//!
//! let config = GeneratorConfig {
//!     id_types: vec!["email".to_string(), "gaid".to_string()],
//!     file_type: Some("json".to_string()),
//!     count: 1000,
//!     partners: 3,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let mut orchestrator = GenerationOrchestrator::new(config)?;
//! let summary = orchestrator.run()?;
//! eprintln!("{}", summary.generate_summary_output());
//! # Ok::<(), GeneratorError>(())
//! ```

pub mod batch_generator;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod statistics;

// Re-export all public types for convenience
pub use batch_generator::*;
pub use error::*;
pub use logging::*;
pub use orchestrator::*;
pub use statistics::*;
