//! Identity Profile Generator
//!
//! Synthesizes files of fake identity-graph profiles and derives partner files
//! that each hold a random sample of the generated records, simulating partial
//! data-matching overlap between organizations.
//!
//! # Overview
//!
//! ## Key Features
//!
//! - **Identifier Kinds**: SHA3-256 hashed email surrogates, IDFA/GAID advertising UUIDs and custom hex IDs `c0`..`c9`
//! - **Traits**: optional colour, car manufacturer, age and gender fields
//! - **Two Formats**: CSV with a single header, or JSON lines
//! - **Partner Files**: 23-43% random samples of the primary records
//! - **Reproducible Runs**: one seeded random source threaded through every stage
//!
//! ## Quick Start
//!
//! ```rust
//! use identity_profile_generator::*;
//!
//! let dir = tempfile::tempdir()?;
//! let config = GeneratorConfig {
//!     id_types: vec!["email".to_string(), "idfa".to_string()],
//!     file_type: Some("csv".to_string()),
//!     count: 5,
//!     partners: 2,
//!     seed: Some(42),
//!     output_dir: dir.path().display().to_string(),
//!     ..Default::default()
//! };
//!
//! let summary = GenerationOrchestrator::new(config)?.run()?;
//! assert_eq!(summary.records_written, 5);
//! assert_eq!(summary.partner_files.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Identifier kinds, file types and configuration
//! - [`profile`]: Identifier, trait and profile generation
//! - [`output`]: Serialization, compression and partner sampling
//! - [`generation`]: Orchestration, statistics, logging and errors
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │   Types     │    │   Profile   │    │ Generation  │
//! │             │    │             │    │             │
//! │ IdKind      │◄───┤ Identifiers │◄───┤ Batch       │
//! │ FileType    │    │ Traits      │    │ Orchestrator│
//! │ Config      │    │ Builder     │    │ Summary     │
//! └─────────────┘    └─────────────┘    └─────────────┘
//!                                              │
//!                                              ▼
//!                                       ┌─────────────┐
//!                                       │   Output    │
//!                                       │             │
//!                                       │ Serializer  │
//!                                       │ Gzip        │
//!                                       │ Partners    │
//!                                       └─────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

// Module declarations
pub mod generation;
pub mod output;
pub mod profile;
pub mod types;

// Core types and configuration
pub use types::{
    CliArgs, ConfigError, ConfigValidationError, CustomIdPolicy, FileType, GeneratorConfig,
    IdKind,
};

// Profile synthesis
pub use profile::{IdentifierFactory, Profile, ProfileBuilder, TraitFactory};

// Output artifacts
pub use output::{LinePool, PartnerFile, PartnerSampler, RecordSerializer};

// Generation control
pub use generation::{
    BatchGenerator, GenerationOrchestrator, GeneratorError, GeneratorResult, LoggingConfig,
    RunSummary,
};
