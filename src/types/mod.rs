//! Core types and configuration for the profile generator
//!
//! This module contains the fundamental enumerations and the configuration
//! structures used throughout the generator.
//!
//! # Overview
//!
//! - **Enums**: identifier kinds, output file types and the custom identifier policy
//! - **Configuration**: generator configuration with validation and CLI support
//!
//! # Usage Example
//!
//! ```rust
//! use identity_profile_generator::types::*;
//!
//! let config = GeneratorConfig {
//!     id_types: vec!["email".to_string(), "idfa".to_string()],
//!     file_type: Some("csv".to_string()),
//!     count: 100,
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.id_kinds().unwrap(), vec![IdKind::Email, IdKind::Idfa]);
//! ```

pub mod config;
pub mod enums;

// Re-export all public types for convenience
pub use config::*;
pub use enums::*;
