//! Output artifacts
//!
//! This module writes everything a run produces:
//!
//! - **RecordSerializer**: the primary `clusters.<csv|json>` file
//! - **Compression**: the optional gzip copy of the primary file
//! - **PartnerSampler**: the `<rate>% match rate.<csv|json>` subset files
//!
//! Every file goes through [`write_atomically`], so a file under its final
//! name is always complete.

pub mod atomic;
pub mod compression;
pub mod partners;
pub mod serializer;

// Re-export all public types for convenience
pub use atomic::*;
pub use compression::*;
pub use partners::*;
pub use serializer::*;
