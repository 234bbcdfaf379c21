//! Profile synthesis
//!
//! This module contains everything needed to produce a single synthetic
//! identity record.
//!
//! # Overview
//!
//! - **IdentifierFactory**: hashed email surrogates, advertising UUIDs and custom hex identifiers
//! - **TraitFactory**: optional colour, car, age and gender traits
//! - **ProfileBuilder**: maps requested kinds to output fields and assembles a [`Profile`]
//!
//! # Usage Example
//!
//! ```rust
//! use identity_profile_generator::profile::*;
//! use identity_profile_generator::types::{CustomIdPolicy, IdKind};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let builder = ProfileBuilder::new(
//!     vec![IdKind::Email, IdKind::Idfa],
//!     IdentifierFactory::new(36),
//!     TraitFactory::new(false),
//!     CustomIdPolicy::Shared,
//! );
//!
//! let profile = builder.build(&mut rng);
//! assert_eq!(profile.keys().collect::<Vec<_>>(), vec!["id_e", "id_a"]);
//! ```

pub mod builder;
pub mod identifiers;
pub mod record;
pub mod traits;

// Re-export all public types for convenience
pub use builder::*;
pub use identifiers::*;
pub use record::*;
pub use traits::*;
