//! Profile composition
//!
//! The builder maps every requested identifier kind to its output field and
//! merges in trait fields when enabled.

use rand::Rng;
use tracing::debug;

use crate::profile::{IdentifierFactory, Profile, TraitFactory, TRAIT_FIELDS};
use crate::types::{ConfigValidationError, CustomIdPolicy, GeneratorConfig, IdKind};

/// Builds one profile at a time from a fixed set of requested kinds
#[derive(Debug, Clone)]
pub struct ProfileBuilder {
    kinds: Vec<IdKind>,
    identifiers: IdentifierFactory,
    traits: TraitFactory,
    policy: CustomIdPolicy,
}

impl ProfileBuilder {
    /// Create a builder for the given kinds, in output order
    pub fn new(
        kinds: Vec<IdKind>,
        identifiers: IdentifierFactory,
        traits: TraitFactory,
        policy: CustomIdPolicy,
    ) -> Self {
        Self { kinds, identifiers, traits, policy }
    }

    /// Create a builder from a configuration, validating the requested kinds
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigValidationError> {
        let kinds = config.id_kinds()?;
        let policy = config.get_custom_id_policy()?;
        if config.ppid_count == 0 {
            return Err(ConfigValidationError::InvalidPpidCount(config.ppid_count));
        }

        debug!(
            "Profile builder: kinds={:?} ppid_count={} traits={} policy={}",
            kinds, config.ppid_count, config.add_traits, policy
        );

        Ok(Self::new(
            kinds,
            IdentifierFactory::new(config.ppid_count),
            TraitFactory::new(config.add_traits),
            policy,
        ))
    }

    /// Requested identifier kinds
    pub fn kinds(&self) -> &[IdKind] {
        &self.kinds
    }

    /// Custom identifier policy in effect
    pub fn policy(&self) -> CustomIdPolicy {
        self.policy
    }

    /// Field names every built profile carries, in output order
    pub fn field_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(self.kinds.len() + TRAIT_FIELDS.len());
        for name in self.kinds.iter().map(IdKind::field_name) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        if self.traits.is_enabled() {
            names.extend(TRAIT_FIELDS.iter().map(|name| name.to_string()));
        }
        names
    }

    /// Build one profile
    ///
    /// Draw order: the shared custom value (only when a custom kind is requested
    /// under the shared policy), then each kind in request order, then traits.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R) -> Profile {
        let shared_custom = match self.policy {
            CustomIdPolicy::Shared if self.kinds.iter().any(IdKind::is_custom) => {
                Some(self.identifiers.custom_id(rng))
            }
            _ => None,
        };

        let mut profile = Profile::new();
        for kind in &self.kinds {
            let value = match (kind, &shared_custom) {
                (IdKind::Custom(_), Some(shared)) => shared.clone(),
                _ => self.identifiers.generate(*kind, rng),
            };
            profile.insert(kind.field_name(), value);
        }

        for (name, value) in self.traits.generate(rng) {
            profile.insert(name, value);
        }

        profile
    }
}
