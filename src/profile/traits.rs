//! Descriptive trait generation
//!
//! Traits are drawn uniformly from closed vocabularies and attached after the
//! identifier fields of a profile.

use rand::Rng;

/// Field name of the colour trait
pub const TRAIT_COLOUR: &str = "trait_colour";
/// Field name of the car manufacturer trait
pub const TRAIT_CAR: &str = "trait_car";
/// Field name of the age trait
pub const TRAIT_AGE: &str = "trait_age";
/// Field name of the gender trait
pub const TRAIT_GENDER: &str = "trait_gender";

/// Trait field names in output order
pub const TRAIT_FIELDS: [&str; 4] = [TRAIT_COLOUR, TRAIT_CAR, TRAIT_AGE, TRAIT_GENDER];

/// Colour vocabulary
pub const COLOURS: [&str; 10] = [
    "red", "green", "blue", "yellow", "orange", "purple", "pink", "brown", "black", "white",
];

/// Car manufacturer vocabulary
pub const CAR_MANUFACTURERS: [&str; 10] = [
    "Ford", "Toyota", "Honda", "GM", "Tesla", "VW", "Mercedes", "BMW", "Audi", "Fiat",
];

/// Gender vocabulary
pub const GENDERS: [&str; 2] = ["male", "female"];

/// Youngest generated age
pub const MIN_AGE: u8 = 18;
/// Oldest generated age
pub const MAX_AGE: u8 = 45;

/// Factory for trait fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraitFactory {
    enabled: bool,
}

impl TraitFactory {
    /// Create a factory; a disabled factory produces no fields
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether traits are attached
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Draw the trait fields in output order, or nothing when disabled
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<(&'static str, String)> {
        if !self.enabled {
            return Vec::new();
        }

        vec![
            (TRAIT_COLOUR, pick(&COLOURS, rng).to_string()),
            (TRAIT_CAR, pick(&CAR_MANUFACTURERS, rng).to_string()),
            (TRAIT_AGE, rng.gen_range(MIN_AGE..=MAX_AGE).to_string()),
            (TRAIT_GENDER, pick(&GENDERS, rng).to_string()),
        ]
    }
}

fn pick<'a, R: Rng + ?Sized>(vocabulary: &[&'a str], rng: &mut R) -> &'a str {
    vocabulary[rng.gen_range(0..vocabulary.len())]
}
