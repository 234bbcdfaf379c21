//! Enumeration types for the profile generator
//!
//! This module contains the enumeration types used throughout the generator,
//! including identifier kinds, output file types and the custom identifier policy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of custom identifier kinds (`c0` through `c9`)
pub const CUSTOM_KIND_COUNT: u8 = 10;

/// Kind of identifier requested for each generated profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum IdKind {
    /// Hashed email surrogate
    Email,
    /// Apple advertising identifier
    Idfa,
    /// Google advertising identifier
    Gaid,
    /// Publisher-provided custom identifier `c0`..`c9`
    Custom(u8),
}

impl IdKind {
    /// Every identifier kind accepted on the command line, in canonical order
    pub fn all() -> Vec<IdKind> {
        let mut kinds = vec![IdKind::Email, IdKind::Idfa, IdKind::Gaid];
        kinds.extend((0..CUSTOM_KIND_COUNT).map(IdKind::Custom));
        kinds
    }

    /// Output field name this kind is written under
    pub fn field_name(&self) -> String {
        match self {
            IdKind::Email => "id_e".to_string(),
            IdKind::Gaid => "id_g".to_string(),
            IdKind::Idfa => "id_a".to_string(),
            IdKind::Custom(n) => format!("id_c{}", n),
        }
    }

    /// Whether this kind belongs to the custom family
    pub fn is_custom(&self) -> bool {
        matches!(self, IdKind::Custom(_))
    }
}

impl fmt::Display for IdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdKind::Email => write!(f, "email"),
            IdKind::Idfa => write!(f, "idfa"),
            IdKind::Gaid => write!(f, "gaid"),
            IdKind::Custom(n) => write!(f, "c{}", n),
        }
    }
}

impl FromStr for IdKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(IdKind::Email),
            "idfa" => Ok(IdKind::Idfa),
            "gaid" => Ok(IdKind::Gaid),
            other => other
                .strip_prefix('c')
                .filter(|digit| digit.len() == 1)
                .and_then(|digit| digit.parse::<u8>().ok())
                .filter(|n| *n < CUSTOM_KIND_COUNT)
                .map(IdKind::Custom)
                .ok_or_else(|| format!("Unknown identifier kind: {}", s)),
        }
    }
}

impl Serialize for IdKind {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for IdKind {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Output file types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    /// Comma separated rows under a single header line
    Csv,
    /// One JSON object per line
    Json,
}

impl FileType {
    /// File extension used for every artifact of this type
    pub fn extension(&self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Json => "json",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Csv => write!(f, "CSV"),
            FileType::Json => write!(f, "JSON"),
        }
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csv" => Ok(FileType::Csv),
            "json" => Ok(FileType::Json),
            _ => Err(format!("Unknown file type: {}", s)),
        }
    }
}

/// How custom identifier kinds within one profile obtain their values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomIdPolicy {
    /// One value per profile, reused by every requested custom kind
    #[default]
    Shared,
    /// A fresh value for each requested custom kind
    Independent,
}

impl fmt::Display for CustomIdPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CustomIdPolicy::Shared => write!(f, "shared"),
            CustomIdPolicy::Independent => write!(f, "independent"),
        }
    }
}

impl FromStr for CustomIdPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "shared" => Ok(CustomIdPolicy::Shared),
            "independent" => Ok(CustomIdPolicy::Independent),
            _ => Err(format!("Unknown custom identifier policy: {}", s)),
        }
    }
}
