//! Configuration structures for the profile generator
//!
//! This module contains the generator configuration structure, the command line
//! interface and the validation logic that runs before any generation work.

use super::{CustomIdPolicy, FileType, IdKind};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Default length of generated custom identifiers
pub const DEFAULT_PPID_COUNT: usize = 36;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "profile-gen",
    version,
    about = "Profile Generator - Synthesizes identity-graph profiles and partner overlap files",
    long_about = "Generates a file of synthetic identity profiles (hashed emails, mobile advertising IDs, custom IDs and optional traits) and derives partner files that each hold a random 23-43% sample of the generated records.

EXAMPLES:
    # Five CSV profiles with an email hash and an IDFA, plus two partner files
    profile-gen --id-types email idfa --file-type csv --count 5 --partners 2

    # JSON lines with traits, gzip copy, reproducible output
    profile-gen --id-types email gaid c0 --file-type json --count 1000 --add-traits --gzip --seed 42

    # Generate configuration template
    profile-gen --print-config > my-config.json

    # Validate configuration without generating
    profile-gen --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Identifier kinds to generate for every profile
    #[arg(
        long = "id-types",
        visible_alias = "id_types",
        num_args = 1..,
        value_name = "KIND",
        help = "Identifier kinds (email, idfa, gaid, c0..c9)",
        long_help = "One or more identifier kinds to generate for every profile. Supported kinds: email, idfa, gaid, c0 through c9. Each kind may be given once."
    )]
    pub id_types: Vec<String>,

    /// Output file type
    #[arg(
        long = "file-type",
        visible_alias = "file_type",
        help = "Output file type (csv or json)"
    )]
    pub file_type: Option<String>,

    /// Number of profiles to generate
    #[arg(
        long,
        help = "Number of profiles to generate",
        long_help = "Number of profiles written to the primary file. Must be greater than 0."
    )]
    pub count: Option<usize>,

    /// Number of partner files to derive
    #[arg(long, help = "Number of partner files to derive (default: 0)")]
    pub partners: Option<usize>,

    /// Length of custom identifiers
    #[arg(
        long = "ppid-count",
        visible_alias = "ppid_count",
        help = "Length of custom identifiers in hex characters (default: 36)"
    )]
    pub ppid_count: Option<usize>,

    /// Attach descriptive traits to every profile
    #[arg(
        long = "add-traits",
        visible_alias = "add_traits",
        overrides_with = "no_add_traits",
        help = "Attach colour, car, age and gender traits"
    )]
    pub add_traits: bool,

    /// Do not attach traits, even when the configuration file enables them
    #[arg(
        long = "no-add-traits",
        visible_alias = "no-add_traits",
        overrides_with = "add_traits",
        help = "Do not attach traits (overrides the configuration file)"
    )]
    pub no_add_traits: bool,

    /// Write a gzip copy of the primary file
    #[arg(long, overrides_with = "no_gzip", help = "Write a gzip compressed copy of the primary file")]
    pub gzip: bool,

    /// Do not write a gzip copy, even when the configuration file enables it
    #[arg(
        long = "no-gzip",
        overrides_with = "gzip",
        help = "Do not write a gzip copy (overrides the configuration file)"
    )]
    pub no_gzip: bool,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Directory receiving every output file
    #[arg(long = "output-dir", help = "Directory for output files (default: current directory)")]
    pub output_dir: Option<String>,

    /// Policy for custom identifier values within a profile
    #[arg(
        long = "custom-id-policy",
        help = "Custom identifier policy (shared or independent)",
        long_help = "How custom identifier kinds within one profile get their values. 'shared' reuses one generated value for every custom kind in the profile, 'independent' draws a fresh value per kind. Default: shared"
    )]
    pub custom_id_policy: Option<String>,

    /// Directory for log files
    #[arg(long = "log-dir", help = "Also write JSON logs to daily files in this directory")]
    pub log_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without generating
    #[arg(long, help = "Validate configuration without generating any files")]
    pub dry_run: bool,

    /// Print a starter configuration and exit
    #[arg(long, help = "Print a valid starter configuration in JSON format and exit")]
    pub print_config: bool,
}

impl CliArgs {
    /// Traits setting given on the command line, if any
    pub fn add_traits_override(&self) -> Option<bool> {
        switch(self.add_traits, self.no_add_traits)
    }

    /// Gzip setting given on the command line, if any
    pub fn gzip_override(&self) -> Option<bool> {
        switch(self.gzip, self.no_gzip)
    }
}

/// Collapse an `--x` / `--no-x` flag pair; the later flag already cleared the other
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Identifier kinds to generate
    pub id_types: Option<Vec<String>>,

    /// Output file type
    pub file_type: Option<String>,

    /// Number of profiles to generate
    pub count: Option<usize>,

    /// Number of partner files to derive
    pub partners: Option<usize>,

    /// Length of custom identifiers
    pub ppid_count: Option<usize>,

    /// Attach descriptive traits
    pub add_traits: Option<bool>,

    /// Write a gzip copy of the primary file
    pub gzip: Option<bool>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Directory receiving every output file
    pub output_dir: Option<String>,

    /// Policy for custom identifier values within a profile
    pub custom_id_policy: Option<String>,
}

/// Configuration for a generation run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorConfig {
    /// Identifier kinds to generate, in output column order
    pub id_types: Vec<String>,

    /// Output file type (`csv` or `json`)
    pub file_type: Option<String>,

    /// Number of profiles to generate
    pub count: usize,

    /// Number of partner files to derive
    pub partners: usize,

    /// Length of custom identifiers in hex characters
    pub ppid_count: usize,

    /// Attach descriptive traits to every profile
    pub add_traits: bool,

    /// Write a gzip copy of the primary file
    pub gzip: bool,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Directory receiving every output file
    pub output_dir: String,

    /// Policy for custom identifier values within a profile
    pub custom_id_policy: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for generator configuration
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigValidationError {
    /// No identifier kinds were requested
    #[error("At least one identifier kind must be requested (email, idfa, gaid, c0..c9)")]
    MissingIdTypes,

    /// Identifier kind outside the supported set
    #[error("Unknown identifier kind '{0}' (supported: email, idfa, gaid, c0..c9)")]
    UnknownIdKind(String),

    /// Identifier kind requested more than once
    #[error("Identifier kind '{0}' was requested more than once")]
    DuplicateIdKind(String),

    /// No file type was given
    #[error("A file type must be given (csv or json)")]
    MissingFileType,

    /// File type outside the supported set
    #[error("Unsupported file type '{0}' (supported: csv, json)")]
    UnsupportedFileType(String),

    /// Profile count is invalid
    #[error("Count must be greater than 0, got {0}")]
    InvalidCount(usize),

    /// Custom identifier length is invalid
    #[error("Custom identifier length must be greater than 0, got {0}")]
    InvalidPpidCount(usize),

    /// Custom identifier policy outside the supported set
    #[error("Unknown custom identifier policy '{0}' (supported: shared, independent)")]
    UnknownCustomIdPolicy(String),
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            id_types: Vec::new(),
            file_type: None,
            count: 0,
            partners: 0,
            ppid_count: DEFAULT_PPID_COUNT,
            add_traits: false,
            gzip: false,
            seed: None,
            output_dir: ".".to_string(),
            custom_id_policy: CustomIdPolicy::default().to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // CLI takes precedence over the file
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            id_types: config_file.id_types.unwrap_or(defaults.id_types),
            file_type: config_file.file_type.or(defaults.file_type),
            count: config_file.count.unwrap_or(defaults.count),
            partners: config_file.partners.unwrap_or(defaults.partners),
            ppid_count: config_file.ppid_count.unwrap_or(defaults.ppid_count),
            add_traits: config_file.add_traits.unwrap_or(defaults.add_traits),
            gzip: config_file.gzip.unwrap_or(defaults.gzip),
            seed: config_file.seed.or(defaults.seed),
            output_dir: config_file.output_dir.unwrap_or(defaults.output_dir),
            custom_id_policy: config_file
                .custom_id_policy
                .unwrap_or(defaults.custom_id_policy),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        let add_traits_override = args.add_traits_override();
        let gzip_override = args.gzip_override();
        if !args.id_types.is_empty() {
            config.id_types = args.id_types;
        }
        if let Some(value) = args.file_type {
            config.file_type = Some(value);
        }
        if let Some(value) = args.count {
            config.count = value;
        }
        if let Some(value) = args.partners {
            config.partners = value;
        }
        if let Some(value) = args.ppid_count {
            config.ppid_count = value;
        }
        if let Some(value) = add_traits_override {
            config.add_traits = value;
        }
        if let Some(value) = gzip_override {
            config.gzip = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.output_dir {
            config.output_dir = value;
        }
        if let Some(value) = args.custom_id_policy {
            config.custom_id_policy = value;
        }
    }

    /// Valid starter configuration printed by `--print-config`
    pub fn template() -> Self {
        Self {
            id_types: vec![IdKind::Email.to_string()],
            file_type: Some(FileType::Csv.extension().to_string()),
            count: 100,
            ..Self::default()
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        self.id_kinds()?;
        self.get_file_type()?;

        if self.count == 0 {
            return Err(ConfigValidationError::InvalidCount(self.count));
        }

        if self.ppid_count == 0 {
            return Err(ConfigValidationError::InvalidPpidCount(self.ppid_count));
        }

        self.get_custom_id_policy()?;

        Ok(())
    }

    /// Parse the requested identifier kinds, rejecting unknown and repeated kinds
    pub fn id_kinds(&self) -> Result<Vec<IdKind>, ConfigValidationError> {
        if self.id_types.is_empty() {
            return Err(ConfigValidationError::MissingIdTypes);
        }

        let mut seen = HashSet::new();
        let mut kinds = Vec::with_capacity(self.id_types.len());
        for raw in &self.id_types {
            let kind: IdKind = raw
                .parse()
                .map_err(|_| ConfigValidationError::UnknownIdKind(raw.clone()))?;
            if !seen.insert(kind) {
                return Err(ConfigValidationError::DuplicateIdKind(raw.clone()));
            }
            kinds.push(kind);
        }

        Ok(kinds)
    }

    /// Get the output file type
    pub fn get_file_type(&self) -> Result<FileType, ConfigValidationError> {
        let raw = self
            .file_type
            .as_deref()
            .ok_or(ConfigValidationError::MissingFileType)?;
        raw.parse()
            .map_err(|_| ConfigValidationError::UnsupportedFileType(raw.to_string()))
    }

    /// Get the custom identifier policy
    pub fn get_custom_id_policy(&self) -> Result<CustomIdPolicy, ConfigValidationError> {
        self.custom_id_policy
            .parse()
            .map_err(|_| ConfigValidationError::UnknownCustomIdPolicy(self.custom_id_policy.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn valid_config() -> GeneratorConfig {
        GeneratorConfig {
            id_types: vec!["email".to_string(), "idfa".to_string()],
            file_type: Some("csv".to_string()),
            count: 5,
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = GeneratorConfig::default();
        assert!(config.id_types.is_empty());
        assert_eq!(config.file_type, None);
        assert_eq!(config.partners, 0);
        assert_eq!(config.ppid_count, 36);
        assert!(!config.add_traits);
        assert!(!config.gzip);
        assert_eq!(config.output_dir, ".");
        assert_eq!(config.custom_id_policy, "shared");
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = GeneratorConfig { count: 0, ..valid_config() };
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidCount(0)));
    }

    #[test]
    fn test_zero_ppid_count_rejected() {
        let config = GeneratorConfig { ppid_count: 0, ..valid_config() };
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidPpidCount(0)));
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let config = GeneratorConfig {
            id_types: vec!["c1".to_string(), "email".to_string(), "c1".to_string()],
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::DuplicateIdKind("c1".to_string()))
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let config = GeneratorConfig {
            id_types: vec!["email".to_string(), "phone".to_string()],
            ..valid_config()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnknownIdKind("phone".to_string()))
        );
    }

    #[test]
    fn test_missing_values_rejected() {
        let config = GeneratorConfig { id_types: Vec::new(), ..valid_config() };
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingIdTypes));

        let config = GeneratorConfig { file_type: None, ..valid_config() };
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingFileType));

        let config = GeneratorConfig { file_type: Some("parquet".to_string()), ..valid_config() };
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::UnsupportedFileType("parquet".to_string()))
        );
    }

    #[test]
    fn test_id_kinds_keep_request_order() {
        let config = GeneratorConfig {
            id_types: vec!["c4".to_string(), "gaid".to_string(), "email".to_string()],
            ..valid_config()
        };
        assert_eq!(
            config.id_kinds().unwrap(),
            vec![IdKind::Custom(4), IdKind::Gaid, IdKind::Email]
        );
    }

    #[test]
    fn test_config_file_merges_with_defaults() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"id_types": ["gaid"], "file_type": "json", "count": 12, "gzip": true}}"#)
            .unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.id_types, vec!["gaid".to_string()]);
        assert_eq!(config.file_type.as_deref(), Some("json"));
        assert_eq!(config.count, 12);
        assert!(config.gzip);
        assert_eq!(config.ppid_count, DEFAULT_PPID_COUNT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_file_errors() {
        assert!(matches!(
            GeneratorConfig::from_file("/definitely/not/here.json"),
            Err(ConfigError::FileNotFound(_))
        ));

        let file = NamedTempFile::new().unwrap();
        assert!(matches!(
            GeneratorConfig::from_file(file.path()),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_template_is_valid() {
        let template = GeneratorConfig::template();
        assert!(template.validate().is_ok());
        assert_eq!(template.id_kinds().unwrap(), vec![IdKind::Email]);
        assert_eq!(template.get_file_type().unwrap(), FileType::Csv);
        assert_eq!(template.count, 100);

        let parsed: GeneratorConfig = serde_json::from_str(&template.print_json().unwrap()).unwrap();
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_negative_flags_override_config_file() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"id_types": ["email"], "file_type": "csv", "count": 3, "gzip": true, "add_traits": true}}"#
        )
        .unwrap();
        let path = file.path().display().to_string();

        let args = CliArgs::try_parse_from(["test", "--config", path.as_str(), "--no-gzip", "--no-add-traits"])
            .unwrap();
        assert_eq!(args.gzip_override(), Some(false));
        assert_eq!(args.add_traits_override(), Some(false));

        let config = GeneratorConfig::from_cli_args(args).unwrap();
        assert!(!config.gzip);
        assert!(!config.add_traits);

        let args = CliArgs::try_parse_from(["test", "--config", path.as_str()]).unwrap();
        assert_eq!(args.gzip_override(), None);
        let config = GeneratorConfig::from_cli_args(args).unwrap();
        assert!(config.gzip);
        assert!(config.add_traits);
    }

    #[test]
    fn test_last_of_flag_pair_wins() {
        let args = CliArgs::try_parse_from(["test", "--gzip", "--no-gzip"]).unwrap();
        assert_eq!(args.gzip_override(), Some(false));

        let args = CliArgs::try_parse_from(["test", "--no-add_traits", "--add-traits"]).unwrap();
        assert_eq!(args.add_traits_override(), Some(true));
    }

    #[test]
    fn test_print_json_round_trips() {
        let config = valid_config();
        let json = config.print_json().unwrap();
        let parsed: GeneratorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
