// Profile Generator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/profile-gen --id-types email idfa --file-type csv --count 5 --partners 2
// ```
//
// Or with a configuration file:
//
// ```console
// $ ./target/release/profile-gen --config profiles.json --gzip --verbose
// ```

use anyhow::Context;
use clap::Parser;
use identity_profile_generator::generation::{GenerationOrchestrator, LoggingConfig, RunSummary};
use identity_profile_generator::types::config::CliArgs;
use identity_profile_generator::types::GeneratorConfig;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match GeneratorConfig::template().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize configuration template: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let mut logging = if args.debug {
        LoggingConfig::new().with_level(tracing::Level::DEBUG).with_span_events()
    } else if args.verbose {
        LoggingConfig::new().with_level(tracing::Level::INFO)
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(tracing::Level::WARN)
    };
    if let Some(log_dir) = &args.log_dir {
        logging = logging.with_file_logging(log_dir.clone());
    }

    let _logging_guard = match logging.init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    let dry_run = args.dry_run;
    if let Err(e) = run(args, dry_run) {
        error!("Profile generation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Load, validate and execute the configuration
fn run(args: CliArgs, dry_run: bool) -> anyhow::Result<()> {
    let config = GeneratorConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no files will be written.");
        print_configuration_summary(&config);
        return Ok(());
    }

    print_configuration_summary(&config);

    let mut orchestrator =
        GenerationOrchestrator::new(config).context("Failed to prepare generation run")?;
    let summary = orchestrator.run().context("Generation run failed")?;

    print_run_summary(&summary);
    info!("Profile generation completed successfully");
    Ok(())
}

/// Print configuration summary
fn print_configuration_summary(config: &GeneratorConfig) {
    eprintln!("Configuration:");
    eprintln!("  Identifier Kinds: {}", config.id_types.join(", "));
    eprintln!("  File Type: {}", config.file_type.as_deref().unwrap_or("-"));
    eprintln!("  Profile Count: {}", config.count);
    eprintln!("  Partner Files: {}", config.partners);
    eprintln!("  Custom ID Length: {}", config.ppid_count);
    eprintln!("  Custom ID Policy: {}", config.custom_id_policy);
    eprintln!("  Traits: {}", if config.add_traits { "yes" } else { "no" });
    eprintln!("  Gzip Copy: {}", if config.gzip { "yes" } else { "no" });
    eprintln!("  Output Directory: {}", config.output_dir);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}

/// Print the end-of-run summary
fn print_run_summary(summary: &RunSummary) {
    eprintln!("{}", summary.generate_summary_output());
}
