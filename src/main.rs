// Spatial Learning Data - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/spatial-learning-data
// ```
//
// Or a single task with custom configuration:
//
// ```console
// $ ./target/release/spatial-learning-data hotels --num-positive 500 --num-negative 500 --seed 7 --verbose
// $ ./target/release/spatial-learning-data convert-trace data/*.csv -o moves
// $ ./target/release/spatial-learning-data sample data/osm --sizes 10,100,1000 --seed 3
// ```

use anyhow::{Context, Result};
use clap::Parser;
use spatial_learning_data::pipeline::{DatasetOrchestrator, GenerationStatistics, LoggingConfig};
use spatial_learning_data::sample::DEFAULT_SAMPLE_SIZES;
use spatial_learning_data::types::{CliArgs, Command, GeneratorConfig};
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    if args.print_config {
        match GeneratorConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    // Flushes file logs on drop
    let _guard = match logging_result {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(args) {
        error!("Generation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: CliArgs) -> Result<()> {
    info!("Starting spatial learning data generator");

    let command = args.command.clone();
    let dry_run = args.dry_run;

    let config =
        GeneratorConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - no data will be generated.");
        print_configuration_summary(&config, command.as_ref());
        return Ok(());
    }

    print_startup_banner(&config, command.as_ref());

    let mut orchestrator =
        DatasetOrchestrator::new(config).context("Failed to initialize the orchestrator")?;
    let statistics = orchestrator.run(command.as_ref()).context("Failed to generate datasets")?;

    print_final_statistics(&statistics);
    info!("Spatial learning data generator completed successfully");
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &GeneratorConfig, command: Option<&Command>) {
    eprintln!("Spatial Learning Data");
    eprintln!("=====================");
    eprintln!("Synthetic geospatial datasets for concept learning");
    eprintln!();

    print_configuration_summary(config, command);
}

fn print_configuration_summary(config: &GeneratorConfig, command: Option<&Command>) {
    eprintln!("Configuration:");
    eprintln!("  Center: ({}, {})", config.center_lon, config.center_lat);
    eprintln!("  Output Directory: {}", config.output_dir);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }

    let primitives = matches!(command, None | Some(Command::Primitives { .. }));
    let hotels = matches!(command, None | Some(Command::Hotels { .. }));

    if primitives {
        eprintln!("  Primitive Sample Sizes: {:?}", config.sample_sizes);
        eprintln!(
            "  Line String Points: {} - {}",
            config.min_line_points, config.max_line_points
        );
        eprintln!(
            "  Polygon Points: {} - {}",
            config.min_polygon_points, config.max_polygon_points
        );
    }
    if hotels {
        eprintln!(
            "  Hotels: {} car friendly, {} not car friendly",
            config.num_positive, config.num_negative
        );
        eprintln!("  Rooms per Hotel: {} - {}", config.min_rooms, config.max_rooms);
        eprintln!("  Room Size: {}", config.room_size);
    }
    if let Some(Command::ConvertTrace { inputs }) = command {
        eprintln!("  Trace Files: {}", inputs.len());
    }
    if let Some(Command::Sample { data_dir, sizes }) = command {
        eprintln!("  Sample Data Directory: {}", data_dir.display());
        match sizes {
            Some(sizes) => eprintln!("  Sample Sizes: {:?}", sizes),
            None => eprintln!("  Sample Sizes: {:?}", DEFAULT_SAMPLE_SIZES),
        }
    }
    eprintln!();
}

fn print_final_statistics(statistics: &GenerationStatistics) {
    eprintln!("{}", statistics);
}
