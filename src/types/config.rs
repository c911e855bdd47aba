//! Configuration structures for the spatial learning data generator
//!
//! This module contains the generator configuration, its validation, the JSON
//! configuration file format and the command line interface.

use crate::generator::{HotelSettings, PrimitiveSettings};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "spatial-learning-data",
    version,
    about = "Generates synthetic geospatial learning data",
    long_about = "Generates random points, line strings and polygons as well as labeled car-friendly and not-car-friendly hotels, rendered as Turtle knowledge bases, PostGIS load scripts and example lists. Also converts GPS traces into move descriptions.

EXAMPLES:
    # Generate primitives and hotels with default settings
    spatial-learning-data

    # Primitive knowledge bases for three sample sizes
    spatial-learning-data primitives --sample-sizes 10,100,1000

    # 200 positive and 50 negative hotels, reproducible
    spatial-learning-data --seed 42 hotels --num-positive 200 --num-negative 50

    # Convert GPS traces
    spatial-learning-data convert-trace trace_01.csv trace_02.csv

    # Generate configuration template
    spatial-learning-data --print-config > my-config.json

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// What to generate; primitives and hotels when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        global = true,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Directory output files are written to
    #[arg(short, long, global = true, help = "Output directory")]
    pub output_dir: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, global = true, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Longitude primitives are scattered around
    #[arg(long, global = true, allow_hyphen_values = true, help = "Center longitude")]
    pub center_lon: Option<f64>,

    /// Latitude primitives are scattered around
    #[arg(long, global = true, allow_hyphen_values = true, help = "Center latitude")]
    pub center_lat: Option<f64>,

    /// Enable verbose logging
    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true, help = "Enable debug logging")]
    pub debug: bool,

    /// Validate configuration without generating anything
    #[arg(long, global = true, help = "Validate configuration without generating data")]
    pub dry_run: bool,

    /// Print default configuration in JSON format and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Generation tasks
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Random points, line strings and polygons
    Primitives {
        /// Comma-separated dataset sizes; one knowledge base per size
        #[arg(long, value_delimiter = ',')]
        sample_sizes: Option<Vec<usize>>,
    },

    /// Car-friendly and not-car-friendly hotels
    Hotels {
        /// Number of car-friendly hotels
        #[arg(long)]
        num_positive: Option<usize>,

        /// Number of not-car-friendly hotels
        #[arg(long)]
        num_negative: Option<usize>,
    },

    /// Convert GPS trace CSV files into move descriptions
    ConvertTrace {
        /// Trace files to convert
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Draw proportional samples from the N-Triples datasets in a directory
    Sample {
        /// Directory holding the `.nt` files to sample from
        data_dir: PathBuf,

        /// Comma-separated sample sizes; defaults to 10 up to 50 million
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<usize>>,
    },
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Longitude primitives are scattered around
    pub center_lon: Option<f64>,
    /// Latitude primitives are scattered around
    pub center_lat: Option<f64>,
    /// Fewest points of a line string
    pub min_line_points: Option<usize>,
    /// Most points of a line string
    pub max_line_points: Option<usize>,
    /// Fewest distinct points of a polygon
    pub min_polygon_points: Option<usize>,
    /// Most distinct points of a polygon
    pub max_polygon_points: Option<usize>,
    /// Primitive dataset sizes
    pub sample_sizes: Option<Vec<usize>>,
    /// Number of car-friendly hotels
    pub num_positive: Option<usize>,
    /// Number of not-car-friendly hotels
    pub num_negative: Option<usize>,
    /// Standard deviation of hotel centers
    pub hotel_center_stdev: Option<f64>,
    /// Side length of a hotel room
    pub room_size: Option<f64>,
    /// Fewest rooms per hotel
    pub min_rooms: Option<usize>,
    /// Most rooms per hotel
    pub max_rooms: Option<usize>,
    /// Output directory
    pub output_dir: Option<String>,
    /// Random seed for reproducible results
    pub seed: Option<u64>,
}

/// Configuration for a generation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Longitude primitives and hotels are placed around
    pub center_lon: f64,
    /// Latitude primitives and hotels are placed around
    pub center_lat: f64,
    /// Fewest points of a line string
    pub min_line_points: usize,
    /// Most points of a line string
    pub max_line_points: usize,
    /// Fewest distinct points of a polygon
    pub min_polygon_points: usize,
    /// Most distinct points of a polygon
    pub max_polygon_points: usize,
    /// Primitive dataset sizes; one knowledge base and load script per size
    pub sample_sizes: Vec<usize>,
    /// Number of car-friendly hotels
    pub num_positive: usize,
    /// Number of not-car-friendly hotels
    pub num_negative: usize,
    /// Standard deviation of hotel centers around the center coordinate
    pub hotel_center_stdev: f64,
    /// Side length of a hotel room, in degrees
    pub room_size: f64,
    /// Fewest rooms per hotel
    pub min_rooms: usize,
    /// Most rooms per hotel
    pub max_rooms: usize,
    /// Directory output files are written to
    pub output_dir: String,
    /// Random seed; entropy-seeded when absent
    pub seed: Option<u64>,
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

    /// Unsupported file extension
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// Center outside the valid coordinate range
    #[error("Invalid center coordinate ({lon}, {lat})")]
    InvalidCenter {
        /// Longitude
        lon: f64,
        /// Latitude
        lat: f64,
    },

    /// Line string point range
    #[error("Invalid line string point range: min ({0}) must be >= 3 and <= max ({1})")]
    InvalidLinePointRange(usize, usize),

    /// Polygon point range
    #[error("Invalid polygon point range: min ({0}) must be >= 3 and <= max ({1})")]
    InvalidPolygonPointRange(usize, usize),

    /// Room count range
    #[error("Invalid room range: min ({0}) must be >= 3 and <= max ({1})")]
    InvalidRoomRange(usize, usize),

    /// Room size not a positive number
    #[error("Room size must be a positive number, got {0}")]
    InvalidRoomSize(f64),

    /// Hotel center deviation negative or not finite
    #[error("Hotel center deviation must be a non-negative number, got {0}")]
    InvalidCenterDeviation(f64),

    /// Missing output directory
    #[error("Output directory must not be empty")]
    EmptyOutputDirectory,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        let primitives = PrimitiveSettings::default();
        let hotels = HotelSettings::default();
        Self {
            center_lon: primitives.center_lon,
            center_lat: primitives.center_lat,
            min_line_points: primitives.min_line_points,
            max_line_points: primitives.max_line_points,
            min_polygon_points: primitives.min_polygon_points,
            max_polygon_points: primitives.max_polygon_points,
            sample_sizes: vec![10, 100, 1000],
            num_positive: 100,
            num_negative: 100,
            hotel_center_stdev: hotels.center_stdev,
            room_size: hotels.room_size,
            min_rooms: hotels.min_rooms,
            max_rooms: hotels.max_rooms,
            output_dir: "output".to_string(),
            seed: None,
        }
    }
}

impl GeneratorConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        config.apply_cli_overrides(args);
        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let content = fs::read_to_string(path)?;
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Merge a partial configuration file with the defaults
    fn from_config_file(file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            center_lon: file.center_lon.unwrap_or(defaults.center_lon),
            center_lat: file.center_lat.unwrap_or(defaults.center_lat),
            min_line_points: file.min_line_points.unwrap_or(defaults.min_line_points),
            max_line_points: file.max_line_points.unwrap_or(defaults.max_line_points),
            min_polygon_points: file.min_polygon_points.unwrap_or(defaults.min_polygon_points),
            max_polygon_points: file.max_polygon_points.unwrap_or(defaults.max_polygon_points),
            sample_sizes: file.sample_sizes.unwrap_or(defaults.sample_sizes),
            num_positive: file.num_positive.unwrap_or(defaults.num_positive),
            num_negative: file.num_negative.unwrap_or(defaults.num_negative),
            hotel_center_stdev: file.hotel_center_stdev.unwrap_or(defaults.hotel_center_stdev),
            room_size: file.room_size.unwrap_or(defaults.room_size),
            min_rooms: file.min_rooms.unwrap_or(defaults.min_rooms),
            max_rooms: file.max_rooms.unwrap_or(defaults.max_rooms),
            output_dir: file.output_dir.unwrap_or(defaults.output_dir),
            seed: file.seed.or(defaults.seed),
        }
    }

    /// Apply CLI argument overrides, including those of the chosen subcommand
    fn apply_cli_overrides(&mut self, args: CliArgs) {
        if let Some(value) = args.output_dir {
            self.output_dir = value;
        }
        if let Some(value) = args.seed {
            self.seed = Some(value);
        }
        if let Some(value) = args.center_lon {
            self.center_lon = value;
        }
        if let Some(value) = args.center_lat {
            self.center_lat = value;
        }

        match args.command {
            Some(Command::Primitives { sample_sizes: Some(sizes) }) => {
                self.sample_sizes = sizes;
            }
            Some(Command::Hotels { num_positive, num_negative }) => {
                if let Some(value) = num_positive {
                    self.num_positive = value;
                }
                if let Some(value) = num_negative {
                    self.num_negative = value;
                }
            }
            _ => {}
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(-180.0..=180.0).contains(&self.center_lon) || !(-90.0..=90.0).contains(&self.center_lat)
        {
            return Err(ConfigValidationError::InvalidCenter {
                lon: self.center_lon,
                lat: self.center_lat,
            });
        }

        if self.min_line_points < 3 || self.min_line_points > self.max_line_points {
            return Err(ConfigValidationError::InvalidLinePointRange(
                self.min_line_points,
                self.max_line_points,
            ));
        }

        if self.min_polygon_points < 3 || self.min_polygon_points > self.max_polygon_points {
            return Err(ConfigValidationError::InvalidPolygonPointRange(
                self.min_polygon_points,
                self.max_polygon_points,
            ));
        }

        // Fewer than three rooms lets a flush parking lot miss the reception
        if self.min_rooms < 3 || self.min_rooms > self.max_rooms {
            return Err(ConfigValidationError::InvalidRoomRange(self.min_rooms, self.max_rooms));
        }

        if !(self.room_size.is_finite() && self.room_size > 0.0) {
            return Err(ConfigValidationError::InvalidRoomSize(self.room_size));
        }

        if !(self.hotel_center_stdev.is_finite() && self.hotel_center_stdev >= 0.0) {
            return Err(ConfigValidationError::InvalidCenterDeviation(self.hotel_center_stdev));
        }

        if self.output_dir.trim().is_empty() {
            return Err(ConfigValidationError::EmptyOutputDirectory);
        }

        Ok(())
    }

    /// Settings for the primitive generator
    pub fn primitive_settings(&self) -> PrimitiveSettings {
        PrimitiveSettings {
            center_lon: self.center_lon,
            center_lat: self.center_lat,
            min_line_points: self.min_line_points,
            max_line_points: self.max_line_points,
            min_polygon_points: self.min_polygon_points,
            max_polygon_points: self.max_polygon_points,
        }
    }

    /// Settings for the hotel generator
    pub fn hotel_settings(&self) -> HotelSettings {
        HotelSettings {
            center_lon: self.center_lon,
            center_lat: self.center_lat,
            center_stdev: self.hotel_center_stdev,
            room_size: self.room_size,
            min_rooms: self.min_rooms,
            max_rooms: self.max_rooms,
        }
    }
}
