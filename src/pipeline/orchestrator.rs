//! Dataset orchestrator
//!
//! This module contains the DatasetOrchestrator, the only place where
//! generated data touches the filesystem.

use crate::generator::{HotelLayoutGenerator, HotelSamples, PrimitiveGeometryGenerator};
use crate::output::{hotel_kb, hotel_sql, label_list, primitive_kb, primitive_sql};
use crate::perf_span;
use crate::pipeline::{ErrorHandler, GenerationStatistics, GeneratorError, GeneratorResult};
use crate::sample::{DataSampler, SourceDataset, DEFAULT_SAMPLE_SIZES};
use crate::trace::convert_trace;
use crate::types::{Command, GeneratorConfig};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Coordinates generators and renderers and writes their output
#[derive(Debug)]
pub struct DatasetOrchestrator {
    /// Validated configuration
    config: GeneratorConfig,
    /// Generator of points, line strings and polygons
    primitives: PrimitiveGeometryGenerator,
    /// Generator of hotel layouts
    hotels: HotelLayoutGenerator,
    /// Draws samples from existing datasets
    sampler: DataSampler,
    /// Decides whether a failing trace is skipped
    error_handler: ErrorHandler,
    /// Counters of the current run
    statistics: GenerationStatistics,
}

impl DatasetOrchestrator {
    /// Create an orchestrator from a configuration
    ///
    /// Fails when the configuration does not validate.
    #[instrument(skip(config), fields(output_dir = %config.output_dir, seed = ?config.seed))]
    pub fn new(config: GeneratorConfig) -> GeneratorResult<Self> {
        config.validate()?;

        let (primitives, hotels, sampler) = match config.seed {
            Some(seed) => {
                info!("Using deterministic seed: {}", seed);
                (
                    PrimitiveGeometryGenerator::with_seed(config.primitive_settings(), seed),
                    HotelLayoutGenerator::with_seed(config.hotel_settings(), seed),
                    DataSampler::with_seed(seed),
                )
            }
            None => {
                debug!("Using entropy-based random seed");
                (
                    PrimitiveGeometryGenerator::new(config.primitive_settings()),
                    HotelLayoutGenerator::new(config.hotel_settings()),
                    DataSampler::new(),
                )
            }
        };

        Ok(Self {
            config,
            primitives,
            hotels,
            sampler,
            error_handler: ErrorHandler::new(),
            statistics: GenerationStatistics::new(),
        })
    }

    /// Replace the error handler
    pub fn with_error_handler(mut self, error_handler: ErrorHandler) -> Self {
        self.error_handler = error_handler;
        self
    }

    /// The configuration this orchestrator runs with
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Counters collected so far
    pub fn statistics(&self) -> &GenerationStatistics {
        &self.statistics
    }

    /// Directory output files are written to
    pub fn output_dir(&self) -> &Path {
        Path::new(&self.config.output_dir)
    }

    /// Run one task, or primitives and hotels when `command` is `None`
    pub fn run(&mut self, command: Option<&Command>) -> GeneratorResult<GenerationStatistics> {
        let start = Instant::now();
        fs::create_dir_all(self.output_dir())?;

        match command {
            Some(Command::Primitives { .. }) => {
                self.generate_primitives()?;
            }
            Some(Command::Hotels { .. }) => {
                self.generate_hotels()?;
            }
            Some(Command::ConvertTrace { inputs }) => {
                self.convert_traces(inputs)?;
            }
            Some(Command::Sample { data_dir, sizes }) => {
                let sizes = sizes.as_deref().unwrap_or(&DEFAULT_SAMPLE_SIZES[..]);
                self.sample_datasets(data_dir, sizes)?;
            }
            None => {
                self.generate_primitives()?;
                self.generate_hotels()?;
            }
        }

        self.statistics.set_duration(start.elapsed());
        info!("{}", self.statistics.compact_summary());
        Ok(self.statistics.clone())
    }

    /// Write `kb_{n}.ttl` and `load_{n}.sql` for every configured sample size
    pub fn generate_primitives(&mut self) -> GeneratorResult<Vec<PathBuf>> {
        let sample_sizes = self.config.sample_sizes.clone();
        let mut written = Vec::with_capacity(sample_sizes.len() * 2);

        for num_samples in sample_sizes {
            let span = perf_span!("primitive_dataset", num_samples = num_samples);
            let _enter = span.enter();

            let geometries = self.primitives.generate_batch(num_samples);
            let wkts: Vec<String> = geometries.iter().map(|g| g.to_wkt()).collect();
            self.statistics.record_primitive_dataset(&geometries);

            let kb = primitive_kb(&wkts)?;
            written.push(self.write_file(&format!("kb_{}.ttl", num_samples), &kb.to_turtle())?);
            written.push(
                self.write_file(&format!("load_{}.sql", num_samples), &primitive_sql(&wkts)?)?,
            );
        }

        Ok(written)
    }

    /// Write `hotels.ttl`, `load_hotels.sql`, `pos.txt` and `neg.txt`
    pub fn generate_hotels(&mut self) -> GeneratorResult<HotelSamples> {
        let span = perf_span!(
            "hotel_dataset",
            num_positive = self.config.num_positive,
            num_negative = self.config.num_negative,
        );
        let _enter = span.enter();

        let samples = self.hotels.generate(self.config.num_positive, self.config.num_negative);

        for hotel in samples.iter() {
            self.statistics.record_hotel(hotel);
            if !hotel.label_matches_geometry() {
                warn!(
                    "Hotel {} is labelled {} but its parking lot relations are {:?}",
                    hotel.resource_key(),
                    hotel.label,
                    hotel.parking_lot_relations()
                );
            }
        }

        self.write_file("hotels.ttl", &hotel_kb(&samples).to_turtle())?;
        self.write_file("load_hotels.sql", &hotel_sql(&samples))?;
        self.write_file("pos.txt", &label_list(&samples.positive))?;
        self.write_file("neg.txt", &label_list(&samples.negative))?;

        Ok(samples)
    }

    /// Convert each trace file into `{label}_{move id}.ttl`
    ///
    /// Traces that fail to parse are skipped; unreadable files abort.
    pub fn convert_traces(&mut self, inputs: &[PathBuf]) -> GeneratorResult<Vec<PathBuf>> {
        let mut written = Vec::new();

        for input in inputs {
            let content = fs::read_to_string(input)?;
            let source_name = input.display().to_string();
            let converted = self.error_handler.execute(|| {
                convert_trace(&content)
                    .map_err(|error| GeneratorError::trace_error(source_name.as_str(), error))
            })?;

            match converted.flatten() {
                Some(movement) => {
                    debug!(
                        "Converted {} into {} with {} speeds",
                        source_name,
                        movement.move_id,
                        movement.speeds.len()
                    );
                    written.push(self.write_file(&movement.file_name(), &movement.to_turtle())?);
                    self.statistics.record_move();
                }
                None => {
                    info!("No move produced for {}", source_name);
                    self.statistics.record_skipped_trace();
                }
            }
        }

        Ok(written)
    }

    /// Write `sample_{n}.nt` and `load_sample_{n}.sql` for every size
    ///
    /// Every `.nt` file in `data_dir` is a source, read in file name order.
    /// Files that fail to parse are skipped; unreadable files abort.
    #[instrument(skip(self, sizes), fields(data_dir = %data_dir.display()))]
    pub fn sample_datasets(
        &mut self,
        data_dir: &Path,
        sizes: &[usize],
    ) -> GeneratorResult<Vec<PathBuf>> {
        let mut inputs: Vec<PathBuf> = fs::read_dir(data_dir)?
            .map(|entry| entry.map(|entry| entry.path()))
            .collect::<Result<_, _>>()?;
        inputs.retain(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "nt"));
        inputs.sort();
        info!("Sampling from {} datasets in {}", inputs.len(), data_dir.display());

        let mut sources = Vec::with_capacity(inputs.len());
        for input in &inputs {
            let content = fs::read_to_string(input)?;
            let source_name = input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| input.display().to_string());
            let parsed = self.error_handler.execute(|| {
                SourceDataset::parse(source_name.as_str(), &content)
                    .map_err(|error| GeneratorError::sample_error(source_name.as_str(), error))
            })?;

            match parsed {
                Some(source) => {
                    self.statistics.record_source();
                    sources.push(source);
                }
                None => self.statistics.record_skipped_source(),
            }
        }

        let mut written = Vec::with_capacity(sizes.len() * 2);
        for &num_samples in sizes {
            let span = perf_span!("sample_dataset", num_samples = num_samples);
            let _enter = span.enter();

            let set = self.sampler.sample(&sources, num_samples);
            self.statistics.record_sample_set(&set);

            let ntriples = set.to_graph().to_ntriples();
            written.push(self.write_file(&set.ntriples_file_name(), &ntriples)?);
            written.push(self.write_file(&set.sql_file_name(), &set.to_sql())?);
        }

        Ok(written)
    }

    fn write_file(&mut self, name: &str, contents: &str) -> GeneratorResult<PathBuf> {
        let path = self.output_dir().join(name);
        fs::create_dir_all(self.output_dir())?;
        fs::write(&path, contents).map_err(|error| {
            GeneratorError::output_error(format!("failed to write {}: {}", path.display(), error))
        })?;
        debug!("Wrote {}", path.display());
        self.statistics.record_file();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> GeneratorConfig {
        GeneratorConfig {
            sample_sizes: vec![4, 12],
            num_positive: 3,
            num_negative: 5,
            output_dir: dir.path().display().to_string(),
            seed: Some(42),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_orchestrator_rejects_invalid_config() {
        let config = GeneratorConfig { min_rooms: 1, ..GeneratorConfig::default() };
        let result = DatasetOrchestrator::new(config);
        assert!(matches!(result, Err(GeneratorError::ConfigurationError(_))));
    }

    #[test]
    fn test_generate_primitives_writes_one_pair_per_size() {
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = DatasetOrchestrator::new(test_config(&dir)).unwrap();

        let written = orchestrator.generate_primitives().unwrap();
        assert_eq!(written.len(), 4);
        assert!(dir.path().join("kb_4.ttl").exists());
        assert!(dir.path().join("load_12.sql").exists());

        let sql = fs::read_to_string(dir.path().join("load_12.sql")).unwrap();
        assert_eq!(sql.lines().count(), 12);
        assert!(sql.lines().all(|line| line.starts_with("INSERT INTO ")));

        let stats = orchestrator.statistics();
        assert_eq!(stats.total_geometries(), 16);
        assert_eq!(stats.files_written, 4);
    }

    #[test]
    fn test_generate_hotels_writes_label_lists() {
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = DatasetOrchestrator::new(test_config(&dir)).unwrap();

        let samples = orchestrator.generate_hotels().unwrap();
        assert_eq!(samples.positive.len(), 3);
        assert_eq!(samples.negative.len(), 5);

        let pos = fs::read_to_string(dir.path().join("pos.txt")).unwrap();
        let neg = fs::read_to_string(dir.path().join("neg.txt")).unwrap();
        assert_eq!(pos.lines().count(), 3);
        assert_eq!(neg.lines().count(), 5);
        assert!(dir.path().join("hotels.ttl").exists());
        assert!(dir.path().join("load_hotels.sql").exists());
        assert_eq!(orchestrator.statistics().label_mismatches, 0);
    }

    #[test]
    fn test_run_without_command_generates_everything() {
        let dir = tempfile::tempdir().unwrap();
        let mut orchestrator = DatasetOrchestrator::new(test_config(&dir)).unwrap();

        let stats = orchestrator.run(None).unwrap();
        assert_eq!(stats.primitive_datasets, 2);
        assert_eq!(stats.total_hotels(), 8);
        assert_eq!(stats.files_written, 8);
    }

    #[test]
    fn test_convert_traces_skips_broken_trace() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let broken = dir.path().join("broken.csv");
        fs::write(
            &good,
            "\"3\",\"2009-01-01 10:00:00\",\"10.0\",\"50.0\",\"bike\"\n\
             \"3\",\"2009-01-01 10:00:10\",\"10.001\",\"50.0\",\"bike\"\n\
             \"3\",\"2009-01-01 10:00:20\",\"10.002\",\"50.0\",\"bike\"\n",
        )
        .unwrap();
        fs::write(&broken, "\"3\",\"noon\",\"10.0\",\"50.0\",\"bike\"\n").unwrap();

        let mut orchestrator = DatasetOrchestrator::new(test_config(&dir)).unwrap();
        let written = orchestrator.convert_traces(&[good, broken]).unwrap();

        assert_eq!(written.len(), 1);
        assert_eq!(
            written[0].file_name().unwrap().to_str().unwrap(),
            "bike_move_3_2009-01-01T10-00-00_-_2009-01-01T10-00-20.ttl"
        );
        assert_eq!(orchestrator.statistics().moves_converted, 1);
        assert_eq!(orchestrator.statistics().traces_skipped, 1);
    }

    #[test]
    fn test_sample_datasets_skips_broken_source() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(&data).unwrap();
        let nt: String = (0..8)
            .map(|i| {
                format!(
                    "<http://x/f{i}> <http://geovocab.org/geometry#geometry> <http://x/g{i}> .\n\
                     <http://x/g{i}> <http://www.opengis.net/ont/geosparql#asWKT> \"POINT({i} 1)\" .\n",
                    i = i
                )
            })
            .collect();
        fs::write(data.join("points.nt"), nt).unwrap();
        fs::write(data.join("broken.nt"), "<http://x/a> <http://x/p>\n").unwrap();
        fs::write(data.join("notes.txt"), "ignored").unwrap();

        let mut orchestrator = DatasetOrchestrator::new(test_config(&dir)).unwrap();
        let written = orchestrator.sample_datasets(&data, &[3, 5]).unwrap();

        assert_eq!(written.len(), 4);
        let sql = fs::read_to_string(dir.path().join("load_sample_5.sql")).unwrap();
        assert_eq!(sql.lines().count(), 5);
        assert!(sql.lines().all(|line| line.starts_with("INSERT INTO point VALUES")));
        let nt = fs::read_to_string(dir.path().join("sample_3.nt")).unwrap();
        assert_eq!(nt.lines().count(), 9);

        let stats = orchestrator.statistics();
        assert_eq!(stats.source_files_read, 1);
        assert_eq!(stats.source_files_skipped, 1);
        assert_eq!(stats.sampled_geometries, 8);
    }

    #[test]
    fn test_strict_handler_aborts_on_broken_trace() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("broken.csv");
        fs::write(&broken, "not a record\n").unwrap();

        let mut orchestrator = DatasetOrchestrator::new(test_config(&dir))
            .unwrap()
            .with_error_handler(ErrorHandler::strict());
        let result = orchestrator.convert_traces(&[broken]);
        assert!(matches!(result, Err(GeneratorError::TraceError { .. })));
    }
}
