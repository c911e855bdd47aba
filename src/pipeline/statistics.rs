//! Statistics collection and reporting
//!
//! Counts what a run produced so the binary can print a summary at the end.

use crate::generator::Hotel;
use crate::geometry::Geometry;
use crate::sample::SampleSet;
use crate::types::{GeometryKind, HotelLabel, NegativeCase};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Counters of a generation run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStatistics {
    /// Generated points
    pub points: usize,
    /// Generated line strings
    pub line_strings: usize,
    /// Generated polygons
    pub polygons: usize,
    /// Primitive datasets written
    pub primitive_datasets: usize,

    /// Car-friendly hotels
    pub car_friendly_hotels: usize,
    /// Hotels without a parking lot
    pub no_parking_lot_hotels: usize,
    /// Hotels whose parking lot is away from the hotel
    pub disconnected_parking_lot_hotels: usize,
    /// Hotels whose parking lot misses the reception
    pub misplaced_parking_lot_hotels: usize,
    /// Hotels whose label disagrees with their geometry
    pub label_mismatches: usize,

    /// Traces converted into moves
    pub moves_converted: usize,
    /// Traces that yielded no move or failed to parse
    pub traces_skipped: usize,

    /// Datasets read for sampling
    pub source_files_read: usize,
    /// Datasets that failed to parse
    pub source_files_skipped: usize,
    /// Sample sets drawn
    pub sample_sets: usize,
    /// Records across all sample sets
    pub sampled_geometries: usize,

    /// Files written to the output directory
    pub files_written: usize,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl GenerationStatistics {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one primitive geometry
    pub fn record_geometry(&mut self, geometry: &Geometry) {
        match geometry.kind() {
            GeometryKind::Point => self.points += 1,
            GeometryKind::LineString => self.line_strings += 1,
            GeometryKind::Polygon => self.polygons += 1,
        }
    }

    /// Count one primitive dataset of `geometries`
    pub fn record_primitive_dataset(&mut self, geometries: &[Geometry]) {
        geometries.iter().for_each(|g| self.record_geometry(g));
        self.primitive_datasets += 1;
    }

    /// Count one hotel by its label
    pub fn record_hotel(&mut self, hotel: &Hotel) {
        match hotel.label {
            HotelLabel::CarFriendly => self.car_friendly_hotels += 1,
            HotelLabel::NotCarFriendly(NegativeCase::NoParkingLot) => {
                self.no_parking_lot_hotels += 1
            }
            HotelLabel::NotCarFriendly(NegativeCase::DisconnectedParkingLot) => {
                self.disconnected_parking_lot_hotels += 1
            }
            HotelLabel::NotCarFriendly(NegativeCase::MisplacedParkingLot) => {
                self.misplaced_parking_lot_hotels += 1
            }
        }
        if !hotel.label_matches_geometry() {
            self.label_mismatches += 1;
        }
    }

    /// Count a converted trace
    pub fn record_move(&mut self) {
        self.moves_converted += 1;
    }

    /// Count a trace that produced nothing
    pub fn record_skipped_trace(&mut self) {
        self.traces_skipped += 1;
    }

    /// Count a dataset read for sampling
    pub fn record_source(&mut self) {
        self.source_files_read += 1;
    }

    /// Count a dataset that could not be parsed
    pub fn record_skipped_source(&mut self) {
        self.source_files_skipped += 1;
    }

    /// Count one drawn sample set
    pub fn record_sample_set(&mut self, set: &SampleSet) {
        self.sample_sets += 1;
        self.sampled_geometries += set.len();
    }

    /// Count a written file
    pub fn record_file(&mut self) {
        self.files_written += 1;
    }

    /// Set the run duration
    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    /// Total primitive geometries
    pub fn total_geometries(&self) -> usize {
        self.points + self.line_strings + self.polygons
    }

    /// Total not-car-friendly hotels
    pub fn not_car_friendly_hotels(&self) -> usize {
        self.no_parking_lot_hotels
            + self.disconnected_parking_lot_hotels
            + self.misplaced_parking_lot_hotels
    }

    /// Total hotels
    pub fn total_hotels(&self) -> usize {
        self.car_friendly_hotels + self.not_car_friendly_hotels()
    }

    /// Percentage of `count` within the primitive geometries
    pub fn geometry_percentage(&self, count: usize) -> f64 {
        percentage(count, self.total_geometries())
    }

    /// Percentage of `count` within the hotels
    pub fn hotel_percentage(&self, count: usize) -> f64 {
        percentage(count, self.total_hotels())
    }

    /// One-line summary suitable for logging
    pub fn compact_summary(&self) -> String {
        format!(
            "Generated {} geometries in {} datasets, {} hotels ({} car friendly, {} not), {} moves; {} files in {:.2}s",
            self.total_geometries(),
            self.primitive_datasets,
            self.total_hotels(),
            self.car_friendly_hotels,
            self.not_car_friendly_hotels(),
            self.moves_converted,
            self.files_written,
            self.duration.as_secs_f64()
        )
    }

    /// Multi-line report printed at the end of a run
    pub fn summary_report(&self) -> String {
        let mut report = String::new();
        report.push_str("=== Generation Summary ===\n");

        if self.primitive_datasets > 0 {
            report.push_str(&format!(
                "Primitives: {} geometries in {} datasets\n",
                self.total_geometries(),
                self.primitive_datasets
            ));
            for (name, count) in [
                ("Points", self.points),
                ("Line strings", self.line_strings),
                ("Polygons", self.polygons),
            ] {
                report.push_str(&format!(
                    "  - {}: {} ({:.1}%)\n",
                    name,
                    count,
                    self.geometry_percentage(count)
                ));
            }
        }

        if self.total_hotels() > 0 {
            report.push_str(&format!("Hotels: {}\n", self.total_hotels()));
            for (name, count) in [
                ("Car friendly", self.car_friendly_hotels),
                ("No parking lot", self.no_parking_lot_hotels),
                ("Disconnected parking lot", self.disconnected_parking_lot_hotels),
                ("Misplaced parking lot", self.misplaced_parking_lot_hotels),
            ] {
                report.push_str(&format!(
                    "  - {}: {} ({:.1}%)\n",
                    name,
                    count,
                    self.hotel_percentage(count)
                ));
            }
            if self.label_mismatches > 0 {
                report.push_str(&format!("  ! Label mismatches: {}\n", self.label_mismatches));
            }
        }

        if self.moves_converted + self.traces_skipped > 0 {
            report.push_str(&format!(
                "Traces: {} converted, {} skipped\n",
                self.moves_converted, self.traces_skipped
            ));
        }

        if self.source_files_read + self.source_files_skipped > 0 {
            report.push_str(&format!(
                "Samples: {} sets with {} geometries from {} files ({} skipped)\n",
                self.sample_sets,
                self.sampled_geometries,
                self.source_files_read,
                self.source_files_skipped
            ));
        }

        report.push_str(&format!(
            "Files written: {} in {:.2}s\n",
            self.files_written,
            self.duration.as_secs_f64()
        ));
        report
    }
}

fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}

impl fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary_report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{HotelLayoutGenerator, HotelSettings};
    use crate::geometry::{LineString, Point};
    use crate::sample::{DataSampler, SourceDataset};

    #[test]
    fn test_statistics_start_empty() {
        let stats = GenerationStatistics::new();
        assert_eq!(stats.total_geometries(), 0);
        assert_eq!(stats.total_hotels(), 0);
        assert_eq!(stats.geometry_percentage(0), 0.0);
        assert_eq!(stats.hotel_percentage(0), 0.0);
    }

    #[test]
    fn test_record_primitive_dataset() {
        let mut stats = GenerationStatistics::new();
        let geometries = vec![
            Geometry::Point(Point::new(1.0, 2.0)),
            Geometry::Point(Point::new(2.0, 2.0)),
            Geometry::LineString(LineString::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 1.0),
            ])),
        ];
        stats.record_primitive_dataset(&geometries);

        assert_eq!(stats.points, 2);
        assert_eq!(stats.line_strings, 1);
        assert_eq!(stats.polygons, 0);
        assert_eq!(stats.primitive_datasets, 1);
        assert!((stats.geometry_percentage(stats.points) - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_record_hotels_by_label() {
        let mut generator = HotelLayoutGenerator::with_seed(HotelSettings::default(), 5);
        let samples = generator.generate(4, 6);

        let mut stats = GenerationStatistics::new();
        samples.iter().for_each(|hotel| stats.record_hotel(hotel));

        assert_eq!(stats.car_friendly_hotels, 4);
        assert_eq!(stats.not_car_friendly_hotels(), 6);
        assert_eq!(stats.total_hotels(), 10);
        assert_eq!(stats.label_mismatches, 0);
    }

    #[test]
    fn test_summary_report_sections() {
        let mut stats = GenerationStatistics::new();
        stats.record_move();
        stats.record_skipped_trace();
        stats.record_file();
        stats.set_duration(Duration::from_millis(1500));

        let report = stats.to_string();
        assert!(report.contains("=== Generation Summary ==="));
        assert!(report.contains("Traces: 1 converted, 1 skipped"));
        assert!(report.contains("Files written: 1 in 1.50s"));
        assert!(!report.contains("Hotels:"));
        assert!(!report.contains("Primitives:"));

        assert!(stats.compact_summary().contains("1 moves"));
    }

    #[test]
    fn test_sample_statistics() {
        let mut stats = GenerationStatistics::new();
        assert!(!stats.summary_report().contains("Samples:"));

        stats.record_source();
        stats.record_source();
        stats.record_skipped_source();
        let nt = "<http://x/f> <http://geovocab.org/geometry#geometry> <http://x/g> .\n\
                  <http://x/g> <http://www.opengis.net/ont/geosparql#asWKT> \"POINT(1 2)\" .\n";
        let source = SourceDataset::parse("points.nt", nt).unwrap();
        let set = DataSampler::with_seed(1).sample(&[source], 1);
        stats.record_sample_set(&set);
        stats.record_sample_set(&SampleSet::new(50));

        assert_eq!(stats.sample_sets, 2);
        assert_eq!(stats.sampled_geometries, 1);
        assert!(stats
            .summary_report()
            .contains("Samples: 2 sets with 1 geometries from 2 files (1 skipped)"));
    }
}
