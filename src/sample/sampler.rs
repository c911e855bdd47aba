//! Proportional down-sampling of geometry datasets
//!
//! A source file holds feature/geometry pairs linked by `geovocab:geometry`,
//! each geometry carrying its WKT through `geo:asWKT`. For a target size `n`,
//! every file gives up `round(wkt_count * n / total_wkt_count)` randomly chosen
//! records. Files whose share rounds to zero are skipped. When the shares fall
//! short of `n`, single records are drawn from randomly chosen files until `n`
//! is reached or every record is taken.

use crate::output::{insert_statement, vocab, Term, TurtleGraph};
use crate::sample::ntriples::{parse_document, NTriplesError};
use crate::types::GeometryKind;
use rand::{prelude::*, rngs::StdRng, seq::index, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Target sizes sampled when none are requested
pub const DEFAULT_SAMPLE_SIZES: [usize; 12] = [
    10, 50, 100, 500, 1_000, 5_000, 10_000, 50_000, 1_000_000, 5_000_000, 10_000_000,
    50_000_000,
];

/// A feature, its geometry and the geometry's WKT
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeometryRecord {
    /// Feature IRI or blank node
    pub feature: String,
    /// Geometry IRI or blank node
    pub geometry: String,
    /// WKT lexical form
    pub wkt: String,
    /// Datatype of the WKT literal
    pub datatype: String,
    /// Kind derived from the WKT keyword
    pub kind: GeometryKind,
}

/// The geometry records of one N-Triples file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDataset {
    /// File the records came from
    pub name: String,
    /// Number of `geo:asWKT` statements, the file's sampling weight
    pub wkt_count: usize,
    /// Records in file order
    pub records: Vec<GeometryRecord>,
}

impl SourceDataset {
    /// Read the records of an N-Triples document
    ///
    /// Records whose WKT keyword is not a point, line string or polygon are
    /// left out with a warning; they still count towards `wkt_count`.
    pub fn parse(name: impl Into<String>, content: &str) -> Result<Self, NTriplesError> {
        let name = name.into();
        let mut links: Vec<(String, String)> = Vec::new();
        let mut literals: HashMap<String, Vec<(String, String)>> = HashMap::new();
        let mut wkt_count = 0;

        for triple in parse_document(content)? {
            match (triple.predicate.as_str(), triple.object) {
                (vocab::GEOVOCAB_GEOMETRY, Term::Iri(geometry)) => {
                    links.push((triple.subject, geometry));
                }
                (vocab::GEO_AS_WKT, object) => {
                    wkt_count += 1;
                    if let Term::Literal { value, datatype } = object {
                        literals.entry(triple.subject).or_default().push((value, datatype));
                    }
                }
                _ => {}
            }
        }

        let mut records = Vec::with_capacity(links.len());
        for (feature, geometry) in links {
            let Some(wkts) = literals.get(&geometry) else {
                debug!("Geometry {} in {} has no WKT", geometry, name);
                continue;
            };
            for (wkt, datatype) in wkts {
                match GeometryKind::from_wkt(wkt) {
                    Ok(kind) => records.push(GeometryRecord {
                        feature: feature.clone(),
                        geometry: geometry.clone(),
                        wkt: wkt.clone(),
                        datatype: datatype.clone(),
                        kind,
                    }),
                    Err(error) => warn!("Leaving out {} from {}: {}", geometry, name, error),
                }
            }
        }

        debug!("{}: {} WKT statements, {} records", name, wkt_count, records.len());
        Ok(Self { name, wkt_count, records })
    }
}

/// Records drawn for one target size
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    /// Requested size
    pub num_samples: usize,
    /// Drawn records, grouped by source file
    pub records: Vec<GeometryRecord>,
}

impl SampleSet {
    /// An empty set for `num_samples`
    pub fn new(num_samples: usize) -> Self {
        Self { num_samples, records: Vec::new() }
    }

    /// Number of drawn records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether nothing was drawn
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Knowledge base typing each feature by its geometry kind
    pub fn to_graph(&self) -> TurtleGraph {
        let mut graph = TurtleGraph::with_default_prefixes();
        for record in &self.records {
            graph.add_type(&record.feature, vocab::spatial(record.kind.feature_class()));
            graph.add(&record.feature, vocab::GEOVOCAB_GEOMETRY, Term::iri(&record.geometry));
            graph.add(
                &record.geometry,
                vocab::GEO_AS_WKT,
                Term::literal(&record.wkt, &record.datatype),
            );
        }
        graph
    }

    /// Load script with one insert per record, the table picked by kind
    pub fn to_sql(&self) -> String {
        self.records
            .iter()
            .map(|record| {
                insert_statement(record.kind.table_name(), &record.geometry, &record.wkt) + "\n"
            })
            .collect()
    }

    /// `sample_{n}.nt`
    pub fn ntriples_file_name(&self) -> String {
        format!("sample_{}.nt", self.num_samples)
    }

    /// `load_sample_{n}.sql`
    pub fn sql_file_name(&self) -> String {
        format!("load_sample_{}.sql", self.num_samples)
    }
}

/// Draws proportional samples from a set of source datasets
pub struct DataSampler {
    rng: Box<dyn RngCore>,
}

impl fmt::Debug for DataSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSampler").finish_non_exhaustive()
    }
}

impl Default for DataSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl DataSampler {
    /// Create a sampler drawing from the thread-local random source
    pub fn new() -> Self {
        Self::with_rng(Box::new(thread_rng()))
    }

    /// Create a sampler with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Create a sampler drawing from `rng`
    pub fn with_rng(rng: Box<dyn RngCore>) -> Self {
        Self { rng }
    }

    /// Share of `num_samples` owed by a file with `wkt_count` of `total` statements
    pub fn quota(wkt_count: usize, total: usize, num_samples: usize) -> usize {
        if total == 0 {
            return 0;
        }
        (wkt_count as f64 * num_samples as f64 / total as f64).round() as usize
    }

    /// Draw about `num_samples` records across `sources`
    ///
    /// Rounded shares may add up to slightly more than `num_samples`; a
    /// shortfall is topped up one record at a time. No record is drawn twice.
    #[instrument(skip(self, sources), fields(sources = sources.len()))]
    pub fn sample(&mut self, sources: &[SourceDataset], num_samples: usize) -> SampleSet {
        let mut set = SampleSet::new(num_samples);
        let total: usize = sources.iter().map(|source| source.wkt_count).sum();
        if num_samples == 0 {
            return set;
        }
        if total == 0 {
            warn!("No WKT statements to sample {} records from", num_samples);
            return set;
        }

        let mut taken: Vec<HashSet<usize>> = vec![HashSet::new(); sources.len()];

        for (source, taken) in sources.iter().zip(taken.iter_mut()) {
            let quota = Self::quota(source.wkt_count, total, num_samples);
            if quota == 0 {
                warn!("File {} skipped due to too few triples", source.name);
                continue;
            }

            let amount = quota.min(source.records.len());
            if amount < quota {
                debug!("{} holds only {} of {} records owed", source.name, amount, quota);
            }
            info!("Sampling {} records from {}", amount, source.name);

            for idx in index::sample(&mut self.rng, source.records.len(), amount).into_iter() {
                taken.insert(idx);
                set.records.push(source.records[idx].clone());
            }
        }

        while set.records.len() < num_samples {
            let open: Vec<usize> = (0..sources.len())
                .filter(|&i| taken[i].len() < sources[i].records.len())
                .collect();
            let Some(&source_idx) = open.choose(&mut self.rng) else {
                warn!(
                    "Only {} records available for a sample of {}",
                    set.records.len(),
                    num_samples
                );
                break;
            };

            let source = &sources[source_idx];
            let remaining: Vec<usize> = (0..source.records.len())
                .filter(|idx| !taken[source_idx].contains(idx))
                .collect();
            if let Some(&idx) = remaining.choose(&mut self.rng) {
                debug!("Topping up with one record from {}", source.name);
                taken[source_idx].insert(idx);
                set.records.push(source.records[idx].clone());
            }
        }

        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point_file(prefix: &str, count: usize) -> String {
        (0..count)
            .map(|i| {
                format!(
                    "<http://x/{p}/f{i}> <{link}> <http://x/{p}/g{i}> .\n\
                     <http://x/{p}/g{i}> <{wkt}> \"POINT({i} 1)\"^^<{dt}> .\n",
                    p = prefix,
                    i = i,
                    link = vocab::GEOVOCAB_GEOMETRY,
                    wkt = vocab::GEO_AS_WKT,
                    dt = vocab::GEO_WKT_LITERAL,
                )
            })
            .collect()
    }

    #[test]
    fn test_parse_joins_features_and_wkt() {
        let content = format!(
            "{}<http://x/h> <{}> <http://x/gh> .\n<http://x/gh> <{}> \"CIRCLE(0 0, 1)\" .\n",
            point_file("a", 2),
            vocab::GEOVOCAB_GEOMETRY,
            vocab::GEO_AS_WKT
        );
        let source = SourceDataset::parse("a.nt", &content).unwrap();

        assert_eq!(source.wkt_count, 3);
        assert_eq!(source.records.len(), 2);
        assert_eq!(source.records[1].feature, "http://x/a/f1");
        assert_eq!(source.records[1].geometry, "http://x/a/g1");
        assert_eq!(source.records[1].wkt, "POINT(1 1)");
        assert_eq!(source.records[1].kind, GeometryKind::Point);
    }

    #[test]
    fn test_quota_is_proportional() {
        assert_eq!(DataSampler::quota(30, 100, 10), 3);
        assert_eq!(DataSampler::quota(70, 100, 10), 7);
        assert_eq!(DataSampler::quota(4, 100, 10), 0);
        assert_eq!(DataSampler::quota(5, 100, 10), 1);
        assert_eq!(DataSampler::quota(5, 0, 10), 0);
    }

    #[test]
    fn test_sample_draws_shares_without_repeats() {
        let sources = vec![
            SourceDataset::parse("a.nt", &point_file("a", 30)).unwrap(),
            SourceDataset::parse("b.nt", &point_file("b", 70)).unwrap(),
        ];
        let set = DataSampler::with_seed(1).sample(&sources, 10);

        assert_eq!(set.len(), 10);
        let from_a = set.records.iter().filter(|r| r.feature.starts_with("http://x/a/")).count();
        assert_eq!(from_a, 3);
        let distinct: HashSet<&GeometryRecord> = set.records.iter().collect();
        assert_eq!(distinct.len(), 10);
    }

    #[test]
    fn test_shortfall_is_topped_up() {
        let sources = vec![
            SourceDataset::parse("a.nt", &point_file("a", 14)).unwrap(),
            SourceDataset::parse("b.nt", &point_file("b", 14)).unwrap(),
            SourceDataset::parse("c.nt", &point_file("c", 72)).unwrap(),
        ];
        // shares round to 1 + 1 + 7
        let set = DataSampler::with_seed(2).sample(&sources, 10);
        assert_eq!(set.len(), 10);
        let distinct: HashSet<&GeometryRecord> = set.records.iter().collect();
        assert_eq!(distinct.len(), 10);

        let sources = vec![SourceDataset::parse("a.nt", &point_file("a", 3)).unwrap()];
        let set = DataSampler::with_seed(3).sample(&sources, 50);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_empty_requests() {
        let sources = vec![SourceDataset::parse("a.nt", &point_file("a", 3)).unwrap()];
        assert!(DataSampler::with_seed(4).sample(&sources, 0).is_empty());
        assert!(DataSampler::with_seed(4).sample(&[], 10).is_empty());
    }

    #[test]
    fn test_sample_set_rendering() {
        let source = SourceDataset::parse("a.nt", &point_file("a", 1)).unwrap();
        let set = SampleSet { num_samples: 1, records: source.records };

        assert_eq!(set.ntriples_file_name(), "sample_1.nt");
        assert_eq!(set.sql_file_name(), "load_sample_1.sql");
        assert_eq!(
            set.to_sql(),
            "INSERT INTO point VALUES ('http://x/a/g0', ST_GeomFromText('POINT(0 1)'));\n"
        );

        let graph = set.to_graph();
        assert!(graph.contains(
            "http://x/a/f0",
            vocab::RDF_TYPE,
            &Term::iri(vocab::spatial("PointFeature"))
        ));
        assert!(graph.contains("http://x/a/g0", vocab::GEO_AS_WKT, &Term::wkt("POINT(0 1)")));
        assert_eq!(graph.to_ntriples().lines().count(), 3);
    }
}
