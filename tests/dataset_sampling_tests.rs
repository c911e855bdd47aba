//! Tests for sampling existing N-Triples datasets

use spatial_learning_data::output::{vocab, Term};
use spatial_learning_data::pipeline::DatasetOrchestrator;
use spatial_learning_data::sample::{parse_document, DataSampler, SourceDataset};
use spatial_learning_data::types::{Command, GeneratorConfig, GeometryKind};
use std::collections::HashSet;
use std::fs;

fn record(feature: &str, geometry: &str, wkt: &str) -> String {
    format!(
        "{f} <{link}> {g} .\n{g} <{as_wkt}> \"{wkt}\"^^<{dt}> .\n",
        f = feature,
        g = geometry,
        link = vocab::GEOVOCAB_GEOMETRY,
        as_wkt = vocab::GEO_AS_WKT,
        wkt = wkt,
        dt = vocab::GEO_WKT_LITERAL,
    )
}

/// `count` records of one kind, with a label triple per feature
fn dataset(prefix: &str, count: usize, kind: GeometryKind) -> String {
    (0..count)
        .map(|i| {
            let wkt = match kind {
                GeometryKind::Point => format!("POINT({} 51)", i),
                GeometryKind::LineString => format!("LINESTRING({} 51, {} 52)", i, i),
                GeometryKind::Polygon => {
                    format!("POLYGON(({i} 51, {j} 51, {j} 52, {i} 51))", i = i, j = i + 1)
                }
            };
            let feature = format!("<http://osm.example/{}/node{}>", prefix, i);
            format!(
                "{}{} <http://www.w3.org/2000/01/rdf-schema#label> \"n{}\"@de .\n",
                record(&feature, &format!("<http://osm.example/{}/geom{}>", prefix, i), &wkt),
                feature,
                i
            )
        })
        .collect()
}

#[test]
fn test_source_ignores_unrelated_triples() {
    let source = SourceDataset::parse("roads.nt", &dataset("roads", 5, GeometryKind::LineString))
        .unwrap();
    assert_eq!(source.name, "roads.nt");
    assert_eq!(source.wkt_count, 5);
    assert_eq!(source.records.len(), 5);
    assert!(source.records.iter().all(|r| r.kind == GeometryKind::LineString));
    assert!(source.records.iter().all(|r| r.datatype == vocab::GEO_WKT_LITERAL));
}

#[test]
fn test_blank_node_features_survive_sampling() {
    let content = record("_:feature", "_:geom", "POINT(1 2)");
    let source = SourceDataset::parse("blank.nt", &content).unwrap();
    let set = DataSampler::with_seed(9).sample(&[source], 1);

    let nt = set.to_graph().to_ntriples();
    assert!(nt.contains("_:feature <http://geovocab.org/geometry#geometry> _:geom ."));
}

#[test]
fn test_sample_is_proportional_across_files() {
    let sources = vec![
        SourceDataset::parse("points.nt", &dataset("p", 200, GeometryKind::Point)).unwrap(),
        SourceDataset::parse("roads.nt", &dataset("l", 300, GeometryKind::LineString)).unwrap(),
        SourceDataset::parse("areas.nt", &dataset("a", 500, GeometryKind::Polygon)).unwrap(),
    ];
    let set = DataSampler::with_seed(11).sample(&sources, 100);

    assert_eq!(set.len(), 100);
    let count = |kind: GeometryKind| set.records.iter().filter(|r| r.kind == kind).count();
    assert_eq!(count(GeometryKind::Point), 20);
    assert_eq!(count(GeometryKind::LineString), 30);
    assert_eq!(count(GeometryKind::Polygon), 50);

    let sql = set.to_sql();
    assert_eq!(sql.lines().filter(|l| l.starts_with("INSERT INTO polygon ")).count(), 50);
    assert_eq!(sql.lines().filter(|l| l.starts_with("INSERT INTO line_string ")).count(), 30);
}

#[test]
fn test_sample_output_reads_back_as_a_source() {
    let source = SourceDataset::parse("areas.nt", &dataset("a", 40, GeometryKind::Polygon)).unwrap();
    let set = DataSampler::with_seed(12).sample(&[source], 15);

    let nt = set.to_graph().to_ntriples();
    let triples = parse_document(&nt).unwrap();
    assert_eq!(triples.len(), 45);
    assert!(triples.iter().any(|t| t.predicate == vocab::RDF_TYPE
        && t.object == Term::iri(vocab::spatial("AreaFeature"))));

    let resampled = SourceDataset::parse(set.ntriples_file_name(), &nt).unwrap();
    assert_eq!(resampled.records.len(), 15);
    let original: HashSet<_> = set.records.iter().collect();
    assert!(resampled.records.iter().all(|r| original.contains(r)));
}

#[test]
fn test_seeded_sampling_is_reproducible() {
    let sources =
        vec![SourceDataset::parse("points.nt", &dataset("p", 100, GeometryKind::Point)).unwrap()];
    let first = DataSampler::with_seed(13).sample(&sources, 10);
    let second = DataSampler::with_seed(13).sample(&sources, 10);
    assert_eq!(first, second);
}

#[test]
fn test_sample_command_through_the_orchestrator() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("osm");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("points.nt"), dataset("p", 30, GeometryKind::Point)).unwrap();
    fs::write(data.join("areas.nt"), dataset("a", 70, GeometryKind::Polygon)).unwrap();

    let out = dir.path().join("out");
    let config = GeneratorConfig {
        output_dir: out.display().to_string(),
        seed: Some(14),
        ..GeneratorConfig::default()
    };
    let mut orchestrator = DatasetOrchestrator::new(config).unwrap();
    let command = Command::Sample { data_dir: data, sizes: Some(vec![10, 50]) };
    let stats = orchestrator.run(Some(&command)).unwrap();

    assert_eq!(stats.source_files_read, 2);
    assert_eq!(stats.sample_sets, 2);
    assert_eq!(stats.sampled_geometries, 60);
    assert_eq!(stats.files_written, 4);
    assert_eq!(stats.total_geometries(), 0);
    assert!(stats.to_string().contains("Samples: 2 sets with 60 geometries"));

    let sql = fs::read_to_string(out.join("load_sample_10.sql")).unwrap();
    assert_eq!(sql.lines().filter(|l| l.starts_with("INSERT INTO point ")).count(), 3);
    assert_eq!(sql.lines().filter(|l| l.starts_with("INSERT INTO polygon ")).count(), 7);
    assert!(out.join("sample_50.nt").exists());
    assert!(!out.join("kb_10.ttl").exists());
}
