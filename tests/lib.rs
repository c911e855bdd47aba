// Integration tests test your crate's public API. They only have access to items
// in your crate that are marked pub. See the Cargo Targets page of the Cargo Book
// for more information.
//
//   https://doc.rust-lang.org/cargo/reference/cargo-targets.html#integration-tests
//

use spatial_learning_data::*;


mod dataset_sampling_tests;

#[test]
fn test_resource_keys_are_stable() {
    let wkt = "POLYGON((13.7 51.1, 13.8 51.1, 13.8 51, 13.7 51, 13.7 51.1))";
    let key = ResourceKey::from_wkt(wkt);

    assert_eq!(key, ResourceKey::from_wkt(wkt));
    assert_ne!(key, ResourceKey::from_wkt("POINT(13.7 51.1)"));
    assert_eq!(key.to_string().len(), 32);
    assert!(key.to_string().chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn test_enum_display() {
    for orientation in Orientation::ALL {
        let parsed: Orientation = orientation.to_string().parse().unwrap();
        assert_eq!(parsed, orientation);
    }

    for case in NegativeCase::ALL {
        assert!(!case.to_string().is_empty());
        assert!(!HotelLabel::NotCarFriendly(case).is_positive());
    }
    assert!(HotelLabel::CarFriendly.is_positive());
}

#[test]
fn test_geometry_kind_from_wkt() {
    assert_eq!(GeometryKind::from_wkt("POINT(1 2)").unwrap(), GeometryKind::Point);
    assert_eq!(GeometryKind::from_wkt("LINESTRING(1 2, 3 4)").unwrap(), GeometryKind::LineString);
    assert_eq!(
        GeometryKind::from_wkt("POLYGON((0 0, 1 0, 1 1, 0 0))").unwrap(),
        GeometryKind::Polygon
    );
    assert!(matches!(
        GeometryKind::from_wkt("MULTIPOINT(1 2)"),
        Err(WktError::UnknownGeometryKind(_))
    ));
}

#[test]
fn test_serialization_roundtrip() {
    let key = ResourceKey::from_wkt("POINT(13.74 51.05)");
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, format!("\"{}\"", key));
    let deserialized: ResourceKey = serde_json::from_str(&json).unwrap();
    assert_eq!(key, deserialized);

    let label = HotelLabel::NotCarFriendly(NegativeCase::MisplacedParkingLot);
    let json = serde_json::to_string(&label).unwrap();
    let deserialized: HotelLabel = serde_json::from_str(&json).unwrap();
    assert_eq!(label, deserialized);
}
