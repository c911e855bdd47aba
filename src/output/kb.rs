//! Knowledge base builders for primitives and hotels
//!
//! Every feature is linked to exactly one geometry through `geo:hasGeometry`
//! and every geometry carries its WKT through `geo:asWKT`. Resource names are
//! derived from the [`ResourceKey`] of the WKT, so equal geometries map to the
//! same resources.

use super::rdf::{vocab, Term, TurtleGraph};
use crate::generator::{Hotel, HotelSamples};
use crate::geometry::{Polygon, WktError};
use crate::types::{GeometryKind, ResourceKey};

/// Class of hotel footprints
pub const HOTEL_CLASS: &str = "Hotel";
/// Class of hotel rooms
pub const ROOM_CLASS: &str = "Room";
/// Class of receptions
pub const RECEPTION_CLASS: &str = "Reception";
/// Class of parking lots
pub const CAR_PARK_CLASS: &str = "CarPark";
/// Common superclass of the point, line and area feature classes
pub const SPATIAL_FEATURE_CLASS: &str = "SpatialFeature";

/// Link from a hotel to each of its rooms
pub const HAS_ROOM: &str = "has_room";
/// Link from a hotel to its reception
pub const HAS_RECEPTION: &str = "has_reception";
/// Link from a hotel to its parking lot
pub const HAS_CARPARK: &str = "has_carpark";

/// IRI of a primitive feature
pub fn feature_iri(key: &ResourceKey) -> String {
    vocab::spatial(&format!("feature_{}", key))
}

/// IRI of a primitive geometry
pub fn geometry_iri(key: &ResourceKey) -> String {
    vocab::spatial(&format!("geometry_{}", key))
}

/// Role a polygon plays inside a hotel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotelPart {
    /// The footprint
    Hotel,
    /// One room
    Room,
    /// The reception
    Reception,
    /// The parking lot
    ParkingLot,
}

impl HotelPart {
    /// Infix used in resource names
    pub fn infix(self) -> &'static str {
        match self {
            HotelPart::Hotel => "hotel",
            HotelPart::Room => "room",
            HotelPart::Reception => "reception",
            HotelPart::ParkingLot => "parking_lot",
        }
    }

    /// Local name of the class features of this part belong to
    pub fn class(self) -> &'static str {
        match self {
            HotelPart::Hotel => HOTEL_CLASS,
            HotelPart::Room => ROOM_CLASS,
            HotelPart::Reception => RECEPTION_CLASS,
            HotelPart::ParkingLot => CAR_PARK_CLASS,
        }
    }

    /// Feature IRI of `polygon` in this role
    pub fn feature_iri(self, polygon: &Polygon) -> String {
        vocab::spatial(&format!("feature_{}{}", self.infix(), polygon.resource_key()))
    }

    /// Geometry IRI of `polygon` in this role
    pub fn geometry_iri(self, polygon: &Polygon) -> String {
        vocab::spatial(&format!("geom_{}{}", self.infix(), polygon.resource_key()))
    }
}

/// IRI identifying a hotel in knowledge bases and label lists
pub fn hotel_iri(hotel: &Hotel) -> String {
    HotelPart::Hotel.feature_iri(&hotel.hotel)
}

/// Knowledge base of primitive geometries given as WKT
///
/// Each feature is typed with the class of its geometry kind. Fails on WKT
/// whose kind cannot be determined.
pub fn primitive_kb<S: AsRef<str>>(wkts: &[S]) -> Result<TurtleGraph, WktError> {
    let mut graph = TurtleGraph::with_default_prefixes();

    for wkt in wkts {
        let wkt = wkt.as_ref();
        let kind = GeometryKind::from_wkt(wkt)?;
        let key = ResourceKey::from_wkt(wkt);
        let feature = feature_iri(&key);
        let geometry = geometry_iri(&key);

        graph.add_type(&feature, vocab::spatial(kind.feature_class()));
        graph.add(&feature, vocab::GEO_HAS_GEOMETRY, Term::iri(&geometry));
        graph.add(&geometry, vocab::GEO_AS_WKT, Term::wkt(wkt));
    }

    Ok(graph)
}

/// Property and class declarations preceding the hotel data
pub fn hotel_ontology() -> TurtleGraph {
    let mut graph = TurtleGraph::with_default_prefixes();
    let spatial_feature = vocab::spatial(SPATIAL_FEATURE_CLASS);

    graph.add_type(vocab::GEO_HAS_GEOMETRY, vocab::OWL_OBJECT_PROPERTY);
    graph.add_type(vocab::GEO_AS_WKT, vocab::OWL_DATATYPE_PROPERTY);
    for property in [HAS_ROOM, HAS_RECEPTION, HAS_CARPARK] {
        graph.add_type(vocab::spatial(property), vocab::OWL_OBJECT_PROPERTY);
    }

    graph.add_type(&spatial_feature, vocab::OWL_CLASS);
    for kind in GeometryKind::ALL {
        let class = vocab::spatial(kind.feature_class());
        graph.add_type(&class, vocab::OWL_CLASS);
        graph.add(&class, vocab::RDFS_SUBCLASS_OF, Term::iri(&spatial_feature));
    }

    graph
}

/// Ontology header followed by every hotel, positives first
pub fn hotel_kb(samples: &HotelSamples) -> TurtleGraph {
    let mut graph = hotel_ontology();
    for hotel in samples.iter() {
        add_hotel(&mut graph, hotel);
    }
    graph
}

/// Add the features and geometries of one hotel to `graph`
pub fn add_hotel(graph: &mut TurtleGraph, hotel: &Hotel) {
    let hotel_feature = add_part(graph, HotelPart::Hotel, &hotel.hotel);

    for room in &hotel.rooms {
        let room_feature = add_part(graph, HotelPart::Room, room);
        graph.add(&hotel_feature, vocab::spatial(HAS_ROOM), Term::iri(room_feature));
    }

    let reception_feature = add_part(graph, HotelPart::Reception, &hotel.reception);
    graph.add(&hotel_feature, vocab::spatial(HAS_RECEPTION), Term::iri(reception_feature));

    if let Some(parking_lot) = &hotel.parking_lot {
        let parking_feature = add_part(graph, HotelPart::ParkingLot, parking_lot);
        graph.add(&hotel_feature, vocab::spatial(HAS_CARPARK), Term::iri(parking_feature));
    }
}

fn add_part(graph: &mut TurtleGraph, part: HotelPart, polygon: &Polygon) -> String {
    let feature = part.feature_iri(polygon);
    let geometry = part.geometry_iri(polygon);

    graph.add_type(&feature, vocab::spatial(part.class()));
    graph.add_type(&feature, vocab::spatial(GeometryKind::Polygon.feature_class()));
    graph.add(&feature, vocab::GEO_HAS_GEOMETRY, Term::iri(&geometry));
    graph.add(&geometry, vocab::GEO_AS_WKT, Term::wkt(polygon.to_wkt()));

    feature
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{HotelLayoutGenerator, HotelSettings};
    use crate::types::NegativeCase;

    #[test]
    fn test_primitive_kb_triples() {
        let wkts = ["POINT(1 2)", "LINESTRING(1 2, 3 4)", "POLYGON((0 0, 1 0, 1 1, 0 0))"];
        let graph = primitive_kb(&wkts).unwrap();
        assert_eq!(graph.len(), 9);

        let key = ResourceKey::from_wkt("LINESTRING(1 2, 3 4)");
        assert!(graph.contains(
            &feature_iri(&key),
            vocab::RDF_TYPE,
            &Term::iri(vocab::spatial("LineFeature"))
        ));
        assert!(graph.contains(
            &geometry_iri(&key),
            vocab::GEO_AS_WKT,
            &Term::wkt("LINESTRING(1 2, 3 4)")
        ));
    }

    #[test]
    fn test_primitive_kb_rejects_unknown_kind() {
        assert!(matches!(
            primitive_kb(&["TRIANGLE((0 0, 1 0, 1 1, 0 0))"]),
            Err(WktError::UnknownGeometryKind(_))
        ));
    }

    #[test]
    fn test_hotel_ontology_declarations() {
        let graph = hotel_ontology();
        let area = vocab::spatial("AreaFeature");
        assert!(graph.contains(&area, vocab::RDF_TYPE, &Term::iri(vocab::OWL_CLASS)));
        assert!(graph.contains(
            &area,
            vocab::RDFS_SUBCLASS_OF,
            &Term::iri(vocab::spatial(SPATIAL_FEATURE_CLASS))
        ));
        assert!(graph.contains(
            vocab::GEO_HAS_GEOMETRY,
            vocab::RDF_TYPE,
            &Term::iri(vocab::OWL_OBJECT_PROPERTY)
        ));
    }

    #[test]
    fn test_hotel_kb_links_parts() {
        let mut generator = HotelLayoutGenerator::with_seed(HotelSettings::default(), 11);
        let hotel = generator.generate_car_friendly();
        let samples = HotelSamples { positive: vec![hotel.clone()], negative: Vec::new() };
        let graph = hotel_kb(&samples);

        let hotel_feature = hotel_iri(&hotel);
        let has_room = vocab::spatial(HAS_ROOM);
        let room_links = graph
            .triples()
            .iter()
            .filter(|t| t.subject == hotel_feature && t.predicate == has_room)
            .count();
        assert_eq!(room_links, hotel.room_count);

        let parking = hotel.parking_lot.as_ref().unwrap();
        assert!(graph.contains(
            &hotel_feature,
            &vocab::spatial(HAS_CARPARK),
            &Term::iri(HotelPart::ParkingLot.feature_iri(parking))
        ));
        assert!(graph.contains(
            &HotelPart::Room.geometry_iri(&hotel.rooms[0]),
            vocab::GEO_AS_WKT,
            &Term::wkt(hotel.rooms[0].to_wkt())
        ));
    }

    #[test]
    fn test_hotel_without_parking_lot_has_no_carpark_link() {
        let mut generator = HotelLayoutGenerator::with_seed(HotelSettings::default(), 12);
        let hotel = generator.generate_negative_case(NegativeCase::NoParkingLot);
        let mut graph = TurtleGraph::new();
        add_hotel(&mut graph, &hotel);

        let has_carpark = vocab::spatial(HAS_CARPARK);
        assert!(graph.triples().iter().all(|t| t.predicate != has_carpark));
    }
}
