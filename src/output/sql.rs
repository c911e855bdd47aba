//! PostGIS load scripts
//!
//! One `INSERT` per geometry, keyed by the geometry IRI used in the matching
//! knowledge base.

use super::kb::{geometry_iri, HotelPart};
use crate::generator::{Hotel, HotelSamples};
use crate::geometry::{Polygon, WktError};
use crate::types::{GeometryKind, ResourceKey};

/// A single insert statement, without trailing newline
pub fn insert_statement(table: &str, iri: &str, wkt: &str) -> String {
    format!("INSERT INTO {} VALUES ('{}', ST_GeomFromText('{}'));", table, iri, wkt)
}

/// Load script for primitive geometries, the table picked by geometry kind
pub fn primitive_sql<S: AsRef<str>>(wkts: &[S]) -> Result<String, WktError> {
    let mut script = String::new();
    for wkt in wkts {
        let wkt = wkt.as_ref();
        let table = GeometryKind::from_wkt(wkt)?.table_name();
        let iri = geometry_iri(&ResourceKey::from_wkt(wkt));
        script.push_str(&insert_statement(table, &iri, wkt));
        script.push('\n');
    }
    Ok(script)
}

/// Load script for every part of every hotel, positives first
pub fn hotel_sql(samples: &HotelSamples) -> String {
    samples.iter().map(hotel_statements).collect()
}

/// Statements for the parts of one hotel, each part under its own geometry IRI
pub fn hotel_statements(hotel: &Hotel) -> String {
    let mut parts: Vec<(HotelPart, &Polygon)> = vec![(HotelPart::Hotel, &hotel.hotel)];
    parts.extend(hotel.rooms.iter().map(|room| (HotelPart::Room, room)));
    parts.push((HotelPart::Reception, &hotel.reception));
    if let Some(parking_lot) = &hotel.parking_lot {
        parts.push((HotelPart::ParkingLot, parking_lot));
    }

    let table = GeometryKind::Polygon.table_name();
    parts
        .into_iter()
        .map(|(part, polygon)| {
            insert_statement(table, &part.geometry_iri(polygon), &polygon.to_wkt()) + "\n"
        })
        .collect()
}
