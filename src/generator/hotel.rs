//! Car-friendly and not-car-friendly hotel layouts
//!
//! A hotel is a square footprint holding a strip of rooms along one side and a
//! reception at the center of a different side. A hotel is car friendly when a
//! parking lot touches both the footprint and the reception from outside.
//! The lot sits flush against the footprint side that holds the reception, so
//! it is externally connected to the hotel body as well as to the reception.
//!
//! All parts are [`Square`]s sized in multiples of the room size, so the hotel
//! side is `room_count * room_size` and the parking lot side is half of that.

use crate::geometry::{relate, Point, Polygon, SpatialRelation, Square, HOTEL_PRECISION};
use crate::types::{HotelLabel, NegativeCase, Orientation, ResourceKey};
use rand::{prelude::*, rngs::StdRng, RngCore, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, instrument};

/// Distance of the parking lot center from the hotel center, in hotel sides
pub const PARKING_LOT_DISTANCE: f64 = 0.75;

/// Hotel center, size and room-count parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelSettings {
    /// Mean longitude of hotel centers
    pub center_lon: f64,
    /// Mean latitude of hotel centers
    pub center_lat: f64,
    /// Standard deviation of hotel centers around the mean
    pub center_stdev: f64,
    /// Side length of a single room
    pub room_size: f64,
    /// Fewest rooms per hotel
    pub min_rooms: usize,
    /// Most rooms per hotel
    pub max_rooms: usize,
}

impl Default for HotelSettings {
    fn default() -> Self {
        Self {
            center_lon: 13.74,
            center_lat: 51.05,
            center_stdev: 0.1,
            room_size: 0.0001,
            min_rooms: 3,
            max_rooms: 10,
        }
    }
}

/// A generated hotel with all of its parts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    /// Hotel footprint
    pub hotel: Polygon,
    /// Rooms ordered from the low-coordinate end of their side
    pub rooms: Vec<Polygon>,
    /// Reception square inside the footprint
    pub reception: Polygon,
    /// Parking lot, absent for [`NegativeCase::NoParkingLot`]
    pub parking_lot: Option<Polygon>,
    /// Number of rooms
    pub room_count: usize,
    /// Side holding the room strip
    pub rooms_orientation: Orientation,
    /// Side holding the reception
    pub reception_orientation: Orientation,
    /// Side the parking lot was placed on
    pub parking_lot_orientation: Option<Orientation>,
    /// Label the generator assigned
    pub label: HotelLabel,
}

impl Hotel {
    /// WKT of the footprint
    pub fn hotel_wkt(&self) -> String {
        self.hotel.to_wkt()
    }

    /// WKT of every room, in room order
    pub fn room_wkts(&self) -> Vec<String> {
        self.rooms.iter().map(Polygon::to_wkt).collect()
    }

    /// WKT of the reception
    pub fn reception_wkt(&self) -> String {
        self.reception.to_wkt()
    }

    /// WKT of the parking lot, if any
    pub fn parking_lot_wkt(&self) -> Option<String> {
        self.parking_lot.as_ref().map(Polygon::to_wkt)
    }

    /// Content key of the footprint WKT
    pub fn resource_key(&self) -> ResourceKey {
        self.hotel.resource_key()
    }

    /// Relations of the parking lot towards the footprint and the reception
    pub fn parking_lot_relations(&self) -> Option<(SpatialRelation, SpatialRelation)> {
        let parking = self.parking_lot.as_ref()?;
        Some((relate(parking, &self.hotel), relate(parking, &self.reception)))
    }

    /// Whether the parking lot externally touches both the footprint and the reception
    ///
    /// Decided from the geometry alone, independent of [`Hotel::label`].
    pub fn is_car_friendly(&self) -> bool {
        matches!(
            self.parking_lot_relations(),
            Some((SpatialRelation::ExternallyConnected, SpatialRelation::ExternallyConnected))
        )
    }

    /// Whether the assigned label agrees with the geometry
    pub fn label_matches_geometry(&self) -> bool {
        self.label.is_positive() == self.is_car_friendly()
    }
}

/// Positive and negative hotel samples of one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HotelSamples {
    /// Car-friendly hotels
    pub positive: Vec<Hotel>,
    /// Not-car-friendly hotels
    pub negative: Vec<Hotel>,
}

impl HotelSamples {
    /// Total number of hotels
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len()
    }

    /// Whether no hotel was generated
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty()
    }

    /// All hotels, positives first
    pub fn iter(&self) -> impl Iterator<Item = &Hotel> {
        self.positive.iter().chain(self.negative.iter())
    }
}

/// Drawn footprint shared by every hotel variant
#[derive(Debug, Clone, Copy)]
struct Frame {
    center: Point,
    room_count: usize,
    rooms_orientation: Orientation,
    reception_orientation: Orientation,
}

/// Generator for labeled hotel layouts
pub struct HotelLayoutGenerator {
    rng: Box<dyn RngCore>,
    settings: HotelSettings,
}

impl fmt::Debug for HotelLayoutGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HotelLayoutGenerator").field("settings", &self.settings).finish()
    }
}

impl HotelLayoutGenerator {
    /// Create a generator drawing from the thread-local random source
    pub fn new(settings: HotelSettings) -> Self {
        Self::with_rng(settings, Box::new(thread_rng()))
    }

    /// Create a generator with a specific seed
    pub fn with_seed(settings: HotelSettings, seed: u64) -> Self {
        Self::with_rng(settings, Box::new(StdRng::seed_from_u64(seed)))
    }

    /// Create a generator drawing from `rng`
    pub fn with_rng(settings: HotelSettings, rng: Box<dyn RngCore>) -> Self {
        Self { rng, settings }
    }

    /// Current settings
    pub fn settings(&self) -> &HotelSettings {
        &self.settings
    }

    /// Generate `num_positive` car-friendly and `num_negative` not-car-friendly hotels
    #[instrument(skip(self))]
    pub fn generate(&mut self, num_positive: usize, num_negative: usize) -> HotelSamples {
        let positive = (0..num_positive).map(|_| self.generate_car_friendly()).collect();
        let negative = (0..num_negative).map(|_| self.generate_not_car_friendly()).collect();
        HotelSamples { positive, negative }
    }

    /// A hotel whose parking lot touches the footprint at the reception side
    pub fn generate_car_friendly(&mut self) -> Hotel {
        let frame = self.draw_frame();
        let parking = self.parking_lot(&frame, frame.reception_orientation, 0.0, 0.0);

        self.assemble(frame, Some((frame.reception_orientation, parking)), HotelLabel::CarFriendly)
    }

    /// A hotel of a uniformly drawn negative case
    pub fn generate_not_car_friendly(&mut self) -> Hotel {
        let case = NegativeCase::ALL[self.rng.gen_range(0..NegativeCase::ALL.len())];
        self.generate_negative_case(case)
    }

    /// A not-car-friendly hotel of the given case
    pub fn generate_negative_case(&mut self, case: NegativeCase) -> Hotel {
        let frame = self.draw_frame();
        let label = HotelLabel::NotCarFriendly(case);

        let parking = match case {
            NegativeCase::NoParkingLot => None,
            NegativeCase::DisconnectedParkingLot => {
                let orientation = Orientation::random(&mut *self.rng);
                let outward = self.parking_lot_gap();
                let mut across = self.parking_lot_gap();
                if self.rng.gen_bool(0.5) {
                    across = -across;
                }
                Some((orientation, self.parking_lot(&frame, orientation, outward, across)))
            }
            NegativeCase::MisplacedParkingLot => {
                let orientation = Orientation::random_excluding(
                    &mut *self.rng,
                    &[frame.rooms_orientation, frame.reception_orientation],
                );
                Some((orientation, self.parking_lot(&frame, orientation, 0.0, 0.0)))
            }
        };

        self.assemble(frame, parking, label)
    }

    fn draw_frame(&mut self) -> Frame {
        let d_lon: f64 = self.rng.sample(StandardNormal);
        let d_lat: f64 = self.rng.sample(StandardNormal);
        let center = Point::new(
            self.settings.center_lon + d_lon * self.settings.center_stdev,
            self.settings.center_lat + d_lat * self.settings.center_stdev,
        );

        let room_count = self.rng.gen_range(self.settings.min_rooms..=self.settings.max_rooms);
        let rooms_orientation = Orientation::random(&mut *self.rng);
        let reception_orientation =
            Orientation::random_excluding(&mut *self.rng, &[rooms_orientation]);

        debug!(
            "Hotel frame at ({:.5}, {:.5}) with {} rooms, rooms {} reception {}",
            center.lon, center.lat, room_count, rooms_orientation, reception_orientation
        );

        Frame { center, room_count, rooms_orientation, reception_orientation }
    }

    /// Extra distance keeping a parking lot clear of the footprint
    fn parking_lot_gap(&mut self) -> f64 {
        let size = self.settings.room_size;
        3.0 * self.rng.gen::<f64>() * size + 0.5 * size
    }

    /// Parking lot square on `orientation`, moved `outward` away from the footprint and `across` along its side
    fn parking_lot(&self, frame: &Frame, orientation: Orientation, outward: f64, across: f64) -> Square {
        let size = self.settings.room_size;
        let n = frame.room_count as f64;
        let (ux, uy) = orientation.unit_vector();
        let (ax, ay) = orientation.along_side();
        let distance = n * PARKING_LOT_DISTANCE * size + outward;

        Square::new(
            frame.center.offset(ux * distance + ax * across, uy * distance + ay * across),
            n / 2.0 * size,
        )
    }

    fn assemble(
        &self,
        frame: Frame,
        parking: Option<(Orientation, Square)>,
        label: HotelLabel,
    ) -> Hotel {
        let size = self.settings.room_size;
        let n = frame.room_count as f64;
        let inset = n / 2.0 * size - size / 2.0;

        let hotel = Square::new(frame.center, n * size);

        let (ux, uy) = frame.rooms_orientation.unit_vector();
        let (ax, ay) = frame.rooms_orientation.along_side();
        let side_center = frame.center.offset(ux * inset, uy * inset);
        let rooms = (0..frame.room_count)
            .map(|i| {
                let step = -inset + i as f64 * size;
                Square::new(side_center.offset(ax * step, ay * step), size)
                    .to_polygon(HOTEL_PRECISION)
            })
            .collect();

        let (rx, ry) = frame.reception_orientation.unit_vector();
        let reception = Square::new(frame.center.offset(rx * inset, ry * inset), size);

        Hotel {
            hotel: hotel.to_polygon(HOTEL_PRECISION),
            rooms,
            reception: reception.to_polygon(HOTEL_PRECISION),
            parking_lot: parking.map(|(_, square)| square.to_polygon(HOTEL_PRECISION)),
            room_count: frame.room_count,
            rooms_orientation: frame.rooms_orientation,
            reception_orientation: frame.reception_orientation,
            parking_lot_orientation: parking.map(|(orientation, _)| orientation),
            label,
        }
    }
}
