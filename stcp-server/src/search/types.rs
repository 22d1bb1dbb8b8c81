//! Stop search wire types.

use serde::de::Error as _;
use serde::ser::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A bus stop returned by the stop-name search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusStop {
    pub code: String,
    pub name: String,
    pub zone: String,
    #[serde(rename = "geomdesc")]
    pub location: Location,
    pub lines: Vec<Line>,
}

/// A line serving a stop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub code: String,
    pub description: String,
}

/// Flat coordinate pair for a stop.
///
/// On the wire this is `geomdesc`: a *string* holding another JSON document,
/// `{"coordinates":[lat,lng]}`. Both serialize and deserialize go through
/// that nested encoding, so a round trip reproduces the pair exactly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// The document inside the `geomdesc` string. Extra GeoJSON fields such as
/// `type` are ignored on decode.
#[derive(Serialize, Deserialize)]
struct GeomDesc {
    coordinates: [f64; 2],
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let geom = GeomDesc {
            coordinates: [self.lat, self.lng],
        };
        let nested = serde_json::to_string(&geom).map_err(S::Error::custom)?;
        serializer.serialize_str(&nested)
    }
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let nested = String::deserialize(deserializer)?;
        let geom: GeomDesc = serde_json::from_str(&nested).map_err(D::Error::custom)?;

        Ok(Self {
            lat: geom.coordinates[0],
            lng: geom.coordinates[1],
        })
    }
}
