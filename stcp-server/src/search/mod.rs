//! Stop-name search against the STCP itinerarium call service.
//!
//! Unlike the arrivals page this endpoint speaks JSON, with one quirk: a
//! stop's location arrives as `geomdesc`, a string field whose content is
//! itself a JSON document carrying the coordinate pair. The types here
//! unwrap that nesting into a flat `Location`.

mod client;
mod error;
mod types;

pub use client::{SearchClient, SearchConfig};
pub use error::SearchError;
pub use types::{BusStop, Line, Location};
