//! STCP bus arrivals server.
//!
//! Scrapes the live arrivals page of Porto's STCP network and re-serves it
//! as a small JSON API, one stop per request.

pub mod arrivals;
pub mod cache;
pub mod scrape;
pub mod search;
pub mod stcp;
pub mod web;
