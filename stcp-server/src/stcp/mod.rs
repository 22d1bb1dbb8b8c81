//! STCP upstream client.
//!
//! The arrivals endpoint (`soapclient.php`) serves a rendered HTML page
//! rather than a JSON API; this module only moves bytes. Reducing the page
//! to records is the job of [`crate::scrape`].

mod client;
mod error;

pub use client::{StcpClient, StcpConfig};
pub use error::StcpError;
