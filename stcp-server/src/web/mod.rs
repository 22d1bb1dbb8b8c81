//! Web layer binding the arrivals pipeline to HTTP.

mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
