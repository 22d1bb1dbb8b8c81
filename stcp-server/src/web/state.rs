//! Application state for the web layer.

use std::sync::Arc;

use crate::arrivals::ArrivalsService;
use crate::search::SearchClient;
use crate::stcp::StcpClient;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Cached arrivals lookup over the STCP client
    pub arrivals: Arc<ArrivalsService<StcpClient>>,

    /// Stop-name search client
    pub search: Arc<SearchClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(arrivals: ArrivalsService<StcpClient>, search: SearchClient) -> Self {
        Self {
            arrivals: Arc::new(arrivals),
            search: Arc::new(search),
        }
    }
}
