//! Arrivals lookup: the pipeline behind `GET /<stop>`.
//!
//! One lookup is cache → fetch → scrape → render. Every failure along the
//! way is recovered here and collapsed into one of the fixed JSON payloads;
//! callers always get well-formed response bytes, never an error. No
//! internal detail or upstream status ever reaches the response body.

use std::future::Future;

use axum::body::Bytes;
use tracing::{debug, warn};

use crate::cache::{CacheConfig, ResponseCache};
use crate::scrape::{self, ScrapeError};
use crate::stcp::StcpError;

/// Payload when the request path holds no stop code.
pub const NO_STOP_CODE_PAYLOAD: &str =
    r#"{"erro":"Nenhum código de paragem encontrado no caminho."}"#;

/// Payload for any transport-level failure contacting the provider.
pub const OFFLINE_PAYLOAD: &str = r#"{"erro":"O API da STCP está offline."}"#;

/// Payload when the provider answered with an unusable body.
pub const INVALID_HTML_PAYLOAD: &str = r#"{"erro":"O API respondeu com HTML inválido."}"#;

/// Payload when no buses are scheduled in the lookup window. A success
/// shape, not an error.
pub const EMPTY_BOARD_PAYLOAD: &str = r#"{"carros":[]}"#;

/// A stop code taken from the request path.
///
/// Opaque: anything left after trimming the outer separators is forwarded to
/// the upstream verbatim. The upstream decides what a valid code looks like.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StopCode(String);

impl StopCode {
    /// Extract a stop code from a request path.
    ///
    /// Strips exactly one leading `/` and, if present, exactly one trailing
    /// `/`. Returns `None` when nothing is left (e.g. `/` or `//`).
    pub fn from_path(path: &str) -> Option<Self> {
        let code = path.strip_prefix('/').unwrap_or(path);
        let code = code.strip_suffix('/').unwrap_or(code);

        if code.is_empty() {
            None
        } else {
            Some(Self(code.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StopCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Seam between the dispatcher and the upstream HTTP client.
///
/// `StcpClient` is the production implementation; tests substitute a canned
/// fetcher so lookups run without the network.
pub trait FetchArrivals {
    /// Fetch the raw arrivals page body for a stop.
    fn fetch(&self, stop: &StopCode) -> impl Future<Output = Result<String, StcpError>> + Send;
}

/// Cached arrivals lookup over some fetcher.
///
/// Owns the response cache; construct once at startup and share behind an
/// `Arc`.
pub struct ArrivalsService<F> {
    fetcher: F,
    cache: ResponseCache,
}

impl<F: FetchArrivals> ArrivalsService<F> {
    /// Create a new service around a fetcher.
    pub fn new(fetcher: F, cache_config: &CacheConfig) -> Self {
        Self {
            fetcher,
            cache: ResponseCache::new(cache_config),
        }
    }

    /// Resolve one stop lookup to its response payload.
    ///
    /// A cache hit returns the stored bytes unchanged, without touching the
    /// network. On a miss, only a non-empty board is cached: error payloads
    /// and the empty board are never stored.
    pub async fn lookup(&self, stop: &StopCode) -> Bytes {
        if let Some(hit) = self.cache.get(stop.as_str()).await {
            debug!(stop = stop.as_str(), "cache hit");
            return hit;
        }

        let body = match self.fetcher.fetch(stop).await {
            Ok(body) => body,
            Err(error) => {
                warn!(stop = stop.as_str(), %error, "upstream fetch failed");
                return Bytes::from_static(OFFLINE_PAYLOAD.as_bytes());
            }
        };

        let board = match scrape::scrape_board(&body) {
            Ok(board) => board,
            Err(ScrapeError::NoDepartures) => {
                return Bytes::from_static(EMPTY_BOARD_PAYLOAD.as_bytes());
            }
            Err(error @ ScrapeError::InvalidDocument) => {
                warn!(stop = stop.as_str(), %error, "unusable upstream body");
                return Bytes::from_static(INVALID_HTML_PAYLOAD.as_bytes());
            }
        };

        // Header row with nothing under it: same answer as a rowless page.
        if board.carros.is_empty() {
            return Bytes::from_static(EMPTY_BOARD_PAYLOAD.as_bytes());
        }

        let payload = Bytes::from(scrape::render(&board));
        self.cache
            .insert(stop.as_str().to_owned(), payload.clone())
            .await;

        debug!(stop = stop.as_str(), arrivals = board.carros.len(), "board rendered");
        payload
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Fetcher that replays a scripted sequence of responses and counts
    /// how often it was called.
    struct ScriptedFetcher {
        responses: Mutex<VecDeque<Result<String, StcpError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(responses: Vec<Result<String, StcpError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl FetchArrivals for ScriptedFetcher {
        async fn fetch(&self, _stop: &StopCode) -> Result<String, StcpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("fetch called more often than scripted")
        }
    }

    fn service(
        responses: Vec<Result<String, StcpError>>,
    ) -> ArrivalsService<ScriptedFetcher> {
        ArrivalsService::new(ScriptedFetcher::new(responses), &CacheConfig::default())
    }

    fn page_with_one_arrival(carro: &str) -> String {
        format!(
            "<html><body><table>\
             <tr><th>Carro</th><th>Hora</th><th>Espera</th></tr>\
             <tr><td>x</td><td>{carro}</td><td>x</td><td>22:10</td><td>x</td><td>5 min</td></tr>\
             </table></body></html>"
        )
    }

    #[test]
    fn stop_code_from_path() {
        assert_eq!(StopCode::from_path("/BCM1").unwrap().as_str(), "BCM1");
        assert_eq!(StopCode::from_path("BCM1").unwrap().as_str(), "BCM1");
        assert_eq!(StopCode::from_path("/BCM1/").unwrap().as_str(), "BCM1");
        assert_eq!(StopCode::from_path("BCM1/").unwrap().as_str(), "BCM1");
    }

    #[test]
    fn separator_only_paths_have_no_stop_code() {
        assert!(StopCode::from_path("").is_none());
        assert!(StopCode::from_path("/").is_none());
        assert!(StopCode::from_path("//").is_none());
    }

    #[tokio::test]
    async fn repeated_lookup_within_ttl_is_byte_identical_and_skips_the_network() {
        let svc = service(vec![
            Ok(page_with_one_arrival("205")),
            Ok(page_with_one_arrival("502")),
        ]);
        let stop = StopCode::from_path("/BCM1").unwrap();

        let first = svc.lookup(&stop).await;
        let second = svc.lookup(&stop).await;

        // The upstream changed between calls; the cached bytes did not.
        assert_eq!(first, second);
        assert_eq!(svc.fetcher.calls(), 1);

        let value: serde_json::Value = serde_json::from_slice(&first).unwrap();
        assert_eq!(value["carros"][0]["carro"], "205");
    }

    #[tokio::test]
    async fn transport_failure_is_offline_payload_and_nothing_is_cached() {
        let svc = service(vec![Err(StcpError::Api { status: 502 })]);
        let stop = StopCode::from_path("/BCM1").unwrap();

        let payload = svc.lookup(&stop).await;

        assert_eq!(payload, OFFLINE_PAYLOAD.as_bytes());
        assert_eq!(svc.cache.get("BCM1").await, None);
    }

    #[tokio::test]
    async fn garbage_body_is_invalid_html_payload_and_nothing_is_cached() {
        let svc = service(vec![Ok("\u{0}garbage bytes".to_owned())]);
        let stop = StopCode::from_path("/BCM1").unwrap();

        let payload = svc.lookup(&stop).await;

        assert_eq!(payload, INVALID_HTML_PAYLOAD.as_bytes());
        assert_eq!(svc.cache.get("BCM1").await, None);
    }

    #[tokio::test]
    async fn header_only_page_is_empty_board_and_not_cached() {
        let header_only = "<html><body><table>\
             <tr><th>Carro</th><th>Hora</th><th>Espera</th></tr>\
             </table></body></html>";
        let svc = service(vec![
            Ok(header_only.to_owned()),
            Ok(header_only.to_owned()),
        ]);
        let stop = StopCode::from_path("/BCM1").unwrap();

        assert_eq!(svc.lookup(&stop).await, EMPTY_BOARD_PAYLOAD.as_bytes());

        // Not cached: the next lookup fetches again.
        assert_eq!(svc.lookup(&stop).await, EMPTY_BOARD_PAYLOAD.as_bytes());
        assert_eq!(svc.fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn rowless_page_is_empty_board() {
        let svc = service(vec![Ok(
            "<html><body><table></table></body></html>".to_owned()
        )]);
        let stop = StopCode::from_path("/BCM1").unwrap();

        assert_eq!(svc.lookup(&stop).await, EMPTY_BOARD_PAYLOAD.as_bytes());
    }

    #[test]
    fn empty_board_payload_matches_rendered_empty_board() {
        let board = scrape::ArrivalsBoard { carros: vec![] };
        assert_eq!(scrape::render(&board), EMPTY_BOARD_PAYLOAD.as_bytes());
    }
}
