//! Extraction of arrival records from the upstream HTML page.
//!
//! The STCP arrivals endpoint answers with a rendered HTML page, not JSON.
//! This module reduces that page to an [`ArrivalsBoard`]: every `<tr>` in the
//! document, in document order, minus the leading header row.
//!
//! html5ever is lenient, so "did not parse as HTML" cannot be observed as a
//! parser error. It is observed structurally instead: a body that yields no
//! `<table>` element at all (garbage bytes, an upstream error page) is
//! rejected as [`ScrapeError::InvalidDocument`].

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

/// Positions of the value cells within a data row, zero-indexed among its
/// `<td>`s. The upstream table interleaves label and value cells; this layout
/// is an external contract with no schema behind it, so it lives here as
/// named constants rather than inline arithmetic.
const VEHICLE_CELL: usize = 1;
const TIME_CELL: usize = 3;
const WAIT_CELL: usize = 5;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").expect("static selector"));
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").expect("static selector"));

/// One scheduled arrival, exactly as displayed by the upstream page.
///
/// All three fields are free-form display strings (e.g. `"5 min"`); field
/// declaration order fixes the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BusArrival {
    pub carro: String,
    pub tempo: String,
    pub espera: String,
}

/// The arrivals board for one stop. Serializes as `{"carros":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArrivalsBoard {
    pub carros: Vec<BusArrival>,
}

/// Why a response body could not be turned into a board.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// No `<table>` anywhere in the parsed tree; the upstream answered with
    /// something other than an arrivals page.
    #[error("response body is not an arrivals page")]
    InvalidDocument,

    /// The page holds no rows at all: no buses in the lookup window. This is
    /// a valid empty result, not a failure.
    #[error("no departures in the lookup window")]
    NoDepartures,
}

/// Scrape the arrivals board out of a response body.
///
/// Rows come back in document order. The first row is the column-label
/// header and never reaches the output; a page where only the header
/// survives produces an empty board.
pub fn scrape_board(body: &str) -> Result<ArrivalsBoard, ScrapeError> {
    let document = Html::parse_document(body);

    if document.select(&TABLE).next().is_none() {
        return Err(ScrapeError::InvalidDocument);
    }

    let mut rows = document.select(&ROW);
    if rows.next().is_none() {
        return Err(ScrapeError::NoDepartures);
    }

    let carros = rows.map(arrival_from_row).collect();
    Ok(ArrivalsBoard { carros })
}

/// Serialize a board to its response bytes.
///
/// Goes through serde_json rather than string templating, so upstream cell
/// text containing quotes or control characters is escaped instead of
/// corrupting the payload.
pub fn render(board: &ArrivalsBoard) -> Vec<u8> {
    serde_json::to_vec(board).expect("string-only struct serializes")
}

fn arrival_from_row(row: ElementRef<'_>) -> BusArrival {
    BusArrival {
        carro: cell_text(row, VEHICLE_CELL),
        tempo: cell_text(row, TIME_CELL),
        espera: cell_text(row, WAIT_CELL),
    }
}

/// Trimmed text content of the nth `<td>` of a row, or the empty string when
/// the row is shorter than the expected layout.
fn cell_text(row: ElementRef<'_>, index: usize) -> String {
    row.select(&CELL)
        .nth(index)
        .map(|cell| cell.text().collect::<String>().trim().to_owned())
        .unwrap_or_default()
}
