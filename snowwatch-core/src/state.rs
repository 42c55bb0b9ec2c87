//! Application state, the single source of truth the UI renders from.
//!
//! Components receive `&AppState`; only the reducer mutates it.

use crate::catalog::{Catalog, City};
use crate::client::FetchFailure;
use crate::verdict::{Classification, Verdict};

/// Identifies one outstanding fetch.
///
/// Results travel back through the action channel carrying the tag they were
/// issued with, and the reducer applies a result only while its tag is the
/// current one. A slow response for an earlier selection can therefore never
/// overwrite a later selection's display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTag {
    /// Monotonic counter, bumped on every issued fetch.
    pub seq: u64,
    /// Catalog index the fetch was issued for.
    pub city: usize,
}

/// Everything the UI needs to render.
#[derive(Clone, Debug)]
pub struct AppState {
    /// The fixed city list behind the selector.
    pub catalog: Catalog,

    /// Catalog index of the selected city. Kept in bounds by the reducer.
    pub selected: usize,

    /// Most recent accepted classification (None = no data yet, or the last
    /// fetch failed).
    pub classification: Option<Classification>,

    /// Most recent fetch failure, cleared by the next accepted result.
    pub last_failure: Option<FetchFailure>,

    /// Tag of the fetch currently in flight, if any.
    pub in_flight: Option<FetchTag>,

    /// Animation frame counter (spinner, snowfall).
    pub tick_count: u32,

    /// Terminal dimensions, updated on resize.
    pub terminal_size: (u16, u16),

    /// Counter backing tag issuance.
    next_seq: u64,
}

impl AppState {
    /// Fresh state over the given catalog, first entry selected.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            selected: 0,
            classification: None,
            last_failure: None,
            in_flight: None,
            tick_count: 0,
            terminal_size: (80, 24), // Default, updated on resize
            next_seq: 0,
        }
    }

    /// The selected city.
    pub fn selected_city(&self) -> &City {
        &self.catalog.cities()[self.selected]
    }

    /// The verdict currently on display, derived from the classification.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_classification(self.classification.as_ref())
    }

    /// Whether a fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether a result carrying `tag` should still be applied.
    pub fn accepts(&self, tag: FetchTag) -> bool {
        self.in_flight == Some(tag)
    }

    /// Issue the tag for a new fetch of the current selection and mark it in
    /// flight, superseding any previously outstanding tag.
    pub(crate) fn begin_fetch(&mut self) -> FetchTag {
        self.next_seq += 1;
        let tag = FetchTag {
            seq: self.next_seq,
            city: self.selected,
        };
        self.in_flight = Some(tag);
        tag
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}
