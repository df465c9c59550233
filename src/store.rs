use std::any::Any;
use std::collections::{BTreeMap, BTreeSet};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use anyhow::{anyhow, Result};

use crate::color::ColorMap;
use crate::data::model::{DatasetKind, StateValue, Year, YearTable, DEFAULT_YEAR};
use crate::data::source::DataSource;
use crate::data::view::year_view;

type LoadOutcome = (DatasetKind, Result<YearTable>);

// ---------------------------------------------------------------------------
// Selection & dataset store
// ---------------------------------------------------------------------------

/// Selected year, selected states, the two raw datasets and the colour map.
///
/// All mutation goes through the methods below and happens on the owning
/// (UI) thread. Fetches started by [`Store::load_data`] run on worker threads
/// and only hand finished tables back; they are applied by
/// [`Store::poll_loads`] or [`Store::wait_next_load`].
pub struct Store {
    selected_year: Year,
    /// Insertion order, no duplicates.
    selected_states: Vec<String>,
    education: YearTable,
    income: YearTable,
    color_map: ColorMap,

    source: Arc<dyn DataSource>,
    load_tx: Sender<LoadOutcome>,
    load_rx: Receiver<LoadOutcome>,
    pending: usize,
    loaded: BTreeSet<DatasetKind>,
    load_errors: BTreeMap<DatasetKind, String>,
}

impl Store {
    pub fn new(source: Arc<dyn DataSource>) -> Self {
        let (load_tx, load_rx) = mpsc::channel();
        Self {
            selected_year: DEFAULT_YEAR,
            selected_states: Vec::new(),
            education: YearTable::default(),
            income: YearTable::default(),
            color_map: ColorMap::default(),
            source,
            load_tx,
            load_rx,
            pending: 0,
            loaded: BTreeSet::new(),
            load_errors: BTreeMap::new(),
        }
    }

    // -- mutations --

    pub fn change_selected_year(&mut self, year: Year) {
        self.selected_year = year;
    }

    /// Remove `state` if selected, otherwise append it.
    pub fn toggle_state_selection(&mut self, state: &str) {
        match self.selected_states.iter().position(|s| s == state) {
            Some(idx) => {
                self.selected_states.remove(idx);
            }
            None => self.selected_states.push(state.to_string()),
        }
    }

    pub fn clear_state_selection(&mut self) {
        self.selected_states.clear();
    }

    pub fn set_color_map(&mut self, color_map: ColorMap) {
        self.color_map = color_map;
    }

    /// Point later loads at a different source. In-flight fetches still land.
    pub fn set_source(&mut self, source: Arc<dyn DataSource>) {
        self.source = source;
    }

    /// Start fetching both datasets, each on its own worker thread.
    ///
    /// Each dataset is replaced independently when its fetch finishes and the
    /// result is picked up by `poll_loads`/`wait_next_load`. A failed fetch
    /// is logged and leaves that dataset as it was.
    pub fn load_data(&mut self) {
        log::info!("loading datasets from {}", self.source.describe());
        for kind in DatasetKind::ALL {
            let source = Arc::clone(&self.source);
            let tx = self.load_tx.clone();
            let spawned = thread::Builder::new()
                .name(format!("load-{kind}"))
                .spawn(move || {
                    // Every started fetch must report back, or `pending` never drains.
                    let result = panic::catch_unwind(AssertUnwindSafe(|| source.fetch(kind)))
                        .unwrap_or_else(|payload| {
                            Err(anyhow!(
                                "{kind} fetch panicked: {}",
                                panic_message(payload.as_ref())
                            ))
                        });
                    // The store may be gone by now; nothing left to update.
                    let _ = tx.send((kind, result));
                });
            match spawned {
                Ok(_) => self.pending += 1,
                Err(e) => {
                    log::error!("failed to start {kind} load: {e}");
                    self.load_errors.insert(kind, e.to_string());
                }
            }
        }
    }

    /// Apply every fetch that has finished, without blocking.
    pub fn poll_loads(&mut self) -> Vec<DatasetKind> {
        let mut applied = Vec::new();
        while let Ok(outcome) = self.load_rx.try_recv() {
            applied.push(self.apply_load(outcome));
        }
        applied
    }

    /// Block until the next in-flight fetch finishes and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub fn wait_next_load(&mut self) -> Option<DatasetKind> {
        if self.pending == 0 {
            return None;
        }
        let outcome = self.load_rx.recv().ok()?;
        Some(self.apply_load(outcome))
    }

    /// Block until every in-flight fetch has finished.
    pub fn wait_for_loads(&mut self) -> Vec<DatasetKind> {
        let mut applied = Vec::new();
        while let Some(kind) = self.wait_next_load() {
            applied.push(kind);
        }
        applied
    }

    fn apply_load(&mut self, (kind, result): LoadOutcome) -> DatasetKind {
        self.pending = self.pending.saturating_sub(1);
        match result {
            Ok(table) => {
                log::info!(
                    "loaded {kind} dataset: {} states, years {:?}",
                    table.len(),
                    table.years
                );
                *self.table_mut(kind) = table;
                self.loaded.insert(kind);
                self.load_errors.remove(&kind);
            }
            Err(e) => {
                log::error!("failed to load {kind} dataset: {e:#}");
                self.load_errors.insert(kind, format!("{e:#}"));
            }
        }
        kind
    }

    fn table_mut(&mut self, kind: DatasetKind) -> &mut YearTable {
        match kind {
            DatasetKind::Education => &mut self.education,
            DatasetKind::Income => &mut self.income,
        }
    }

    // -- reads --

    pub fn selected_year(&self) -> Year {
        self.selected_year
    }

    pub fn selected_states(&self) -> &[String] {
        &self.selected_states
    }

    pub fn is_state_selected(&self, state: &str) -> bool {
        self.selected_states.iter().any(|s| s == state)
    }

    pub fn color_map(&self) -> &ColorMap {
        &self.color_map
    }

    /// Education rate per state for the selected year.
    pub fn education_rates(&self) -> Vec<StateValue> {
        year_view(&self.education, self.selected_year)
    }

    /// Personal income per state for the selected year.
    pub fn personal_income(&self) -> Vec<StateValue> {
        year_view(&self.income, self.selected_year)
    }

    pub fn raw(&self, kind: DatasetKind) -> &YearTable {
        match kind {
            DatasetKind::Education => &self.education,
            DatasetKind::Income => &self.income,
        }
    }

    /// Years present in either raw dataset.
    pub fn available_years(&self) -> BTreeSet<Year> {
        self.education
            .years
            .union(&self.income.years)
            .copied()
            .collect()
    }

    /// State names across both datasets, first appearance wins.
    pub fn state_names(&self) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.education
            .state_names()
            .chain(self.income.state_names())
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn pending_loads(&self) -> usize {
        self.pending
    }

    pub fn is_loaded(&self, kind: DatasetKind) -> bool {
        self.loaded.contains(&kind)
    }

    /// Message of the last failed fetch for `kind`, cleared by a later success.
    pub fn last_load_error(&self, kind: DatasetKind) -> Option<&str> {
        self.load_errors.get(&kind).map(String::as_str)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
