//! View state controller.
//!
//! Explicit state machine fed by [`ViewEvent`] messages. The initial load is
//! complete once paging, manufacturer derivation, and both secondary batches
//! have reported in. Selector changes briefly re-enter `Loading` until the
//! matching [`ViewEvent::FilterApplied`] arrives.

use crate::filter::ManufacturerSelector;

/// What the view should currently show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStatus {
    Loading,
    Loaded,
    /// Loading failed; carries the error message to display.
    Failed(String),
}

/// Completion and user-input messages driving the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    PagingDone,
    ManufacturersReady,
    PilotsFetched,
    FilmsFetched,
    /// The user picked a new selector value.
    SelectionChanged(ManufacturerSelector),
    /// The re-filter for the given selection generation is ready to show.
    FilterApplied(u64),
    Failed(String),
}

#[derive(Debug, Default, Clone, Copy)]
struct Stages {
    paging: bool,
    manufacturers: bool,
    pilots: bool,
    films: bool,
}

impl Stages {
    fn all_done(&self) -> bool {
        self.paging && self.manufacturers && self.pilots && self.films
    }
}

#[derive(Debug, Clone)]
pub struct ViewController {
    status: ViewStatus,
    stages: Stages,
    initial_load_complete: bool,
    pending: ManufacturerSelector,
    applied: ManufacturerSelector,
    generation: u64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            status: ViewStatus::Loading,
            stages: Stages::default(),
            initial_load_complete: false,
            pending: ManufacturerSelector::All,
            applied: ManufacturerSelector::All,
            generation: 0,
        }
    }

    pub fn status(&self) -> &ViewStatus {
        &self.status
    }

    /// Latched the first time the view reaches `Loaded`; never resets.
    pub fn initial_load_complete(&self) -> bool {
        self.initial_load_complete
    }

    /// The selector is shown after the initial load and usable only while loaded.
    pub fn selector_enabled(&self) -> bool {
        self.initial_load_complete && self.status == ViewStatus::Loaded
    }

    /// Selector whose results are currently on screen.
    pub fn applied_selector(&self) -> &ManufacturerSelector {
        &self.applied
    }

    /// Most recent selector chosen by the user.
    pub fn pending_selector(&self) -> &ManufacturerSelector {
        &self.pending
    }

    /// Generation of the most recent selection; [`ViewEvent::FilterApplied`]
    /// must carry this value to take effect.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn handle(&mut self, event: ViewEvent) -> &ViewStatus {
        if matches!(self.status, ViewStatus::Failed(_)) {
            tracing::debug!(?event, "view failed, event ignored");
            return &self.status;
        }

        match event {
            ViewEvent::PagingDone => self.stages.paging = true,
            ViewEvent::ManufacturersReady => self.stages.manufacturers = true,
            ViewEvent::PilotsFetched => self.stages.pilots = true,
            ViewEvent::FilmsFetched => self.stages.films = true,
            ViewEvent::SelectionChanged(selector) => {
                if !self.initial_load_complete {
                    tracing::debug!(%selector, "selection before initial load ignored");
                    return &self.status;
                }
                self.generation += 1;
                self.pending = selector;
                self.status = ViewStatus::Loading;
            }
            ViewEvent::FilterApplied(generation) => {
                if generation == self.generation && self.initial_load_complete {
                    self.applied = self.pending.clone();
                    self.status = ViewStatus::Loaded;
                } else {
                    tracing::debug!(generation, current = self.generation, "stale filter result ignored");
                }
                return &self.status;
            }
            ViewEvent::Failed(message) => {
                self.status = ViewStatus::Failed(message);
                return &self.status;
            }
        }

        if !self.initial_load_complete && self.stages.all_done() {
            self.initial_load_complete = true;
            self.status = ViewStatus::Loaded;
            tracing::info!("initial load complete");
        }
        &self.status
    }
}
