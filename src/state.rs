use std::collections::BTreeMap;
use std::path::Path;

use crate::charts::Dispatcher;
use crate::color::ClassPalette;
use crate::config::Config;
use crate::data::action::{FilterAction, reduce};
use crate::data::filter::{FilterState, FilteredView, apply};
use crate::data::handles::DualHandle;
use crate::data::loader;
use crate::data::model::{Dataset, Span};

// ---------------------------------------------------------------------------
// Session – everything that exists once a dataset is loaded
// ---------------------------------------------------------------------------

/// Slider handle positions, kept across frames.
#[derive(Debug, Clone)]
pub struct Sliders {
    pub years: DualHandle,
    pub engine_sizes: DualHandle,
}

impl Sliders {
    fn for_dataset(dataset: &Dataset) -> Self {
        Sliders {
            years: DualHandle::whole(dataset.bounds.years),
            engine_sizes: DualHandle::tenths(dataset.bounds.engine_sizes),
        }
    }

    fn sync(&mut self, filters: &FilterState) {
        let years = filters.years;
        self.years.sync(Span::new(years.min as f64, years.max as f64));
        self.engine_sizes.sync(filters.engine_sizes);
    }
}

/// The loaded dataset with its filters, current view and charts.
///
/// All filter changes go through [`Session::dispatch`], which refilters
/// once and redraws every chart with the result.
pub struct Session {
    dataset: Dataset,
    filters: FilterState,
    view: FilteredView,
    dispatcher: Dispatcher,
    pub sliders: Sliders,
}

impl Session {
    pub fn new(dataset: Dataset) -> Self {
        Self::with_dispatcher(dataset, Dispatcher::default())
    }

    pub fn with_dispatcher(dataset: Dataset, mut dispatcher: Dispatcher) -> Self {
        dispatcher.render_initial(&dataset);
        Session {
            filters: FilterState::unrestricted(&dataset.bounds),
            view: FilteredView::all(&dataset),
            sliders: Sliders::for_dataset(&dataset),
            dispatcher,
            dataset,
        }
    }

    /// Apply one interaction. Returns whether the filters changed; an
    /// unchanged state skips both refilter and redraw.
    pub fn dispatch(&mut self, action: FilterAction) -> bool {
        let reset = action == FilterAction::Reset;
        let next = reduce(&self.filters, action, &self.dataset.bounds);
        if next == self.filters {
            return false;
        }
        self.filters = next;
        if reset {
            self.sliders.sync(&self.filters);
        }

        self.view = apply(&self.dataset, &self.filters);
        log::debug!(
            "filters {:?} → {} of {} records",
            self.filters,
            self.view.len(),
            self.dataset.len()
        );
        self.dispatcher.render_update(&self.dataset, &self.view);
        true
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn view(&self) -> &FilteredView {
        &self.view
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// None until a dataset loads successfully.
    pub session: Option<Session>,

    /// Raw class → colour table from the palette file.
    palette_table: BTreeMap<String, String>,

    /// Colours for the current dataset's classes.
    pub palette: ClassPalette,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Load the palette and dataset named by `config`.
    pub fn new(config: &Config) -> Self {
        let palette_table = match loader::load_palette(&config.palette) {
            Ok(table) => table,
            Err(e) => {
                log::warn!("Palette unavailable, using generated colours: {e:#}");
                BTreeMap::new()
            }
        };

        let mut state = AppState {
            session: None,
            palette_table,
            palette: ClassPalette::default(),
            status_message: None,
        };
        state.load_dataset(&config.data);
        state
    }

    /// Replace the dataset. A failure keeps the current session (if any)
    /// and surfaces the error.
    pub fn load_dataset(&mut self, path: &Path) {
        match loader::load_dataset(path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} records ({} classes) from {}",
                    dataset.len(),
                    dataset.classes.len(),
                    path.display()
                );
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Ingest a newly loaded dataset: fresh filters, colours and charts.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.palette = ClassPalette::new(&self.palette_table, &dataset.classes);
        self.session = Some(Session::new(dataset));
        self.status_message = None;
    }

    /// Apply actions in the order the controls emitted them.
    pub fn dispatch_all(&mut self, actions: Vec<FilterAction>) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        for action in actions {
            session.dispatch(action);
        }
    }
}
