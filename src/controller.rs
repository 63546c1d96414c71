//! Application state for the main window, kept free of any widget code.
//!
//! Every user action and every async completion is a method call here. Each
//! call mutates the state and returns the [`Effect`] the UI shell should run,
//! so the whole flow can be driven by tests without a window.

use crate::brew::is_lookup_marker;
use crate::task::{Operation, TaskCoordinator, TaskReport, TaskState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Narrow the loaded installed list in place.
    #[default]
    Filter,
    /// Query brew's full index for new packages.
    Search,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub hidden: bool,
}

impl Entry {
    fn visible(name: String) -> Self {
        Self {
            name,
            hidden: false,
        }
    }
}

/// Outcome line shown under the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub is_error: bool,
}

impl Status {
    fn info(message: String) -> Self {
        Self {
            message,
            is_error: false,
        }
    }

    fn error(message: String) -> Self {
        Self {
            message,
            is_error: true,
        }
    }
}

/// Work the UI shell must start on behalf of the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    LoadInstalled { ticket: u64 },
    Search { ticket: u64, query: String },
    RunTask(Operation),
}

#[derive(Debug, Default)]
pub struct AppState {
    mode: SearchMode,
    query: String,
    entries: Vec<Entry>,
    selected: Option<String>,
    task: TaskCoordinator,
    // only results stamped with this ticket may replace the list
    ticket: u64,
    // lowercase filter currently in force; reapplied to reloads that land after it
    applied_filter: Option<String>,
    status: Option<Status>,
}

impl AppState {
    /// Fresh state in filter mode, plus the initial installed-list load.
    pub fn new() -> (Self, Effect) {
        let mut state = Self::default();
        let effect = state.set_mode(SearchMode::Filter);
        (state, effect)
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn visible_entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter().filter(|e| !e.hidden)
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn task_state(&self) -> &TaskState {
        self.task.state()
    }

    pub fn controls_enabled(&self) -> bool {
        self.task.controls_enabled()
    }

    fn next_ticket(&mut self) -> u64 {
        self.ticket += 1;
        self.ticket
    }

    fn replace_entries(&mut self, names: Vec<String>) {
        self.entries = names.into_iter().map(Entry::visible).collect();
        if let Some(selected) = &self.selected {
            if !self.entries.iter().any(|e| &e.name == selected) {
                self.selected = None;
            }
        }
    }

    fn apply_filter(&mut self) {
        if let Some(filter) = &self.applied_filter {
            for entry in &mut self.entries {
                entry.hidden = !entry.name.to_lowercase().contains(filter.as_str());
            }
        }
    }

    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub fn set_mode(&mut self, mode: SearchMode) -> Effect {
        tracing::debug!(?mode, "search mode changed");
        self.mode = mode;
        self.applied_filter = None;
        match mode {
            SearchMode::Filter => Effect::LoadInstalled {
                ticket: self.next_ticket(),
            },
            SearchMode::Search => {
                // anything still loading belongs to the old mode
                self.next_ticket();
                self.entries.clear();
                self.selected = None;
                Effect::None
            }
        }
    }

    pub fn submit_query(&mut self) -> Effect {
        let query = self.query.to_lowercase();
        match (self.mode, query.is_empty()) {
            (SearchMode::Filter, true) => {
                self.applied_filter = None;
                Effect::LoadInstalled {
                    ticket: self.next_ticket(),
                }
            }
            (SearchMode::Search, true) => Effect::None,
            (SearchMode::Filter, false) => {
                self.applied_filter = Some(query);
                self.apply_filter();
                Effect::None
            }
            (SearchMode::Search, false) => Effect::Search {
                ticket: self.next_ticket(),
                query,
            },
        }
    }

    pub fn select(&mut self, name: String) {
        self.selected = Some(name);
    }

    /// Applies a reloaded installed list. Returns false when the result is
    /// stale and was dropped.
    pub fn installed_loaded(&mut self, ticket: u64, packages: Vec<String>) -> bool {
        if ticket != self.ticket {
            tracing::debug!(ticket, latest = self.ticket, "dropping stale installed list");
            return false;
        }
        self.replace_entries(packages);
        self.apply_filter();
        true
    }

    pub fn search_loaded(&mut self, ticket: u64, results: Vec<String>) -> bool {
        if ticket != self.ticket {
            tracing::debug!(ticket, latest = self.ticket, "dropping stale search results");
            return false;
        }
        self.replace_entries(results);
        true
    }

    pub fn request_install(&mut self) -> Effect {
        match self.selected_package() {
            Some(name) => self.start(Operation::Install(name)),
            None => Effect::None,
        }
    }

    pub fn request_uninstall(&mut self) -> Effect {
        match self.selected_package() {
            Some(name) => self.start(Operation::Uninstall(name)),
            None => Effect::None,
        }
    }

    pub fn request_upgrade(&mut self) -> Effect {
        self.start(Operation::UpgradeAll)
    }

    fn selected_package(&mut self) -> Option<String> {
        let name = self.selected.clone()?;
        if is_lookup_marker(&name) {
            self.status = Some(Status::error("Select a package first.".to_string()));
            return None;
        }
        Some(name)
    }

    fn start(&mut self, operation: Operation) -> Effect {
        match self.task.begin(operation) {
            Ok(operation) => {
                self.status = None;
                Effect::RunTask(operation)
            }
            Err(e) => {
                self.status = Some(Status::error(e.to_string()));
                Effect::None
            }
        }
    }

    /// Applies the refreshed list from a finished task, then returns the
    /// task slot to idle so the controls come back.
    pub fn task_finished(&mut self, report: TaskReport) {
        // a finished task shows the whole refreshed list
        self.applied_filter = None;
        let ticket = self.next_ticket();
        self.installed_loaded(ticket, report.packages);
        self.status = Some(match &report.outcome {
            Ok(()) => Status::info(format!("brew {} finished.", report.operation)),
            Err(e) => Status::error(format!("brew {} failed: {}", report.operation, e)),
        });
        self.task.finish();
    }
}
