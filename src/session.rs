//! The session: one explicit context owning every loaded source and the view.
//!
//! Each operation runs to completion against `&mut self`, so the store and view state
//! only ever have a single writer. Any operation that changes the visible lines resets
//! the scroll offset; scrolling never touches the visible lines.

pub mod command;
pub mod export;

pub use command::{Command, Outcome};
pub use export::{export_file_name, export_lines, ExportPayload};

use crate::config::Config;
use crate::error::{LogscopeError, Result};
use crate::filter::{filter, ViewLine};
use crate::render::state::{RenderFrame, ViewState};
use crate::search::{mass, replace, MassQuery};
use crate::source::{validate_file_name, LogSource, SourceStore, SYNTHETIC_SOURCE_NAME};
use log::{debug, info};

pub struct Session {
    store: SourceStore,
    view: ViewState,
    /// Real sources checked by the user, in no particular order
    checked: Vec<String>,
    /// Term of the last single-source search on the active source
    search_term: Option<String>,
    /// Last successful mass search, re-run after replaces and toggles
    last_mass: Option<MassQuery>,
    accepted_extensions: Vec<String>,
}

impl Session {
    pub fn new(config: &Config, viewport_height: u64) -> Self {
        Self {
            store: SourceStore::new(config.palette(), config.query_color),
            view: ViewState::new(config.row_height, viewport_height),
            checked: Vec::new(),
            search_term: None,
            last_mass: None,
            accepted_extensions: config.accepted_extensions.clone(),
        }
    }

    pub fn store(&self) -> &SourceStore {
        &self.store
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn frame(&self) -> RenderFrame<'_> {
        self.view.frame()
    }

    pub fn active_source(&self) -> Option<&LogSource> {
        self.view
            .active_source()
            .and_then(|name| self.store.get(name))
    }

    pub fn error_only(&self) -> bool {
        self.view.error_only
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn last_mass_query(&self) -> Option<&MassQuery> {
        self.last_mass.as_ref()
    }

    /// Text to pre-fill a replace prompt with: the term that produced the current view.
    pub fn replace_prefill(&self) -> &str {
        if self.view.is_synthetic_active() {
            self.last_mass.as_ref().map_or("", |query| query.term.as_str())
        } else {
            self.search_term().unwrap_or("")
        }
    }

    /// Dispatch one user action.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::Import {
                file_name,
                raw_text,
            } => self.import(&file_name, &raw_text).map(|_| Outcome::Updated),
            Command::Close(name) => {
                self.close(&name);
                Ok(Outcome::Updated)
            }
            Command::Open(name) => self.open(&name).map(Outcome::Matches),
            Command::Search(term) => self.search(&term).map(Outcome::Matches),
            Command::MassSearch(term) => self.mass_search(&term).map(Outcome::Matches),
            Command::ToggleErrorOnly => {
                self.toggle_error_only();
                Ok(Outcome::Updated)
            }
            Command::Replace { find, replace } => {
                self.replace_all(&find, &replace).map(Outcome::Replaced)
            }
            Command::ToggleChecked(name) => Ok(Outcome::Checked(self.toggle_checked(&name))),
            Command::Scroll(rows) => Ok(Outcome::Scrolled(self.view.scroll_rows(rows))),
            Command::PageUp => {
                let page = self.view.page_rows() as i64;
                Ok(Outcome::Scrolled(self.view.scroll_rows(-page)))
            }
            Command::PageDown => {
                let page = self.view.page_rows() as i64;
                Ok(Outcome::Scrolled(self.view.scroll_rows(page)))
            }
            Command::ScrollToTop => Ok(Outcome::Scrolled(self.view.scroll_to_top())),
            Command::ScrollToBottom => Ok(Outcome::Scrolled(self.view.scroll_to_bottom())),
            Command::Resize(height) => {
                self.view.resize(height);
                Ok(Outcome::Scrolled(false))
            }
            Command::Export => self.export().map(Outcome::Exported),
        }
    }

    /// Reject file names whose extension this session does not accept.
    pub fn check_file_name(&self, file_name: &str) -> Result<()> {
        validate_file_name(file_name, &self.accepted_extensions)
    }

    /// Import `raw_text` under `file_name`. Becomes active if nothing else is.
    pub fn import(&mut self, file_name: &str, raw_text: &str) -> Result<()> {
        self.check_file_name(file_name)?;
        self.store.import(file_name, raw_text)?;
        if self.view.active_source().is_none() {
            self.open(file_name)?;
        }
        Ok(())
    }

    /// Close a source. If it was active, fall back to the first remaining real source.
    pub fn close(&mut self, name: &str) -> bool {
        if !self.store.close(name) {
            return false;
        }
        self.checked.retain(|checked| checked != name);
        if name == SYNTHETIC_SOURCE_NAME {
            self.last_mass = None;
        }

        if self.view.active_source() == Some(name) {
            match self.store.fallback().map(str::to_string) {
                Some(fallback) => {
                    info!("closed {}, falling back to {}", name, fallback);
                    self.show_real(&fallback);
                }
                None => {
                    info!("closed {}, no sources left", name);
                    self.search_term = None;
                    self.view.clear();
                }
            }
        }
        true
    }

    /// Make `name` the active source, showing all its lines under errors-only.
    ///
    /// Opening a real source clears the single-source search term; opening the query
    /// source re-runs the last mass search.
    pub fn open(&mut self, name: &str) -> Result<usize> {
        if name == SYNTHETIC_SOURCE_NAME && self.store.synthetic().is_some() {
            self.view.show(SYNTHETIC_SOURCE_NAME, Vec::new());
            self.rerun_mass();
            return Ok(self.view.visible_lines().len());
        }

        if !self.store.is_real(name) {
            return Err(LogscopeError::NoActiveSource);
        }
        self.show_real(name);
        Ok(self.view.visible_lines().len())
    }

    /// Filter the active real source by `term` (empty shows every line).
    ///
    /// # Error Cases
    /// - `NoActiveSource` when nothing is active or the query source is active
    pub fn search(&mut self, term: &str) -> Result<usize> {
        let name = match self.view.active_source() {
            Some(name) if name != SYNTHETIC_SOURCE_NAME => name.to_string(),
            _ => return Err(LogscopeError::NoActiveSource),
        };
        self.search_term = (!term.is_empty()).then(|| term.to_string());
        self.refilter_real(&name);
        Ok(self.view.visible_lines().len())
    }

    /// Search `term` across the checked sources and show the merged result.
    pub fn mass_search(&mut self, term: &str) -> Result<usize> {
        let selected = self.checked_sources();
        let hits = mass::mass_search(&self.store, term, &selected, self.view.error_only)?;

        self.last_mass = Some(MassQuery {
            term: term.to_string(),
            selected,
        });
        Ok(self.show_mass(hits))
    }

    /// Flip the process-wide errors-only toggle and rebuild the active view.
    pub fn toggle_error_only(&mut self) {
        self.set_error_only(!self.view.error_only);
    }

    pub fn set_error_only(&mut self, error_only: bool) {
        self.view.error_only = error_only;
        self.refresh();
    }

    /// Replace `find` with `replace` in the targeted real sources, then rebuild the view.
    ///
    /// Targets are the active source, or the checked sources when the query source is
    /// active.
    pub fn replace_all(&mut self, find: &str, replacement: &str) -> Result<usize> {
        let targets = match self.view.active_source() {
            None => return Err(LogscopeError::NoActiveSource),
            Some(SYNTHETIC_SOURCE_NAME) => self.checked_sources(),
            Some(name) => vec![name.to_string()],
        };

        let changed = replace::replace_all(&mut self.store, find, replacement, &targets)?;
        self.refresh();
        Ok(changed)
    }

    /// Check or uncheck a real source. Returns the resulting state.
    pub fn set_checked(&mut self, name: &str, checked: bool) -> bool {
        if !self.store.is_real(name) {
            return false;
        }
        let present = self.checked.iter().any(|c| c == name);
        if checked && !present {
            self.checked.push(name.to_string());
        } else if !checked && present {
            self.checked.retain(|c| c != name);
        }
        checked
    }

    pub fn toggle_checked(&mut self, name: &str) -> bool {
        let checked = self.is_checked(name);
        self.set_checked(name, !checked)
    }

    pub fn is_checked(&self, name: &str) -> bool {
        self.checked.iter().any(|c| c == name)
    }

    /// Checked real sources, in tab (insertion) order.
    pub fn checked_sources(&self) -> Vec<String> {
        self.store
            .names()
            .filter(|name| self.is_checked(name))
            .map(str::to_string)
            .collect()
    }

    /// Visible lines as an export payload.
    pub fn export(&self) -> Result<ExportPayload> {
        let payload = export_lines(self.view.active_source(), self.view.visible_lines())?;
        info!(
            "exported {} bytes as {}",
            payload.bytes.len(),
            payload.file_name
        );
        Ok(payload)
    }

    fn refresh(&mut self) {
        match self.view.active_source().map(str::to_string) {
            Some(name) if name == SYNTHETIC_SOURCE_NAME => self.rerun_mass(),
            Some(name) => self.refilter_real(&name),
            None => {}
        }
    }

    /// Show a real source unsearched, under the current errors-only setting.
    fn show_real(&mut self, name: &str) {
        self.search_term = None;
        self.refilter_real(name);
    }

    fn refilter_real(&mut self, name: &str) {
        if let Some(source) = self.store.get(name) {
            let visible = filter(source, self.search_term.as_deref(), self.view.error_only);
            self.view.show(name, visible);
        }
    }

    fn rerun_mass(&mut self) {
        let Some(query) = self.last_mass.as_ref() else {
            return;
        };
        let hits = mass::aggregate(
            &self.store,
            &query.term,
            &query.selected,
            self.view.error_only,
        );
        self.show_mass(hits);
    }

    fn show_mass(&mut self, hits: Vec<ViewLine>) -> usize {
        let texts = hits.iter().map(|hit| hit.text.clone()).collect();
        self.store.upsert_synthetic(texts);
        let count = hits.len();
        debug!("query source rebuilt with {} lines", count);
        self.view.show(SYNTHETIC_SOURCE_NAME, hits);
        count
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Config::default(), 24)
    }
}
