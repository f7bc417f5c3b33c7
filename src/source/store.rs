//! Owner of every loaded source.
//!
//! Real sources are kept in insertion order; the synthetic query source lives in its
//! own slot so it can never collide with, or be mistaken for, an imported log.

use super::{split_lines, LogSource, Palette, SourceColor, QUERY_COLOR, SYNTHETIC_SOURCE_NAME};
use crate::error::{LogscopeError, Result};
use log::debug;

#[derive(Debug)]
pub struct SourceStore {
    /// Real sources in insertion order
    sources: Vec<LogSource>,
    /// Synthetic mass-search result, once the first mass search ran
    synthetic: Option<LogSource>,
    palette: Palette,
    query_color: SourceColor,
    /// Successful real imports so far; drives color assignment
    import_count: usize,
}

impl SourceStore {
    pub fn new(palette: Palette, query_color: SourceColor) -> Self {
        Self {
            sources: Vec::new(),
            synthetic: None,
            palette,
            query_color,
            import_count: 0,
        }
    }

    /// Split `raw_text` into lines and store it as a new real source.
    pub fn import(&mut self, name: &str, raw_text: &str) -> Result<&LogSource> {
        if name == SYNTHETIC_SOURCE_NAME || self.position(name).is_some() {
            return Err(LogscopeError::duplicate_source(name));
        }

        let color = self.palette.color_for(self.import_count);
        let lines = split_lines(raw_text);
        debug!(
            "imported {} ({} lines, color {})",
            name,
            lines.len(),
            color
        );

        self.import_count += 1;
        self.sources.push(LogSource::new(name, color, lines));
        Ok(&self.sources[self.sources.len() - 1])
    }

    /// Remove a source by name. Returns false if nothing was removed.
    pub fn close(&mut self, name: &str) -> bool {
        if name == SYNTHETIC_SOURCE_NAME {
            return self.synthetic.take().is_some();
        }
        match self.position(name) {
            Some(index) => {
                self.sources.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, name: &str) -> Option<&LogSource> {
        if name == SYNTHETIC_SOURCE_NAME {
            return self.synthetic.as_ref();
        }
        self.sources.iter().find(|source| source.name == name)
    }

    /// Mutable access to a real source; the synthetic source is never handed out.
    pub(crate) fn get_real_mut(&mut self, name: &str) -> Option<&mut LogSource> {
        self.sources.iter_mut().find(|source| source.name == name)
    }

    /// First remaining real source in insertion order.
    pub fn fallback(&self) -> Option<&str> {
        self.sources.first().map(|source| source.name.as_str())
    }

    /// Names of real sources in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|source| source.name.as_str())
    }

    /// Real sources in insertion order.
    pub fn sources(&self) -> &[LogSource] {
        &self.sources
    }

    pub fn synthetic(&self) -> Option<&LogSource> {
        self.synthetic.as_ref()
    }

    /// Create the synthetic source, or overwrite its lines if it exists.
    pub fn upsert_synthetic(&mut self, lines: Vec<String>) -> &LogSource {
        let query_color = self.query_color;
        let source = self
            .synthetic
            .get_or_insert_with(|| LogSource::synthetic(query_color, Vec::new()));
        source.lines = lines;
        source
    }

    pub fn is_real(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Number of real sources.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.sources.iter().position(|source| source.name == name)
    }
}

impl Default for SourceStore {
    fn default() -> Self {
        Self::new(Palette::default(), QUERY_COLOR)
    }
}
