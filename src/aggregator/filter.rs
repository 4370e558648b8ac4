//! Engine filter deciding which threads are recording units.

use super::metadata::Metadata;
use crate::parser::EventId;
use crate::utils::config::{DEFAULT_INCLUDE_TERMS, DMA_TERM, TERM_SEPARATOR};

/// Case-insensitive include/exclude substring lists applied to engine names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Empty means "include every engine"
    pub include_terms: Vec<String>,
    pub exclude_terms: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INCLUDE_TERMS.iter().copied(), std::iter::empty::<&str>())
    }
}

impl FilterConfig {
    /// Build a filter from raw terms. Terms are lowercased; empty terms dropped.
    pub fn new<I, E>(include: I, exclude: E) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Self {
            include_terms: normalize_terms(include),
            exclude_terms: normalize_terms(exclude),
        }
    }

    /// Apply the command-line layering rules
    ///
    /// An explicit include or exclude list replaces the defaults entirely.
    /// Otherwise `dma` adds the DMA engines to the default include list.
    pub fn from_cli(include: Option<&str>, exclude: Option<&str>, dma: bool) -> Self {
        let include = include.filter(|s| !s.is_empty());
        let exclude = exclude.filter(|s| !s.is_empty());

        if include.is_some() || exclude.is_some() {
            return Self::new(split_terms(include), split_terms(exclude));
        }

        let mut config = Self::default();
        if dma {
            config.include_terms.push(DMA_TERM.to_string());
        }
        config
    }

    /// True if the engine name passes both lists
    pub fn matches(&self, engine_name: &str) -> bool {
        let engine = engine_name.to_lowercase();

        let included = self.include_terms.is_empty()
            || self.include_terms.iter().any(|term| engine.contains(term.as_str()));

        included && !self.exclude_terms.iter().any(|term| engine.contains(term.as_str()))
    }

    /// True if the thread's events should be aggregated
    ///
    /// Threads without a `thread_name` metadata entry never record.
    pub fn is_recording_unit(&self, metadata: &Metadata, thread_id: &EventId) -> bool {
        metadata
            .engine_name(thread_id)
            .is_some_and(|engine| self.matches(engine))
    }
}

fn split_terms(list: Option<&str>) -> Vec<&str> {
    list.map(|s| s.split(TERM_SEPARATOR).collect())
        .unwrap_or_default()
}

fn normalize_terms<I>(terms: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| t.as_ref().trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
