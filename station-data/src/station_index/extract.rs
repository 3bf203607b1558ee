//! Code → name table reconstruction from positioned text.
//!
//! The station index lays out a two-column table (code, name) but the
//! document carries no table structure: each page is a flat stream of text
//! runs with positions. A row is recognised from adjacency alone. A run that
//! starts with a CRS code, followed by a run that is neither a line break nor
//! a "(continued)" header, is a code and its name.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::Crs;

/// Line-break marker emitted between runs on different baselines.
pub const LINE_BREAK: &str = "\n";

/// Marker of a repeated header on pages that continue a section.
const CONTINUED_MARKER: &str = "(continued)";

/// A run of text as laid out on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedFragment {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

impl PositionedFragment {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }

    /// Whether this fragment can take part in a row.
    ///
    /// Empty runs and runs at exactly `(0, 0)` carry no real placement.
    fn is_anchored(&self) -> bool {
        !self.text.is_empty() && !(self.x == 0.0 && self.y == 0.0)
    }
}

/// Recognise a row starting at `fragment`, with `next` as the candidate name.
fn match_row(fragment: &str, next: &str) -> Option<(Crs, String)> {
    let code = Crs::from_prefix(fragment.trim())?;

    if next == LINE_BREAK || next.contains(CONTINUED_MARKER) {
        return None;
    }

    Some((code, next.trim().to_string()))
}

/// Authoritative station names keyed by CRS code.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeNameTable {
    entries: HashMap<Crs, String>,
}

impl CodeNameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from pages in document order.
    ///
    /// A code that appears on more than one page keeps the name from the
    /// last page it appears on.
    pub fn from_pages<I, P>(pages: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[PositionedFragment]>,
    {
        let mut table = Self::new();
        for page in pages {
            table.extract_page(page.as_ref());
        }
        table
    }

    /// Scan one page and record every row found. Returns the number of rows.
    ///
    /// The scan advances one fragment at a time, so a fragment is tested
    /// both as the name of the previous fragment and as a row start itself.
    /// A code whose successor is another code therefore yields a row whose
    /// name is that code's text.
    pub fn extract_page(&mut self, fragments: &[PositionedFragment]) -> usize {
        let anchored: Vec<&str> = fragments
            .iter()
            .filter(|f| f.is_anchored())
            .map(|f| f.text.as_str())
            .collect();

        let successors = anchored.iter().skip(1).copied().chain(std::iter::once(""));

        let mut rows = 0;
        for (text, next) in anchored.iter().zip(successors) {
            if let Some((code, name)) = match_row(text, next) {
                if let Some(previous) = self.entries.insert(code, name)
                    && self.entries.get(&code) != Some(&previous)
                {
                    debug!(%code, %previous, "station index entry replaced");
                }
                rows += 1;
            }
        }
        rows
    }

    /// Look up the name for a code.
    pub fn get(&self, code: &Crs) -> Option<&str> {
        self.entries.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
