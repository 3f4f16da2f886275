//! Page envelope returned by every `...ByStatement` call

use serde::{Deserialize, Serialize};

/// One page of a larger result set
///
/// The client never pages on its own. To read everything, keep a
/// `StatementBuilder` with a `LIMIT`, call the service, then advance the
/// offset by `len()` until `is_last_page()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct PageResult<T> {
    #[serde(default)]
    pub total_result_set_size: u32,
    #[serde(default)]
    pub start_index: u32,
    #[serde(default)]
    pub results: Vec<T>,
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self {
            total_result_set_size: 0,
            start_index: 0,
            results: Vec::new(),
        }
    }
}

impl<T> PageResult<T> {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Offset of the page after this one, saturating at `u32::MAX`
    pub fn next_start_index(&self) -> u32 {
        let len = u32::try_from(self.results.len()).unwrap_or(u32::MAX);
        self.start_index.saturating_add(len)
    }

    /// True when no further page can hold results
    pub fn is_last_page(&self) -> bool {
        self.results.is_empty() || self.next_start_index() >= self.total_result_set_size
    }

    /// `start_index + len <= total_result_set_size`
    pub fn is_consistent(&self) -> bool {
        self.next_start_index() <= self.total_result_set_size
    }

    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }

    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}
