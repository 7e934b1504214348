//! Bidirectional chain-id remapping between the search index and the widget.
//!
//! The token search index and the execution widget disagree on how to number
//! some chains. Tokens coming from search carry the search-index id; commands
//! sent to the widget must carry the widget's id. This table is the single
//! place where the two spaces meet.

use serde::{Deserialize, Serialize};

use super::ChainId;

/// One row of the remap table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainIdMapping {
    /// Identifier used by the token search index.
    pub search_id: ChainId,
    /// Identifier expected by the execution widget.
    pub execution_id: ChainId,
}

/// Fixed bidirectional table; ids without an entry map to themselves.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainIdMap {
    entries: Vec<ChainIdMapping>,
}

impl ChainIdMap {
    /// Build a map from its entries.
    ///
    /// Later rows never shadow earlier ones: lookups return the first match in
    /// either direction.
    pub fn new(entries: Vec<ChainIdMapping>) -> Self {
        Self { entries }
    }

    /// Translate a search-index id into the widget's id space.
    pub fn to_execution(&self, search_id: ChainId) -> ChainId {
        self.entries
            .iter()
            .find(|m| m.search_id == search_id)
            .map_or(search_id, |m| m.execution_id)
    }

    /// Translate a widget id back into the search-index id space.
    pub fn to_search(&self, execution_id: ChainId) -> ChainId {
        self.entries
            .iter()
            .find(|m| m.execution_id == execution_id)
            .map_or(execution_id, |m| m.search_id)
    }

    pub fn entries(&self) -> &[ChainIdMapping] {
        &self.entries
    }
}
